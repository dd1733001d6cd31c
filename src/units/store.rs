//! Unit store
//!
//!     Holds every parsed definition, one namespace per unit kind: an
//!     alias, a slot and an intent may share a name without clashing.
//!     Insertion order is preserved so generation walks intents in the
//!     order they were declared.

use indexmap::IndexMap;

use crate::units::definition::UnitDefinition;
use crate::units::UnitType;

#[derive(Debug, Clone, Default)]
pub struct UnitStore {
    aliases: IndexMap<String, UnitDefinition>,
    slots: IndexMap<String, UnitDefinition>,
    intents: IndexMap<String, UnitDefinition>,
}

impl UnitStore {
    pub fn new() -> UnitStore {
        UnitStore::default()
    }

    fn namespace(&self, unit_type: UnitType) -> &IndexMap<String, UnitDefinition> {
        match unit_type {
            UnitType::Alias => &self.aliases,
            UnitType::Slot => &self.slots,
            UnitType::Intent => &self.intents,
        }
    }

    fn namespace_mut(&mut self, unit_type: UnitType) -> &mut IndexMap<String, UnitDefinition> {
        match unit_type {
            UnitType::Alias => &mut self.aliases,
            UnitType::Slot => &mut self.slots,
            UnitType::Intent => &mut self.intents,
        }
    }

    /// Inserts a definition, replacing any previous definition of the same
    /// kind and name.
    pub fn add(&mut self, definition: UnitDefinition) {
        self.namespace_mut(definition.unit_type)
            .insert(definition.name.clone(), definition);
    }

    pub fn get(&self, unit_type: UnitType, name: &str) -> Option<&UnitDefinition> {
        self.namespace(unit_type).get(name)
    }

    pub fn get_mut(&mut self, unit_type: UnitType, name: &str) -> Option<&mut UnitDefinition> {
        self.namespace_mut(unit_type).get_mut(name)
    }

    pub fn contains(&self, unit_type: UnitType, name: &str) -> bool {
        self.namespace(unit_type).contains_key(name)
    }

    pub fn iter(&self, unit_type: UnitType) -> impl Iterator<Item = &UnitDefinition> {
        self.namespace(unit_type).values()
    }

    pub fn len(&self, unit_type: UnitType) -> usize {
        self.namespace(unit_type).len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty() && self.slots.is_empty() && self.intents.is_empty()
    }
}
