//! Rule content nodes
//!
//!     Everything that can appear inside a rule: a literal word, a word
//!     group (literal words with shared modifiers), a reference to a named
//!     unit definition, or a choice between alternative sub-rules. The kind
//!     set is closed, so each generation operation is an exhaustive match
//!     over the four variants.
//!
//!     Node modifiers drive generation:
//!         - leading_space: a space is prepended to the generated text
//!         - casegen: the first letter's case may be toggled
//!         - randgen: the node may stay silent; nodes sharing a randgen
//!           name all generate or none does, within one generation pass
//!         - percentgen: the chance (0-100) that a randgen node generates
//!         - variation_name / arg_value: forwarded to the referenced unit

use crate::error::GenerationError;
use crate::units::store::UnitStore;
use crate::units::{
    may_change_leading_case, may_get_leading_space, randomly_change_case, with_leading_lower,
    with_leading_upper, Entity, Example, RandgenDecisions, UnitType,
};
use rand::Rng;

/// A rule: an ordered sequence of content nodes whose generations
/// concatenate into one utterance.
pub type Rule = Vec<RuleContent>;

pub const DEFAULT_PERCENTGEN: u8 = 50;

/// Decides whether a randgen-tagged node generates, honoring decisions
/// already taken for the same name during this pass. An anonymous randgen
/// rolls independently and records nothing.
fn randgen_decides(name: &str, percentgen: u8, decisions: &mut RandgenDecisions) -> bool {
    if name.is_empty() {
        return rand::thread_rng().gen_range(0u8..100) < percentgen;
    }
    if let Some(&decision) = decisions.get(name) {
        return decision;
    }
    let decision = rand::thread_rng().gen_range(0u8..100) < percentgen;
    decisions.insert(name.to_string(), decision);
    decision
}

/// Expands each example into a forced-lowercase and a forced-uppercase
/// variant, keeping the single original when both variants coincide.
pub(crate) fn expand_case(examples: Vec<Example>) -> Vec<Example> {
    let mut result = Vec::with_capacity(examples.len() * 2);
    for example in examples {
        let lower = Example {
            text: with_leading_lower(&example.text),
            entities: example.entities.clone(),
        };
        let upper = Example {
            text: with_leading_upper(&example.text),
            entities: example.entities.clone(),
        };
        if lower != upper {
            result.push(lower);
            result.push(upper);
        } else {
            result.push(example);
        }
    }
    result
}

/// Computes the cartesian product of the nodes' exhaustive outputs, text
/// and entities concatenated pairwise in order. An empty rule produces no
/// examples.
pub(crate) fn combine_all(rule: &[RuleContent], store: &UnitStore) -> Result<Vec<Example>, GenerationError> {
    let mut combined: Vec<Example> = Vec::new();
    for content in rule {
        let possibilities = content.generate_all(store)?;
        if combined.is_empty() {
            combined = possibilities;
        } else {
            let mut buffer = Vec::with_capacity(combined.len() * possibilities.len());
            for example in &combined {
                for possibility in &possibilities {
                    let mut product = example.clone();
                    product.append(possibility.clone());
                    buffer.push(product);
                }
            }
            combined = buffer;
        }
    }
    Ok(combined)
}

/// Computes the product of the nodes' own counts for one rule; nodes with
/// an undefined count contribute no factor. The product saturates at
/// `u64::MAX`, counts being an upper bound anyway.
pub(crate) fn rule_max_nb(rule: &[RuleContent], store: &UnitStore) -> Result<u64, GenerationError> {
    let mut rule_nb = 0u64;
    for content in rule {
        match content.max_nb_generated_examples(store)? {
            None => continue,
            Some(nb) => {
                if rule_nb == 0 {
                    rule_nb = nb;
                } else {
                    rule_nb = rule_nb.saturating_mul(nb);
                }
            }
        }
    }
    Ok(rule_nb)
}

fn prepend_leading_space(text: &mut String) {
    if may_get_leading_space(text) {
        text.insert(0, ' ');
    }
}

/// A literal word.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub word: String,
    pub leading_space: bool,
}

impl Word {
    pub fn new(word: impl Into<String>) -> Result<Word, GenerationError> {
        let word = word.into();
        if word.is_empty() {
            return Err(GenerationError::EmptyName);
        }
        Ok(Word {
            word,
            leading_space: false,
        })
    }

    pub fn with_leading_space(mut self, leading_space: bool) -> Word {
        self.leading_space = leading_space;
        self
    }

    fn generate(&self) -> Example {
        let mut text = self.word.clone();
        if self.leading_space {
            prepend_leading_space(&mut text);
        }
        Example::new(text)
    }
}

/// Literal words sharing one set of modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct WordGroup {
    pub words: String,
    pub leading_space: bool,
    pub casegen: bool,
    pub randgen_name: Option<String>,
    pub percentgen: u8,
}

impl WordGroup {
    pub fn new(words: impl Into<String>) -> Result<WordGroup, GenerationError> {
        let words = words.into();
        if words.is_empty() {
            return Err(GenerationError::EmptyName);
        }
        Ok(WordGroup {
            words,
            leading_space: false,
            casegen: false,
            randgen_name: None,
            percentgen: DEFAULT_PERCENTGEN,
        })
    }

    pub fn with_leading_space(mut self, leading_space: bool) -> WordGroup {
        self.leading_space = leading_space;
        self
    }

    pub fn with_casegen(mut self, casegen: bool) -> WordGroup {
        self.casegen = casegen;
        self
    }

    pub fn with_randgen(mut self, name: impl Into<String>) -> WordGroup {
        self.randgen_name = Some(name.into());
        self
    }

    pub fn with_percentgen(mut self, percentgen: u8) -> WordGroup {
        self.percentgen = percentgen;
        self
    }

    fn generate_random(&self, decisions: &mut RandgenDecisions) -> Example {
        if let Some(name) = &self.randgen_name {
            if !randgen_decides(name, self.percentgen, decisions) {
                return Example::default();
            }
        }
        let mut text = self.words.clone();
        if self.casegen && may_change_leading_case(&text) {
            text = randomly_change_case(&text);
        }
        if self.leading_space {
            prepend_leading_space(&mut text);
        }
        Example::new(text)
    }

    fn generate_all(&self) -> Vec<Example> {
        let mut text = self.words.clone();
        if self.leading_space {
            prepend_leading_space(&mut text);
        }
        let mut possibilities = if self.casegen {
            expand_case(vec![Example::new(text)])
        } else {
            vec![Example::new(text)]
        };
        if self.randgen_name.is_some() {
            possibilities.insert(0, Example::default());
        }
        possibilities
    }

    fn max_nb_generated_examples(&self) -> u64 {
        let mut nb = if self.casegen && may_change_leading_case(&self.words) {
            2
        } else {
            1
        };
        if self.randgen_name.is_some() {
            nb += 1;
        }
        nb
    }
}

/// A reference to a named alias, slot or intent definition.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitRef {
    pub unit_type: UnitType,
    pub name: String,
    pub leading_space: bool,
    pub variation_name: Option<String>,
    pub arg_value: Option<String>,
    pub casegen: bool,
    pub randgen_name: Option<String>,
    pub percentgen: u8,
}

impl UnitRef {
    pub fn new(unit_type: UnitType, name: impl Into<String>) -> Result<UnitRef, GenerationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GenerationError::EmptyName);
        }
        Ok(UnitRef {
            unit_type,
            name,
            leading_space: false,
            variation_name: None,
            arg_value: None,
            casegen: false,
            randgen_name: None,
            percentgen: DEFAULT_PERCENTGEN,
        })
    }

    pub fn with_leading_space(mut self, leading_space: bool) -> UnitRef {
        self.leading_space = leading_space;
        self
    }

    pub fn with_variation(mut self, name: impl Into<String>) -> UnitRef {
        self.variation_name = Some(name.into());
        self
    }

    pub fn with_arg_value(mut self, value: impl Into<String>) -> UnitRef {
        self.arg_value = Some(value.into());
        self
    }

    pub fn with_casegen(mut self, casegen: bool) -> UnitRef {
        self.casegen = casegen;
        self
    }

    pub fn with_randgen(mut self, name: impl Into<String>) -> UnitRef {
        self.randgen_name = Some(name.into());
        self
    }

    pub fn with_percentgen(mut self, percentgen: u8) -> UnitRef {
        self.percentgen = percentgen;
        self
    }

    fn resolve<'a>(&self, store: &'a UnitStore) -> Result<&'a crate::units::UnitDefinition, GenerationError> {
        store
            .get(self.unit_type, &self.name)
            .ok_or_else(|| GenerationError::UndefinedUnit {
                unit_type: self.unit_type,
                name: self.name.clone(),
            })
    }

    fn generate_random(
        &self,
        store: &UnitStore,
        decisions: &mut RandgenDecisions,
    ) -> Result<Example, GenerationError> {
        if let Some(name) = &self.randgen_name {
            if !randgen_decides(name, self.percentgen, decisions) {
                return Ok(Example::default());
            }
        }
        let definition = self.resolve(store)?;
        let mut example = definition.generate_random(
            store,
            self.variation_name.as_deref(),
            self.arg_value.as_deref(),
        )?;
        if self.casegen && may_change_leading_case(&example.text) {
            example.text = randomly_change_case(&example.text);
        }
        if self.unit_type == UnitType::Slot {
            example.entities.push(Entity {
                slot_name: self.name.clone(),
                value: example.text.clone(),
            });
        }
        if self.leading_space {
            prepend_leading_space(&mut example.text);
        }
        Ok(example)
    }

    fn generate_all(&self, store: &UnitStore) -> Result<Vec<Example>, GenerationError> {
        let definition = self.resolve(store)?;
        let mut possibilities = definition.generate_all(
            store,
            self.variation_name.as_deref(),
            self.arg_value.as_deref(),
        )?;
        if self.casegen {
            possibilities = expand_case(possibilities);
        }
        for example in &mut possibilities {
            if self.unit_type == UnitType::Slot {
                example.entities.push(Entity {
                    slot_name: self.name.clone(),
                    value: example.text.clone(),
                });
            }
            if self.leading_space {
                prepend_leading_space(&mut example.text);
            }
        }
        if self.randgen_name.is_some() {
            possibilities.insert(0, Example::default());
        }
        Ok(possibilities)
    }

    fn max_nb_generated_examples(&self, store: &UnitStore) -> Result<u64, GenerationError> {
        let definition = self.resolve(store)?;
        let mut nb =
            definition.get_max_nb_generated_examples(store, self.variation_name.as_deref())?;
        if self.casegen {
            nb = nb.saturating_mul(2);
        }
        if self.randgen_name.is_some() {
            nb = nb.saturating_add(1);
        }
        Ok(nb)
    }
}

/// A set of alternative sub-rules, one of which is selected (or all of
/// which are enumerated).
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub alternatives: Vec<Rule>,
    pub leading_space: bool,
    pub casegen: bool,
    pub randgen: bool,
}

impl Choice {
    pub fn new(alternatives: Vec<Rule>) -> Result<Choice, GenerationError> {
        if alternatives.is_empty() {
            return Err(GenerationError::EmptyName);
        }
        Ok(Choice {
            alternatives,
            leading_space: false,
            casegen: false,
            randgen: false,
        })
    }

    pub fn with_leading_space(mut self, leading_space: bool) -> Choice {
        self.leading_space = leading_space;
        self
    }

    pub fn with_casegen(mut self, casegen: bool) -> Choice {
        self.casegen = casegen;
        self
    }

    pub fn with_randgen(mut self, randgen: bool) -> Choice {
        self.randgen = randgen;
        self
    }

    fn generate_random(
        &self,
        store: &UnitStore,
        decisions: &mut RandgenDecisions,
    ) -> Result<Example, GenerationError> {
        if self.randgen && !rand::thread_rng().gen_bool(0.5) {
            return Ok(Example::default());
        }
        let index = rand::thread_rng().gen_range(0..self.alternatives.len());
        let mut example = Example::default();
        for content in &self.alternatives[index] {
            example.append(content.generate_random(store, decisions)?);
        }
        if self.casegen && may_change_leading_case(&example.text) {
            example.text = randomly_change_case(&example.text);
        }
        if self.leading_space {
            prepend_leading_space(&mut example.text);
        }
        Ok(example)
    }

    fn generate_all(&self, store: &UnitStore) -> Result<Vec<Example>, GenerationError> {
        let mut possibilities = Vec::new();
        for alternative in &self.alternatives {
            possibilities.extend(combine_all(alternative, store)?);
        }
        if self.casegen {
            possibilities = expand_case(possibilities);
        }
        if self.leading_space {
            for example in &mut possibilities {
                prepend_leading_space(&mut example.text);
            }
        }
        if self.randgen {
            possibilities.insert(0, Example::default());
        }
        Ok(possibilities)
    }

    fn max_nb_generated_examples(&self, store: &UnitStore) -> Result<u64, GenerationError> {
        let mut nb = 0u64;
        for alternative in &self.alternatives {
            nb = nb.saturating_add(rule_max_nb(alternative, store)?);
        }
        if self.casegen {
            nb = nb.saturating_mul(2);
        }
        if self.randgen {
            nb = nb.saturating_add(1);
        }
        Ok(nb)
    }
}

/// Anything that can appear inside a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleContent {
    Word(Word),
    WordGroup(WordGroup),
    UnitRef(UnitRef),
    Choice(Choice),
}

impl RuleContent {
    /// Returns `true` if case generation can have an influence on this node.
    pub fn can_have_casegen(&self) -> bool {
        match self {
            RuleContent::Word(word) => may_change_leading_case(&word.word),
            RuleContent::WordGroup(group) => may_change_leading_case(&group.words),
            RuleContent::UnitRef(_) => true,
            RuleContent::Choice(choice) => choice
                .alternatives
                .iter()
                .any(|alt| alt.first().map_or(false, RuleContent::can_have_casegen)),
        }
    }

    /// Generates this node once, honoring randgen decisions already taken
    /// during this pass.
    pub fn generate_random(
        &self,
        store: &UnitStore,
        decisions: &mut RandgenDecisions,
    ) -> Result<Example, GenerationError> {
        match self {
            RuleContent::Word(word) => Ok(word.generate()),
            RuleContent::WordGroup(group) => Ok(group.generate_random(decisions)),
            RuleContent::UnitRef(unit_ref) => unit_ref.generate_random(store, decisions),
            RuleContent::Choice(choice) => choice.generate_random(store, decisions),
        }
    }

    /// Generates everything this node can produce, the empty example
    /// included when randgen allows the node to stay silent.
    pub fn generate_all(&self, store: &UnitStore) -> Result<Vec<Example>, GenerationError> {
        match self {
            RuleContent::Word(word) => Ok(vec![word.generate()]),
            RuleContent::WordGroup(group) => Ok(group.generate_all()),
            RuleContent::UnitRef(unit_ref) => unit_ref.generate_all(store),
            RuleContent::Choice(choice) => choice.generate_all(store),
        }
    }

    /// Returns the number of examples this node can produce, or `None`
    /// when the node contributes no cartesian factor.
    pub fn max_nb_generated_examples(
        &self,
        store: &UnitStore,
    ) -> Result<Option<u64>, GenerationError> {
        match self {
            RuleContent::Word(_) => Ok(Some(1)),
            RuleContent::WordGroup(group) => Ok(Some(group.max_nb_generated_examples())),
            RuleContent::UnitRef(unit_ref) => {
                unit_ref.max_nb_generated_examples(store).map(Some)
            }
            RuleContent::Choice(choice) => choice.max_nb_generated_examples(store).map(Some),
        }
    }
}

impl From<Word> for RuleContent {
    fn from(word: Word) -> RuleContent {
        RuleContent::Word(word)
    }
}

impl From<WordGroup> for RuleContent {
    fn from(group: WordGroup) -> RuleContent {
        RuleContent::WordGroup(group)
    }
}

impl From<UnitRef> for RuleContent {
    fn from(unit_ref: UnitRef) -> RuleContent {
        RuleContent::UnitRef(unit_ref)
    }
}

impl From<Choice> for RuleContent {
    fn from(choice: Choice) -> RuleContent {
        RuleContent::Choice(choice)
    }
}
