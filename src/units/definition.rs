//! Unit definitions
//!
//!     A definition binds a unit name to the rules declared for it, plus
//!     the declaration-time modifiers: named variations (subsets of the
//!     rules), an argument identifier whose occurrences get substituted at
//!     generation time, and casegen. The three entry points mirror the
//!     three things callers ask of a unit: one random utterance, every
//!     utterance, or an upper bound on how many utterances exist.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use crate::error::GenerationError;
use crate::parsing::symbols::RESERVED_VARIATION_NAMES;
use crate::units::rule_content::{combine_all, expand_case, rule_max_nb, Rule};
use crate::units::store::UnitStore;
use crate::units::{may_change_leading_case, randomly_change_case, Example, RandgenDecisions, UnitType};

static ESCAPED_ARG_SYM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\$").expect("Invalid regex pattern"));

/// A named alias, slot or intent and the rules it expands to.
#[derive(Debug, Clone)]
pub struct UnitDefinition {
    pub unit_type: UnitType,
    pub name: String,
    rules: Vec<Rule>,
    variations: IndexMap<String, Vec<usize>>,
    argument_identifier: Option<String>,
    arg_pattern: Option<Regex>,
    pub casegen: bool,
}

impl UnitDefinition {
    pub fn new(unit_type: UnitType, name: impl Into<String>) -> Result<UnitDefinition, GenerationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GenerationError::EmptyName);
        }
        Ok(UnitDefinition {
            unit_type,
            name,
            rules: Vec::new(),
            variations: IndexMap::new(),
            argument_identifier: None,
            arg_pattern: None,
            casegen: false,
        })
    }

    pub fn with_casegen(mut self, casegen: bool) -> UnitDefinition {
        self.casegen = casegen;
        self
    }

    /// Declares the argument identifier; `$identifier` inside generated
    /// text will be replaced by the value passed at the reference site.
    pub fn with_argument(mut self, identifier: impl Into<String>) -> UnitDefinition {
        let identifier = identifier.into();
        // An optional leading backslash is captured so escaped occurrences
        // can be told apart from substitutable ones.
        let pattern = format!(r"\\?\${}", regex::escape(&identifier));
        self.arg_pattern = Some(Regex::new(&pattern).expect("Invalid regex pattern"));
        self.argument_identifier = Some(identifier);
        self
    }

    pub fn argument_identifier(&self) -> Option<&str> {
        self.argument_identifier.as_deref()
    }

    pub fn nb_rules(&self) -> usize {
        self.rules.len()
    }

    pub fn variation_names(&self) -> impl Iterator<Item = &str> {
        self.variations.keys().map(String::as_str)
    }

    /// Adds a rule, under a variation name if one is given. Variation rules
    /// stay part of the unit's full rule set.
    pub fn add_rule(&mut self, rule: Rule, variation: Option<&str>) -> Result<(), GenerationError> {
        let index = self.rules.len();
        self.rules.push(rule);
        if let Some(variation) = variation {
            if variation.is_empty() {
                return Err(GenerationError::EmptyVariationName {
                    unit_type: self.unit_type,
                    unit_name: self.name.clone(),
                });
            }
            if RESERVED_VARIATION_NAMES.contains(&variation) {
                return Err(GenerationError::ReservedVariationName(variation.to_string()));
            }
            self.variations
                .entry(variation.to_string())
                .or_default()
                .push(index);
        }
        Ok(())
    }

    pub fn add_rules(
        &mut self,
        rules: Vec<Rule>,
        variation: Option<&str>,
    ) -> Result<(), GenerationError> {
        for rule in rules {
            self.add_rule(rule, variation)?;
        }
        Ok(())
    }

    fn rule_indices(&self, variation: Option<&str>) -> Result<Vec<usize>, GenerationError> {
        match variation {
            None => Ok((0..self.rules.len()).collect()),
            Some(variation) => self
                .variations
                .get(variation)
                .cloned()
                .ok_or_else(|| GenerationError::UnknownVariation {
                    unit_type: self.unit_type,
                    unit_name: self.name.clone(),
                    variation: variation.to_string(),
                }),
        }
    }

    fn substitute_arg(&self, text: &str, arg_value: Option<&str>) -> String {
        match (arg_value, &self.arg_pattern) {
            (Some(value), Some(pattern)) => {
                let substituted = pattern.replace_all(text, |caps: &regex::Captures| {
                    let matched = &caps[0];
                    if matched.starts_with('\\') {
                        matched.to_string()
                    } else {
                        value.to_string()
                    }
                });
                ESCAPED_ARG_SYM.replace_all(&substituted, "$$").into_owned()
            }
            _ => text.to_string(),
        }
    }

    /// Generates one example from a uniformly chosen rule. Randgen
    /// decisions are shared across the whole chosen rule, so same-named
    /// randgen nodes inside it agree with each other.
    pub fn generate_random(
        &self,
        store: &UnitStore,
        variation: Option<&str>,
        arg_value: Option<&str>,
    ) -> Result<Example, GenerationError> {
        let indices = self.rule_indices(variation)?;
        if indices.is_empty() {
            return Ok(Example::default());
        }
        let index = indices[rand::thread_rng().gen_range(0..indices.len())];
        let mut decisions = RandgenDecisions::new();
        let mut example = Example::default();
        for content in &self.rules[index] {
            example.append(content.generate_random(store, &mut decisions)?);
        }
        // Case is decided on the raw text: an argument occurrence in
        // leading position keeps the rule case-insensitive, whatever
        // value gets substituted in.
        if self.casegen && may_change_leading_case(&example.text) {
            example.text = randomly_change_case(&example.text);
        }
        example.text = self.substitute_arg(&example.text, arg_value);
        Ok(example)
    }

    /// Generates every example this unit can produce, rule by rule in
    /// declaration order.
    pub fn generate_all(
        &self,
        store: &UnitStore,
        variation: Option<&str>,
        arg_value: Option<&str>,
    ) -> Result<Vec<Example>, GenerationError> {
        let indices = self.rule_indices(variation)?;
        if indices.is_empty() {
            return Err(GenerationError::NoRules {
                unit_type: self.unit_type,
                unit_name: self.name.clone(),
                variation: variation.map(str::to_string),
            });
        }
        let mut examples = Vec::new();
        for &index in &indices {
            examples.extend(combine_all(&self.rules[index], store)?);
        }
        if arg_value.is_some() && self.arg_pattern.is_some() {
            for example in &mut examples {
                example.text = self.substitute_arg(&example.text, arg_value);
            }
        }
        if self.casegen {
            examples = expand_case(examples);
        }
        Ok(examples)
    }

    /// Returns an upper bound on how many examples this unit can produce.
    /// Unlike generation, a unit without rules counts zero rather than
    /// failing.
    pub fn get_max_nb_generated_examples(
        &self,
        store: &UnitStore,
        variation: Option<&str>,
    ) -> Result<u64, GenerationError> {
        let indices = self.rule_indices(variation)?;
        let mut nb = 0u64;
        for &index in &indices {
            nb = nb.saturating_add(rule_max_nb(&self.rules[index], store)?);
        }
        if self.casegen {
            nb = nb.saturating_mul(2);
        }
        Ok(nb)
    }
}
