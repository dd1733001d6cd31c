//! Generation engine tests on hand-assembled stores, the way an
//! orchestrator would register parsed definitions before generating.

use std::collections::HashSet;

use parlance::error::GenerationError;
use parlance::units::{
    Choice, Entity, Example, RuleContent, UnitDefinition, UnitRef, UnitStore, UnitType, Word,
    WordGroup,
};

fn word(text: &str) -> RuleContent {
    Word::new(text).expect("word literal").into()
}

fn store_with(definitions: Vec<UnitDefinition>) -> UnitStore {
    let mut store = UnitStore::new();
    for definition in definitions {
        store.add(definition);
    }
    store
}

#[test]
fn random_generation_covers_every_rule() {
    let mut greeting = UnitDefinition::new(UnitType::Alias, "greeting").expect("named unit");
    greeting
        .add_rules(vec![vec![word("hello")], vec![word("goodbye")]], None)
        .expect("plain rules");
    let store = store_with(vec![greeting]);
    let definition = store.get(UnitType::Alias, "greeting").expect("registered");

    let mut seen = HashSet::new();
    for _ in 0..100 {
        let example = definition
            .generate_random(&store, None, None)
            .expect("generation succeeds");
        seen.insert(example.text);
    }
    assert!(seen.contains("hello"));
    assert!(seen.contains("goodbye"));
    assert_eq!(seen.len(), 2);
}

#[test]
fn correlated_randgen_groups_agree_over_many_trials() {
    // Two same-named randgen nodes in one rule: either both generate or
    // neither does, whatever the percentage.
    for percentgen in [0u8, 50, 100] {
        let mut unit = UnitDefinition::new(UnitType::Alias, "paired").expect("named unit");
        unit.add_rule(
            vec![
                WordGroup::new("first")
                    .expect("words")
                    .with_randgen("pair")
                    .with_percentgen(percentgen)
                    .into(),
                WordGroup::new("second")
                    .expect("words")
                    .with_randgen("pair")
                    .with_percentgen(percentgen)
                    .with_leading_space(true)
                    .into(),
            ],
            None,
        )
        .expect("plain rule");
        let store = store_with(vec![unit]);
        let definition = store.get(UnitType::Alias, "paired").expect("registered");

        for _ in 0..100 {
            let example = definition
                .generate_random(&store, None, None)
                .expect("generation succeeds");
            assert!(
                example.text.is_empty() || example.text == "first second",
                "correlation broken at {}%: {:?}",
                percentgen,
                example.text
            );
            match percentgen {
                0 => assert_eq!(example.text, ""),
                100 => assert_eq!(example.text, "first second"),
                _ => {}
            }
        }
    }
}

#[test]
fn randgen_decisions_do_not_leak_across_referenced_units() {
    // The referenced unit starts its own decision scope, so its "pair"
    // randgen is independent from the referencing rule's.
    let mut inner = UnitDefinition::new(UnitType::Alias, "inner").expect("named unit");
    inner
        .add_rule(
            vec![WordGroup::new("inside")
                .expect("words")
                .with_randgen("pair")
                .with_percentgen(100)
                .into()],
            None,
        )
        .expect("plain rule");
    let mut outer = UnitDefinition::new(UnitType::Alias, "outer").expect("named unit");
    outer
        .add_rule(
            vec![
                WordGroup::new("gate")
                    .expect("words")
                    .with_randgen("pair")
                    .with_percentgen(0)
                    .into(),
                UnitRef::new(UnitType::Alias, "inner")
                    .expect("named ref")
                    .into(),
            ],
            None,
        )
        .expect("plain rule");
    let store = store_with(vec![inner, outer]);
    let definition = store.get(UnitType::Alias, "outer").expect("registered");

    for _ in 0..50 {
        let example = definition
            .generate_random(&store, None, None)
            .expect("generation succeeds");
        assert_eq!(example.text, "inside");
    }
}

#[test]
fn generate_all_walks_rules_in_declaration_order() {
    let mut farewell = UnitDefinition::new(UnitType::Alias, "farewell").expect("named unit");
    farewell.add_rule(vec![word("bye")], None).expect("plain rule");
    farewell
        .add_rule(vec![word("see"), word(" you")], None)
        .expect("plain rule");
    let store = store_with(vec![farewell]);
    let definition = store.get(UnitType::Alias, "farewell").expect("registered");

    let examples = definition
        .generate_all(&store, None, None)
        .expect("generation succeeds");
    let texts: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["bye", "see you"]);
    assert_eq!(
        definition.get_max_nb_generated_examples(&store, None),
        Ok(2)
    );
}

#[test]
fn casegen_never_duplicates_case_insensitive_text() {
    let mut number = UnitDefinition::new(UnitType::Alias, "number")
        .expect("named unit")
        .with_casegen(true);
    number.add_rule(vec![word("3")], None).expect("plain rule");
    let store = store_with(vec![number]);
    let definition = store.get(UnitType::Alias, "number").expect("registered");

    let examples = definition
        .generate_all(&store, None, None)
        .expect("generation succeeds");
    assert_eq!(examples, vec![Example::new("3")]);
    for _ in 0..20 {
        let example = definition
            .generate_random(&store, None, None)
            .expect("generation succeeds");
        assert_eq!(example.text, "3");
    }
}

#[test]
fn slot_references_produce_entities() {
    let mut city = UnitDefinition::new(UnitType::Slot, "city").expect("named unit");
    city.add_rule(vec![word("paris")], None).expect("plain rule");
    let mut intent = UnitDefinition::new(UnitType::Intent, "book").expect("named unit");
    intent
        .add_rule(
            vec![
                word("fly"),
                word(" to"),
                UnitRef::new(UnitType::Slot, "city")
                    .expect("named ref")
                    .with_leading_space(true)
                    .into(),
            ],
            None,
        )
        .expect("plain rule");
    let store = store_with(vec![city, intent]);
    let definition = store.get(UnitType::Intent, "book").expect("registered");

    let examples = definition
        .generate_all(&store, None, None)
        .expect("generation succeeds");
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].text, "fly to paris");
    // the entity value is the slot's own text, without the leading space
    assert_eq!(
        examples[0].entities,
        vec![Entity {
            slot_name: "city".to_string(),
            value: "paris".to_string(),
        }]
    );
}

#[test]
fn entities_concatenate_in_generation_order() {
    let mut from = UnitDefinition::new(UnitType::Slot, "from").expect("named unit");
    from.add_rule(vec![word("london")], None).expect("plain rule");
    let mut to = UnitDefinition::new(UnitType::Slot, "to").expect("named unit");
    to.add_rule(vec![word("tokyo")], None).expect("plain rule");
    let mut intent = UnitDefinition::new(UnitType::Intent, "route").expect("named unit");
    intent
        .add_rule(
            vec![
                UnitRef::new(UnitType::Slot, "from").expect("named ref").into(),
                word(" to"),
                UnitRef::new(UnitType::Slot, "to")
                    .expect("named ref")
                    .with_leading_space(true)
                    .into(),
            ],
            None,
        )
        .expect("plain rule");
    let store = store_with(vec![from, to, intent]);
    let definition = store.get(UnitType::Intent, "route").expect("registered");

    let examples = definition
        .generate_all(&store, None, None)
        .expect("generation succeeds");
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].text, "london to tokyo");
    let slots: Vec<&str> = examples[0]
        .entities
        .iter()
        .map(|e| e.slot_name.as_str())
        .collect();
    assert_eq!(slots, vec!["from", "to"]);
}

#[test]
fn argument_value_flows_from_reference_to_definition() {
    let mut tell = UnitDefinition::new(UnitType::Alias, "tell")
        .expect("named unit")
        .with_argument("x");
    tell.add_rule(vec![word("hello $x")], None).expect("plain rule");
    let mut intent = UnitDefinition::new(UnitType::Intent, "greet").expect("named unit");
    intent
        .add_rule(
            vec![UnitRef::new(UnitType::Alias, "tell")
                .expect("named ref")
                .with_arg_value("world")
                .into()],
            None,
        )
        .expect("plain rule");
    let store = store_with(vec![tell, intent]);
    let definition = store.get(UnitType::Intent, "greet").expect("registered");

    let examples = definition
        .generate_all(&store, None, None)
        .expect("generation succeeds");
    assert_eq!(examples[0].text, "hello world");
}

#[test]
fn unknown_variation_is_always_an_error() {
    let mut greeting = UnitDefinition::new(UnitType::Alias, "greeting").expect("named unit");
    greeting
        .add_rule(vec![word("hi")], Some("casual"))
        .expect("variation rule");
    let store = store_with(vec![greeting]);
    let definition = store.get(UnitType::Alias, "greeting").expect("registered");

    let expected = GenerationError::UnknownVariation {
        unit_type: UnitType::Alias,
        unit_name: "greeting".to_string(),
        variation: "formal".to_string(),
    };
    assert_eq!(
        definition.generate_random(&store, Some("formal"), None),
        Err(expected.clone())
    );
    assert_eq!(
        definition.generate_all(&store, Some("formal"), None),
        Err(expected)
    );
}

#[test]
fn undefined_reference_is_an_error() {
    let mut intent = UnitDefinition::new(UnitType::Intent, "greet").expect("named unit");
    intent
        .add_rule(
            vec![UnitRef::new(UnitType::Alias, "missing")
                .expect("named ref")
                .into()],
            None,
        )
        .expect("plain rule");
    let store = store_with(vec![intent]);
    let definition = store.get(UnitType::Intent, "greet").expect("registered");

    assert_eq!(
        definition.generate_all(&store, None, None),
        Err(GenerationError::UndefinedUnit {
            unit_type: UnitType::Alias,
            name: "missing".to_string(),
        })
    );
}

#[test]
fn choice_and_optional_group_counting() {
    // {a/b} [maybe?] -> 3 words * 2 group states, plus casegen never set
    let mut unit = UnitDefinition::new(UnitType::Alias, "mixed").expect("named unit");
    unit.add_rule(
        vec![
            Choice::new(vec![vec![word("a")], vec![word("b")], vec![word("c")]])
                .expect("alternatives")
                .into(),
            WordGroup::new("maybe")
                .expect("words")
                .with_randgen("")
                .with_leading_space(true)
                .into(),
        ],
        None,
    )
    .expect("plain rule");
    let store = store_with(vec![unit]);
    let definition = store.get(UnitType::Alias, "mixed").expect("registered");

    let examples = definition
        .generate_all(&store, None, None)
        .expect("generation succeeds");
    let texts: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "a maybe", "b", "b maybe", "c", "c maybe"]);
    assert_eq!(
        definition.get_max_nb_generated_examples(&store, None),
        Ok(6)
    );
}

#[test]
fn counting_saturates_on_pathological_templates() {
    // Each level squares the previous level's count: 2, 4, 16, 256, ...
    // well past u64 after a handful of levels.
    let mut store = UnitStore::new();
    let mut base = UnitDefinition::new(UnitType::Alias, "level0").expect("named unit");
    base.add_rules(vec![vec![word("a")], vec![word("b")]], None)
        .expect("plain rules");
    store.add(base);
    for level in 1..10 {
        let mut squared =
            UnitDefinition::new(UnitType::Alias, format!("level{}", level)).expect("named unit");
        let previous = format!("level{}", level - 1);
        squared
            .add_rule(
                vec![
                    UnitRef::new(UnitType::Alias, previous.as_str())
                        .expect("named ref")
                        .into(),
                    UnitRef::new(UnitType::Alias, previous.as_str())
                        .expect("named ref")
                        .with_leading_space(true)
                        .into(),
                ],
                None,
            )
            .expect("plain rule");
        store.add(squared);
    }
    let definition = store.get(UnitType::Alias, "level9").expect("registered");
    assert_eq!(
        definition.get_max_nb_generated_examples(&store, None),
        Ok(u64::MAX)
    );
}

#[test]
fn examples_serialize_with_their_entities() {
    let mut example = Example::new("fly to paris");
    example.entities.push(Entity {
        slot_name: "city".to_string(),
        value: "paris".to_string(),
    });
    let json = serde_json::to_value(&example).expect("serialization succeeds");
    assert_eq!(
        json,
        serde_json::json!({
            "text": "fly to paris",
            "entities": [{"slot_name": "city", "value": "paris"}],
        })
    );
}

#[test]
fn counting_is_an_upper_bound_on_enumeration() {
    let mut unit = UnitDefinition::new(UnitType::Alias, "bounded")
        .expect("named unit")
        .with_casegen(true);
    unit.add_rule(vec![word("hello")], None).expect("plain rule");
    unit.add_rule(vec![word("7")], None).expect("plain rule");
    let store = store_with(vec![unit]);
    let definition = store.get(UnitType::Alias, "bounded").expect("registered");

    let generated = definition
        .generate_all(&store, None, None)
        .expect("generation succeeds")
        .len() as u64;
    let bound = definition
        .get_max_nb_generated_examples(&store, None)
        .expect("counting succeeds");
    assert!(generated <= bound);
    assert_eq!(generated, 3);
    assert_eq!(bound, 4);
}
