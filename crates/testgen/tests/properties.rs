use std::collections::BTreeSet;

use fdnorm_core::{FunctionalDependency, NormalForm, RelationSchema};
use fdnorm_testgen::generator::{generate_mult_schemas, generate_single_schema, GeneratedSchema};

const ROUNDS: usize = 50;

fn random_schemas() -> Vec<RelationSchema<char>> {
    (0..ROUNDS)
        .map(|round| generate_single_schema(3 + round % 5, 2 + round % 7, 1 + round % 3))
        .collect()
}

#[test]
fn closure_contains_input_and_is_stable() {
    for schema in random_schemas() {
        for attribute in schema.attributes() {
            let start = BTreeSet::from([*attribute]);
            let closure = schema.closure(&start);
            assert!(closure.contains(attribute), "{schema}");
            assert_eq!(schema.closure(&closure), closure, "{schema}");
        }
    }
}

#[test]
fn canonical_cover_is_equivalent_and_elementary() {
    for schema in random_schemas() {
        let f = schema.dependencies();
        let cover = f.canonical_cover();
        assert!(cover.is_equivalent(f), "{schema}");
        assert!(cover.len() <= f.singleton_rhs().len(), "{schema}");
        for fd in &cover {
            assert_eq!(fd.rhs().len(), 1, "{schema}: {fd}");
            assert!(!fd.is_trivial(), "{schema}: {fd}");
            for attribute in fd.lhs() {
                let mut reduced = fd.lhs().clone();
                reduced.remove(attribute);
                let weaker = FunctionalDependency::new(reduced, fd.rhs().clone());
                assert!(!f.implies(&weaker), "{schema}: {fd} is not left-reduced");
            }
        }
    }
}

#[test]
fn candidate_keys_are_minimal_superkeys() {
    for schema in random_schemas() {
        let keys = schema.candidate_keys();
        assert!(!keys.is_empty(), "{schema}");
        for key in &keys {
            assert!(schema.is_superkey(key), "{schema}: {key:?}");
            for attribute in key {
                let mut reduced = key.clone();
                reduced.remove(attribute);
                assert!(!schema.is_superkey(&reduced), "{schema}: {key:?}");
            }
        }
        assert!(keys.windows(2).all(|pair| pair[0].len() <= pair[1].len()), "{schema}");
    }
}

#[test]
fn key_fragment_makes_decomposition_lossless() {
    for schema in random_schemas() {
        let keys = schema.candidate_keys();
        let fragments = [keys[0].clone(), schema.attributes().clone()];
        assert!(schema.is_lossless_decomposition(&fragments), "{schema}");
    }
}

#[test]
fn judgement_level_matches_violations() {
    for schema in random_schemas() {
        let judgement = schema.judge_normal_form();
        assert_eq!(
            judgement.level == NormalForm::BoyceCodd,
            judgement.violations.is_empty(),
            "{schema}"
        );
        if judgement.level == NormalForm::BoyceCodd {
            for fd in schema.dependencies().canonical_cover().iter() {
                assert!(schema.is_superkey(fd.lhs()), "{schema}: {fd}");
            }
        }
    }
}

#[test]
fn bounded_search_agrees_with_unbounded() {
    for schema in random_schemas() {
        let bounded = schema
            .candidate_keys_bounded(schema.attributes().len())
            .expect("limit covers every attribute");
        assert_eq!(bounded, schema.candidate_keys(), "{schema}");
    }
}

#[test]
fn generated_schema_serializes() {
    let generated = generate_mult_schemas(2, 4, 3, 2);
    for schema in &generated {
        let json = serde_json::to_string(schema).expect("serializable");
        let back: GeneratedSchema = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back.get_id(), schema.get_id());
        assert_eq!(back.get_schema().attributes(), schema.get_schema().attributes());
        assert_eq!(
            back.get_schema().dependencies().to_string(),
            schema.get_schema().dependencies().to_string()
        );
    }
}
