use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Local};
use fdnorm_core::{DependencySet, FunctionalDependency, RelationSchema};
use rand::distr::{Distribution, Uniform};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Clone, Debug, Default, Deserialize, Serialize, TypedBuilder)]
pub struct SchemaParams {
    pub id: u64,
    pub n_attribute: usize,
    pub n_dependency: usize,
    pub max_lhs: usize,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct GeneratedSchema {
    params: SchemaParams,
    info: String,
    start: DateTime<Local>,
    end: DateTime<Local>,
    schema: RelationSchema<char>,
}

impl GeneratedSchema {
    #[must_use]
    pub const fn new(
        params: SchemaParams,
        info: String,
        start: DateTime<Local>,
        end: DateTime<Local>,
        schema: RelationSchema<char>,
    ) -> Self {
        Self {
            params,
            info,
            start,
            end,
            schema,
        }
    }

    #[must_use]
    pub const fn get_id(&self) -> u64 {
        self.params.id
    }

    #[must_use]
    pub const fn get_schema(&self) -> &RelationSchema<char> {
        &self.schema
    }

    #[must_use]
    pub fn into_schema(self) -> RelationSchema<char> {
        self.schema
    }

    #[must_use]
    pub const fn get_params(&self) -> &SchemaParams {
        &self.params
    }

    #[must_use]
    pub fn get_duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Generate a schema over the first `n_attribute` letters of the alphabet
/// with `n_dependency` random dependencies.
///
/// Each dependency has a non-empty left side of at most `max_lhs` distinct
/// attributes and a single right-side attribute. Dependencies may repeat or be
/// trivial, as in hand-written input.
///
/// # Panics
///
/// Panics if `n_attribute` is not in `1..=26` or `max_lhs` is zero.
#[must_use]
pub fn generate_single_schema(
    n_attribute: usize,
    n_dependency: usize,
    max_lhs: usize,
) -> RelationSchema<char> {
    assert!(
        (1..=ALPHABET.len()).contains(&n_attribute),
        "n_attribute must be in 1..={}",
        ALPHABET.len()
    );
    assert!(max_lhs > 0, "max_lhs must be positive");

    let attributes: Vec<char> = ALPHABET.chars().take(n_attribute).collect();
    let max_lhs = max_lhs.min(n_attribute);

    let mut random_generator = rand::rng();
    let attribute_range = Uniform::new(0, n_attribute).expect("non-empty attribute range");
    let lhs_size_range = Uniform::new_inclusive(1, max_lhs).expect("non-empty lhs size range");

    let dependencies: DependencySet<char> = (0..n_dependency)
        .map(|_| {
            let size = lhs_size_range.sample(&mut random_generator);
            let mut lhs = BTreeSet::new();
            while lhs.len() < size {
                lhs.insert(attributes[attribute_range.sample(&mut random_generator)]);
            }
            let rhs = attributes[attribute_range.sample(&mut random_generator)];
            FunctionalDependency::new(lhs, [rhs])
        })
        .collect();

    RelationSchema::new(attributes, dependencies)
}

#[must_use]
pub fn generate_mult_schemas(
    n_schema: u64,
    n_attribute: usize,
    n_dependency: usize,
    max_lhs: usize,
) -> Vec<GeneratedSchema> {
    (0..n_schema)
        .into_par_iter()
        .map(|i_schema| {
            let start_time = Local::now();
            let schema = generate_single_schema(n_attribute, n_dependency, max_lhs);
            let end_time = Local::now();
            GeneratedSchema {
                params: SchemaParams {
                    id: i_schema,
                    n_attribute,
                    n_dependency,
                    max_lhs,
                },
                info: "generated".to_string(),
                start: start_time,
                end: end_time,
                schema,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_schema_shape() {
        let schema = generate_single_schema(6, 10, 3);
        assert_eq!(schema.attributes().len(), 6);
        assert_eq!(schema.dependencies().len(), 10);
        assert!(schema.undeclared_attributes().is_empty());
        for fd in schema.dependencies() {
            assert!((1..=3).contains(&fd.lhs().len()), "{fd}");
            assert_eq!(fd.rhs().len(), 1, "{fd}");
        }
    }

    #[test]
    fn test_max_lhs_is_clamped() {
        let schema = generate_single_schema(2, 20, 10);
        for fd in schema.dependencies() {
            assert!(fd.lhs().len() <= 2, "{fd}");
        }
    }

    #[test]
    #[should_panic(expected = "n_attribute")]
    fn test_too_many_attributes() {
        let _ = generate_single_schema(27, 1, 1);
    }

    #[test]
    #[should_panic(expected = "max_lhs")]
    fn test_zero_max_lhs() {
        let _ = generate_single_schema(3, 1, 0);
    }

    #[test]
    fn test_mult_schemas_ids() {
        let generated = generate_mult_schemas(4, 5, 6, 2);
        let mut ids: Vec<u64> = generated.iter().map(GeneratedSchema::get_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, [0, 1, 2, 3]);
        for g in &generated {
            assert_eq!(g.get_params().n_attribute, 5);
            assert!(g.get_duration() >= Duration::zero());
        }
    }

    #[test]
    fn test_params_builder() {
        let params = SchemaParams::builder()
            .id(7)
            .n_attribute(4)
            .n_dependency(3)
            .max_lhs(2)
            .build();
        assert_eq!(params.id, 7);
        assert_eq!(params.max_lhs, 2);
    }
}
