//! Builder for schemas written in `"A->B"` notation.
//!
//! Every non-whitespace character is one attribute, so `"AB -> CD"` is the
//! dependency `{A, B} -> {C, D}` and `"A B C"` is the universe `{A, B, C}`.

use fdnorm_core::{DependencySet, FunctionalDependency, RelationSchema};

const ARROW: &str = "->";

/// Error building a schema from textual dependencies.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The dependency has no `->` separator.
    InvalidDependencyFormat { dependency: String },
    /// Nothing but whitespace to the left of `->`.
    EmptyLeftHandSide { dependency: String },
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDependencyFormat { dependency } => {
                write!(f, "invalid dependency format (missing '{ARROW}'): '{dependency}'")
            }
            Self::EmptyLeftHandSide { dependency } => {
                write!(f, "empty left-hand side in dependency: '{dependency}'")
            }
        }
    }
}

impl std::error::Error for BuildError {}

fn attributes(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| !c.is_whitespace())
}

/// Parse a single dependency such as `"AB -> C"`.
///
/// The text is split at the first `->`. An empty right side is accepted.
///
/// # Errors
///
/// Returns [`BuildError::InvalidDependencyFormat`] if there is no `->`, and
/// [`BuildError::EmptyLeftHandSide`] if the left side is blank.
pub fn parse_dependency(text: &str) -> Result<FunctionalDependency<char>, BuildError> {
    let Some((lhs, rhs)) = text.split_once(ARROW) else {
        return Err(BuildError::InvalidDependencyFormat {
            dependency: text.to_string(),
        });
    };
    if lhs.trim().is_empty() {
        return Err(BuildError::EmptyLeftHandSide {
            dependency: text.to_string(),
        });
    }
    Ok(FunctionalDependency::new(attributes(lhs), attributes(rhs)))
}

/// Build a schema from an attribute string and dependency strings, e.g.
/// `build_schema("ABCD", &["A->B", "BC->D"])`.
///
/// # Errors
///
/// Returns the first [`BuildError`] among `dependencies`, in order.
pub fn build_schema<S>(
    attribute_text: &str,
    dependencies: &[S],
) -> Result<RelationSchema<char>, BuildError>
where
    S: AsRef<str>,
{
    let dependencies = dependencies
        .iter()
        .map(|text| parse_dependency(text.as_ref()))
        .collect::<Result<DependencySet<char>, _>>()?;
    Ok(RelationSchema::new(attributes(attribute_text), dependencies))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn set(attributes: &str) -> BTreeSet<char> {
        attributes.chars().collect()
    }

    #[test]
    fn test_parse_dependency() {
        let fd = parse_dependency("BA->C").expect("should parse");
        assert_eq!(fd.lhs(), &set("AB"));
        assert_eq!(fd.rhs(), &set("C"));
    }

    #[test]
    fn test_whitespace_around_arrow() {
        let fd = parse_dependency("  A B  ->   C D ").expect("should parse");
        assert_eq!(fd, FunctionalDependency::new(set("AB"), set("CD")));
    }

    #[test]
    fn test_missing_arrow() {
        let err = parse_dependency("AB").expect_err("should fail");
        assert_eq!(
            err,
            BuildError::InvalidDependencyFormat {
                dependency: "AB".to_string()
            }
        );
        assert!(err.to_string().contains("missing '->'"));
    }

    #[test]
    fn test_empty_left_side() {
        for text in ["->A", "   -> A"] {
            let err = parse_dependency(text).expect_err("should fail");
            assert!(matches!(err, BuildError::EmptyLeftHandSide { .. }), "{text}");
        }
    }

    #[test]
    fn test_empty_right_side_is_accepted() {
        let fd = parse_dependency("A->").expect("should parse");
        assert!(fd.rhs().is_empty());
    }

    #[test]
    fn test_split_at_first_arrow() {
        // The second arrow is not an attribute separator; its characters
        // become attributes of the right side.
        let fd = parse_dependency("A->B->C").expect("should parse");
        assert_eq!(fd.rhs(), &set("-B>C"));
    }

    #[test]
    fn test_build_schema() {
        let schema = build_schema("ABCD", &["A->B", "BC->D", "D->A"]).expect("should build");
        assert_eq!(schema.attributes(), &set("ABCD"));
        assert_eq!(schema.dependencies().len(), 3);
        assert_eq!(schema.to_string(), "R(ABCD), F = {A->B, BC->D, D->A}");
    }

    #[test]
    fn test_build_schema_without_dependencies() {
        let schema = build_schema::<&str>("X Y Z", &[]).expect("should build");
        assert_eq!(schema.attributes(), &set("XYZ"));
        assert!(schema.dependencies().is_empty());
        assert_eq!(schema.candidate_keys(), vec![set("XYZ")]);
    }

    #[test]
    fn test_build_schema_reports_first_error() {
        let err = build_schema("ABC", &["A->B", "->C", "AB"]).expect_err("should fail");
        assert_eq!(
            err,
            BuildError::EmptyLeftHandSide {
                dependency: "->C".to_string()
            }
        );
    }

    #[test]
    fn test_build_schema_accepts_owned_strings() {
        let dependencies = vec![String::from("X -> Y"), String::from("Y -> Z")];
        let schema = build_schema("XYZ", &dependencies).expect("should build");
        assert!(schema.candidate_keys().iter().any(|key| key.contains(&'X')));
    }
}
