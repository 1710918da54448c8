//! Normal form judgement.
//!
//! Each judge scans the elementary (singleton right side) form of the
//! dependencies, since 2NF, 3NF and BCNF are all stated per dependent
//! attribute. For an elementary dependency `X -> a`, with `prime` the union of
//! all candidate keys:
//!
//! - **2NF** is violated when `X` is a proper subset of some key and `a` is
//!   not prime (partial dependency).
//! - **3NF** is violated when `X` contains no key and `a` is not prime
//!   (transitive dependency).
//! - **BCNF** is violated when `X` contains no key.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter, Result};
use core::hash::Hash;

use super::RelationSchema;
use crate::dependency::{write_attributes, FunctionalDependency};
use crate::error::Error;

/// Normal forms, ordered from weakest to strongest.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NormalForm {
    First,
    Second,
    Third,
    BoyceCodd,
}

impl Display for NormalForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(match self {
            Self::First => "1NF",
            Self::Second => "2NF",
            Self::Third => "3NF",
            Self::BoyceCodd => "BCNF",
        })
    }
}

/// An elementary dependency that keeps a schema from a normal form.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation<A>
where
    A: Ord,
{
    /// A non-prime attribute depends on part of `key` (2NF).
    PartialDependency {
        dependency: FunctionalDependency<A>,
        key: BTreeSet<A>,
    },
    /// A non-prime attribute depends on a non-superkey (3NF).
    TransitiveDependency { dependency: FunctionalDependency<A> },
    /// An attribute depends on a non-superkey (BCNF).
    NonSuperkeyDeterminant { dependency: FunctionalDependency<A> },
}

impl<A> Violation<A>
where
    A: Ord,
{
    #[must_use]
    pub const fn dependency(&self) -> &FunctionalDependency<A> {
        match self {
            Self::PartialDependency { dependency, .. }
            | Self::TransitiveDependency { dependency }
            | Self::NonSuperkeyDeterminant { dependency } => dependency,
        }
    }
}

impl<A> Display for Violation<A>
where
    A: Ord + Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::PartialDependency { dependency, key } => {
                write!(f, "{dependency} is a partial dependency on candidate key ")?;
                write_attributes(f, key)
            }
            Self::TransitiveDependency { dependency } => {
                write!(f, "{dependency} is a transitive dependency")
            }
            Self::NonSuperkeyDeterminant { dependency } => write!(f, "{dependency} violates BCNF"),
        }
    }
}

/// The highest normal form a schema fully satisfies, together with the
/// dependencies that keep it from the next one.
///
/// `violations` is empty exactly when `level` is [`NormalForm::BoyceCodd`].
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement<A>
where
    A: Ord,
{
    pub level: NormalForm,
    pub violations: Vec<Violation<A>>,
}

fn contains_key<A: Ord>(lhs: &BTreeSet<A>, keys: &[BTreeSet<A>]) -> bool {
    keys.iter().any(|key| lhs.is_superset(key))
}

impl<A> RelationSchema<A>
where
    A: Ord + Hash + Clone,
{
    /// Partial dependencies of non-prime attributes on candidate keys.
    ///
    /// Each offending dependency is reported once, against the first key in
    /// `keys` it partially depends on.
    #[must_use]
    pub fn second_normal_form_violations(&self, keys: &[BTreeSet<A>]) -> Vec<Violation<A>> {
        let prime = Self::prime_attributes(keys);
        self.dependencies()
            .singleton_rhs()
            .iter()
            .filter(|fd| !fd.rhs().is_subset(&prime))
            .filter_map(|fd| {
                keys.iter()
                    .find(|key| fd.lhs().is_subset(key) && fd.lhs().len() < key.len())
                    .map(|key| Violation::PartialDependency {
                        dependency: fd.clone(),
                        key: key.clone(),
                    })
            })
            .collect()
    }

    /// Dependencies of non-prime attributes on sets that contain no key.
    #[must_use]
    pub fn third_normal_form_violations(&self, keys: &[BTreeSet<A>]) -> Vec<Violation<A>> {
        let prime = Self::prime_attributes(keys);
        self.dependencies()
            .singleton_rhs()
            .iter()
            .filter(|fd| !contains_key(fd.lhs(), keys) && !fd.rhs().is_subset(&prime))
            .map(|fd| Violation::TransitiveDependency {
                dependency: fd.clone(),
            })
            .collect()
    }

    /// Dependencies whose left side contains no key.
    #[must_use]
    pub fn boyce_codd_violations(&self, keys: &[BTreeSet<A>]) -> Vec<Violation<A>> {
        self.dependencies()
            .singleton_rhs()
            .iter()
            .filter(|fd| !contains_key(fd.lhs(), keys))
            .map(|fd| Violation::NonSuperkeyDeterminant {
                dependency: fd.clone(),
            })
            .collect()
    }

    /// Classifies the schema as 1NF, 2NF, 3NF or BCNF.
    ///
    /// The judges run in order 2NF, 3NF, BCNF and the first one reporting
    /// violations decides the level: failing 2NF leaves the schema at 1NF,
    /// failing 3NF at 2NF, failing BCNF at 3NF.
    #[must_use]
    pub fn judge_normal_form(&self) -> Judgement<A> {
        let keys = self.candidate_keys();
        self.judge_with_keys(&keys)
    }

    /// Like [`judge_normal_form`](Self::judge_normal_form), over a bounded
    /// candidate-key search.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SearchSpaceTooLarge`] under the same condition as
    /// [`candidate_keys_bounded`](Self::candidate_keys_bounded).
    pub fn judge_normal_form_bounded(&self, limit: usize) -> core::result::Result<Judgement<A>, Error> {
        let keys = self.candidate_keys_bounded(limit)?;
        Ok(self.judge_with_keys(&keys))
    }

    /// Judges the schema against a key list computed beforehand, e.g. by
    /// [`candidate_keys_bounded`](Self::candidate_keys_bounded).
    ///
    /// `keys` must be the complete set of candidate keys; the judgement is
    /// meaningless otherwise.
    #[must_use]
    pub fn judge_with_keys(&self, keys: &[BTreeSet<A>]) -> Judgement<A> {
        let stages: [(fn(&Self, &[BTreeSet<A>]) -> Vec<Violation<A>>, NormalForm); 3] = [
            (Self::second_normal_form_violations, NormalForm::First),
            (Self::third_normal_form_violations, NormalForm::Second),
            (Self::boyce_codd_violations, NormalForm::Third),
        ];

        for (judge, level) in stages {
            let violations = judge(self, keys);
            if !violations.is_empty() {
                tracing::debug!(%level, violations = violations.len(), "normal form judged");
                return Judgement { level, violations };
            }
        }

        tracing::debug!(level = %NormalForm::BoyceCodd, "normal form judged");
        Judgement {
            level: NormalForm::BoyceCodd,
            violations: Vec::new(),
        }
    }
}
