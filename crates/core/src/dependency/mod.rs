use alloc::collections::BTreeSet;
use core::fmt::{Display, Formatter, Result};

pub mod set;

/// A functional dependency `lhs -> rhs`.
///
/// Both sides are attribute sets, so two dependencies built from the same
/// attributes in different orders are equal and hash alike. No validation is
/// done here: an empty left side is representable and acts as a dependency
/// that always fires.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionalDependency<A>
where
    A: Ord,
{
    lhs: BTreeSet<A>,
    rhs: BTreeSet<A>,
}

impl<A> FunctionalDependency<A>
where
    A: Ord,
{
    pub fn new<L, R>(lhs: L, rhs: R) -> Self
    where
        L: IntoIterator<Item = A>,
        R: IntoIterator<Item = A>,
    {
        Self {
            lhs: lhs.into_iter().collect(),
            rhs: rhs.into_iter().collect(),
        }
    }

    /// The determinant.
    #[must_use]
    pub const fn lhs(&self) -> &BTreeSet<A> {
        &self.lhs
    }

    /// The dependent attributes.
    #[must_use]
    pub const fn rhs(&self) -> &BTreeSet<A> {
        &self.rhs
    }

    #[must_use]
    pub fn into_parts(self) -> (BTreeSet<A>, BTreeSet<A>) {
        (self.lhs, self.rhs)
    }

    /// Returns `true` if the right side is contained in the left side, i.e.
    /// the dependency holds by reflexivity alone.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.rhs.is_subset(&self.lhs)
    }
}

/// Writes the attributes of `set` back to back, in sorted order.
pub(crate) fn write_attributes<A: Display>(
    f: &mut Formatter<'_>,
    set: impl IntoIterator<Item = A>,
) -> Result {
    for attribute in set {
        write!(f, "{attribute}")?;
    }
    Ok(())
}

impl<A> Display for FunctionalDependency<A>
where
    A: Ord + Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_attributes(f, &self.lhs)?;
        write!(f, "->")?;
        write_attributes(f, &self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_construction_order_is_irrelevant() {
        let a = FunctionalDependency::new(['B', 'A'], ['C']);
        let b = FunctionalDependency::new(['A', 'B', 'A'], ['C']);
        assert_eq!(a, b);
        assert_eq!(a.lhs().len(), 2);
    }

    #[test]
    fn test_hash_deduplicates() {
        let set: HashSet<_> = [
            FunctionalDependency::new(['A'], ['B']),
            FunctionalDependency::new(['A'], ['B']),
            FunctionalDependency::new(['A'], ['C']),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display_sorts_both_sides() {
        let fd = FunctionalDependency::new(['C', 'A'], ['E', 'D']);
        assert_eq!(fd.to_string(), "AC->DE");
    }

    #[test]
    fn test_display_multi_character_attributes() {
        let fd = FunctionalDependency::new(["id"], ["name", "email"]);
        assert_eq!(fd.to_string(), "id->emailname");
    }

    #[test]
    fn test_empty_left_side_is_constructible() {
        let fd = FunctionalDependency::new([], ['A']);
        assert!(fd.lhs().is_empty());
        assert_eq!(fd.to_string(), "->A");
    }

    #[test]
    fn test_is_trivial() {
        assert!(FunctionalDependency::new(['A', 'B'], ['A']).is_trivial());
        assert!(!FunctionalDependency::new(['A'], ['B']).is_trivial());
        assert!(FunctionalDependency::new(['A'], []).is_trivial());
    }
}
