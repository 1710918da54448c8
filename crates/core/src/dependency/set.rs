use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{Display, Formatter, Result};
use core::hash::Hash;

use hashbrown::HashSet;

use super::FunctionalDependency;

/// An ordered list of functional dependencies.
///
/// Order carries no meaning for closure or implication. It only fixes which
/// redundant dependency [`canonical_cover`](Self::canonical_cover) evicts
/// first when several minimal covers exist.
///
/// There is deliberately no `PartialEq`: two sets that list different
/// dependencies may still be equivalent. Compare with
/// [`is_equivalent`](Self::is_equivalent) instead.
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(transparent)
)]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone)]
pub struct DependencySet<A>
where
    A: Ord,
{
    dependencies: Vec<FunctionalDependency<A>>,
}

impl<A> Default for DependencySet<A>
where
    A: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> From<Vec<FunctionalDependency<A>>> for DependencySet<A>
where
    A: Ord,
{
    fn from(dependencies: Vec<FunctionalDependency<A>>) -> Self {
        Self { dependencies }
    }
}

impl<A> FromIterator<FunctionalDependency<A>> for DependencySet<A>
where
    A: Ord,
{
    fn from_iter<I: IntoIterator<Item = FunctionalDependency<A>>>(iter: I) -> Self {
        Self {
            dependencies: iter.into_iter().collect(),
        }
    }
}

impl<'a, A> IntoIterator for &'a DependencySet<A>
where
    A: Ord,
{
    type Item = &'a FunctionalDependency<A>;
    type IntoIter = core::slice::Iter<'a, FunctionalDependency<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.dependencies.iter()
    }
}

impl<A> DependencySet<A>
where
    A: Ord,
{
    /// An empty set with its own, freshly allocated storage.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dependencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn dependencies(&self) -> &[FunctionalDependency<A>] {
        &self.dependencies
    }

    pub fn iter(&self) -> core::slice::Iter<'_, FunctionalDependency<A>> {
        self.dependencies.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl<A> DependencySet<A>
where
    A: Ord + Hash + Clone,
{
    /// Computes the closure of `attributes` under this set.
    ///
    /// Sweeps the dependency list, folding in the right side of every
    /// dependency whose left side is already covered, until a full sweep adds
    /// nothing. The result always contains `attributes` and is a fixed point:
    /// taking the closure again returns the same set.
    #[must_use]
    pub fn closure(&self, attributes: &BTreeSet<A>) -> BTreeSet<A> {
        let mut closure = attributes.clone();
        let mut changed = true;
        while changed {
            tracing::trace!(size = closure.len(), "closure pass");
            changed = false;
            for fd in &self.dependencies {
                if fd.lhs.is_subset(&closure) && !fd.rhs.is_subset(&closure) {
                    closure.extend(fd.rhs.iter().cloned());
                    changed = true;
                }
            }
        }
        closure
    }

    /// Returns `true` if `fd` follows from this set, i.e. its right side is
    /// inside the closure of its left side.
    #[must_use]
    pub fn implies(&self, fd: &FunctionalDependency<A>) -> bool {
        fd.rhs.is_subset(&self.closure(&fd.lhs))
    }

    /// Splits every dependency into one dependency per right-side attribute.
    ///
    /// `A -> BC` becomes `A -> B`, `A -> C`. List order is kept. A dependency
    /// with an empty right side contributes nothing.
    #[must_use]
    pub fn singleton_rhs(&self) -> Self {
        self.dependencies
            .iter()
            .flat_map(|fd| {
                fd.rhs
                    .iter()
                    .map(|attribute| FunctionalDependency::new(fd.lhs.iter().cloned(), [attribute.clone()]))
            })
            .collect()
    }

    /// Computes a minimal cover equivalent to this set.
    ///
    /// 1. Split into elementary (singleton right side) form.
    /// 2. Drop extraneous left-side attributes. For `X -> a`, attribute `b`
    ///    is dropped when `a` is in the closure of the remaining left side
    ///    without `b`. That closure is always taken against the full
    ///    elementary set from step 1, never a partially reduced one.
    /// 3. Deduplicate, then evict dependencies implied by the rest, scanning
    ///    in list order and repeating until a scan evicts nothing.
    ///
    /// When several minimal covers exist, the input order decides which one
    /// is returned.
    #[must_use]
    pub fn canonical_cover(&self) -> Self {
        tracing::debug!(dependencies = self.len(), "computing canonical cover");

        let elementary = self.singleton_rhs();

        let reduced = elementary.dependencies.iter().map(|fd| {
            let mut lhs = fd.lhs.clone();
            for attribute in &fd.lhs {
                let mut candidate = lhs.clone();
                candidate.remove(attribute);
                if elementary.closure(&candidate).is_superset(&fd.rhs) {
                    tracing::trace!(dropped = true, "extraneous left-side attribute");
                    lhs = candidate;
                }
            }
            FunctionalDependency {
                lhs,
                rhs: fd.rhs.clone(),
            }
        });

        let mut seen: HashSet<FunctionalDependency<A>> = HashSet::new();
        let mut cover: Vec<FunctionalDependency<A>> =
            reduced.filter(|fd| seen.insert(fd.clone())).collect();

        let mut changed = true;
        while changed {
            changed = false;
            let mut i = 0;
            while i < cover.len() {
                let removed = cover.remove(i);
                let others = Self {
                    dependencies: cover.clone(),
                };
                if others.implies(&removed) {
                    tracing::trace!(remaining = cover.len(), "evicted redundant dependency");
                    changed = true;
                } else {
                    cover.insert(i, removed);
                    i += 1;
                }
            }
        }

        tracing::debug!(dependencies = cover.len(), "canonical cover computed");
        Self {
            dependencies: cover,
        }
    }

    /// Returns `true` if each set implies every dependency of the other.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.dependencies.iter().all(|fd| other.implies(fd))
            && other.dependencies.iter().all(|fd| self.implies(fd))
    }

    /// Every attribute mentioned on either side of some dependency.
    #[must_use]
    pub fn attributes(&self) -> BTreeSet<A> {
        self.dependencies
            .iter()
            .flat_map(|fd| fd.lhs.iter().chain(fd.rhs.iter()).cloned())
            .collect()
    }
}

impl<A> Display for DependencySet<A>
where
    A: Ord + Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut rendered: Vec<String> = self.dependencies.iter().map(ToString::to_string).collect();
        rendered.sort();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}
