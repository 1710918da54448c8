use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter, Result};
use core::hash::Hash;

use crate::dependency::set::DependencySet;
use crate::dependency::write_attributes;
use crate::error::Error;

pub mod decomposition;
pub mod normal_form;

/// A relation schema `R(U, F)`: an attribute universe together with the
/// functional dependencies that hold over it.
///
/// Every attribute mentioned by a dependency is expected to belong to the
/// universe. This is not enforced; see
/// [`undeclared_attributes`](Self::undeclared_attributes).
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone)]
pub struct RelationSchema<A>
where
    A: Ord,
{
    attributes: BTreeSet<A>,
    dependencies: DependencySet<A>,
}

impl<A> RelationSchema<A>
where
    A: Ord,
{
    pub fn new<I>(attributes: I, dependencies: DependencySet<A>) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        Self {
            attributes: attributes.into_iter().collect(),
            dependencies,
        }
    }

    #[must_use]
    pub const fn attributes(&self) -> &BTreeSet<A> {
        &self.attributes
    }

    #[must_use]
    pub const fn dependencies(&self) -> &DependencySet<A> {
        &self.dependencies
    }
}

/// How the attributes of a dependency set split for key search.
struct KeySearchSpace<A> {
    /// Attributes that must be in every key: those only ever on a left side,
    /// and those in no dependency at all.
    required: BTreeSet<A>,
    /// Attributes on both sides of some dependency; the only ones worth
    /// enumerating.
    optional: Vec<A>,
}

impl<A> RelationSchema<A>
where
    A: Ord + Hash + Clone,
{
    /// Closure of `attributes` under the schema's dependencies.
    #[must_use]
    pub fn closure(&self, attributes: &BTreeSet<A>) -> BTreeSet<A> {
        self.dependencies.closure(attributes)
    }

    /// Returns `true` if the closure of `attributes` is exactly the universe.
    #[must_use]
    pub fn is_superkey(&self, attributes: &BTreeSet<A>) -> bool {
        self.closure(attributes) == self.attributes
    }

    /// Attributes used by some dependency but missing from the universe.
    #[must_use]
    pub fn undeclared_attributes(&self) -> BTreeSet<A> {
        self.dependencies
            .attributes()
            .difference(&self.attributes)
            .cloned()
            .collect()
    }

    fn key_search_space(&self) -> KeySearchSpace<A> {
        let mut left = BTreeSet::new();
        let mut right = BTreeSet::new();
        for fd in &self.dependencies {
            left.extend(fd.lhs().iter().cloned());
            right.extend(fd.rhs().iter().cloned());
        }

        let mut required: BTreeSet<A> = left.difference(&right).cloned().collect();
        required.extend(
            self.attributes
                .iter()
                .filter(|attribute| !left.contains(*attribute) && !right.contains(*attribute))
                .cloned(),
        );
        let optional = left.intersection(&right).cloned().collect();

        KeySearchSpace { required, optional }
    }

    /// Finds every candidate key of the schema.
    ///
    /// Attributes that appear only on left sides, or in no dependency at all,
    /// belong to every key. Attributes that appear only on right sides belong
    /// to none. Every subset of the remaining attributes is tried, smallest
    /// first, and kept when it completes to a superkey from which no single
    /// attribute can be removed.
    ///
    /// The search is exponential in the number of attributes on both sides of
    /// some dependency. See [`candidate_keys_bounded`](Self::candidate_keys_bounded).
    #[must_use]
    pub fn candidate_keys(&self) -> Vec<BTreeSet<A>> {
        let space = self.key_search_space();
        self.search_keys(&space)
    }

    /// Like [`candidate_keys`](Self::candidate_keys), but refuses to search
    /// when more than `limit` attributes would have to be enumerated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SearchSpaceTooLarge`] if the number of attributes
    /// appearing on both sides of some dependency exceeds `limit`.
    pub fn candidate_keys_bounded(&self, limit: usize) -> core::result::Result<Vec<BTreeSet<A>>, Error> {
        let space = self.key_search_space();
        if space.optional.len() > limit {
            return Err(Error::SearchSpaceTooLarge {
                attributes: space.optional.len(),
                limit,
            });
        }
        Ok(self.search_keys(&space))
    }

    fn search_keys(&self, space: &KeySearchSpace<A>) -> Vec<BTreeSet<A>> {
        tracing::debug!(
            required = space.required.len(),
            search_space = space.optional.len(),
            "searching candidate keys"
        );

        let mut keys = Vec::new();
        for size in 0..=space.optional.len() {
            for_each_combination(space.optional.len(), size, |indices| {
                let mut candidate = space.required.clone();
                candidate.extend(indices.iter().map(|&i| space.optional[i].clone()));

                if self.is_superkey(&candidate) && self.is_minimal_superkey(&candidate) {
                    keys.push(candidate);
                }
            });
        }

        tracing::debug!(keys = keys.len(), "candidate keys found");
        keys
    }

    fn is_minimal_superkey(&self, superkey: &BTreeSet<A>) -> bool {
        superkey.iter().all(|attribute| {
            let mut reduced = superkey.clone();
            reduced.remove(attribute);
            !self.is_superkey(&reduced)
        })
    }

    /// Union of the given keys: the attributes that belong to some key.
    #[must_use]
    pub fn prime_attributes(keys: &[BTreeSet<A>]) -> BTreeSet<A> {
        keys.iter().flatten().cloned().collect()
    }
}

/// Calls `visit` with every `size`-element combination of `0..n`, in
/// lexicographic order.
fn for_each_combination(n: usize, size: usize, mut visit: impl FnMut(&[usize])) {
    if size > n {
        return;
    }
    let mut indices: Vec<usize> = (0..size).collect();
    loop {
        visit(&indices);
        let Some(i) = (0..size).rev().find(|&i| indices[i] != i + n - size) else {
            return;
        };
        indices[i] += 1;
        for j in i + 1..size {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

impl<A> Display for RelationSchema<A>
where
    A: Ord + Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "R(")?;
        write_attributes(f, &self.attributes)?;
        write!(f, "), F = {}", self.dependencies)
    }
}
