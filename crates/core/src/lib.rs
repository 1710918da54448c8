//! Functional dependency algebra and normal form analysis.
//!
//! `fdnorm_core` reasons about a relation schema `R(U, F)`, where `U` is an
//! attribute universe and `F` a list of functional dependencies `X -> Y`. It
//! provides:
//!
//! 1. **Closure** -- the attributes derivable from a set via repeated
//!    application of `F` ([`DependencySet::closure`]).
//! 2. **Canonical cover** -- an equivalent set with singleton right sides, no
//!    extraneous left-side attributes and no redundant dependencies
//!    ([`DependencySet::canonical_cover`]).
//! 3. **Candidate keys** -- every minimal attribute set whose closure is `U`
//!    ([`RelationSchema::candidate_keys`]).
//! 4. **Normal forms** -- the highest of 1NF, 2NF, 3NF and BCNF the schema
//!    satisfies, with the elementary dependencies that keep it from the next
//!    level ([`RelationSchema::judge_normal_form`]).
//! 5. **Lossless decomposition** -- a sufficient check: a decomposition is
//!    lossless when some fragment contains a candidate key
//!    ([`RelationSchema::is_lossless_decomposition`]).
//!
//! Candidate-key search enumerates a power set and is exponential in the
//! number of attributes that appear on both sides of some dependency. Use
//! [`RelationSchema::candidate_keys_bounded`] to cap it.
//!
//! ```rust,ignore
//! use fdnorm_core::{DependencySet, FunctionalDependency, NormalForm, RelationSchema};
//!
//! let schema = RelationSchema::new(
//!     "ABC".chars(),
//!     DependencySet::from(vec![
//!         FunctionalDependency::new("AB".chars(), "C".chars()),
//!         FunctionalDependency::new("C".chars(), "A".chars()),
//!     ]),
//! );
//! let judgement = schema.judge_normal_form();
//! assert_eq!(judgement.level, NormalForm::Third);
//! ```
//!
//! # Crate features
//!
//! - **`serde`** -- enables `Serialize`/`Deserialize` derives on the core
//!   types.
//! - **`schemars`** -- enables `JsonSchema` derives (requires `std`).
//!
//! This crate is `no_std` compatible (requires `alloc`). The textual builder
//! and the schema file parser live in the separate `fdnorm_parser` crate.

#![cfg_attr(not(any(test, feature = "schemars")), no_std)]
extern crate alloc;

pub mod dependency;
pub mod display;
pub mod error;
pub mod schema;

pub use dependency::set::DependencySet;
pub use dependency::FunctionalDependency;
pub use error::Error;
pub use schema::normal_form::{Judgement, NormalForm, Violation};
pub use schema::RelationSchema;
