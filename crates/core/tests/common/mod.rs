#![allow(unused_macros)]

//! DSL macros for building test schemas over `char` attributes.
//!
//! # Syntax
//!
//! ```ignore
//! schema! { ABCD: A -> B, BC -> D }   // R(ABCD) with two dependencies
//! schema! { ABC: }                     // R(ABC) with none
//! attrs!(AC)                           // BTreeSet {'A', 'C'}
//! ```
//!
//! Each identifier is split into single-character attributes.

/// Build a `BTreeSet<char>` from the characters of an identifier.
macro_rules! attrs {
    ($set:ident) => {
        stringify!($set)
            .chars()
            .collect::<std::collections::BTreeSet<char>>()
    };
}

/// Build a single `FunctionalDependency<char>`.
macro_rules! fd {
    ($lhs:ident -> $rhs:ident) => {
        fdnorm_core::FunctionalDependency::new(stringify!($lhs).chars(), stringify!($rhs).chars())
    };
}

/// Build a `DependencySet<char>` from a comma-separated list.
macro_rules! deps {
    ($($lhs:ident -> $rhs:ident),* $(,)?) => {
        fdnorm_core::DependencySet::<char>::from(vec![$(fd!($lhs -> $rhs)),*])
    };
}

/// Build a `RelationSchema<char>`.
macro_rules! schema {
    ($attributes:ident : $($lhs:ident -> $rhs:ident),* $(,)?) => {
        fdnorm_core::RelationSchema::new(
            stringify!($attributes).chars(),
            deps!($($lhs -> $rhs),*),
        )
    };
}
