//! Text front ends for `fdnorm_core`.
//!
//! - [`builder`] turns `"AB->C"` style strings into dependencies and schemas.
//! - [`parser`] reads the multi-schema file format (`R(ABCD)` headers, one
//!   dependency list per line, `---` separators).
//! - [`lexer`] tokenizes the same format for syntax highlighting.

pub mod builder;
pub mod lexer;
pub mod parser;

pub use builder::{build_schema, parse_dependency, BuildError};
pub use lexer::{tokenize, tokenize_with_text, Token, TokenKind};
pub use parser::{parse_schemas, ParseError};
