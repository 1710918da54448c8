//! Winnow-based parser for the schema file format.
//!
//! Grammar:
//! ```text
//! document   = schema (separator schema)*
//! separator  = DASH+ NEWLINE
//! schema     = (comment | blank)* header (comment | blank | dep_line)*
//! header     = "R(" ATTRIBUTE* ")" NEWLINE
//! dep_line   = dependency ("," dependency)* NEWLINE
//! dependency = ATTRIBUTE+ "->" ATTRIBUTE*
//! comment    = "//" REST_OF_LINE NEWLINE
//! ATTRIBUTE  = alphanumeric | "_"      -- one character, one attribute
//! ```
//!
//! Spaces and tabs are allowed between tokens. The final line may omit its
//! newline.

use fdnorm_core::{FunctionalDependency, RelationSchema};
use winnow::ascii::{line_ending, till_line_ending};
use winnow::combinator::{alt, eof, opt, repeat, separated};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{literal, take_while};
use winnow::ModalResult;

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// A parse error with human-readable location information.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Parse a schema file into its list of schemas.
///
/// An input holding only comments and blank lines yields no schemas.
///
/// # Errors
///
/// Returns a [`ParseError`] with line/column information when the input does
/// not conform to the grammar.
pub fn parse_schemas(input: &str) -> Result<Vec<RelationSchema<char>>, ParseError> {
    let original = input;
    let mut stream: &str = input;
    match document.parse_next(&mut stream) {
        Ok(schemas) => Ok(schemas),
        Err(e) => {
            let consumed = original.len().saturating_sub(stream.len());
            let (line, column) = offset_to_line_col(original, consumed);
            Err(ParseError {
                message: error_message(&e),
                line,
                column,
            })
        }
    }
}

fn error_message(e: &ErrMode<ContextError>) -> String {
    match e {
        ErrMode::Backtrack(inner) | ErrMode::Cut(inner) => {
            let message = inner.to_string().replace('\n', "; ");
            if message.is_empty() {
                "unexpected input".to_string()
            } else {
                message
            }
        }
        ErrMode::Incomplete(_) => "incomplete input".to_string(),
    }
}

/// Convert a byte offset into the original input to 1-based (line, column).
fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let safe_offset = offset.min(input.len());
    let prefix = &input[..safe_offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = prefix
        .rfind('\n')
        .map_or_else(|| prefix.len() + 1, |pos| prefix.len() - pos);
    (line, column)
}

// ---------------------------------------------------------------------------
// Lexical helpers
// ---------------------------------------------------------------------------

fn is_attribute(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Optional inline whitespace: spaces and tabs only (no newlines).
fn opt_inline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

/// A line ending, or the end of input for an unterminated last line.
fn line_end(input: &mut &str) -> ModalResult<()> {
    alt((line_ending.void(), eof.void()))
        .context(StrContext::Expected(StrContextValue::Description(
            "end of line",
        )))
        .parse_next(input)
}

/// Only spaces and tabs remain.
fn at_end(input: &str) -> bool {
    input.trim_start_matches([' ', '\t']).is_empty()
}

/// The next line consists of dashes only.
fn at_separator(input: &str) -> bool {
    input.lines().next().is_some_and(|line| {
        let line = line.trim();
        !line.is_empty() && line.chars().all(|c| c == '-')
    })
}

// ---------------------------------------------------------------------------
// Line parsers
// ---------------------------------------------------------------------------

/// `"//" <rest-of-line> NEWLINE`
fn comment_line(input: &mut &str) -> ModalResult<()> {
    opt_inline_ws.parse_next(input)?;
    literal("//").parse_next(input)?;
    till_line_ending.parse_next(input)?;
    line_end.parse_next(input)
}

/// A line holding only whitespace.
fn blank_line(input: &mut &str) -> ModalResult<()> {
    opt_inline_ws.parse_next(input)?;
    line_ending.void().parse_next(input)
}

/// Any number of comment and blank lines.
fn skip_trivia(input: &mut &str) -> ModalResult<()> {
    repeat::<_, _, (), _, _>(0.., alt((comment_line, blank_line))).parse_next(input)
}

/// `"R(" ATTRIBUTE* ")"`, returning the attribute characters.
fn header<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    opt_inline_ws.parse_next(input)?;
    literal("R(")
        .context(StrContext::Label("schema header"))
        .context(StrContext::Expected(StrContextValue::StringLiteral("R(")))
        .parse_next(input)?;
    let attributes = take_while(0.., is_attribute).parse_next(input)?;
    literal(")")
        .context(StrContext::Label("schema header"))
        .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    line_end.parse_next(input)?;
    Ok(attributes)
}

/// `ATTRIBUTE+ "->" ATTRIBUTE*`
fn dependency(input: &mut &str) -> ModalResult<FunctionalDependency<char>> {
    opt_inline_ws.parse_next(input)?;
    let lhs = take_while(1.., is_attribute)
        .context(StrContext::Label("left-hand side"))
        .context(StrContext::Expected(StrContextValue::Description(
            "attribute",
        )))
        .parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    literal("->")
        .context(StrContext::Label("dependency"))
        .context(StrContext::Expected(StrContextValue::StringLiteral("->")))
        .parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    let rhs = take_while(0.., is_attribute).parse_next(input)?;
    Ok(FunctionalDependency::new(lhs.chars(), rhs.chars()))
}

/// One or more comma-separated dependencies, terminated by a newline.
fn dependency_line(input: &mut &str) -> ModalResult<Vec<FunctionalDependency<char>>> {
    let dependencies: Vec<FunctionalDependency<char>> =
        separated(1.., dependency, (opt_inline_ws, literal(","))).parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    line_end.parse_next(input)?;
    Ok(dependencies)
}

/// A line consisting of one or more `-` characters.
fn separator(input: &mut &str) -> ModalResult<()> {
    opt_inline_ws.parse_next(input)?;
    take_while(1.., '-').parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    line_end.parse_next(input)
}

// ---------------------------------------------------------------------------
// Schema and document parsers
// ---------------------------------------------------------------------------

/// A header followed by dependency lines, up to a separator or end-of-input.
fn schema(input: &mut &str) -> ModalResult<RelationSchema<char>> {
    skip_trivia(input)?;
    let attributes = header.parse_next(input)?;

    let mut dependencies = Vec::new();
    loop {
        skip_trivia(input)?;
        if at_end(input) || at_separator(input) {
            break;
        }
        dependencies.extend(dependency_line.parse_next(input)?);
    }

    Ok(RelationSchema::new(
        attributes.chars(),
        dependencies.into_iter().collect(),
    ))
}

fn document(input: &mut &str) -> ModalResult<Vec<RelationSchema<char>>> {
    skip_trivia(input)?;
    if at_end(input) {
        opt_inline_ws.parse_next(input)?;
        return Ok(Vec::new());
    }

    let mut schemas = vec![schema.parse_next(input)?];
    while opt(separator).parse_next(input)?.is_some() {
        schemas.push(schema.parse_next(input)?);
    }

    opt_inline_ws.parse_next(input)?;
    eof.context(StrContext::Expected(StrContextValue::Description(
        "end of input",
    )))
    .parse_next(input)?;

    Ok(schemas)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use fdnorm_core::display::format_schemas;

    use super::*;

    fn set(attributes: &str) -> BTreeSet<char> {
        attributes.chars().collect()
    }

    fn rendered(schema: &RelationSchema<char>) -> Vec<String> {
        schema
            .dependencies()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Happy-path tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_single_schema() {
        let result = parse_schemas("R(ABC)\nA -> B\nB -> C\n").expect("should parse");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].attributes(), &set("ABC"));
        assert_eq!(rendered(&result[0]), ["A->B", "B->C"]);
    }

    #[test]
    fn test_multiple_dependencies_per_line() {
        let result = parse_schemas("R(ABCD)\nA->B, BC -> D ,D->A\n").expect("should parse");
        assert_eq!(rendered(&result[0]), ["A->B", "BC->D", "D->A"]);
    }

    #[test]
    fn test_multi_schema_with_separator() {
        let input = "R(AB)\nA->B\n---\nR(XYZ)\nX->YZ\n";
        let result = parse_schemas(input).expect("should parse");
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].attributes(), &set("XYZ"));
        assert_eq!(rendered(&result[1]), ["X->YZ"]);
    }

    #[test]
    fn test_schema_without_dependencies() {
        let result = parse_schemas("R(ABC)\n---\nR(D)\n").expect("should parse");
        assert_eq!(result.len(), 2);
        assert!(result[0].dependencies().is_empty());
        assert_eq!(result[0].candidate_keys(), vec![set("ABC")]);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let input = "\
// employee
R(ABCD)

// keys
A -> B
   BC -> D

---
// second
R(AB)
A -> B
";
        let result = parse_schemas(input).expect("should parse");
        assert_eq!(result.len(), 2);
        assert_eq!(rendered(&result[0]), ["A->B", "BC->D"]);
        assert_eq!(rendered(&result[1]), ["A->B"]);
    }

    #[test]
    fn test_missing_final_newline() {
        let result = parse_schemas("R(AB)\nA->B").expect("should parse");
        assert_eq!(rendered(&result[0]), ["A->B"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let result = parse_schemas("R(AB)\r\nA->B\r\n").expect("should parse");
        assert_eq!(rendered(&result[0]), ["A->B"]);
    }

    #[test]
    fn test_empty_right_side() {
        let result = parse_schemas("R(AB)\nA->\n").expect("should parse");
        assert!(result[0].dependencies().dependencies()[0].rhs().is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_schemas("").expect("should parse").is_empty());
        assert!(parse_schemas("// nothing here\n\n")
            .expect("should parse")
            .is_empty());
    }

    #[test]
    fn test_format_round_trip() {
        let input = "R(ABCD)\nBC -> D, A -> B\nD -> A\n---\nR(XY)\n";
        let schemas = parse_schemas(input).expect("should parse");
        let formatted = format_schemas(&schemas);
        assert_eq!(formatted, "R(ABCD)\nBC->D\nA->B\nD->A\n---\nR(XY)\n");
        let reparsed = parse_schemas(&formatted).expect("should reparse");
        assert_eq!(format_schemas(&reparsed), formatted);
    }

    // -----------------------------------------------------------------------
    // Error tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_missing_arrow_has_line_column() {
        let err = parse_schemas("R(ABC)\nA B\n").expect_err("should fail");
        assert_eq!(err.line, 2, "expected error on line 2, got: {err}");
        assert_eq!(err.column, 3, "got: {err}");
    }

    #[test]
    fn test_empty_left_side_is_rejected() {
        let err = parse_schemas("R(ABC)\nA->B\n->C\n").expect_err("should fail");
        assert_eq!(err.line, 3, "got: {err}");
        assert_eq!(err.column, 1, "got: {err}");
    }

    #[test]
    fn test_missing_header() {
        let err = parse_schemas("A->B\n").expect_err("should fail");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_trailing_garbage_after_header() {
        let err = parse_schemas("R(AB) x\nA->B\n").expect_err("should fail");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_parse_error_display() {
        let err = parse_schemas("R(ABC)\n@bad\n").expect_err("should fail");
        let msg = err.to_string();
        assert!(msg.contains("parse error"), "{msg}");
        assert!(msg.contains("line 2"), "{msg}");
    }

    #[test]
    fn test_offset_to_line_col() {
        assert_eq!(offset_to_line_col("hello\nworld\n", 0), (1, 1));
        assert_eq!(offset_to_line_col("hello\nworld\n", 6), (2, 1));
        assert_eq!(offset_to_line_col("hello\nworld\n", 8), (2, 3));
    }
}
