use alloc::string::String;
use core::fmt::{Display, Write};

use crate::schema::RelationSchema;

/// Format schemas in the schema file format.
///
/// Schemas are separated by `---`. Each starts with an `R(...)` header
/// followed by one dependency per line, in list order. The output always ends
/// with a trailing newline.
///
/// The output round-trips through `parse_schemas` when every dependency has a
/// non-empty left side and every attribute renders as one alphanumeric or `_`
/// character. A dependency with an empty left side renders as `->A`, which
/// the file format rejects.
#[must_use]
pub fn format_schemas<A>(schemas: &[RelationSchema<A>]) -> String
where
    A: Ord + Display,
{
    let mut output = String::new();
    for (i, schema) in schemas.iter().enumerate() {
        if i > 0 {
            output.push_str("---\n");
        }
        output.push_str("R(");
        for attribute in schema.attributes() {
            let _ = write!(output, "{attribute}");
        }
        output.push_str(")\n");
        for fd in schema.dependencies() {
            let _ = writeln!(output, "{fd}");
        }
    }
    output
}
