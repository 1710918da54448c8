//! fdnorm CLI -- analyze functional dependencies and normal forms.

use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::{fs, io};

use clap::{Parser, Subcommand};
use derive_more::From;
use fdnorm_core::RelationSchema;
use fdnorm_parser::{parse_schemas, ParseError};
use fdnorm_testgen::generator::GeneratedSchema;
use serde::Deserialize;

/// Default bound on the number of attributes a key search may enumerate.
pub const DEFAULT_MAX_KEY_SEARCH: usize = 20;

/// Extension of files in the schema file format.
pub const SCHEMA_EXTENSION: &str = "fd";

#[derive(Debug, Parser)]
#[command(
    name = "fdnorm",
    about = "Functional dependency algebra and normal form analysis"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report candidate keys, canonical cover and normal form of each schema
    Analyze(AnalyzeArgs),
    /// Compute the closure of an attribute set under each schema
    Closure(ClosureArgs),
    /// Check whether a decomposition of each schema is lossless
    Lossless(LosslessArgs),
    /// Generate random relation schemas
    Generate(GenerateArgs),
    /// Format schema (.fd) files
    Fmt(FmtArgs),
    /// Print the JSON Schema for the schema input format to stdout
    Schema,
}

#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Input files or directories (.fd or .json)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Refuse key searches over more than this many attributes
    #[arg(long, default_value_t = DEFAULT_MAX_KEY_SEARCH)]
    pub max_key_search: usize,
    /// Print the violations behind the normal form
    #[arg(long)]
    pub verbose: bool,
    /// Output results as JSON (one object per schema)
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct ClosureArgs {
    /// Input file (.fd or .json)
    pub path: PathBuf,
    /// Attributes to close, e.g. `AB`
    #[arg(long)]
    pub attributes: String,
}

#[derive(Debug, Parser)]
pub struct LosslessArgs {
    /// Input file (.fd or .json)
    pub path: PathBuf,
    /// Attributes of one fragment, e.g. `ACD`; repeat for each fragment
    #[arg(long = "fragment", required = true)]
    pub fragments: Vec<String>,
    /// Refuse key searches over more than this many attributes
    #[arg(long, default_value_t = DEFAULT_MAX_KEY_SEARCH)]
    pub max_key_search: usize,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Number of schemas to generate
    #[arg(long)]
    pub n_schema: u64,
    /// Number of attributes per schema (at most 26)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=26))]
    pub n_attr: u8,
    /// Number of dependencies per schema
    #[arg(long)]
    pub n_dep: usize,
    /// Maximum number of attributes on a left-hand side
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..))]
    pub max_lhs: u8,
    /// Output directory for generated schema files
    #[arg(long)]
    pub output_dir: PathBuf,
}

#[derive(Debug, Parser)]
pub struct FmtArgs {
    /// Input files or directories to format
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Check formatting without modifying files (exit 1 if unformatted)
    #[arg(long)]
    pub check: bool,
}

/// Errors surfaced by the command-line tool.
#[derive(Debug, From)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Parse(ParseError),
    Analysis(fdnorm_core::Error),
    /// An error while processing a particular file.
    #[from(skip)]
    File { path: PathBuf, source: Box<Self> },
}

impl Error {
    /// Attach the file being processed to this error.
    #[must_use]
    pub fn in_file(self, path: &Path) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "invalid JSON: {e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Analysis(e) => write!(f, "{e}"),
            Self::File { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for Error {}

/// The accepted shapes of a `.json` input file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonInput {
    Generated(GeneratedSchema),
    Single(RelationSchema<char>),
    Many(Vec<RelationSchema<char>>),
}

impl From<JsonInput> for Vec<RelationSchema<char>> {
    fn from(input: JsonInput) -> Self {
        match input {
            JsonInput::Generated(generated) => vec![generated.into_schema()],
            JsonInput::Single(schema) => vec![schema],
            JsonInput::Many(schemas) => schemas,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn is_schema_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SCHEMA_EXTENSION)
}

/// Parse `text` as the contents of `path`: JSON for `.json` files, the schema
/// file format otherwise.
///
/// # Errors
///
/// Returns [`Error::Json`] or [`Error::Parse`] when `text` is malformed.
pub fn parse_input(path: &Path, text: &str) -> Result<Vec<RelationSchema<char>>, Error> {
    if is_json(path) {
        let input: JsonInput = serde_json::from_str(text)?;
        Ok(input.into())
    } else {
        Ok(parse_schemas(text)?)
    }
}

/// Read and parse every schema in the file at `path`.
///
/// # Errors
///
/// Returns an [`Error::File`] naming `path` when it cannot be read or parsed.
pub fn load_schemas(path: &Path) -> Result<Vec<RelationSchema<char>>, Error> {
    fs::read_to_string(path)
        .map_err(Error::from)
        .and_then(|text| parse_input(path, &text))
        .map_err(|e| e.in_file(path))
}

/// Expand `paths` into input files.
///
/// Files are kept as given. Directories contribute their entries accepted by
/// `accept`, sorted by path.
///
/// # Errors
///
/// Returns an [`Error::File`] naming a directory that cannot be read.
pub fn collect_files(
    paths: &[PathBuf],
    accept: impl Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)
                .map_err(|e| Error::from(e).in_file(path))?
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|entry| entry.is_file() && accept(entry))
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Accepts `.fd` and `.json` files.
#[must_use]
pub fn is_input_file(path: &Path) -> bool {
    is_schema_file(path) || is_json(path)
}

/// Accepts `.fd` files only.
#[must_use]
pub fn is_formattable_file(path: &Path) -> bool {
    is_schema_file(path)
}

/// Attribute set written as a string such as `ABC`. Whitespace and commas
/// are ignored.
#[must_use]
pub fn parse_attributes(text: &str) -> BTreeSet<char> {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}

/// Render an attribute set as a string such as `ABC`.
#[must_use]
pub fn render_attributes(attributes: &BTreeSet<char>) -> String {
    attributes.iter().collect()
}
