use std::path::Path;
use std::{fs, process};

use clap::Parser;
use fdnorm_cli::{
    collect_files, is_formattable_file, is_input_file, load_schemas, parse_attributes,
    render_attributes, AnalyzeArgs, App, ClosureArgs, Command, Error, FmtArgs, GenerateArgs,
    LosslessArgs,
};
use fdnorm_core::display::format_schemas;
use fdnorm_core::RelationSchema;
use fdnorm_parser::parse_schemas;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = App::parse();
    let result = match &app.command {
        Command::Analyze(args) => analyze(args),
        Command::Closure(args) => closure(args),
        Command::Lossless(args) => lossless(args),
        Command::Generate(args) => generate(args),
        Command::Fmt(args) => fmt(args),
        Command::Schema => schema(),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Label a schema by its file and position, e.g. `hr.fd#2`.
fn schema_label(path: &Path, index: usize) -> String {
    let filename = path.file_name().unwrap_or_default().to_string_lossy();
    format!("{filename}#{}", index + 1)
}

fn warn_undeclared(label: &str, schema: &RelationSchema<char>) {
    let undeclared = schema.undeclared_attributes();
    if !undeclared.is_empty() {
        tracing::warn!(
            schema = label,
            attributes = %render_attributes(&undeclared),
            "dependencies mention attributes outside the schema"
        );
    }
}

fn analyze(args: &AnalyzeArgs) -> Result<bool, Error> {
    let files = collect_files(&args.paths, is_input_file)?;
    if files.is_empty() {
        eprintln!("No .fd or .json files found");
        return Ok(false);
    }

    let mut all_ok = true;
    for path in &files {
        for (index, schema) in load_schemas(path)?.iter().enumerate() {
            let label = schema_label(path, index);
            warn_undeclared(&label, schema);

            let keys = match schema.candidate_keys_bounded(args.max_key_search) {
                Ok(keys) => keys,
                Err(e) => {
                    all_ok = false;
                    if args.json {
                        let result = serde_json::json!({
                            "schema": label,
                            "ok": false,
                            "error": e,
                        });
                        println!("{}", serde_json::to_string(&result)?);
                    } else {
                        println!("{label}: FAIL ({e})");
                    }
                    continue;
                }
            };
            let cover = schema.dependencies().canonical_cover();
            let judgement = schema.judge_with_keys(&keys);
            let rendered_keys: Vec<String> = keys.iter().map(render_attributes).collect();

            if args.json {
                let result = serde_json::json!({
                    "schema": label,
                    "ok": true,
                    "attributes": render_attributes(schema.attributes()),
                    "dependencies": schema.dependencies().to_string(),
                    "candidate_keys": rendered_keys,
                    "canonical_cover": cover.to_string(),
                    "normal_form": judgement.level.to_string(),
                    "violations": judgement.violations,
                });
                println!("{}", serde_json::to_string(&result)?);
            } else {
                println!("{label}: {schema}");
                println!("  candidate keys: {}", rendered_keys.join(", "));
                println!("  canonical cover: {cover}");
                println!("  normal form: {}", judgement.level);
                if args.verbose {
                    for violation in &judgement.violations {
                        println!("    {violation}");
                    }
                }
            }
        }
    }

    Ok(all_ok)
}

fn closure(args: &ClosureArgs) -> Result<bool, Error> {
    let attributes = parse_attributes(&args.attributes);
    let rendered = render_attributes(&attributes);
    for (index, schema) in load_schemas(&args.path)?.iter().enumerate() {
        let label = schema_label(&args.path, index);
        warn_undeclared(&label, schema);
        let closure = schema.closure(&attributes);
        println!("{label}: {rendered}+ = {}", render_attributes(&closure));
    }
    Ok(true)
}

fn lossless(args: &LosslessArgs) -> Result<bool, Error> {
    let fragments: Vec<_> = args
        .fragments
        .iter()
        .map(String::as_str)
        .map(parse_attributes)
        .collect();
    for (index, schema) in load_schemas(&args.path)?.iter().enumerate() {
        let label = schema_label(&args.path, index);
        warn_undeclared(&label, schema);

        let keys = schema
            .candidate_keys_bounded(args.max_key_search)
            .map_err(|e| Error::from(e).in_file(&args.path))?;

        let verdict = if RelationSchema::is_lossless_decomposition_with_keys(&keys, &fragments) {
            "lossless"
        } else {
            "lossy"
        };
        println!("{label}: {verdict}");
    }
    Ok(true)
}

fn generate(args: &GenerateArgs) -> Result<bool, Error> {
    fs::create_dir_all(&args.output_dir).map_err(|e| Error::from(e).in_file(&args.output_dir))?;

    let generated = fdnorm_testgen::generator::generate_mult_schemas(
        args.n_schema,
        usize::from(args.n_attr),
        args.n_dep,
        usize::from(args.max_lhs),
    );

    for schema in &generated {
        let path = args.output_dir.join(format!("{}.json", schema.get_id()));
        let file = fs::File::create(&path).map_err(|e| Error::from(e).in_file(&path))?;
        serde_json::to_writer_pretty(file, schema).map_err(|e| Error::from(e).in_file(&path))?;
    }

    println!(
        "Generated {} schemas to {}",
        generated.len(),
        args.output_dir.display()
    );
    Ok(true)
}

fn fmt(args: &FmtArgs) -> Result<bool, Error> {
    let files = collect_files(&args.paths, is_formattable_file)?;
    let mut all_formatted = true;

    for path in &files {
        let text = fs::read_to_string(path).map_err(|e| Error::from(e).in_file(path))?;
        let schemas = parse_schemas(&text).map_err(|e| Error::from(e).in_file(path))?;
        let formatted = format_schemas(&schemas);
        if formatted == text {
            continue;
        }

        if args.check {
            println!("would reformat {}", path.display());
            all_formatted = false;
        } else {
            fs::write(path, formatted).map_err(|e| Error::from(e).in_file(path))?;
            println!("formatted {}", path.display());
        }
    }

    Ok(all_formatted)
}

fn schema() -> Result<bool, Error> {
    let schema = schemars::schema_for!(Vec<RelationSchema<char>>);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(true)
}
