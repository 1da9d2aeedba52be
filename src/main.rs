// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for postman2md.
//!
//! This binary provides the `postman2md` command for converting Postman
//! collection exports from JSON to Markdown documentation.

use lexopt::prelude::*;
use postman2md::{parser, renderer};
use snafu::{OptionExt, ensure, prelude::*};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where to write the rendered output.
#[derive(Clone)]
enum OutputTarget {
    /// Write each file to the specified directory.
    Directory(PathBuf),
    /// Write to stdout.
    Stdout,
}

#[allow(clippy::struct_excessive_bools)]
struct Cli {
    input: Vec<PathBuf>,
    output: OutputTarget,
    concat: bool,
    heading_offset: u8,
    skip_disabled: bool,
    verbosity: u8,
    quiet: bool,
    dry_run: bool,
    force: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("at least one input file or directory is required"))]
    NoInputFiles,

    #[snafu(display("heading offset {offset} is out of range (0-5)"))]
    InvalidHeadingOffset { offset: u8 },

    #[snafu(display("cannot output multiple files to stdout without --concat"))]
    MultipleFilesToStdout,

    #[snafu(display("failed to create output directory: {source}"))]
    CreateOutputDir { source: std::io::Error },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse {}: {source}", path.display()))]
    ParseFile {
        path: PathBuf,
        source: parser::ParseError,
    },

    #[snafu(display("invalid input filename: no file stem"))]
    InvalidFilename,

    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Headings deeper than `######` are not Markdown.
const MAX_HEADING_OFFSET: u8 = 5;

/// Suffix Postman appends to exported collection file names.
const COLLECTION_SUFFIX: &str = ".postman_collection";

fn print_help() {
    println!(
        "\
{name} {version}
Convert Postman collection exports to Markdown

Usage: {name} [OPTIONS] <INPUT>...

Arguments:
  <INPUT>...  Collection JSON files or directories containing exports

Options:
  -o, --output <OUTPUT>     Output directory (default: .), file with --concat, or - for stdout
      --concat              Combine all inputs into a single output
      --heading-offset <N>  Shift heading levels by N (0-5, default: 0)
      --skip-disabled       Leave out headers, params and fields unchecked in Postman
      --include-disabled    Keep unchecked entries (default)

Other options:
  -v, --verbose             Increase log verbosity (repeatable)
  -q, --quiet               Suppress progress messages
  -n, --dry-run             Show what would be processed without writing
  -f, --force               Overwrite existing output files
  -h, --help                Print help
  -V, --version             Print version

Log filtering can be refined with RUST_LOG.",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    );
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    // Show help if no arguments provided
    if std::env::args().len() == 1 {
        print_help();
        std::process::exit(0);
    }

    let mut input = Vec::new();
    let mut output = OutputTarget::Directory(PathBuf::from("."));
    let mut output_given = false;
    let mut concat = false;
    let mut heading_offset: u8 = 0;
    let mut skip_disabled = false;
    let mut verbosity: u8 = 0;
    let mut quiet = false;
    let mut dry_run = false;
    let mut force = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('o') | Long("output") => {
                let val: PathBuf = parser.value()?.parse()?;
                output = if val == Path::new("-") {
                    OutputTarget::Stdout
                } else {
                    OutputTarget::Directory(val)
                };
                output_given = true;
            }
            Long("concat") => concat = true,
            Long("heading-offset") => {
                heading_offset = parser
                    .value()?
                    .parse()
                    .map_err(|_| "heading-offset must be a number 0-5")?;
            }
            // Last one wins
            Long("skip-disabled") => skip_disabled = true,
            Long("include-disabled") => skip_disabled = false,
            Short('v') | Long("verbose") => verbosity = verbosity.saturating_add(1),
            Short('q') | Long("quiet") => quiet = true,
            Short('n') | Long("dry-run") => dry_run = true,
            Short('f') | Long("force") => force = true,
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            Value(val) => input.push(val.parse()?),
            _ => return Err(arg.unexpected()),
        }
    }

    if concat && !output_given {
        return Err("--concat requires --output <FILE> or --output -".into());
    }

    Ok(Cli {
        input,
        output,
        concat,
        heading_offset,
        skip_disabled,
        verbosity,
        quiet,
        dry_run,
        force,
    })
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` directives are honored; `-v` raises the default level.
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<(), Error> {
    let cli = parse_args().context(ParseArgsSnafu)?;
    setup_logging(cli.verbosity);

    ensure!(
        cli.heading_offset <= MAX_HEADING_OFFSET,
        InvalidHeadingOffsetSnafu {
            offset: cli.heading_offset
        }
    );
    ensure!(!cli.input.is_empty(), NoInputFilesSnafu);

    // Collect all input files first
    let files = collect_input_files(&cli.input);
    tracing::debug!(count = files.len(), "collected input files");

    if cli.concat {
        process_concat(&files, &cli)?;
    } else {
        match &cli.output {
            OutputTarget::Stdout => {
                // Without concat, we can only output one file to stdout
                ensure!(files.len() == 1, MultipleFilesToStdoutSnafu);
                process_to_stdout(&files[0], &cli)?;
            }
            OutputTarget::Directory(dir) => {
                if !cli.dry_run {
                    std::fs::create_dir_all(dir).context(CreateOutputDirSnafu)?;
                }
                for file in &files {
                    process_file(file, dir, &cli)?;
                }
            }
        }
    }

    Ok(())
}

/// Collects all JSON files from the given inputs (files and directories).
fn collect_input_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            {
                tracing::trace!(path = %entry.path().display(), "found collection");
                files.push(entry.path().to_path_buf());
            }
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// Creates render options from CLI arguments.
const fn make_render_options(cli: &Cli) -> renderer::RenderOptions {
    renderer::RenderOptions {
        heading_offset: cli.heading_offset,
        skip_disabled: cli.skip_disabled,
    }
}

/// Reads, parses and renders one collection file.
fn convert(path: &Path, cli: &Cli) -> Result<String, Error> {
    let json = std::fs::read_to_string(path).context(ReadFileSnafu { path })?;
    let collection = parser::parse_collection(&json).context(ParseFileSnafu { path })?;
    tracing::info!(
        path = %path.display(),
        collection = %collection.name,
        items = collection.items.len(),
        "parsed collection"
    );

    Ok(renderer::render_collection(
        &collection,
        &make_render_options(cli),
    ))
}

/// Derives the output file name from an input path.
///
/// `Shop API.postman_collection.json` becomes `Shop API.md`.
fn output_file_name(input: &Path) -> Option<String> {
    let stem = input.file_stem()?.to_string_lossy();
    let stem = stem.strip_suffix(COLLECTION_SUFFIX).unwrap_or(&*stem);
    (!stem.is_empty()).then(|| format!("{stem}.md"))
}

/// Processes a single file and outputs to stdout.
fn process_to_stdout(input: &Path, cli: &Cli) -> Result<(), Error> {
    if cli.dry_run {
        eprintln!("Would output {}", input.display());
        return Ok(());
    }

    let markdown = convert(input, cli)?;
    print!("{markdown}");
    Ok(())
}

/// Processes multiple files and concatenates them into a single output.
fn process_concat(files: &[PathBuf], cli: &Cli) -> Result<(), Error> {
    let mut output = String::new();

    for (i, path) in files.iter().enumerate() {
        if i > 0 {
            output.push_str("\n---\n\n");
        }
        output.push_str(&convert(path, cli)?);
    }

    match &cli.output {
        OutputTarget::Stdout => {
            if cli.dry_run {
                eprintln!("Would output {} files concatenated", files.len());
            } else {
                print!("{output}");
            }
        }
        OutputTarget::Directory(path) => {
            // In concat mode, treat path as a file, not directory
            if cli.dry_run {
                eprintln!(
                    "Would write {} ({} files concatenated)",
                    path.display(),
                    files.len()
                );
            } else if path.exists() && !cli.force {
                eprintln!(
                    "Skipping {} (already exists, use --force to overwrite)",
                    path.display()
                );
            } else {
                // Create parent directory if needed
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent).context(CreateOutputDirSnafu)?;
                }
                std::fs::write(path, &output).context(WriteFileSnafu { path })?;
                if !cli.quiet {
                    eprintln!("Wrote {} ({} files)", path.display(), files.len());
                }
            }
        }
    }

    Ok(())
}

/// Processes a single file and writes to the output directory.
fn process_file(input: &Path, out_dir: &Path, cli: &Cli) -> Result<(), Error> {
    let out_name = output_file_name(input).context(InvalidFilenameSnafu)?;
    let out_path = out_dir.join(out_name);

    // Handle dry-run mode
    if cli.dry_run {
        eprintln!("Would write {}", out_path.display());
        return Ok(());
    }

    // Check if output exists and handle overwrite
    if out_path.exists() && !cli.force {
        eprintln!(
            "Skipping {} (already exists, use --force to overwrite)",
            out_path.display()
        );
        return Ok(());
    }

    let markdown = convert(input, cli)?;
    std::fs::write(&out_path, &markdown).context(WriteFileSnafu { path: &out_path })?;

    if !cli.quiet {
        eprintln!("Wrote {}", out_path.display());
    }
    Ok(())
}
