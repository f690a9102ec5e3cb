use std::path::PathBuf;
use std::process;

use clap::Parser;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

use editor::error::EXIT_NOT_FOUND;
use editor::{EditError, EditRequest, MatchMode, Outcome, WriteMode};
use localdoc::ParseError;

#[derive(Parser, Debug)]
#[command(
    name = "localset",
    version,
    about = "Set a value in a Terraform locals block, keeping the file's formatting"
)]
struct Cli {
    /// HCL file to edit
    #[arg(long, env = "INPUT_FILEPATH")]
    filepath: PathBuf,

    /// Name of the local to replace
    #[arg(long, env = "INPUT_VARNAME")]
    varname: String,

    /// New value, always written as a quoted string
    #[arg(long, env = "INPUT_VALUE", allow_hyphen_values = true)]
    value: String,

    /// Set log level to debug (`-debug` is accepted too)
    #[arg(long)]
    debug: bool,

    /// Only rewrite the first matching local instead of every locals block
    #[arg(long, env = "INPUT_FIRST_MATCH_ONLY")]
    first_match_only: bool,

    /// Overwrite the file through the open handle instead of replacing it
    #[arg(long, env = "INPUT_IN_PLACE")]
    in_place: bool,

    /// Exit with a non-zero code when the local is not found
    #[arg(long, env = "INPUT_FAIL_ON_MISSING")]
    fail_on_missing: bool,

    /// Disable colored error output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn request(&self) -> EditRequest {
        let match_mode = if self.first_match_only {
            MatchMode::First
        } else {
            MatchMode::All
        };
        let write_mode = if self.in_place {
            WriteMode::InPlace
        } else {
            WriteMode::Atomic
        };
        EditRequest::new(&self.filepath, &self.varname, &self.value)
            .with_match_mode(match_mode)
            .with_write_mode(write_mode)
    }
}

fn main() {
    let cli = Cli::parse_from(normalize_args(std::env::args()));
    init_logging(cli.debug);

    tracing::debug!(
        filepath = %cli.filepath.display(),
        varname = %cli.varname,
        value = %cli.value,
        "inputs loaded"
    );

    let result = editor::run(&cli.request());
    if let Err(err) = &result {
        report(err, cli.no_color);
    }
    process::exit(exit_code(&result, cli.fail_on_missing));
}

fn exit_code(result: &Result<Outcome, EditError>, fail_on_missing: bool) -> i32 {
    match result {
        Ok(Outcome::Updated { .. }) => 0,
        Ok(Outcome::NotFound) if fail_on_missing => EXIT_NOT_FOUND,
        Ok(Outcome::NotFound) => 0,
        Err(err) => err.exit_code(),
    }
}

/// Accept Go-style single-dash `-debug` alongside clap's `--debug`.
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .filter_map(|arg| match arg.as_str() {
            "-debug" | "-debug=true" | "--debug=true" => Some("--debug".to_string()),
            "-debug=false" | "--debug=false" => None,
            _ => Some(arg),
        })
        .collect()
}

/// Warnings and above by default, debug with `--debug`; `RUST_LOG` wins over both.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(err: &EditError, no_color: bool) {
    tracing::error!(error = %err, "edit failed");

    if let EditError::Parse {
        path,
        source_text,
        errors,
    } = err
    {
        emit_parse_errors(&path.display().to_string(), source_text, errors, no_color);
    }
}

fn emit_parse_errors(name: &str, source: &str, errors: &[ParseError], no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(name.to_string(), source.to_string());

    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    for error in errors {
        let mut diagnostic = error.to_diagnostic();
        for label in &mut diagnostic.labels {
            label.file_id = file_id;
        }
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
    }
}
