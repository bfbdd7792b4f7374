//! salt-lint CLI tool.
//!
//! Usage:
//! ```bash
//! salt-lint [OPTIONS] [STATE_FILES]...
//! cat top.sls | salt-lint
//! salt-lint -L
//! ```
//!
//! Exit codes: `0` when no rule matched, `2` when at least one did, `1` on
//! a fatal error (invalid configuration, broken rules directory, no input).

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};
use salt_lint_core::{ConfigError, Options};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod stdin;

use commands::output::OutputFormat;

/// Linter for SaltStack state files
#[derive(Parser, Debug)]
#[command(name = "salt-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// List all the rules
    #[arg(short = 'L')]
    list_rules: bool,

    /// List all the tags
    #[arg(short = 'T')]
    list_tags: bool,

    /// Rules directory; any -r flag replaces the built-in rules unless -R is also used
    #[arg(short = 'r', value_name = "RULESDIR", action = ArgAction::Append)]
    rulesdir: Vec<PathBuf>,

    /// Use the built-in rules in addition to any -r directories
    #[arg(short = 'R')]
    use_default_rules: bool,

    /// Only check rules whose id/tags match these values
    #[arg(short = 't', value_name = "TAGS", action = ArgAction::Append)]
    tags: Vec<String>,

    /// Only check rules whose id/tags do not match these values
    #[arg(short = 'x', value_name = "SKIP_LIST", action = ArgAction::Append)]
    skip_list: Vec<String>,

    /// Increase verbosity level
    #[arg(short = 'v', action = ArgAction::Count)]
    verbosity: u8,

    /// Disable colored output
    #[arg(long = "nocolor", visible_alias = "nocolour", overrides_with = "force_color")]
    no_color: bool,

    /// Force colored output
    #[arg(long = "force-color", visible_alias = "force-colour", overrides_with = "no_color")]
    force_color: bool,

    /// Path to a directory or file to skip (repeatable)
    #[arg(long = "exclude", value_name = "EXCLUDE_PATHS", action = ArgAction::Append)]
    exclude_paths: Vec<String>,

    /// Print the matches as JSON
    #[arg(long)]
    json: bool,

    /// Add the severity to the standard output
    #[arg(long)]
    severity: bool,

    /// Configuration file to use (default: .salt-lint)
    #[arg(short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// State files or directories to lint
    #[arg(value_name = "STATE_FILES")]
    states: Vec<PathBuf>,
}

impl Cli {
    fn colored(&self) -> bool {
        if self.force_color {
            true
        } else if self.no_color {
            false
        } else {
            std::io::stdout().is_terminal()
        }
    }

    fn options(&self) -> Options {
        Options {
            verbosity: self.verbosity,
            exclude_paths: self.exclude_paths.clone(),
            skip_list: self.skip_list.clone(),
            tags: self.tags.clone(),
            use_default_rules: self.use_default_rules,
            rulesdirs: self.rulesdir.clone(),
            json: self.json,
            severity: self.severity,
            colored: self.colored(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            report(err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let stdin_state = stdin::capture()?;

    let cwd = std::env::current_dir()?;
    let source = config_resolver::resolve(&cwd, cli.config.as_deref());
    let config = Arc::new(source.load(cli.options())?);

    init_tracing(config.verbosity);
    if let Some(path) = source.path() {
        tracing::info!("Using config: {}", path.display());
    }

    let mut states = cli.states.clone();
    if let Some(state) = &stdin_state {
        states.push(state.path().to_path_buf());
    }

    if states.is_empty() && !(cli.list_rules || cli.list_tags) {
        eprintln!("{}", Cli::command().render_help());
        return Ok(ExitCode::FAILURE);
    }

    let registry = commands::build_registry(&config)?;

    if cli.list_rules {
        commands::list_rules::run(&registry);
        return Ok(ExitCode::SUCCESS);
    }
    if cli.list_tags {
        commands::list_tags::run(&registry);
        return Ok(ExitCode::SUCCESS);
    }

    let result = commands::check::run(&registry, &config, &states);
    commands::output::print(&result, OutputFormat::from_config(&config), config.colored)?;

    if result.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}

/// Installs the log subscriber; `RUST_LOG` overrides the verbosity level.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints a fatal error; configuration errors get a full diagnostic.
fn report(err: anyhow::Error) {
    match err.downcast::<ConfigError>() {
        Ok(config_err) => eprintln!("{:?}", miette::Report::new(config_err)),
        Err(err) => eprintln!("Error: {err:#}"),
    }
}
