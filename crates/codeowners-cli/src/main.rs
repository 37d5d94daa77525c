//! CODEOWNERS Resolver CLI
//!
//! A command-line tool for asking who owns a path according to a GitHub
//! CODEOWNERS file.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode as StdExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::config::{ExitCode, ValidatedConfig};
use cli::output::{
    Explanation, FormatReport, HumanOutput, PathOwnership, TokenEntry, UnownedReport, write_json,
};
use cli::{Args, Command};
use codeowners_resolver_core::format::align_owners;
use codeowners_resolver_core::walk::{FileWalkerConfig, list_files};
use codeowners_resolver_core::{
    OwnershipResult, Resolver, collect_owner_names, compile, parse_codeowners, scan_document,
};

fn main() -> StdExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.verbose, args.json);

    let exit_code = run(args);
    StdExitCode::from(i32::from(exit_code) as u8)
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Run a command with the given arguments.
fn run(args: Args) -> ExitCode {
    let mut stderr = io::stderr().lock();

    // Validate configuration
    let config = match ValidatedConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            let use_colors = !args.json && io::stderr().is_terminal();
            write_error(&mut stderr, &e.to_string(), use_colors);
            return ExitCode::StartupFailure;
        }
    };

    debug!("Validated configuration: {:?}", config);
    info!("Repository path: {}", config.repo_path.display());
    info!("CODEOWNERS file: {}", config.codeowners_path.display());

    let content = match config.read_codeowners() {
        Ok(content) => content,
        Err(e) => {
            let use_colors = !config.json_output && io::stderr().is_terminal();
            write_error(&mut stderr, &e.to_string(), use_colors);
            return ExitCode::StartupFailure;
        }
    };

    let result = match &args.command {
        Command::Owners { paths } => run_owners(&config, &content, paths),
        Command::Explain { path } => run_explain(&config, &content, path),
        Command::Unowned { include_ignored } => run_unowned(&config, &content, *include_ignored),
        Command::Tokens => run_tokens(&config, &content),
        Command::Names => run_names(&config, &content),
        Command::Fmt { check } => run_fmt(&config, &content, *check),
    };

    match result {
        Ok(code) => code,
        Err(CommandError::Config(e)) => {
            let use_colors = !config.json_output && io::stderr().is_terminal();
            write_error(&mut stderr, &e.to_string(), use_colors);
            ExitCode::StartupFailure
        }
        Err(CommandError::Io(e)) => {
            error!("Failed to write output: {}", e);
            ExitCode::StartupFailure
        }
    }
}

/// Failures while running a command after startup.
#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error(transparent)]
    Config(#[from] cli::config::ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

type CommandResult = Result<ExitCode, CommandError>;

fn stdout_colors(config: &ValidatedConfig) -> bool {
    !config.json_output && io::stdout().is_terminal()
}

fn run_owners(config: &ValidatedConfig, content: &str, paths: &[PathBuf]) -> CommandResult {
    let resolver = Resolver::new(parse_codeowners(content));
    let name = config.codeowners_name();

    let mut queries = Vec::with_capacity(paths.len());
    for raw in paths {
        queries.push(config.query_path(raw)?);
    }
    let results: Vec<OwnershipResult> = queries
        .iter()
        .map(|q| resolver.resolve(&q.path, q.is_dir))
        .collect();
    let entries: Vec<PathOwnership<'_>> = queries
        .iter()
        .zip(&results)
        .map(|(q, result)| PathOwnership::new(&q.path, q.is_dir, result, &name))
        .collect();

    let mut stdout = io::stdout().lock();
    if config.json_output {
        write_json(&mut stdout, &entries)?;
    } else {
        let mut output = HumanOutput::new(&mut stdout, stdout_colors(config));
        for entry in &entries {
            output.write_ownership(entry)?;
        }
    }
    Ok(ExitCode::Success)
}

fn run_explain(config: &ValidatedConfig, content: &str, path: &Path) -> CommandResult {
    let resolver = Resolver::new(parse_codeowners(content));
    let query = config.query_path(path)?;

    let matching = resolver.matching_rules(&query.path, query.is_dir);
    let scope = matching.last().map(|rule| compile(&rule.pattern).scope());
    debug!("{} rule(s) match '{}'", matching.len(), query.path);
    let explanation = Explanation::new(&query.path, query.is_dir, &matching, scope);

    let mut stdout = io::stdout().lock();
    if config.json_output {
        write_json(&mut stdout, &explanation)?;
    } else {
        HumanOutput::new(&mut stdout, stdout_colors(config)).write_explanation(&explanation)?;
    }
    Ok(ExitCode::Success)
}

fn run_unowned(config: &ValidatedConfig, content: &str, include_ignored: bool) -> CommandResult {
    let resolver = Resolver::new(parse_codeowners(content));
    let walker_config = FileWalkerConfig::for_ownership_report().with_gitignore(!include_ignored);

    info!("Walking {}", config.repo_path.display());
    let files = list_files(&config.repo_path, &walker_config);
    let unowned: Vec<&str> = files
        .iter()
        .filter(|entry| !resolver.resolve(&entry.path, entry.is_dir).is_matched())
        .map(|entry| entry.path.as_str())
        .collect();
    info!("{} of {} file(s) are unowned", unowned.len(), files.len());

    let report = UnownedReport {
        checked: files.len(),
        unowned,
    };
    let mut stdout = io::stdout().lock();
    if config.json_output {
        write_json(&mut stdout, &report)?;
    } else {
        HumanOutput::new(&mut stdout, stdout_colors(config)).write_unowned(&report)?;
    }

    if report.unowned.is_empty() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::ValidationFailed)
    }
}

fn run_tokens(config: &ValidatedConfig, content: &str) -> CommandResult {
    let entries: Vec<TokenEntry<'_>> = scan_document(content)
        .map(|token| {
            let kind = token.kind();
            TokenEntry {
                line: token.line_number + 1,
                column: token.start + 1,
                text: token.text,
                kind: kind.label(),
                url: config.links.url_for(&kind),
            }
        })
        .collect();

    let mut stdout = io::stdout().lock();
    if config.json_output {
        write_json(&mut stdout, &entries)?;
    } else {
        let mut output = HumanOutput::new(&mut stdout, stdout_colors(config));
        for entry in &entries {
            output.write_token(entry)?;
        }
    }
    Ok(ExitCode::Success)
}

fn run_names(config: &ValidatedConfig, content: &str) -> CommandResult {
    let names = collect_owner_names(content);

    let mut stdout = io::stdout().lock();
    if config.json_output {
        write_json(&mut stdout, &names)?;
    } else {
        let mut output = HumanOutput::new(&mut stdout, false);
        for name in &names {
            output.write_line(name)?;
        }
    }
    Ok(ExitCode::Success)
}

fn run_fmt(config: &ValidatedConfig, content: &str, check: bool) -> CommandResult {
    let formatted = align_owners(content, config.alignment_offset);
    let aligned = formatted == content;
    debug!("CODEOWNERS aligned: {}", aligned);

    let mut stdout = io::stdout().lock();
    if config.json_output {
        write_json(
            &mut stdout,
            &FormatReport {
                aligned,
                formatted: &formatted,
            },
        )?;
    } else {
        let mut output = HumanOutput::new(&mut stdout, stdout_colors(config));
        if !check {
            output.write_document(&formatted)?;
        } else if aligned {
            output.write_success("CODEOWNERS file is aligned")?;
        } else {
            output.write_failure("CODEOWNERS file is not aligned")?;
        }
    }

    if check && !aligned {
        Ok(ExitCode::ValidationFailed)
    } else {
        Ok(ExitCode::Success)
    }
}

/// Write an error message to the writer.
fn write_error<W: Write>(writer: &mut W, message: &str, use_colors: bool) {
    let _ = HumanOutput::new(writer, use_colors).write_error(message);
}
