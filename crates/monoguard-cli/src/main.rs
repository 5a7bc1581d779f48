//! CLI entry point for monoguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `monoguard-app` crate.

mod logging;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use futures::executor::block_on;
use monoguard_app::{
    CheckInput, exit_code, format_failures, format_summary, list_rules, locate_config,
    parse_config, partial_reports, run_check,
};
use monoguard_repo::FsDiscovery;
use monoguard_settings::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "monoguard",
    version,
    about = "Structural rule checks for npm-style monorepos"
)]
struct Cli {
    /// Directory to run from (defaults to the current directory).
    #[arg(long)]
    cwd: Option<Utf8PathBuf>,

    /// Path to the config TOML (defaults to monoguard.toml at the workspace root).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Log every checked scope.
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the workspace, the current package, or the packages containing PATHS.
    Check {
        /// Files whose containing directories should be checked.
        paths: Vec<Utf8PathBuf>,

        /// Print timing tables and per-rule-type stats after the run.
        #[arg(long)]
        stats: bool,
    },

    /// List the built-in rule types.
    ListRules,

    /// Print the JSON schema of the config file.
    Schema,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.cmd {
        Commands::Check { ref paths, stats } => cmd_check(&cli, paths, stats),
        Commands::ListRules => cmd_list_rules(&cli),
        Commands::Schema => cmd_schema(&cli),
    };

    let code = exit_status(result);
    if code != 0 {
        std::process::exit(code);
    }
}

/// Map a command's result to a process exit code, reporting errors on stderr.
///
/// Scopes that were checked before a run aborted still have their failures printed.
fn exit_status(result: anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(err) => {
            let partial = partial_reports(&err);
            if !partial.is_empty() {
                print!("{}", format_failures(partial));
            }
            eprintln!("monoguard error: {err:#}");
            1
        }
    }
}

fn cmd_check(cli: &Cli, paths: &[Utf8PathBuf], stats: bool) -> anyhow::Result<i32> {
    let cwd = resolve_cwd(cli.cwd.as_deref())?;
    let discovery = FsDiscovery;

    // An explicit --config must exist; the default location may be absent.
    let config_path = match &cli.config {
        Some(path) => Some(cwd.join(path)),
        None => locate_config(&cwd, &discovery).context("locate config")?,
    };
    let config_text = match &config_path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("read {}", path))?,
        None => String::new(),
    };
    let config = parse_config(&config_text)?;

    logging::init(cli.verbose || config.verbose.unwrap_or(false));

    let input = CheckInput {
        cwd: &cwd,
        config,
        overrides: Overrides {
            verbose: cli.verbose.then_some(true),
        },
        paths: (!paths.is_empty()).then(|| paths.to_vec()),
        report_stats: stats,
    };
    let output = block_on(run_check(input, &discovery))?;

    print!("{}", format_failures(&output.reports));
    if let Some(stats) = &output.stats {
        println!();
        print!("{stats}");
        println!();
    }
    println!("{}", format_summary(&output.reports));

    Ok(exit_code(output.passed))
}

fn cmd_list_rules(cli: &Cli) -> anyhow::Result<i32> {
    logging::init(cli.verbose);
    print!("{}", list_rules(&monoguard_rules::builtin_catalog()));
    Ok(0)
}

fn cmd_schema(cli: &Cli) -> anyhow::Result<i32> {
    logging::init(cli.verbose);
    println!("{}", monoguard_settings::config_json_schema()?);
    Ok(0)
}

fn resolve_cwd(cwd: Option<&Utf8Path>) -> anyhow::Result<Utf8PathBuf> {
    match cwd {
        Some(dir) => dir
            .canonicalize_utf8()
            .with_context(|| format!("cwd does not exist: {}", dir)),
        None => {
            let dir = std::env::current_dir().context("read current directory")?;
            Utf8PathBuf::from_path_buf(dir)
                .map_err(|p| anyhow::anyhow!("current directory is not UTF-8: {}", p.display()))
        }
    }
}
