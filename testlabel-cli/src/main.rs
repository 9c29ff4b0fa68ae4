//! testlabel CLI — extract test labels from compiled test artifacts and
//! upload them as CSV reports.
//!
//! Usage: `testlabel <REPOSITORY_NAME> <ASSEMBLY_PATHS>`
//!
//! `ASSEMBLY_PATHS` is one comma-separated string of module manifest paths.
//! Exit status is 0 only when both the fixture and test reports uploaded.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use testlabel_runner::{run_report, Invocation, PublishConfig, S3Store};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Environment variable naming an optional publishing config file.
const CONFIG_ENV: &str = "TESTLABEL_CONFIG";

#[derive(Parser)]
#[command(
    name = "testlabel",
    about = "testlabel — report fixture ownership, categories and environments of compiled tests"
)]
struct Cli {
    /// Repository label written into every row and into the object keys.
    #[arg(allow_hyphen_values = true)]
    repository_name: Option<String>,

    /// Comma-separated module manifest paths, one per compiled test artifact.
    #[arg(allow_hyphen_values = true)]
    assembly_paths: Option<String>,

    /// Anything after the two positionals is accepted and ignored.
    #[arg(hide = true, allow_hyphen_values = true)]
    #[allow(dead_code)]
    extra: Vec<String>,
}

fn main() -> ExitCode {
    init_logging();
    let (status, stdout) = run_cli(std::env::args_os());
    print!("{stdout}");
    ExitCode::from(status)
}

/// Parse `args` and run one report. Returns the exit status and whatever
/// belongs on stdout.
fn run_cli<I, T>(args: I) -> (u8, String)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let invocation = match Invocation::new(cli.repository_name, cli.assembly_paths) {
        Ok(invocation) => invocation,
        Err(missing) => return (FAILURE, format!("{missing}\n")),
    };

    match run(&invocation) {
        Ok(true) => (0, String::new()),
        Ok(false) => (FAILURE, String::new()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            (FAILURE, String::new())
        }
    }
}

fn run(invocation: &Invocation) -> Result<bool> {
    let config = load_config()?;
    let store = S3Store::connect(&config.region).context("failed to set up S3 client")?;

    let outcome = run_report(invocation, &store, &config, Utc::now())?;
    if !outcome.succeeded() {
        error!(
            fixtures_uploaded = outcome.fixtures_uploaded,
            tests_uploaded = outcome.tests_uploaded,
            "report run failed"
        );
    }
    Ok(outcome.succeeded())
}

fn load_config() -> Result<PublishConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            PublishConfig::from_file(&path)
                .with_context(|| format!("failed to load {CONFIG_ENV}={}", path.display()))
        }
        None => Ok(PublishConfig::default()),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

// -1 as seen by the OS.
const FAILURE: u8 = 255;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_accepts_no_arguments() {
        let cli = Cli::try_parse_from(["testlabel"]).unwrap();
        assert!(cli.repository_name.is_none());
        assert!(cli.assembly_paths.is_none());
        assert!(Invocation::new(cli.repository_name, cli.assembly_paths).is_err());
    }

    #[test]
    fn cli_reads_positionals_in_order() {
        let cli = Cli::try_parse_from(["testlabel", "care", "a.json,b.json"]).unwrap();
        assert_eq!(cli.repository_name.as_deref(), Some("care"));
        assert_eq!(cli.assembly_paths.as_deref(), Some("a.json,b.json"));
    }

    #[test]
    fn missing_repository_name_prints_and_exits_255() {
        assert_eq!(
            run_cli(["testlabel"]),
            (255, "Error: input RepositoryName is null\n".to_string())
        );
    }

    #[test]
    fn missing_assembly_paths_prints_and_exits_255() {
        assert_eq!(
            run_cli(["testlabel", "care"]),
            (255, "Error: input AssemblyPaths is null\n".to_string())
        );
    }

    #[test]
    fn dash_leading_values_and_extra_arguments_are_accepted() {
        let cli =
            Cli::try_parse_from(["testlabel", "-care", "-a.json", "extra", "--more"]).unwrap();
        assert_eq!(cli.repository_name.as_deref(), Some("-care"));
        assert_eq!(cli.assembly_paths.as_deref(), Some("-a.json"));
        assert_eq!(cli.extra, vec!["extra", "--more"]);
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
