//! gamedata - static validation of game content tables
//!
//! Loads `items.json`, `recipes.json` and `mobs.json` from a data directory and
//! runs every registered check against them.

mod checks;
mod config;
mod report;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use config::ValidatorConfig;
use gamedata_assets::{ContentFiles, ValidationPolicy};
use report::OutputFormat;
use std::{fs, path::PathBuf, process::ExitCode};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Validate game content tables (items, recipes, mobs)", long_about = None)]
struct Args {
    /// Directory containing the content tables (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Configuration file; without it `gamedata.toml` is read when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop each check at its first violation
    #[arg(long, conflicts_with = "collect")]
    fail_fast: bool,

    /// Report every violation of each check
    #[arg(long)]
    collect: bool,

    /// Run only the named check (repeatable)
    #[arg(long = "only", value_name = "CHECK")]
    only: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Effective run settings after merging the config file with CLI flags.
#[derive(Debug, PartialEq)]
struct RunSettings {
    data_dir: PathBuf,
    files: ContentFiles,
    policy: ValidationPolicy,
}

impl RunSettings {
    fn resolve(args: &Args, config: ValidatorConfig) -> Self {
        let policy = if args.fail_fast {
            ValidationPolicy::FailFast
        } else if args.collect {
            ValidationPolicy::Collect
        } else {
            config.policy
        };
        let files = config.content_files();
        Self {
            data_dir: args.data_dir.clone().unwrap_or(config.data_dir),
            files,
            policy,
        }
    }
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout stays clean for reports; RUST_LOG overrides the warn default.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let selected = match checks::select(&args.only) {
        Ok(selected) => selected,
        Err(unknown) => Args::command()
            .error(
                ErrorKind::InvalidValue,
                format!(
                    "unknown check '{unknown}' (registered: {})",
                    checks::names().join(", ")
                ),
            )
            .exit(),
    };

    let config = match ValidatorConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => Args::command()
            .error(ErrorKind::InvalidValue, format!("{err:#}"))
            .exit(),
    };
    let settings = RunSettings::resolve(&args, config);
    info!(
        data_dir = %settings.data_dir.display(),
        policy = ?settings.policy,
        checks = selected.len(),
        "validating content"
    );

    let report = checks::run(
        &settings.data_dir,
        &settings.files,
        &selected,
        settings.policy,
    );
    let rendered = report.render(args.format)?;
    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "wrote report");
        }
        None => print!("{rendered}"),
    }

    Ok(if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gamedata").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_come_from_config() {
        let config = ValidatorConfig {
            data_dir: PathBuf::from("godot/data"),
            policy: ValidationPolicy::FailFast,
            ..ValidatorConfig::default()
        };
        let settings = RunSettings::resolve(&parse(&[]), config);
        assert_eq!(settings.data_dir, PathBuf::from("godot/data"));
        assert_eq!(settings.policy, ValidationPolicy::FailFast);
        assert_eq!(settings.files, ContentFiles::default());
    }

    #[test]
    fn flags_override_config() {
        let config = ValidatorConfig {
            policy: ValidationPolicy::FailFast,
            ..ValidatorConfig::default()
        };
        let args = parse(&["--data-dir", "content", "--collect"]);
        let settings = RunSettings::resolve(&args, config);
        assert_eq!(settings.data_dir, PathBuf::from("content"));
        assert_eq!(settings.policy, ValidationPolicy::Collect);

        let args = parse(&["--fail-fast"]);
        let settings = RunSettings::resolve(&args, ValidatorConfig::default());
        assert_eq!(settings.policy, ValidationPolicy::FailFast);
    }

    #[test]
    fn fail_fast_and_collect_conflict() {
        let err = Args::try_parse_from(["gamedata", "--fail-fast", "--collect"])
            .expect_err("conflicting flags");
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn only_and_format_parse() {
        let args = parse(&["--only", "items", "--only", "mobs", "--format", "json"]);
        assert_eq!(args.only, vec!["items".to_string(), "mobs".to_string()]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.config, None);

        let args = parse(&["--config", "ci.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("ci.toml")));
    }
}
