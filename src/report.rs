use anyhow::{Context, Result};
use clap::ValueEnum;
use gamedata_assets::Violation;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per violation plus a summary
    Text,
    /// Machine-readable run report
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    /// A table the check needs could not be loaded.
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub name: String,
    pub status: CheckStatus,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckOutcome {
    pub fn completed(name: &str, violations: Vec<Violation>) -> Self {
        let status = if violations.is_empty() {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        };
        Self {
            name: name.to_string(),
            status,
            violations,
            error: None,
        }
    }

    pub fn error(name: &str, error: String) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            violations: Vec::new(),
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub checks: Vec<CheckOutcome>,
    pub passed: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn from_outcomes(checks: Vec<CheckOutcome>) -> Self {
        let passed = checks
            .iter()
            .filter(|check| check.status == CheckStatus::Pass)
            .count();
        let failed = checks.len() - passed;
        Self {
            checks,
            passed,
            failed,
        }
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(self).context("Failed to encode run report")?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for check in &self.checks {
            if let Some(error) = &check.error {
                let _ = writeln!(out, "[{}] error: {error}", check.name);
            }
            for violation in &check.violations {
                let _ = writeln!(out, "[{}] {violation}", check.name);
            }
        }
        let _ = writeln!(
            out,
            "{} checks, {} passed, {} failed",
            self.checks.len(),
            self.passed,
            self.failed
        );
        out
    }
}
