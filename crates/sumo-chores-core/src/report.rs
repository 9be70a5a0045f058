//! GitHub Actions step outputs for task results.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::models::RoleMembership;
use crate::reconcile::ReconcileOutcome;

const MULTILINE_DELIMITER: &str = "EOF";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered key/value outputs. Re-inserting a key replaces its value in place.
pub struct ReportOutputs {
    entries: Vec<(String, String)>,
}

impl ReportOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn extend(&mut self, other: ReportOutputs) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn role_report_outputs(memberships: &[RoleMembership]) -> serde_json::Result<ReportOutputs> {
    let mut outputs = ReportOutputs::new();
    outputs.insert("users_with_role", serde_json::to_string(memberships)?);
    outputs.insert("users_count", memberships.len());
    Ok(outputs)
}

/// `github_issues` is only present when at least one issue was filed or found.
pub fn monitor_report_outputs(outcome: &ReconcileOutcome) -> serde_json::Result<ReportOutputs> {
    let mut outputs = ReportOutputs::new();
    outputs.insert(
        "non_compliant_monitors",
        serde_json::to_string(&outcome.violations)?,
    );
    outputs.insert("non_compliant_count", outcome.violations.len());
    if !outcome.issues.is_empty() {
        outputs.insert("github_issues", serde_json::to_string(&outcome.issues)?);
    }
    Ok(outputs)
}

/// Render outputs in the `$GITHUB_OUTPUT` file format.
pub fn render_github_output(outputs: &ReportOutputs) -> String {
    let mut rendered = String::new();
    for (key, value) in outputs.iter() {
        if value.contains('\n') {
            rendered.push_str(&format!(
                "{key}<<{MULTILINE_DELIMITER}\n{value}\n{MULTILINE_DELIMITER}\n"
            ));
        } else {
            rendered.push_str(&format!("{key}={value}\n"));
        }
    }
    rendered
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Not running inside GitHub Actions.
    Disabled,
    /// Runner without `GITHUB_OUTPUT`; fall back to `::set-output` commands.
    LegacyCommands,
    File(PathBuf),
}

impl OutputTarget {
    pub fn resolve(github_actions: Option<&str>, github_output: Option<&str>) -> Self {
        if github_actions != Some("true") {
            return Self::Disabled;
        }
        match github_output
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::LegacyCommands,
        }
    }
}

pub fn emit_report(
    outputs: &ReportOutputs,
    target: &OutputTarget,
    stdout: &mut dyn Write,
) -> io::Result<()> {
    match target {
        OutputTarget::Disabled => {
            tracing::info!("not running in GitHub Actions, skipping output setting");
            Ok(())
        }
        OutputTarget::LegacyCommands => {
            tracing::warn!("GITHUB_OUTPUT is not set, using ::set-output commands");
            for (key, value) in outputs.iter() {
                writeln!(stdout, "::set-output name={key}::{value}")?;
            }
            stdout.flush()
        }
        OutputTarget::File(path) => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(render_github_output(outputs).as_bytes())?;
            tracing::debug!(
                path = %path.display(),
                outputs = outputs.len(),
                "wrote step outputs"
            );
            Ok(())
        }
    }
}
