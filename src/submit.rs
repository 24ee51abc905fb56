//! Submission hook and the handlers shipped with the crate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::form::{FormState, ValidationReport};

/// Final assembled record passed to the submit hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub form_id: String,
    pub instance_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub state: FormState,
}

impl Submission {
    pub fn new(state: FormState) -> Self {
        Self {
            form_id: state.form_id.clone(),
            instance_id: state.instance_id,
            submitted_at: Utc::now(),
            state,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}-{}.json", self.form_id, self.instance_id)
    }
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Form has {} validation error(s): {0}", .0.len())]
    Invalid(ValidationReport),

    #[error("Failed to serialize submission: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Receives the final record once validation passes
pub trait SubmitHandler {
    fn on_submit(&mut self, submission: &Submission) -> Result<(), SubmitError>;
}

impl<F> SubmitHandler for F
where
    F: FnMut(&Submission),
{
    fn on_submit(&mut self, submission: &Submission) -> Result<(), SubmitError> {
        self(submission);
        Ok(())
    }
}

/// Logs the assembled payload and does nothing else
#[derive(Debug, Default)]
pub struct LogSubmitter;

impl SubmitHandler for LogSubmitter {
    fn on_submit(&mut self, submission: &Submission) -> Result<(), SubmitError> {
        let payload = serde_json::to_string(submission)?;
        info!(form = %submission.form_id, "Form submitted: {}", payload);
        Ok(())
    }
}

/// Writes each submission as pretty JSON into a directory
#[derive(Debug)]
pub struct JsonFileSubmitter {
    dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl JsonFileSubmitter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_written: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the most recent submission written
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

impl SubmitHandler for JsonFileSubmitter {
    fn on_submit(&mut self, submission: &Submission) -> Result<(), SubmitError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(submission.file_name());
        let payload = serde_json::to_string_pretty(submission)?;
        std::fs::write(&path, payload)?;
        info!("Wrote submission to {}", path.display());
        self.last_written = Some(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormShell;
    use tempfile::TempDir;

    #[test]
    fn test_json_file_submitter_writes_payload() {
        let dir = TempDir::new().unwrap();
        let state = FormShell::from_catalog("vendor-summary").unwrap().state;
        let submission = Submission::new(state);

        let mut handler = JsonFileSubmitter::new(dir.path().join("out"));
        handler.on_submit(&submission).unwrap();

        let path = handler.last_written().unwrap();
        assert!(path.ends_with(submission.file_name()));
        let written: Submission =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, submission);
    }

    #[test]
    fn test_log_submitter_accepts_any_state() {
        let state = FormShell::from_catalog("tax-assessment").unwrap().state;
        LogSubmitter.on_submit(&Submission::new(state)).unwrap();
    }

    #[test]
    fn test_invalid_error_message_counts_errors() {
        let shell = FormShell::from_catalog("tax-assessment").unwrap();
        let err = SubmitError::Invalid(shell.validate());
        assert!(err.to_string().starts_with("Form has 5 validation error(s)"));
    }
}
