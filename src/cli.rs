use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::editor::CellTarget;

#[derive(Parser)]
#[command(name = "formgrid")]
#[command(about = "Edit the line-items table of business forms and submit them")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the built-in forms
    Forms,

    /// Create a new draft for a form
    New {
        /// Form id (see `formgrid forms`)
        #[arg(short, long)]
        form: String,

        /// Draft file to write (defaults to the draft directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add a user-defined column to the table
    AddColumn {
        /// Draft file
        #[arg(short, long)]
        draft: PathBuf,

        /// Column label; the key is the label without whitespace
        #[arg(short, long)]
        label: String,
    },

    /// Remove a user-defined column (row values are kept)
    RemoveColumn {
        #[arg(short, long)]
        draft: PathBuf,

        /// Column key
        #[arg(short, long)]
        key: String,
    },

    /// Append a blank row
    AddRow {
        #[arg(short, long)]
        draft: PathBuf,
    },

    /// Remove the row at a position (0-based)
    RemoveRow {
        #[arg(short, long)]
        draft: PathBuf,

        #[arg(short, long)]
        index: usize,
    },

    /// Set a header field, a fixed table field, or a dynamic column value
    Set {
        #[arg(short, long)]
        draft: PathBuf,

        /// Row index; omit to set a header field
        #[arg(short, long)]
        row: Option<usize>,

        /// Field name or column key
        #[arg(short, long)]
        field: String,

        /// Treat FIELD as a dynamic column key
        #[arg(long)]
        dynamic: bool,

        /// Value, read according to the field's kind
        #[arg(short, long)]
        value: String,
    },

    /// Capture a typed signature for a signer slot
    Sign {
        #[arg(short, long)]
        draft: PathBuf,

        /// Signer slot label, e.g. "Approved By"
        #[arg(short, long)]
        slot: String,

        /// Typed name
        #[arg(short, long)]
        name: String,

        /// Signing date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Render the form as text or CSV
    Render {
        #[arg(short, long)]
        draft: PathBuf,

        /// Render read-only document output
        #[arg(long)]
        print: bool,

        /// Emit only the table as CSV
        #[arg(long)]
        csv: bool,
    },

    /// Report validation errors without submitting
    Validate {
        #[arg(short, long)]
        draft: PathBuf,
    },

    /// Validate and submit the form
    Submit {
        #[arg(short, long)]
        draft: PathBuf,

        /// Directory for the submitted payload (defaults to the submission directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only log the payload instead of writing it
        #[arg(long)]
        log_only: bool,
    },
}

impl Commands {
    pub fn parse_target(field: &str, dynamic: bool) -> CellTarget {
        if dynamic {
            CellTarget::Dynamic(field.to_string())
        } else {
            CellTarget::Fixed(field.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_leading_zeros_in_text_fields() {
        let cli = Cli::try_parse_from([
            "formgrid", "set", "-d", "draft.json", "-f", "employeeId", "-v", "00123",
        ])
        .unwrap();
        let mut shell = crate::form::FormShell::from_catalog("asset-request").unwrap();
        match cli.command {
            Commands::Set { row: None, field, value, .. } => {
                shell.set_header_input(&field, &value).unwrap();
            }
            _ => panic!("expected header set command"),
        }
        assert_eq!(
            shell.header_value("employeeId"),
            Some(&crate::models::CellValue::from("00123"))
        );
    }

    #[test]
    fn test_cli_parses_set() {
        let cli = Cli::try_parse_from([
            "formgrid", "set", "-d", "draft.json", "-r", "0", "-f", "SerialNo", "--dynamic", "-v",
            "X123",
        ])
        .unwrap();
        match cli.command {
            Commands::Set { row, field, dynamic, .. } => {
                assert_eq!(row, Some(0));
                assert_eq!(Commands::parse_target(&field, dynamic), CellTarget::Dynamic("SerialNo".into()));
            }
            _ => panic!("expected set command"),
        }
    }
}
