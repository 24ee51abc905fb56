//! Field-level validation for header fields and fixed table cells

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{CellValue, FieldKind, FieldSpec};

/// Where a validation error was found
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldLocation {
    Header(String),
    Cell { row: usize, field: String },
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldLocation::Header(name) => write!(f, "{}", name),
            FieldLocation::Cell { row, field } => write!(f, "row {} {}", row + 1, field),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub location: FieldLocation,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Collected validation errors; submission is blocked while any remain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, location: FieldLocation, message: String) {
        self.errors.push(FieldError { location, message });
    }

    /// Error for a specific location, for inline display next to the field
    pub fn error_at(&self, location: &FieldLocation) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| &e.location == location)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        f.write_str(&lines.join("; "))
    }
}

/// Check one value against its field spec
pub fn validate_value(spec: &FieldSpec, value: Option<&CellValue>) -> Result<(), String> {
    let value = match value {
        Some(v) if !v.is_blank() => v,
        _ => {
            if spec.required {
                return Err(format!("{} is required", spec.label));
            }
            return Ok(());
        }
    };

    match &spec.kind {
        FieldKind::Text => Ok(()),
        FieldKind::Number => value
            .as_number()
            .map(|_| ())
            .ok_or_else(|| format!("{} must be a number", spec.label)),
        FieldKind::Date => {
            let text = value.to_string();
            NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| format!("Invalid date format (YYYY-MM-DD) for {}", spec.label))
        }
        FieldKind::Select(options) => {
            let text = value.to_string();
            if options.iter().any(|o| o == &text) {
                Ok(())
            } else {
                Err(format!("{} must be one of: {}", spec.label, options.join(", ")))
            }
        }
    }
}

/// Validate a set of named values against their specs
pub fn validate_fields<F>(
    specs: &[FieldSpec],
    values: &BTreeMap<String, CellValue>,
    location: F,
    report: &mut ValidationReport,
) where
    F: Fn(&str) -> FieldLocation,
{
    for spec in specs {
        if let Err(message) = validate_value(spec, values.get(&spec.name)) {
            report.push(location(&spec.name), message);
        }
    }
}
