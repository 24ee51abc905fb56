//! Column naming rules for user-defined columns

use std::fmt;

/// Derive a column key from a free-text label by stripping all whitespace
pub fn normalize_key(label: &str) -> String {
    label.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Why a proposed column was not added
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Label was empty, whitespace only, or the prompt was cancelled
    EmptyLabel,
    /// Another column already uses this key
    DuplicateKey(String),
}

impl RejectReason {
    /// Whether the user should be told about the rejection
    pub fn should_notify(&self) -> bool {
        !matches!(self, RejectReason::EmptyLabel)
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::EmptyLabel => f.write_str("column name is empty"),
            RejectReason::DuplicateKey(key) => write!(f, "column '{}' already exists", key),
        }
    }
}

/// Result of proposing a new column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnProposal {
    Accepted(String),
    Rejected(RejectReason),
}

impl ColumnProposal {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ColumnProposal::Accepted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key_strips_whitespace() {
        assert_eq!(normalize_key("Serial No"), "SerialNo");
        assert_eq!(normalize_key("  Warranty \t End  Date "), "WarrantyEndDate");
        assert_eq!(normalize_key("   "), "");
    }

    #[test]
    fn test_empty_label_is_silent() {
        assert!(!RejectReason::EmptyLabel.should_notify());
        assert!(RejectReason::DuplicateKey("SerialNo".into()).should_notify());
    }
}
