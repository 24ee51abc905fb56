//! Summary figures shown under a table: per-value tallies and variances

use std::collections::BTreeMap;

use crate::editor::TableState;
use crate::models::Row;

/// Count rows per distinct non-blank value of a fixed field
pub fn tally(table: &TableState, field: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in table.rows.iter().filter_map(|r| r.field(field)) {
        if value.is_blank() {
            continue;
        }
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// `minuend - subtrahend` for one row; blank or non-numeric inputs yield `None`
pub fn variance(row: &Row, minuend: &str, subtrahend: &str) -> Option<f64> {
    let a = row.field(minuend).filter(|v| !v.is_blank())?.as_number()?;
    let b = row.field(subtrahend).filter(|v| !v.is_blank())?.as_number()?;
    Some(a - b)
}

/// Sum of row variances, skipping rows without one
pub fn total_variance(table: &TableState, minuend: &str, subtrahend: &str) -> f64 {
    table
        .rows
        .iter()
        .filter_map(|r| variance(r, minuend, subtrahend))
        .sum()
}

/// Summary lines configured by the table schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSummary {
    pub row_count: usize,
    pub tally: Option<(String, BTreeMap<String, usize>)>,
    pub total_variance: Option<f64>,
}

pub fn summarize(table: &TableState) -> TableSummary {
    TableSummary {
        row_count: table.row_count(),
        tally: table
            .schema
            .tally_field
            .as_ref()
            .map(|field| (field.clone(), tally(table, field))),
        total_variance: table
            .schema
            .variance_fields
            .as_ref()
            .map(|(a, b)| total_variance(table, a, b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::TableSchema;
    use crate::models::FieldSpec;

    fn cases() -> TableState {
        let mut table = TableState::new(
            TableSchema::new(
                "Cases",
                vec![
                    FieldSpec::number("assessed", "Assessed"),
                    FieldSpec::number("paid", "Paid"),
                    FieldSpec::text("status", "Status"),
                ],
            )
            .with_tally("status")
            .with_variance("assessed", "paid"),
        );
        table
            .add_row_with([("assessed", "1000"), ("paid", "400"), ("status", "Open")])
            .unwrap();
        table
            .add_row_with([("assessed", "250"), ("paid", "250"), ("status", "Closed")])
            .unwrap();
        table
            .add_row_with([("assessed", "90"), ("status", "Open")])
            .unwrap();
        table.add_row();
        table
    }

    #[test]
    fn test_tally_skips_blank() {
        let counts = tally(&cases(), "status");
        assert_eq!(counts.get("Open"), Some(&2));
        assert_eq!(counts.get("Closed"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_variance_requires_both_values() {
        let table = cases();
        assert_eq!(variance(&table.rows[0], "assessed", "paid"), Some(600.0));
        assert_eq!(variance(&table.rows[1], "assessed", "paid"), Some(0.0));
        assert_eq!(variance(&table.rows[2], "assessed", "paid"), None);
        assert_eq!(total_variance(&table, "assessed", "paid"), 600.0);
    }

    #[test]
    fn test_variance_ignores_nan_text() {
        let mut table = cases();
        let row = table
            .add_row_with([("assessed", "NaN"), ("paid", "1")])
            .unwrap();
        assert_eq!(variance(&table.rows[row], "assessed", "paid"), None);
        assert_eq!(total_variance(&table, "assessed", "paid"), 600.0);
    }

    #[test]
    fn test_summarize_uses_schema() {
        let summary = summarize(&cases());
        assert_eq!(summary.row_count, 4);
        assert_eq!(summary.total_variance, Some(600.0));
        let (field, counts) = summary.tally.unwrap();
        assert_eq!(field, "status");
        assert_eq!(counts["Open"], 2);
    }
}
