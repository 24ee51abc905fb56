//! Table state and its in-place operations

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::columns::{normalize_key, ColumnProposal, RejectReason};
use super::errors::EditorError;
use crate::models::{CellValue, ColumnDescriptor, FieldSpec, Row};

/// Fixed columns of a line-items table and its summary settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub title: String,
    pub fixed_fields: Vec<FieldSpec>,
    /// Fixed field whose distinct values are counted in the summary
    #[serde(default)]
    pub tally_field: Option<String>,
    /// (minuend, subtrahend) fields whose difference is reported per row
    #[serde(default)]
    pub variance_fields: Option<(String, String)>,
}

impl TableSchema {
    pub fn new(title: &str, fixed_fields: Vec<FieldSpec>) -> Self {
        Self {
            title: title.to_string(),
            fixed_fields,
            tally_field: None,
            variance_fields: None,
        }
    }

    pub fn with_tally(mut self, field: &str) -> Self {
        self.tally_field = Some(field.to_string());
        self
    }

    pub fn with_variance(mut self, minuend: &str, subtrahend: &str) -> Self {
        self.variance_fields = Some((minuend.to_string(), subtrahend.to_string()));
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fixed_fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn blank_row(&self) -> Row {
        Row::blank(self.fixed_fields.iter().map(|f| f.name.as_str()))
    }
}

/// Address of a writable slot within a row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellTarget {
    Fixed(String),
    Dynamic(String),
}

/// Row list and column list of one table instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    pub schema: TableSchema,
    pub rows: Vec<Row>,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableState {
    /// Empty table with no rows and no user-defined columns
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Table with a single blank seed row
    pub fn seeded(schema: TableSchema) -> Self {
        let mut state = Self::new(schema);
        state.add_row();
        state
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.key == key)
    }

    pub fn column(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Check column keys of state built outside `add_column`, e.g. a loaded draft
    pub fn check_columns(&self) -> Result<(), EditorError> {
        let mut seen = std::collections::HashSet::new();
        for column in &self.columns {
            if column.key.is_empty() || normalize_key(&column.key) != column.key {
                return Err(EditorError::InvalidColumnKey(column.key.clone()));
            }
            if !seen.insert(column.key.as_str()) {
                return Err(EditorError::DuplicateColumn(column.key.clone()));
            }
        }
        Ok(())
    }

    /// Propose a new column from a free-text label
    pub fn add_column(&mut self, label: &str) -> ColumnProposal {
        let key = normalize_key(label);
        if key.is_empty() {
            return ColumnProposal::Rejected(RejectReason::EmptyLabel);
        }
        if self.has_column(&key) {
            warn!("Rejected column '{}': key '{}' already exists", label, key);
            return ColumnProposal::Rejected(RejectReason::DuplicateKey(key));
        }

        info!("Added column '{}' (key {})", label, key);
        self.columns.push(ColumnDescriptor {
            key: key.clone(),
            label: label.to_string(),
        });
        ColumnProposal::Accepted(key)
    }

    /// Remove a column descriptor. Values stored under the key stay in the rows.
    pub fn remove_column(&mut self, key: &str) -> bool {
        let before = self.columns.len();
        self.columns.retain(|c| c.key != key);
        let removed = self.columns.len() != before;
        if removed {
            info!("Removed column {}", key);
        }
        removed
    }

    /// Append a blank row and return its index
    pub fn add_row(&mut self) -> usize {
        self.rows.push(self.schema.blank_row());
        self.rows.len() - 1
    }

    /// Append a row seeded with the given fixed-field values
    pub fn add_row_with<I, K, V>(&mut self, values: I) -> Result<usize, EditorError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        let mut row = self.schema.blank_row();
        for (name, value) in values {
            let name = name.into();
            if !self.schema.has_field(&name) {
                return Err(EditorError::UnknownField(name));
            }
            row.fields.insert(name, value.into());
        }
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    /// Remove the row at `index`; later rows shift down by one
    pub fn remove_row(&mut self, index: usize) -> Result<Row, EditorError> {
        self.check_row(index)?;
        info!("Removed row {}", index);
        Ok(self.rows.remove(index))
    }

    /// Write a fixed-field or dynamic-column slot on one row
    pub fn set_cell_value(
        &mut self,
        row_index: usize,
        target: &CellTarget,
        value: CellValue,
    ) -> Result<(), EditorError> {
        self.check_row(row_index)?;
        if let CellTarget::Fixed(name) = target {
            if !self.schema.has_field(name) {
                return Err(EditorError::UnknownField(name.clone()));
            }
        }

        let row = &mut self.rows[row_index];
        match target {
            CellTarget::Fixed(name) => {
                debug!("Set row {} field {} = {}", row_index, name, value);
                row.fields.insert(name.clone(), value);
            }
            CellTarget::Dynamic(key) => {
                debug!("Set row {} column {} = {}", row_index, key, value);
                row.dynamic_fields.insert(key.clone(), value);
            }
        }
        Ok(())
    }

    /// Current value of a slot, if the row exists and the slot has been written
    pub fn cell_value(&self, row_index: usize, target: &CellTarget) -> Option<&CellValue> {
        let row = self.rows.get(row_index)?;
        match target {
            CellTarget::Fixed(name) => row.field(name),
            CellTarget::Dynamic(key) => row.dynamic(key),
        }
    }

    /// Writable slots in display order: fixed fields then current columns
    pub fn targets(&self) -> Vec<CellTarget> {
        self.schema
            .fixed_fields
            .iter()
            .map(|f| CellTarget::Fixed(f.name.clone()))
            .chain(self.columns.iter().map(|c| CellTarget::Dynamic(c.key.clone())))
            .collect()
    }

    fn check_row(&self, index: usize) -> Result<(), EditorError> {
        if index >= self.rows.len() {
            return Err(EditorError::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }
}
