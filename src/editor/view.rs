//! Pure projection of a table into headers and cells

use super::state::{CellTarget, TableState};
use crate::models::{CellValue, DisplayMode, FieldKind};

/// Header of the action column shown in edit mode
pub const ACTION_HEADER: &str = "Action";

/// One rendered cell
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCell {
    /// Static text; blank when the slot has no value
    Text(String),
    /// Editable control bound to a slot
    Input {
        target: CellTarget,
        value: String,
        kind: FieldKind,
    },
    /// Remove button for the row at this index
    RemoveRow(usize),
}

impl ViewCell {
    pub fn is_control(&self) -> bool {
        !matches!(self, ViewCell::Text(_))
    }

    /// Text to show for the cell
    pub fn display(&self) -> &str {
        match self {
            ViewCell::Text(text) => text,
            ViewCell::Input { value, .. } => value,
            ViewCell::RemoveRow(_) => "Remove",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub index: usize,
    pub cells: Vec<ViewCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub title: String,
    pub mode: DisplayMode,
    pub headers: Vec<String>,
    pub rows: Vec<ViewRow>,
}

impl TableView {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn has_controls(&self) -> bool {
        self.rows.iter().flat_map(|r| &r.cells).any(ViewCell::is_control)
    }
}

/// Project the table for the given mode
pub fn project(state: &TableState, mode: DisplayMode) -> TableView {
    let mut headers: Vec<String> = state
        .schema
        .fixed_fields
        .iter()
        .map(|f| f.label.clone())
        .collect();
    headers.extend(state.columns.iter().map(|c| c.label.clone()));
    if !mode.is_print() {
        headers.push(ACTION_HEADER.to_string());
    }

    let rows = state
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let fixed = state.schema.fixed_fields.iter().map(|field| {
                let value = row.field(&field.name);
                cell(mode, CellTarget::Fixed(field.name.clone()), value, field.kind.clone())
            });
            let dynamic = state.columns.iter().map(|column| {
                let value = row.dynamic(&column.key);
                cell(mode, CellTarget::Dynamic(column.key.clone()), value, FieldKind::Text)
            });

            let mut cells: Vec<ViewCell> = fixed.chain(dynamic).collect();
            if !mode.is_print() {
                cells.push(ViewCell::RemoveRow(index));
            }
            ViewRow { index, cells }
        })
        .collect();

    TableView {
        title: state.schema.title.clone(),
        mode,
        headers,
        rows,
    }
}

fn cell(mode: DisplayMode, target: CellTarget, value: Option<&CellValue>, kind: FieldKind) -> ViewCell {
    let value = value.map(|v| v.to_string()).unwrap_or_default();
    match mode {
        DisplayMode::Print => ViewCell::Text(value),
        DisplayMode::Edit => ViewCell::Input { target, value, kind },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::state::TableSchema;
    use crate::models::FieldSpec;

    fn sample() -> TableState {
        let mut state = TableState::new(TableSchema::new(
            "Requested Items",
            vec![
                FieldSpec::text("assetDescription", "Asset Description"),
                FieldSpec::number("quantity", "Quantity"),
            ],
        ));
        state
            .add_row_with([("assetDescription", "Laptop")])
            .unwrap();
        state.add_row();
        state.add_column("Serial No");
        state.add_column("Warranty");
        state
            .set_cell_value(0, &CellTarget::Dynamic("SerialNo".into()), "X123".into())
            .unwrap();
        state
    }

    #[test]
    fn test_edit_mode_headers_and_controls() {
        let view = project(&sample(), DisplayMode::Edit);
        assert_eq!(
            view.headers,
            vec!["Asset Description", "Quantity", "Serial No", "Warranty", "Action"]
        );
        assert_eq!(view.rows.len(), 2);
        for row in &view.rows {
            assert_eq!(row.cells.len(), view.column_count());
            assert_eq!(row.cells.last(), Some(&ViewCell::RemoveRow(row.index)));
        }
        assert_eq!(view.rows[0].cells[2].display(), "X123");
    }

    #[test]
    fn test_missing_dynamic_value_renders_blank() {
        let view = project(&sample(), DisplayMode::Print);
        // Row 0 has no Warranty value, row 1 has no dynamic values at all
        assert_eq!(view.rows[0].cells[3], ViewCell::Text(String::new()));
        assert_eq!(view.rows[1].cells[2], ViewCell::Text(String::new()));
    }

    #[test]
    fn test_print_mode_has_no_controls() {
        let mut state = sample();
        state.remove_column("Warranty");
        let view = project(&state, DisplayMode::Print);
        assert!(!view.has_controls());
        assert!(!view.headers.iter().any(|h| h == ACTION_HEADER));
        assert_eq!(view.headers.len(), 3);
        assert!(view.rows.iter().all(|r| r.cells.len() == 3));
    }

    #[test]
    fn test_removed_column_value_is_not_displayed() {
        let mut state = sample();
        state.remove_column("SerialNo");
        let view = project(&state, DisplayMode::Print);
        assert!(view
            .rows
            .iter()
            .flat_map(|r| &r.cells)
            .all(|c| c.display() != "X123"));
        assert_eq!(
            state.row(0).unwrap().dynamic("SerialNo"),
            Some(&CellValue::from("X123"))
        );
    }

    #[test]
    fn test_empty_table_projects_headers_only() {
        let state = TableState::new(TableSchema::new(
            "Cases",
            vec![FieldSpec::text("caseNo", "Case No")],
        ));
        let view = project(&state, DisplayMode::Edit);
        assert_eq!(view.headers, vec!["Case No", "Action"]);
        assert!(view.rows.is_empty());
    }
}
