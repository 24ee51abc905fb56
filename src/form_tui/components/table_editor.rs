//! Line-items table component: cell selection and rendering of a `TableView`

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table, TableState as WidgetState},
    Frame,
};

use crate::editor::{CellTarget, TableState, TableView, ViewCell};
use crate::form::{FieldLocation, ValidationReport};
use crate::form_tui::{traits::Navigable, ui::Styles};

/// Configuration for table display
#[derive(Debug, Clone)]
pub struct TableEditorConfig {
    pub show_borders: bool,
    pub min_column_width: u16,
    pub max_column_width: u16,
}

impl Default for TableEditorConfig {
    fn default() -> Self {
        Self {
            show_borders: true,
            min_column_width: 8,
            max_column_width: 24,
        }
    }
}

/// Selection state over the rows and slots of the table
pub struct TableEditor {
    pub state: WidgetState,
    pub selected_column: usize,
    pub config: TableEditorConfig,
    row_count: usize,
    column_count: usize,
}

impl TableEditor {
    pub fn new(config: TableEditorConfig) -> Self {
        Self {
            state: WidgetState::default(),
            selected_column: 0,
            config,
            row_count: 0,
            column_count: 0,
        }
    }

    /// Keep the selection inside the table after rows or columns change
    pub fn sync(&mut self, table: &TableState) {
        self.row_count = table.row_count();
        self.column_count = table.targets().len();

        let row = match self.state.selected() {
            _ if self.row_count == 0 => None,
            Some(i) => Some(i.min(self.row_count - 1)),
            None => Some(0),
        };
        self.state.select(row);
        self.selected_column = self
            .selected_column
            .min(self.column_count.saturating_sub(1));
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Slot under the cursor
    pub fn selected_target(&self, table: &TableState) -> Option<CellTarget> {
        self.selected_row()?;
        table.targets().into_iter().nth(self.selected_column)
    }

    pub fn move_left(&mut self) {
        self.selected_column = self.selected_column.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.selected_column + 1 < self.column_count {
            self.selected_column += 1;
        }
    }

    /// Render the projected table; `report` marks invalid cells
    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        view: &TableView,
        report: Option<&ValidationReport>,
        focused: bool,
    ) {
        let header = Row::new(
            view.headers
                .iter()
                .map(|h| Cell::from(h.clone()).style(Styles::title())),
        );

        let selected_row = self.state.selected();
        let rows: Vec<Row> = view
            .rows
            .iter()
            .map(|row| {
                let cells: Vec<Cell> = row
                    .cells
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        let invalid = match (cell, report) {
                            (ViewCell::Input { target: CellTarget::Fixed(name), .. }, Some(r)) => r
                                .error_at(&FieldLocation::Cell {
                                    row: row.index,
                                    field: name.clone(),
                                })
                                .is_some(),
                            _ => false,
                        };
                        let style = if focused
                            && cell.is_control()
                            && Some(row.index) == selected_row
                            && col == self.selected_column
                        {
                            Styles::selected()
                        } else if invalid {
                            Styles::error()
                        } else if matches!(cell, ViewCell::RemoveRow(_)) {
                            Styles::inactive()
                        } else {
                            Styles::default()
                        };
                        let text = match cell {
                            ViewCell::RemoveRow(_) => "[d] Remove".to_string(),
                            other => other.display().to_string(),
                        };
                        Cell::from(text).style(style)
                    })
                    .collect();
                Row::new(cells)
            })
            .collect();

        let widths: Vec<Constraint> = view
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let longest = view
                    .rows
                    .iter()
                    .filter_map(|r| r.cells.get(i))
                    .map(|c| c.display().chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0) as u16;
                Constraint::Length(
                    longest
                        .max(self.config.min_column_width)
                        .min(self.config.max_column_width),
                )
            })
            .collect();

        let title = if view.rows.is_empty() {
            format!("{} (Empty)", view.title)
        } else {
            format!("{} ({} rows)", view.title, view.rows.len())
        };

        let block = if self.config.show_borders {
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(if focused {
                    Styles::active_border()
                } else {
                    Styles::inactive_border()
                })
        } else {
            Block::default()
        };

        let table = Table::new(rows, widths).header(header).block(block);

        f.render_stateful_widget(table, area, &mut self.state);
    }
}

impl Navigable for TableEditor {
    fn navigate_up(&mut self) {
        if self.row_count == 0 {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.row_count - 1
        } else {
            selected - 1
        };
        self.state.select(Some(new_selected));
    }

    fn navigate_down(&mut self) {
        if self.row_count == 0 {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        let new_selected = (selected + 1) % self.row_count;
        self.state.select(Some(new_selected));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.row_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::TableSchema;
    use crate::models::FieldSpec;

    fn table(rows: usize) -> TableState {
        let mut table = TableState::new(TableSchema::new(
            "Items",
            vec![
                FieldSpec::text("assetDescription", "Asset Description"),
                FieldSpec::number("quantity", "Quantity"),
            ],
        ));
        for _ in 0..rows {
            table.add_row();
        }
        table
    }

    #[test]
    fn test_sync_clamps_selection() {
        let mut editor = TableEditor::new(TableEditorConfig::default());
        let mut t = table(3);
        editor.sync(&t);
        editor.navigate_to_last();
        assert_eq!(editor.selected_row(), Some(2));

        t.remove_row(2).unwrap();
        editor.sync(&t);
        assert_eq!(editor.selected_row(), Some(1));

        let empty = table(0);
        editor.sync(&empty);
        assert_eq!(editor.selected_row(), None);
        assert_eq!(editor.selected_target(&empty), None);
    }

    #[test]
    fn test_column_navigation_reaches_dynamic_columns() {
        let mut editor = TableEditor::new(TableEditorConfig::default());
        let mut t = table(1);
        t.add_column("Serial No");
        editor.sync(&t);
        editor.move_right();
        editor.move_right();
        editor.move_right();
        assert_eq!(
            editor.selected_target(&t),
            Some(CellTarget::Dynamic("SerialNo".into()))
        );

        t.remove_column("SerialNo");
        editor.sync(&t);
        assert_eq!(
            editor.selected_target(&t),
            Some(CellTarget::Fixed("quantity".into()))
        );
    }

    #[test]
    fn test_navigation_wraps() {
        let mut editor = TableEditor::new(TableEditorConfig::default());
        editor.sync(&table(2));
        editor.navigate_up();
        assert_eq!(editor.selected_row(), Some(1));
        editor.navigate_down();
        assert_eq!(editor.selected_row(), Some(0));
    }
}
