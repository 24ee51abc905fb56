//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::path::PathBuf;
use tracing::{error, info};

use super::components::{Form, FormField, FormFieldType, StatusDisplay, TableEditor, TableEditorConfig};
use super::traits::{FormHandler, Navigable};
use super::ui::{centered_rect, Styles};
use crate::config::Config;
use crate::editor::{CellTarget, ColumnProposal, EditorCommand, EditorOutcome};
use crate::form::{FormShell, SignatureView, ValidationReport};
use crate::models::{CellValue, DisplayMode, FieldKind, FieldSpec, SignatureRecord};
use crate::storage;
use crate::submit::{JsonFileSubmitter, SubmitError};

/// Area of the screen receiving key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Header,
    Signatures,
}

/// Modal layer drawn over the form
pub enum Overlay {
    None,
    ColumnPrompt(FormField),
    CellEditor {
        row: usize,
        target: CellTarget,
        kind: FieldKind,
        field: FormField,
    },
    Notice {
        title: String,
        message: String,
    },
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        !matches!(self, Overlay::None)
    }
}

/// Main TUI application state
pub struct App {
    pub config: Config,
    pub shell: FormShell,
    pub draft_path: PathBuf,
    pub header: Form,
    pub signatures: Form,
    pub table: TableEditor,
    pub focus: Focus,
    pub overlay: Overlay,
    pub status: StatusDisplay,
    /// Errors from the last blocked submission, refreshed as cells change
    pub report: Option<ValidationReport>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, shell: FormShell, draft_path: PathBuf) -> Self {
        let header = Form::from_specs(&shell.schema.header_fields, |name| shell.header_value(name));
        let signatures = signature_form(&shell);
        let mut table = TableEditor::new(TableEditorConfig {
            max_column_width: config.max_cell_width as u16,
            ..TableEditorConfig::default()
        });
        table.sync(shell.table());

        Self {
            config,
            shell,
            draft_path,
            header,
            signatures,
            table,
            focus: Focus::Table,
            overlay: Overlay::None,
            status: StatusDisplay::new(),
            report: None,
            should_quit: false,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.shell.mode
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key)?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        if self.overlay.is_open() {
            self.handle_overlay_event(key);
            return Ok(());
        }

        match self.focus {
            Focus::Table => self.handle_table_event(key)?,
            Focus::Header => self.handle_header_event(key),
            Focus::Signatures => self.handle_signature_event(key),
        }
        Ok(())
    }

    fn handle_table_event(&mut self, key: KeyEvent) -> Result<()> {
        let editable = !self.mode().is_print();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => self.table.navigate_up(),
            KeyCode::Down => self.table.navigate_down(),
            KeyCode::Left => self.table.move_left(),
            KeyCode::Right => self.table.move_right(),
            KeyCode::Home => self.table.navigate_to_first(),
            KeyCode::End => self.table.navigate_to_last(),
            KeyCode::Char('p') => self.toggle_print_mode(),
            KeyCode::Char('s') => self.save_draft(),
            KeyCode::Char('S') => self.submit(),
            KeyCode::Tab if editable => self.set_focus(Focus::Header),
            KeyCode::Char('a') if editable => self.add_row(),
            KeyCode::Char('d') if editable => self.remove_selected_row(),
            KeyCode::Char('c') if editable => {
                self.overlay = Overlay::ColumnPrompt(
                    FormField::new("New column name", FormFieldType::Text)
                        .with_placeholder("e.g. Serial No"),
                );
            }
            KeyCode::Char('x') if editable => self.remove_selected_column(),
            KeyCode::Enter if editable => self.open_cell_editor(),
            _ => {}
        }
        Ok(())
    }

    fn handle_header_event(&mut self, key: KeyEvent) {
        let is_dropdown = self
            .header
            .get_current_field()
            .map(|f| f.field_type == FormFieldType::Dropdown)
            .unwrap_or(false);

        match key.code {
            KeyCode::Esc => self.set_focus(Focus::Table),
            KeyCode::Tab => self.set_focus(Focus::Signatures),
            KeyCode::BackTab => self.set_focus(Focus::Table),
            KeyCode::Up if is_dropdown => {
                if let Some(field) = self.header.get_current_field_mut() {
                    field.dropdown_up();
                }
            }
            KeyCode::Down if is_dropdown => {
                if let Some(field) = self.header.get_current_field_mut() {
                    field.dropdown_down();
                }
            }
            KeyCode::Enter if is_dropdown => {
                if let Some(field) = self.header.get_current_field_mut() {
                    field.select_dropdown_value();
                }
                self.write_header_field();
                self.header.next_field();
            }
            KeyCode::Up => self.header.previous_field(),
            KeyCode::Down | KeyCode::Enter => self.header.next_field(),
            KeyCode::Char(c) => {
                self.header.handle_char_input(c);
                self.write_header_field();
            }
            KeyCode::Backspace => {
                self.header.handle_backspace();
                self.write_header_field();
            }
            KeyCode::Delete => {
                self.header.handle_delete();
                self.write_header_field();
            }
            KeyCode::Left => {
                if let Some(field) = self.header.get_current_field_mut() {
                    field.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.header.get_current_field_mut() {
                    field.move_cursor_right();
                }
            }
            _ => {}
        }
    }

    fn handle_signature_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => self.set_focus(Focus::Table),
            KeyCode::BackTab => self.set_focus(Focus::Header),
            KeyCode::Up => self.signatures.previous_field(),
            KeyCode::Down | KeyCode::Enter => self.signatures.next_field(),
            KeyCode::Char(c) => {
                self.signatures.handle_char_input(c);
                self.write_signature();
            }
            KeyCode::Backspace => {
                self.signatures.handle_backspace();
                self.write_signature();
            }
            KeyCode::Delete => {
                self.signatures.handle_delete();
                self.write_signature();
            }
            KeyCode::Left => {
                if let Some(field) = self.signatures.get_current_field_mut() {
                    field.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.signatures.get_current_field_mut() {
                    field.move_cursor_right();
                }
            }
            _ => {}
        }
    }

    fn handle_overlay_event(&mut self, key: KeyEvent) {
        if let Overlay::Notice { .. } = self.overlay {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.overlay = Overlay::None;
            }
            return;
        }

        let field = match &mut self.overlay {
            Overlay::ColumnPrompt(field) => field,
            Overlay::CellEditor { field, .. } => field,
            Overlay::Notice { .. } | Overlay::None => return,
        };

        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Enter => self.commit_overlay(),
            KeyCode::Char(c) => field.insert_char(c),
            KeyCode::Backspace => field.delete_char(),
            KeyCode::Delete => field.delete_char_forward(),
            KeyCode::Left => field.move_cursor_left(),
            KeyCode::Right => field.move_cursor_right(),
            KeyCode::Home => field.move_cursor_to_start(),
            KeyCode::End => field.move_cursor_to_end(),
            _ => {}
        }
    }

    fn commit_overlay(&mut self) {
        match std::mem::replace(&mut self.overlay, Overlay::None) {
            Overlay::ColumnPrompt(field) => self.propose_column(&field.value),
            Overlay::CellEditor {
                row,
                target,
                kind,
                mut field,
            } => {
                if !field.validate() {
                    // Keep the editor open so the inline error is visible
                    self.overlay = Overlay::CellEditor {
                        row,
                        target,
                        kind,
                        field,
                    };
                    return;
                }
                let value = CellValue::from_input(&kind, &field.value);
                self.apply(EditorCommand::SetCell { row, target, value });
            }
            other => self.overlay = other,
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.header.set_active(focus == Focus::Header);
        self.signatures.set_active(focus == Focus::Signatures);
    }

    /// Apply a table command and keep the selection in range
    fn apply(&mut self, command: EditorCommand) -> Option<EditorOutcome> {
        let outcome = match self.shell.apply(command) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!("Table command failed: {}", e);
                self.status.set_error(e.to_string());
                None
            }
        };
        self.table.sync(self.shell.table());
        if self.report.is_some() {
            self.report = Some(self.shell.validate());
        }
        outcome
    }

    fn add_row(&mut self) {
        if let Some(EditorOutcome::RowAdded(index)) = self.apply(EditorCommand::AddRow) {
            self.table.set_selected_index(Some(index));
            self.status.set_info(format!("Added row {}", index + 1));
        }
    }

    fn remove_selected_row(&mut self) {
        let Some(index) = self.table.selected_row() else {
            return;
        };
        if self.apply(EditorCommand::RemoveRow { index }).is_some() {
            self.status.set_info(format!("Removed row {}", index + 1));
        }
    }

    /// Add a column from the prompt; duplicates raise a notice
    pub fn propose_column(&mut self, label: &str) {
        let command = EditorCommand::AddColumn {
            label: label.to_string(),
        };
        match self.apply(command) {
            Some(EditorOutcome::Column(ColumnProposal::Accepted(key))) => {
                self.status.set_success(format!("Added column '{}' ({})", label.trim(), key));
            }
            Some(EditorOutcome::Column(ColumnProposal::Rejected(reason))) if reason.should_notify() => {
                self.overlay = Overlay::Notice {
                    title: "Column not added".to_string(),
                    message: format!("Cannot add '{}': {}", label, reason),
                };
            }
            _ => {}
        }
    }

    fn remove_selected_column(&mut self) {
        match self.table.selected_target(self.shell.table()) {
            Some(CellTarget::Dynamic(key)) => {
                if let Some(EditorOutcome::ColumnRemoved(true)) =
                    self.apply(EditorCommand::RemoveColumn { key: key.clone() })
                {
                    self.status.set_info(format!("Removed column {}", key));
                }
            }
            Some(CellTarget::Fixed(_)) => {
                self.status
                    .set_warning("Only user-defined columns can be removed".to_string());
            }
            None => {}
        }
    }

    fn open_cell_editor(&mut self) {
        let (Some(row), Some(target)) = (
            self.table.selected_row(),
            self.table.selected_target(self.shell.table()),
        ) else {
            return;
        };

        let table = self.shell.table();
        let (label, kind) = match &target {
            CellTarget::Fixed(name) => match table.schema.field(name) {
                Some(spec) => (spec.label.clone(), spec.kind.clone()),
                None => return,
            },
            CellTarget::Dynamic(key) => {
                let label = table.column(key).map(|c| c.label.clone()).unwrap_or_else(|| key.clone());
                (label, FieldKind::Text)
            }
        };
        let value = table
            .cell_value(row, &target)
            .map(|v| v.to_string())
            .unwrap_or_default();

        let mut field = FormField::from_spec(&FieldSpec::new(&label, &label, kind.clone()))
            .with_value(&value);
        if field.field_type == FormFieldType::Dropdown {
            // Typed entry keeps select cells editable inside the single-line editor
            field.field_type = FormFieldType::Text;
            field.show_dropdown = false;
        }
        field.label = format!("Row {} - {}", row + 1, label);
        field.set_focus(true);

        self.overlay = Overlay::CellEditor {
            row,
            target,
            kind,
            field,
        };
    }

    fn write_header_field(&mut self) {
        if let Some((name, value)) = self.header.current_value() {
            if let Err(e) = self.shell.set_header(&name, value) {
                self.status.set_error(e.to_string());
            }
        }
    }

    fn write_signature(&mut self) {
        let slot_index = self.signatures.current_field / 2;
        let Some(slot) = self.shell.schema.signature_slots.get(slot_index).cloned() else {
            return;
        };
        let name = self
            .signatures
            .get_field(slot_index * 2)
            .map(|f| f.value.clone())
            .unwrap_or_default();
        let date = self
            .signatures
            .get_field(slot_index * 2 + 1)
            .and_then(|f| chrono::NaiveDate::parse_from_str(f.value.trim(), "%Y-%m-%d").ok());

        if let Err(e) = self.shell.set_signature(&slot, SignatureRecord::typed(&name, date)) {
            self.status.set_error(e.to_string());
        }
    }

    pub fn toggle_print_mode(&mut self) {
        let mode = self.shell.toggle_mode();
        if mode.is_print() {
            self.set_focus(Focus::Table);
        }
        self.status.set_info(format!("Switched to {} mode", mode.as_str()));
    }

    fn save_draft(&mut self) {
        match storage::save_draft(&self.draft_path, &self.shell.state) {
            Ok(()) => self
                .status
                .set_success(format!("Saved draft {}", self.draft_path.display())),
            Err(e) => {
                error!("Failed to save draft: {:#}", e);
                self.status.set_error(format!("Save failed: {}", e));
            }
        }
    }

    fn submit(&mut self) {
        let mut submitter = JsonFileSubmitter::new(self.config.submission_dir.clone());
        match self.shell.submit(&mut submitter) {
            Ok(submission) => {
                self.report = None;
                self.header.apply_report(&ValidationReport::default());
                let location = submitter
                    .last_written()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                info!("Submitted {} to {}", submission.instance_id, location);
                self.status.set_success(format!("Submitted to {}", location));
            }
            Err(SubmitError::Invalid(report)) => {
                self.header.apply_report(&report);
                let lines: Vec<String> = report.errors.iter().take(8).map(|e| e.to_string()).collect();
                let more = report.len().saturating_sub(lines.len());
                let mut message = lines.join("\n");
                if more > 0 {
                    message.push_str(&format!("\n... and {} more", more));
                }
                self.overlay = Overlay::Notice {
                    title: format!("{} field(s) need attention", report.len()),
                    message,
                };
                self.report = Some(report);
            }
            Err(e) => {
                error!("Submission failed: {}", e);
                self.status.set_error(format!("Submit failed: {}", e));
            }
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();
        let editable = !self.mode().is_print();

        let header_rows = (self.header.fields.len() + 1) / 2;
        let signature_height = if editable {
            ((self.signatures.fields.len() + 1) / 2 * 3) as u16
        } else {
            self.shell.schema.signature_slots.len() as u16 + 2
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length((header_rows * 3) as u16),
                Constraint::Min(5),
                Constraint::Length(signature_height),
                Constraint::Length(3),
            ])
            .split(size);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(self.shell.schema.title.clone(), Styles::title()),
            Span::raw(format!(
                "  [{}]  {} mode",
                self.shell.schema.category,
                self.mode().as_str()
            )),
        ]))
        .block(Block::default().borders(Borders::ALL).border_style(if editable {
            Styles::inactive_border()
        } else {
            Styles::print_border()
        }));
        f.render_widget(title, chunks[0]);

        draw_form_grid(f, chunks[1], &self.header, editable);

        let view = self.shell.table_view();
        self.table.render(
            f,
            chunks[2],
            &view,
            self.report.as_ref(),
            self.focus == Focus::Table,
        );

        if editable {
            draw_form_grid(f, chunks[3], &self.signatures, true);
        } else {
            self.draw_printed_signatures(f, chunks[3]);
        }

        self.status.render(f, chunks[4], &self.key_hint());

        if self.focus == Focus::Header {
            if let Some(field) = self.header.get_current_field_mut() {
                if field.show_dropdown {
                    let area = centered_rect(30, 30, size);
                    f.render_widget(Clear, area);
                    field.render_dropdown(f, area);
                }
            }
        }

        self.draw_overlay(f, size);
    }

    fn draw_printed_signatures(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .shell
            .signature_views()
            .into_iter()
            .filter_map(|view| match view {
                SignatureView::Printed { slot, text, date } => Some(Line::from(format!(
                    "{}: {}   Date: {}",
                    slot,
                    text,
                    date.unwrap_or_else(|| "__________".to_string())
                ))),
                SignatureView::Editable { .. } => None,
            })
            .collect();
        let block = Block::default()
            .title("Signatures")
            .borders(Borders::ALL)
            .border_style(Styles::print_border());
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_overlay(&self, f: &mut Frame, size: Rect) {
        match &self.overlay {
            Overlay::None => {}
            Overlay::ColumnPrompt(field) | Overlay::CellEditor { field, .. } => {
                let popup = centered_rect(50, 20, size);
                let area = Rect {
                    height: popup.height.min(3),
                    ..popup
                };
                f.render_widget(Clear, area);
                field.render(f, area, true);
            }
            Overlay::Notice { title, message } => {
                let area = centered_rect(60, 40, size);
                f.render_widget(Clear, area);
                let notice = Paragraph::new(format!("{}\n\nPress Enter to continue", message))
                    .wrap(Wrap { trim: false })
                    .style(Styles::error())
                    .block(
                        Block::default()
                            .title(title.as_str())
                            .borders(Borders::ALL)
                            .border_style(Styles::error()),
                    );
                f.render_widget(notice, area);
            }
        }
    }

    fn key_hint(&self) -> String {
        match (self.mode(), self.focus) {
            (DisplayMode::Print, _) => {
                "PRINT | ↑/↓/←/→ Move | p: Edit mode | s: Save | S: Submit | q: Quit".to_string()
            }
            (DisplayMode::Edit, Focus::Table) => "a: Add row | d: Remove row | c: Add column | x: Remove column | Enter: Edit cell | Tab: Header | p: Print | s: Save | S: Submit | q: Quit".to_string(),
            (DisplayMode::Edit, Focus::Header) => {
                "Header | ↑/↓ Field | Type to edit | Tab: Signatures | Esc: Table".to_string()
            }
            (DisplayMode::Edit, Focus::Signatures) => {
                "Signatures | ↑/↓ Field | Name and date (YYYY-MM-DD) | Tab/Esc: Table".to_string()
            }
        }
    }
}

/// Fields for each signer slot: typed name followed by the signing date
fn signature_form(shell: &FormShell) -> Form {
    let mut fields = Vec::new();
    let mut kinds = Vec::new();
    for slot in &shell.schema.signature_slots {
        let record = shell.signature(slot).cloned().unwrap_or_default();
        fields.push(FormField::new(slot, FormFieldType::Text).with_value(&record.data));
        kinds.push(FieldKind::Text);
        let date = record
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        fields.push(
            FormField::new(&format!("{} - Date", slot), FormFieldType::Date)
                .with_placeholder("YYYY-MM-DD")
                .with_value(&date),
        );
        kinds.push(FieldKind::Date);
    }
    Form::new(fields, kinds)
}

/// Lay fields out two per line
fn draw_form_grid(f: &mut Frame, area: Rect, form: &Form, editable: bool) {
    if form.fields.is_empty() {
        return;
    }
    let lines = (form.fields.len() + 1) / 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); lines])
        .split(area);

    for (line, pair) in form.fields.chunks(2).enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[line]);
        for (i, field) in pair.iter().enumerate() {
            field.render(f, cols[i], editable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let shell = FormShell::from_catalog("asset-request").unwrap();
        App::new(Config::default(), shell, PathBuf::from("unused.json"))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_add_and_remove_rows() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.shell.table().row_count(), 3);
        assert_eq!(app.table.selected_row(), Some(2));

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.shell.table().row_count(), 2);
        assert_eq!(app.table.selected_row(), Some(1));
    }

    #[test]
    fn test_column_prompt_rejects_duplicates_with_notice() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "Serial No");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.shell.table().columns.len(), 1);
        assert!(!app.overlay.is_open());

        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "Serial No");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.shell.table().columns.len(), 1);
        assert!(matches!(app.overlay, Overlay::Notice { .. }));

        press(&mut app, KeyCode::Enter);
        assert!(!app.overlay.is_open());
    }

    #[test]
    fn test_cancelled_prompt_is_noop() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "Warranty");
        press(&mut app, KeyCode::Esc);
        assert!(app.shell.table().columns.is_empty());

        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Enter);
        assert!(app.shell.table().columns.is_empty());
        assert!(!app.overlay.is_open());
    }

    #[test]
    fn test_edit_cell_and_remove_dynamic_column() {
        let mut app = app();
        app.propose_column("Serial No");
        for _ in 0..3 {
            press(&mut app, KeyCode::Right);
        }
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "X123");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.shell.table().row(0).unwrap().dynamic("SerialNo"),
            Some(&CellValue::from("X123"))
        );

        press(&mut app, KeyCode::Char('x'));
        assert!(app.shell.table().columns.is_empty());
        assert_eq!(
            app.shell.table().row(0).unwrap().dynamic("SerialNo"),
            Some(&CellValue::from("X123"))
        );
    }

    #[test]
    fn test_number_cell_editor_keeps_invalid_input_open() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "two");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.overlay, Overlay::CellEditor { .. }));

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "2");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.shell.table().row(0).unwrap().field("quantity"),
            Some(&CellValue::Number(2.0))
        );
    }

    #[test]
    fn test_print_mode_blocks_editing_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.mode(), DisplayMode::Print);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.shell.table().row_count(), 1);
        assert!(!app.overlay.is_open());
        assert!(!app.shell.table_view().has_controls());

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.mode(), DisplayMode::Edit);
    }

    #[test]
    fn test_header_typing_updates_form_state() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Header);
        type_text(&mut app, "Dana");
        assert_eq!(
            app.shell.header_value("employeeName"),
            Some(&CellValue::from("Dana"))
        );
        // 'q' is text while a header field has focus
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_signature_fields_replace_record() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Signatures);
        type_text(&mut app, "Dana");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "2024-05-02");

        let record = app.shell.signature("Requested By").unwrap();
        assert_eq!(record.data, "Dana");
        assert_eq!(record.date, chrono::NaiveDate::from_ymd_opt(2024, 5, 2));
    }

    #[test]
    fn test_blocked_submit_shows_notice() {
        let mut app = app();
        press(&mut app, KeyCode::Char('S'));
        assert!(matches!(app.overlay, Overlay::Notice { .. }));
        assert!(app.report.as_ref().map(|r| !r.is_valid()).unwrap_or(false));
        assert!(app.header.fields[0].validation_error.is_some());
    }
}
