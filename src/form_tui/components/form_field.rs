//! Form field component for user input

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::form::{FieldLocation, ValidationReport};
use crate::form_tui::{traits::FormHandler, ui::Styles};
use crate::models::{CellValue, FieldKind, FieldSpec};

/// Type of form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldType {
    Text,
    Number,
    Date,
    Dropdown,
}

impl FormFieldType {
    pub fn for_kind(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Text => FormFieldType::Text,
            FieldKind::Number => FormFieldType::Number,
            FieldKind::Date => FormFieldType::Date,
            FieldKind::Select(_) => FormFieldType::Dropdown,
        }
    }
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub is_focused: bool,
    /// Cursor position in characters
    pub cursor_position: usize,
    pub dropdown_options: Vec<String>,
    pub dropdown_state: ListState,
    pub show_dropdown: bool,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        Self {
            name: label.to_string(),
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            field_type,
            is_focused: false,
            cursor_position: 0,
            dropdown_options: Vec::new(),
            dropdown_state: ListState::default(),
            show_dropdown: false,
            validation_error: None,
        }
    }

    /// Field bound to a schema entry
    pub fn from_spec(spec: &FieldSpec) -> Self {
        let label = if spec.required {
            format!("{} *", spec.label)
        } else {
            spec.label.clone()
        };
        let mut field = Self::new(&label, FormFieldType::for_kind(&spec.kind));
        field.name = spec.name.clone();
        match &spec.kind {
            FieldKind::Date => field.with_placeholder("YYYY-MM-DD"),
            FieldKind::Select(options) => field.with_dropdown_options(options.clone()),
            _ => field,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor_position = value.chars().count();
        self
    }

    pub fn with_dropdown_options(mut self, options: Vec<String>) -> Self {
        self.dropdown_options = options;
        if !self.dropdown_options.is_empty() {
            self.dropdown_state.select(Some(0));
        }
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
        if focused && self.field_type == FormFieldType::Dropdown {
            self.show_dropdown = true;
        } else if !focused {
            self.show_dropdown = false;
        }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        if self.field_type == FormFieldType::Dropdown {
            return; // Don't allow typing in dropdown
        }
        let at = self.byte_offset(self.cursor_position);
        self.value.insert(at, c);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_offset(self.cursor_position);
            self.value.remove(at);
            self.validation_error = None;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.char_len() {
            let at = self.byte_offset(self.cursor_position);
            self.value.remove(at);
            self.validation_error = None;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
        self.validation_error = None;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Handle dropdown navigation
    pub fn dropdown_up(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        let selected = self.dropdown_state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.dropdown_options.len() - 1
        } else {
            selected - 1
        };
        self.dropdown_state.select(Some(new_selected));
    }

    pub fn dropdown_down(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        let selected = self.dropdown_state.selected().unwrap_or(0);
        let new_selected = (selected + 1) % self.dropdown_options.len();
        self.dropdown_state.select(Some(new_selected));
    }

    pub fn select_dropdown_value(&mut self) {
        if let Some(selected) = self.dropdown_state.selected() {
            if let Some(value) = self.dropdown_options.get(selected) {
                self.value = value.clone();
                self.cursor_position = self.char_len();
                self.validation_error = None;
            }
        }
    }

    /// Render the form field; `editable` is false in print mode
    pub fn render(&self, f: &mut Frame, area: Rect, editable: bool) {
        let showing_placeholder = editable && self.value.is_empty() && !self.placeholder.is_empty();
        let display_text = if showing_placeholder {
            &self.placeholder
        } else {
            &self.value
        };

        let border_style = if !editable {
            Styles::print_border()
        } else if self.is_focused {
            Styles::active_border()
        } else if self.validation_error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };

        let title = match (&self.validation_error, editable) {
            (Some(error), true) => format!("{} - Error: {}", self.label, error),
            _ => self.label.clone(),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let text_style = if showing_placeholder {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text.to_string())
            .style(text_style)
            .block(block);

        f.render_widget(paragraph, area);

        // Render cursor if focused and not a dropdown
        if editable && self.is_focused && self.field_type != FormFieldType::Dropdown {
            let cursor_x = area.x + 1 + self.cursor_position as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }

    /// Render dropdown if visible
    pub fn render_dropdown(&mut self, f: &mut Frame, area: Rect) {
        if !self.show_dropdown || self.dropdown_options.is_empty() {
            return;
        }

        let items: Vec<ListItem> = self
            .dropdown_options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if Some(i) == self.dropdown_state.selected() {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(option.clone()).style(style)
            })
            .collect();

        let block = Block::default()
            .title("Options")
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        let list = List::new(items).block(block);

        f.render_stateful_widget(list, area, &mut self.dropdown_state);
    }

    /// Validate field value
    pub fn validate(&mut self) -> bool {
        self.validation_error = None;

        match self.field_type {
            FormFieldType::Date => {
                if !self.value.is_empty()
                    && chrono::NaiveDate::parse_from_str(&self.value, "%Y-%m-%d").is_err()
                {
                    self.validation_error = Some("Invalid date format (YYYY-MM-DD)".to_string());
                    return false;
                }
            }
            FormFieldType::Number => {
                let number = self.value.trim().parse::<f64>().ok().filter(|n| n.is_finite());
                if !self.value.trim().is_empty() && number.is_none() {
                    self.validation_error = Some("Must be a number".to_string());
                    return false;
                }
            }
            _ => {}
        }

        true
    }
}

/// Header fields of a form, each bound to a schema field name
pub struct Form {
    pub fields: Vec<FormField>,
    pub kinds: Vec<FieldKind>,
    pub current_field: usize,
}

impl Form {
    /// Build fields for the given specs, pre-filled from current values
    pub fn from_specs<'a>(
        specs: &[FieldSpec],
        value_of: impl Fn(&str) -> Option<&'a CellValue>,
    ) -> Self {
        let fields = specs
            .iter()
            .map(|spec| {
                let value = value_of(&spec.name).map(|v| v.to_string()).unwrap_or_default();
                FormField::from_spec(spec).with_value(&value)
            })
            .collect();
        Self::new(fields, specs.iter().map(|s| s.kind.clone()).collect())
    }

    pub fn new(fields: Vec<FormField>, kinds: Vec<FieldKind>) -> Self {
        Self {
            fields,
            kinds,
            current_field: 0,
        }
    }

    /// Give or take keyboard focus for the whole form
    pub fn set_active(&mut self, active: bool) {
        let current = self.current_field;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(active && i == current);
        }
    }

    fn update_focus(&mut self) {
        let active = self.fields.iter().any(|f| f.is_focused);
        let current = self.current_field;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(active && i == current);
        }
    }

    pub fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    pub fn get_current_field(&self) -> Option<&FormField> {
        self.fields.get(self.current_field)
    }

    pub fn get_current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    /// Name and typed value of the current field
    pub fn current_value(&self) -> Option<(String, CellValue)> {
        let field = self.get_current_field()?;
        let kind = self.kinds.get(self.current_field)?;
        Some((field.name.clone(), CellValue::from_input(kind, &field.value)))
    }

    /// Show the errors of a validation report inline next to each field
    pub fn apply_report(&mut self, report: &ValidationReport) {
        for field in &mut self.fields {
            field.validation_error = report
                .error_at(&FieldLocation::Header(field.name.clone()))
                .map(|e| e.to_string());
        }
    }
}

impl FormHandler for Form {
    fn get_current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() {
            self.current_field = field;
            self.update_focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.get_current_field_mut() {
            field.insert_char(c);
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char_forward();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete_multibyte() {
        let mut field = FormField::new("Name", FormFieldType::Text).with_value("Jos");
        field.insert_char('é');
        assert_eq!(field.value, "José");
        field.move_cursor_left();
        field.delete_char();
        assert_eq!(field.value, "Joé");
        field.delete_char_forward();
        assert_eq!(field.value, "Jo");
    }

    #[test]
    fn test_dropdown_ignores_typing() {
        let spec = FieldSpec::select("priority", "Priority", &["Low", "High"]);
        let mut field = FormField::from_spec(&spec);
        field.insert_char('x');
        assert!(field.value.is_empty());
        field.dropdown_down();
        field.select_dropdown_value();
        assert_eq!(field.value, "High");
    }

    #[test]
    fn test_field_validation() {
        let mut date = FormField::new("Date", FormFieldType::Date).with_value("2024-13-01");
        assert!(!date.validate());
        let mut number = FormField::new("Qty", FormFieldType::Number).with_value("3.5");
        assert!(number.validate());
        for text in ["inf", "NaN", "infinity"] {
            let mut number = FormField::new("Qty", FormFieldType::Number).with_value(text);
            assert!(!number.validate(), "{} accepted as a number", text);
        }
    }

    #[test]
    fn test_form_current_value_is_typed() {
        let specs = vec![
            FieldSpec::text("name", "Name"),
            FieldSpec::number("amount", "Amount"),
        ];
        let mut form = Form::from_specs(&specs, |_| None);
        form.set_active(true);
        form.next_field();
        form.handle_char_input('4');
        assert_eq!(
            form.current_value(),
            Some(("amount".to_string(), CellValue::Number(4.0)))
        );
        assert!(form.fields[1].is_focused);
        assert!(!form.fields[0].is_focused);
    }
}
