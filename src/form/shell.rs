//! Form shell: header values, line-items table, signatures and display mode

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::FormError;
use super::schema::{self, FormSchema};
use super::signature::{render_signature, SignatureView};
use super::summary::{summarize, TableSummary};
use super::validation::{validate_fields, FieldLocation, ValidationReport};
use crate::editor::{
    ops::apply_in_place, project, CellTarget, ColumnProposal, EditorCommand, EditorError,
    EditorOutcome, TableState, TableView,
};
use crate::models::{CellValue, DisplayMode, FieldKind, SignatureRecord};
use crate::submit::{SubmitError, SubmitHandler, Submission};

/// Everything the user has entered on one form instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub form_id: String,
    pub instance_id: Uuid,
    pub header: BTreeMap<String, CellValue>,
    pub table: TableState,
    pub signatures: BTreeMap<String, SignatureRecord>,
}

impl FormState {
    /// Fresh state for a schema: blank header values, one seed row, unsigned slots
    pub fn new(schema: &FormSchema) -> Self {
        Self {
            form_id: schema.id.clone(),
            instance_id: Uuid::new_v4(),
            header: schema
                .header_fields
                .iter()
                .map(|f| (f.name.clone(), CellValue::empty()))
                .collect(),
            table: TableState::seeded(schema.table.clone()),
            signatures: schema
                .signature_slots
                .iter()
                .map(|slot| (slot.clone(), SignatureRecord::default()))
                .collect(),
        }
    }
}

/// A mounted form: schema, state and the externally supplied display mode
#[derive(Debug, Clone)]
pub struct FormShell {
    pub schema: FormSchema,
    pub state: FormState,
    pub mode: DisplayMode,
}

impl FormShell {
    pub fn new(schema: FormSchema) -> Self {
        let state = FormState::new(&schema);
        Self {
            schema,
            state,
            mode: DisplayMode::Edit,
        }
    }

    /// Mount a built-in form by id
    pub fn from_catalog(form_id: &str) -> Result<Self, FormError> {
        let schema =
            schema::find(form_id).ok_or_else(|| FormError::UnknownForm(form_id.to_string()))?;
        Ok(Self::new(schema))
    }

    /// Re-mount previously saved state against its built-in schema
    pub fn from_state(state: FormState) -> Result<Self, FormError> {
        let schema = schema::find(&state.form_id)
            .ok_or_else(|| FormError::UnknownForm(state.form_id.clone()))?;
        state.table.check_columns()?;
        Ok(Self {
            schema,
            state,
            mode: DisplayMode::Edit,
        })
    }

    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> DisplayMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn table(&self) -> &TableState {
        &self.state.table
    }

    pub fn header_value(&self, name: &str) -> Option<&CellValue> {
        self.state.header.get(name)
    }

    pub fn set_header(&mut self, name: &str, value: CellValue) -> Result<(), FormError> {
        if self.schema.header_field(name).is_none() {
            return Err(FormError::UnknownField(name.to_string()));
        }
        self.state.header.insert(name.to_string(), value);
        Ok(())
    }

    /// Store typed text in a header field, read according to the field's kind
    pub fn set_header_input(&mut self, name: &str, input: &str) -> Result<(), FormError> {
        let kind = self
            .schema
            .header_field(name)
            .map(|spec| spec.kind.clone())
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.set_header(name, CellValue::from_input(&kind, input))
    }

    /// Store typed text in a table cell; dynamic columns always hold text
    pub fn set_cell_input(
        &mut self,
        row: usize,
        target: CellTarget,
        input: &str,
    ) -> Result<EditorOutcome, FormError> {
        let kind = match &target {
            CellTarget::Fixed(name) => self
                .state
                .table
                .schema
                .field(name)
                .map(|spec| spec.kind.clone())
                .ok_or_else(|| EditorError::UnknownField(name.clone()))?,
            CellTarget::Dynamic(_) => FieldKind::Text,
        };
        let value = CellValue::from_input(&kind, input);
        self.apply(EditorCommand::SetCell { row, target, value })
    }

    pub fn signature(&self, slot: &str) -> Option<&SignatureRecord> {
        self.state.signatures.get(slot)
    }

    /// Replace the record captured for a signer slot
    pub fn set_signature(&mut self, slot: &str, record: SignatureRecord) -> Result<(), FormError> {
        if !self.schema.has_signature_slot(slot) {
            return Err(FormError::UnknownSignatureSlot(slot.to_string()));
        }
        self.state.signatures.insert(slot.to_string(), record);
        Ok(())
    }

    /// Apply a table command
    pub fn apply(&mut self, command: EditorCommand) -> Result<EditorOutcome, FormError> {
        Ok(apply_in_place(&mut self.state.table, command)?)
    }

    pub fn propose_column(&mut self, label: &str) -> ColumnProposal {
        self.state.table.add_column(label)
    }

    pub fn table_view(&self) -> TableView {
        project(&self.state.table, self.mode)
    }

    pub fn signature_views(&self) -> Vec<SignatureView> {
        self.schema
            .signature_slots
            .iter()
            .map(|slot| {
                let record = self.state.signatures.get(slot).cloned().unwrap_or_default();
                render_signature(slot, &record, self.mode)
            })
            .collect()
    }

    pub fn summary(&self) -> TableSummary {
        summarize(&self.state.table)
    }

    /// Validate header fields and every fixed table cell
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        validate_fields(
            &self.schema.header_fields,
            &self.state.header,
            |name| FieldLocation::Header(name.to_string()),
            &mut report,
        );
        for (row, values) in self.state.table.rows.iter().enumerate() {
            validate_fields(
                &self.state.table.schema.fixed_fields,
                &values.fields,
                |name| FieldLocation::Cell {
                    row,
                    field: name.to_string(),
                },
                &mut report,
            );
        }
        report
    }

    /// Validate, then hand the assembled record to the submit hook
    pub fn submit<H>(&self, handler: &mut H) -> Result<Submission, SubmitError>
    where
        H: SubmitHandler + ?Sized,
    {
        let report = self.validate();
        if !report.is_valid() {
            warn!(
                "Submission of {} blocked by {} validation error(s)",
                self.state.form_id,
                report.len()
            );
            return Err(SubmitError::Invalid(report));
        }

        let submission = Submission::new(self.state.clone());
        handler.on_submit(&submission)?;
        info!(
            "Submitted {} instance {}",
            submission.form_id, submission.instance_id
        );
        Ok(submission)
    }
}
