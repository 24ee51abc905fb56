//! Pure editor operations
//!
//! Each function leaves its input untouched and returns the next state.
//! [`apply`] reduces an [`EditorCommand`] so front ends can describe user
//! actions as values.

use super::columns::ColumnProposal;
use super::errors::EditorError;
use super::state::{CellTarget, TableState};
use crate::models::CellValue;

/// A user action against the table
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    AddColumn { label: String },
    RemoveColumn { key: String },
    AddRow,
    RemoveRow { index: usize },
    SetCell {
        row: usize,
        target: CellTarget,
        value: CellValue,
    },
}

/// What a command did, beyond the new state
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    Column(ColumnProposal),
    ColumnRemoved(bool),
    RowAdded(usize),
    RowRemoved(usize),
    CellSet,
}

pub fn add_column(state: &TableState, label: &str) -> (TableState, ColumnProposal) {
    let mut next = state.clone();
    let proposal = next.add_column(label);
    (next, proposal)
}

pub fn remove_column(state: &TableState, key: &str) -> TableState {
    let mut next = state.clone();
    next.remove_column(key);
    next
}

pub fn add_row(state: &TableState) -> TableState {
    let mut next = state.clone();
    next.add_row();
    next
}

pub fn remove_row(state: &TableState, index: usize) -> Result<TableState, EditorError> {
    let mut next = state.clone();
    next.remove_row(index)?;
    Ok(next)
}

pub fn set_cell_value(
    state: &TableState,
    row: usize,
    target: &CellTarget,
    value: CellValue,
) -> Result<TableState, EditorError> {
    let mut next = state.clone();
    next.set_cell_value(row, target, value)?;
    Ok(next)
}

/// Apply a command, returning the next state and what happened
pub fn apply(
    state: &TableState,
    command: EditorCommand,
) -> Result<(TableState, EditorOutcome), EditorError> {
    let mut next = state.clone();
    let outcome = apply_in_place(&mut next, command)?;
    Ok((next, outcome))
}

/// Apply a command to a state the caller owns
pub fn apply_in_place(
    state: &mut TableState,
    command: EditorCommand,
) -> Result<EditorOutcome, EditorError> {
    let outcome = match command {
        EditorCommand::AddColumn { label } => EditorOutcome::Column(state.add_column(&label)),
        EditorCommand::RemoveColumn { key } => {
            EditorOutcome::ColumnRemoved(state.remove_column(&key))
        }
        EditorCommand::AddRow => EditorOutcome::RowAdded(state.add_row()),
        EditorCommand::RemoveRow { index } => {
            state.remove_row(index)?;
            EditorOutcome::RowRemoved(index)
        }
        EditorCommand::SetCell { row, target, value } => {
            state.set_cell_value(row, &target, value)?;
            EditorOutcome::CellSet
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::columns::RejectReason;
    use crate::editor::state::TableSchema;
    use crate::models::FieldSpec;

    fn state() -> TableState {
        TableState::seeded(TableSchema::new(
            "Items",
            vec![FieldSpec::text("assetDescription", "Asset Description")],
        ))
    }

    #[test]
    fn test_pure_ops_leave_input_untouched() {
        let original = state();
        let (next, proposal) = add_column(&original, "Serial No");
        assert!(proposal.is_accepted());
        assert!(original.columns.is_empty());
        assert_eq!(next.columns.len(), 1);

        let grown = add_row(&next);
        assert_eq!(next.row_count(), 1);
        assert_eq!(grown.row_count(), 2);

        let shrunk = remove_row(&grown, 0).unwrap();
        assert_eq!(grown.row_count(), 2);
        assert_eq!(shrunk.row_count(), 1);
    }

    #[test]
    fn test_rejected_proposal_returns_equal_state() {
        let (once, _) = add_column(&state(), "Serial No");
        let (twice, proposal) = add_column(&once, "Serial No");
        assert_eq!(
            proposal,
            ColumnProposal::Rejected(RejectReason::DuplicateKey("SerialNo".into()))
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_command_sequence() {
        let commands = vec![
            EditorCommand::AddColumn { label: "Serial No".into() },
            EditorCommand::AddRow,
            EditorCommand::SetCell {
                row: 1,
                target: CellTarget::Dynamic("SerialNo".into()),
                value: "X123".into(),
            },
            EditorCommand::RemoveColumn { key: "SerialNo".into() },
            EditorCommand::RemoveRow { index: 0 },
        ];

        let mut current = state();
        let mut outcomes = Vec::new();
        for command in commands {
            let (next, outcome) = apply(&current, command).unwrap();
            current = next;
            outcomes.push(outcome);
        }

        assert_eq!(outcomes[1], EditorOutcome::RowAdded(1));
        assert_eq!(outcomes[3], EditorOutcome::ColumnRemoved(true));
        assert_eq!(current.row_count(), 1);
        assert!(current.columns.is_empty());
        assert_eq!(
            current.row(0).unwrap().dynamic("SerialNo"),
            Some(&CellValue::from("X123"))
        );
    }

    #[test]
    fn test_apply_propagates_errors() {
        let err = apply(&state(), EditorCommand::RemoveRow { index: 5 }).unwrap_err();
        assert_eq!(err, EditorError::RowOutOfRange { index: 5, len: 1 });
    }
}
