//! Signature blocks

use crate::models::{DisplayMode, SignatureRecord};

/// Placeholder line printed for an unsigned slot
pub const BLANK_SIGNATURE: &str = "____________________";

/// How a signature slot is presented
#[derive(Debug, Clone, PartialEq)]
pub enum SignatureView {
    Editable {
        slot: String,
        name: String,
        date: String,
    },
    Printed {
        slot: String,
        text: String,
        date: Option<String>,
    },
}

/// One signer slot and its captured record
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureBlock {
    pub slot: String,
    pub record: SignatureRecord,
}

impl SignatureBlock {
    pub fn new(slot: &str, record: SignatureRecord) -> Self {
        Self {
            slot: slot.to_string(),
            record,
        }
    }

    /// Replace the whole record
    pub fn on_change(&mut self, record: SignatureRecord) {
        self.record = record;
    }

    pub fn render(&self, mode: DisplayMode) -> SignatureView {
        render_signature(&self.slot, &self.record, mode)
    }
}

pub fn render_signature(slot: &str, record: &SignatureRecord, mode: DisplayMode) -> SignatureView {
    let date = record.date.map(|d| d.format("%Y-%m-%d").to_string());
    match mode {
        DisplayMode::Edit => SignatureView::Editable {
            slot: slot.to_string(),
            name: record.data.clone(),
            date: date.unwrap_or_default(),
        },
        DisplayMode::Print => SignatureView::Printed {
            slot: slot.to_string(),
            text: if record.is_empty() {
                BLANK_SIGNATURE.to_string()
            } else {
                record.data.clone()
            },
            date,
        },
    }
}
