//! Form schemas and the built-in catalog

use serde::{Deserialize, Serialize};

use crate::editor::TableSchema;
use crate::models::FieldSpec;

/// Static description of one business form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub title: String,
    pub category: String,
    pub header_fields: Vec<FieldSpec>,
    pub table: TableSchema,
    pub signature_slots: Vec<String>,
}

impl FormSchema {
    pub fn header_field(&self, name: &str) -> Option<&FieldSpec> {
        self.header_fields.iter().find(|f| f.name == name)
    }

    pub fn has_signature_slot(&self, slot: &str) -> bool {
        self.signature_slots.iter().any(|s| s == slot)
    }
}

/// Ids of the built-in forms
pub fn catalog_ids() -> Vec<&'static str> {
    vec!["asset-request", "vendor-summary", "tax-assessment"]
}

/// All built-in forms
pub fn catalog() -> Vec<FormSchema> {
    vec![asset_request(), vendor_summary(), tax_assessment()]
}

/// Look up a built-in form by id
pub fn find(id: &str) -> Option<FormSchema> {
    catalog().into_iter().find(|s| s.id == id.to_lowercase())
}

fn asset_request() -> FormSchema {
    FormSchema {
        id: "asset-request".to_string(),
        title: "Asset Request Form".to_string(),
        category: "HR".to_string(),
        header_fields: vec![
            FieldSpec::text("employeeName", "Employee Name").required(),
            FieldSpec::text("employeeId", "Employee ID").required(),
            FieldSpec::text("department", "Department").required(),
            FieldSpec::date("requestDate", "Request Date").required(),
            FieldSpec::select("priority", "Priority", &["Low", "Medium", "High"]),
            FieldSpec::text("justification", "Business Justification"),
        ],
        table: TableSchema::new(
            "Requested Assets",
            vec![
                FieldSpec::text("assetDescription", "Asset Description").required(),
                FieldSpec::number("quantity", "Quantity").required(),
                FieldSpec::number("estimatedCost", "Estimated Cost"),
            ],
        ),
        signature_slots: vec!["Requested By".to_string(), "Approved By".to_string()],
    }
}

fn vendor_summary() -> FormSchema {
    FormSchema {
        id: "vendor-summary".to_string(),
        title: "Vendor Summary Report".to_string(),
        category: "Finance".to_string(),
        header_fields: vec![
            FieldSpec::text("preparedBy", "Prepared By").required(),
            FieldSpec::date("reportDate", "Report Date").required(),
            FieldSpec::text("period", "Reporting Period"),
        ],
        table: TableSchema::new(
            "Vendors",
            vec![
                FieldSpec::text("vendorName", "Vendor Name").required(),
                FieldSpec::text("vendorCode", "Vendor Code"),
                FieldSpec::select("status", "Status", &["Active", "On Hold", "Inactive"])
                    .required(),
                FieldSpec::number("totalBilled", "Total Billed"),
            ],
        )
        .with_tally("status"),
        signature_slots: vec!["Prepared By".to_string(), "Reviewed By".to_string()],
    }
}

fn tax_assessment() -> FormSchema {
    FormSchema {
        id: "tax-assessment".to_string(),
        title: "Tax Assessment Cases".to_string(),
        category: "Tax".to_string(),
        header_fields: vec![
            FieldSpec::text("entityName", "Entity Name").required(),
            FieldSpec::text("taxId", "Tax ID").required(),
            FieldSpec::text("assessmentYear", "Assessment Year").required(),
        ],
        table: TableSchema::new(
            "Assessment Cases",
            vec![
                FieldSpec::text("caseNumber", "Case Number").required(),
                FieldSpec::text("authority", "Authority"),
                FieldSpec::number("assessedAmount", "Assessed Amount").required(),
                FieldSpec::number("paidAmount", "Paid Amount"),
                FieldSpec::select("caseStatus", "Status", &["Open", "Appealed", "Closed"]),
            ],
        )
        .with_tally("caseStatus")
        .with_variance("assessedAmount", "paidAmount"),
        signature_slots: vec!["Tax Manager".to_string()],
    }
}
