use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Scalar value held by a form field or table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Value typed into an input of the given kind. Unparseable numbers are
    /// kept as text so validation can report them.
    pub fn from_input(kind: &FieldKind, input: &str) -> Self {
        match kind {
            FieldKind::Number => match input.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => CellValue::Number(n),
                _ => CellValue::Text(input.to_string()),
            },
            _ => CellValue::Text(input.to_string()),
        }
    }

    /// Numeric reading of the value; text is parsed leniently. Infinities
    /// and NaN are not numbers here.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
        };
        n.filter(|n| n.is_finite())
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Kind of input a field accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "options")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Select(Vec<String>),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Select(_) => "select",
        }
    }
}

/// Schema entry for a header field or a fixed table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Select(options.iter().map(|o| o.to_string()).collect()),
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// User-defined table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
}

/// One line item: fixed fields plus user-defined column values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub fields: BTreeMap<String, CellValue>,
    #[serde(default)]
    pub dynamic_fields: BTreeMap<String, CellValue>,
}

impl Row {
    /// Row with an empty value for each of the given fixed fields
    pub fn blank<'a>(field_names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            fields: field_names
                .into_iter()
                .map(|name| (name.to_string(), CellValue::empty()))
                .collect(),
            dynamic_fields: BTreeMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&CellValue> {
        self.fields.get(name)
    }

    pub fn dynamic(&self, key: &str) -> Option<&CellValue> {
        self.dynamic_fields.get(key)
    }
}

/// Captured signature for one signer slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    #[serde(rename = "type")]
    pub signature_type: String,
    pub data: String,
    pub date: Option<NaiveDate>,
}

impl SignatureRecord {
    pub fn typed(name: &str, date: Option<NaiveDate>) -> Self {
        Self {
            signature_type: "text".to_string(),
            data: name.to_string(),
            date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.trim().is_empty()
    }
}

/// Whether editing controls are shown or the form renders as a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    Edit,
    Print,
}

impl DisplayMode {
    pub fn from_print_flag(print: bool) -> Self {
        if print {
            DisplayMode::Print
        } else {
            DisplayMode::Edit
        }
    }

    pub fn is_print(&self) -> bool {
        matches!(self, DisplayMode::Print)
    }

    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Edit => DisplayMode::Print,
            DisplayMode::Print => DisplayMode::Edit,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DisplayMode::Edit => "edit",
            DisplayMode::Print => "print",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::from("Laptop").to_string(), "Laptop");
    }

    #[test]
    fn test_cell_value_from_input() {
        assert_eq!(CellValue::from_input(&FieldKind::Number, " 7 "), CellValue::Number(7.0));
        assert_eq!(CellValue::from_input(&FieldKind::Number, "seven"), CellValue::from("seven"));
        assert_eq!(CellValue::from_input(&FieldKind::Text, "7"), CellValue::from("7"));
    }

    #[test]
    fn test_as_number_rejects_non_finite() {
        assert_eq!(CellValue::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(CellValue::from("inf").as_number(), None);
        assert_eq!(CellValue::from("NaN").as_number(), None);
        assert_eq!(CellValue::from("-infinity").as_number(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_cell_value_untagged_json() {
        let values: Vec<CellValue> = serde_json::from_str(r#"[4, "four"]"#).unwrap();
        assert_eq!(values[0], CellValue::Number(4.0));
        assert_eq!(values[1], CellValue::from("four"));
    }

    #[test]
    fn test_row_serializes_dynamic_fields_camel_case() {
        let mut row = Row::blank(["assetDescription"]);
        row.dynamic_fields.insert("SerialNo".to_string(), "X123".into());
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["dynamicFields"]["SerialNo"], "X123");
        assert_eq!(json["fields"]["assetDescription"], "");
    }

    #[test]
    fn test_signature_record_type_key() {
        let record = SignatureRecord::typed("J. Doe", None);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "text");
        assert!(!record.is_empty());
    }
}
