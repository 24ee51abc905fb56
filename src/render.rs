//! Plain-text and CSV output of a mounted form

use anyhow::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::editor::{TableView, ViewCell};
use crate::form::{FormShell, SignatureView};

/// Truncate to a display width, marking the cut with `…`
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn cell_text(cell: &ViewCell) -> String {
    match cell {
        ViewCell::Text(text) => text.clone(),
        ViewCell::Input { value, .. } => format!("[{}]", value),
        ViewCell::RemoveRow(_) => "[remove]".to_string(),
    }
}

/// Render the table as aligned text columns
pub fn render_table(view: &TableView, max_cell_width: usize) -> String {
    let body: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|c| truncate_to_width(&cell_text(c), max_cell_width))
                .collect()
        })
        .collect();
    let headers: Vec<String> = view
        .headers
        .iter()
        .map(|h| truncate_to_width(h, max_cell_width))
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            body.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.width())
                .chain(std::iter::once(headers[i].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n", view.title));
    out.push_str(&line(&headers));
    out.push('\n');
    let rule_width = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');
    if body.is_empty() {
        out.push_str("(no rows)\n");
    }
    for row in &body {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

/// Render the whole form: header, table, summary and signatures
pub fn render_form(shell: &FormShell, max_cell_width: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} - {} ({} mode)\n",
        shell.schema.title,
        shell.schema.category,
        shell.mode.as_str()
    ));
    out.push_str(&"=".repeat(shell.schema.title.width().max(20)));
    out.push_str("\n\n");

    let label_width = shell
        .schema
        .header_fields
        .iter()
        .map(|f| f.label.width())
        .max()
        .unwrap_or(0);
    for field in &shell.schema.header_fields {
        let value = shell
            .header_value(&field.name)
            .map(|v| v.to_string())
            .unwrap_or_default();
        out.push_str(&format!("{}: {}\n", pad(&field.label, label_width), value));
    }
    out.push('\n');

    out.push_str(&render_table(&shell.table_view(), max_cell_width));

    let summary = shell.summary();
    out.push_str(&format!("\nRows: {}\n", summary.row_count));
    if let Some((field, counts)) = &summary.tally {
        let label = shell
            .table()
            .schema
            .field(field)
            .map(|f| f.label.as_str())
            .unwrap_or(field.as_str());
        let parts: Vec<String> = counts.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        out.push_str(&format!("{} tally: {}\n", label, parts.join(", ")));
    }
    if let Some(total) = summary.total_variance {
        out.push_str(&format!("Total variance: {}\n", total));
    }

    out.push('\n');
    for view in shell.signature_views() {
        match view {
            SignatureView::Editable { slot, name, date } => {
                out.push_str(&format!("{}: [{}] date [{}]\n", slot, name, date));
            }
            SignatureView::Printed { slot, text, date } => match date {
                Some(date) => out.push_str(&format!("{}: {}  Date: {}\n", slot, text, date)),
                None => out.push_str(&format!("{}: {}\n", slot, text)),
            },
        }
    }
    out
}

/// Write the table view as CSV; controls are exported by their displayed text
pub fn table_to_csv(view: &TableView) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&view.headers)?;
    for row in &view.rows {
        writer.write_record(row.cells.iter().map(|c| c.display()))?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{CellTarget, EditorCommand};
    use crate::models::DisplayMode;

    fn shell() -> FormShell {
        let mut shell = FormShell::from_catalog("asset-request").unwrap();
        shell.propose_column("Serial No");
        shell
            .apply(EditorCommand::SetCell {
                row: 0,
                target: CellTarget::Fixed("assetDescription".into()),
                value: "Laptop".into(),
            })
            .unwrap();
        shell
            .apply(EditorCommand::SetCell {
                row: 0,
                target: CellTarget::Dynamic("SerialNo".into()),
                value: "X123".into(),
            })
            .unwrap();
        shell
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_print_render_has_no_controls() {
        let shell = shell().with_mode(DisplayMode::Print);
        let text = render_form(&shell, 24);
        assert!(text.contains("Laptop"));
        assert!(text.contains("X123"));
        assert!(!text.contains('['));
        assert!(text.contains(crate::form::signature::BLANK_SIGNATURE));
    }

    #[test]
    fn test_edit_render_shows_controls() {
        let text = render_table(&shell().table_view(), 24);
        assert!(text.contains("[Laptop]"));
        assert!(text.contains("[remove]"));
        assert!(text.contains("Action"));
    }

    #[test]
    fn test_csv_export() {
        let shell = shell().with_mode(DisplayMode::Print);
        let csv = table_to_csv(&shell.table_view()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Asset Description,Quantity,Estimated Cost,Serial No")
        );
        assert_eq!(lines.next(), Some("Laptop,,,X123"));
    }

    #[test]
    fn test_tax_form_shows_variance() {
        let mut shell = FormShell::from_catalog("tax-assessment").unwrap();
        for (field, value) in [("assessedAmount", "1200"), ("paidAmount", "200")] {
            shell
                .apply(EditorCommand::SetCell {
                    row: 0,
                    target: CellTarget::Fixed(field.into()),
                    value: value.into(),
                })
                .unwrap();
        }
        let text = render_form(&shell, 24);
        assert!(text.contains("Total variance: 1000"));
    }
}
