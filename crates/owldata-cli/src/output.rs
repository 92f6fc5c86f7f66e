use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::commands::CommandResult;
use crate::error::CliError;

pub fn render(result: &CommandResult, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }

    match format {
        OutputFormat::Json => {
            let payload = json!({ "data": result.data, "warnings": result.warnings });
            let payload = if pretty {
                serde_json::to_string_pretty(&payload)?
            } else {
                serde_json::to_string(&payload)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => match render_table(&result.data) {
            Some(table) => print!("{table}"),
            None => println!("{}", serde_json::to_string_pretty(&result.data)?),
        },
    }

    Ok(())
}

/// Renders `{columns, rows}` data as aligned text; `None` for any other shape.
fn render_table(data: &Value) -> Option<String> {
    let columns: Vec<String> = data
        .get("columns")?
        .as_array()?
        .iter()
        .map(cell_text)
        .collect();
    let rows: Vec<Vec<String>> = data
        .get("rows")?
        .as_array()?
        .iter()
        .map(|row| {
            row.as_array()
                .map(|cells| cells.iter().map(cell_text).collect())
                .unwrap_or_default()
        })
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| display_width(c)).collect();
    for row in &rows {
        for (index, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                *width = (*width).max(display_width(cell));
            }
        }
    }

    let mut out = String::new();
    push_line(&mut out, &columns, &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    Some(out)
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(display_width(cell));
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::from("NaN"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Terminal columns taken by `text`; CJK characters count double.
fn display_width(text: &str) -> usize {
    text.chars()
        .map(|ch| if is_wide(ch) { 2 } else { 1 })
        .sum()
}

fn is_wide(ch: char) -> bool {
    matches!(
        u32::from(ch),
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFE30..=0xFE4F | 0xFF00..=0xFF60 | 0xFFE0..=0xFFE6
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns_with_wide_characters() {
        let data = json!({
            "columns": ["日期", "close"],
            "rows": [["2019-01-02", 219.5], ["2019-01-03", null]]
        });

        let rendered = render_table(&data).expect("tabular data");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "日期        close");
        assert_eq!(lines[1], "----------  -----");
        assert_eq!(lines[2], "2019-01-02  219.5");
        assert_eq!(lines[3], "2019-01-03  NaN");
    }

    #[test]
    fn non_tabular_data_is_not_rendered_as_table() {
        assert!(render_table(&json!({ "count": 3 })).is_none());
    }
}
