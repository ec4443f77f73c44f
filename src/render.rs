//! Projection of change records into display strings and HTML table rows.
//!
//! Nothing here computes prices; it only formats what [`crate::change`]
//! produced.

use crate::models::{ChangeRecord, Direction, PercentLayout};

pub const UP_GLYPH: &str = "▲";
pub const DOWN_GLYPH: &str = "▼";
pub const POSITIVE_CLASS: &str = "positive-change";
pub const NEGATIVE_CLASS: &str = "negative-change";

// ---------------------------------------------------------------------------
// RenderedRow
// ---------------------------------------------------------------------------

/// One instrument's display strings, before HTML wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub name: String,
    pub close: String,
    pub direction: Direction,
    /// Absolute percent change to 2 decimals, without sign or `%`.
    pub percent: String,
}

impl RenderedRow {
    pub fn glyph(&self) -> &'static str {
        match self.direction {
            Direction::Up => UP_GLYPH,
            Direction::Down => DOWN_GLYPH,
        }
    }

    pub fn style_class(&self) -> &'static str {
        match self.direction {
            Direction::Up => POSITIVE_CLASS,
            Direction::Down => NEGATIVE_CLASS,
        }
    }
}

/// Project records into display rows, keeping record order.
pub fn render_rows(records: &[ChangeRecord]) -> Vec<RenderedRow> {
    let closes: Vec<f64> = records.iter().map(|r| r.latest_close).collect();
    let closes = format_closes(&closes);

    records
        .iter()
        .zip(closes)
        .map(|(r, close)| RenderedRow {
            name: r.name.clone(),
            close,
            direction: r.direction,
            percent: format!("{:.2}", r.percent_change.abs()),
        })
        .collect()
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a column of closes the way a data table prints a float column.
///
/// Values are rounded to 2 decimals, then the whole column shares one
/// precision: 1 decimal if every value fits, otherwise 2.
pub fn format_closes(values: &[f64]) -> Vec<String> {
    let rounded: Vec<f64> = values.iter().map(|v| round2(*v)).collect();
    let precision = if rounded.iter().all(|v| format!("{:.2}", v).ends_with('0')) {
        1
    } else {
        2
    };
    rounded
        .iter()
        .map(|v| format!("{:.*}", precision, v))
        .collect()
}

/// Escape text for an HTML element body.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

fn styled(class: &str, text: &str) -> String {
    format!("<span class=\"{}\">{}</span>", class, text)
}

/// Render one `<tr>` per row, no header.
pub fn render_table(rows: &[RenderedRow], layout: PercentLayout) -> String {
    let mut html = String::new();
    for row in rows {
        let class = row.style_class();
        let mut cells = vec![
            escape_html(&row.name),
            row.close.clone(),
            styled(class, row.glyph()),
        ];
        match layout {
            PercentLayout::Separate => {
                cells.push(styled(class, "%"));
                cells.push(styled(class, &row.percent));
            }
            PercentLayout::Inline => {
                cells.push(styled(class, &format!("{}%", row.percent)));
            }
        }

        html.push_str("        <tr>\n");
        for cell in cells {
            html.push_str("          <td>");
            html.push_str(&cell);
            html.push_str("</td>\n");
        }
        html.push_str("        </tr>\n");
    }
    html
}
