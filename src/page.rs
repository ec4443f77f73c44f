//! Static HTML page around the rendered table, and writing it to disk.
//!
//! The page carries its own stylesheet and a "Download as PNG" button. The
//! button loads html2canvas from its CDN in the browser and saves the table
//! container as an image; the generating process never runs that script.

use crate::config;
use crate::error::Result;
use crate::models::PercentLayout;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Column-4 rule for each layout. In the separate layout column 4 is the
/// `%` sign hugging the value in column 5.
fn fourth_column_css(layout: PercentLayout) -> &'static str {
    match layout {
        PercentLayout::Separate => {
            "text-align: left;\n            padding-right: 4px;"
        }
        PercentLayout::Inline => "text-align: right;",
    }
}

/// Build the complete HTML document around pre-rendered `<tr>` rows.
///
/// Output depends only on the arguments, so identical input produces
/// byte-identical pages.
pub fn render_page(table_rows: &str, layout: PercentLayout) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <style>
        @import url('{font_url}');

        .styled-table {{
            font-family: 'IBM Plex Sans', Arial, sans-serif;
            font-size: 17pt;
            background-color: #fafbfc;
            border-collapse: collapse;
            border-style: hidden;
        }}

        .styled-table td {{
            padding: 6px 20px;
            text-align: center;
            border-bottom: 1px solid #e5e5e5;
        }}

        .styled-table td:first-child {{
            border-right: 1px solid #e5e5e5;
            text-align: left;
        }}

        .styled-table td:nth-child(2) {{
            text-align: right;
        }}

        .styled-table td:nth-child(3) {{
            font-size: 19pt;
        }}

        .styled-table td:nth-child(4) {{
            {fourth_column}
        }}

        .styled-table td:nth-child(5) {{
            text-align: left;
            padding-left: 4px;
        }}

        .styled-table-container {{
            border: 1px solid #e5e5e5;
            border-bottom-width: 0.01px;
            border-radius: 16px;
            box-shadow: 0 4px 4px 0 rgba(0, 0, 0, 0.08);
            overflow: hidden;
            display: inline-block;
        }}

        .positive-change {{
            color: #00ca1b;
        }}

        .negative-change {{
            color: #ff0000;
        }}
    </style>
</head>
<body>
<div class="styled-table-container">
    <table class="styled-table">
      <tbody>
{rows}      </tbody>
    </table>
</div>
<button class="download-button" onclick="downloadTableAsPNG()">Download as PNG</button>
<script src="{html2canvas_url}"></script>
<script>
    function downloadTableAsPNG() {{
        const tableContainer = document.querySelector('.styled-table-container');

        html2canvas(tableContainer, {{backgroundColor: null}}).then(function (canvas) {{
            const image = canvas.toDataURL('image/png');
            const link = document.createElement('a');
            link.href = image;
            link.download = '{png_name}';
            link.click();
        }});
    }}
</script>
</body>
</html>
"#,
        font_url = config::FONT_IMPORT_URL,
        fourth_column = fourth_column_css(layout),
        rows = table_rows,
        html2canvas_url = config::HTML2CANVAS_URL,
        png_name = config::PNG_FILE_NAME,
    )
}

/// Write `html` to [`config::OUTPUT_FILE_NAME`] inside `dir`, replacing any
/// existing file.
///
/// The page is written to a temp file in the same directory and renamed
/// into place, so a failed write never leaves a truncated page behind.
pub fn write_page(dir: &Path, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let dest = dir.join(config::OUTPUT_FILE_NAME);

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(html.as_bytes())?;
    tmp.flush()?;
    tmp.persist(&dest).map_err(|e| e.error)?;

    log::debug!("Wrote {} bytes to {}", html.len(), dest.display());
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_embeds_rows_and_export_script() {
        let html = render_page("        <tr><td>X</td></tr>\n", PercentLayout::Separate);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<tr><td>X</td></tr>"));
        assert!(html.contains(config::HTML2CANVAS_URL));
        assert!(html.contains("link.download = 'closing_data_table.png';"));
        assert!(html.contains("padding-right: 4px;"));
    }

    #[test]
    fn inline_layout_right_aligns_fourth_column() {
        let html = render_page("", PercentLayout::Inline);
        assert!(html.contains(".styled-table td:nth-child(4) {\n            text-align: right;"));
    }

    #[test]
    fn write_page_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_page(dir.path(), "old").unwrap();
        let second = write_page(dir.path(), "new").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.file_name().unwrap(), config::OUTPUT_FILE_NAME);
        assert_eq!(fs::read_to_string(&second).unwrap(), "new");
    }
}
