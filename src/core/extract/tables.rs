//! Structured table rendering.
//!
//! Turns table cell grids from pre-analyzed layout documents into
//! `<table>` HTML. The sectionizer keys its table-continuity rule on
//! these markers, so the rendering here is the one producer of table
//! markup in the pipeline.

use serde::{Deserialize, Serialize};

/// Role of a cell within its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    ColumnHeader,
    RowHeader,
    #[default]
    Data,
}

/// A single table cell from layout analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    /// 0-based row position
    pub row_index: usize,

    /// 0-based column position
    pub column_index: usize,

    /// Rows spanned (1 for normal cells)
    #[serde(default = "default_span")]
    pub row_span: usize,

    /// Columns spanned (1 for normal cells)
    #[serde(default = "default_span")]
    pub column_span: usize,

    /// Cell role (headers render as `<th>`)
    #[serde(default)]
    pub kind: CellKind,

    /// Cell text content (escaped during rendering)
    pub content: String,
}

fn default_span() -> usize {
    1
}

/// A table extracted by layout analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Number of rows in the grid
    pub row_count: usize,

    /// Cells in arbitrary order; rendering sorts by position
    pub cells: Vec<TableCell>,
}

/// Render a table as `<table>` HTML.
///
/// Header cells become `<th>`, others `<td>`; spans > 1 emit
/// `colSpan`/`rowSpan` attributes; cell content is HTML-escaped.
pub fn table_to_html(table: &Table) -> String {
    let mut html = String::from("<table>");

    for row in 0..table.row_count {
        let mut row_cells: Vec<&TableCell> = table
            .cells
            .iter()
            .filter(|cell| cell.row_index == row)
            .collect();
        row_cells.sort_by_key(|cell| cell.column_index);

        html.push_str("<tr>");
        for cell in row_cells {
            let tag = match cell.kind {
                CellKind::ColumnHeader | CellKind::RowHeader => "th",
                CellKind::Data => "td",
            };

            let mut spans = String::new();
            if cell.column_span > 1 {
                spans.push_str(&format!(" colSpan={}", cell.column_span));
            }
            if cell.row_span > 1 {
                spans.push_str(&format!(" rowSpan={}", cell.row_span));
            }

            html.push_str(&format!(
                "<{tag}{spans}>{}</{tag}>",
                escape_html(&cell.content)
            ));
        }
        html.push_str("</tr>");
    }

    html.push_str("</table>");
    html
}

/// Escape the five HTML-significant characters in cell content.
fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
