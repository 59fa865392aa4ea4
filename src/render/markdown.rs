use crate::render::{RenderError, RenderOptions, TableRenderer};
use crate::table::Table;

/// Markdown pipe-table renderer.
///
/// Emits `| a | b |` rows; when a header is requested the column labels are
/// followed by a `----------|` separator row. Pipe characters in cell text
/// are escaped and newlines collapsed to spaces.
pub(crate) struct MarkdownRenderer;

fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl TableRenderer for MarkdownRenderer {
    fn render(&self, table: &Table, options: &RenderOptions) -> Result<String, RenderError> {
        if table.height() == 0 || table.width() == 0 {
            return Ok(String::new());
        }

        let row_labels = options.include_index.then(|| table.row_labels()).flatten();
        let mut buffer = String::new();

        if options.include_header {
            if let Some(column_labels) = table.column_labels() {
                buffer.push('|');
                if row_labels.is_some() {
                    buffer.push_str("  |"); // Blank corner over the row-label column
                }
                for label in column_labels {
                    buffer.push_str(&format!(" {} |", escape(label)));
                }
                buffer.push('\n');

                let separator_count = column_labels.len() + usize::from(row_labels.is_some());
                buffer.push('|');
                for _ in 0..separator_count {
                    buffer.push_str("----------|");
                }
                buffer.push('\n');
            }
        }

        for (index, row) in table.rows().iter().enumerate() {
            buffer.push('|');
            if let Some(labels) = row_labels {
                buffer.push_str(&format!(" {} |", escape(&labels[index])));
            }
            for cell in row {
                buffer.push_str(&format!(" {} |", escape(&cell.to_string())));
            }
            buffer.push('\n');
        }

        Ok(buffer)
    }
}
