use crate::render::{RenderError, RenderOptions, TableRenderer};
use crate::table::Table;
use csv::{Terminator, WriterBuilder};

/// Comma-separated values renderer.
///
/// Quotes fields only when necessary, terminates every record with a single
/// newline. Recognized overrides in the options bag: `delimiter` (single
/// character) and `terminator` ("\n" or "\r\n").
pub(crate) struct CsvRenderer;

impl TableRenderer for CsvRenderer {
    fn render(&self, table: &Table, options: &RenderOptions) -> Result<String, RenderError> {
        if table.height() == 0 || table.width() == 0 {
            return Ok(String::new());
        }

        let mut builder = WriterBuilder::new();
        if let Some(delimiter) = options
            .extra_str("delimiter")
            .and_then(|value| value.bytes().next())
        {
            builder.delimiter(delimiter);
        }
        if let Some(terminator) = options.extra_str("terminator") {
            builder.terminator(match terminator {
                "\r\n" => Terminator::CRLF,
                other => Terminator::Any(other.bytes().next().unwrap_or(b'\n')),
            });
        }
        let mut writer = builder.from_writer(Vec::new());

        let row_labels = options.include_index.then(|| table.row_labels()).flatten();

        if options.include_header {
            if let Some(column_labels) = table.column_labels() {
                let mut header: Vec<&str> = Vec::with_capacity(table.width() + 1);
                if row_labels.is_some() {
                    header.push(""); // Blank corner over the row-label column
                }
                header.extend(column_labels.iter().map(String::as_str));
                writer.write_record(&header)?;
            }
        }

        for (index, row) in table.rows().iter().enumerate() {
            let mut record: Vec<String> = Vec::with_capacity(table.width() + 1);
            if let Some(labels) = row_labels {
                record.push(labels[index].clone());
            }
            record.extend(row.iter().map(ToString::to_string));
            writer.write_record(&record)?;
        }

        let buffer = writer
            .into_inner()
            .map_err(|error| csv::Error::from(error.into_error()))?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;
    use crate::table::{CellValue, Table};
    use serde_json::json;

    fn table_2x2() -> Table {
        Table::from_rows(vec![
            vec![CellValue::Number(1.0), CellValue::Number(2.0)],
            vec![CellValue::Number(3.0), CellValue::Number(4.0)],
        ])
    }

    #[test]
    fn plain_rows_without_header_or_index() {
        let rendered = CsvRenderer
            .render(&table_2x2(), &RenderOptions::default())
            .unwrap();
        assert_eq!(rendered, "1,2\n3,4\n");
    }

    #[test]
    fn labels_rendered_as_header_and_index() {
        let mut table = table_2x2();
        table.annotate();
        let options = RenderOptions {
            include_header: true,
            include_index: true,
            ..RenderOptions::default()
        };
        let rendered = CsvRenderer.render(&table, &options).unwrap();
        assert_eq!(rendered, ",A,B\n1,1,2\n2,3,4\n");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let table = Table::from_rows(vec![vec![
            CellValue::Text("a,b".to_owned()),
            CellValue::Text("plain".to_owned()),
        ]]);
        let rendered = CsvRenderer.render(&table, &RenderOptions::default()).unwrap();
        assert_eq!(rendered, "\"a,b\",plain\n");
    }

    #[test]
    fn delimiter_override() {
        let mut options = RenderOptions::default();
        options.extra.insert("delimiter".to_owned(), json!(";"));
        let rendered = CsvRenderer.render(&table_2x2(), &options).unwrap();
        assert_eq!(rendered, "1;2\n3;4\n");
    }

    #[test]
    fn empty_table_renders_empty_string() {
        let options = RenderOptions {
            include_header: true,
            include_index: true,
            ..RenderOptions::default()
        };
        let rendered = CsvRenderer.render(&Table::default(), &options).unwrap();
        assert_eq!(rendered, "");
    }
}
