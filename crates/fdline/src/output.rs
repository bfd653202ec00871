use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use fdline_reader::Line;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct LineOutput<'a> {
    source: &'a str,
    index: usize,
    end_of_stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ends_with_newline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Renders lines as they are read. Table output is buffered until
/// [`LinePrinter::finish`].
pub struct LinePrinter {
    format: OutputFormat,
    show_source: bool,
    table: Option<Table>,
}

impl LinePrinter {
    pub fn new(format: OutputFormat, show_source: bool) -> Self {
        let table = matches!(format, OutputFormat::Table).then(|| {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SOURCE", "LINE", "SIZE", "TEXT"]);
            table
        });
        Self {
            format,
            show_source,
            table,
        }
    }

    pub fn line(&mut self, source: &str, index: usize, line: &Line) {
        match self.format {
            OutputFormat::Json => print_json(&LineOutput {
                source,
                index,
                end_of_stream: false,
                len: Some(line.len()),
                ends_with_newline: Some(line.ends_with_newline()),
                text: Some(line.to_string_lossy().into_owned()),
            }),
            OutputFormat::Table => {
                if let Some(table) = self.table.as_mut() {
                    table.add_row(vec![
                        source.to_string(),
                        index.to_string(),
                        line.len().to_string(),
                        String::from_utf8_lossy(line.trimmed()).into_owned(),
                    ]);
                }
            }
            OutputFormat::Pretty => {
                let newline = if line.ends_with_newline() { "" } else { "\n" };
                print!(
                    "{}line [{index:02}]: {}{newline}",
                    self.prefix(source),
                    line.to_string_lossy()
                );
            }
            OutputFormat::Raw => print_raw(line.as_bytes()),
        }
    }

    pub fn end_of_stream(&mut self, source: &str, index: usize) {
        match self.format {
            OutputFormat::Json => print_json(&LineOutput {
                source,
                index,
                end_of_stream: true,
                len: None,
                ends_with_newline: None,
                text: None,
            }),
            OutputFormat::Table => {
                if let Some(table) = self.table.as_mut() {
                    table.add_row(vec![
                        source.to_string(),
                        index.to_string(),
                        "-".to_string(),
                        "(end of stream)".to_string(),
                    ]);
                }
            }
            OutputFormat::Pretty => {
                println!("{}line [{index:02}]: (end of stream)", self.prefix(source));
            }
            OutputFormat::Raw => {}
        }
    }

    pub fn finish(self) {
        if let Some(table) = self.table {
            println!("{table}");
        }
        let _ = std::io::stdout().flush();
    }

    fn prefix(&self, source: &str) -> String {
        if self.show_source {
            format!("{source} ")
        } else {
            String::new()
        }
    }
}

fn print_json(out: &LineOutput<'_>) {
    println!(
        "{}",
        serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}
