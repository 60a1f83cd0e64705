// Output formatting for CLI

use crate::cli::config::OutputFormat;
use id3v1tag::{Field, Id3v1Tag};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// JSON document emitted for one file
#[derive(Serialize)]
struct TagReport<'a> {
    file: &'a str,
    #[serde(flatten)]
    tag: &'a Id3v1Tag,
    genre_name: &'static str,
}

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output a tag, optionally restricted to some fields
    pub fn output_tag(
        &self,
        path: &Path,
        tag: &Id3v1Tag,
        fields: &[Field],
        writer: &mut impl Write,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Pretty => {
                if fields.is_empty() {
                    writeln!(writer, "{}", path.display())?;
                    writeln!(writer, "{}", tag)?;
                } else {
                    for field in fields {
                        writeln!(writer, "{}: {}", field, tag.field_value(*field))?;
                    }
                }
            }
            OutputFormat::Json => {
                let file = path.to_string_lossy();
                let report = TagReport {
                    file: &file,
                    tag,
                    genre_name: tag.genre_name(),
                };

                let mut value = serde_json::to_value(&report)?;
                if !fields.is_empty() {
                    if let Some(obj) = value.as_object_mut() {
                        obj.retain(|key, _| {
                            key == "file"
                                || (key == "genre_name" && fields.contains(&Field::Genre))
                                || fields.iter().any(|f| f.as_str() == key)
                        });
                    }
                }

                writeln!(writer, "{}", serde_json::to_string(&value)?)?;
            }
        }
        Ok(())
    }

    /// Output the genre table
    pub fn output_genres(&self, genres: &[&str], writer: &mut impl Write) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Pretty => {
                for (code, name) in genres.iter().enumerate() {
                    writeln!(writer, "{:>3} {}", code, name)?;
                }
            }
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(genres)?)?;
            }
        }
        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
}
