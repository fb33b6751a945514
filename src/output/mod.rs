//! Output formatting for CLI results

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod table;

/// Rows that render as a table or as JSON
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat, data_as_of: Option<DateTime<Utc>>) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat, data_as_of: Option<DateTime<Utc>>) -> Result<()> {
        println!("{}", self.format(format, data_as_of)?);
        Ok(())
    }
}

/// Display rows that know which of their columns hold numbers
pub trait DisplayRow: Tabled + Serialize {
    const NUMERIC_COLUMNS: &'static [usize] = &[];
}

impl<T: DisplayRow> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat, data_as_of: Option<DateTime<Utc>>) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(json::format_json(self, data_as_of)?),
            OutputFormat::Table | OutputFormat::Pretty => {
                Ok(table::format_table(self, T::NUMERIC_COLUMNS))
            }
        }
    }
}
