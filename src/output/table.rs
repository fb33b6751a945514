//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{
        Alignment, Modify, Style,
        object::{Columns, Rows},
    },
};

/// Format rows as a table, right-aligning the given column indexes
pub fn format_table<T: Tabled>(rows: &[T], numeric_columns: &[usize]) -> String {
    if rows.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    for &column in numeric_columns {
        table.with(Modify::new(Columns::new(column..column + 1)).with(Alignment::right()));
    }
    table.with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
