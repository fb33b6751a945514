//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - colored headings and summaries around the tables
    #[default]
    Pretty,
    /// Table format - tables only
    Table,
    /// JSON format - structured for scripts
    Json,
}
