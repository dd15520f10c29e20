use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rStaffer
/// CLI application to track per-day staff utilization with SQLite
#[derive(Parser)]
#[command(
    name = "rstaffer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track per-day staff utilization, coalesced into ranges and verified week by week",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage utilization types
    Type {
        #[arg(long = "add", value_name = "NAME", help = "Add a utilization type")]
        add: Option<String>,

        #[arg(long = "list", help = "List the utilization types")]
        list: bool,
    },

    /// Assign a utilization type to one day
    Set {
        employee: String,

        /// Day to assign (YYYY-MM-DD)
        date: String,

        /// Utilization type, by name or id
        #[arg(value_name = "TYPE")]
        utilization_type: String,

        #[arg(long = "verified", help = "Mark the assigned day as verified")]
        verified: bool,
    },

    /// Mark a range of days as verified
    Verify {
        employee: String,

        /// First day of the range (YYYY-MM-DD)
        date: String,

        #[arg(
            long = "through",
            value_name = "DAYS",
            help = "Days after DATE included in the range (default from config)"
        )]
        through: Option<u32>,
    },

    /// Split the utilization covering a day so that a range starts there
    Split {
        employee: String,

        /// Day the new range starts on (YYYY-MM-DD)
        date: String,
    },

    /// Show the utilization of an employee
    Show {
        employee: String,

        #[arg(long = "date", help = "Show the utilization covering this day")]
        date: Option<String>,

        #[arg(
            long = "offset",
            default_value_t = 0,
            allow_hyphen_values = true,
            requires = "date",
            help = "Shift --date by a number of days"
        )]
        offset: i64,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Export stored utilizations
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "employee", help = "Export only this employee")]
        employee: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
