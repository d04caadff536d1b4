use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "civicwatch",
    about = "CivicWatch: ward routing, responsibility assignment, and SLA tracking for civic issue reports",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// File a new issue report and route it to a ward, department, and contractor
    Submit {
        /// Short title for the report
        #[arg(long)]
        title: String,

        /// Free-text details
        #[arg(long, default_value = "")]
        description: String,

        /// Category: road_damage, garbage, water_leak, broken_infra, other
        #[arg(long)]
        category: Option<String>,

        /// Free-text category, used alongside `other`
        #[arg(long)]
        custom_category: Option<String>,

        /// Severity: low, medium, critical
        #[arg(long, default_value = "medium")]
        severity: String,

        /// Image reference (URL or storage key)
        #[arg(long, default_value = "")]
        image: String,

        /// Latitude of the report location
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude of the report location
        #[arg(long)]
        lon: Option<f64>,

        /// Free-text address
        #[arg(long, default_value = "")]
        address: String,

        /// Reporting user identifier
        #[arg(long, default_value = "")]
        user: String,

        /// Explicit submission time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,

        /// Path to a routing-tables TOML (defaults to the built-ins)
        #[arg(long)]
        config: Option<String>,

        /// Path to issues JSONL
        #[arg(long, default_value = ".civicwatch/issues.jsonl")]
        issues: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update an issue's status, appending a timeline event
    Update {
        /// Issue id
        id: String,

        /// New status: open, acknowledged, resolved
        #[arg(long)]
        status: String,

        /// Timeline event description
        #[arg(long, default_value = "")]
        description: String,

        /// Actor attribution for the event
        #[arg(long, default_value = "system")]
        by: String,

        /// Path to issues JSONL
        #[arg(long, default_value = ".civicwatch/issues.jsonl")]
        issues: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List issues, newest first
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Filter by severity
        #[arg(long)]
        severity: Option<String>,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        /// Filter by ward id
        #[arg(long)]
        zone: Option<String>,

        /// Only issues past their SLA deadline
        #[arg(long)]
        overdue: bool,

        /// Cap the result count
        #[arg(long)]
        limit: Option<usize>,

        /// Path to a routing-tables TOML (defaults to the built-ins)
        #[arg(long)]
        config: Option<String>,

        /// Path to issues JSONL
        #[arg(long, default_value = ".civicwatch/issues.jsonl")]
        issues: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one issue in full, recording a view
    Show {
        /// Issue id
        id: String,

        /// Path to a routing-tables TOML (defaults to the built-ins)
        #[arg(long)]
        config: Option<String>,

        /// Path to issues JSONL
        #[arg(long, default_value = ".civicwatch/issues.jsonl")]
        issues: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up an issue by its public share token
    Share {
        /// Share token
        token: String,

        /// Path to a routing-tables TOML (defaults to the built-ins)
        #[arg(long)]
        config: Option<String>,

        /// Path to issues JSONL
        #[arg(long, default_value = ".civicwatch/issues.jsonl")]
        issues: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Aggregate statistics for the ranking dashboard
    Stats {
        /// Path to issues JSONL
        #[arg(long, default_value = ".civicwatch/issues.jsonl")]
        issues: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
