use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_filter_name(value: &str) -> Result<String, String> {
    match value {
        "required" | "upcoming" | "all" => Ok(value.to_string()),
        _ => Err("filter must be one of: required, upcoming, all".to_string()),
    }
}

/// Extended help shown after `duesly import create --help`.
/// Contains workflow guidance, schema, and next-step instructions.
pub const IMPORT_CREATE_AFTER_HELP: &str = "\
How import works:
  Duesly does not talk to your club software directly.
  You export payment requests into a normalized file, then import it.

  Accepted formats:
    JSON — one top-level array of payment request objects
    CSV  — one header row with schema field names

  <path> is a local file path.
  To read stdin explicitly, use `-` as the path.
  Example: cat requests.json | duesly import create --dry-run -
  One import call takes one file. For multiple files, combine
  first or run multiple import commands.

What to do next:
  1. Export your club's payment requests into normalized JSON or CSV.
  2. Run `duesly import create --dry-run <path>` and fix any reported issues.
  3. Run `duesly import create <path>` once dry-run passes.

Import schema:
  JSON example (one top-level array):
  [
    {
      \"title\": \"Spring season dues\",
      \"amount\": 50.00,
      \"currency\": \"USD\",
      \"payment_type\": \"required\",
      \"payment_status\": \"unpaid\",
      \"due_date\": \"2026-04-01\",
      \"member\": \"Avery Jones\",
      \"external_id\": \"pr_12345\"
    }
  ]

  CSV example (header + rows):
  title,amount,currency,payment_type,payment_status,due_date,member,external_id
  Spring season dues,50.00,USD,required,unpaid,2026-04-01,Avery Jones,pr_12345
  Team dinner,20.00,USD,optional,unpaid,,Avery Jones,pr_12346

Field rules (very explicit):
  title (required):
    What the payment is for. Example: `Spring season dues`

  amount (required):
    A number, not text. Use at most 2 decimal places. Example: `50.00`

  currency (required):
    3-letter ISO code. Stored uppercased. Example: `USD`

  payment_type (required):
    `required` or `optional`. Required requests feed the reminder badge.

  payment_status (required):
    `paid`, `unpaid`, or `pending`. Pending counts as not-yet-paid.

  due_date (optional):
    Date only, exactly `YYYY-MM-DD`, when the request has a deadline.
    Omit it for open-ended requests; they are kept but never classified
    as due, overdue, or upcoming.

  member (optional):
    Who the request is assigned to, if you track that.

  external_id (optional):
    Upstream request ID if your club software provides one.
    If present in your source, keep it exactly as given.
";

#[derive(Debug, Parser)]
#[command(
    name = "duesly",
    version,
    about = "local dues and payment request tracker",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect and filter imported payment requests
    #[command(arg_required_else_help = true)]
    Request {
        #[command(subcommand)]
        command: RequestCommand,
    },
    /// Show the reminder badge count for required unpaid requests
    Badge {
        /// Classify as of this date instead of today (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        as_of: Option<IsoDate>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Manage payment request imports
    #[command(arg_required_else_help = true)]
    Import {
        #[command(subcommand)]
        command: ImportCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum RequestCommand {
    /// List active payment requests through a named filter
    List {
        /// Filter to apply: required, upcoming, or all (default: all)
        #[arg(long, value_parser = parse_filter_name)]
        filter: Option<String>,
        /// Classify as of this date instead of today (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        as_of: Option<IsoDate>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show unpaid requests due inside a time window
    Due {
        /// Inclusive day window starting today (default: 7)
        #[arg(long)]
        within: Option<i64>,
        /// Use the rest of the current calendar month as the window
        #[arg(long)]
        this_month: bool,
        /// Classify as of this date instead of today (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        as_of: Option<IsoDate>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ImportCommand {
    /// Import normalized payment request data into your local Duesly ledger
    #[command(after_long_help = IMPORT_CREATE_AFTER_HELP)]
    Create {
        /// Validate import data without writing to the ledger
        #[arg(long)]
        dry_run: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
        /// Path to a normalized JSON or CSV file (use `-` for stdin)
        path: Option<String>,
    },
    /// List all past imports with their status and row counts
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Revert a previously committed import
    Undo {
        /// The import ID to revert (e.g. imp_abc123)
        import_id: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    use clap::Parser;
    Cli::try_parse_from(itr)
}
