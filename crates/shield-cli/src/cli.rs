//! CLI argument definitions for the ParentShield client.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "parentshield",
    version,
    about = "ParentShield - fraud analysis client",
    long_about = "Submit evidence to the ParentShield analysis backends and view a\n\
                  fraud verdict.\n\n\
                  Screenshots go to the message analysis endpoint; transaction\n\
                  fields go to the prediction endpoint. Feedback is delivered\n\
                  through the form relay."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow extracted message text in log output.
    ///
    /// Extracted text comes from user screenshots and may contain personal
    /// messages; by default it is logged redacted.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a message screenshot for fraud.
    Message(MessageArgs),

    /// Analyze transaction fields for fraud.
    Transaction(TransactionArgs),

    /// Send feedback through the form relay.
    Feedback(FeedbackArgs),

    /// Show the dashboard tile arrangement.
    Dashboard(DashboardArgs),
}

#[derive(Parser)]
pub struct MessageArgs {
    /// Path to the screenshot image to analyze.
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Message analysis endpoint.
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,
}

#[derive(Parser)]
pub struct TransactionArgs {
    /// Transaction type (PAYMENT, TRANSFER, CASH_OUT, DEPOSIT).
    #[arg(long = "transaction-type", default_value = "PAYMENT")]
    pub transaction_type: String,

    /// Transaction amount.
    #[arg(long = "amount", value_name = "AMOUNT")]
    pub amount: String,

    /// Current account balance.
    #[arg(long = "balance", value_name = "BALANCE")]
    pub balance: String,

    /// Transaction prediction endpoint.
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,
}

#[derive(Parser)]
pub struct FeedbackArgs {
    /// Your name.
    #[arg(long = "name")]
    pub name: String,

    /// Your email address.
    #[arg(long = "email")]
    pub email: String,

    /// Feedback category.
    #[arg(long = "category", value_enum, default_value = "suggestion")]
    pub category: CategoryArg,

    /// Feedback message (10-1000 characters).
    #[arg(long = "message")]
    pub message: String,

    /// Relay access key (falls back to the WEB3FORMS_ACCESS_KEY variable).
    #[arg(long = "access-key")]
    pub access_key: Option<String>,

    /// Relay endpoint.
    #[arg(long = "relay-endpoint", value_name = "URL")]
    pub relay_endpoint: Option<String>,
}

#[derive(Parser)]
pub struct DashboardArgs {
    /// Swap two tiles, as ITEM:ITEM (repeatable).
    #[arg(long = "swap", value_name = "A:B")]
    pub swap: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Suggestion,
    Bug,
    Feature,
    Improvement,
    Complaint,
}

impl CategoryArg {
    /// The form value for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suggestion => "suggestion",
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Improvement => "improvement",
            Self::Complaint => "complaint",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
