//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Modelform - browse host models and generate form schemas
#[derive(Parser, Debug)]
#[command(name = "mf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the configured apps and their models
    Apps(AppsArgs),

    /// Show the declared fields of every model of an app
    Fields(FieldsArgs),

    /// Print the schema of selected model fields
    Schema(SchemaArgs),

    /// Serve the schema browser and HTTP API
    Serve(ServeArgs),
}

/// Arguments for the apps command
#[derive(Args, Debug)]
pub struct AppsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: ListOutput,
}

/// Arguments for the fields command
#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// App to inspect (a version prefix is stripped)
    pub namespace: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: ListOutput,
}

/// Arguments for the schema command
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// App the model is registered under (a version prefix is stripped)
    pub namespace: String,

    /// Model name
    #[arg(short, long)]
    pub model: String,

    /// Fields to include (comma-separated, default: the model's form fields)
    #[arg(short, long)]
    pub fields: Option<String>,

    /// Schema style (`one`); anything else prints the raw schema
    #[arg(short, long)]
    pub style: Option<String>,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value = "8000")]
    pub port: u16,
}

/// Output formats for listing commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}
