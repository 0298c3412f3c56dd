//! ups-admin - push server administration
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Command line front end for `ups-core`: lists, creates and deletes push
//! applications and their Android/iOS variants.
//!
//! # Configuration
//!
//! Settings are layered, later sources winning:
//!
//! ```text
//! defaults
//!   < ~/.ups-admin/config.toml   ($UPS_ADMIN_HOME overrides the directory)
//!   < UPS_URL / UPS_PAGE_SIZE
//!   < --url / --page-size / --timeout
//! ```

pub mod cmd;
pub mod ui;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ups-admin")]
#[command(author, version, about = "ups-admin - manage push applications and variants")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted before or after any subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// REST root of the server, e.g. http://localhost:8080/rest
    #[arg(long, global = true, env = "UPS_URL")]
    pub url: Option<String>,

    /// Items requested per list page
    #[arg(long, global = true, env = "UPS_PAGE_SIZE")]
    pub page_size: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Config file to read instead of ~/.ups-admin/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Log each request to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage push applications
    App {
        #[command(subcommand)]
        command: AppCommands,
    },
    /// Manage the variants of an application
    Variant {
        #[command(subcommand)]
        command: VariantCommands,
    },
    /// Show the effective configuration
    Config,
}

#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// List applications (first page unless filtered or --all)
    List {
        /// Filter as key=value (pushApplicationID, name, developer)
        #[arg(long = "filter", short = 'f', value_name = "KEY=VALUE")]
        filters: Vec<String>,
        /// Walk every page
        #[arg(long, conflicts_with = "filters")]
        all: bool,
    },
    /// Create an application
    Create {
        /// Application name
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Owning developer (server default: admin)
        #[arg(long)]
        developer: Option<String>,
    },
    /// Delete an application
    Delete {
        /// pushApplicationID
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum VariantCommands {
    /// List the variants of an application
    List {
        /// Parent pushApplicationID
        app_id: String,
        /// Filter as key=value (variantID, name, developer, type)
        #[arg(long = "filter", short = 'f', value_name = "KEY=VALUE")]
        filters: Vec<String>,
        /// Walk every page
        #[arg(long, conflicts_with = "filters")]
        all: bool,
    },
    /// Create an Android variant
    CreateAndroid {
        /// Parent pushApplicationID
        app_id: String,
        /// Variant name
        name: String,
        /// FCM server key
        #[arg(long)]
        google_key: String,
        /// FCM sender id
        #[arg(long)]
        project_number: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        developer: Option<String>,
    },
    /// Create an iOS variant from an APNs .p12 certificate
    CreateIos {
        /// Parent pushApplicationID
        app_id: String,
        /// Variant name
        name: String,
        /// Path to the .p12 certificate
        #[arg(long)]
        certificate: PathBuf,
        /// Certificate passphrase
        #[arg(long, env = "UPS_CERT_PASSWORD", hide_env_values = true)]
        password: String,
        /// Target the production APNs gateway
        #[arg(long)]
        production: bool,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        developer: Option<String>,
    },
    /// Delete a variant
    Delete {
        /// Parent pushApplicationID
        app_id: String,
        /// variantID
        variant_id: String,
    },
}
