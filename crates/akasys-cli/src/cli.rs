//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Akasys - sales & inventory insights from your terminal
#[derive(Parser)]
#[command(name = "akasys")]
#[command(about = "Dashboard client for the Akasys business-intelligence backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides config file and AKASYS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to the backend and store the access token
    Login {
        /// Backend username (email)
        #[arg(short, long)]
        username: String,
    },

    /// Show the dashboard: metric cards and insights
    Dashboard {
        /// Rows to fetch per collection
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// List sales records
    Sales {
        /// Rows to skip
        #[arg(long, default_value = "0")]
        skip: usize,
        /// Rows to fetch
        #[arg(long, default_value = "25")]
        limit: usize,
    },

    /// List stock records
    Stock {
        /// Rows to skip
        #[arg(long, default_value = "0")]
        skip: usize,
        /// Rows to fetch
        #[arg(long, default_value = "25")]
        limit: usize,
    },

    /// Analyze local CSV exports without touching the backend
    Analyze {
        /// Vendas CSV file
        #[arg(long)]
        sales: Option<PathBuf>,

        /// Estoque CSV file
        #[arg(long)]
        stock: Option<PathBuf>,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Upload a CSV file for backend ingestion
    Upload {
        /// Dataset the file belongs to: vendas or estoque (auto-detected
        /// from the header if not specified)
        #[arg(short, long)]
        kind: Option<String>,

        /// CSV file to upload
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Email a report through the backend
    Report {
        /// Recipient email address
        #[arg(long)]
        to: String,

        /// Email subject
        #[arg(long, default_value = "Relatório Akasys")]
        subject: String,

        /// Email body (a dashboard summary is generated if omitted)
        #[arg(long)]
        body: Option<String>,
    },

    /// Check backend connectivity
    Health,

    /// Start the dashboard server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allow unauthenticated requests (for local development only)
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}
