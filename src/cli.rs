use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `ZeroHire` - AI-powered candidate assessment client.
#[derive(Parser, Debug)]
#[command(name = "zerohire")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered candidate assessment from the terminal.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing configuration with defaults
        #[arg(long)]
        force: bool,
    },

    /// Run a full assessment: resume upload, quiz round, AI interview, report
    Assess {
        /// Resume file to upload (PDF, DOCX or plain text)
        #[arg(short, long)]
        resume: PathBuf,

        /// Role applied for (picked interactively when omitted)
        #[arg(long)]
        role: Option<String>,

        /// Assessment domain (defaults to the role display name)
        #[arg(long)]
        domain: Option<String>,

        /// Backend origin override, e.g. http://localhost:8000
        #[arg(long)]
        backend: Option<String>,

        /// Interview length in seconds (default from config, 300)
        #[arg(long)]
        duration: Option<u64>,
    },

    /// Fetch and render the report for an existing session
    Report {
        /// Session identifier the interview ran under
        session_id: String,

        /// Backend origin override
        #[arg(long)]
        backend: Option<String>,
    },
}
