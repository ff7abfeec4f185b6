use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::path::VfsPath;

/// vfsbrowse – browse the virtual filesystem of a remote App Service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Deployment user name
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Deployment password
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Base URL of the store, e.g. https://mysite.scm.azurewebsites.net
    #[arg(long, global = true, value_name = "URL")]
    pub publish_url: Option<String>,

    /// Publish settings (XML) file to take user, password and URL from.
    /// Cannot be combined with --user, --password or --publish-url.
    #[arg(long, global = true, value_name = "FILE")]
    pub publish_settings_file: Option<PathBuf>,

    /// Write logs to this file instead of stderr (filter with RUST_LOG)
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a file, or print a directory listing.
    /// Mark a path as a directory by ending it with '/'.
    Get {
        #[arg(value_name = "PATH")]
        path: VfsPath,
    },
    /// Browse the tree interactively
    Tui,
}
