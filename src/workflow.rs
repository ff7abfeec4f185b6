use crate::cli::{Cli, Command};
use crate::client::{TreeStoreClient, VfsClient};
use crate::config::Configuration;
use crate::error::Error;
use crate::node::Directory;
use crate::path::VfsPath;
use crate::{tui, utils};
use anyhow::Result;
use clap::CommandFactory;
use clap::error::ErrorKind;
use std::io::{self, Write};
use tracing::debug;

/// Builds the client from the CLI options and runs the requested command.
pub fn run(cli_args: Cli) -> Result<()> {
    let Cli {
        user,
        password,
        publish_url,
        publish_settings_file,
        command,
        ..
    } = cli_args;

    let config = match Configuration::from_options(
        user,
        password,
        publish_url,
        publish_settings_file.as_deref(),
    ) {
        Ok(config) => config,
        Err(err @ Error::IncompleteConfiguration) => {
            usage_error(ErrorKind::MissingRequiredArgument, &err)
        }
        Err(err @ Error::ConflictingConfiguration) => usage_error(ErrorKind::ArgumentConflict, &err),
        Err(err) => return Err(err.into()),
    };
    debug!(?config, "configuration resolved");
    let client = VfsClient::new(&config)?;

    match command {
        Command::Get { path } => match get(&client, &path, &mut io::stdout().lock()) {
            Err(err) if matches!(err.downcast_ref::<Error>(), Some(Error::NotADirectory(_))) => {
                usage_error(ErrorKind::InvalidValue, &err)
            }
            outcome => outcome,
        },
        Command::Tui => tui::run_tui(client),
    }
}

fn usage_error(kind: ErrorKind, err: &dyn std::fmt::Display) -> ! {
    Cli::command().error(kind, err).exit()
}

/// Prints a listing for directory paths, raw bytes for file paths.
pub fn get<C: TreeStoreClient, W: Write>(client: &C, path: &VfsPath, out: &mut W) -> Result<()> {
    if path.is_dir() {
        let directory = client.list_directory(path)?;
        write_listing(&directory, out)?;
    } else {
        let content = client.read_file(path)?;
        out.write_all(&content)?;
    }
    out.flush()?;
    Ok(())
}

fn write_listing<W: Write>(directory: &Directory, out: &mut W) -> io::Result<()> {
    if directory.nodes.is_empty() {
        return writeln!(out, "Directory {} is empty", directory.path);
    }
    writeln!(
        out,
        "Content of {}, which contains {} nodes",
        directory.path,
        directory.nodes.len()
    )?;
    for node in &directory.nodes {
        writeln!(out, "{}", utils::node_label(node))?;
    }
    Ok(())
}
