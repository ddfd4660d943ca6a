use anyhow::Result;
use blockedit::editor::{get_block, list_block, rename_block};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "blockedit")]
#[command(about = "Address-based block editor for HCL documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit blocks
    #[command(subcommand)]
    Block(BlockCommands),
}

#[derive(Subcommand)]
enum BlockCommands {
    /// Get matched blocks at a given address
    Get {
        /// An address of block to get
        #[arg(value_name = "ADDRESS")]
        address: String,

        /// A path of input file (default: stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Move block (rename block type and labels)
    Mv {
        /// An old address of block
        #[arg(value_name = "FROM_ADDRESS")]
        from: String,

        /// A new address of block
        #[arg(value_name = "TO_ADDRESS")]
        to: String,

        /// A path of input file (default: stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Overwrite input file
        #[arg(short, long)]
        write: bool,
    },

    /// List block addresses
    List {
        /// A path of input file (default: stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Block(BlockCommands::Get { address, file }) => cmd_get(&address, file.as_deref()),
        Commands::Block(BlockCommands::Mv {
            from,
            to,
            file,
            write,
        }) => cmd_mv(&from, &to, file.as_deref(), write),
        Commands::Block(BlockCommands::List { file }) => cmd_list(file.as_deref()),
    }
}

fn cmd_get(address: &str, file: Option<&Path>) -> Result<()> {
    let input = read_input(file)?;
    let output = get_block(&input, address)?;
    print!("{output}");
    Ok(())
}

fn cmd_mv(from: &str, to: &str, file: Option<&Path>, write: bool) -> Result<()> {
    if write && file.is_none() {
        anyhow::bail!("when using the write option, a file name is required");
    }

    let input = read_input(file)?;
    let output = rename_block(&input, from, to)?;

    if write {
        let path = file.expect("write implies a file path");
        write_in_place(path, &output)?;
    } else {
        print!("{output}");
    }

    Ok(())
}

fn cmd_list(file: Option<&Path>) -> Result<()> {
    let input = read_input(file)?;
    let output = list_block(&input)?;
    print!("{output}");
    Ok(())
}

/// Read the whole input up front; the engine only sees complete buffers.
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| anyhow::anyhow!("failed to open file {}: {err}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Atomic overwrite: tempfile in the same directory, fsync, rename. Either
/// the full rewritten document lands or the original file is untouched.
fn write_in_place(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;

    Ok(())
}
