use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use deepmerge_sync::DocumentFormat;

#[derive(Parser)]
#[command(
    name = "deepmerge",
    about = "Deep merge of layered configuration documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

impl Cli {
    /// Debug-level logs are wanted for `--verbose` or any `--debug` flag.
    pub fn wants_debug_logs(&self) -> bool {
        self.verbose
            || match &self.command {
                Command::Merge(args) => args.debug,
                Command::Sync(SyncArgs {
                    target: SyncTarget::Folder(args),
                }) => args.debug,
                Command::Sync(SyncArgs {
                    target: SyncTarget::Store(args),
                }) => args.debug,
                Command::Get(_) => false,
            }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentFormatArg {
    Json,
    Toml,
    Yaml,
}

impl From<DocumentFormatArg> for DocumentFormat {
    fn from(arg: DocumentFormatArg) -> Self {
        match arg {
            DocumentFormatArg::Json => DocumentFormat::Json,
            DocumentFormatArg::Toml => DocumentFormat::Toml,
            DocumentFormatArg::Yaml => DocumentFormat::Yaml,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge a source document into a destination document
    Merge(MergeArgs),
    /// Merge layered folders and write or sync the results
    Sync(SyncArgs),
    /// Read a value or subtree from a key-value store file
    Get(GetArgs),
}

/// Merge flags only switch a behaviour on or set a value; anything unset
/// keeps the value from `--options` or the defaults.
#[derive(Args)]
pub struct MergeArgs {
    pub source: PathBuf,
    pub dest: PathBuf,
    /// TOML file with merge options
    #[arg(long)]
    pub options: Option<PathBuf>,
    #[arg(long)]
    pub preserve_unmergeables: bool,
    /// Prefix marking values to delete; pass as `--knockout-prefix=--`
    #[arg(long)]
    pub knockout_prefix: Option<String>,
    #[arg(long)]
    pub overwrite_arrays: bool,
    #[arg(long)]
    pub extend_existing_arrays: bool,
    #[arg(long)]
    pub sort_merged_arrays: bool,
    #[arg(long)]
    pub unpack_arrays: Option<String>,
    #[arg(long)]
    pub merge_hash_arrays: bool,
    #[arg(long)]
    pub keep_array_duplicates: bool,
    #[arg(long)]
    pub merge_nil_values: bool,
    /// Trace every merge step
    #[arg(long)]
    pub debug: bool,
    #[arg(long)]
    pub debug_indent: Option<usize>,
    /// Write the merged document here instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Show a line diff of the destination against the merged document
    #[arg(long)]
    pub diff: bool,
}

#[derive(Args)]
pub struct SyncArgs {
    #[command(subcommand)]
    pub target: SyncTarget,
}

#[derive(Subcommand)]
pub enum SyncTarget {
    /// Merge every app folder and write the merged documents
    Folder(SyncFolderArgs),
    /// Merge every app folder and push the flattened keys to a store
    Store(SyncStoreArgs),
}

#[derive(Args)]
pub struct SyncFolderArgs {
    pub source_folder: PathBuf,
    #[arg(long, default_value = "out")]
    pub out_folder: PathBuf,
    #[arg(long, default_value = "yaml")]
    pub out_format: DocumentFormatArg,
    /// Trace every merge step
    #[arg(long)]
    pub debug: bool,
}

#[derive(Args)]
pub struct SyncStoreArgs {
    pub store_file: PathBuf,
    #[arg(long, default_value = ".")]
    pub source_folder: PathBuf,
    #[arg(long, default_value = "/")]
    pub prefix: String,
    #[arg(long)]
    pub dry_run: bool,
    /// Trace every merge step
    #[arg(long)]
    pub debug: bool,
}

#[derive(Args)]
pub struct GetArgs {
    pub store_file: PathBuf,
    pub key: String,
    /// Treat KEY as a prefix and print the nested subtree
    #[arg(short, long)]
    pub recursive: bool,
}
