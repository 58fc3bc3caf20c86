use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use deepmerge_engine::{merge_documents, MergeConfig};
use deepmerge_store::{JsonFileStore, KeyValueStore};
use deepmerge_sync::{
    desired_state, folder_merge_config, load_document, merge_folder, render_document,
    sync_to_store, unflatten, write_document, write_merged, DocumentFormat, SyncAction,
    SyncReport, KEY_SEPARATOR,
};
use deepmerge_tree::Tree;
use serde_json::json;

use crate::cli::*;
use crate::diff;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Merge(args) => cmd_merge(args, format),
        Command::Sync(SyncArgs { target }) => match target {
            SyncTarget::Folder(args) => cmd_sync_folder(args, format),
            SyncTarget::Store(args) => cmd_sync_store(args, format),
        },
        Command::Get(args) => cmd_get(args, format),
    }
}

/// Defaults, then the `--options` file, then explicit flags.
fn merge_config(args: &MergeArgs) -> anyhow::Result<MergeConfig> {
    let mut config = match &args.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading options {}", path.display()))?;
            MergeConfig::from_toml_str(&text)
                .with_context(|| format!("parsing options {}", path.display()))?
        }
        None => MergeConfig::default(),
    };

    config.preserve_unmergeables |= args.preserve_unmergeables;
    config.overwrite_arrays |= args.overwrite_arrays;
    config.extend_existing_arrays |= args.extend_existing_arrays;
    config.sort_merged_arrays |= args.sort_merged_arrays;
    config.merge_hash_arrays |= args.merge_hash_arrays;
    config.keep_array_duplicates |= args.keep_array_duplicates;
    config.merge_nil_values |= args.merge_nil_values;
    config.debug |= args.debug;
    if let Some(prefix) = &args.knockout_prefix {
        config.knockout_prefix = Some(prefix.clone());
    }
    if let Some(separator) = &args.unpack_arrays {
        config.unpack_arrays = Some(separator.clone());
    }
    if let Some(indent) = args.debug_indent {
        config.debug_indent = indent;
    }

    config.validate().context("invalid merge options")?;
    Ok(config)
}

fn cmd_merge(args: MergeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = merge_config(&args)?;
    let src = load_document(&args.source)
        .with_context(|| format!("loading source {}", args.source.display()))?;
    let dest = load_document(&args.dest)
        .with_context(|| format!("loading destination {}", args.dest.display()))?;

    let doc_format = DocumentFormat::from_path(args.output.as_deref().unwrap_or(&args.dest))?;
    let before = render_document(&dest, doc_format)?;
    let merged = merge_documents(src, dest, &config).context("merge failed")?;
    let after = render_document(&merged, doc_format)?;
    let hunks = args.diff.then(|| diff::diff_lines(&before, &after));

    if let Some(path) = &args.output {
        write_document(path, &merged, doc_format)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    match format {
        OutputFormat::Json => {
            let merged = serde_json::to_value(&merged)?;
            let mut out = json!({ "merged": merged });
            if let Some(path) = &args.output {
                out["written"] = json!(path.display().to_string());
            }
            if let Some(hunks) = &hunks {
                let (additions, deletions) = diff::line_counts(hunks);
                out["additions"] = json!(additions);
                out["deletions"] = json!(deletions);
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            match (&args.output, &hunks) {
                (Some(path), _) => println!(
                    "{} Merged {} into {}",
                    "✓".green().bold(),
                    args.source.display().to_string().yellow(),
                    path.display().to_string().bold()
                ),
                (None, None) => print!("{after}"),
                (None, Some(_)) => {}
            }
            if let Some(hunks) = &hunks {
                if hunks.is_empty() {
                    println!("No changes.");
                } else {
                    let (additions, deletions) = diff::line_counts(hunks);
                    print!("{}", diff::render(hunks));
                    println!(
                        "{} additions, {} deletions",
                        additions.to_string().green(),
                        deletions.to_string().red()
                    );
                }
            }
        }
    }
    Ok(())
}

fn cmd_sync_folder(args: SyncFolderArgs, format: OutputFormat) -> anyhow::Result<()> {
    let results = merge_folder(&args.source_folder, &folder_merge_config(args.debug))
        .with_context(|| format!("merging folder {}", args.source_folder.display()))?;
    let written = write_merged(&results, &args.out_folder, args.out_format.into())
        .with_context(|| format!("writing to {}", args.out_folder.display()))?;

    match format {
        OutputFormat::Json => {
            let paths: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            let out = json!({ "apps": results.len(), "written": paths });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for path in &written {
                println!("  {} {}", "wrote".green(), path.display());
            }
            println!(
                "{} Merged {} apps into {} documents under {}",
                "✓".green().bold(),
                results.len(),
                written.len(),
                args.out_folder.display().to_string().bold()
            );
        }
    }
    Ok(())
}

fn cmd_sync_store(args: SyncStoreArgs, format: OutputFormat) -> anyhow::Result<()> {
    let store = open_store(&args.store_file)?;
    let results = merge_folder(&args.source_folder, &folder_merge_config(args.debug))
        .with_context(|| format!("merging folder {}", args.source_folder.display()))?;
    let desired = desired_state(&results, &args.prefix);
    let report = sync_to_store(&desired, &store, &args.prefix, args.dry_run)
        .with_context(|| format!("syncing {}", args.store_file.display()))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_sync_report(&report),
    }

    if report.failed() > 0 {
        bail!("{} of {} keys failed to sync", report.failed(), report.len());
    }
    Ok(())
}

fn print_sync_report(report: &SyncReport) {
    for key in &report.keys {
        let old = key.old_value.as_deref().unwrap_or("(unset)");
        match &key.action {
            SyncAction::InSync => {}
            SyncAction::NeedsUpdate => println!(
                "  {} {}: {} -> {}",
                "~".yellow(),
                key.key.bold(),
                old.dimmed(),
                key.new_value
            ),
            SyncAction::Updated => println!(
                "  {} {}: {} -> {}",
                "✓".green(),
                key.key.bold(),
                old.dimmed(),
                key.new_value
            ),
            SyncAction::Failed(reason) => {
                println!("  {} {}: {}", "✗".red(), key.key.bold(), reason.red())
            }
        }
    }

    let changed = if report.dry_run {
        format!("{} would change", report.needs_update())
    } else {
        format!("{} updated", report.updated())
    };
    println!(
        "{} {} keys: {} in sync, {}, {} failed",
        if report.failed() > 0 { "✗".red().bold() } else { "✓".green().bold() },
        report.len(),
        report.in_sync(),
        changed,
        report.failed()
    );
}

fn cmd_get(args: GetArgs, format: OutputFormat) -> anyhow::Result<()> {
    let store = open_store(&args.store_file)?;

    if args.recursive {
        let values = store.get_value_tree(&args.key)?;
        if values.is_empty() {
            bail!("no keys under {}", args.key);
        }
        let nested = Tree::Mapping(unflatten(&values, KEY_SEPARATOR));
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&nested)?),
            OutputFormat::Text => {
                for (key, value) in &values {
                    println!("{} = {}", key.bold(), value);
                }
            }
        }
        return Ok(());
    }

    let value = store
        .get_value(&args.key)
        .with_context(|| format!("reading {}", args.key))?;
    match format {
        OutputFormat::Json => {
            let out = json!({ "key": args.key, "value": value });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => println!("{value}"),
    }
    Ok(())
}

fn open_store(path: &Path) -> anyhow::Result<JsonFileStore> {
    JsonFileStore::open(path).with_context(|| format!("opening store {}", path.display()))
}
