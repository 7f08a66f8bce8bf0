//! Subcommand implementations
//!
//! Each command writes its report to the given writer so it can be captured
//! in tests.

use crate::config::{BigCommand, Command, ExtractArgs, QstCommand};
use anyhow::{Context, Result, bail};
use questkit_formats::big::Archive;
use questkit_formats::qst::QstFile;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Archive summary printed by `big info`
#[derive(Debug, Serialize)]
struct ArchiveSummary<'a> {
    version: u32,
    content_type: u32,
    entry_count: usize,
    banks: Vec<BankSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct BankSummary<'a> {
    name: &'a str,
    id: u32,
    entries: usize,
    block_size: u32,
    length: u32,
}

impl<'a> ArchiveSummary<'a> {
    fn new(archive: &'a Archive) -> Self {
        Self {
            version: archive.version,
            content_type: archive.content_type,
            entry_count: archive.entry_count(),
            banks: archive
                .banks()
                .iter()
                .map(|bank| BankSummary {
                    name: bank.name(),
                    id: bank.id,
                    entries: bank.len(),
                    block_size: bank.block_size,
                    length: bank.length,
                })
                .collect(),
        }
    }
}

/// Run a parsed command
pub fn run<W: Write>(command: &Command, out: &mut W) -> Result<()> {
    match command {
        Command::Big(BigCommand::Info { archive, json }) => big_info(archive, *json, out),
        Command::Big(BigCommand::List { archive, bank }) => big_list(archive, bank.as_deref(), out),
        Command::Big(BigCommand::Extract(args)) => big_extract(args, out),
        Command::Qst(QstCommand::List { file }) => qst_list(file, out),
        Command::Qst(QstCommand::Add {
            file,
            name,
            disabled,
            output,
        }) => qst_add(file, name, !*disabled, output.as_deref(), out),
    }
}

fn open_archive(path: &Path) -> Result<Archive> {
    Archive::open(path).with_context(|| format!("Failed to read archive {}", path.display()))
}

fn big_info<W: Write>(path: &Path, json: bool, out: &mut W) -> Result<()> {
    let archive = open_archive(path)?;
    let summary = ArchiveSummary::new(&archive);

    if json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "version:      {}", summary.version)?;
    writeln!(out, "content type: {}", summary.content_type)?;
    writeln!(out, "entries:      {}", summary.entry_count)?;
    for bank in &summary.banks {
        writeln!(
            out,
            "bank {} (id {}): {} entries, block size {}",
            bank.name, bank.id, bank.entries, bank.block_size
        )?;
    }
    Ok(())
}

fn big_list<W: Write>(path: &Path, bank_filter: Option<&str>, out: &mut W) -> Result<()> {
    let archive = open_archive(path)?;

    let banks: Vec<_> = match bank_filter {
        Some(name) => match archive.bank(name) {
            Some(bank) => vec![bank],
            None => bail!("No bank named {name} in {}", path.display()),
        },
        None => archive.banks().iter().collect(),
    };

    for bank in banks {
        for entry in bank.entries() {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{:#x}",
                bank.name(),
                entry.symbol_name(),
                entry.id,
                entry.entry_type,
                entry.length(),
                entry.data_offset
            )?;
        }
    }
    Ok(())
}

fn big_extract<W: Write>(args: &ExtractArgs, out: &mut W) -> Result<()> {
    let archive = open_archive(&args.archive)?;
    let Some(entry) = archive.find_entry(&args.symbol) else {
        bail!("No entry named {} in {}", args.symbol, args.archive.display());
    };

    let written = entry
        .extract_to(&args.output)
        .with_context(|| format!("Failed to extract {}", args.symbol))?;
    info!("Extracted {} to {}", entry.symbol_name(), args.output.display());

    writeln!(
        out,
        "{}: {} bytes -> {}",
        entry.symbol_name(),
        written,
        args.output.display()
    )?;
    Ok(())
}

fn load_quests(path: &Path) -> Result<QstFile> {
    QstFile::load(path).with_context(|| format!("Failed to read quest list {}", path.display()))
}

fn qst_list<W: Write>(path: &Path, out: &mut W) -> Result<()> {
    let qst = load_quests(path)?;
    for entry in qst.entries() {
        writeln!(out, "{}\t{}", entry.name(), entry.value_text())?;
    }
    Ok(())
}

fn qst_add<W: Write>(
    path: &Path,
    name: &str,
    enabled: bool,
    output: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let mut qst = load_quests(path)?;

    if qst.add_quest_if_missing(name, enabled) {
        qst.save(output).context("Failed to save quest list")?;
        info!("Registered quest {name}");
        writeln!(out, "added {name}")?;
    } else {
        writeln!(out, "{name} is already registered")?;
    }
    Ok(())
}
