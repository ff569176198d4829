//! The conversion run: discover, convert, write, summarize.
//!
//! Sources are converted and written one at a time, in path order. The
//! union files follow once every source is done. A failure stops the run
//! but leaves whatever was already written in place.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use vscode_dtcg::{convert_file, union_of, ConflictPolicy, SourceConversion};

use crate::output::{resolve_out_dir, OutputWriter};
use crate::scan::discover;
use crate::table::SummaryRow;

/// Everything a run needs, collected from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub out: Option<PathBuf>,
    pub union: bool,
    pub policy: ConflictPolicy,
    pub recursive: bool,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub out_dir: PathBuf,
    pub rows: Vec<SummaryRow>,
    /// Every file written, in order.
    pub written: Vec<PathBuf>,
}

pub fn run(options: &ConvertOptions) -> Result<RunSummary> {
    let files = discover(&options.input, options.recursive)?;
    let out_dir = resolve_out_dir(&options.input, options.out.as_deref());
    let writer = OutputWriter::prepare(&out_dir)?;
    info!(sources = files.len(), out = %out_dir.display(), "converting");

    let mut written = Vec::new();
    let mut conversions: Vec<SourceConversion> = Vec::with_capacity(files.len());

    for file in &files {
        let conversion = convert_file(&file.name, &file.path, options.policy)
            .with_context(|| format!("failed to convert \"{}\"", file.path.display()))?;
        written.push(writer.write_tokens(&file.name, &conversion.tree)?);
        conversions.push(conversion);
    }

    let union = if options.union {
        union_of(&conversions, options.policy).context("failed to build the union")?
    } else {
        None
    };

    if let Some(union) = &union {
        for (name, tree) in &union.trees {
            written.push(writer.write_union_tokens(name, tree)?);
        }
        written.push(writer.write_report(&union.report)?);
    }

    let rows = conversions
        .iter()
        .map(|conversion| SummaryRow {
            source: conversion.name.clone(),
            tokens: conversion.token_count(),
            skipped_lines: conversion.skipped_lines,
            non_color: conversion.extraction.non_color,
            missing: union
                .as_ref()
                .and_then(|u| u.report.report.get(&conversion.name))
                .map(|entry| entry.missing.len()),
        })
        .collect();

    Ok(RunSummary {
        out_dir: writer.dir().to_path_buf(),
        rows,
        written,
    })
}
