//! Extraction context: config, discovered files and the full build.
//!
//! `ExtractContext::new` resolves the configuration and the file list;
//! `extract` parses and scans every artifact in parallel, then merges the
//! per-file batches into one registry in lexical path order so that
//! "first seen" is reproducible across runs.

use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use rayon::prelude::*;
use swc_common::SourceMap;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        catalog::Catalog,
        data::TranslationRecord,
        extract::{scan_markup, scan_script},
        file_scanner::scan_files,
        parsers::{ArtifactKind, html::parse_html_source, script::parse_script_source},
        registry::Registry,
    },
    issues::{Issue, ParseErrorIssue},
};

/// File contents by path, kept for rendering source lines in diagnostics.
pub type SourceFiles = HashMap<String, String>;

pub struct ExtractContext {
    pub config: Config,
    pub root_dir: PathBuf,
    /// Artifacts to scan, in lexical path order.
    pub files: BTreeSet<String>,
    pub verbose: bool,
}

/// Everything one build produces.
pub struct ExtractOutput {
    pub catalog: Catalog,
    pub records: Vec<TranslationRecord>,
    /// Parse errors first, then registry diagnostics in discovery order.
    pub issues: Vec<Issue>,
    pub sources: SourceFiles,
    pub files_scanned: usize,
}

struct FileScan {
    content: String,
    records: Vec<TranslationRecord>,
}

impl ExtractContext {
    /// Create a new extraction context.
    ///
    /// 1. Determines the source root (CLI `--source-root`, else `.`)
    /// 2. Loads `.transcanrc.json` from it (walking up to the repo root)
    /// 3. Discovers markup and script files
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        if !root_dir.is_dir() {
            anyhow::bail!("Source root is not a directory: {}", root_dir.display());
        }

        let config_result = load_config(Path::new(path))?;
        if verbose && !config_result.from_file {
            eprintln!(
                "{} No {} found, using default configuration",
                "note:".bold(),
                CONFIG_FILE_NAME
            );
        }
        let config = config_result.config;

        let scan_result = scan_files(
            path,
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
            verbose,
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            verbose,
        })
    }

    /// Directory the asset is written to: `outputDir` relative to the root.
    pub fn output_dir(&self) -> PathBuf {
        let dir = Path::new(&self.config.output_dir);
        if dir.is_absolute() {
            return dir.to_path_buf();
        }
        // `./` segments are dropped so reported paths stay short.
        dir.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .fold(self.root_dir.clone(), |path, c| path.join(c))
    }

    /// Run the whole build: parse, scan, merge.
    ///
    /// A file that cannot be read or parsed becomes a `ParseError` issue and
    /// contributes nothing; every other file is still scanned.
    pub fn extract(&self) -> ExtractOutput {
        let scans: Vec<(String, Result<FileScan>)> = self
            .files
            .par_iter()
            .map(|file_path| (file_path.clone(), scan_file(file_path, &self.config)))
            .collect();

        let mut registry = Registry::new();
        let mut issues = Vec::new();
        let mut sources = SourceFiles::new();

        // `files` is a BTreeSet and rayon keeps the order: lexical merge.
        for (file_path, scan) in scans {
            match scan {
                Ok(FileScan { content, records }) => {
                    if !records.is_empty() {
                        sources.insert(file_path, content);
                    }
                    registry.merge_all(records);
                }
                Err(e) => {
                    if self.verbose {
                        eprintln!("{} {} - {:#}", "warning:".bold().yellow(), file_path, e);
                    }
                    issues.push(Issue::ParseError(ParseErrorIssue {
                        file_path,
                        error: format!("{:#}", e),
                    }));
                }
            }
        }

        let output = registry.finalize();
        issues.extend(output.issues);

        ExtractOutput {
            catalog: output.catalog,
            records: output.records,
            issues,
            sources,
            files_scanned: self.files.len(),
        }
    }
}

fn scan_file(file_path: &str, config: &Config) -> Result<FileScan> {
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path))?;

    let records = match ArtifactKind::from_path(Path::new(file_path)) {
        Some(ArtifactKind::Markup) => {
            let document = parse_html_source(&content, file_path)?;
            scan_markup(&document, file_path, &config.markup).collect()
        }
        Some(ArtifactKind::Script) => {
            // Each file gets its own SourceMap so parsing can run on any thread.
            let source_map = Arc::new(SourceMap::default());
            let parsed = parse_script_source(content.clone(), file_path, source_map)?;
            scan_script(&parsed, file_path, &config.script).collect()
        }
        None => Vec::new(),
    };

    Ok(FileScan { content, records })
}
