use std::fs;

use anyhow::{Context, Result};

use super::super::args::ExtractCommand;
use super::{CommandResult, CommandSummary, ExtractSummary, helper::finish};
use crate::core::{ExtractContext, emit_asset};

/// Scan, then write the asset. The asset is written even when issues were
/// found; dynamic usages are simply not in it.
pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let mut ctx = ExtractContext::new(&cmd.common)?;

    // CLI > config file > defaults
    if let Some(format) = cmd.format {
        ctx.config.format = format;
    }
    let output_dir = cmd.output.unwrap_or_else(|| ctx.output_dir());

    let output = ctx.extract();
    let asset = emit_asset(&output.catalog, ctx.config.format)?;

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;
    let asset_path = output_dir.join(asset.file_name);
    fs::write(&asset_path, &asset.content)
        .with_context(|| format!("Failed to write {}", asset_path.display()))?;

    if ctx.verbose {
        eprintln!("Wrote {}", asset_path.display());
    }

    let summary = CommandSummary::Extract(ExtractSummary {
        asset_path,
        translation_count: output.catalog.len(),
    });
    Ok(finish(summary, output))
}
