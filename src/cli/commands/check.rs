use anyhow::Result;

use super::super::args::CheckCommand;
use super::{CheckSummary, CommandResult, CommandSummary, helper::finish};
use crate::core::ExtractContext;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ExtractContext::new(&cmd.common)?;
    let output = ctx.extract();

    let summary = CommandSummary::Check(CheckSummary {
        translation_count: output.catalog.len(),
    });
    Ok(finish(summary, output))
}
