//! `pak boxes`, `pak stats`, `pak show` - collection views

use anyhow::Result;

use packrat_core::normalize_box_id;

use crate::cli::OutputFormat;
use crate::commands::CommandContext;
use crate::output;

/// List all boxes with item counts.
pub async fn list(ctx: CommandContext) -> Result<()> {
    let boxes = ctx.repo.get_all();
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(boxes)?),
        OutputFormat::Table => {
            if boxes.is_empty() {
                println!("No boxes have been added yet.");
            } else {
                println!("All boxes ({})", boxes.len());
                println!("{}", output::boxes_table(boxes));
            }
        }
    }
    Ok(())
}

/// Print collection totals.
pub async fn stats(ctx: CommandContext) -> Result<()> {
    let stats = ctx.repo.stats();
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Table => println!("{}", output::stats_lines(&stats)),
    }
    Ok(())
}

/// Show one box and its items.
pub async fn show(ctx: CommandContext, box_id: String) -> Result<()> {
    let Some(box_id) = normalize_box_id(&box_id) else {
        eprintln!("Box identifier is empty.");
        return Ok(());
    };
    match ctx.repo.get(&box_id) {
        Some(b) => match ctx.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(b)?),
            OutputFormat::Table => {
                println!("{} ({} item(s))", b.id, b.item_count());
                if b.is_empty() {
                    println!("This box is empty.");
                } else {
                    println!("{}", output::items_table(b));
                }
            }
        },
        None => println!("{box_id} is not in the collection."),
    }
    Ok(())
}
