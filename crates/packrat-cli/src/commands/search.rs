//! `pak search` - substring search across the collection

use anyhow::Result;

use packrat_core::search;

use crate::cli::OutputFormat;
use crate::commands::CommandContext;
use crate::output;

/// Run the search engine and render matches.
pub async fn execute(ctx: CommandContext, query: String) -> Result<()> {
    let results = search(&query, ctx.repo.get_all());
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Table => output::print_search_results(&results, query.trim()),
    }
    Ok(())
}
