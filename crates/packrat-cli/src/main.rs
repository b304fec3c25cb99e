use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use packrat_cli::{
    cli::{Cli, Commands},
    commands,
};
use packrat_config::PackratConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = PackratConfig::load(cli.config.as_deref()).await?;
    init_logging(&cli, &config);

    let ctx = commands::build_context(&config, cli.format).await?;

    match cli.command {
        Some(Commands::Scan { raw }) => commands::scan::execute(ctx, raw).await?,
        Some(Commands::Show { box_id }) => commands::boxes::show(ctx, box_id).await?,
        Some(Commands::Boxes) => commands::boxes::list(ctx).await?,
        Some(Commands::Stats) => commands::boxes::stats(ctx).await?,
        Some(Commands::Search { query }) => commands::search::execute(ctx, query).await?,
        Some(Commands::Add {
            box_id,
            name,
            tags,
            suggest,
        }) => commands::items::add(ctx, box_id, name, tags, suggest).await?,
        Some(Commands::Rm { box_id, item_id }) => {
            commands::items::rm(ctx, box_id, item_id).await?
        }
        Some(Commands::Save { box_id }) => commands::items::save(ctx, box_id).await?,
        Some(Commands::Interactive) | None => commands::interactive::execute(ctx).await?,
    }

    Ok(())
}

/// Resolve the log level (flag beats config) and install the subscriber.
fn init_logging(cli: &Cli, config: &PackratConfig) {
    let level: LevelFilter = match cli.log_level {
        Some(level) => level.into(),
        None if cli.verbose => LevelFilter::DEBUG,
        None => config.logging.level.parse().unwrap_or(LevelFilter::OFF),
    };
    if level == LevelFilter::OFF {
        return;
    }
    let filter = format!(
        "packrat_cli={0},packrat_core={0},packrat_config={0},packrat_store_file={0},\
         packrat_store_sheet={0},packrat_tagger={0}",
        level
    );
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();
}
