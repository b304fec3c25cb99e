//! `pak add`, `pak rm`, `pak save` - box editing

use anyhow::Result;

use packrat_core::{
    normalize_box_id, parse_tag_input, suggest_or_empty, InventoryBox, Item, SaveOutcome,
};

use crate::commands::{report_save, CommandContext};

/// Add an item to a box, creating the box when it does not exist yet.
///
/// Tags come from `--tags` when given; otherwise `--suggest` asks the
/// configured provider, whose failures silently yield no tags.
pub async fn add(
    mut ctx: CommandContext,
    box_id: String,
    name: String,
    tags: Option<String>,
    suggest: bool,
) -> Result<()> {
    let Some(box_id) = normalize_box_id(&box_id) else {
        eprintln!("Box identifier is empty.");
        return Ok(());
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        eprintln!("Item name is empty.");
        return Ok(());
    }

    let tags = match tags {
        Some(raw) => parse_tag_input(&raw),
        None if suggest => {
            suggest_or_empty(ctx.suggester.as_ref(), &name, ctx.suggest_timeout).await
        }
        None => Vec::new(),
    };

    let mut b = ctx
        .repo
        .get(&box_id)
        .cloned()
        .unwrap_or_else(|| InventoryBox::new(&box_id));
    let item = Item::new(name, tags);
    println!(
        "Adding {} ({}) to {box_id}{}",
        item.name,
        item.id,
        if item.tags.is_empty() {
            String::new()
        } else {
            format!(" with tags [{}]", item.tags.join(", "))
        }
    );
    b.add_item(item);

    let outcome = ctx.repo.upsert_box(b).await;
    report_save(&box_id, &outcome);
    Ok(())
}

/// Remove an item from a box.
pub async fn rm(mut ctx: CommandContext, box_id: String, item_id: String) -> Result<()> {
    let Some(box_id) = normalize_box_id(&box_id) else {
        eprintln!("Box identifier is empty.");
        return Ok(());
    };
    let Some(mut b) = ctx.repo.get(&box_id).cloned() else {
        println!("{box_id} is not in the collection.");
        return Ok(());
    };
    match b.remove_item(&item_id) {
        Some(removed) => {
            println!("Removed {} ({}) from {box_id}", removed.name, removed.id);
            let outcome = ctx.repo.upsert_box(b).await;
            report_save(&box_id, &outcome);
        }
        None => println!("No item {item_id} in {box_id}."),
    }
    Ok(())
}

/// Explicitly save a box. A brand-new box with zero items is dropped rather
/// than persisted; saving an existing box (even emptied) rewrites it.
pub async fn save(mut ctx: CommandContext, box_id: String) -> Result<()> {
    let Some(box_id) = normalize_box_id(&box_id) else {
        eprintln!("Box identifier is empty.");
        return Ok(());
    };
    let b = ctx
        .repo
        .get(&box_id)
        .cloned()
        .unwrap_or_else(|| InventoryBox::new(&box_id));
    let outcome = ctx.repo.upsert_box(b).await;
    if outcome == SaveOutcome::SkippedEmptyNew {
        println!("{box_id} is new and empty; add an item before saving.");
    } else {
        report_save(&box_id, &outcome);
    }
    Ok(())
}
