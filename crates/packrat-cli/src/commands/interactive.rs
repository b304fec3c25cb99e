//! `pak interactive` - REPL session over the navigation state machine
//!
//! Views: dashboard, scanner, box editing, the all-boxes list, and search
//! results. Every mutation flows through the repository, so the
//! optimistic-save and empty-new-box rules apply exactly as they do for the
//! one-shot commands.

use std::io::Write as _;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use packrat_core::{
    normalize_box_id, parse_tag_input, suggest_or_empty, CaptureDevice, CaptureError,
    InventoryBox, Item, ScanSession,
};

use crate::commands::{report_save, scan::capture_message, CommandContext};
use crate::nav::{NavEvent, View};
use crate::output;

type InputLines = Lines<BufReader<Stdin>>;

/// What one round of input handling asks the loop to do.
enum Step {
    Stay,
    Nav(NavEvent),
    Quit,
}

/// Capture device borrowing the session's shared input stream, so scanner
/// entry and menu entry never fight over stdin buffering.
struct LineCapture<'a> {
    lines: &'a mut InputLines,
    started: bool,
}

#[async_trait]
impl CaptureDevice for LineCapture<'_> {
    async fn start(&mut self) -> Result<(), CaptureError> {
        self.started = true;
        Ok(())
    }

    async fn next_decode(&mut self) -> Result<String, CaptureError> {
        if !self.started {
            return Err(CaptureError::Start("capture not started".to_string()));
        }
        match self.lines.next_line().await {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(CaptureError::Decode("end of input".to_string())),
            Err(err) => Err(CaptureError::Decode(err.to_string())),
        }
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        self.started = false;
        Ok(())
    }
}

/// Run the interactive session until `quit` or end of input.
pub async fn execute(mut ctx: CommandContext) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut view = View::Dashboard;

    loop {
        render(&ctx, &view);

        let step = if view == View::Scanner {
            scanner_step(&mut lines).await
        } else {
            match read_line(&mut lines).await? {
                Some(line) => handle_input(&mut ctx, &view, line.trim()).await,
                None => Step::Quit,
            }
        };

        match step {
            Step::Stay => {}
            Step::Nav(event) => view = view.apply(event),
            Step::Quit => break,
        }
    }
    Ok(())
}

fn render(ctx: &CommandContext, view: &View) {
    match view {
        View::Dashboard => {
            println!("\n== Packrat ==");
            println!("{}", output::stats_lines(&ctx.repo.stats()));
            println!("Commands: scan | boxes | search <query> | open <id> | quit");
        }
        View::AllBoxes => {
            let boxes = ctx.repo.get_all();
            if boxes.is_empty() {
                println!("\nNo boxes have been added yet.");
            } else {
                println!("\nAll boxes ({})", boxes.len());
                println!("{}", output::boxes_table(boxes));
            }
            println!("Commands: open <id> | back | quit");
        }
        View::SearchView { query } => {
            println!();
            output::print_search_results(&packrat_core::search(query, ctx.repo.get_all()), query);
            println!("Commands: open <id> | back | quit");
        }
        View::BoxView { box_id } => match ctx.repo.get(box_id) {
            Some(b) => {
                println!("\n{} ({} item(s))", b.id, b.item_count());
                if b.is_empty() {
                    println!("This box is empty. Add items to get started.");
                } else {
                    println!("{}", output::items_table(b));
                }
                println!("Commands: add <name> [# tags] | rm <item-id> | save | back | quit");
            }
            None => {
                println!("\n{box_id} (new box)");
                println!("Commands: add <name> [# tags] | save | back | quit");
            }
        },
        View::Scanner => {
            println!("\nScan a QR payload or type a box id (empty line cancels):");
        }
    }
}

async fn read_line(lines: &mut InputLines) -> Result<Option<String>> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

/// Drive one capture through the scan session. Failures (including a
/// cancelling empty line) report and fall back to the dashboard.
async fn scanner_step(lines: &mut InputLines) -> Step {
    let mut session = ScanSession::new(LineCapture {
        lines,
        started: false,
    });
    match session.capture().await {
        Ok(box_id) => Step::Nav(NavEvent::OpenBox(box_id)),
        Err(CaptureError::EmptyPayload) => {
            println!("Scan cancelled.");
            Step::Nav(NavEvent::Back)
        }
        Err(err) => {
            eprintln!("{}", capture_message(&err));
            Step::Nav(NavEvent::Back)
        }
    }
}

async fn handle_input(ctx: &mut CommandContext, view: &View, input: &str) -> Step {
    if input.is_empty() {
        return Step::Stay;
    }
    let (command, rest) = match input.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };

    match command {
        "quit" | "exit" => return Step::Quit,
        "back" => return Step::Nav(NavEvent::Back),
        "open" => {
            return match normalize_box_id(rest) {
                Some(id) => Step::Nav(NavEvent::OpenBox(id)),
                None => {
                    println!("Usage: open <box-id>");
                    Step::Stay
                }
            };
        }
        _ => {}
    }

    match view {
        View::Dashboard => match command {
            "scan" => Step::Nav(NavEvent::OpenScanner),
            "boxes" => Step::Nav(NavEvent::ShowAll),
            "search" if !rest.is_empty() => Step::Nav(NavEvent::Search(rest.to_string())),
            _ => {
                println!("Unknown command: {input}");
                Step::Stay
            }
        },
        View::BoxView { box_id } => box_command(ctx, box_id, command, rest).await,
        _ => {
            println!("Unknown command: {input}");
            Step::Stay
        }
    }
}

/// Editing commands inside a box view. Mutations apply to a working copy
/// and are upserted immediately, the same path the one-shot commands take.
async fn box_command(ctx: &mut CommandContext, box_id: &str, command: &str, rest: &str) -> Step {
    match command {
        "add" => {
            let (name, tags_input) = match rest.split_once('#') {
                Some((name, tags)) => (name.trim(), Some(tags)),
                None => (rest, None),
            };
            if name.is_empty() {
                println!("Usage: add <name> [# tag1, tag2]");
                return Step::Stay;
            }
            let tags = match tags_input {
                Some(raw) => parse_tag_input(raw),
                None => {
                    suggest_or_empty(ctx.suggester.as_ref(), name, ctx.suggest_timeout).await
                }
            };
            let mut b = ctx
                .repo
                .get(box_id)
                .cloned()
                .unwrap_or_else(|| InventoryBox::new(box_id));
            b.add_item(Item::new(name, tags));
            let outcome = ctx.repo.upsert_box(b).await;
            report_save(box_id, &outcome);
        }
        "rm" if !rest.is_empty() => {
            let Some(mut b) = ctx.repo.get(box_id).cloned() else {
                println!("{box_id} has not been saved yet.");
                return Step::Stay;
            };
            match b.remove_item(rest) {
                Some(removed) => {
                    println!("Removed {} ({})", removed.name, removed.id);
                    let outcome = ctx.repo.upsert_box(b).await;
                    report_save(box_id, &outcome);
                }
                None => println!("No item {rest} in {box_id}."),
            }
        }
        "save" => {
            let b = ctx
                .repo
                .get(box_id)
                .cloned()
                .unwrap_or_else(|| InventoryBox::new(box_id));
            let outcome = ctx.repo.upsert_box(b).await;
            report_save(box_id, &outcome);
        }
        _ => println!("Unknown command: {command}"),
    }
    Step::Stay
}
