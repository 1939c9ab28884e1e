// ABOUTME: Entry point for the griddeck binary.
// ABOUTME: Loads config, opens the configured storage, hydrates the card store, and runs one command.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use griddeck_core::store::{DEFAULT_CONTENT, DEFAULT_TITLE};
use griddeck_core::{CardLayoutStore, CardPatch, Geometry, KeyValueStore, LayoutItem};
use griddeck_store::{GriddeckConfig, read_import, write_export};

#[derive(Debug, Parser)]
#[command(name = "griddeck", version, about = "Manage a drag-and-drop card dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every card with its placement
    List,
    /// Add a card at the top-left corner
    Add {
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,
        #[arg(long, default_value = DEFAULT_CONTENT)]
        content: String,
    },
    /// Change a card's text or geometry
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        x: Option<i32>,
        #[arg(long)]
        y: Option<i32>,
        #[arg(long)]
        w: Option<i32>,
        #[arg(long)]
        h: Option<i32>,
    },
    /// Place a card on the grid as a drag gesture would
    Move {
        id: String,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    },
    /// Delete a card
    Delete { id: String },
    /// Delete every card and restart numbering
    Clear,
    /// Save the board to a .json or .yaml file
    Export { path: PathBuf },
    /// Replace the board with the contents of a .json or .yaml file
    Import { path: PathBuf },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "griddeck=info,griddeck_core=info,griddeck_store=info",
                )
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = GriddeckConfig::from_env().context("loading configuration")?;
    tracing::info!(
        "griddeck starting with {:?} backend in {}",
        config.backend,
        config.home.display()
    );

    let storage = config.open_storage().context("opening storage")?;
    let mut store = CardLayoutStore::open(storage).context("hydrating card store")?;

    run(&mut store, cli.command)
}

fn run<S: KeyValueStore>(store: &mut CardLayoutStore<S>, command: Command) -> Result<()> {
    match command {
        Command::List => {
            for card in store.cards() {
                println!(
                    "{}\t({}, {}) {}x{}\t{}",
                    card.id, card.x, card.y, card.w, card.h, card.title
                );
            }
            println!("{} card(s)", store.card_count());
        }

        Command::Add { title, content } => {
            let card = store.add_card(title, content)?;
            println!("{}", serde_json::to_string_pretty(&card)?);
        }

        Command::Edit {
            id,
            title,
            content,
            x,
            y,
            w,
            h,
        } => {
            if store.card(&id).is_none() {
                bail!("no card with id {id}");
            }
            let patch = CardPatch {
                title,
                content,
                x,
                y,
                w,
                h,
            };
            store.update_card(&id, patch)?;
        }

        Command::Move { id, x, y, w, h } => {
            let geometry = Geometry { x, y, w, h };
            let mut layout = store.layout_data().to_vec();
            if let Some(item) = layout.iter_mut().find(|item| item.i == id) {
                item.set_geometry(geometry);
            } else if store.card(&id).is_some() {
                layout.push(LayoutItem::new(id, geometry));
            } else {
                bail!("no card with id {id}");
            }
            store.update_layout(layout)?;
        }

        Command::Delete { id } => {
            store.delete_card(&id)?;
        }

        Command::Clear => {
            store.clear_all()?;
        }

        Command::Export { path } => {
            write_export(&path, &store.export_data())
                .with_context(|| format!("writing {}", path.display()))?;
        }

        Command::Import { path } => {
            let data = read_import(&path).with_context(|| format!("reading {}", path.display()))?;
            store.import_data(data)?;
            println!("imported {} card(s)", store.card_count());
        }
    }

    Ok(())
}
