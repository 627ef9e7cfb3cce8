//! # Seed Data Generator
//!
//! Populates the catalog with a demo set of bins, item types and items.
//!
//! ## Usage
//! ```bash
//! # Seed the database named by the config file / environment
//! cargo run -p stowage-db --bin seed
//!
//! # Explicit database path
//! cargo run -p stowage-db --bin seed -- --db ./stowage_dev.db
//!
//! # Explicit config file, print the snapshot afterwards
//! cargo run -p stowage-db --bin seed -- --config ./stowage.toml --snapshot
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info,stowage=debug,sqlx=warn`).

use std::env;
use std::path::PathBuf;

use stowage_core::Size;
use stowage_db::{Database, DbError, StowageConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Demo bins: (name, max_capacity).
const BINS: &[(&str, i64)] = &[
    ("Garage Shelf", 6),
    ("Closet Box", 4),
    ("Attic Crate", 3),
];

/// Demo item types: (name, description).
const ITEM_TYPES: &[(&str, Option<&str>)] = &[
    ("Tools", Some("Hand and power tools")),
    ("Books", Some("Paperbacks and manuals")),
    ("Toys", None),
    ("Cables", Some("Chargers, adapters, spare leads")),
];

/// Demo items: (bin index, item type index, name, size).
const ITEMS: &[(usize, usize, &str, Size)] = &[
    (0, 0, "Hammer", Size::Medium),
    (0, 0, "Cordless Drill", Size::Large),
    (0, 3, "USB-C Charger", Size::Small),
    (0, 0, "Screwdriver Set", Size::Small),
    (1, 1, "Dune", Size::Small),
    (1, 1, "Car Manual", Size::Medium),
    (1, 3, "HDMI Cable", Size::Small),
    (2, 2, "Board Game", Size::Large),
    (2, 2, "Kite", Size::Medium),
    (2, 1, "Atlas", Size::Large),
    // Attic Crate is full by now; the capacity guard rejects this one.
    (2, 2, "Teddy Bear", Size::Medium),
];

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stowage=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut db_path: Option<PathBuf> = None;
    let mut print_snapshot = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--snapshot" | "-s" => print_snapshot = true,
            "--help" | "-h" => {
                println!("Stowage Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("  -d, --db <PATH>      Database file path (overrides config)");
                println!("  -s, --snapshot       Print the catalog snapshot as JSON");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = StowageConfig::load(config_path)?;
    if let Some(path) = db_path {
        config.database.path = path;
    }

    if let Some(parent) = config.database.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(config.db_config()).await?;
    let catalog = db.catalog();

    if !catalog.list_bins().await?.is_empty() {
        warn!(
            path = %config.database.path.display(),
            "Catalog already has bins, skipping seed. Delete the database file to regenerate."
        );
        return Ok(());
    }

    let mut bins = Vec::with_capacity(BINS.len());
    for (name, capacity) in BINS {
        bins.push(catalog.create_bin(name, *capacity).await?);
    }

    let mut item_types = Vec::with_capacity(ITEM_TYPES.len());
    for (name, description) in ITEM_TYPES {
        item_types.push(catalog.create_item_type(name, *description).await?);
    }

    let mut added = 0;
    for (bin_idx, type_idx, name, size) in ITEMS {
        let bin = &bins[*bin_idx];
        match catalog
            .add_item(&bin.id, name, &item_types[*type_idx].id, *size)
            .await
        {
            Ok(_) => added += 1,
            Err(DbError::Domain(e)) => warn!(item = %name, error = %e, "Item rejected"),
            Err(e) => return Err(e.into()),
        }
    }

    // One move so the history shows both sides of a transfer.
    let closet_items = catalog.list_items(Some(bins[1].id.as_str())).await?;
    if let Some(cable) = closet_items.iter().find(|i| i.name == "HDMI Cable") {
        catalog.move_item(&cable.id, &bins[0].id).await?;
    }

    let history = catalog.history().await?;
    info!(
        bins = bins.len(),
        item_types = item_types.len(),
        items = added,
        history_entries = history.len(),
        "Seed complete"
    );

    for capacity in catalog.list_bin_capacities().await? {
        println!(
            "{:<14} {:>2}/{:<2} ({:.0}%)",
            capacity.bin.name,
            capacity.occupancy.occupied,
            capacity.bin.max_capacity,
            capacity.occupancy.percentage
        );
    }

    if print_snapshot {
        let snapshot = catalog.snapshot().await?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    db.close().await;
    Ok(())
}
