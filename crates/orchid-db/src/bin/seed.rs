//! # Seed Data Generator
//!
//! Populates the database with development data: a salon service menu,
//! tracked retail products, and a small staff/customer directory.
//!
//! ## Usage
//! ```bash
//! cargo run -p orchid-db --bin seed
//! cargo run -p orchid-db --bin seed -- --db ./data/orchid.db
//! ```

use std::env;

use orchid_db::repository::catalog::NewCatalogItem;
use orchid_db::{Database, DbConfig};
use tracing::info;

/// Service menu: (name, price in pence, icon).
/// Services don't track inventory.
const SERVICES: &[(&str, i64, &str)] = &[
    ("Dry Cut", 2500, "✂️"),
    ("Cut & Blow Dry", 4200, "💇"),
    ("Blow Dry", 2200, "💨"),
    ("Full Head Colour", 7500, "🎨"),
    ("Highlights (Half Head)", 6500, "✨"),
    ("Root Tint", 4800, "🖌️"),
    ("Beard Trim", 1200, "🧔"),
    ("Hot Towel Shave", 2000, "🪒"),
    ("Manicure", 2800, "💅"),
    ("Pedicure", 3200, "🦶"),
];

/// Retail products: (name, price in pence, icon, initial stock).
/// Products track inventory.
const PRODUCTS: &[(&str, i64, &str, i64)] = &[
    ("Shampoo 250ml", 899, "🧴", 24),
    ("Conditioner 250ml", 949, "🧴", 18),
    ("Sea Salt Spray", 1250, "🌊", 12),
    ("Matte Clay", 1100, "🫙", 15),
    ("Beard Oil 30ml", 1399, "🧔", 9),
    ("Heat Protect Spray", 1050, "🔥", 7),
    ("Hair Serum", 1599, "💧", 0), // out of stock on purpose
];

const STAFF: &[&str] = &["Alex", "Priya", "Marco", "Jess"];

const CUSTOMERS: &[(&str, Option<&str>)] = &[
    ("Sam Taylor", Some("07700 900123")),
    ("Robin Hughes", Some("07700 900456")),
    ("Charlie Osei", None),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut db_path = String::from("./orchid_dev.db");

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Orchid POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./orchid_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(db = %db_path, "Seeding Orchid POS database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.catalog().count().await?;
    if existing > 0 {
        info!(existing, "Database already has catalog items; skipping seed");
        return Ok(());
    }

    for (name, price_pence, icon) in SERVICES {
        db.catalog()
            .create(NewCatalogItem {
                name: (*name).to_string(),
                price_pence: *price_pence,
                icon: Some((*icon).to_string()),
                sku: None,
                barcode: None,
                category: Some("Services".to_string()),
                track_inventory: false,
                stock_quantity: 0,
            })
            .await?;
    }
    info!(count = SERVICES.len(), "Seeded services");

    for (idx, (name, price_pence, icon, stock)) in PRODUCTS.iter().enumerate() {
        db.catalog()
            .create(NewCatalogItem {
                name: (*name).to_string(),
                price_pence: *price_pence,
                icon: Some((*icon).to_string()),
                sku: Some(format!("RET-{:03}", idx + 1)),
                barcode: Some(format!("506{:010}", idx + 1)),
                category: Some("Retail".to_string()),
                track_inventory: true,
                stock_quantity: *stock,
            })
            .await?;
    }
    info!(count = PRODUCTS.len(), "Seeded retail products");

    for name in STAFF {
        db.directory().add_staff(name).await?;
    }
    for (name, phone) in CUSTOMERS {
        db.directory().add_customer(name, *phone).await?;
    }
    info!(
        staff = STAFF.len(),
        customers = CUSTOMERS.len(),
        "Seeded directory"
    );

    let settings = db.settings().load().await?;
    info!(
        store = %settings.store_name,
        vat_enabled = settings.vat_enabled,
        vat_rate_bps = settings.vat_rate_bps,
        "Seed complete"
    );

    Ok(())
}
