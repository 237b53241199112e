//! # Seed Data Generator
//!
//! Populates the database with the default pricing catalogs and a few demo
//! records for development.
//!
//! ## Usage
//! ```bash
//! # Seed into the default dev database
//! cargo run -p vitro-db --bin seed
//!
//! # Specify database path
//! cargo run -p vitro-db --bin seed -- --db ./data/vitro.db
//! ```
//!
//! ## Seeded Data
//! - The 8-band default SHATF (beveling) rate table
//! - Flat operation prices for LASER and FARMA subtypes
//! - A small glass-type catalog (clear, bronze, mirror, tempered)
//! - Two demo customers

use std::env;

use vitro_core::pricing::{default_shataf_rates, SHATF_CUTTING_TYPE};
use vitro_core::{OperationType, DEFAULT_TENANT_ID};
use vitro_db::{new_customer, new_glass_type, new_operation_price, Database, DbConfig};

/// Glass catalog: (name, price per m², default thickness mm)
const GLASS_TYPES: &[(&str, f64, f64)] = &[
    ("Clear 4mm", 80.0, 4.0),
    ("Clear 6mm", 100.0, 6.0),
    ("Clear 8mm", 130.0, 8.0),
    ("Bronze 6mm", 150.0, 6.0),
    ("Mirror 4mm", 120.0, 4.0),
    ("Tempered 10mm", 260.0, 10.0),
];

/// Laser subtype catalog: (subtype, flat price per piece)
const LASER_PRICES: &[(&str, f64)] = &[
    ("engraving", 50.0),
    ("logo", 75.0),
    ("hole", 15.0),
    ("cutout", 40.0),
];

/// FARMA subtype catalog: (subtype, flat price per piece)
const FARMA_PRICES: &[(&str, f64)] = &[("standard", 25.0), ("deep", 40.0), ("double", 45.0)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./vitro_dev.db");

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
                println!("Vitro Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./vitro_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Vitro Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check for existing catalog data
    let existing = db.glass_types().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} glass types", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalogs...");

    // Beveling rate table
    let rates = default_shataf_rates();
    db.rates()
        .replace_rates(DEFAULT_TENANT_ID, SHATF_CUTTING_TYPE, &rates)
        .await?;
    println!("✓ {} SHATF rate bands", rates.len());

    // Operation price catalog
    let mut price_count = 0;
    for &(subtype, price) in LASER_PRICES {
        let entry = new_operation_price(DEFAULT_TENANT_ID, OperationType::Laser, subtype, price);
        db.rates().insert_price(&entry).await?;
        price_count += 1;
    }
    for &(subtype, price) in FARMA_PRICES {
        let entry = new_operation_price(DEFAULT_TENANT_ID, OperationType::Farma, subtype, price);
        db.rates().insert_price(&entry).await?;
        price_count += 1;
    }
    println!("✓ {} operation prices", price_count);

    // Glass catalog
    for &(name, price_per_meter, thickness) in GLASS_TYPES {
        let glass_type =
            new_glass_type(DEFAULT_TENANT_ID, name, price_per_meter, Some(thickness));
        db.glass_types().insert(&glass_type).await?;
    }
    println!("✓ {} glass types", GLASS_TYPES.len());

    // Demo customers
    let demo_customers = [
        ("Ahmed Hassan", Some("0100111222"), Some("12 Tahrir St, Cairo")),
        ("Mona Said", Some("0122333444"), None),
    ];
    for (name, phone, address) in demo_customers {
        let customer = new_customer(DEFAULT_TENANT_ID, name, phone, address);
        db.customers().insert(&customer).await?;
    }
    println!("✓ {} demo customers", demo_customers.len());

    println!();
    println!("Done.");

    db.close().await;
    Ok(())
}
