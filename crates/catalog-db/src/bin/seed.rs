//! # Seed Data Generator
//!
//! Populates a catalog database with sample categories and products.
//!
//! ## Usage
//! ```bash
//! # Seed ./catalog_dev.db
//! cargo run -p catalog-db --bin seed
//!
//! # Specify database path
//! cargo run -p catalog-db --bin seed -- --db ./data/catalog.db
//! ```
//!
//! Every row goes through `CatalogService`, so seeded data passes the same
//! rules as API traffic. A database that already has categories is left alone.

use catalog_core::dto::{CategoryRequest, ProductRequest};
use catalog_db::{Database, DbConfig};
use rust_decimal::Decimal;
use std::env;

/// Sample catalog: category name, then (product, price in cents, stock).
const CATALOG: &[(&str, &[(&str, i64, i32)])] = &[
    (
        "Electronics",
        &[
            ("Laptop", 99999, 50),
            ("Smartphone", 69900, 120),
            ("Wireless Mouse", 1999, 300),
            ("USB-C Cable", 899, 0),
        ],
    ),
    (
        "Books",
        &[
            ("The Rust Programming Language", 3995, 25),
            ("Database Internals", 4799, 10),
        ],
    ),
    (
        "Groceries",
        &[
            ("Coffee Beans 1kg", 1850, 40),
            ("Olive Oil 500ml", 749, 65),
            ("Sea Salt", 199, 200),
        ],
    ),
    ("Garden", &[("Watering Can", 1450, 15)]),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./catalog_dev.db");

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
                println!("Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./catalog_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Catalog Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::file(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.categories().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} categories", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let catalog = db.catalog();
    let mut categories = 0;
    let mut products = 0;

    for (category_name, items) in CATALOG {
        let category = catalog
            .categories()
            .create(CategoryRequest::named(*category_name))
            .await?;
        categories += 1;

        for (name, cents, stock) in items.iter() {
            let request = ProductRequest::new(*name, Decimal::new(*cents, 2), *stock)
                .category(category.id);

            if let Err(e) = catalog.products().create(request).await {
                eprintln!("Failed to insert {}: {}", name, e);
                continue;
            }
            products += 1;
        }
    }

    println!();
    println!("✓ Seeded {} categories and {} products", categories, products);

    let (total, applied) = db.migration_status().await?;
    println!("  Migrations: {}/{} applied", applied, total);

    db.close().await;
    Ok(())
}
