//! # Seed Data Generator
//!
//! Populates the database with a classic Italian menu for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p pizzeria-ops --bin seed
//!
//! # Specify database path
//! cargo run -p pizzeria-ops --bin seed -- --db ./data/pizzeria.db
//! ```
//!
//! ## Generated Data
//! - A pantry of common ingredients, each with a unit cost and an
//!   opening stock
//! - A handful of classic pizzas with their recipes and cost factors
//!
//! Everything goes through the admin facade, so the seeded database ends
//! up with correct derived visibility, exactly as if an administrator had
//! typed it in.

use std::env;

use pizzeria_db::{Database, DbConfig};
use pizzeria_ops::AdminOps;

/// The pantry: name, unit cost, opening stock.
const INGREDIENTS: &[(&str, f64, i64)] = &[
    ("dough", 0.80, 50),
    ("tomato sauce", 0.30, 50),
    ("mozzarella", 0.50, 40),
    ("basil", 0.10, 30),
    ("salami", 1.10, 20),
    ("ham", 0.90, 20),
    ("mushrooms", 0.60, 25),
    ("artichokes", 0.70, 15),
    ("olives", 0.40, 25),
    ("gorgonzola", 0.80, 10),
];

/// The menu: name, cost factor, recipe as (ingredient name, amount).
const PIZZAS: &[(&str, f64, &[(&str, i64)])] = &[
    (
        "Margherita",
        1.0,
        &[
            ("dough", 1),
            ("tomato sauce", 1),
            ("mozzarella", 2),
            ("basil", 1),
        ],
    ),
    (
        "Diavola",
        1.2,
        &[
            ("dough", 1),
            ("tomato sauce", 1),
            ("mozzarella", 2),
            ("salami", 2),
        ],
    ),
    (
        "Capricciosa",
        1.3,
        &[
            ("dough", 1),
            ("tomato sauce", 1),
            ("mozzarella", 2),
            ("ham", 1),
            ("mushrooms", 1),
            ("artichokes", 1),
            ("olives", 1),
        ],
    ),
    (
        "Quattro Formaggi",
        1.4,
        &[("dough", 1), ("mozzarella", 3), ("gorgonzola", 2)],
    ),
    (
        "Funghi",
        1.1,
        &[
            ("dough", 1),
            ("tomato sauce", 1),
            ("mozzarella", 2),
            ("mushrooms", 2),
        ],
    ),
];

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

    let mut db_path = env::var("PIZZERIA_DB").unwrap_or_else(|_| String::from("./pizzeria.db"));

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
                println!("Pizzeria Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./pizzeria.db,");
                println!("                     or the PIZZERIA_DB environment variable)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🍕 Pizzeria Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;
    let admin = AdminOps::new(db);

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to seed on top of existing data
    let existing = admin.list_ingredients().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} ingredients", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Stocking the pantry...");

    let mut ids = std::collections::HashMap::new();
    for &(name, cost, amount) in INGREDIENTS {
        let id = admin.add_ingredient(name, cost, amount).await?;
        ids.insert(name, id);
    }
    println!("  {} ingredients added", INGREDIENTS.len());

    println!("Building the menu...");
    for &(name, cost_factor, recipe) in PIZZAS {
        let pizza_id = admin.add_pizza(name, Some(cost_factor)).await?;
        let lines: Vec<(i64, i64)> = recipe
            .iter()
            .map(|&(ingredient, amount)| (ids[ingredient], amount))
            .collect();
        admin.add_recipe(pizza_id, &lines).await?;
    }
    println!("  {} pizzas added", PIZZAS.len());

    println!();
    println!("✅ Done. Buon appetito!");
    Ok(())
}
