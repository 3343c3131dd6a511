//! Demo rows for a fresh store.

use crate::model::job::{Job, NewJob};
use crate::model::recipe::{Quantity, Recipe};
use crate::repo::codec::{inventory_to_record, job_to_record, recipe_to_record};
use crate::repo::record_store::{RecordStore, StoreResult, Table};
use log::info;

/// Row counts written by [`seed_demo`], per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub recipes: usize,
    pub inventory: usize,
    pub jobs: usize,
}

pub fn demo_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new("Gin Tonic")
            .with("Gin", Quantity::Numeric(45.0))
            .with("Tonic", Quantity::Numeric(120.0)),
        Recipe::new("Mojito")
            .with("White Rum", Quantity::Numeric(50.0))
            .with("Lime Juice", Quantity::Numeric(20.0))
            .with("Sugar Syrup", Quantity::Numeric(15.0))
            .with("Mint", Quantity::Text("Handful".to_string())),
        Recipe::new("Negroni")
            .with("Gin", Quantity::Numeric(30.0))
            .with("Campari", Quantity::Numeric(30.0))
            .with("Sweet Vermouth", Quantity::Numeric(30.0)),
        Recipe::new("Old Fashioned")
            .with("Bourbon", Quantity::Numeric(60.0))
            .with("Angostura Bitters", Quantity::Text("2 dashes".to_string()))
            .with("Sugar Cube", Quantity::Numeric(1.0)),
    ]
}

pub fn demo_inventory() -> Vec<&'static str> {
    vec!["Gin", "Tonic", "Lime", "Mint"]
}

/// Jobs 101..=103, all open.
pub fn demo_jobs() -> Vec<Job> {
    [
        ("Wedding cocktail bar", "2026-11-14", "Taipei Xinyi", "NT$6000"),
        ("Rooftop pop-up", "2026-11-21", "Taichung", "NT$4500"),
        ("Corporate year-end party", "2026-12-19", "Taipei Neihu", "NT$8000"),
    ]
    .into_iter()
    .zip(101..)
    .map(|((title, date, location, budget), id)| {
        Job::open(
            id,
            NewJob {
                title: title.to_string(),
                date: date.to_string(),
                location: location.to_string(),
                budget: budget.to_string(),
            },
        )
    })
    .collect()
}

/// Appends demo rows to every table that is currently empty.
pub fn seed_demo(store: &impl RecordStore) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    if store.read_all(Table::Recipes)?.is_empty() {
        for recipe in demo_recipes() {
            store.append(Table::Recipes, &recipe_to_record(&recipe))?;
            report.recipes += 1;
        }
    }

    if store.read_all(Table::Inventory)?.is_empty() {
        for item in demo_inventory() {
            store.append(Table::Inventory, &inventory_to_record(item))?;
            report.inventory += 1;
        }
    }

    if store.read_all(Table::Jobs)?.is_empty() {
        for job in demo_jobs() {
            store.append(Table::Jobs, &job_to_record(&job))?;
            report.jobs += 1;
        }
    }

    info!(
        "event=seed_demo module=seed status=ok recipes={} inventory={} jobs={}",
        report.recipes, report.inventory, report.jobs
    );
    Ok(report)
}
