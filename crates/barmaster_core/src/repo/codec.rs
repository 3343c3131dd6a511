//! Row <-> domain decoding at the persistence boundary.
//!
//! # Invariants
//! - Decoders never return a record that fails domain validation.
//! - Encoders write every column of the table so rows are self-describing.

use crate::model::job::{Job, JobId, JobStatus};
use crate::model::recipe::{format_ingredients, parse_ingredients, Recipe};
use crate::repo::record_store::{CellValue, Record, StoreError, StoreResult};

pub fn job_to_record(job: &Job) -> Record {
    Record::new()
        .with("id", job_id_cell(job.id))
        .with("title", job.title.as_str())
        .with("date", job.date.as_str())
        .with("location", job.location.as_str())
        .with("budget", job.budget.as_str())
        .with("status", job.status.as_str())
        .with("taker", job.taker.as_deref())
}

/// Fields written by a claim: status and taker in one update.
pub fn claim_fields(identity: &str) -> Record {
    Record::new()
        .with("status", JobStatus::Taken.as_str())
        .with("taker", identity)
}

pub fn job_id_cell(id: JobId) -> CellValue {
    match i64::try_from(id) {
        Ok(value) => CellValue::Integer(value),
        Err(_) => CellValue::Text(id.to_string()),
    }
}

pub fn job_from_record(record: &Record) -> StoreResult<Job> {
    let id = decode_job_id(record.get("id"))?;

    let status_text = record.text("status");
    let status = JobStatus::parse(status_text.trim()).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid status `{status_text}` for job {id}"))
    })?;

    let taker = match record.text("taker").trim() {
        "" => None,
        value => Some(value.to_string()),
    };

    let job = Job {
        id,
        title: record.text("title"),
        date: record.text("date"),
        location: record.text("location"),
        budget: record.text("budget"),
        status,
        taker,
    };
    job.validate()
        .map_err(|err| StoreError::InvalidData(err.to_string()))?;
    Ok(job)
}

fn decode_job_id(cell: &CellValue) -> StoreResult<JobId> {
    cell.as_id()
        .ok_or_else(|| StoreError::InvalidData(format!("invalid job id `{}`", cell.to_text())))
}

pub fn recipe_to_record(recipe: &Recipe) -> Record {
    Record::new()
        .with("name", recipe.name.as_str())
        .with("ingredients", format_ingredients(&recipe.ingredients))
}

/// Decodes a recipe row. A numeric `ingredients` cell is read through its
/// text rendering, so it becomes a single nameless-amount entry rather than
/// an error.
pub fn recipe_from_record(record: &Record) -> StoreResult<Recipe> {
    let name = record.text("name");
    if name.trim().is_empty() {
        return Err(StoreError::InvalidData("recipe row without name".to_string()));
    }

    Ok(Recipe {
        name,
        ingredients: parse_ingredients(&record.text("ingredients")),
    })
}

pub fn inventory_to_record(name: &str) -> Record {
    Record::new().with("item_name", name)
}

/// Inventory rows with a blank name are skipped.
pub fn inventory_from_record(record: &Record) -> Option<String> {
    let name = record.text("item_name");
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
