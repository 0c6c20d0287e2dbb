//! `sundry catalog ...`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sundry_catalog::{
    Catalog, DetailBatch, MigrateOptions, ValidationRules, enrich, filler, migrate, store,
    validate,
};
use sundry_core::SundryConfig;

use super::Outcome;
use crate::cli::CatalogAction;

const RULE: &str = "============================================================";

pub fn run(config: &SundryConfig, action: CatalogAction) -> Result<Outcome> {
    let resolve = |flag: Option<PathBuf>| flag.unwrap_or_else(|| config.catalog.path.clone());
    match action {
        CatalogAction::Validate { catalog, json } => {
            let rules = ValidationRules {
                required_fields: config.catalog.required_fields.clone(),
            };
            run_validate(&resolve(catalog), &rules, json)
        }
        CatalogAction::Enrich {
            batch,
            catalog,
            dry_run,
        } => run_enrich(&resolve(catalog), &batch, dry_run).map(|()| Outcome::Ok),
        CatalogAction::Fill { catalog, dry_run } => {
            run_fill(&resolve(catalog), dry_run).map(|()| Outcome::Ok)
        }
        CatalogAction::Migrate {
            catalog,
            remove_nulls,
            dry_run,
        } => run_migrate(&resolve(catalog), MigrateOptions { remove_nulls }, dry_run)
            .map(|()| Outcome::Ok),
    }
}

fn load(path: &Path) -> Result<Catalog> {
    let catalog = store::load(path)?;
    tracing::debug!("Loaded {} records from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn save(path: &Path, catalog: &Catalog, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("Dry run: {} not modified", path.display());
        return Ok(());
    }
    store::save(path, catalog).with_context(|| format!("Failed to save {}", path.display()))?;
    println!("Saved {}", path.display());
    Ok(())
}

fn run_validate(path: &Path, rules: &ValidationRules, json: bool) -> Result<Outcome> {
    let catalog = load(path)?;
    let report = validate::validate_with(&catalog, rules);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }
    Ok(if report.is_valid() {
        Outcome::Ok
    } else {
        Outcome::Problems
    })
}

fn run_enrich(path: &Path, batch_path: &Path, dry_run: bool) -> Result<()> {
    let mut catalog = load(path)?;
    let batch = DetailBatch::load(batch_path)?;
    let summary = enrich::apply(&mut catalog, &batch);

    println!("{RULE}");
    println!("Batch '{}'", summary.batch);
    println!("{RULE}");
    for (id, title) in &summary.updated {
        println!("  + {id}: {title}");
    }
    for id in &summary.unmatched {
        println!("  ? {id}: not in catalog");
    }
    println!();
    println!(
        "Updated {} record(s): {} book(s), {} thing(s)",
        summary.updated.len(),
        summary.books,
        summary.things
    );
    println!(
        "Records with details: {}/{}",
        summary.with_details, summary.total
    );

    if summary.updated.is_empty() {
        println!("Nothing to write");
        return Ok(());
    }
    save(path, &catalog, dry_run)
}

fn run_fill(path: &Path, dry_run: bool) -> Result<()> {
    let mut catalog = load(path)?;
    let summary = filler::fill_missing(&mut catalog);

    println!("{RULE}");
    println!("Placeholder details");
    println!("{RULE}");
    for (id, title, kind) in &summary.filled {
        println!("  + {id} [{kind}]: {title}");
    }
    println!();
    println!(
        "Filled {} record(s): {} book(s), {} thing(s); {} already had details",
        summary.filled.len(),
        summary.books,
        summary.things,
        summary.skipped
    );
    println!(
        "Coverage: {}/{} ({:.1}%)",
        summary.with_details,
        summary.total,
        summary.coverage_percent()
    );

    if summary.filled.is_empty() {
        println!("Nothing to write");
        return Ok(());
    }
    save(path, &catalog, dry_run)
}

fn run_migrate(path: &Path, opts: MigrateOptions, dry_run: bool) -> Result<()> {
    let mut catalog = load(path)?;
    let summary = migrate::run(&mut catalog, opts);

    for (id, kind) in &summary.typed {
        println!("  + {id}: itemType = {kind}");
    }
    for id in &summary.untyped {
        println!("  ? {id}: type could not be inferred");
    }
    if opts.remove_nulls {
        println!("Removed {} null field(s)", summary.nulls_removed);
    }
    println!("Added itemType to {} record(s)", summary.typed.len());

    if summary.is_noop() {
        println!("Nothing to write");
        return Ok(());
    }
    save(path, &catalog, dry_run)
}
