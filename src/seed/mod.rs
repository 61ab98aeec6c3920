//! Seed loader - provisions the four tables and writes the placeholder rows.
//!
//! Tables are seeded in a fixed order: users, sites, tickets, revenue. For each
//! table the loader ensures the table exists, then issues every row insert as
//! one concurrent batch and waits for the whole batch before moving on. All
//! inserts go through the same connection (or transaction), so the backend
//! still executes them one at a time. Password hashing for the users batch runs
//! on tokio's blocking pool.
//!
//! Failure handling is chosen by [`FailurePolicy`]:
//! - `Transactional` runs everything inside one transaction; the first failure
//!   rolls the whole run back.
//! - `RowTolerant` runs without a transaction; a table that cannot be created
//!   aborts the run, while a bad row is logged, counted and skipped.

/// Per-table and per-run counters
pub mod report;

use crate::{
    config::{
        database::{create_table, ensure_uuid_support},
        dataset::SeedDataset,
        runtime::FailurePolicy,
    },
    core::{self, InsertOutcome},
    entities::{Revenue, Site, Ticket, User},
    errors::Result,
};
use futures::future::join_all;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, TransactionTrait};
use std::future::Future;
use tracing::{error, info, instrument, warn};

pub use report::{SeedReport, TableReport};

/// Seeds `dataset` into `db` under `policy`.
#[instrument(skip(db, dataset), fields(records = dataset.len()))]
pub async fn run(
    db: &DatabaseConnection,
    dataset: &SeedDataset,
    policy: FailurePolicy,
) -> Result<SeedReport> {
    match policy {
        FailurePolicy::Transactional => {
            let txn = db.begin().await?;
            match seed_all(&txn, dataset, policy).await {
                Ok(report) => {
                    txn.commit().await?;
                    info!("Seed transaction committed");
                    Ok(report)
                }
                Err(e) => {
                    if let Err(rollback_err) = txn.rollback().await {
                        warn!("Rollback after failed seed also failed: {}", rollback_err);
                    } else {
                        warn!("Seed transaction rolled back");
                    }
                    Err(e)
                }
            }
        }
        FailurePolicy::RowTolerant => seed_all(db, dataset, policy).await,
    }
}

async fn seed_all<C>(db: &C, dataset: &SeedDataset, policy: FailurePolicy) -> Result<SeedReport>
where
    C: ConnectionTrait,
{
    let users = seed_table(db, User, true, &dataset.users, policy, |db, record| {
        core::user::insert_if_absent(db, record)
    })
    .await?;
    let sites = seed_table(db, Site, true, &dataset.sites, policy, |db, record| {
        core::site::insert_if_absent(db, record)
    })
    .await?;
    let tickets = seed_table(db, Ticket, true, &dataset.tickets, policy, |db, record| {
        core::ticket::insert_if_absent(db, record)
    })
    .await?;
    let revenue = seed_table(db, Revenue, false, &dataset.revenue, policy, |db, record| {
        core::revenue::insert_if_absent(db, record)
    })
    .await?;

    Ok(SeedReport {
        tables: vec![users, sites, tickets, revenue],
    })
}

/// Provisions one table and inserts its records as a single joined batch.
async fn seed_table<'a, C, E, R, F, Fut>(
    db: &'a C,
    entity: E,
    needs_uuid: bool,
    records: &'a [R],
    policy: FailurePolicy,
    insert: F,
) -> Result<TableReport>
where
    C: ConnectionTrait,
    E: EntityTrait,
    F: Fn(&'a C, &'a R) -> Fut,
    Fut: Future<Output = Result<InsertOutcome>> + 'a,
{
    let table = entity.table_name().to_string();

    if let Err(e) = provision(db, entity, needs_uuid, &table).await {
        error!("Error seeding {}: {}", table, e);
        return Err(e);
    }
    info!("Created \"{}\" table", table);

    let results = join_all(records.iter().map(|record| insert(db, record))).await;

    let mut report = TableReport::new(&table);
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(outcome) => report.record(outcome),
            Err(e) if policy == FailurePolicy::RowTolerant => {
                error!("Error inserting {} row {}: {}", table, index, e);
                report.record_failure();
            }
            Err(e) => {
                error!("Error seeding {} at row {}: {}", table, index, e);
                return Err(e);
            }
        }
    }

    info!("Seeded {} {}", report.attempted, table);
    Ok(report)
}

async fn provision<C, E>(db: &C, entity: E, needs_uuid: bool, table: &str) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    if needs_uuid {
        ensure_uuid_support(db, table).await?;
    }
    create_table(db, entity).await
}
