//! Core data operations - framework-agnostic inserts and lookups for each table.
//!
//! Every insert here is idempotent: it is issued with `ON CONFLICT DO NOTHING`
//! and reports whether a row was actually written.

/// Argon2 password hashing and verification
pub mod password;
/// Revenue rows
pub mod revenue;
/// Site rows
pub mod site;
/// Ticket lifecycle status enumeration
pub mod status;
/// Ticket rows
pub mod ticket;
/// User rows
pub mod user;

use crate::errors::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Insert, TryInsertResult};

/// What happened to a single idempotent insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written
    Inserted,
    /// A row with the same key already existed; nothing was written
    Skipped,
}

/// Executes `insert` with `ON CONFLICT DO NOTHING` against any unique constraint.
pub(crate) async fn insert_ignoring_conflicts<A, C>(
    db: &C,
    insert: Insert<A>,
) -> Result<InsertOutcome>
where
    A: ActiveModelTrait,
    C: ConnectionTrait,
{
    let result = insert
        .on_conflict(OnConflict::new().do_nothing().to_owned())
        .do_nothing()
        .exec(db)
        .await?;

    Ok(match result {
        TryInsertResult::Inserted(_) => InsertOutcome::Inserted,
        TryInsertResult::Conflicted | TryInsertResult::Empty => InsertOutcome::Skipped,
    })
}
