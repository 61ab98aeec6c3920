//! User operations - idempotent inserts, lookups and credential checks.
//!
//! Passwords are hashed here, immediately before the insert is built, so a
//! plaintext value never reaches an `ActiveModel`.

use crate::{
    config::dataset::UserRecord,
    core::{InsertOutcome, insert_ignoring_conflicts, password},
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, Set, prelude::*};
use tracing::{debug, instrument};

/// Rejects records that would violate column constraints or leak a blank password.
pub fn validate(record: &UserRecord) -> Result<()> {
    if record.id.trim().is_empty() {
        return Err(Error::Validation {
            message: "User id cannot be empty".to_string(),
        });
    }
    if record.name.trim().is_empty() || record.name.chars().count() > 255 {
        return Err(Error::Validation {
            message: format!("User '{}' must have a name of 1 to 255 characters", record.id),
        });
    }
    if !record.email.contains('@') {
        return Err(Error::Validation {
            message: format!("User '{}' has an invalid email '{}'", record.id, record.email),
        });
    }
    if record.password.is_empty() {
        return Err(Error::Validation {
            message: format!("User '{}' has an empty password", record.id),
        });
    }
    Ok(())
}

/// Inserts a user unless one with the same id or email already exists.
#[instrument(skip(db, record), fields(user_id = %record.id))]
pub async fn insert_if_absent<C>(db: &C, record: &UserRecord) -> Result<InsertOutcome>
where
    C: ConnectionTrait,
{
    validate(record)?;
    // Argon2 is CPU-bound; keep it off the runtime thread driving the batch.
    let plaintext = record.password.clone();
    let hashed = tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
        .await
        .map_err(|e| Error::Hashing {
            message: format!("hashing task failed: {e}"),
        })??;

    let active = user::ActiveModel {
        id: Set(record.id.clone()),
        name: Set(record.name.clone()),
        email: Set(record.email.clone()),
        password: Set(hashed),
    };

    let outcome = insert_ignoring_conflicts(db, User::insert(active)).await?;
    debug!("User insert outcome: {:?}", outcome);
    Ok(outcome)
}

/// Finds a user by login email.
pub async fn get_user_by_email<C>(db: &C, email: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the user if `email` exists and `plaintext` matches its stored hash.
pub async fn verify_credentials<C>(
    db: &C,
    email: &str,
    plaintext: &str,
) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    let Some(found) = get_user_by_email(db, email).await? else {
        return Ok(None);
    };
    if password::verify_password(plaintext, &found.password)? {
        Ok(Some(found))
    } else {
        Ok(None)
    }
}

/// Number of users stored.
pub async fn count_users<C>(db: &C) -> Result<u64>
where
    C: ConnectionTrait,
{
    User::find().count(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_validation_runs_before_any_query() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut record = sample_user("u1", "ana@x.com");
        record.email = "not-an-email".to_string();
        let result = insert_if_absent(&db, &record).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let mut record = sample_user("u1", "ana@x.com");
        record.password = String::new();
        let result = insert_if_absent(&db, &record).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let record = sample_user("  ", "ana@x.com");
        let result = insert_if_absent(&db, &record).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_seeding_same_user_twice_keeps_one_row() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let record = sample_user("u1", "ana@x.com");

        assert_eq!(insert_if_absent(&db, &record).await?, InsertOutcome::Inserted);
        assert_eq!(insert_if_absent(&db, &record).await?, InsertOutcome::Skipped);

        assert_eq!(count_users(&db).await?, 1);
        let stored = get_user_by_email(&db, "ana@x.com").await?.unwrap();
        assert_eq!(stored.id, "u1");
        assert_eq!(stored.name, "Ana");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_with_new_id_is_skipped() -> Result<()> {
        let db = setup_test_db().await?;
        insert_if_absent(&db, &sample_user("u1", "ana@x.com")).await?;

        let outcome = insert_if_absent(&db, &sample_user("u2", "ana@x.com")).await?;
        assert_eq!(outcome, InsertOutcome::Skipped);
        assert_eq!(count_users(&db).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_stored_password_is_hashed_and_verifies() -> Result<()> {
        let db = setup_test_db().await?;
        insert_if_absent(&db, &sample_user("u1", "ana@x.com")).await?;

        let stored = get_user_by_email(&db, "ana@x.com").await?.unwrap();
        assert_ne!(stored.password, "secret");
        assert!(password::verify_password("secret", &stored.password)?);

        assert!(verify_credentials(&db, "ana@x.com", "secret").await?.is_some());
        assert!(verify_credentials(&db, "ana@x.com", "wrong").await?.is_none());
        assert!(verify_credentials(&db, "nobody@x.com", "secret").await?.is_none());

        Ok(())
    }
}
