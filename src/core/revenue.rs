//! Revenue operations.

use crate::{
    config::dataset::RevenueRecord,
    core::{InsertOutcome, insert_ignoring_conflicts},
    entities::{Revenue, revenue},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, Set, prelude::*};
use tracing::instrument;

/// Month codes are one to four characters.
pub fn validate(record: &RevenueRecord) -> Result<()> {
    let len = record.month.chars().count();
    if len == 0 || len > 4 {
        return Err(Error::Validation {
            message: format!("Revenue month '{}' must be 1 to 4 characters", record.month),
        });
    }
    Ok(())
}

/// Inserts a revenue row unless the month is already present.
#[instrument(skip(db, record), fields(month = %record.month))]
pub async fn insert_if_absent<C>(db: &C, record: &RevenueRecord) -> Result<InsertOutcome>
where
    C: ConnectionTrait,
{
    validate(record)?;
    let active = revenue::ActiveModel {
        month: Set(record.month.clone()),
        revenue: Set(record.revenue),
    };
    insert_ignoring_conflicts(db, Revenue::insert(active)).await
}

/// Revenue for one month, if seeded.
pub async fn get_revenue_by_month<C>(db: &C, month: &str) -> Result<Option<revenue::Model>>
where
    C: ConnectionTrait,
{
    Revenue::find_by_id(month.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Number of revenue rows stored.
pub async fn count_revenue<C>(db: &C) -> Result<u64>
where
    C: ConnectionTrait,
{
    Revenue::find().count(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_existing_month_is_not_overwritten() -> Result<()> {
        let db = setup_test_db().await?;
        let first = RevenueRecord {
            month: "Jan".to_string(),
            revenue: 2000,
        };
        let second = RevenueRecord {
            month: "Jan".to_string(),
            revenue: 9999,
        };

        assert_eq!(insert_if_absent(&db, &first).await?, InsertOutcome::Inserted);
        assert_eq!(insert_if_absent(&db, &second).await?, InsertOutcome::Skipped);

        let stored = get_revenue_by_month(&db, "Jan").await?.unwrap();
        assert_eq!(stored.revenue, 2000);
        assert_eq!(count_revenue(&db).await?, 1);

        Ok(())
    }

    #[test]
    fn test_month_length_is_checked() {
        for month in ["", "Enero"] {
            let record = RevenueRecord {
                month: month.to_string(),
                revenue: 1,
            };
            assert!(matches!(validate(&record), Err(Error::Validation { .. })));
        }
    }
}
