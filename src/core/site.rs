//! Site operations.

use crate::{
    config::dataset::SiteRecord,
    core::{InsertOutcome, insert_ignoring_conflicts},
    entities::{Site, site},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Rejects blank codes and negative amounts.
pub fn validate(record: &SiteRecord) -> Result<()> {
    if record.site_code.trim().is_empty() {
        return Err(Error::Validation {
            message: "Site code cannot be empty".to_string(),
        });
    }

    let amounts = [
        ("bandwidth", record.bandwidth),
        ("service_value", record.service_value),
        ("penalty_deduction", record.penalty_deduction),
        ("payment_value", record.payment_value),
    ];
    if let Some((field, value)) = amounts.iter().find(|(_, value)| *value < 0) {
        return Err(Error::Validation {
            message: format!(
                "Site '{}' has negative {field}: {value}",
                record.site_code
            ),
        });
    }

    Ok(())
}

/// Inserts a site unless its code (or derived id) is already present.
#[instrument(skip(db, record), fields(site_code = %record.site_code))]
pub async fn insert_if_absent<C>(db: &C, record: &SiteRecord) -> Result<InsertOutcome>
where
    C: ConnectionTrait,
{
    validate(record)?;

    let active = site::ActiveModel {
        id: Set(site::deterministic_id(&record.site_code)),
        site_code: Set(record.site_code.clone()),
        site_name: Set(record.site_name.clone()),
        department: Set(record.department.clone()),
        municipality: Set(record.municipality.clone()),
        village: Set(record.village.clone()),
        bandwidth: Set(record.bandwidth),
        service_value: Set(record.service_value),
        penalty_deduction: Set(record.penalty_deduction),
        payment_value: Set(record.payment_value),
    };

    let outcome = insert_ignoring_conflicts(db, Site::insert(active)).await?;
    debug!("Site insert outcome: {:?}", outcome);
    Ok(outcome)
}

/// Finds a site by its code.
pub async fn get_site_by_code<C>(db: &C, site_code: &str) -> Result<Option<site::Model>>
where
    C: ConnectionTrait,
{
    Site::find()
        .filter(site::Column::SiteCode.eq(site_code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// All sites ordered by code.
pub async fn list_sites<C>(db: &C) -> Result<Vec<site::Model>>
where
    C: ConnectionTrait,
{
    Site::find()
        .order_by_asc(site::Column::SiteCode)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of sites stored.
pub async fn count_sites<C>(db: &C) -> Result<u64>
where
    C: ConnectionTrait,
{
    Site::find().count(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_negative_amounts_are_rejected() {
        let mut record = sample_site("ANT-0001");
        record.penalty_deduction = -1;
        let err = validate(&record).unwrap_err();
        assert!(matches!(err, Error::Validation { ref message } if message.contains("penalty_deduction")));

        let mut record = sample_site("ANT-0001");
        record.site_code = " ".to_string();
        assert!(validate(&record).is_err());

        assert!(validate(&sample_site("ANT-0001")).is_ok());
    }

    #[tokio::test]
    async fn test_insert_is_idempotent_and_uses_stable_id() -> Result<()> {
        let db = setup_test_db().await?;
        let record = sample_site("ANT-0001");

        assert_eq!(insert_if_absent(&db, &record).await?, InsertOutcome::Inserted);
        assert_eq!(insert_if_absent(&db, &record).await?, InsertOutcome::Skipped);
        assert_eq!(count_sites(&db).await?, 1);

        let stored = get_site_by_code(&db, "ANT-0001").await?.unwrap();
        assert_eq!(stored.id, site::deterministic_id("ANT-0001"));
        assert_eq!(stored.bandwidth, record.bandwidth);
        assert_eq!(stored.payment_value, record.payment_value);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_sites_is_ordered_by_code() -> Result<()> {
        let db = setup_test_db().await?;
        insert_if_absent(&db, &sample_site("NAR-0310")).await?;
        insert_if_absent(&db, &sample_site("ANT-0001")).await?;

        let codes: Vec<String> = list_sites(&db)
            .await?
            .into_iter()
            .map(|s| s.site_code)
            .collect();
        assert_eq!(codes, vec!["ANT-0001", "NAR-0310"]);

        Ok(())
    }
}
