//! Shared test utilities.
//!
//! Helpers for setting up in-memory databases and building dataset records
//! with sensible defaults.

use crate::{
    config::dataset::{RevenueRecord, SeedDataset, SiteRecord, TicketRecord, UserRecord},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness; safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with no tables.
pub async fn setup_empty_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    Ok(db)
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = setup_empty_db().await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A user named "Ana" with password "secret".
pub fn sample_user(id: &str, email: &str) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        name: "Ana".to_string(),
        email: email.to_string(),
        password: "secret".to_string(),
    }
}

/// A site in Antioquia with non-negative amounts.
pub fn sample_site(site_code: &str) -> SiteRecord {
    SiteRecord {
        site_code: site_code.to_string(),
        site_name: format!("Sede {site_code}"),
        department: "Antioquia".to_string(),
        municipality: "Yarumal".to_string(),
        village: "El Cedro".to_string(),
        bandwidth: 10,
        service_value: 1_250_000,
        penalty_deduction: 0,
        payment_value: 1_250_000,
    }
}

/// A ticket against `site_code` with two notification addresses.
pub fn sample_ticket(identifier: &str, site_code: &str, status: &str) -> TicketRecord {
    TicketRecord {
        identifier: identifier.to_string(),
        site_code: site_code.to_string(),
        site_name: format!("Sede {site_code}"),
        technician_name: "Luis".to_string(),
        contact_name: "Marta".to_string(),
        contact_phone: "3104567890".to_string(),
        image_url: None,
        notification_emails: vec!["noc@x.com".to_string(), "ops@x.com".to_string()],
        status: status.to_string(),
    }
}

/// A revenue row.
pub fn sample_revenue(month: &str, revenue: i32) -> RevenueRecord {
    RevenueRecord {
        month: month.to_string(),
        revenue,
    }
}

/// A small dataset touching every table.
pub fn small_dataset() -> SeedDataset {
    SeedDataset {
        users: vec![sample_user("u1", "ana@x.com")],
        sites: vec![sample_site("ANT-0001"), sample_site("CAU-0101")],
        tickets: vec![
            sample_ticket("TK-1", "ANT-0001", "abierto"),
            sample_ticket("TK-2", "CAU-0101", "cerrado"),
        ],
        revenue: vec![sample_revenue("Jan", 2000), sample_revenue("Feb", 1800)],
    }
}
