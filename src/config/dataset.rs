//! Seed dataset loading from TOML
//!
//! A dataset lists the placeholder rows the seed loader writes, one array of
//! tables per entity:
//!
//! ```toml
//! [[users]]
//! id = "410544b2-4001-4271-9855-fec4b6a6442a"
//! name = "User"
//! email = "user@nextmail.com"
//! password = "123456"
//!
//! [[revenue]]
//! month = "Jan"
//! revenue = 2000
//! ```
//!
//! Passwords are plaintext here and are hashed before they reach the database.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Placeholder dataset compiled into the binary.
const PLACEHOLDER_DATASET: &str = include_str!("../../data/placeholder.toml");

/// Complete seed dataset
#[derive(Debug, Default, Deserialize)]
pub struct SeedDataset {
    /// Users to seed
    #[serde(default)]
    pub users: Vec<UserRecord>,
    /// Sites to seed
    #[serde(default)]
    pub sites: Vec<SiteRecord>,
    /// Tickets to seed
    #[serde(default)]
    pub tickets: Vec<TicketRecord>,
    /// Revenue rows to seed
    #[serde(default)]
    pub revenue: Vec<RevenueRecord>,
}

/// A user as written in the dataset
#[derive(Debug, Deserialize, Clone)]
pub struct UserRecord {
    /// User identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Plaintext password, hashed on insert
    pub password: String,
}

/// A site as written in the dataset
#[derive(Debug, Deserialize, Clone)]
pub struct SiteRecord {
    /// Unique site code
    pub site_code: String,
    /// Site name
    pub site_name: String,
    /// Department
    pub department: String,
    /// Municipality
    pub municipality: String,
    /// Village
    pub village: String,
    /// Contracted bandwidth
    pub bandwidth: i32,
    /// Monthly service value
    pub service_value: i32,
    /// Penalty deduction
    pub penalty_deduction: i32,
    /// Payment value
    pub payment_value: i32,
}

/// A ticket as written in the dataset
#[derive(Debug, Deserialize, Clone)]
pub struct TicketRecord {
    /// Operator-facing reference
    pub identifier: String,
    /// Site code (denormalized)
    pub site_code: String,
    /// Site name (denormalized)
    pub site_name: String,
    /// Assigned technician
    pub technician_name: String,
    /// On-site contact
    pub contact_name: String,
    /// On-site contact phone
    pub contact_phone: String,
    /// Optional evidence photo
    #[serde(default)]
    pub image_url: Option<String>,
    /// Addresses to notify, in order
    #[serde(default)]
    pub notification_emails: Vec<String>,
    /// Status literal; validated on insert
    pub status: String,
}

/// A revenue row as written in the dataset
#[derive(Debug, Deserialize, Clone)]
pub struct RevenueRecord {
    /// Month code, at most four characters
    pub month: String,
    /// Revenue amount
    pub revenue: i32,
}

impl SeedDataset {
    /// Total number of records across all tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len() + self.sites.len() + self.tickets.len() + self.revenue.len()
    }

    /// Whether the dataset has no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses a dataset from TOML text.
pub fn parse_dataset(contents: &str) -> Result<SeedDataset> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed dataset: {e}"),
    })
}

/// Loads a dataset from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<SeedDataset> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading seed dataset from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read seed dataset {}: {e}", path_ref.display()),
    })?;
    parse_dataset(&contents)
}

/// The placeholder dataset shipped with the crate.
pub fn default_dataset() -> Result<SeedDataset> {
    parse_dataset(PLACEHOLDER_DATASET)
}
