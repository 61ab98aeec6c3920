//! Ticket entity - A support ticket raised against a site.
//!
//! `site_code`/`site_name` are a denormalized copy of the site at the time the
//! ticket was opened; there is no foreign key. `status` is stored as free text
//! so that rows written by other tools can still be read back, and is parsed
//! into [`TicketStatus`] on demand.

use crate::core::status::TicketStatus;
use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

/// Namespace for deriving deterministic ticket ids.
const TICKET_ID_NAMESPACE: Uuid = Uuid::from_u128(0x8c3f_1d2e_77a4_4b09_b6e2_95f0_aa13_c7d4);

/// Ordered list of addresses notified on ticket changes.
///
/// Persisted as a JSON array so the same schema works on `PostgreSQL` and `SQLite`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct NotificationEmails(pub Vec<String>);

/// Ticket database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    /// Unique identifier for the ticket
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Operator-facing ticket reference; not unique
    #[sea_orm(column_type = "Text")]
    pub identifier: String,
    /// Code of the site the ticket concerns
    #[sea_orm(column_type = "Text")]
    pub site_code: String,
    /// Name of the site the ticket concerns
    #[sea_orm(column_type = "Text")]
    pub site_name: String,
    /// Technician assigned to the ticket
    #[sea_orm(column_type = "Text")]
    pub technician_name: String,
    /// On-site contact
    #[sea_orm(column_type = "Text")]
    pub contact_name: String,
    /// On-site contact phone
    #[sea_orm(column_type = "Text")]
    pub contact_phone: String,
    /// Optional evidence photo
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    /// Addresses notified on changes, in order
    #[sea_orm(column_type = "Json")]
    pub notification_emails: NotificationEmails,
    /// Lifecycle stage, one of the [`TicketStatus`] literals
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub status: String,
}

/// Tickets carry a denormalized site copy instead of a relation
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            ..ActiveModelTrait::default()
        }
    }
}

impl Model {
    /// Parsed status, or `None` when the stored text is not a known status.
    #[must_use]
    pub fn parsed_status(&self) -> Option<TicketStatus> {
        self.status.parse().ok()
    }
}

/// Stable id for a ticket, so re-seeding the same record collides instead of
/// duplicating.
///
/// Every column except `id` feeds the key, so two records that differ in any
/// field (status, contact, the order of notification addresses) get distinct
/// ids. Fields are length-prefixed to keep the encoding unambiguous.
#[must_use]
pub fn deterministic_id(model: &Model) -> Uuid {
    fn push(key: &mut String, field: &str) {
        key.push_str(&field.len().to_string());
        key.push(':');
        key.push_str(field);
    }

    let mut key = String::new();
    for field in [
        &model.identifier,
        &model.site_code,
        &model.site_name,
        &model.technician_name,
        &model.contact_name,
        &model.contact_phone,
    ] {
        push(&mut key, field);
    }
    match &model.image_url {
        Some(url) => push(&mut key, url),
        None => key.push('~'),
    }
    key.push_str(&model.notification_emails.0.len().to_string());
    key.push('#');
    for email in &model.notification_emails.0 {
        push(&mut key, email);
    }
    push(&mut key, &model.status);

    Uuid::new_v5(&TICKET_ID_NAMESPACE, key.as_bytes())
}
