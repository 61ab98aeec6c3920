//! Ticket operations - idempotent inserts and the lookups the ticket views use.
//!
//! The status literal is validated on the way in; on the way out it is returned
//! as stored, and [`crate::view::status_badge::render_badge`] decides how to
//! draw it.

use crate::{
    config::dataset::TicketRecord,
    core::{InsertOutcome, insert_ignoring_conflicts, status::TicketStatus},
    entities::{NotificationEmails, Ticket, ticket},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Checks required fields and parses the status.
pub fn validate(record: &TicketRecord) -> Result<TicketStatus> {
    if record.identifier.trim().is_empty() {
        return Err(Error::Validation {
            message: "Ticket identifier cannot be empty".to_string(),
        });
    }
    if record.site_code.trim().is_empty() {
        return Err(Error::Validation {
            message: format!("Ticket '{}' has no site code", record.identifier),
        });
    }
    if let Some(bad) = record.notification_emails.iter().find(|e| !e.contains('@')) {
        return Err(Error::Validation {
            message: format!(
                "Ticket '{}' has an invalid notification email '{bad}'",
                record.identifier
            ),
        });
    }
    record.status.parse()
}

/// Inserts a ticket unless an identical record was seeded before.
#[instrument(skip(db, record), fields(identifier = %record.identifier))]
pub async fn insert_if_absent<C>(db: &C, record: &TicketRecord) -> Result<InsertOutcome>
where
    C: ConnectionTrait,
{
    let status = validate(record)?;

    let mut model = ticket::Model {
        id: Uuid::nil(),
        identifier: record.identifier.clone(),
        site_code: record.site_code.clone(),
        site_name: record.site_name.clone(),
        technician_name: record.technician_name.clone(),
        contact_name: record.contact_name.clone(),
        contact_phone: record.contact_phone.clone(),
        image_url: record.image_url.clone(),
        notification_emails: NotificationEmails(record.notification_emails.clone()),
        status: status.as_str().to_string(),
    };
    model.id = ticket::deterministic_id(&model);

    let active = ticket::ActiveModel {
        id: Set(model.id),
        identifier: Set(model.identifier),
        site_code: Set(model.site_code),
        site_name: Set(model.site_name),
        technician_name: Set(model.technician_name),
        contact_name: Set(model.contact_name),
        contact_phone: Set(model.contact_phone),
        image_url: Set(model.image_url),
        notification_emails: Set(model.notification_emails),
        status: Set(model.status),
    };

    let outcome = insert_ignoring_conflicts(db, Ticket::insert(active)).await?;
    debug!("Ticket insert outcome: {:?}", outcome);
    Ok(outcome)
}

/// Tickets currently in `status`, ordered by identifier.
pub async fn get_tickets_by_status<C>(db: &C, status: TicketStatus) -> Result<Vec<ticket::Model>>
where
    C: ConnectionTrait,
{
    Ticket::find()
        .filter(ticket::Column::Status.eq(status.as_str()))
        .order_by_asc(ticket::Column::Identifier)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Tickets raised against a site, ordered by identifier.
pub async fn get_tickets_for_site<C>(db: &C, site_code: &str) -> Result<Vec<ticket::Model>>
where
    C: ConnectionTrait,
{
    Ticket::find()
        .filter(ticket::Column::SiteCode.eq(site_code))
        .order_by_asc(ticket::Column::Identifier)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of tickets stored.
pub async fn count_tickets<C>(db: &C) -> Result<u64>
where
    C: ConnectionTrait,
{
    Ticket::find().count(db).await.map_err(Into::into)
}
