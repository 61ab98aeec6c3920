//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.
//! Table creation in [`crate::config::database`] is generated from these.

pub mod revenue;
pub mod site;
pub mod ticket;
pub mod user;

// Re-export specific types to avoid conflicts
pub use revenue::{Column as RevenueColumn, Entity as Revenue, Model as RevenueModel};
pub use site::{Column as SiteColumn, Entity as Site, Model as SiteModel};
pub use ticket::{
    Column as TicketColumn, Entity as Ticket, Model as TicketModel, NotificationEmails,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
