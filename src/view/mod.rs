//! View helpers - presentation pieces shared by the dashboard pages.

/// Ticket status badge (label, color classes, icon)
pub mod status_badge;

pub use status_badge::{Badge, IconKind, badge_for, render_badge};
