//! Status badge - renders a ticket status as a colored pill.
//!
//! [`badge_for`] is the strict variant and returns `None` for anything outside
//! the status enumeration. [`render_badge`] never fails: unknown values render
//! as an empty container, which is what the ticket table shows for bad rows.

use crate::core::status::TicketStatus;
use std::fmt;

/// Classes every badge container carries, known status or not.
pub const CONTAINER_CLASS: &str = "inline-flex items-center rounded-full px-2 py-1 text-xs";

/// Icon shown after the badge label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconKind {
    /// Pending / waiting
    Clock,
    /// Acknowledged
    Check,
}

impl IconKind {
    /// Icon name as used by the icon set.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::Check => "check",
        }
    }

    /// Sizing and tint classes for the icon element.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Clock => "ml-1 w-4 text-gray-500",
            Self::Check => "ml-1 w-4 text-white",
        }
    }
}

/// Everything the view layer needs to draw a status pill.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Badge {
    /// Visible text; empty for unknown statuses
    pub label: &'static str,
    /// Background/foreground classes; empty for unknown statuses
    pub color_class: &'static str,
    /// Trailing icon, if any
    pub icon: Option<IconKind>,
}

impl Badge {
    /// The badge drawn for an unrecognized status.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            label: "",
            color_class: "",
            icon: None,
        }
    }

    /// Whether this is the empty badge.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.label.is_empty() && self.icon.is_none()
    }

    /// Full class list for the container element.
    #[must_use]
    pub fn container_class(&self) -> String {
        if self.color_class.is_empty() {
            CONTAINER_CLASS.to_string()
        } else {
            format!("{CONTAINER_CLASS} {}", self.color_class)
        }
    }
}

impl From<TicketStatus> for Badge {
    fn from(status: TicketStatus) -> Self {
        let (color_class, icon) = match status {
            TicketStatus::Abierto => ("bg-green-600 text-white-500", IconKind::Clock),
            TicketStatus::Registrado => ("bg-lime-400 text-black", IconKind::Check),
            TicketStatus::Actualizado => ("bg-indigo-600 text-white", IconKind::Check),
            TicketStatus::Cerrado => ("bg-stone-500 text-white", IconKind::Check),
        };
        Self {
            label: status.label(),
            color_class,
            icon: Some(icon),
        }
    }
}

/// Writes the badge as an HTML `<span>`.
impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<span class=\"{}\">", self.container_class())?;
        f.write_str(self.label)?;
        if let Some(icon) = self.icon {
            write!(
                f,
                "<i class=\"icon icon-{} {}\" aria-hidden=\"true\"></i>",
                icon.name(),
                icon.class()
            )?;
        }
        f.write_str("</span>")
    }
}

/// Badge for a stored status value, or `None` if the value is not a status.
#[must_use]
pub fn badge_for(status: &str) -> Option<Badge> {
    status.parse::<TicketStatus>().ok().map(Badge::from)
}

/// Badge for a stored status value; unknown values give [`Badge::empty`].
#[must_use]
pub fn render_badge(status: &str) -> Badge {
    badge_for(status).unwrap_or_default()
}
