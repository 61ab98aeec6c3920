//! Ticket lifecycle status.
//!
//! The set is closed: a ticket is `abierto`, `registrado`, `actualizado` or
//! `cerrado`, stored as those exact lowercase literals.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of a ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Open, waiting for attention
    Abierto,
    /// Logged with the operator
    Registrado,
    /// Work in progress has been reported
    Actualizado,
    /// Closed
    Cerrado,
}

impl TicketStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Abierto,
        Self::Registrado,
        Self::Actualizado,
        Self::Cerrado,
    ];

    /// The literal stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abierto => "abierto",
            Self::Registrado => "registrado",
            Self::Actualizado => "actualizado",
            Self::Cerrado => "cerrado",
        }
    }

    /// Capitalized label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Abierto => "Abierto",
            Self::Registrado => "Registrado",
            Self::Actualizado => "Actualizado",
            Self::Cerrado => "Cerrado",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = Error;

    /// Exact, case-sensitive match against the stored literals.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::InvalidStatus {
                value: s.to_string(),
            })
    }
}

impl TryFrom<&str> for TicketStatus {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_round_trips_every_literal() {
        for status in TicketStatus::ALL {
            assert_eq!(status.as_str().parse::<TicketStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "Abierto".parse::<TicketStatus>().unwrap_err();
        assert!(matches!(err, Error::InvalidStatus { ref value } if value == "Abierto"));
        assert!(TicketStatus::try_from("CERRADO").is_err());
        assert!(TicketStatus::try_from("").is_err());
        assert!(TicketStatus::try_from(" abierto").is_err());
    }

    #[test]
    fn test_serde_uses_stored_literals() {
        let json = serde_json::to_string(&TicketStatus::Actualizado).unwrap();
        assert_eq!(json, "\"actualizado\"");
    }
}
