use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Identifier of a helpdesk ticket (e.g., 42, "42")
///
/// The host may send ids as JSON numbers or strings; both normalize to the
/// same textual form, which is also what a drop payload carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for TicketId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl FromStr for TicketId {
    type Err = crate::error::TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
            return Err(crate::error::TriageError::InvalidTicketId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for TicketId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(TicketId::from(n)),
            RawId::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Reads an optional field, turning a value of the wrong shape into `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => match serde_json::from_value(value) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed ticket field");
                Ok(None)
            }
        },
    }
}

/// A support ticket as returned by the helpdesk
///
/// Only `id` must be well-formed. Every other field falls back to `None`
/// when the host sends something unexpected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    #[serde(default, deserialize_with = "lenient")]
    pub subject: Option<String>,
    /// Host-side status ("new", "open", ...); informational only
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub const NO_SUBJECT: &'static str = "No Subject";

    /// Creates a ticket with just an id and an optional subject
    pub fn new(id: impl Into<TicketId>, subject: Option<String>) -> Self {
        Self {
            id: id.into(),
            subject,
            status: None,
            priority: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Subject to show on the card, falling back to a placeholder
    pub fn display_subject(&self) -> &str {
        match self.subject.as_deref() {
            Some(subject) if !subject.trim().is_empty() => subject,
            _ => Self::NO_SUBJECT,
        }
    }

    /// DOM id of the ticket's card, used when registering it as draggable
    pub fn element_id(&self) -> String {
        format!("ticket-{}", self.id)
    }

    /// Agent-interface URL for this ticket on the given account
    pub fn agent_url(&self, subdomain: &str) -> String {
        format!("https://{}.zendesk.com/agent/tickets/{}", subdomain, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: u64, subject: Option<&str>) -> Ticket {
        Ticket::new(id, subject.map(str::to_string))
    }

    #[test]
    fn test_ticket_id_from_number_and_string_agree() {
        let from_number = TicketId::from(17_u64);
        let from_text = TicketId::from_str("17").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number.as_str(), "17");
    }

    #[test]
    fn test_ticket_id_parsing_trims() {
        let id = TicketId::from_str("  42 ").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_ticket_id_parsing_rejects_garbage() {
        assert!(TicketId::from_str("").is_err());
        assert!(TicketId::from_str("   ").is_err());
        assert!(TicketId::from_str("4\u{0}2").is_err());
    }

    #[test]
    fn test_display_subject_placeholder() {
        let missing = ticket(2, None);
        assert_eq!(missing.display_subject(), "No Subject");

        let blank = ticket(3, Some("   "));
        assert_eq!(blank.display_subject(), "No Subject");

        let named = ticket(1, Some("A"));
        assert_eq!(named.display_subject(), "A");
    }

    #[test]
    fn test_agent_url_and_element_id() {
        let printer = ticket(35436, Some("Printer on fire"));
        assert_eq!(
            printer.agent_url("acme"),
            "https://acme.zendesk.com/agent/tickets/35436"
        );
        assert_eq!(printer.element_id(), "ticket-35436");
    }

    #[test]
    fn test_deserialize_host_record() {
        let json = r#"{
            "id": 35436,
            "url": "https://acme.zendesk.com/api/v2/tickets/35436.json",
            "subject": "Help, my printer is on fire!",
            "status": "open",
            "priority": "high",
            "created_at": "2009-07-20T22:55:29Z",
            "updated_at": "2011-05-05T10:38:52Z",
            "tags": ["enterprise", "other_tag"]
        }"#;

        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.id.as_str(), "35436");
        assert_eq!(ticket.status.as_deref(), Some("open"));
        assert_eq!(ticket.priority.as_deref(), Some("high"));
        assert!(ticket.created_at.is_some());
    }

    #[test]
    fn test_deserialize_missing_and_null_subject() {
        let missing: Ticket = serde_json::from_str(r#"{"id": "7"}"#).unwrap();
        assert!(missing.subject.is_none());

        let null: Ticket = serde_json::from_str(r#"{"id": 8, "subject": null}"#).unwrap();
        assert!(null.subject.is_none());
        assert_eq!(null.display_subject(), "No Subject");
    }

    #[test]
    fn test_deserialize_tolerates_malformed_optional_fields() {
        let json = r#"{
            "id": 2,
            "subject": 42,
            "status": {"name": "open"},
            "priority": ["high"],
            "created_at": "2024-01-01 10:00:00",
            "updated_at": 1704103200
        }"#;

        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.id.as_str(), "2");
        assert!(ticket.subject.is_none());
        assert!(ticket.status.is_none());
        assert!(ticket.priority.is_none());
        assert!(ticket.created_at.is_none());
        assert!(ticket.updated_at.is_none());
        assert_eq!(ticket.display_subject(), "No Subject");
    }

    #[test]
    fn test_deserialize_rejects_empty_id() {
        assert!(serde_json::from_str::<Ticket>(r#"{"id": ""}"#).is_err());
    }
}
