//! Render model handed to the UI layer

use crate::domain::{Bucket, Ticket, TicketId};
use serde::{Deserialize, Serialize};

/// Outbound ticket links open in a new browsing context
pub const LINK_TARGET: &str = "_blank";
pub const LINK_REL: &str = "noopener noreferrer";

/// One ticket card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCard {
    pub id: TicketId,
    /// DOM id, also the drag source
    pub element_id: String,
    /// "#42"
    pub label: String,
    pub subject: String,
    /// Agent link; absent until the host context is known
    pub url: Option<String>,
    /// `target` attribute for the link
    pub link_target: String,
    /// `rel` attribute for the link
    pub link_rel: String,
    /// Drag payload carried by this card
    pub drag_payload: String,
}

impl TicketCard {
    pub fn new(ticket: &Ticket, subdomain: Option<&str>) -> Self {
        Self {
            id: ticket.id.clone(),
            element_id: ticket.element_id(),
            label: format!("#{}", ticket.id),
            subject: ticket.display_subject().to_string(),
            url: subdomain
                .filter(|s| !s.is_empty())
                .map(|s| ticket.agent_url(s)),
            link_target: LINK_TARGET.to_string(),
            link_rel: LINK_REL.to_string(),
            drag_payload: ticket.id.to_string(),
        }
    }
}

/// One column and its cards, top to bottom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub bucket: Bucket,
    pub heading: String,
    pub element_id: String,
    pub cards: Vec<TicketCard>,
}

impl ColumnView {
    pub fn new(bucket: Bucket, cards: Vec<TicketCard>) -> Self {
        Self {
            bucket,
            heading: bucket.heading().to_string(),
            element_id: bucket.element_id().to_string(),
            cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_for_ticket_without_subject() {
        let card = TicketCard::new(&Ticket::new(2_u64, None), Some("acme"));

        assert_eq!(card.label, "#2");
        assert_eq!(card.subject, "No Subject");
        assert_eq!(card.element_id, "ticket-2");
        assert_eq!(card.drag_payload, "2");
        assert_eq!(
            card.url.as_deref(),
            Some("https://acme.zendesk.com/agent/tickets/2")
        );
        assert_eq!(card.link_target, "_blank");
        assert_eq!(card.link_rel, "noopener noreferrer");
    }

    #[test]
    fn test_card_json_carries_link_attributes() {
        let card = TicketCard::new(&Ticket::new(9_u64, None), Some("acme"));
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["linkTarget"], "_blank");
        assert_eq!(json["linkRel"], "noopener noreferrer");
    }

    #[test]
    fn test_card_without_context_has_no_link() {
        let ticket = Ticket::new(5_u64, Some("Refund".to_string()));
        assert!(TicketCard::new(&ticket, None).url.is_none());
        assert!(TicketCard::new(&ticket, Some("")).url.is_none());
    }

    #[test]
    fn test_column_view_headings() {
        let column = ColumnView::new(Bucket::Done, Vec::new());
        assert_eq!(column.heading, "Done");
        assert_eq!(column.element_id, "done-column");
    }
}
