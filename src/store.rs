use crate::{
    domain::{Ticket, TicketId},
    error::Result,
    host::HelpdeskHost,
};
use std::collections::HashMap;

/// Tickets fetched from the host for this panel
#[derive(Debug, Default)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    index: HashMap<TicketId, usize>,
    loaded: bool,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues one ticket request to `host`
    ///
    /// On success the held list is replaced. On failure the store is left
    /// empty and the error is returned for the caller to log; there is no
    /// retry.
    pub async fn load(&mut self, host: &dyn HelpdeskHost) -> Result<usize> {
        match host.list_tickets().await {
            Ok(tickets) => {
                self.replace(tickets);
                Ok(self.tickets.len())
            }
            Err(e) => {
                self.tickets.clear();
                self.index.clear();
                self.loaded = false;
                Err(e)
            }
        }
    }

    /// Replaces the held list, keeping the first of any duplicate ids
    pub fn replace(&mut self, tickets: Vec<Ticket>) {
        self.tickets.clear();
        self.index.clear();

        for ticket in tickets {
            if self.index.contains_key(&ticket.id) {
                tracing::warn!(
                    ticket_id = %ticket.id,
                    "duplicate ticket in response, keeping the first"
                );
                continue;
            }
            self.index.insert(ticket.id.clone(), self.tickets.len());
            self.tickets.push(ticket);
        }
        self.loaded = true;
    }

    /// All tickets in the order the host returned them
    pub fn get_all(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.tickets.iter()
    }

    pub fn get(&self, id: &TicketId) -> Option<&Ticket> {
        self.index.get(id).map(|&i| &self.tickets[i])
    }

    pub fn contains(&self, id: &TicketId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// True after a successful load, even if it returned no tickets
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
