use crate::{
    config::Viewport,
    domain::Ticket,
    error::{Result, TriageError},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod zendesk;

pub use zendesk::ZendeskHost;

/// Panel context supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostContext {
    /// Account subdomain, used to build agent links
    pub subdomain: String,
}

/// Capabilities the panel needs from the helpdesk it is embedded in
#[async_trait]
pub trait HelpdeskHost: Send + Sync {
    /// Returns the panel context (account subdomain)
    async fn context(&self) -> Result<HostContext>;

    /// Asks the host to size the panel. Fire-and-forget: failures are logged
    /// by the implementation, never returned.
    async fn resize(&self, viewport: &Viewport);

    /// Fetches the ticket collection in a single request
    async fn list_tickets(&self) -> Result<Vec<Ticket>>;
}

/// Host backed by a fixed ticket list, for embedding and tests
#[derive(Debug, Clone)]
pub struct StaticHost {
    context: HostContext,
    tickets: std::result::Result<Vec<Ticket>, String>,
}

impl StaticHost {
    pub fn new(subdomain: impl Into<String>, tickets: Vec<Ticket>) -> Self {
        Self {
            context: HostContext {
                subdomain: subdomain.into(),
            },
            tickets: Ok(tickets),
        }
    }

    /// A host whose ticket request always fails with `message`
    pub fn failing(subdomain: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: HostContext {
                subdomain: subdomain.into(),
            },
            tickets: Err(message.into()),
        }
    }
}

#[async_trait]
impl HelpdeskHost for StaticHost {
    async fn context(&self) -> Result<HostContext> {
        Ok(self.context.clone())
    }

    async fn resize(&self, viewport: &Viewport) {
        tracing::debug!(
            width = %viewport.width,
            height = %viewport.height,
            "resize ignored by static host"
        );
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        match &self.tickets {
            Ok(tickets) => Ok(tickets.clone()),
            Err(message) => Err(TriageError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}
