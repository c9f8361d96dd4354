//! Zendesk REST implementation of [`HelpdeskHost`].
//!
//! The API token, when configured, is held in a `SecretBox` and only exposed
//! while building the Authorization header.

use crate::{
    config::{PanelConfig, Viewport},
    domain::Ticket,
    error::{Result, TriageError},
    host::{HelpdeskHost, HostContext},
};
use async_trait::async_trait;
use reqwest::{header, Client};
use secrecy::{ExposeSecret, SecretBox};
use serde::Deserialize;
use std::time::Duration;

const TICKETS_PATH: &str = "/api/v2/tickets.json";

/// Longest error body kept in an [`TriageError::Api`] message
const MAX_ERROR_BODY: usize = 512;

struct Credentials {
    email: String,
    api_token: SecretBox<String>,
}

#[derive(Debug, Deserialize)]
struct TicketsPage {
    #[serde(default)]
    tickets: Vec<serde_json::Value>,
    #[serde(default)]
    next_page: Option<String>,
}

impl TicketsPage {
    /// Decodes each record on its own; a record without a usable id is
    /// skipped instead of failing the page
    fn into_tickets(self) -> Vec<Ticket> {
        self.tickets
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Ticket>(record) {
                Ok(ticket) => Some(ticket),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable ticket record");
                    None
                }
            })
            .collect()
    }
}

/// Talks to `https://{subdomain}.zendesk.com`
pub struct ZendeskHost {
    client: Client,
    base_url: String,
    context: HostContext,
    credentials: Option<Credentials>,
}

impl ZendeskHost {
    /// Builds a client from validated config
    pub fn from_config(config: &PanelConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .connect_timeout(Duration::from_secs(config.http.connect_timeout_secs))
            .build()?;

        let credentials = match (&config.email, &config.api_token) {
            (Some(email), Some(token)) => Some(Credentials {
                email: email.clone(),
                api_token: SecretBox::new(Box::new(token.clone())),
            }),
            _ => None,
        };

        Ok(Self {
            client,
            base_url: config.api_base_url(),
            context: HostContext {
                subdomain: config.subdomain.trim().to_string(),
            },
            credentials,
        })
    }

    /// Full URL of the ticket collection
    pub fn tickets_url(&self) -> String {
        format!("{}{}", self.base_url, TICKETS_PATH)
    }
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[async_trait]
impl HelpdeskHost for ZendeskHost {
    async fn context(&self) -> Result<HostContext> {
        Ok(self.context.clone())
    }

    async fn resize(&self, viewport: &Viewport) {
        // No iframe to resize outside the agent workspace
        tracing::info!(
            width = %viewport.width,
            height = %viewport.height,
            "requested panel viewport"
        );
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        let url = self.tickets_url();
        tracing::debug!(%url, "fetching tickets");

        let mut request = self.client.get(&url).header(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(
                format!("{}/token", credentials.email),
                Some(credentials.api_token.expose_secret()),
            );
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::Api {
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        let page: TicketsPage = response.json().await?;
        if let Some(next) = &page.next_page {
            tracing::debug!(
                next_page = %next,
                "more tickets available; only the first page is shown"
            );
        }

        let tickets = page.into_tickets();
        tracing::debug!(count = tickets.len(), "fetched tickets");
        Ok(tickets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    /// Serves one canned HTTP response and hands back the raw request
    async fn serve_once(
        status_line: &str,
        body: &str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn config_for(base_url: &str) -> PanelConfig {
        let mut config = PanelConfig::for_subdomain("acme");
        config.api_base_url = Some(base_url.to_string());
        config
    }

    #[test]
    fn test_from_config_requires_subdomain() {
        assert!(ZendeskHost::from_config(&PanelConfig::default()).is_err());
    }

    #[test]
    fn test_tickets_url() {
        let host = ZendeskHost::from_config(&PanelConfig::for_subdomain("acme")).unwrap();
        assert_eq!(
            host.tickets_url(),
            "https://acme.zendesk.com/api/v2/tickets.json"
        );
    }

    fn page_tickets(body: &str) -> Vec<Ticket> {
        serde_json::from_str::<TicketsPage>(body)
            .unwrap()
            .into_tickets()
    }

    #[test]
    fn test_tickets_page_decoding() {
        let tickets = page_tickets(
            r#"{"tickets":[{"id":1,"subject":"A"},{"id":2,"subject":null}],
                "next_page":null,"count":2}"#,
        );
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[1].display_subject(), "No Subject");

        assert!(page_tickets(r#"{"tickets":[]}"#).is_empty());
        assert!(serde_json::from_str::<TicketsPage>("<html>").is_err());
    }

    #[test]
    fn test_bad_optional_field_keeps_the_page() {
        let tickets = page_tickets(
            r#"{"tickets":[
                {"id":1,"subject":"A"},
                {"id":2,"subject":"B","created_at":"2024-01-01 10:00:00","status":7}
            ]}"#,
        );
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[1].display_subject(), "B");
        assert!(tickets[1].created_at.is_none());
        assert!(tickets[1].status.is_none());
    }

    #[test]
    fn test_record_without_usable_id_is_skipped() {
        let tickets = page_tickets(
            r#"{"tickets":[{"id":1},{"subject":"no id"},{"id":""},{"id":3}]}"#,
        );
        let ids: Vec<&str> = tickets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(MAX_ERROR_BODY + 10);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.len(), MAX_ERROR_BODY + 3);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn test_list_tickets_over_http() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"tickets":[{"id":1,"subject":"A"},{"id":"2"}],"next_page":null}"#,
        )
        .await;

        let mut config = config_for(&base_url);
        config.email = Some("agent@acme.test".to_string());
        config.api_token = Some("secret".to_string());
        let host = ZendeskHost::from_config(&config).unwrap();

        let tickets = host.list_tickets().await.unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[1].id.as_str(), "2");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/v2/tickets.json"));
        assert!(request.to_lowercase().contains("authorization: basic"));
    }

    #[tokio::test]
    async fn test_list_tickets_error_status() {
        let (base_url, server) =
            serve_once("401 Unauthorized", r#"{"error":"Couldn't authenticate you"}"#).await;
        let host = ZendeskHost::from_config(&config_for(&base_url)).unwrap();

        let err = host.list_tickets().await.unwrap_err();
        match err {
            TriageError::Api { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("authenticate"));
            }
            other => panic!("unexpected error: {other}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_list_tickets_malformed_body() {
        let (base_url, server) = serve_once("200 OK", "not json").await;
        let host = ZendeskHost::from_config(&config_for(&base_url)).unwrap();

        let err = host.list_tickets().await.unwrap_err();
        assert!(matches!(err, TriageError::Http(ref e) if e.is_decode()));
        server.await.unwrap();
    }
}
