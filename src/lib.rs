//! # Helpdesk Triage
//!
//! Ticket triage board for the Zendesk agent panel.
//!
//! Tickets are fetched once from the host and placed on a board with three
//! columns (Raised, In Progress, Done). Drag-and-drop gestures move them
//! between columns. The board state machine knows nothing about the UI
//! toolkit or the HTTP client; both sit behind traits.

pub mod config;
pub mod domain;
pub mod error;
pub mod gesture;
pub mod host;
pub mod panel;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use config::{PanelConfig, Viewport};
pub use domain::{
    board::{Board, BoardSnapshot, MoveOutcome, ReloadPolicy},
    bucket::Bucket,
    ticket::{Ticket, TicketId},
};
pub use error::{Result, TriageError};
pub use gesture::{GestureAdapter, GestureEvent};
pub use host::{HelpdeskHost, HostContext, StaticHost, ZendeskHost};
pub use panel::Panel;
pub use store::TicketStore;
pub use view::{ColumnView, TicketCard};
