//! Drag-and-drop boundary
//!
//! The board never talks to a gesture library directly. A [`GestureAdapter`]
//! attaches draggable behavior to cards and drop behavior to columns, and the
//! UI feeds the resulting [`GestureEvent`]s back into the panel.

use crate::{domain::Bucket, error::Result};
use serde::{Deserialize, Serialize};

/// Registration side of a drag-and-drop library
pub trait GestureAdapter {
    /// Makes the card with DOM id `element_id` draggable
    fn register_draggable(&mut self, element_id: &str) -> Result<()>;

    /// Makes the column with DOM id `element_id` accept drops for `bucket`
    fn register_drop_zone(&mut self, bucket: Bucket, element_id: &str) -> Result<()>;
}

/// Events reported by the UI while a card is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureEvent {
    /// A drag started; `ticket_id` is what the card put in the payload
    DragStart { ticket_id: String },
    /// A card is hovering over a column
    DragOver { bucket: Bucket },
    /// A card was released over a column
    Drop { payload: String, bucket: Bucket },
}
