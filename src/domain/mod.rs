pub mod board;
pub mod bucket;
pub mod ticket;

pub use board::{Board, BoardSnapshot, MoveOutcome, ReloadPolicy};
pub use bucket::Bucket;
pub use ticket::{Ticket, TicketId};
