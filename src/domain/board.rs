use crate::domain::{
    bucket::Bucket,
    ticket::{Ticket, TicketId},
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// What `initialize` does with placements made before a re-fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReloadPolicy {
    /// Every ticket goes back to Raised on each initialization
    Reset,
    /// Known tickets keep their column and position; new ones join Raised
    #[default]
    PreserveKnown,
}

/// Result of a move request. Never an error: a stale or malformed drop just
/// does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Bucket, to: Bucket },
    /// The ticket was already in the target bucket
    Unchanged,
    /// Unknown ticket, unparsable payload, or board not ready
    Ignored,
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Ordered contents of the three columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub raised: Vec<TicketId>,
    pub in_progress: Vec<TicketId>,
    pub done: Vec<TicketId>,
}

impl BoardSnapshot {
    pub fn get(&self, bucket: Bucket) -> &[TicketId] {
        match bucket {
            Bucket::Raised => &self.raised,
            Bucket::InProgress => &self.in_progress,
            Bucket::Done => &self.done,
        }
    }
}

/// Triage board state
///
/// Holds ticket ids only; the tickets themselves live in the
/// [`TicketStore`](crate::store::TicketStore). Every id on the board is in
/// exactly one column.
#[derive(Debug, Default)]
pub struct Board {
    columns: [Vec<TicketId>; 3],
    placements: HashMap<TicketId, Bucket>,
    ready: bool,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `initialize` has run
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Places the given tickets on the board
    ///
    /// The first call puts every ticket in Raised. Later calls follow
    /// `policy`; ids that are no longer present are dropped either way.
    pub fn initialize<'a, I>(&mut self, tickets: I, policy: ReloadPolicy)
    where
        I: IntoIterator<Item = &'a Ticket>,
    {
        let mut seen = HashSet::new();
        let incoming: Vec<TicketId> = tickets
            .into_iter()
            .filter(|ticket| seen.insert(ticket.id.clone()))
            .map(|ticket| ticket.id.clone())
            .collect();

        if !self.ready || policy == ReloadPolicy::Reset {
            self.columns = Default::default();
            self.placements.clear();
            for id in incoming {
                self.insert(id, Bucket::Raised);
            }
            self.ready = true;
            return;
        }

        for column in &mut self.columns {
            column.retain(|id| seen.contains(id));
        }
        self.placements.retain(|id, _| seen.contains(id));

        for id in incoming {
            if !self.placements.contains_key(&id) {
                self.insert(id, Bucket::Raised);
            }
        }
    }

    /// Moves a ticket to `target`, appending it to the end of that column
    pub fn move_ticket(&mut self, id: &TicketId, target: Bucket) -> MoveOutcome {
        if !self.ready {
            return MoveOutcome::Ignored;
        }

        let from = match self.placements.get(id) {
            Some(bucket) => *bucket,
            None => return MoveOutcome::Ignored,
        };

        if from == target {
            return MoveOutcome::Unchanged;
        }

        self.columns[from.index()].retain(|existing| existing != id);
        self.insert(id.clone(), target);

        MoveOutcome::Moved { from, to: target }
    }

    /// Like [`move_ticket`](Self::move_ticket) but takes the raw drop payload
    pub fn move_payload(&mut self, payload: &str, target: Bucket) -> MoveOutcome {
        match payload.parse::<TicketId>() {
            Ok(id) => self.move_ticket(&id, target),
            Err(_) => MoveOutcome::Ignored,
        }
    }

    /// Ids in `bucket`, in the order they arrived there
    pub fn bucket_contents(&self, bucket: Bucket) -> impl Iterator<Item = &TicketId> + '_ {
        self.columns[bucket.index()].iter()
    }

    /// Column currently holding `id`
    pub fn bucket_of(&self, id: &TicketId) -> Option<Bucket> {
        self.placements.get(id).copied()
    }

    /// Number of tickets per column, in column order
    pub fn counts(&self) -> [usize; 3] {
        [
            self.columns[0].len(),
            self.columns[1].len(),
            self.columns[2].len(),
        ]
    }

    /// Total number of tickets on the board
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            raised: self.columns[Bucket::Raised.index()].clone(),
            in_progress: self.columns[Bucket::InProgress.index()].clone(),
            done: self.columns[Bucket::Done.index()].clone(),
        }
    }

    fn insert(&mut self, id: TicketId, bucket: Bucket) {
        self.columns[bucket.index()].push(id.clone());
        self.placements.insert(id, bucket);
    }
}
