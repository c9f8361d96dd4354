//! The triage panel: ticket store, board and host context in one owned
//! container, with `initialize` and `move_ticket` as the only ways the board
//! changes.

use crate::{
    config::{PanelConfig, Viewport},
    domain::{Board, BoardSnapshot, Bucket, MoveOutcome, ReloadPolicy, Ticket, TicketId},
    gesture::{GestureAdapter, GestureEvent},
    host::{HelpdeskHost, HostContext},
    store::TicketStore,
    view::{ColumnView, TicketCard},
};
use uuid::Uuid;

#[derive(Debug)]
pub struct Panel {
    instance_id: Uuid,
    reload_policy: ReloadPolicy,
    viewport: Viewport,
    context: Option<HostContext>,
    store: TicketStore,
    board: Board,
}

impl Panel {
    /// Creates an uninitialized panel
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            reload_policy: config.reload_policy,
            viewport: config.viewport.clone(),
            context: None,
            store: TicketStore::new(),
            board: Board::new(),
        }
    }

    /// Starts a panel against `host`: resize, read context, fetch tickets.
    ///
    /// Never fails. If the host misbehaves the panel comes back with an
    /// empty, uninitialized board and the cause is logged.
    pub async fn open(host: &dyn HelpdeskHost, config: &PanelConfig) -> Self {
        let mut panel = Self::new(config);
        tracing::debug!(panel = %panel.instance_id, "opening triage panel");

        host.resize(&panel.viewport).await;
        panel.refresh(host).await;
        panel
    }

    /// Reads the host context and fetches tickets again
    ///
    /// Placement of tickets already on the board follows the configured
    /// [`ReloadPolicy`]. Returns true if the board is ready afterwards.
    pub async fn refresh(&mut self, host: &dyn HelpdeskHost) -> bool {
        match host.context().await {
            Ok(context) => self.context = Some(context),
            Err(e) => {
                tracing::error!(
                    panel = %self.instance_id,
                    error = %e,
                    "failed to read host context"
                );
                return self.board.is_ready();
            }
        }

        match self.store.load(host).await {
            Ok(count) => {
                self.board.initialize(self.store.get_all(), self.reload_policy);
                tracing::info!(panel = %self.instance_id, count, "tickets loaded");
            }
            Err(e) => {
                // The store is empty now; keep the board consistent with it
                self.board = Board::new();
                tracing::error!(panel = %self.instance_id, error = %e, "error fetching tickets");
            }
        }
        self.board.is_ready()
    }

    /// Places the given tickets directly, bypassing the host
    pub fn initialize(&mut self, tickets: Vec<Ticket>) {
        self.store.replace(tickets);
        self.board.initialize(self.store.get_all(), self.reload_policy);
    }

    /// Attaches drag behavior to every card and drop behavior to every
    /// column. A card that cannot be registered is logged and skipped.
    ///
    /// Returns the number of cards made draggable.
    pub fn wire_gestures(&self, adapter: &mut dyn GestureAdapter) -> usize {
        let mut registered = 0;
        for ticket in self.store.get_all() {
            match adapter.register_draggable(&ticket.element_id()) {
                Ok(()) => registered += 1,
                Err(e) => {
                    tracing::warn!(
                        panel = %self.instance_id,
                        ticket_id = %ticket.id,
                        error = %e,
                        "error making ticket draggable"
                    );
                }
            }
        }

        for bucket in Bucket::ALL {
            if let Err(e) = adapter.register_drop_zone(bucket, bucket.element_id()) {
                tracing::warn!(
                    panel = %self.instance_id,
                    %bucket,
                    error = %e,
                    "error registering drop zone"
                );
            }
        }
        registered
    }

    /// Feeds one UI gesture event into the board
    ///
    /// Only `Drop` can change the board; its outcome is returned.
    pub fn dispatch(&mut self, event: GestureEvent) -> Option<MoveOutcome> {
        match event {
            GestureEvent::DragStart { ticket_id } => {
                tracing::trace!(panel = %self.instance_id, %ticket_id, "drag started");
                None
            }
            GestureEvent::DragOver { .. } => None,
            GestureEvent::Drop { payload, bucket } => Some(self.move_payload(&payload, bucket)),
        }
    }

    /// Whether a card hovering over `bucket` may be dropped there
    pub fn accepts_drop(&self, _bucket: Bucket) -> bool {
        self.board.is_ready()
    }

    /// Moves a ticket to `target`. Unknown tickets are ignored.
    pub fn move_ticket(&mut self, id: &TicketId, target: Bucket) -> MoveOutcome {
        let outcome = self.board.move_ticket(id, target);
        self.log_move(id.as_str(), target, outcome);
        outcome
    }

    /// Moves the ticket named by a raw drop payload
    pub fn move_payload(&mut self, payload: &str, target: Bucket) -> MoveOutcome {
        let outcome = self.board.move_payload(payload, target);
        self.log_move(payload, target, outcome);
        outcome
    }

    fn log_move(&self, ticket: &str, target: Bucket, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Moved { from, to } => {
                tracing::debug!(panel = %self.instance_id, ticket, %from, %to, "ticket moved");
            }
            MoveOutcome::Unchanged => {}
            MoveOutcome::Ignored => {
                tracing::debug!(
                    panel = %self.instance_id,
                    ticket,
                    %target,
                    "ignoring drop for unknown ticket"
                );
            }
        }
    }

    /// Tickets in `bucket`, in the order they arrived there
    pub fn bucket_contents(&self, bucket: Bucket) -> impl Iterator<Item = &Ticket> + '_ {
        self.board
            .bucket_contents(bucket)
            .filter_map(|id| self.store.get(id))
    }

    /// Render model for all three columns
    pub fn columns(&self) -> Vec<ColumnView> {
        let subdomain = self.context.as_ref().map(|c| c.subdomain.as_str());
        Bucket::ALL
            .iter()
            .map(|&bucket| {
                let cards = self
                    .bucket_contents(bucket)
                    .map(|ticket| TicketCard::new(ticket, subdomain))
                    .collect();
                ColumnView::new(bucket, cards)
            })
            .collect()
    }

    /// Agent link for a ticket, once the host context is known
    pub fn ticket_link(&self, id: &TicketId) -> Option<String> {
        let context = self.context.as_ref()?;
        self.store.get(id).map(|t| t.agent_url(&context.subdomain))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn is_ready(&self) -> bool {
        self.board.is_ready()
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn context(&self) -> Option<&HostContext> {
        self.context.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn store(&self) -> &TicketStore {
        &self.store
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}
