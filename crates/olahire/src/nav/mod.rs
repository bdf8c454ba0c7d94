//! Navigation coordinator: every screen change re-runs the access guard
//! against the live session, and in-flight fetches are tied to the screen
//! generation they were started for.

use std::sync::Arc;

use tracing::debug;

use crate::access::{authorize, Decision, Screen};
use crate::session::SessionStore;

/// Marks one fetch as belonging to one screen generation. A completion whose
/// ticket is stale is dropped instead of mutating state behind an abandoned
/// view; the request itself is fire-and-forget and never cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
}

/// Tracks the active screen and the fetch epoch.
pub struct Navigator {
    session: Arc<SessionStore>,
    current: Screen,
    epoch: u64,
}

impl Navigator {
    /// Starts on the public landing screen.
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            current: Screen::Home,
            epoch: 0,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Run the guard and move. `Allow` activates the requested screen;
    /// `Redirect` activates the target instead. Either way the fetch epoch
    /// advances, so completions started for the previous screen go stale.
    pub fn navigate(&mut self, screen: Screen) -> Decision {
        let decision = authorize(screen, &self.session.current());
        let destination = match decision {
            Decision::Allow => screen,
            Decision::Redirect(target) => target,
        };
        debug!(
            requested = screen.label(),
            activated = destination.label(),
            "navigation"
        );
        self.current = destination;
        self.epoch += 1;
        decision
    }

    /// Ticket for a fetch started against the current screen.
    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket { epoch: self.epoch }
    }

    /// Whether a completed fetch may still apply its result.
    pub fn accept(&self, ticket: FetchTicket) -> bool {
        ticket.epoch == self.epoch
    }

    /// Handle a credential rejection: drop the session, then re-run the
    /// guard on the screen the user is looking at. The returned decision is
    /// the redirect the UI must follow.
    pub fn on_unauthorized(&mut self) -> Decision {
        self.session.clear();
        self.navigate(self.current)
    }
}
