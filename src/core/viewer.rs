//! State machine of the document viewer overlay.
//!
//! `Closed --open--> Loading --load_success--> Ready`, with failures falling
//! back to `Closed` and leaving an error for the UI to show inline. Every
//! `open` issues a new `LoadTicket`; completions carrying an older ticket are
//! dropped, so a slow load for a replaced document can never overwrite the
//! one currently on screen.

use tracing::{debug, info, warn};

/// Identifies one `open` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerPhase {
    Closed,
    Loading { locator: String, ticket: LoadTicket },
    Ready { locator: String, page: u32, total_pages: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub locator: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ViewerState {
    phase: ViewerPhase,
    last_error: Option<LoadFailure>,
    next_ticket: u64,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self { phase: ViewerPhase::Closed, last_error: None, next_ticket: 1 }
    }
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &ViewerPhase {
        &self.phase
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.phase, ViewerPhase::Closed)
    }

    pub fn locator(&self) -> Option<&str> {
        match &self.phase {
            ViewerPhase::Closed => None,
            ViewerPhase::Loading { locator, .. } | ViewerPhase::Ready { locator, .. } => Some(locator),
        }
    }

    /// 1-indexed; 1 whenever no document is ready.
    pub fn current_page(&self) -> u32 {
        match self.phase {
            ViewerPhase::Ready { page, .. } => page,
            _ => 1,
        }
    }

    /// 0 until the document has loaded.
    pub fn total_pages(&self) -> u32 {
        match self.phase {
            ViewerPhase::Ready { total_pages, .. } => total_pages,
            _ => 0,
        }
    }

    pub fn last_error(&self) -> Option<&LoadFailure> {
        self.last_error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Starts loading `locator`, replacing whatever was open.
    pub fn open(&mut self, locator: impl Into<String>) -> LoadTicket {
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        let locator = locator.into();
        info!(locator = %locator, "Opening document.");
        self.last_error = None;
        self.phase = ViewerPhase::Loading { locator, ticket };
        ticket
    }

    /// Returns `true` when the completion was accepted.
    pub fn load_success(&mut self, ticket: LoadTicket, total_pages: u32) -> bool {
        if !self.is_current(ticket) {
            debug!(?ticket, "Ignoring stale load completion.");
            return false;
        }
        if total_pages == 0 {
            return self.load_failure(ticket, "document has no pages");
        }
        let locator = self.locator().unwrap_or_default().to_string();
        info!(locator = %locator, total_pages, "Document ready.");
        self.phase = ViewerPhase::Ready { locator, page: 1, total_pages };
        true
    }

    pub fn load_failure(&mut self, ticket: LoadTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            debug!(?ticket, "Ignoring stale load failure.");
            return false;
        }
        if let ViewerPhase::Loading { locator, .. } = &self.phase {
            let message = message.into();
            warn!(locator = %locator, error = %message, "Document failed to load.");
            self.last_error = Some(LoadFailure { locator: locator.clone(), message });
        }
        self.phase = ViewerPhase::Closed;
        true
    }

    pub fn next_page(&mut self) {
        if let ViewerPhase::Ready { page, total_pages, .. } = &mut self.phase {
            *page = (*page + 1).min(*total_pages);
        }
    }

    pub fn previous_page(&mut self) {
        if let ViewerPhase::Ready { page, .. } = &mut self.phase {
            *page = page.saturating_sub(1).max(1);
        }
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.phase, ViewerPhase::Ready { page, total_pages, .. } if page < total_pages)
    }

    pub fn can_go_previous(&self) -> bool {
        matches!(self.phase, ViewerPhase::Ready { page, .. } if page > 1)
    }

    pub fn close(&mut self) {
        if self.is_open() {
            debug!("Closing document viewer.");
        }
        self.phase = ViewerPhase::Closed;
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        matches!(self.phase, ViewerPhase::Loading { ticket: current, .. } if current == ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ready(total: u32) -> ViewerState {
        let mut viewer = ViewerState::new();
        let ticket = viewer.open("/nmap-guia-completa.txt");
        assert!(viewer.load_success(ticket, total));
        viewer
    }

    #[test]
    fn starts_closed_with_defaults() {
        let viewer = ViewerState::new();
        assert_eq!(viewer.phase(), &ViewerPhase::Closed);
        assert_eq!(viewer.current_page(), 1);
        assert_eq!(viewer.total_pages(), 0);
        assert!(viewer.locator().is_none());
    }

    #[test]
    fn open_then_success_is_ready_on_first_page() {
        let viewer = ready(5);
        assert_eq!(viewer.current_page(), 1);
        assert_eq!(viewer.total_pages(), 5);
        assert_eq!(viewer.locator(), Some("/nmap-guia-completa.txt"));
    }

    #[test]
    fn navigation_is_clamped() {
        let mut viewer = ready(2);
        viewer.previous_page();
        assert_eq!(viewer.current_page(), 1);
        assert!(!viewer.can_go_previous());
        viewer.next_page();
        viewer.next_page();
        assert_eq!(viewer.current_page(), 2);
        assert!(!viewer.can_go_next());
    }

    #[test]
    fn reopening_restarts_at_page_one_in_loading() {
        let mut viewer = ready(10);
        viewer.next_page();
        viewer.next_page();
        assert_eq!(viewer.current_page(), 3);

        viewer.close();
        assert_eq!(viewer.total_pages(), 0);
        assert!(viewer.locator().is_none());

        viewer.open("/owasp-top-10.txt");
        assert!(matches!(viewer.phase(), ViewerPhase::Loading { .. }));
        assert_eq!(viewer.current_page(), 1);
    }

    #[test]
    fn opening_replaces_without_closing() {
        let mut viewer = ready(10);
        viewer.next_page();
        let ticket = viewer.open("/owasp-top-10.txt");
        assert_eq!(viewer.locator(), Some("/owasp-top-10.txt"));
        viewer.load_success(ticket, 4);
        assert_eq!(viewer.current_page(), 1);
        assert_eq!(viewer.total_pages(), 4);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut viewer = ViewerState::new();
        let first = viewer.open("/a.txt");
        let second = viewer.open("/b.txt");
        assert!(!viewer.load_success(first, 9));
        assert!(matches!(viewer.phase(), ViewerPhase::Loading { .. }));
        assert!(!viewer.load_failure(first, "boom"));
        assert!(viewer.last_error().is_none());
        assert!(viewer.load_success(second, 3));
        assert_eq!(viewer.total_pages(), 3);
    }

    #[test]
    fn completion_after_close_is_ignored() {
        let mut viewer = ViewerState::new();
        let ticket = viewer.open("/a.txt");
        viewer.close();
        assert!(!viewer.load_success(ticket, 3));
        assert_eq!(viewer.phase(), &ViewerPhase::Closed);
    }

    #[test]
    fn failure_closes_and_keeps_error_until_next_open() {
        let mut viewer = ViewerState::new();
        let ticket = viewer.open("/missing.pdf");
        assert!(viewer.load_failure(ticket, "no existe"));
        assert_eq!(viewer.phase(), &ViewerPhase::Closed);
        let error = viewer.last_error().unwrap();
        assert_eq!(error.locator, "/missing.pdf");
        assert_eq!(error.message, "no existe");

        viewer.open("/a.txt");
        assert!(viewer.last_error().is_none());
    }

    #[test]
    fn zero_pages_is_a_failure() {
        let mut viewer = ViewerState::new();
        let ticket = viewer.open("/empty.txt");
        viewer.load_success(ticket, 0);
        assert_eq!(viewer.phase(), &ViewerPhase::Closed);
        assert!(viewer.last_error().is_some());
    }

    #[test]
    fn paging_while_loading_is_a_no_op() {
        let mut viewer = ViewerState::new();
        viewer.open("/a.txt");
        viewer.next_page();
        viewer.previous_page();
        assert_eq!(viewer.current_page(), 1);
        assert!(matches!(viewer.phase(), ViewerPhase::Loading { .. }));
    }

    proptest! {
        #[test]
        fn page_always_within_bounds(total in 1u32..50, moves in prop::collection::vec(any::<bool>(), 0..120)) {
            let mut viewer = ready(total);
            for forward in moves {
                if forward { viewer.next_page() } else { viewer.previous_page() }
                prop_assert!(viewer.current_page() >= 1);
                prop_assert!(viewer.current_page() <= viewer.total_pages());
            }
        }
    }
}
