//! Per-panel fetch bookkeeping: sequence tokens that let only the latest
//! request land, and the tagged state a panel renders from.

use tracing::debug;

use crate::error::FetchError;

/// Stamp attached to one fetch action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets for one panel.
///
/// Closing the sequence (on unmount) makes every outstanding ticket stale.
#[derive(Debug, Default)]
pub struct RequestSequence {
    last_issued: u64,
    closed: bool,
}

impl RequestSequence {
    pub fn issue(&mut self) -> RequestTicket {
        self.last_issued += 1;
        RequestTicket(self.last_issued)
    }

    /// Whether a response stamped with `ticket` may still update the panel.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        !self.closed && ticket.0 == self.last_issued
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Outcome of the most recent fetch of a panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PanelStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(FetchError),
}

/// Whether a response was applied or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

/// Data and status of a panel.
///
/// `data` always holds the last successful result, so a failed refresh keeps
/// showing the previous chart while `status` carries the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState<T> {
    pub data: Option<T>,
    pub status: PanelStatus,
    pending: Option<RequestTicket>,
}

impl<T> Default for PanelState<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: PanelStatus::Idle,
            pending: None,
        }
    }
}

impl<T> PanelState<T> {
    /// Marks `ticket` as the request whose response the panel waits for.
    pub fn begin(&mut self, ticket: RequestTicket) {
        if self.pending.is_some_and(|pending| pending > ticket) {
            debug!(ticket = ticket.id(), "Ignoring begin of superseded request");
            return;
        }
        self.pending = Some(ticket);
        self.status = PanelStatus::Loading;
    }

    /// Applies a response if it belongs to the latest begun request.
    pub fn resolve(&mut self, ticket: RequestTicket, result: Result<T, FetchError>) -> Resolution {
        if self.pending != Some(ticket) {
            debug!(
                ticket = ticket.id(),
                pending = ?self.pending.map(|t| t.id()),
                "Discarding stale response"
            );
            return Resolution::Stale;
        }

        self.pending = None;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.status = PanelStatus::Loaded;
            }
            Err(err) => {
                self.status = PanelStatus::Failed(err);
            }
        }
        Resolution::Applied
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, PanelStatus::Loading)
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            PanelStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        let second = seq.issue();

        assert!(second > first);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_closed_sequence_has_no_current_ticket() {
        let mut seq = RequestSequence::default();
        let ticket = seq.issue();
        seq.close();

        assert!(seq.is_closed());
        assert!(!seq.is_current(ticket));
    }

    #[test]
    fn test_success_replaces_data() {
        let mut seq = RequestSequence::default();
        let mut state = PanelState::<Vec<u32>>::default();
        assert_eq!(state.status, PanelStatus::Idle);

        let ticket = seq.issue();
        state.begin(ticket);
        assert!(state.is_loading());

        assert_eq!(state.resolve(ticket, Ok(vec![1, 2])), Resolution::Applied);
        assert_eq!(state.data, Some(vec![1, 2]));
        assert_eq!(state.status, PanelStatus::Loaded);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut seq = RequestSequence::default();
        let mut state = PanelState::<Vec<u32>>::default();

        let ticket = seq.issue();
        state.begin(ticket);
        state.resolve(ticket, Ok(vec![7]));

        let ticket = seq.issue();
        state.begin(ticket);
        let err = FetchError::Transport("connection refused".to_string());
        assert_eq!(state.resolve(ticket, Err(err.clone())), Resolution::Applied);

        assert_eq!(state.data, Some(vec![7]));
        assert_eq!(state.error(), Some(&err));
    }

    #[test]
    fn test_late_response_from_earlier_request_is_discarded() {
        let mut seq = RequestSequence::default();
        let mut state = PanelState::<&str>::default();

        let first = seq.issue();
        state.begin(first);
        let second = seq.issue();
        state.begin(second);

        assert_eq!(state.resolve(second, Ok("second")), Resolution::Applied);
        assert_eq!(state.resolve(first, Ok("first")), Resolution::Stale);

        assert_eq!(state.data, Some("second"));
        assert_eq!(state.status, PanelStatus::Loaded);
    }

    #[test]
    fn test_earlier_response_while_later_pending_is_discarded() {
        let mut seq = RequestSequence::default();
        let mut state = PanelState::<&str>::default();

        let first = seq.issue();
        state.begin(first);
        let second = seq.issue();
        state.begin(second);

        assert_eq!(state.resolve(first, Ok("first")), Resolution::Stale);
        assert!(state.is_loading());
        assert_eq!(state.data, None);
    }

    #[test]
    fn test_out_of_order_begin_does_not_rewind() {
        let mut seq = RequestSequence::default();
        let mut state = PanelState::<&str>::default();

        let first = seq.issue();
        let second = seq.issue();
        state.begin(second);
        state.begin(first);

        assert_eq!(state.resolve(first, Ok("first")), Resolution::Stale);
        assert_eq!(state.resolve(second, Ok("second")), Resolution::Applied);
    }

    #[test]
    fn test_response_without_begin_is_discarded() {
        let mut seq = RequestSequence::default();
        let mut state = PanelState::<u8>::default();
        assert_eq!(state.resolve(seq.issue(), Ok(1)), Resolution::Stale);
        assert_eq!(state, PanelState::default());
    }
}
