//! Load-state machine for a receipt view keyed on the order identifier.
//!
//! A session is always in one of three states and re-enters `Loading` when
//! the identifier changes. Outcomes carry the identifier they were fetched
//! for; an outcome whose identifier no longer matches the session is
//! discarded, so a slow response for a superseded identifier can never
//! overwrite the current view.

use crate::models::ReceiptView;

/// Result of one receipt lookup. Transport failures and malformed payloads
/// have already been collapsed into `NotFound` by the loader.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Found(ReceiptView),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Found(ReceiptView),
    NotFound,
}

#[derive(Debug)]
pub struct ReceiptSession {
    order_id: String,
    state: LoadState,
}

impl ReceiptSession {
    pub fn begin(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            state: LoadState::Loading,
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Switch the session to a new identifier, re-entering `Loading`.
    /// Switching to the current identifier is a no-op.
    pub fn switch_to(&mut self, order_id: &str) {
        if self.order_id != order_id {
            self.order_id = order_id.to_string();
            self.state = LoadState::Loading;
        }
    }

    /// Apply the outcome of a fetch issued for `order_id`. Returns whether
    /// the outcome was applied; stale outcomes are dropped.
    pub fn apply(&mut self, order_id: &str, outcome: LoadOutcome) -> bool {
        if self.order_id != order_id {
            tracing::debug!(
                current = %self.order_id,
                stale = %order_id,
                "discarding lookup outcome for superseded order id"
            );
            return false;
        }
        self.state = match outcome {
            LoadOutcome::Found(view) => LoadState::Found(view),
            LoadOutcome::NotFound => LoadState::NotFound,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawTransaction;
    use crate::normalize;

    fn view_for(order_id: &str) -> ReceiptView {
        normalize(order_id, &RawTransaction::default())
    }

    #[test]
    fn outcome_for_current_id_is_applied() {
        let mut session = ReceiptSession::begin("FP1");
        assert_eq!(*session.state(), LoadState::Loading);

        assert!(session.apply("FP1", LoadOutcome::Found(view_for("FP1"))));
        match session.state() {
            LoadState::Found(view) => assert_eq!(view.order_id, "FP1"),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn stale_outcome_is_discarded_after_identifier_change() {
        let mut session = ReceiptSession::begin("FP1");
        session.switch_to("FP2");
        assert_eq!(*session.state(), LoadState::Loading);

        // The fetch for FP1 resolves late; it must not touch FP2's view.
        assert!(!session.apply("FP1", LoadOutcome::Found(view_for("FP1"))));
        assert_eq!(*session.state(), LoadState::Loading);

        assert!(session.apply("FP2", LoadOutcome::NotFound));
        assert_eq!(*session.state(), LoadState::NotFound);

        // And a stale response arriving even later still loses.
        assert!(!session.apply("FP1", LoadOutcome::Found(view_for("FP1"))));
        assert_eq!(*session.state(), LoadState::NotFound);
    }

    #[test]
    fn switching_to_same_identifier_keeps_state() {
        let mut session = ReceiptSession::begin("FP1");
        session.apply("FP1", LoadOutcome::NotFound);
        session.switch_to("FP1");
        assert_eq!(*session.state(), LoadState::NotFound);
    }
}
