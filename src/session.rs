//! Receipt session - the only owner of view state
//!
//! Refresh and submit both end by mutating the same `ViewState`, so they are
//! serialized through `action_gate`: a second action waits for the first to finish
//! instead of racing it. Every action also checks the session's `Liveness` before
//! touching state, so work that completes after `close()` is dropped.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;
use crate::api::receipt_processor::ReceiptTransport;
use crate::services::{list_service, submission_service};
use crate::state::{Liveness, ViewState};

/// How an action ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    Failed(String),
    /// The session was closed before the action could apply its result
    Dropped,
}

pub struct ReceiptSession<T: ?Sized> {
    state: RwLock<ViewState>,
    action_gate: Mutex<()>,
    liveness: Liveness,
    max_in_flight_lookups: usize,
    transport: Arc<T>,
}

impl<T> ReceiptSession<T>
where
    T: ReceiptTransport + ?Sized,
{
    pub fn new(transport: Arc<T>, max_in_flight_lookups: usize) -> Self {
        Self {
            state: RwLock::new(ViewState::new()),
            action_gate: Mutex::new(()),
            liveness: Liveness::new(),
            max_in_flight_lookups,
            transport,
        }
    }

    /// Copy of the current view for rendering
    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// True while a refresh or submission holds the gate
    pub fn is_busy(&self) -> bool {
        self.action_gate.try_lock().is_err()
    }

    /// Stop applying results; in-flight requests finish but are ignored
    pub fn close(&self) {
        info!("Closing receipt session");
        self.liveness.close();
    }

    /// Reload the whole collection and its points
    pub async fn refresh(&self) -> ActionOutcome {
        let span = info_span!("refresh", action_id = %Uuid::new_v4());
        self.run_refresh().instrument(span).await
    }

    async fn run_refresh(&self) -> ActionOutcome {
        let _gate = self.action_gate.lock().await;
        if !self.liveness.is_alive() {
            return ActionOutcome::Dropped;
        }
        self.state.write().await.begin_action();

        let result = list_service::fetch_receipts(self.transport.as_ref(), self.max_in_flight_lookups).await;

        if !self.liveness.is_alive() {
            debug!("Session closed while refreshing, dropping result");
            return ActionOutcome::Dropped;
        }

        let mut state = self.state.write().await;
        match result {
            Ok(receipts) => {
                let enriched = receipts.iter().filter(|r| r.points.is_some()).count();
                info!("Loaded {} receipts ({} with points)", receipts.len(), enriched);
                state.apply_refresh(receipts);
                ActionOutcome::Succeeded
            }
            Err(e) => {
                let message = e.to_string();
                state.set_error(message.clone());
                ActionOutcome::Failed(message)
            }
        }
    }

    /// Submit `raw_text` as a new receipt
    pub async fn submit(&self, raw_text: &str) -> ActionOutcome {
        let span = info_span!("submit", action_id = %Uuid::new_v4());
        self.run_submit(raw_text).instrument(span).await
    }

    /// Submit whatever input was kept from the last failed submission
    pub async fn resubmit(&self) -> ActionOutcome {
        let input = self.state.read().await.input().to_string();
        if input.trim().is_empty() {
            warn!("Nothing to resubmit");
        }
        self.submit(&input).await
    }

    async fn run_submit(&self, raw_text: &str) -> ActionOutcome {
        let _gate = self.action_gate.lock().await;
        if !self.liveness.is_alive() {
            return ActionOutcome::Dropped;
        }
        {
            let mut state = self.state.write().await;
            state.begin_action();
            state.set_input(raw_text);
        }

        let result = submission_service::submit_receipt(self.transport.as_ref(), raw_text).await;

        if !self.liveness.is_alive() {
            debug!("Session closed while submitting, dropping result");
            return ActionOutcome::Dropped;
        }

        let mut state = self.state.write().await;
        match result {
            Ok(receipt) => {
                state.apply_submission(receipt);
                ActionOutcome::Succeeded
            }
            Err(e) => {
                let message = e.to_string();
                state.set_error(message.clone());
                ActionOutcome::Failed(message)
            }
        }
    }
}
