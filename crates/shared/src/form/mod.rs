//! Create-event form controller.
//!
//! ```text
//! Editing -> Submitting -> SuccessDisplayed -> Navigated
//!               |
//!               +-> Editing (validation passed but wallet or chain failed)
//! ```
//!
//! Validation failures never leave `Editing`.

use crate::contracts::client::bind;
use crate::contracts::registry::ContractSettings;
use crate::contracts::submitter::donate;
use crate::domain::event::{DraftField, EventDraft, NewEvent};
use crate::error::TicketingError;
use crate::wallet::{Receipt, WalletConnector, WalletProvider};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;

/// Where the UI goes once the success message has been shown.
pub const EVENTS_PAGE: &str = "/events";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormState {
    Editing,
    Submitting,
    SuccessDisplayed,
    Navigated,
}

/// What observers see on every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub state: FormState,
    pub draft: EventDraft,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub event: NewEvent,
    pub receipt: Receipt,
    pub state: FormState,
    pub transitions: Vec<FormState>,
    pub navigate_to: &'static str,
}

pub struct EventForm<W> {
    draft: EventDraft,
    state: watch::Sender<FormSnapshot>,
    history: Vec<FormState>,
    last_error: Option<String>,
    connector: WalletConnector<W>,
    contract: ContractSettings,
    display_delay: Duration,
}

impl<W: WalletProvider> EventForm<W> {
    pub fn new(connector: WalletConnector<W>, contract: ContractSettings, display_delay: Duration) -> Self {
        let (state, _) = watch::channel(FormSnapshot {
            state: FormState::Editing,
            draft: EventDraft::default(),
        });
        Self {
            draft: EventDraft::default(),
            state,
            history: vec![FormState::Editing],
            last_error: None,
            connector,
            contract,
            display_delay,
        }
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().state
    }

    /// Every state entered so far, starting with `Editing`.
    pub fn transitions(&self) -> &[FormState] {
        &self.history
    }

    /// Follows transitions while a submission is in flight.
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.state.subscribe()
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn fill(&mut self, draft: EventDraft) {
        self.draft = draft;
    }

    fn enter(&mut self, next: FormState) {
        tracing::debug!(from = ?self.state(), to = ?next, "form transition");
        self.history.push(next);
        self.state.send_replace(FormSnapshot { state: next, draft: self.draft.clone() });
    }

    /// Validates the draft, then runs the donate call behind event creation.
    ///
    /// On success the draft is cleared, the success state is held for the
    /// display delay and the form ends in `Navigated`. On a wallet or chain
    /// failure the form returns to `Editing` with the draft intact and the
    /// message kept in [`last_error`](Self::last_error).
    pub async fn submit(&mut self) -> Result<SubmitOutcome, TicketingError> {
        if self.state() != FormState::Editing {
            return Err(TicketingError::SubmissionClosed);
        }

        let event = match self.draft.validate() {
            Ok(event) => event,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return Err(e.into());
            }
        };
        self.last_error = None;
        self.enter(FormState::Submitting);

        let receipt = match self.create_on_chain().await {
            Ok(receipt) => receipt,
            Err(e) => {
                if e.is_transaction_failure() {
                    tracing::warn!(error = %e, event = %event.name, "event creation failed");
                } else {
                    tracing::error!(error = %e, event = %event.name, "event creation failed");
                }
                self.last_error = Some(e.to_string());
                self.enter(FormState::Editing);
                return Err(e);
            }
        };

        self.draft.clear();
        self.enter(FormState::SuccessDisplayed);
        tracing::info!(event = %event.name, tx_hash = %receipt.tx_hash, "event created");

        tokio::time::sleep(self.display_delay).await;
        self.enter(FormState::Navigated);

        Ok(SubmitOutcome {
            event,
            receipt,
            state: self.state(),
            transitions: self.history.clone(),
            navigate_to: EVENTS_PAGE,
        })
    }

    async fn create_on_chain(&self) -> Result<Receipt, TicketingError> {
        let signer = self.connector.connect().await?;
        let handle = bind(self.contract.address, self.contract.interface.clone(), signer);
        donate(&handle, self.contract.beneficiary, self.contract.donation).await
    }
}
