//! State held by the data panel.
//!
//! The panel moves idle → loading → loaded | error. Loads are started
//! manually and never overlap: `begin_load` refuses while a load is in
//! flight. Each load is tagged with a [`LoadTicket`]; clearing the panel
//! invalidates outstanding tickets so a late response cannot repopulate it.

use crate::error::{LOAD_FALLBACK_MESSAGE, PortalError};
use crate::item::FetchResult;

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// The data panel's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataPanel {
    result: Option<FetchResult>,
    error: Option<String>,
    loading: bool,
    generation: u64,
}

impl DataPanel {
    /// Returns the loaded result.
    #[must_use]
    pub fn result(&self) -> Option<&FetchResult> {
        self.result.as_ref()
    }

    /// Returns the error message to display.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Starts a load.
    ///
    /// Clears any previous error and returns the ticket the response must
    /// be delivered with, or `None` when a load is already running.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.loading {
            return None;
        }
        self.generation += 1;
        self.loading = true;
        self.error = None;
        Some(LoadTicket(self.generation))
    }

    /// Delivers the outcome of the load identified by `ticket`.
    ///
    /// Outcomes for superseded tickets are dropped and `false` is returned.
    /// Otherwise the loading flag is released whatever the outcome.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<FetchResult, PortalError>,
    ) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = (!result.is_empty_body()).then_some(result);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.user_message(LOAD_FALLBACK_MESSAGE));
            }
        }
        true
    }

    /// Discards the result and error without issuing a request.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.result = None;
        self.error = None;
    }
}
