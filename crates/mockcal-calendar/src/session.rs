//! Mock sign-in state and in-flight operation tracking.

use crate::error::CalendarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    signed_in: bool,
    in_flight: usize,
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    /// True while at least one operation is waiting on its latency.
    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Store operations are only allowed inside a session.
    pub fn require_signed_in(&self) -> Result<(), CalendarError> {
        if self.signed_in {
            Ok(())
        } else {
            Err(CalendarError::NotSignedIn)
        }
    }

    pub fn sign_in(&mut self) {
        self.signed_in = true;
    }

    pub fn sign_out(&mut self) {
        self.signed_in = false;
    }

    pub fn begin_operation(&mut self) {
        self.in_flight += 1;
    }

    pub fn end_operation(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}
