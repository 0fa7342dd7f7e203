//! Rapid Entry - Scanner burst detection on barcode inputs.
//!
//! A handheld scanner types a code and presses Enter far faster than a
//! person can. When two Enter presses on the same input land closer than the
//! burst gap, the input raises a synthetic `barcode-scanned` event, and a
//! listener on that event submits the enclosing form.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::host::PageHost;
use crate::page;
use crate::state::events::{self, EventKind, PageEvent};
use crate::state::keyboard;
use crate::types::BURST_GAP_MS;

use super::Cleanup;

/// Name of the synthetic event raised on a burst.
pub const BARCODE_SCANNED: &str = "barcode-scanned";

/// Enter timing for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSession {
    last_enter: Option<u64>,
    burst_gap_ms: u64,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new(BURST_GAP_MS)
    }
}

impl ScanSession {
    pub fn new(burst_gap_ms: u64) -> Self {
        Self {
            last_enter: None,
            burst_gap_ms,
        }
    }

    /// Record an Enter at `now_ms`. Returns true if it completes a burst.
    ///
    /// The first Enter is never a burst, and a clock that went backwards
    /// never produces one.
    pub fn on_enter(&mut self, now_ms: u64) -> bool {
        let burst = self
            .last_enter
            .and_then(|last| now_ms.checked_sub(last))
            .is_some_and(|gap| gap < self.burst_gap_ms);
        self.last_enter = Some(now_ms);
        burst
    }

    pub fn last_enter(&self) -> Option<u64> {
        self.last_enter
    }
}

/// Watch Enter presses on `input` and submit its form on a burst.
pub fn attach(input: usize, burst_gap_ms: u64, host: Rc<dyn PageHost>) -> Cleanup {
    let session = Rc::new(Cell::new(ScanSession::new(burst_gap_ms)));

    let key_cleanup = keyboard::on_element(input, move |event| {
        if event.key != "Enter" {
            return false;
        }

        let mut current = session.get();
        let burst = current.on_enter(event.time_stamp);
        session.set(current);

        if burst {
            debug!(input, at = event.time_stamp, "scanner burst detected");
            events::dispatch(
                PageEvent::new(EventKind::custom(BARCODE_SCANNED), input).at(event.time_stamp),
            );
        }
        false
    });

    let scan_cleanup = events::on(input, EventKind::custom(BARCODE_SCANNED), move |_| {
        let Some(form) = page::enclosing_form(input) else {
            return false;
        };
        let submission = page::form_submission(form);
        debug!(form, action = %submission.action, "submitting scanned code");
        host.submit_form(submission);
        true
    });

    Box::new(move || {
        key_cleanup();
        scan_cleanup();
    })
}
