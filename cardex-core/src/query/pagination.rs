//! Incremental disclosure of a sorted result sequence.
//!
//! [`PageWindow`] tracks how much of the current result is visible. A
//! load-more is split in two halves so the simulated fetch latency can run
//! outside the window's owner:
//!
//! 1. [`PageWindow::begin_load`] applies the re-entrancy guard and hands out a
//!    [`LoadTicket`] stamped with the window's generation.
//! 2. [`PageWindow::complete_load`] applies the ticket. Tickets minted before
//!    the latest reset are stale and ignored.
//!
//! [`PendingLoad`] wraps a ticket with its latency and a cancellation token so
//! a torn-down consumer never receives a late update.

use crate::config::EngineConfig;
use crate::error::{CatalogError, Result};
use crate::query::types::PageStatus;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Permission to grow the window once, valid for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    cursor: usize,
    total: usize,
    loading_more: bool,
    generation: u64,
    initial_window: usize,
    page_increment: usize,
}

impl PageWindow {
    pub fn new(initial_window: usize, page_increment: usize) -> Self {
        Self {
            cursor: initial_window,
            total: 0,
            loading_more: false,
            generation: 0,
            initial_window,
            page_increment,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.initial_window, config.page_increment)
    }

    /// Start over for a new result set. Outstanding tickets become stale.
    pub fn reset(&mut self, total: usize) {
        self.cursor = self.initial_window;
        self.total = total;
        self.loading_more = false;
        self.generation = self.generation.wrapping_add(1);
        tracing::trace!(
            target: "cardex::pagination",
            total,
            generation = self.generation,
            "window reset"
        );
    }

    /// Track a new total for the same baseline (facet or sort change). The
    /// cursor is left alone so disclosure never shrinks back.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    pub fn visible(&self) -> usize {
        self.cursor.min(self.total)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading_more
    }

    pub fn is_exhausted(&self) -> bool {
        self.visible() >= self.total
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> PageStatus {
        PageStatus {
            visible: self.visible(),
            total: self.total,
            loading_more: self.loading_more,
            exhausted: self.is_exhausted(),
        }
    }

    /// Claim the single load-more slot. `None` while a load is in flight or
    /// once everything is visible.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.loading_more {
            tracing::trace!(target: "cardex::pagination", "load already in flight");
            return None;
        }
        if self.is_exhausted() {
            tracing::trace!(target: "cardex::pagination", total = self.total, "window exhausted");
            return None;
        }
        self.loading_more = true;
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Grow the window by one increment. Returns `false` for stale tickets.
    pub fn complete_load(&mut self, ticket: LoadTicket) -> bool {
        if !self.owns(ticket) {
            tracing::debug!(
                target: "cardex::pagination",
                ticket_generation = ticket.generation,
                generation = self.generation,
                "dropping stale load-more result"
            );
            return false;
        }

        let grown = self
            .visible()
            .saturating_add(self.page_increment)
            .min(self.total);
        self.cursor = self.cursor.max(grown);
        self.loading_more = false;
        tracing::debug!(
            target: "cardex::pagination",
            visible = self.visible(),
            total = self.total,
            "load-more applied"
        );
        true
    }

    /// Release the slot without growing, e.g. after the load was cancelled.
    pub fn abandon_load(&mut self, ticket: LoadTicket) {
        if self.owns(ticket) {
            self.loading_more = false;
        }
    }

    fn owns(&self, ticket: LoadTicket) -> bool {
        self.loading_more && ticket.generation == self.generation
    }
}

/// An in-flight load-more continuation.
#[derive(Debug)]
pub struct PendingLoad {
    ticket: LoadTicket,
    latency: Duration,
    cancel: CancellationToken,
}

impl PendingLoad {
    pub fn new(ticket: LoadTicket, latency: Duration, cancel: CancellationToken) -> Self {
        Self {
            ticket,
            latency,
            cancel,
        }
    }

    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Token that aborts this load when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait out the latency. Cancellation wins if both are ready.
    pub async fn wait(self) -> Result<LoadTicket> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(CatalogError::Cancelled(format!(
                "load-more for generation {}",
                self.ticket.generation
            ))),
            _ = tokio::time::sleep(self.latency) => Ok(self.ticket),
        }
    }
}

/// Whether a scroll position has crossed `threshold` of the scrollable
/// content. Content that fits inside the viewport always counts as crossed.
pub fn crossed_scroll_threshold(offset: f64, viewport: f64, content: f64, threshold: f64) -> bool {
    if !(offset.is_finite() && viewport.is_finite() && content.is_finite()) {
        return false;
    }
    offset.max(0.0) + viewport.max(0.0) >= content.max(0.0) * threshold.clamp(0.0, 1.0)
}
