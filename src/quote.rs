//! Swap quote refresh.
//!
//! Every time the swap amount text changes, [`QuoteRefresher::observe`] issues
//! one quote request through a [`QuoteSource`]. Requests are never cancelled;
//! each carries a sequence number and only the resolution of the most recently
//! issued request is applied. Older resolutions are dropped when they arrive,
//! so a slow answer for an old amount can never overwrite the quote for the
//! amount currently on screen.

use crate::async_job::AsyncJob;
use crate::utils::parse_decimal;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Anything that can price a swap amount in the quote token.
pub trait QuoteSource {
    /// Start fetching a quote for `amount` (possibly NaN). Must not block.
    fn request_quote(&self, amount: f64) -> AsyncJob<f64>;
}

/// What to do with the displayed quote when the latest fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteFailurePolicy {
    /// Keep showing the previous quote.
    #[default]
    RetainLast,
    /// Replace the quote with NaN so the UI shows it as unavailable.
    MarkUnavailable,
}

struct PendingQuote {
    sequence: u64,
    amount: f64,
    job: AsyncJob<f64>,
}

pub struct QuoteRefresher {
    observed: Option<String>,
    last_quote: f64,
    latest_sequence: u64,
    pending: Vec<PendingQuote>,
    last_error: Option<String>,
    failure_policy: QuoteFailurePolicy,
}

impl Default for QuoteRefresher {
    fn default() -> Self {
        Self::new(QuoteFailurePolicy::default())
    }
}

impl QuoteRefresher {
    pub fn new(failure_policy: QuoteFailurePolicy) -> Self {
        Self {
            observed: None,
            last_quote: 0.0,
            latest_sequence: 0,
            pending: Vec::new(),
            last_error: None,
            failure_policy,
        }
    }

    pub fn last_quote(&self) -> f64 {
        self.last_quote
    }

    /// Error text of the latest failed fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Sequence number of the most recently issued request (0 before any).
    pub fn latest_sequence(&self) -> u64 {
        self.latest_sequence
    }

    /// Requests still waiting for a result, stale ones included.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn failure_policy(&self) -> QuoteFailurePolicy {
        self.failure_policy
    }

    pub fn set_failure_policy(&mut self, policy: QuoteFailurePolicy) {
        self.failure_policy = policy;
    }

    /// Feed the current amount text. Issues one request when the text differs
    /// from the last observed value; the very first observation always issues.
    /// Returns whether a request was issued.
    pub fn observe<S: QuoteSource + ?Sized>(&mut self, amount_text: &str, source: &S) -> bool {
        if self.observed.as_deref() == Some(amount_text) {
            return false;
        }
        self.observed = Some(amount_text.to_string());

        let amount = parse_decimal(amount_text);
        self.latest_sequence += 1;
        let sequence = self.latest_sequence;
        tracing::debug!("Requesting quote #{} for amount {}", sequence, amount);

        let job = source.request_quote(amount);
        self.pending.push(PendingQuote {
            sequence,
            amount,
            job,
        });
        true
    }

    /// Collect finished requests. Returns true if the displayed quote or error
    /// changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        let pending = std::mem::take(&mut self.pending);
        for mut request in pending {
            match request.job.poll() {
                None => self.pending.push(request),
                Some(result) => {
                    changed |= self.resolve(request.sequence, request.amount, result);
                }
            }
        }
        changed
    }

    fn resolve(&mut self, sequence: u64, amount: f64, result: Result<f64>) -> bool {
        if sequence != self.latest_sequence {
            tracing::debug!(
                "Discarding stale quote #{} (latest is #{})",
                sequence,
                self.latest_sequence
            );
            return false;
        }

        match result {
            Ok(quote) => {
                tracing::debug!("Applied quote #{}: {} -> {}", sequence, amount, quote);
                self.last_quote = quote;
                self.last_error = None;
                true
            }
            Err(e) => {
                tracing::warn!("Quote fetch for amount {} failed: {}", amount, e);
                self.last_error = Some(e.to_string());
                if self.failure_policy == QuoteFailurePolicy::MarkUnavailable {
                    self.last_quote = f64::NAN;
                }
                true
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::QuoteSource;
    use crate::async_job::AsyncJob;
    use anyhow::Result;
    use std::cell::RefCell;
    use std::sync::mpsc::{self, Sender};

    /// Quote source whose requests are resolved by hand, in any order.
    #[derive(Default)]
    pub(crate) struct ManualQuoteSource {
        pub(crate) requests: RefCell<Vec<(f64, Sender<Result<f64>>)>>,
    }

    impl ManualQuoteSource {
        pub(crate) fn amounts(&self) -> Vec<f64> {
            self.requests.borrow().iter().map(|(a, _)| *a).collect()
        }

        /// Resolve the `index`-th request (0-based, in issue order).
        pub(crate) fn resolve(&self, index: usize, result: Result<f64>) {
            let requests = self.requests.borrow();
            requests[index].1.send(result).unwrap();
        }
    }

    impl QuoteSource for ManualQuoteSource {
        fn request_quote(&self, amount: f64) -> AsyncJob<f64> {
            let (tx, rx) = mpsc::channel();
            self.requests.borrow_mut().push((amount, tx));
            AsyncJob::new(rx)
        }
    }
}
