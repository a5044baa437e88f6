//! In-flight HTTP request bookkeeping.
//!
//! Every request is tagged with a generation number. Issuing a new request for
//! an endpoint supersedes the previous one, so a late result carrying an older
//! generation is recognised and dropped. Deadlines are counted in heartbeat
//! ticks of [`TICK_SECONDS`].

use crate::data::Endpoint;
use std::collections::BTreeMap;
use std::time::Duration;

/// Heartbeat period while requests are pending or the dashboard is mounted.
pub const TICK_SECONDS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    generation: u64,
    remaining_ticks: u32,
}

/// Tracks the one live request per endpoint.
#[derive(Debug, Clone)]
pub struct Requests {
    pending: BTreeMap<Endpoint, Pending>,
    next_generation: u64,
    timeout_ticks: u32,
}

/// Converts a duration into whole heartbeat ticks, at least one.
#[must_use]
pub fn ticks_for(duration: Duration) -> u32 {
    let ticks = (duration.as_secs_f64() / TICK_SECONDS).ceil();
    // Saturating float-to-int cast.
    (ticks as u32).max(1)
}

impl Requests {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            pending: BTreeMap::new(),
            next_generation: 1,
            timeout_ticks: ticks_for(timeout),
        }
    }

    /// Registers a new request for `endpoint` and returns its generation.
    pub fn issue(&mut self, endpoint: Endpoint) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;

        let previous = self.pending.insert(
            endpoint,
            Pending {
                generation,
                remaining_ticks: self.timeout_ticks,
            },
        );
        if let Some(previous) = previous {
            tracing::debug!(endpoint = %endpoint, superseded = previous.generation, generation, "request superseded");
        }
        generation
    }

    /// Settles a request. Returns `false` when the result is stale (superseded,
    /// timed out or cancelled) and must be ignored.
    pub fn complete(&mut self, endpoint: Endpoint, generation: u64) -> bool {
        match self.pending.get(&endpoint) {
            Some(p) if p.generation == generation => {
                self.pending.remove(&endpoint);
                true
            }
            _ => false,
        }
    }

    /// Forgets every pending request; their results will be dropped.
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(count = self.pending.len(), "pending requests cancelled");
        }
        self.pending.clear();
    }

    /// Counts down one tick and returns the endpoints whose deadline passed.
    pub fn tick(&mut self) -> Vec<Endpoint> {
        let mut expired = Vec::new();
        self.pending.retain(|endpoint, p| {
            p.remaining_ticks = p.remaining_ticks.saturating_sub(1);
            if p.remaining_ticks == 0 {
                expired.push(*endpoint);
                false
            } else {
                true
            }
        });
        expired
    }

    #[must_use]
    pub fn is_pending(&self, endpoint: Endpoint) -> bool {
        self.pending.contains_key(&endpoint)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Resource;

    const CUSTOMERS: Endpoint = Endpoint::Records(Resource::Customers);

    #[test]
    fn newer_request_supersedes_older() {
        let mut requests = Requests::new(Duration::from_secs(10));
        let first = requests.issue(CUSTOMERS);
        let second = requests.issue(CUSTOMERS);

        assert!(!requests.complete(CUSTOMERS, first));
        assert!(requests.complete(CUSTOMERS, second));
        assert!(requests.is_idle());
    }

    #[test]
    fn deadline_expires_after_timeout_ticks() {
        let mut requests = Requests::new(Duration::from_secs(2));
        let generation = requests.issue(Endpoint::Dashboard);

        assert!(requests.tick().is_empty());
        assert_eq!(requests.tick(), vec![Endpoint::Dashboard]);
        assert!(!requests.complete(Endpoint::Dashboard, generation));
    }

    #[test]
    fn cancelled_results_are_stale() {
        let mut requests = Requests::new(Duration::from_secs(5));
        let generation = requests.issue(Endpoint::SalesReport);
        requests.cancel_all();
        assert!(!requests.complete(Endpoint::SalesReport, generation));
    }

    #[test]
    fn sub_second_timeouts_round_up_to_one_tick() {
        assert_eq!(ticks_for(Duration::from_millis(200)), 1);
        assert_eq!(ticks_for(Duration::from_millis(2500)), 3);
        assert_eq!(ticks_for(Duration::ZERO), 1);
    }
}
