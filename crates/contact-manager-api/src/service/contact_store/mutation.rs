use crate::data::{Contact, ContactId};
use std::collections::HashMap;

/// How a settled remote mutation affects the local contact.
///
/// A mutation moves from `Idle` to optimistic when it's issued and ends in one of
/// these states once the remote call settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// the latest mutation for the id succeeded, the server value becomes the local value
    Confirmed,
    /// the latest mutation for the id failed, restore the last confirmed value
    RolledBack(Option<Contact>),
    /// a newer mutation for the id was issued in the meantime, the result is discarded
    Superseded,
}

#[derive(Debug, Clone)]
struct InFlight {
    latest: u64,
    // issued requests for the id that haven't settled yet
    pending: usize,
    latest_settled: bool,
    baseline: Option<Contact>,
    // settlements issued before this sequence number are older than the baseline
    baseline_seq: u64,
}

/// Tracks the in-flight mutations per contact id.
///
/// Every mutation gets a monotonically increasing sequence number. Only the settlement
/// of the latest issued number may change the visible contact, so a slow request can't
/// clobber the result of a newer one. An id stays tracked until all of its requests
/// settled.
///
/// The same counter stamps every change the server confirmed, so a load can tell
/// whether its data is older than the local value.
#[derive(Debug, Default)]
pub struct MutationTracker {
    last_seq: u64,
    in_flight: HashMap<ContactId, InFlight>,
    confirmed: HashMap<ContactId, u64>,
}

impl MutationTracker {
    fn next_seq(&mut self) -> u64 {
        self.last_seq += 1;
        self.last_seq
    }

    /// The latest sequence number handed out
    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }

    /// Issues a new sequence number for the id. `current` is the confirmed value the
    /// contact returns to on failure, unless a mutation is already in flight, in which
    /// case the existing baseline is kept.
    pub fn begin(&mut self, id: &ContactId, current: Option<&Contact>) -> u64 {
        let seq = self.next_seq();
        self.in_flight
            .entry(id.clone())
            .and_modify(|f| {
                // only stale requests are left, the visible value is confirmed
                if f.latest_settled {
                    f.baseline = current.cloned();
                    f.baseline_seq = seq;
                    f.latest_settled = false;
                }
                f.latest = seq;
                f.pending += 1;
            })
            .or_insert_with(|| InFlight {
                latest: seq,
                pending: 1,
                latest_settled: false,
                baseline: current.cloned(),
                baseline_seq: seq,
            });
        seq
    }

    pub fn settle_ok(&mut self, id: &ContactId, seq: u64, confirmed: &Contact) -> Settlement {
        let Some(flight) = self.in_flight.get_mut(id) else {
            return Settlement::Superseded;
        };
        flight.pending = flight.pending.saturating_sub(1);
        let settlement = if flight.latest == seq
            || (flight.latest_settled && seq >= flight.baseline_seq)
        {
            // either the latest request, or an older one outliving the failed latest
            flight.latest_settled = true;
            Settlement::Confirmed
        } else {
            Settlement::Superseded
        };
        // the server applied this mutation, it's the new fallback for a rollback
        if seq >= flight.baseline_seq {
            flight.baseline = Some(confirmed.clone());
            flight.baseline_seq = seq;
        }
        self.finish(id);
        if settlement == Settlement::Confirmed {
            self.mark_confirmed(id);
        }
        settlement
    }

    pub fn settle_err(&mut self, id: &ContactId, seq: u64) -> Settlement {
        let Some(flight) = self.in_flight.get_mut(id) else {
            return Settlement::Superseded;
        };
        flight.pending = flight.pending.saturating_sub(1);
        let settlement = if flight.latest == seq {
            flight.latest_settled = true;
            Settlement::RolledBack(flight.baseline.clone())
        } else {
            Settlement::Superseded
        };
        self.finish(id);
        settlement
    }

    fn finish(&mut self, id: &ContactId) {
        if self.in_flight.get(id).is_some_and(|f| f.pending == 0) {
            self.in_flight.remove(id);
        }
    }

    pub fn is_in_flight(&self, id: &ContactId) -> bool {
        self.in_flight.contains_key(id)
    }

    /// Replaces the rollback baseline with freshly loaded server data
    pub fn rebase(&mut self, id: &ContactId, confirmed: &Contact) {
        let last_seq = self.last_seq;
        if let Some(flight) = self.in_flight.get_mut(id) {
            flight.baseline = Some(confirmed.clone());
            flight.baseline_seq = last_seq;
        }
    }

    /// Records that the local value of the id is what the server confirmed just now
    pub fn mark_confirmed(&mut self, id: &ContactId) {
        let seq = self.next_seq();
        self.confirmed.insert(id.clone(), seq);
    }

    /// Whether the server confirmed a value for the id after `seq` was handed out
    pub fn confirmed_since(&self, id: &ContactId, seq: u64) -> bool {
        self.confirmed.get(id).is_some_and(|confirmed| *confirmed > seq)
    }

    /// Drops confirmations a load issued at `seq` already contains
    pub fn forget_confirmed_until(&mut self, seq: u64) {
        self.confirmed.retain(|_, confirmed| *confirmed > seq);
    }
}
