use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::models::DisplayRecord;

// ============================================================================
// Display State - the stored record sequence for one list
// ============================================================================
//
// Holds the latest applied snapshot and broadcasts every replacement to
// subscribers. Two invariants live here:
//
// 1. The stored sequence is sorted ascending by id at the moment of
//    assignment, with a stable sort (equal ids keep their input order).
// 2. Snapshots apply in issue order: an apply whose sequence number is not
//    greater than the last applied one is discarded, so a slow response can
//    never clobber data from a later cycle.
//
// The list is replaced wholesale on every applied snapshot; it is never
// merged or diffed with the previous list.
//
// ============================================================================

/// The displayed list at one point in time
#[derive(Debug, Clone)]
pub struct DisplaySnapshot<T> {
    /// Sequence number of the fetch cycle that produced this snapshot;
    /// 0 for the initial empty snapshot
    pub seq: u64,
    /// When the snapshot was applied; None until the first successful fetch
    pub fetched_at: Option<DateTime<Utc>>,
    pub records: Vec<T>,
}

impl<T> DisplaySnapshot<T> {
    fn empty() -> Self {
        Self {
            seq: 0,
            fetched_at: None,
            records: Vec::new(),
        }
    }
}

/// What happened to one apply attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApplyOutcome {
    /// The snapshot replaced the stored sequence
    Applied { count: usize },
    /// The response arrived after a later cycle had already applied
    Stale { response_seq: u64, last_applied: u64 },
}

pub struct DisplayState<T> {
    tx: watch::Sender<DisplaySnapshot<T>>,
}

impl<T> DisplayState<T>
where
    T: DisplayRecord + Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DisplaySnapshot::empty());
        Self { tx }
    }

    /// Sort, guard, and replace. Subscribers are only notified when the
    /// snapshot is actually applied.
    pub fn apply_snapshot(&self, seq: u64, mut records: Vec<T>) -> ApplyOutcome {
        records.sort_by_key(|record| record.display_id());
        let count = records.len();

        let mut outcome = ApplyOutcome::Applied { count };
        self.tx.send_if_modified(|snapshot| {
            if seq <= snapshot.seq {
                outcome = ApplyOutcome::Stale {
                    response_seq: seq,
                    last_applied: snapshot.seq,
                };
                return false;
            }

            snapshot.seq = seq;
            snapshot.fetched_at = Some(Utc::now());
            snapshot.records = records;
            true
        });

        outcome
    }

    /// Clone of the latest snapshot
    pub fn current(&self) -> DisplaySnapshot<T> {
        self.tx.borrow().clone()
    }

    pub fn last_applied_seq(&self) -> u64 {
        self.tx.borrow().seq
    }

    /// Receiver that yields every applied snapshot
    pub fn subscribe(&self) -> watch::Receiver<DisplaySnapshot<T>> {
        self.tx.subscribe()
    }
}

impl<T> Default for DisplayState<T>
where
    T: DisplayRecord + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
