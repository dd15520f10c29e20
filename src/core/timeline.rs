//! Per-employee utilization timeline.
//!
//! Records are kept sorted by `first_day` and never overlap. Point
//! assignment splits the covering record and then coalesces the result with
//! equivalent neighbours, so that no two touching records share both type
//! and review state.

use crate::core::events::{ListenerId, Listeners, MutationConfig, PendingEvents, TimelineEvent};
use crate::core::sync::{self, RemoteStore, SyncReport};
use crate::errors::{AppError, AppResult};
use crate::models::utilization::{Assignment, Cid, Field, Utilization};
use crate::utils::date::shift_days;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Local identities are unique across every timeline of the process, so a
/// record moved between timelines never collides with one issued here.
static NEXT_CID: AtomicU64 = AtomicU64::new(1);

/// Address of a record for removal: its remote id or its local identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Id(i64),
    Local(Cid),
}

impl From<i64> for RecordKey {
    fn from(id: i64) -> Self {
        RecordKey::Id(id)
    }
}

impl From<&Utilization> for RecordKey {
    fn from(u: &Utilization) -> Self {
        match (u.cid, u.id) {
            (0, Some(id)) => RecordKey::Id(id),
            (cid, _) => RecordKey::Local(cid),
        }
    }
}

/// Merges performed on each side by one coalescing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Merges {
    pub left: usize,
    pub right: usize,
}

#[derive(Debug, Default)]
pub struct UtilizationTimeline {
    records: Vec<Utilization>,
    /// State of every persisted record at the last successful save.
    snapshot: HashMap<Cid, Utilization>,
    listeners: Listeners,
}

impl UtilizationTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from stored records.
    ///
    /// Fails on an inverted range or on overlapping records. The loaded
    /// state counts as already synced.
    pub fn from_records(mut records: Vec<Utilization>) -> AppResult<Self> {
        for r in &records {
            if r.last_day < r.first_day {
                return Err(AppError::InvalidRange {
                    first: r.first_day,
                    last: r.last_day,
                });
            }
        }

        records.sort_by_key(|r| r.first_day);

        if let Some(w) = records.windows(2).find(|w| w[0].overlaps(&w[1])) {
            return Err(AppError::Overlap {
                first: w[1].first_day,
                last: w[1].last_day,
            });
        }

        let mut timeline = Self::new();
        for mut r in records {
            r.cid = timeline.alloc_cid();
            timeline.records.push(r);
        }
        timeline.snapshot = timeline.persisted_state();

        Ok(timeline)
    }

    pub fn records(&self) -> &[Utilization] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Utilization> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record with the given remote id.
    pub fn get(&self, id: i64) -> Option<&Utilization> {
        self.records.iter().find(|r| r.id == Some(id))
    }

    /// Records intersecting the inclusive range `[first, last]`.
    pub fn between(&self, first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = &Utilization> {
        self.records
            .iter()
            .filter(move |r| r.first_day <= last && r.last_day >= first)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&TimelineEvent) + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// The record covering `date` moved by `offset_days`, if any.
    pub fn at(&self, date: NaiveDate, offset_days: i64) -> Option<&Utilization> {
        let target = shift_days(date, offset_days)?;
        self.position_at(target).map(|i| &self.records[i])
    }

    pub fn at_date(&self, date: NaiveDate) -> Option<&Utilization> {
        self.at(date, 0)
    }

    /// Assign `assignment` to the single day `date` and return the record
    /// that covers it afterwards.
    pub fn set_at(
        &mut self,
        date: NaiveDate,
        assignment: Assignment,
        config: MutationConfig,
    ) -> AppResult<&Utilization> {
        let mut pending = PendingEvents::default();
        let (idx, _) = self.assign(date, assignment, &mut pending)?;
        self.finish(pending, config);
        Ok(&self.records[idx])
    }

    /// Make `date` the first day of a record, splitting the record that
    /// covers it. Returns the record starting at `date`, or `None` when no
    /// record strictly contains `date`.
    pub fn split_at(&mut self, date: NaiveDate, config: MutationConfig) -> Option<&Utilization> {
        let i = self.position_at(date)?;
        let mut pending = PendingEvents::default();
        let idx = self.split_record(i, date, &mut pending)?;
        self.finish(pending, config);
        Some(&self.records[idx])
    }

    /// Mark every record inside `[date, date + through_days]` as verified,
    /// splitting records that stick out of the range first. Returns the
    /// number of records whose flag changed.
    pub fn verify(
        &mut self,
        date: NaiveDate,
        through_days: u32,
        config: MutationConfig,
    ) -> AppResult<usize> {
        let end = shift_days(date, i64::from(through_days))
            .ok_or(AppError::DateOutOfRange(date, i64::from(through_days)))?;
        let mut pending = PendingEvents::default();

        if let Some(i) = self.position_at(date)
            && !self.records[i].verified
        {
            self.split_record(i, date, &mut pending);
        }

        if let Some(i) = self.position_at(end)
            && !self.records[i].verified
            && self.records[i].last_day > end
            && let Some(after) = end.succ_opt()
        {
            self.split_record(i, after, &mut pending);
        }

        let start = self.records.partition_point(|r| r.last_day < date);
        let mut flipped = Vec::new();
        for r in self.records[start..].iter_mut() {
            if r.first_day > end {
                break;
            }
            if r.first_day >= date && r.last_day <= end && !r.verified {
                r.verified = true;
                pending.changed(r.cid, Field::Verified);
                flipped.push(r.cid);
            }
        }

        // newly verified records join verified equivalent neighbours
        for cid in &flipped {
            if let Some(idx) = self.records.iter().position(|r| r.cid == *cid) {
                self.coalesce(idx, &mut pending);
            }
        }

        self.finish(pending, config);
        Ok(flipped.len())
    }

    /// Insert a record at its sorted position.
    ///
    /// A record taken out with [`remove`](Self::remove) keeps its local
    /// identity when added back, so saving does not delete it. A copy of a
    /// live record gets a fresh identity.
    pub fn add(&mut self, mut record: Utilization) -> AppResult<&Utilization> {
        if record.last_day < record.first_day {
            return Err(AppError::InvalidRange {
                first: record.first_day,
                last: record.last_day,
            });
        }
        if self.records.iter().any(|r| r.overlaps(&record)) {
            return Err(AppError::Overlap {
                first: record.first_day,
                last: record.last_day,
            });
        }
        if record.cid != 0 && self.records.iter().any(|r| r.cid == record.cid) {
            record.cid = 0;
        }

        let mut pending = PendingEvents::default();
        let at = self.records.partition_point(|r| r.first_day < record.first_day);
        self.insert_at(at, record, &mut pending);
        self.finish(pending, MutationConfig::default());
        Ok(&self.records[at])
    }

    pub fn remove<K: Into<RecordKey>>(&mut self, key: K) -> Option<Utilization> {
        self.remove_all([key]).pop()
    }

    pub fn remove_all<I, K>(&mut self, keys: I) -> Vec<Utilization>
    where
        I: IntoIterator<Item = K>,
        K: Into<RecordKey>,
    {
        let mut pending = PendingEvents::default();
        let mut out = Vec::new();

        for key in keys {
            let pos = match key.into() {
                RecordKey::Id(id) => self.records.iter().position(|r| r.id == Some(id)),
                RecordKey::Local(cid) => self.records.iter().position(|r| r.cid == cid),
            };
            if let Some(pos) = pos {
                let record = self.records.remove(pos);
                pending.removed(record.clone());
                out.push(record);
            }
        }

        self.finish(pending, MutationConfig::default());
        out
    }

    /// Change the remote id of the record currently known as `id`.
    pub fn set_id(&mut self, id: i64, new_id: Option<i64>) -> bool {
        let Some(r) = self.records.iter_mut().find(|r| r.id == Some(id)) else {
            return false;
        };
        r.id = new_id;

        let mut pending = PendingEvents::default();
        pending.changed(r.cid, Field::Id);
        self.finish(pending, MutationConfig::default());
        true
    }

    /// Push local changes to `store`.
    ///
    /// On failure nothing is rolled back and the pending diff is kept, so a
    /// later call sends it again. A store that commits and then returns the
    /// wrong number of ids also fails the save; retrying after that error
    /// sends the creates a second time, which is why [`RemoteStore::sync`]
    /// must check the count before committing.
    pub fn save<S: RemoteStore + ?Sized>(&mut self, store: &mut S) -> AppResult<SyncReport> {
        let batch = sync::diff(&self.records, &self.snapshot);
        if batch.is_empty() {
            return Ok(SyncReport::default());
        }

        let created = store.sync(&batch)?;
        if created.len() != batch.create.len() {
            return Err(AppError::Sync(format!(
                "store returned {} ids for {} created utilizations",
                created.len(),
                batch.create.len()
            )));
        }

        let mut pending = PendingEvents::default();
        for (record, id) in batch.create.iter().zip(&created) {
            if let Some(r) = self.records.iter_mut().find(|r| r.cid == record.cid) {
                r.id = Some(*id);
                pending.changed(r.cid, Field::Id);
            }
        }
        self.snapshot = self.persisted_state();
        self.finish(pending, MutationConfig::default());

        Ok(SyncReport {
            created,
            updated: batch.update.iter().filter_map(|r| r.id).collect(),
            deleted: batch.delete,
        })
    }

    /// True when no two touching records are equivalent.
    pub fn is_coalesced(&self) -> bool {
        self.records
            .windows(2)
            .all(|w| !(w[0].abuts(&w[1]) && w[0].is_equivalent(&w[1])))
    }

    // ------------------------------------------------------------------
    // internals
    // ------------------------------------------------------------------

    fn alloc_cid(&mut self) -> Cid {
        NEXT_CID.fetch_add(1, Ordering::Relaxed)
    }

    fn persisted_state(&self) -> HashMap<Cid, Utilization> {
        self.records
            .iter()
            .filter(|r| r.id.is_some())
            .map(|r| (r.cid, r.clone()))
            .collect()
    }

    fn position_at(&self, date: NaiveDate) -> Option<usize> {
        let after = self.records.partition_point(|r| r.first_day <= date);
        let i = after.checked_sub(1)?;
        self.records[i].contains(date).then_some(i)
    }

    fn insert_at(&mut self, at: usize, mut record: Utilization, pending: &mut PendingEvents) {
        if record.cid == 0 {
            record.cid = self.alloc_cid();
        }
        pending.added(record.cid);
        self.records.insert(at, record);
    }

    /// Split record `i` so that a record starts at `date`. Returns the
    /// index of that record, or `None` if `date` already starts record `i`.
    fn split_record(&mut self, i: usize, date: NaiveDate, pending: &mut PendingEvents) -> Option<usize> {
        let r = &self.records[i];
        if r.first_day >= date || r.last_day < date {
            return None;
        }
        let before_end = date.pred_opt()?;
        let tail = r.fragment(date, r.last_day);

        self.records[i].last_day = before_end;
        pending.changed(self.records[i].cid, Field::LastDay);
        self.insert_at(i + 1, tail, pending);
        Some(i + 1)
    }

    pub(crate) fn assign(
        &mut self,
        date: NaiveDate,
        assignment: Assignment,
        pending: &mut PendingEvents,
    ) -> AppResult<(usize, Merges)> {
        let fresh = Utilization::single_day(assignment.type_id, date)
            .with_verified(assignment.verified.unwrap_or(false));

        let idx = match self.position_at(date) {
            Some(i) if self.records[i].is_single_day() => {
                let r = &mut self.records[i];
                if r.type_id != assignment.type_id {
                    r.type_id = assignment.type_id;
                    pending.changed(r.cid, Field::TypeId);
                }
                if let Some(verified) = assignment.verified
                    && r.verified != verified
                {
                    r.verified = verified;
                    pending.changed(r.cid, Field::Verified);
                }
                i
            }
            // already carries these attributes
            Some(i) if self.records[i].is_equivalent(&fresh) => i,
            Some(i) => self.carve(i, fresh, pending)?,
            None => {
                let at = self.records.partition_point(|r| r.first_day < date);
                self.insert_at(at, fresh, pending);
                at
            }
        };

        Ok(self.coalesce(idx, pending))
    }

    /// Replace the multi-day record `i` by up to three pieces around the
    /// single-day `fresh` record. Returns the index of `fresh`.
    fn carve(&mut self, i: usize, fresh: Utilization, pending: &mut PendingEvents) -> AppResult<usize> {
        let date = fresh.first_day;
        let (first, last) = (self.records[i].first_day, self.records[i].last_day);
        let cid = self.records[i].cid;

        if first < date {
            let before_end = date.pred_opt().ok_or(AppError::DateOutOfRange(date, -1))?;
            let after = if last > date {
                let after_start = date.succ_opt().ok_or(AppError::DateOutOfRange(date, 1))?;
                Some(self.records[i].fragment(after_start, last))
            } else {
                None
            };

            self.records[i].last_day = before_end;
            pending.changed(cid, Field::LastDay);
            self.insert_at(i + 1, fresh, pending);
            if let Some(after) = after {
                self.insert_at(i + 2, after, pending);
            }
            Ok(i + 1)
        } else {
            let after_start = date.succ_opt().ok_or(AppError::DateOutOfRange(date, 1))?;
            self.records[i].first_day = after_start;
            pending.changed(cid, Field::FirstDay);
            self.insert_at(i, fresh, pending);
            Ok(i)
        }
    }

    /// Merge record `idx` with touching equivalent neighbours. The left
    /// record of each merged pair survives. Returns the surviving index.
    fn coalesce(&mut self, mut idx: usize, pending: &mut PendingEvents) -> (usize, Merges) {
        let mut merges = Merges::default();

        while idx > 0 && self.mergeable(idx - 1) {
            let absorbed = self.records.remove(idx);
            idx -= 1;
            self.records[idx].last_day = absorbed.last_day;
            pending.changed(self.records[idx].cid, Field::LastDay);
            pending.removed(absorbed);
            merges.left += 1;
        }

        while idx + 1 < self.records.len() && self.mergeable(idx) {
            let absorbed = self.records.remove(idx + 1);
            self.records[idx].last_day = absorbed.last_day;
            pending.changed(self.records[idx].cid, Field::LastDay);
            pending.removed(absorbed);
            merges.right += 1;
        }

        (idx, merges)
    }

    /// Whether records `i` and `i + 1` touch and are equivalent.
    fn mergeable(&self, i: usize) -> bool {
        let (a, b) = (&self.records[i], &self.records[i + 1]);
        a.abuts(b) && a.is_equivalent(b)
    }

    fn finish(&mut self, pending: PendingEvents, config: MutationConfig) {
        debug_assert!(
            self.records.iter().all(|r| r.first_day <= r.last_day),
            "timeline holds an inverted range"
        );
        debug_assert!(
            self.records.windows(2).all(|w| w[0].last_day < w[1].first_day),
            "timeline records are unsorted or overlapping"
        );

        if config.suppress_notifications {
            return;
        }
        let events = pending.resolve(&self.records);
        self.listeners.emit(&events);
    }
}
