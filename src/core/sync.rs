//! Persistence diff between a timeline and its remote store.

use crate::errors::AppResult;
use crate::models::utilization::{Cid, Utilization};
use std::collections::{HashMap, HashSet};

/// One round of changes sent to a [`RemoteStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncBatch {
    /// Records without a remote identity, addressed by payload.
    pub create: Vec<Utilization>,
    /// Persisted records whose state changed since the last sync.
    pub update: Vec<Utilization>,
    /// Remote identities no longer present in the timeline.
    pub delete: Vec<i64>,
}

impl SyncBatch {
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }

    pub fn len(&self) -> usize {
        self.create.len() + self.update.len() + self.delete.len()
    }
}

/// Outcome of a successful save, by remote identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: Vec<i64>,
    pub updated: Vec<i64>,
    pub deleted: Vec<i64>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// Backing store for utilizations.
///
/// Implementations apply the whole batch or fail; on success they return
/// the identities assigned to `batch.create`, in the same order. The number
/// of ids must equal `batch.create.len()` and is checked before committing:
/// a store that commits first turns a retried save into duplicate rows.
pub trait RemoteStore {
    fn sync(&mut self, batch: &SyncBatch) -> AppResult<Vec<i64>>;
}

/// Compare the live records with the last-synced snapshot (keyed by local
/// identity) and build the batch that brings the store up to date.
pub(crate) fn diff(records: &[Utilization], snapshot: &HashMap<Cid, Utilization>) -> SyncBatch {
    let mut batch = SyncBatch::default();
    let mut live = HashSet::new();

    for record in records {
        live.insert(record.cid);

        match record.id {
            None => {
                batch.create.push(record.clone());
                // an identity dropped locally orphans the stored row
                if let Some(old_id) = snapshot.get(&record.cid).and_then(|s| s.id) {
                    batch.delete.push(old_id);
                }
            }
            Some(_) => {
                if snapshot.get(&record.cid) != Some(record) {
                    batch.update.push(record.clone());
                }
            }
        }
    }

    batch.delete.extend(
        snapshot
            .values()
            .filter(|s| !live.contains(&s.cid))
            .filter_map(|s| s.id),
    );
    batch.delete.sort_unstable();
    batch.delete.dedup();

    batch
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingStore;
    use crate::core::events::MutationConfig;
    use crate::core::timeline::{RecordKey, UtilizationTimeline};
    use crate::errors::AppError;
    use crate::models::utilization::{Assignment, Utilization};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 4, day).unwrap()
    }

    fn persisted(ids: &[i64]) -> UtilizationTimeline {
        let records = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                // two days apart so nothing touches
                Utilization::single_day(1, d(1 + 2 * i as u32)).with_id(*id)
            })
            .collect();
        UtilizationTimeline::from_records(records).unwrap()
    }

    fn ids(records: &[Utilization]) -> Vec<i64> {
        let mut out: Vec<i64> = records.iter().filter_map(|r| r.id).collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn updates_previously_existing_changed_records() {
        let mut t = persisted(&[32]);
        let mut store = RecordingStore::default();

        t.set_id(32, Some(34));
        t.save(&mut store).unwrap();

        assert_eq!(ids(&store.last().update), vec![34]);
        assert!(store.last().delete.is_empty());
    }

    #[test]
    fn does_not_update_unchanged_records() {
        let mut t = persisted(&[32]);
        let mut store = RecordingStore::default();

        let report = t.save(&mut store).unwrap();

        assert!(store.batches.is_empty());
        assert!(report.is_empty());
    }

    #[test]
    fn creates_new_records_and_adopts_their_ids() {
        let mut t = UtilizationTimeline::new();
        let mut store = RecordingStore::starting_at(100);

        t.add(Utilization::single_day(3, d(4))).unwrap();
        let report = t.save(&mut store).unwrap();

        assert_eq!(store.last().create.len(), 1);
        assert_eq!(report.created, vec![100]);
        assert_eq!(t.records()[0].id, Some(100));

        // nothing left to do afterwards
        t.save(&mut store).unwrap();
        assert_eq!(store.batches.len(), 1);
    }

    #[test]
    fn destroys_removed_records() {
        let mut t = persisted(&[55, 56, 57, 58, 59, 60]);
        let mut store = RecordingStore::default();

        // by id, singly
        t.remove(55_i64);
        // by id, as a batch
        t.remove_all([56_i64, 57]);
        // by record reference, singly
        let r58 = t.get(58).unwrap().clone();
        t.remove(&r58);
        // by record reference, as a batch
        let r59 = t.get(59).unwrap().clone();
        let r60 = t.get(60).unwrap().clone();
        t.remove_all([RecordKey::from(&r59), RecordKey::from(&r60)]);

        let report = t.save(&mut store).unwrap();

        assert_eq!(store.last().delete, vec![55, 56, 57, 58, 59, 60]);
        assert_eq!(report.deleted, vec![55, 56, 57, 58, 59, 60]);
        assert!(t.is_empty());
    }

    #[test]
    fn reinserted_record_is_updated_not_deleted() {
        let mut t = persisted(&[23]);
        let mut store = RecordingStore::default();

        let record = t.remove(23_i64).unwrap();
        t.add(record).unwrap();
        t.set_id(23, Some(45));

        t.save(&mut store).unwrap();

        assert_eq!(ids(&store.last().update), vec![45]);
        assert!(store.last().delete.is_empty());
        assert!(store.last().create.is_empty());
    }

    #[test]
    fn failed_save_keeps_the_pending_diff() {
        let mut t = persisted(&[7]);
        let mut store = RecordingStore {
            fail: true,
            ..RecordingStore::default()
        };

        t.remove(7_i64);
        assert!(t.save(&mut store).is_err());

        store.fail = false;
        t.save(&mut store).unwrap();
        assert_eq!(store.batches.len(), 2);
        assert_eq!(store.last().delete, vec![7]);
    }

    #[test]
    fn split_of_persisted_record_updates_and_creates() {
        let record = Utilization::new(23, d(3), d(5)).unwrap().with_id(9);
        let mut t = UtilizationTimeline::from_records(vec![record]).unwrap();
        let mut store = RecordingStore::starting_at(10);

        t.split_at(d(4), Default::default()).unwrap();
        let report = t.save(&mut store).unwrap();

        assert_eq!(report.updated, vec![9]);
        assert_eq!(report.created, vec![10]);
        assert!(report.deleted.is_empty());
        assert_eq!(t.records()[0].last_day, d(3));
        assert_eq!(t.records()[1].id, Some(10));
    }

    #[test]
    fn record_moved_between_timelines_is_saved_once() {
        let mut source = UtilizationTimeline::new();
        for day in [1, 3, 5] {
            source
                .set_at(d(day), Assignment::of_type(1), MutationConfig::default())
                .unwrap();
        }
        let moved = source.records()[2].clone();
        let moved = source.remove(&moved).unwrap();

        let mut target = UtilizationTimeline::new();
        target.add(moved).unwrap();
        for day in [7, 9, 11] {
            target
                .set_at(d(day), Assignment::of_type(2), MutationConfig::default())
                .unwrap();
        }

        let mut cids: Vec<_> = target.iter().map(|r| r.cid()).collect();
        cids.sort_unstable();
        cids.dedup();
        assert_eq!(cids.len(), 4);

        let mut store = RecordingStore::starting_at(100);
        let report = target.save(&mut store).unwrap();

        assert_eq!(report.created, vec![100, 101, 102, 103]);
        assert!(target.iter().all(|r| r.id.is_some()));
        assert_eq!(ids(target.records()), vec![100, 101, 102, 103]);

        // nothing is left to create
        target.save(&mut store).unwrap();
        assert_eq!(store.batches.len(), 1);
    }

    #[test]
    fn foreign_record_does_not_hide_a_delete() {
        let mut source = UtilizationTimeline::new();
        source
            .set_at(d(9), Assignment::of_type(1), MutationConfig::default())
            .unwrap();
        let foreign = source.records()[0].clone();
        let foreign = source.remove(&foreign).unwrap();

        let mut t = persisted(&[7]);
        t.remove(7_i64);
        t.add(foreign).unwrap();

        let mut store = RecordingStore::starting_at(20);
        let report = t.save(&mut store).unwrap();

        assert_eq!(report.deleted, vec![7]);
        assert_eq!(report.created, vec![20]);
    }

    #[test]
    fn id_count_mismatch_fails_the_save() {
        let mut t = UtilizationTimeline::new();
        t.add(Utilization::single_day(3, d(4))).unwrap();
        t.add(Utilization::single_day(3, d(8))).unwrap();
        let mut store = RecordingStore {
            short_ids: true,
            ..RecordingStore::starting_at(100)
        };

        let err = t.save(&mut store).unwrap_err();

        assert!(matches!(err, AppError::Sync(_)));
        assert!(t.iter().all(|r| r.id.is_none()));
    }
}
