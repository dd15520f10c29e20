//! Change notifications emitted by a timeline.
//!
//! Listeners are plain callbacks invoked synchronously once a mutation has
//! finished. Structural events (`Removed`, `Added`) are delivered first, in
//! the order they happened, followed by attribute `Changed` events.

use crate::models::utilization::{Cid, Field, Utilization};
use std::collections::HashSet;
use std::fmt;

/// Per-call options of the mutating operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationConfig {
    /// Skip every notification of the call. The structural result is the same.
    pub suppress_notifications: bool,
}

impl MutationConfig {
    pub fn silent() -> Self {
        Self {
            suppress_notifications: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineEvent {
    Added(Utilization),
    Removed(Utilization),
    Changed { record: Utilization, field: Field },
}

impl TimelineEvent {
    /// Short name, e.g. `add`, `remove`, `change:last_day`.
    pub fn name(&self) -> String {
        match self {
            TimelineEvent::Added(_) => "add".to_string(),
            TimelineEvent::Removed(_) => "remove".to_string(),
            TimelineEvent::Changed { field, .. } => format!("change:{}", field.as_str()),
        }
    }

    pub fn record(&self) -> &Utilization {
        match self {
            TimelineEvent::Added(r) | TimelineEvent::Removed(r) => r,
            TimelineEvent::Changed { record, .. } => record,
        }
    }
}

pub type ListenerId = usize;

type Listener = Box<dyn FnMut(&TimelineEvent)>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: ListenerId,
    entries: Vec<(ListenerId, Listener)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Listeners {
    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        self.next_id += 1;
        self.entries.push((self.next_id, listener));
        self.next_id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(lid, _)| *lid != id);
        before != self.entries.len()
    }

    pub fn emit(&mut self, events: &[TimelineEvent]) {
        for event in events {
            for (_, listener) in self.entries.iter_mut() {
                listener(event);
            }
        }
    }
}

enum Structural {
    Added(Cid),
    Removed(Utilization),
}

/// Notifications collected while a single mutation runs.
#[derive(Default)]
pub(crate) struct PendingEvents {
    structural: Vec<Structural>,
    changes: Vec<(Cid, Field)>,
}

impl PendingEvents {
    pub fn added(&mut self, cid: Cid) {
        self.structural.push(Structural::Added(cid));
    }

    pub fn removed(&mut self, record: Utilization) {
        self.structural.push(Structural::Removed(record));
    }

    pub fn changed(&mut self, cid: Cid, field: Field) {
        self.changes.push((cid, field));
    }

    /// Resolve the collected notifications against the final records.
    ///
    /// A record both added and removed within the call is never reported,
    /// and a removed record gets no `Changed` events. A record added within
    /// the call and changed afterwards, such as a piece split off and then
    /// verified, reports `Added` followed by its `Changed` events.
    pub fn resolve(self, records: &[Utilization]) -> Vec<TimelineEvent> {
        let mut added = HashSet::new();
        let mut removed = HashSet::new();
        for s in &self.structural {
            match s {
                Structural::Added(cid) => {
                    added.insert(*cid);
                }
                Structural::Removed(r) => {
                    removed.insert(r.cid);
                }
            }
        }

        let lookup = |cid: Cid| records.iter().find(|r| r.cid == cid).cloned();
        let mut out = Vec::new();

        for s in self.structural {
            match s {
                Structural::Added(cid) if !removed.contains(&cid) => {
                    if let Some(r) = lookup(cid) {
                        out.push(TimelineEvent::Added(r));
                    }
                }
                Structural::Removed(r) if !added.contains(&r.cid) => {
                    out.push(TimelineEvent::Removed(r));
                }
                _ => {}
            }
        }

        let mut seen = HashSet::new();
        for (cid, field) in self.changes {
            if removed.contains(&cid) || !seen.insert((cid, field)) {
                continue;
            }
            if let Some(record) = lookup(cid) {
                out.push(TimelineEvent::Changed { record, field });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(cid: Cid, day: u32) -> Utilization {
        let mut u = Utilization::single_day(1, NaiveDate::from_ymd_opt(2013, 4, day).unwrap());
        u.cid = cid;
        u
    }

    #[test]
    fn structural_events_come_before_changes() {
        let records = vec![rec(1, 3), rec(2, 4)];
        let mut pending = PendingEvents::default();
        pending.changed(1, Field::LastDay);
        pending.added(2);

        let names: Vec<String> = pending.resolve(&records).iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["add", "change:last_day"]);
    }

    #[test]
    fn transient_records_are_not_reported() {
        let records = vec![rec(1, 3)];
        let mut pending = PendingEvents::default();
        pending.added(2);
        pending.changed(2, Field::TypeId);
        pending.removed(rec(2, 4));
        pending.changed(1, Field::LastDay);
        pending.changed(1, Field::LastDay);

        let events = pending.resolve(&records);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "change:last_day");
        assert_eq!(events[0].record().cid(), 1);
    }

    #[test]
    fn added_record_reports_later_changes() {
        let records = vec![rec(1, 3), rec(2, 4)];
        let mut pending = PendingEvents::default();
        pending.changed(1, Field::LastDay);
        pending.added(2);
        pending.changed(2, Field::Verified);

        let names: Vec<String> = pending.resolve(&records).iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["add", "change:last_day", "change:verified"]);
    }

    #[test]
    fn unsubscribed_listener_stops_receiving() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::default();
        let counter = Rc::clone(&seen);
        let id = listeners.subscribe(Box::new(move |_| *counter.borrow_mut() += 1));

        listeners.emit(&[TimelineEvent::Added(rec(1, 3))]);
        assert!(listeners.unsubscribe(id));
        listeners.emit(&[TimelineEvent::Added(rec(1, 3))]);

        assert_eq!(*seen.borrow(), 1);
        assert!(!listeners.unsubscribe(id));
    }
}
