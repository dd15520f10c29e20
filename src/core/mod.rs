pub mod assign;
pub mod events;
pub mod log;
pub mod show;
pub mod split;
pub mod sync;
pub mod timeline;
pub mod types;
pub mod verify;

use crate::core::events::TimelineEvent;
use crate::core::sync::SyncReport;
use crate::core::timeline::UtilizationTimeline;
use crate::db::queries::{list_types, load_utilizations};
use crate::errors::AppResult;
use crate::ui::messages::info;
use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Load the stored timeline of `employee`.
pub(crate) fn load_timeline(conn: &Connection, employee: &str) -> AppResult<UtilizationTimeline> {
    UtilizationTimeline::from_records(load_utilizations(conn, employee)?)
}

/// Type names by id, for display.
pub(crate) fn type_names(conn: &Connection) -> AppResult<HashMap<i64, String>> {
    Ok(list_types(conn)?.into_iter().map(|t| (t.id, t.name)).collect())
}

/// Collects the notifications of a timeline so a command can report them.
pub(crate) struct ChangeRecorder {
    events: Rc<RefCell<Vec<TimelineEvent>>>,
}

impl ChangeRecorder {
    pub fn attach(timeline: &mut UtilizationTimeline) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        timeline.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        Self { events }
    }

    pub fn take(&self) -> Vec<TimelineEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

/// One line per notification: `+` added, `-` removed, `~` changed.
pub(crate) fn print_changes(events: &[TimelineEvent], names: &HashMap<i64, String>) {
    for e in events {
        let r = e.record();
        let type_name = names
            .get(&r.type_id)
            .cloned()
            .unwrap_or_else(|| r.type_id.to_string());
        let marker = match e {
            TimelineEvent::Added(_) => "+",
            TimelineEvent::Removed(_) => "-",
            TimelineEvent::Changed { .. } => "~",
        };
        info(format!(
            "{} {:<16} {}..{} {}{}",
            marker,
            e.name(),
            r.first_day_str(),
            r.last_day_str(),
            type_name,
            if r.verified { " (verified)" } else { "" }
        ));
    }
}

pub(crate) fn describe_report(report: &SyncReport) -> String {
    format!(
        "{} created, {} updated, {} deleted",
        report.created.len(),
        report.updated.len(),
        report.deleted.len()
    )
}
