use crate::core::events::MutationConfig;
use crate::core::{ChangeRecorder, describe_report, load_timeline, print_changes, type_names};
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::resolve_type;
use crate::db::store::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::models::utilization::{Assignment, Utilization};
use crate::ui::messages::success;
use chrono::NaiveDate;

pub struct AssignLogic;

impl AssignLogic {
    /// Assign a utilization type to one day of `employee` and persist the
    /// resulting timeline. Returns the record covering `date` afterwards.
    pub fn apply(
        pool: &mut DbPool,
        employee: &str,
        date: NaiveDate,
        type_key: &str,
        verified: Option<bool>,
    ) -> AppResult<Utilization> {
        let kind = resolve_type(&pool.conn, type_key)?;
        let names = type_names(&pool.conn)?;

        let mut timeline = load_timeline(&pool.conn, employee)?;
        let recorder = ChangeRecorder::attach(&mut timeline);

        let assignment = Assignment {
            type_id: kind.id,
            verified,
        };
        timeline.set_at(date, assignment, MutationConfig::default())?;
        print_changes(&recorder.take(), &names);

        let report = timeline.save(&mut SqliteStore::new(&mut pool.conn, employee))?;

        let covering = timeline
            .at_date(date)
            .cloned()
            .ok_or_else(|| AppError::Other(format!("nothing covers {date}")))?;

        ttlog_or_warn(
            &pool.conn,
            "set",
            employee,
            &format!("{} → {} ({})", date, kind.name, describe_report(&report)),
        );

        success(format!(
            "{} set to '{}' on {} (now {}..{})",
            employee,
            kind.name,
            date,
            covering.first_day_str(),
            covering.last_day_str()
        ));
        Ok(covering)
    }
}
