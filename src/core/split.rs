use crate::core::events::MutationConfig;
use crate::core::{ChangeRecorder, describe_report, load_timeline, print_changes, type_names};
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use chrono::NaiveDate;

pub struct SplitLogic;

impl SplitLogic {
    /// Split the utilization of `employee` covering `date` so that a record
    /// starts on `date`. Returns `false` when there was nothing to split.
    pub fn apply(pool: &mut DbPool, employee: &str, date: NaiveDate) -> AppResult<bool> {
        let names = type_names(&pool.conn)?;
        let mut timeline = load_timeline(&pool.conn, employee)?;
        let recorder = ChangeRecorder::attach(&mut timeline);

        if timeline.split_at(date, MutationConfig::default()).is_none() {
            warning(format!(
                "No utilization of {} strictly contains {}; nothing to split.",
                employee, date
            ));
            return Ok(false);
        }

        print_changes(&recorder.take(), &names);
        let report = timeline.save(&mut SqliteStore::new(&mut pool.conn, employee))?;

        ttlog_or_warn(
            &pool.conn,
            "split",
            employee,
            &format!("split at {} ({})", date, describe_report(&report)),
        );

        success(format!("Split {}'s utilization at {}", employee, date));
        Ok(true)
    }
}
