use crate::core::events::MutationConfig;
use crate::core::{ChangeRecorder, describe_report, load_timeline, print_changes, type_names};
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::shift_days;
use chrono::NaiveDate;

pub struct VerifyLogic;

impl VerifyLogic {
    /// Verify `employee`'s utilizations from `date` through
    /// `date + through_days`, both ends included. Returns how many records
    /// changed state.
    pub fn apply(
        pool: &mut DbPool,
        employee: &str,
        date: NaiveDate,
        through_days: u32,
    ) -> AppResult<usize> {
        let names = type_names(&pool.conn)?;
        let mut timeline = load_timeline(&pool.conn, employee)?;
        let recorder = ChangeRecorder::attach(&mut timeline);

        let flipped = timeline.verify(date, through_days, MutationConfig::default())?;
        let end = shift_days(date, i64::from(through_days)).unwrap_or(date);

        if flipped == 0 {
            info(format!(
                "Nothing to verify for {} between {} and {}",
                employee, date, end
            ));
            return Ok(0);
        }

        print_changes(&recorder.take(), &names);
        let report = timeline.save(&mut SqliteStore::new(&mut pool.conn, employee))?;

        ttlog_or_warn(
            &pool.conn,
            "verify",
            employee,
            &format!(
                "{}..{}: {} verified ({})",
                date,
                end,
                flipped,
                describe_report(&report)
            ),
        );

        success(format!(
            "Verified {} utilization(s) of {} between {} and {}",
            flipped, employee, date, end
        ));
        Ok(flipped)
    }
}
