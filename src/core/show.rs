use crate::config::Config;
use crate::core::{load_timeline, type_names};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::utilization::Utilization;
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_optional, verified_label};
use crate::utils::date::{range_bounds, shift_days, weekday_label};
use crate::utils::formatting::days_label;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;
use std::collections::HashMap;

pub struct ShowLogic;

impl ShowLogic {
    /// Print the utilization covering `date + offset`.
    pub fn at(
        pool: &mut DbPool,
        cfg: &Config,
        employee: &str,
        date: NaiveDate,
        offset: i64,
    ) -> AppResult<Option<Utilization>> {
        let target = shift_days(date, offset).ok_or(AppError::DateOutOfRange(date, offset))?;
        let names = type_names(&pool.conn)?;
        let timeline = load_timeline(&pool.conn, employee)?;

        let day = day_with_weekday(target, cfg);
        let Some(found) = timeline.at(date, offset).cloned() else {
            info(format!(
                "{}: {} {}",
                employee,
                day,
                colorize_optional("--")
            ));
            return Ok(None);
        };

        info(format!(
            "{}: {} → {} ({}..{}, {})",
            employee,
            day,
            type_name(&names, found.type_id),
            found.first_day_str(),
            found.last_day_str(),
            verified_label(found.verified)
        ));
        Ok(Some(found))
    }

    /// Print the timeline of `employee`, optionally limited to the records
    /// touching `period`. Returns the number of listed records.
    pub fn list(
        pool: &mut DbPool,
        cfg: &Config,
        employee: &str,
        period: Option<&str>,
    ) -> AppResult<usize> {
        let names = type_names(&pool.conn)?;
        let timeline = load_timeline(&pool.conn, employee)?;

        let records: Vec<&Utilization> = match period {
            None => timeline.iter().collect(),
            Some(p) => {
                let (first, last) = range_bounds(p).map_err(AppError::InvalidDate)?;
                timeline.between(first, last).collect()
            }
        };

        header(format!("Utilizations of {}", employee));
        if records.is_empty() {
            info("No utilizations found.");
            return Ok(0);
        }

        let sep = cfg.separator_char.chars().next().unwrap_or('-');
        let mut table = Table::new(
            vec![
                Column::new("ID"),
                Column::new("FROM"),
                Column::new("TO"),
                Column::new("DAYS"),
                Column::new("TYPE"),
                Column::new("STATUS"),
            ],
            sep,
        );

        for r in &records {
            table.add_row(vec![
                r.id.map(|id| id.to_string()).unwrap_or_else(|| "--".into()),
                day_with_weekday(r.first_day, cfg),
                day_with_weekday(r.last_day, cfg),
                days_label(r.span_days()),
                type_name(&names, r.type_id),
                verified_label(r.verified),
            ]);
        }
        print!("{}", table.render());

        Ok(records.len())
    }
}

fn type_name(names: &HashMap<i64, String>, id: i64) -> String {
    names.get(&id).cloned().unwrap_or_else(|| format!("#{id}"))
}

fn day_with_weekday(date: NaiveDate, cfg: &Config) -> String {
    let label = weekday_label(date, &cfg.show_weekday);
    if label.is_empty() {
        date.format("%Y-%m-%d").to_string()
    } else {
        format!("{} {}", date.format("%Y-%m-%d"), label)
    }
}
