use chrono::{Datelike, NaiveDate, TimeDelta};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `YYYY-MM-DD`, or `today`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.eq_ignore_ascii_case("today") {
        return Some(today());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// `date` moved by a signed number of whole days, `None` when the result
/// is not representable.
pub fn shift_days(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    TimeDelta::try_days(offset).and_then(|delta| date.checked_add_signed(delta))
}

/// Inclusive bounds of a period: `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(dm) = NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d") {
        return Ok((dm, last_day_of_month(dm.year(), dm.month())));
    }

    // YYYY
    if let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(format!("Invalid period: {}", p))
}

/// Bounds of a period or of a `start:end` range of periods.
pub fn range_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some((start, end)) = p.split_once(':') {
        let (first, _) = period_bounds(start)?;
        let (_, last) = period_bounds(end)?;
        if last < first {
            return Err(format!("Invalid range: {}", p));
        }
        return Ok((first, last));
    }

    period_bounds(p)
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (y, m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Weekday label according to the `show_weekday` setting.
pub fn weekday_label(date: NaiveDate, mode: &str) -> String {
    match mode.to_lowercase().as_str() {
        "short" => date.format("%a").to_string(),
        "long" => date.format("%A").to_string(),
        _ => String::new(),
    }
}
