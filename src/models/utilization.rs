use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Local identity handed out by a timeline. Never persisted.
pub type Cid = u64;

/// One labeled, inclusive range of days in an employee's timeline.
///
/// Equality compares values only (`id`, `type_id`, bounds, `verified`):
/// the local identity is ignored, so a rebuilt record compares equal to
/// the one it replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utilization {
    #[serde(skip)]
    pub(crate) cid: Cid,
    pub id: Option<i64>,
    pub type_id: i64,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    #[serde(default)]
    pub verified: bool,
}

impl PartialEq for Utilization {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.type_id == other.type_id
            && self.first_day == other.first_day
            && self.last_day == other.last_day
            && self.verified == other.verified
    }
}

impl Eq for Utilization {}

impl Utilization {
    /// Build an unpersisted, unverified record.
    /// Fails when `last_day` precedes `first_day`.
    pub fn new(type_id: i64, first_day: NaiveDate, last_day: NaiveDate) -> AppResult<Self> {
        if last_day < first_day {
            return Err(AppError::InvalidRange {
                first: first_day,
                last: last_day,
            });
        }

        Ok(Self {
            cid: 0,
            id: None,
            type_id,
            first_day,
            last_day,
            verified: false,
        })
    }

    pub fn single_day(type_id: i64, day: NaiveDate) -> Self {
        Self {
            cid: 0,
            id: None,
            type_id,
            first_day: day,
            last_day: day,
            verified: false,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// Local identity, `0` until the record enters a timeline.
    pub fn cid(&self) -> Cid {
        self.cid
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_day <= date && date <= self.last_day
    }

    pub fn is_single_day(&self) -> bool {
        self.first_day == self.last_day
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.first_day <= other.last_day && other.first_day <= self.last_day
    }

    /// True when `next` starts on the day right after this record ends.
    pub fn abuts(&self, next: &Self) -> bool {
        self.last_day.succ_opt() == Some(next.first_day)
    }

    /// Same kind of work and same review state.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.verified == other.verified
    }

    /// Number of days covered, bounds included.
    pub fn span_days(&self) -> i64 {
        (self.last_day - self.first_day).num_days() + 1
    }

    pub fn first_day_str(&self) -> String {
        self.first_day.format("%Y-%m-%d").to_string()
    }

    pub fn last_day_str(&self) -> String {
        self.last_day.format("%Y-%m-%d").to_string()
    }

    /// Copy of this record's attributes over new bounds, without identity.
    pub(crate) fn fragment(&self, first_day: NaiveDate, last_day: NaiveDate) -> Self {
        Self {
            cid: 0,
            id: None,
            type_id: self.type_id,
            first_day,
            last_day,
            verified: self.verified,
        }
    }
}

/// Attributes written by a point assignment.
///
/// `verified: None` keeps the current flag when a single-day record is
/// updated in place and means "unverified" for freshly created days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub type_id: i64,
    pub verified: Option<bool>,
}

impl Assignment {
    pub fn of_type(type_id: i64) -> Self {
        Self {
            type_id,
            verified: None,
        }
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }
}

impl From<&Utilization> for Assignment {
    fn from(u: &Utilization) -> Self {
        Self {
            type_id: u.type_id,
            verified: Some(u.verified),
        }
    }
}

/// Attribute names carried by change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    TypeId,
    FirstDay,
    LastDay,
    Verified,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::TypeId => "type_id",
            Field::FirstDay => "first_day",
            Field::LastDay => "last_day",
            Field::Verified => "verified",
        }
    }
}
