use chrono::{NaiveDate, Utc};

use crate::domain::attribute_date::AttributeDate;

/// Source of "today" for date-valued attributes.
pub trait Clock: Send + Sync {
    fn today(&self) -> AttributeDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> AttributeDate {
        AttributeDate::from(Utc::now().date_naive())
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self(today)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> AttributeDate {
        AttributeDate::from(self.0)
    }
}
