use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate};

use crate::utils::time::ENTRY_TIMESTAMP_FORMAT;

/// A single record of the activity log.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ActivityEntry {
    pub moment: DateTime<Local>,
    pub description: Arc<str>,
}

impl ActivityEntry {
    pub fn new(moment: DateTime<Local>, description: impl Into<Arc<str>>) -> Self {
        Self {
            moment,
            description: description.into(),
        }
    }

    /// Day file the entry belongs to.
    pub fn day(&self) -> NaiveDate {
        self.moment.date_naive()
    }

    /// The complete line, terminator included.
    pub fn to_line(&self) -> String {
        format!(
            "{}: {}\n",
            self.moment.format(ENTRY_TIMESTAMP_FORMAT),
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate, TimeZone};

    use super::ActivityEntry;

    #[test]
    fn test_entry_line() {
        let moment = Local.with_ymd_and_hms(2024, 5, 1, 9, 0, 6).unwrap();
        let entry = ActivityEntry::new(moment, "Browser open");
        assert_eq!(entry.to_line(), "Wed May  1 09:00:06 2024: Browser open\n");
        assert_eq!(entry.day(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }
}
