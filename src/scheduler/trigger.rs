//! Wall-clock triggers for the notification jobs

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use std::fmt;

/// When a job fires, in the scheduler's local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Once a day at `hour:minute`
    Daily { hour: u32, minute: u32 },
    /// At minute zero of every hour divisible by `n` (00:00, 06:00, ... for `n = 6`)
    EveryHours(u32),
}

impl Trigger {
    /// First fire time strictly after `now`
    ///
    /// Wall-clock times skipped by a DST jump are not fired that day.
    /// Returns `None` only for an invalid trigger.
    pub fn next_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let today = now.date_naive();

        // Two days always contain the next slot of a valid trigger; the third covers DST gaps
        for offset in 0..3 {
            let date = today.checked_add_days(Days::new(offset))?;
            for (hour, minute) in self.slots() {
                if let Some(candidate) = at(&now.timezone(), date, hour, minute) {
                    if candidate > *now {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }

    /// Next fire time once the slot `last_fired` has run
    ///
    /// Counts from `last_fired` while the clock still reads earlier than that
    /// slot, so a sleep that wakes early cannot fire it twice. Slots that went
    /// by during a long run are skipped rather than replayed.
    pub fn next_run<Tz: TimeZone>(&self, last_fired: Option<&DateTime<Tz>>, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match last_fired {
            Some(fired) if fired > now => self.next_after(fired),
            _ => self.next_after(now),
        }
    }

    fn slots(&self) -> Vec<(u32, u32)> {
        match *self {
            Trigger::Daily { hour, minute } if hour < 24 && minute < 60 => vec![(hour, minute)],
            Trigger::EveryHours(n) if (1..=24).contains(&n) => (0..24).step_by(n as usize).map(|hour| (hour, 0)).collect(),
            _ => Vec::new(),
        }
    }
}

fn at<Tz: TimeZone>(tz: &Tz, date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Tz>> {
    let naive = date.and_hms_opt(hour, minute, 0)?;
    tz.from_local_datetime(&naive).earliest()
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Daily { hour, minute } => write!(f, "daily at {:02}:{:02}", hour, minute),
            Trigger::EveryHours(n) => write!(f, "every {} hours", n),
        }
    }
}
