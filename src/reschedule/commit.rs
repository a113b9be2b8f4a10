use chrono::NaiveDate;
use thiserror::Error;

use crate::model::ProjectRange;

/// Receiver of finalized reschedules.
///
/// Dates are `YYYY-MM-DD` strings. The call is fire-and-forget: whatever the
/// receiver does with the change (persisting, re-rendering) is not observed by
/// the rescheduler.
pub trait TaskDatesSink {
    fn on_task_dates_change(&mut self, task_id: &str, new_start: &str, new_due: &str);
}

impl<F> TaskDatesSink for F
where
    F: FnMut(&str, &str, &str),
{
    fn on_task_dates_change(&mut self, task_id: &str, new_start: &str, new_due: &str) {
        self(task_id, new_start, new_due)
    }
}

/// A committed date change, as recorded by [`CollectedChanges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateChange {
    pub task_id: String,
    pub start: String,
    pub due: String,
}

/// Sink that queues changes for the owner to apply after the frame.
#[derive(Debug, Default)]
pub struct CollectedChanges(pub Vec<DateChange>);

impl TaskDatesSink for CollectedChanges {
    fn on_task_dates_change(&mut self, task_id: &str, new_start: &str, new_due: &str) {
        self.0.push(DateChange {
            task_id: task_id.to_string(),
            start: new_start.to_string(),
            due: new_due.to_string(),
        });
    }
}

/// Why a proposed reschedule was not committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommitRejection {
    #[error("start {start} precedes project start {range_start}")]
    StartBeforeRange { start: NaiveDate, range_start: NaiveDate },

    #[error("due {due} exceeds project due {range_due}")]
    DueAfterRange { due: NaiveDate, range_due: NaiveDate },

    #[error("start {start} is after due {due}")]
    Inverted { start: NaiveDate, due: NaiveDate },
}

/// Final check before handing a proposal to the sink.
pub fn validate_proposal(range: &ProjectRange, start: NaiveDate, due: NaiveDate) -> Result<(), CommitRejection> {
    if start < range.start() {
        return Err(CommitRejection::StartBeforeRange {
            start,
            range_start: range.start(),
        });
    }
    if due > range.due() {
        return Err(CommitRejection::DueAfterRange {
            due,
            range_due: range.due(),
        });
    }
    if start > due {
        return Err(CommitRejection::Inverted { start, due });
    }
    Ok(())
}

/// What `release` did with the gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// No session was active.
    NoSession,
    /// The sink was called with these dates.
    Committed(DateChange),
    /// The proposal failed validation and was dropped.
    Discarded(CommitRejection),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dates::parse_day;

    fn d(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn range() -> ProjectRange {
        ProjectRange::parse("2024-01-01", "2024-01-31").unwrap()
    }

    #[test]
    fn accepts_dates_on_the_boundaries() {
        assert_eq!(validate_proposal(&range(), d("2024-01-01"), d("2024-01-31")), Ok(()));
        assert_eq!(validate_proposal(&range(), d("2024-01-10"), d("2024-01-10")), Ok(()));
    }

    #[test]
    fn rejects_each_violation() {
        let r = range();
        assert!(matches!(
            validate_proposal(&r, d("2023-12-31"), d("2024-01-05")),
            Err(CommitRejection::StartBeforeRange { .. })
        ));
        assert!(matches!(
            validate_proposal(&r, d("2024-01-05"), d("2024-02-01")),
            Err(CommitRejection::DueAfterRange { .. })
        ));
        assert!(matches!(
            validate_proposal(&r, d("2024-01-06"), d("2024-01-05")),
            Err(CommitRejection::Inverted { .. })
        ));
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |id: &str, s: &str, e: &str| seen.push(format!("{id} {s} {e}"));
            sink.on_task_dates_change("t1", "2024-01-02", "2024-01-03");
        }
        assert_eq!(seen, vec!["t1 2024-01-02 2024-01-03".to_string()]);
    }
}
