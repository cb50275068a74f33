//! Parsing of command-line argument tokens.
//!
//! Commands hand over raw tokens; these helpers turn them into typed values
//! or `None`, leaving the rejection message to the command layer. Priority
//! tokens are parsed by [`Priority::from_token`](crate::Priority::from_token).

use chrono::NaiveDate;

use crate::model::task::TaskId;

/// Parse an ISO `YYYY-MM-DD` date. Calendar validity is enforced, so
/// `2023-02-29` is rejected along with malformed input.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Parse a task id token: a positive decimal number.
pub fn parse_task_id(input: &str) -> Option<TaskId> {
    let n: u32 = input.parse().ok()?;
    (n > 0).then_some(TaskId(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dates_must_be_real_calendar_days() {
        assert_eq!(
            parse_date("2023-07-01"),
            NaiveDate::from_ymd_opt(2023, 7, 1)
        );
        assert_eq!(parse_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("2023-13-01"), None);
        assert_eq!(parse_date("not-a-date"), None);
    }

    #[test]
    fn task_ids_are_positive_integers() {
        assert_eq!(parse_task_id("1"), Some(TaskId(1)));
        assert_eq!(parse_task_id("42"), Some(TaskId(42)));
        assert_eq!(parse_task_id("0"), None);
        assert_eq!(parse_task_id("-1"), None);
        assert_eq!(parse_task_id("one"), None);
    }
}
