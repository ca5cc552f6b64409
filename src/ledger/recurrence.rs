use chrono::{Duration, NaiveDate};

use super::month::{add_months, MonthKey};
use super::transaction::{RecurrenceRule, Transaction};

/// Look-ahead ceiling for recurrences without an end date, counted from the
/// evaluation date. Unbounded rules are projected this far and no further.
pub const PROJECTION_HORIZON_MONTHS: i32 = 24;

/// Computes the signed contribution of one transaction to one target month.
///
/// Returns 0.0 whenever the rule does not fire that month: the transaction is
/// not recurring, its stored rule failed to parse, the month ends before the
/// anchor date, or the month starts after the effective end of the series.
///
/// `monthly`, `quarterly`, and `yearly` are month-granular: an anchor in the
/// middle of a month still counts as a full month. `weekly` is day-granular
/// and contributes once per seven-day occurrence landing inside the month.
pub fn contribution(txn: &Transaction, target: MonthKey, as_of: NaiveDate) -> f64 {
    let Some(rule) = txn.rule() else {
        return 0.0;
    };

    let horizon_end = add_months(as_of, PROJECTION_HORIZON_MONTHS);
    let effective_end = match txn.recurrence_end_date {
        Some(end) => end.min(horizon_end),
        None => horizon_end,
    };

    let month_start = target.start();
    let month_end = target.end();
    if month_end < txn.date || month_start > effective_end {
        return 0.0;
    }

    // Past the span check, the target month is the anchor month or later.
    let start_month = MonthKey::from_date(txn.date);
    match rule {
        RecurrenceRule::Monthly => txn.amount,
        RecurrenceRule::Quarterly => {
            if (target.index() - start_month.index()) % 3 == 0 {
                txn.amount
            } else {
                0.0
            }
        }
        RecurrenceRule::Yearly => {
            if target.month == start_month.month {
                txn.amount
            } else {
                0.0
            }
        }
        RecurrenceRule::Weekly => {
            let hits = weekly_hits(txn.date, month_start, month_end.min(effective_end));
            txn.amount * hits as f64
        }
    }
}

/// Counts dates `anchor + 7k` (k >= 0) inside `[span_start, span_end]`.
fn weekly_hits(anchor: NaiveDate, span_start: NaiveDate, span_end: NaiveDate) -> u32 {
    if span_end < span_start || span_end < anchor {
        return 0;
    }
    let first = if anchor >= span_start {
        anchor
    } else {
        let gap = (span_start - anchor).num_days();
        let steps = gap.div_euclid(7) + if gap.rem_euclid(7) == 0 { 0 } else { 1 };
        anchor + Duration::days(steps * 7)
    };
    if first > span_end {
        return 0;
    }
    ((span_end - first).num_days() / 7) as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    fn monthly_rent() -> Transaction {
        Transaction::new(uuid::Uuid::new_v4(), None, date(2025, 1, 10), -800.0)
            .recurring(RecurrenceRule::Monthly)
    }

    #[test]
    fn mid_month_anchor_counts_as_a_full_month() {
        let txn = monthly_rent();
        let as_of = date(2025, 1, 1);
        assert_eq!(contribution(&txn, month(2025, 1), as_of), -800.0);
        assert_eq!(contribution(&txn, month(2024, 12), as_of), 0.0);
    }

    #[test]
    fn end_date_is_month_granular() {
        let txn = monthly_rent().ending_on(date(2025, 4, 15));
        let as_of = date(2025, 1, 1);
        assert_eq!(contribution(&txn, month(2025, 4), as_of), -800.0);
        assert_eq!(contribution(&txn, month(2025, 5), as_of), 0.0);
    }

    #[test]
    fn non_recurring_contributes_nothing() {
        let txn = Transaction::new(uuid::Uuid::new_v4(), None, date(2025, 1, 10), -800.0);
        assert_eq!(contribution(&txn, month(2025, 1), date(2025, 1, 1)), 0.0);
    }

    #[test]
    fn weekly_hits_respects_span_boundaries() {
        // Fridays of January 2025: 3, 10, 17, 24, 31.
        assert_eq!(weekly_hits(date(2025, 1, 3), date(2025, 1, 1), date(2025, 1, 31)), 5);
        // February picks up from the 7th: 7, 14, 21, 28.
        assert_eq!(weekly_hits(date(2025, 1, 3), date(2025, 2, 1), date(2025, 2, 28)), 4);
        // Anchor after the span.
        assert_eq!(weekly_hits(date(2025, 3, 1), date(2025, 1, 1), date(2025, 1, 31)), 0);
        // Anchor exactly on the span start.
        assert_eq!(weekly_hits(date(2025, 1, 1), date(2025, 1, 1), date(2025, 1, 14)), 2);
    }
}
