use chrono::NaiveDate;
use treasury_core::ledger::{
    contribution, MonthKey, MonthWindow, RecurrenceRule, Transaction, PROJECTION_HORIZON_MONTHS,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn month(y: i32, m: u32) -> MonthKey {
    MonthKey::new(y, m).unwrap()
}

#[test]
fn monthly_without_end_runs_to_the_horizon() {
    let txn = Transaction::new(Uuid::new_v4(), None, date(2025, 3, 10), -100.0)
        .recurring(RecurrenceRule::Monthly);
    let as_of = date(2025, 3, 15);

    assert_eq!(contribution(&txn, month(2025, 2), as_of), 0.0);

    let start = month(2025, 3);
    for step in 0..=PROJECTION_HORIZON_MONTHS {
        let target = start.plus(step);
        assert_eq!(
            contribution(&txn, target, as_of),
            -100.0,
            "expected a hit in {}",
            target
        );
    }

    // One month past the 24-month cap.
    assert_eq!(contribution(&txn, month(2027, 4), as_of), 0.0);
}

#[test]
fn quarterly_from_march_fires_every_third_month() {
    let txn = Transaction::new(Uuid::new_v4(), None, date(2025, 3, 5), -300.0)
        .recurring(RecurrenceRule::Quarterly);
    let as_of = date(2025, 3, 1);

    for (y, m) in [(2025, 3), (2025, 6), (2025, 9), (2025, 12), (2026, 3)] {
        assert_eq!(contribution(&txn, month(y, m), as_of), -300.0, "{}-{}", y, m);
    }
    for (y, m) in [(2025, 1), (2025, 4), (2025, 5), (2025, 7), (2026, 2)] {
        assert_eq!(contribution(&txn, month(y, m), as_of), 0.0, "{}-{}", y, m);
    }
}

#[test]
fn yearly_fires_in_the_anchor_calendar_month_only() {
    let txn = Transaction::new(Uuid::new_v4(), None, date(2024, 6, 15), 1200.0)
        .recurring(RecurrenceRule::Yearly);
    let as_of = date(2024, 6, 1);

    assert_eq!(contribution(&txn, month(2024, 6), as_of), 1200.0);
    assert_eq!(contribution(&txn, month(2025, 6), as_of), 1200.0);
    assert_eq!(contribution(&txn, month(2026, 6), as_of), 1200.0);

    assert_eq!(contribution(&txn, month(2023, 6), as_of), 0.0);
    assert_eq!(contribution(&txn, month(2024, 5), as_of), 0.0);
    assert_eq!(contribution(&txn, month(2024, 7), as_of), 0.0);
    assert_eq!(contribution(&txn, month(2025, 12), as_of), 0.0);
}

#[test]
fn weekly_counts_four_or_five_hits_depending_on_alignment() {
    // Anchored on Friday 2025-01-03: five Fridays in January, four in February.
    let txn = Transaction::new(Uuid::new_v4(), None, date(2025, 1, 3), -10.0)
        .recurring(RecurrenceRule::Weekly);
    let as_of = date(2025, 1, 1);

    assert_eq!(contribution(&txn, month(2025, 1), as_of), -50.0);
    assert_eq!(contribution(&txn, month(2025, 2), as_of), -40.0);
    // A mid-month anchor only counts the remaining weeks.
    let late = Transaction::new(Uuid::new_v4(), None, date(2025, 1, 20), -10.0)
        .recurring(RecurrenceRule::Weekly);
    assert_eq!(contribution(&late, month(2025, 1), as_of), -20.0);
}

#[test]
fn weekly_stops_at_the_recurrence_end_date() {
    let txn = Transaction::new(Uuid::new_v4(), None, date(2025, 1, 3), -10.0)
        .recurring(RecurrenceRule::Weekly)
        .ending_on(date(2025, 1, 17));
    let as_of = date(2025, 1, 1);

    // Hits on the 3rd, 10th, and 17th; the 24th and 31st are cut off.
    assert_eq!(contribution(&txn, month(2025, 1), as_of), -30.0);
    assert_eq!(contribution(&txn, month(2025, 2), as_of), 0.0);
}

#[test]
fn month_granular_rules_ignore_the_day_of_the_end_date() {
    let txn = Transaction::new(Uuid::new_v4(), None, date(2025, 1, 10), -100.0)
        .recurring(RecurrenceRule::Monthly)
        .ending_on(date(2025, 4, 2));
    let as_of = date(2025, 1, 1);

    // April still counts in full even though the series ends on the 2nd.
    assert_eq!(contribution(&txn, month(2025, 4), as_of), -100.0);
    assert_eq!(contribution(&txn, month(2025, 5), as_of), 0.0);
}

#[test]
fn stored_rule_strings_that_fail_to_parse_project_zero() {
    let json = r#"{
        "id": "0a3f2c61-94bb-4b65-8c1e-d6a04f5a7f10",
        "account_id": "4f2e8d0b-91d1-44a8-b7de-3a7c6d9b2e55",
        "date": "2025-01-10",
        "amount": -75.0,
        "is_recurring": true,
        "recurrence_rule": "every_other_day"
    }"#;
    let txn: Transaction = serde_json::from_str(json).unwrap();
    assert_eq!(contribution(&txn, month(2025, 1), date(2025, 1, 1)), 0.0);
}

#[test]
fn anchored_windows_are_deterministic_and_ordered() {
    let window = MonthWindow::anchored(date(2025, 6, 10), -1, 4).unwrap();
    let keys: Vec<String> = window.iter().map(|m| m.key()).collect();
    assert_eq!(keys, ["2025-05", "2025-06", "2025-07", "2025-08"]);
    assert_eq!(window.first(), month(2025, 5));
    assert_eq!(window.last(), month(2025, 8));

    let past = MonthWindow::anchored(date(2025, 6, 10), -14, 2).unwrap();
    assert_eq!(past.first().key(), "2024-04");
}
