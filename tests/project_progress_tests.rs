use chrono::NaiveDate;
use treasury_core::ledger::{Account, Book, MonthWindow, Project, RecurrenceRule, Transaction};
use treasury_core::plan::project_progress;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn saved_counts_literal_allocations_up_to_the_evaluation_date() {
    let mut book = Book::new("Projets");
    let account = book.add_account(Account::new("Compte courant"));
    let vacances = book.add_project(Project::new("Vacances").with_target(1500.0));

    book.add_transaction(
        Transaction::new(account, None, date(2025, 1, 15), 300.0).with_project(vacances),
    );
    book.add_transaction(
        Transaction::new(account, None, date(2025, 2, 15), 150.0).with_project(vacances),
    );
    // Later than the evaluation date; not yet saved.
    book.add_transaction(
        Transaction::new(account, None, date(2025, 5, 15), 500.0).with_project(vacances),
    );

    let window = MonthWindow::anchored(date(2025, 1, 1), 0, 3).unwrap();
    let progress = project_progress(&book, &window, date(2025, 3, 1));
    assert_eq!(progress.len(), 1);

    let vacances = &progress[0];
    assert_eq!(vacances.saved, 450.0);
    assert_eq!(vacances.percent, Some(30.0));
    assert_eq!(vacances.projected, vec![300.0, 150.0, 0.0]);
}

#[test]
fn recurring_allocations_project_into_the_window() {
    let mut book = Book::new("Projets");
    let account = book.add_account(Account::new("Compte courant"));
    let voiture = book.add_project(Project::new("Voiture"));

    book.add_transaction(
        Transaction::new(account, None, date(2025, 1, 10), 200.0)
            .with_project(voiture)
            .recurring(RecurrenceRule::Monthly),
    );

    let window = MonthWindow::anchored(date(2025, 1, 1), 0, 4).unwrap();
    let progress = project_progress(&book, &window, date(2025, 1, 1));

    let voiture = &progress[0];
    assert_eq!(voiture.projected, vec![200.0, 200.0, 200.0, 200.0]);
    // Recurring templates do not count as already-saved money.
    assert_eq!(voiture.saved, 0.0);
    assert_eq!(voiture.percent, None);
}

#[test]
fn a_project_without_transactions_reports_flat_zeroes() {
    let mut book = Book::new("Projets");
    book.add_project(Project::new("Travaux").with_target(0.0));

    let window = MonthWindow::anchored(date(2025, 1, 1), 0, 2).unwrap();
    let progress = project_progress(&book, &window, date(2025, 1, 1));

    let travaux = &progress[0];
    assert_eq!(travaux.saved, 0.0);
    assert_eq!(travaux.projected, vec![0.0, 0.0]);
    // A zero target cannot produce a meaningful percentage.
    assert_eq!(travaux.percent, None);
}
