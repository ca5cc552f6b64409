use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{Book, Transaction};

/// Note text written by the app when it records an internal transfer pair.
pub const TRANSFER_NOTE_EXACT: &str = "Virement interne";
/// Case-insensitive note prefix that also marks a leg as transfer-like.
pub const TRANSFER_NOTE_PREFIX: &str = "virement";
/// Label shown when the counterpart leg of a transfer cannot be found.
pub const FALLBACK_ACCOUNT_LABEL: &str = "Compte";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferDirection {
    In,
    Out,
}

/// Transfer annotation attached to a history entry. An unmatched leg keeps
/// `counterpart_account` empty and carries the fallback label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferLeg {
    pub direction: TransferDirection,
    pub counterpart_account: Option<Uuid>,
    pub counterpart_label: String,
}

/// One transaction of an account's history, date-ordered, with transfer-like
/// entries annotated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub transaction_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub category_id: Option<Uuid>,
    pub note: Option<String>,
    pub transfer: Option<TransferLeg>,
}

/// A transaction reads as a transfer leg when it has no category and its note
/// is the exact transfer marker or starts with the marker token.
pub fn is_transfer_like(txn: &Transaction) -> bool {
    if txn.category_id.is_some() {
        return false;
    }
    match txn.note.as_deref() {
        Some(note) => {
            note == TRANSFER_NOTE_EXACT
                || note.to_lowercase().starts_with(TRANSFER_NOTE_PREFIX)
        }
        None => false,
    }
}

/// Builds the date-ordered history of one account, reconciling transfer legs
/// against the other accounts.
///
/// A leg pairs with a transfer-like transaction on a different account with
/// the same date and exactly the negated amount; each candidate is consumed
/// at most once so one stray transaction cannot pair with several legs.
/// Unmatched legs are still reported with the fallback account label rather
/// than dropped.
pub fn account_history(book: &Book, account_id: Uuid) -> Vec<HistoryEntry> {
    let mut own: Vec<&Transaction> = book
        .transactions
        .iter()
        .filter(|txn| txn.account_id == account_id)
        .collect();
    own.sort_by_key(|txn| (txn.date, txn.id));

    let candidates: Vec<&Transaction> = book
        .transactions
        .iter()
        .filter(|txn| txn.account_id != account_id && is_transfer_like(txn))
        .collect();
    let mut consumed: HashSet<Uuid> = HashSet::new();

    own.iter()
        .map(|txn| {
            let transfer = if is_transfer_like(txn) {
                Some(pair_leg(book, txn, &candidates, &mut consumed))
            } else {
                None
            };
            HistoryEntry {
                transaction_id: txn.id,
                date: txn.date,
                amount: txn.amount,
                category_id: txn.category_id,
                note: txn.note.clone(),
                transfer,
            }
        })
        .collect()
}

fn pair_leg(
    book: &Book,
    leg: &Transaction,
    candidates: &[&Transaction],
    consumed: &mut HashSet<Uuid>,
) -> TransferLeg {
    let direction = if leg.amount > 0.0 {
        TransferDirection::In
    } else {
        TransferDirection::Out
    };

    let counterpart = candidates.iter().find(|candidate| {
        candidate.date == leg.date
            && candidate.amount == -leg.amount
            && !consumed.contains(&candidate.id)
    });

    match counterpart {
        Some(candidate) => {
            consumed.insert(candidate.id);
            let label = book
                .account(candidate.account_id)
                .map(|account| account.name.clone())
                .unwrap_or_else(|| FALLBACK_ACCOUNT_LABEL.to_string());
            TransferLeg {
                direction,
                counterpart_account: Some(candidate.account_id),
                counterpart_label: label,
            }
        }
        None => TransferLeg {
            direction,
            counterpart_account: None,
            counterpart_label: FALLBACK_ACCOUNT_LABEL.to_string(),
        },
    }
}
