use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// How a recurring transaction repeats across months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceRule {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl RecurrenceRule {
    /// Parses a stored rule string. Unknown values yield `None` so that a
    /// partially-invalid dataset degrades to zero contribution instead of
    /// failing a read.
    pub fn parse(raw: &str) -> Option<RecurrenceRule> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "weekly" => Some(RecurrenceRule::Weekly),
            "monthly" => Some(RecurrenceRule::Monthly),
            "quarterly" => Some(RecurrenceRule::Quarterly),
            "yearly" => Some(RecurrenceRule::Yearly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecurrenceRule::Weekly => "Hebdomadaire",
            RecurrenceRule::Monthly => "Mensuel",
            RecurrenceRule::Quarterly => "Trimestriel",
            RecurrenceRule::Yearly => "Annuel",
        }
    }
}

fn lenient_rule<'de, D>(deserializer: D) -> Result<Option<RecurrenceRule>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(RecurrenceRule::parse))
}

/// A stored transaction. Positive amounts are income, negative are expenses.
///
/// For recurring entries `date` anchors the first occurrence, which is not
/// necessarily inside any window being viewed. Recurrence fields are only
/// meaningful while `is_recurring` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub project_id: Option<Uuid>,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, deserialize_with = "lenient_rule")]
    pub recurrence_rule: Option<RecurrenceRule>,
    #[serde(default)]
    pub recurrence_end_date: Option<NaiveDate>,
}

impl Transaction {
    pub fn new(
        account_id: Uuid,
        category_id: Option<Uuid>,
        date: NaiveDate,
        amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            category_id,
            project_id: None,
            date,
            amount,
            note: None,
            is_recurring: false,
            recurrence_rule: None,
            recurrence_end_date: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_project(mut self, project_id: Uuid) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn recurring(mut self, rule: RecurrenceRule) -> Self {
        self.is_recurring = true;
        self.recurrence_rule = Some(rule);
        self
    }

    pub fn ending_on(mut self, end: NaiveDate) -> Self {
        self.recurrence_end_date = Some(end);
        self
    }

    /// The effective recurrence rule, gated on the `is_recurring` flag.
    pub fn rule(&self) -> Option<RecurrenceRule> {
        if self.is_recurring {
            self.recurrence_rule
        } else {
            None
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_rule_strings_deserialize_to_none() {
        let json = r#"{
            "id": "b5c7a86e-4b0e-4fbe-9c93-6a08ac49a3db",
            "account_id": "e2f9a1c4-7d35-49f5-8d34-1f25b7e3a90c",
            "date": "2025-01-10",
            "amount": -42.5,
            "is_recurring": true,
            "recurrence_rule": "biweekly"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert!(txn.is_recurring);
        assert_eq!(txn.recurrence_rule, None);
        assert_eq!(txn.rule(), None);
    }

    #[test]
    fn rule_is_gated_on_the_recurring_flag() {
        let account = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let mut txn = Transaction::new(account, None, date, -42.5);
        txn.recurrence_rule = Some(RecurrenceRule::Monthly);
        assert_eq!(txn.rule(), None);

        let txn = Transaction::new(account, None, date, -42.5).recurring(RecurrenceRule::Monthly);
        assert_eq!(txn.rule(), Some(RecurrenceRule::Monthly));
    }

    #[test]
    fn rule_parsing_ignores_case_and_padding() {
        assert_eq!(RecurrenceRule::parse(" Monthly "), Some(RecurrenceRule::Monthly));
        assert_eq!(RecurrenceRule::parse("YEARLY"), Some(RecurrenceRule::Yearly));
        assert_eq!(RecurrenceRule::parse("fortnightly"), None);
    }
}
