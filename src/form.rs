use crate::expense::{Expense, ExpenseData};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// The format dates are entered and displayed in
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// The length of a date in `DATE_FORMAT`
const DATE_LENGTH: usize = 10;

const INVALID_TITLE: &str = "Invalid input";
const INVALID_MESSAGE: &str = "Please check the errors in the form.";

/// Identifies one of the form's inputs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Amount,
    Date,
    Description,
}

/// The draft values of an expense form, exactly as entered
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    amount: String,
    date: String,
    description: String,
}

/// Per-field validity after a failed submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldValidity {
    pub amount: bool,
    pub date: bool,
    pub description: bool,
}

#[derive(Error, Debug, PartialEq)]
#[error("{}: {}", INVALID_TITLE, INVALID_MESSAGE)]
pub struct InvalidInput {
    fields: FieldValidity,
}

impl ExpenseForm {
    /// Create a form pre-filled from an existing expense, for editing
    pub fn from_expense(expense: &Expense) -> Self {
        ExpenseForm {
            amount: expense.amount().to_string(),
            date: expense.date().format(DATE_FORMAT).to_string(),
            description: expense.description().to_owned(),
        }
    }

    pub fn with<S: Into<String>>(mut self, field: Field, value: S) -> Self {
        self.set(field, value);
        self
    }

    pub fn set<S: Into<String>>(&mut self, field: Field, value: S) {
        let value = value.into();
        match field {
            Field::Amount => self.amount = value,
            Field::Date => self.date = value,
            Field::Description => self.description = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Amount => &self.amount,
            Field::Date => &self.date,
            Field::Description => &self.description,
        }
    }

    /// Check every field, returning the parsed expense only if all of them pass.
    ///
    /// The description is kept as entered; only its trimmed form must be non-empty.
    pub fn validate(&self) -> Result<ExpenseData, InvalidInput> {
        let amount = parse_amount(&self.amount);
        let date = parse_date(&self.date);
        let description_valid = !self.description.trim().is_empty();

        match (amount, date) {
            (Some(amount), Some(date)) if description_valid => Ok(ExpenseData {
                description: self.description.clone(),
                amount,
                date,
            }),
            (amount, date) => {
                let fields = FieldValidity {
                    amount: amount.is_some(),
                    date: date.is_some(),
                    description: description_valid,
                };
                debug!("rejecting expense form: {:?}", fields);
                Err(InvalidInput { fields })
            }
        }
    }

    /// Submit the form, yielding the expense to save.
    ///
    /// Callers must not touch the store when this fails; show the per-field flags
    /// and the aggregate message instead.
    pub fn submit(&self) -> Result<ExpenseData, InvalidInput> {
        let data = self.validate()?;
        debug!("submitting expense form for '{}'", data.description.trim());
        Ok(data)
    }
}

impl InvalidInput {
    pub fn fields(&self) -> FieldValidity {
        self.fields
    }

    pub fn is_valid(&self, field: Field) -> bool {
        match field {
            Field::Amount => self.fields.amount,
            Field::Date => self.fields.date,
            Field::Description => self.fields.description,
        }
    }

    pub fn title(&self) -> &'static str {
        INVALID_TITLE
    }

    pub fn message(&self) -> &'static str {
        INVALID_MESSAGE
    }
}

// A valid amount is any decimal number strictly greater than zero. `Decimal`'s
// parser skips `_` separators, so the character set is checked first.
fn parse_amount(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }

    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
}

// Exactly `YYYY-MM-DD`; chrono alone would also accept unpadded months and days
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != DATE_LENGTH {
        return None;
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form(amount: &str, date: &str, description: &str) -> ExpenseForm {
        ExpenseForm::default()
            .with(Field::Amount, amount)
            .with(Field::Date, date)
            .with(Field::Description, description)
    }

    #[test]
    fn validate_accepts() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(
            form("12.50", "2023-05-01", "Coffee").validate(),
            Ok(ExpenseData {
                description: "Coffee".into(),
                amount: dec!(12.50),
                date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            })
        );
    }

    #[test]
    fn validate_trims_amount_and_date() {
        let data = form(" 7 ", " 2023-05-01 ", "Lunch").validate().unwrap();
        assert_eq!(data.amount, dec!(7));
        assert_eq!(data.date, NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
    }

    #[test]
    fn validate_rejects_amount() {
        for amount in &["0", "-5", "abc", "", "12.5.0", "1__", "1_000", "0x10"] {
            let err = form(amount, "2023-05-01", "Coffee").validate().unwrap_err();
            assert_eq!(
                err.fields(),
                FieldValidity {
                    amount: false,
                    date: true,
                    description: true,
                },
                "amount {:?}",
                amount
            );
        }
    }

    #[test]
    fn validate_rejects_date() {
        let dates = [
            "not-a-date",
            "2023-02-30",
            "2023-13-01",
            "",
            "2023-5-1",
            "2023-05-1",
        ];
        for date in &dates {
            let err = form("12.50", date, "Coffee").validate().unwrap_err();
            assert!(!err.is_valid(Field::Date), "date {:?}", date);
            assert!(err.is_valid(Field::Amount));
        }
    }

    #[test]
    fn validate_rejects_description() {
        for description in &["", "   ", "\n\t"] {
            let err = form("12.50", "2023-05-01", description)
                .validate()
                .unwrap_err();
            assert!(!err.is_valid(Field::Description));
        }
    }

    #[test]
    fn validate_accepts_scientific_amount() {
        let data = form("1e3", "2023-05-01", "Rent").validate().unwrap();
        assert_eq!(data.amount, dec!(1000));
    }

    #[test]
    fn submit_matches_validate() {
        let valid = form("12.50", "2023-05-01", "Coffee");
        assert_eq!(valid.submit(), valid.validate());

        let invalid = form("1_000", "2023-5-1", "Coffee");
        let err = invalid.submit().unwrap_err();
        assert!(!err.is_valid(Field::Amount));
        assert!(!err.is_valid(Field::Date));
        assert!(err.is_valid(Field::Description));
    }

    #[test]
    fn validate_reports_all_fields() {
        let err = ExpenseForm::default().validate().unwrap_err();
        assert_eq!(
            err.fields(),
            FieldValidity {
                amount: false,
                date: false,
                description: false,
            }
        );
        assert_eq!(err.title(), "Invalid input");
        assert_eq!(err.message(), "Please check the errors in the form.");
        assert_eq!(
            err.to_string(),
            "Invalid input: Please check the errors in the form."
        );
    }

    #[test]
    fn from_expense_prefills() {
        let expense = Expense::new(
            "e1".into(),
            ExpenseData {
                description: "A pair of shoes".into(),
                amount: dec!(59.99),
                date: NaiveDate::from_ymd_opt(2021, 12, 19).unwrap(),
            },
        );
        let form = ExpenseForm::from_expense(&expense);

        assert_eq!(form.get(Field::Amount), "59.99");
        assert_eq!(form.get(Field::Date), "2021-12-19");
        assert_eq!(form.get(Field::Description), "A pair of shoes");
        assert_eq!(form.validate().unwrap().amount, dec!(59.99));
    }
}
