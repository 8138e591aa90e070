use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// Opaque identifier for an `Expense`.
///
/// Ids are always assigned by the store. Callers may hold and compare them, but
/// should never try to read meaning into their contents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpenseId(String);

/// A single financial transaction record
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    id: ExpenseId,
    description: String,
    amount: Decimal,
    date: NaiveDate,
}

/// The fields a caller supplies when creating an `Expense`.
///
/// This payload is trusted by the store. Run user input through
/// `ExpenseForm::validate` before handing it over.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseData {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// A partial set of fields to merge over an existing `Expense`.
///
/// `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
}

impl ExpenseId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ExpenseId {
    fn from(id: String) -> Self {
        ExpenseId(id)
    }
}

impl From<&str> for ExpenseId {
    fn from(id: &str) -> Self {
        ExpenseId(id.to_owned())
    }
}

impl Expense {
    pub(crate) fn new(id: ExpenseId, data: ExpenseData) -> Self {
        Expense {
            id,
            description: data.description,
            amount: data.amount,
            date: data.date,
        }
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Merge the supplied fields of `patch` over this record. The id is never
    /// changed.
    pub(crate) fn apply(&mut self, patch: ExpensePatch) {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

impl ExpensePatch {
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.date.is_none()
    }
}

impl From<ExpenseData> for ExpensePatch {
    fn from(data: ExpenseData) -> Self {
        ExpensePatch {
            description: Some(data.description),
            amount: Some(data.amount),
            date: Some(data.date),
        }
    }
}
