use crate::expense::Expense;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

/// The trailing window of the "recent" view, in days
pub const RECENT_WINDOW_DAYS: u32 = 7;

/// The period an expense summary covers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpensesPeriod {
    Recent { days: u32 },
    Total,
}

impl ExpensesPeriod {
    pub fn recent() -> Self {
        ExpensesPeriod::Recent {
            days: RECENT_WINDOW_DAYS,
        }
    }

    pub fn label(&self) -> String {
        match *self {
            ExpensesPeriod::Recent { days } => format!("Last {} Days", days),
            ExpensesPeriod::Total => "Total".into(),
        }
    }

    /// Returns the expenses in this period, keeping their order.
    ///
    /// A recent period includes any expense dated after `today` minus the window,
    /// including expenses dated in the future.
    pub fn filter<'a>(&self, expenses: &'a [Expense], today: NaiveDate) -> Vec<&'a Expense> {
        match *self {
            ExpensesPeriod::Recent { days } => {
                // A window reaching past the earliest representable date has no
                // lower bound
                match today.checked_sub_signed(Duration::days(days.into())) {
                    Some(cutoff) => expenses.iter().filter(|e| e.date() > cutoff).collect(),
                    None => expenses.iter().collect(),
                }
            }
            ExpensesPeriod::Total => expenses.iter().collect(),
        }
    }

    /// As for `filter`, measured from the current UTC date
    pub fn filter_now<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        self.filter(expenses, Utc::now().date_naive())
    }
}

/// The sum of every expense's amount
pub fn total(expenses: &[&Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount()).sum()
}
