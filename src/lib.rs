mod expense;
mod form;
mod manage;
mod seed;
mod store;
mod summary;

pub use expense::{Expense, ExpenseData, ExpenseId, ExpensePatch};
pub use form::{ExpenseForm, Field, FieldValidity, InvalidInput, DATE_FORMAT};
pub use manage::{ManageError, ManageExpense};
pub use seed::sample_expenses;
pub use store::{
    reduce, Action, ExpenseStore, IdGenerator, SequentialIds, Snapshot, StoreError,
    SubscriptionId, UuidGenerator,
};
pub use summary::{total, ExpensesPeriod, RECENT_WINDOW_DAYS};
