use crate::{
    expense::{Expense, ExpenseId},
    form::{ExpenseForm, InvalidInput},
    store::{ExpenseStore, StoreError},
};
use log::debug;
use thiserror::Error;

/// An add-or-edit session against the store.
///
/// When `editing` is set, confirming the form updates that expense and the session
/// may delete it. Otherwise confirming adds a new expense.
pub struct ManageExpense<'a> {
    store: &'a mut ExpenseStore,
    editing: Option<ExpenseId>,
}

#[derive(Error, Debug, PartialEq)]
pub enum ManageError {
    #[error(transparent)]
    Invalid(#[from] InvalidInput),
    #[error("could not save expense")]
    Store(#[from] StoreError),
    #[error("only an existing expense can be deleted")]
    NotEditing,
}

impl<'a> ManageExpense<'a> {
    pub fn new(store: &'a mut ExpenseStore, editing: Option<ExpenseId>) -> Self {
        ManageExpense { store, editing }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Expense"
        } else {
            "Add Expense"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update"
        } else {
            "Add"
        }
    }

    /// The expense being edited, if it still exists
    pub fn edited(&self) -> Option<&Expense> {
        self.editing.as_ref().and_then(|id| self.store.find(id))
    }

    /// The form to show when the session opens
    pub fn initial_form(&self) -> ExpenseForm {
        self.edited()
            .map(ExpenseForm::from_expense)
            .unwrap_or_default()
    }

    /// Validate `form` and, if it passes, save it. Returns the id of the saved expense.
    ///
    /// Nothing reaches the store when validation fails.
    pub fn confirm(&mut self, form: &ExpenseForm) -> Result<ExpenseId, ManageError> {
        let data = form.submit()?;

        match &self.editing {
            Some(id) => {
                debug!("confirming edit of '{}'", id);
                self.store.update(id, data)?;
                Ok(id.clone())
            }
            None => Ok(self.store.add(data)?),
        }
    }

    pub fn delete(&mut self) -> Result<Expense, ManageError> {
        let id = self.editing.as_ref().ok_or(ManageError::NotEditing)?;
        Ok(self.store.delete(id)?)
    }
}
