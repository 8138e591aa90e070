use crate::{
    expense::{Expense, ExpenseData, ExpenseId, ExpensePatch},
    seed::sample_expenses,
};
use log::{debug, trace, warn};
use std::{collections::HashSet, fmt, rc::Rc};
use thiserror::Error;
use uuid::Uuid;

// The number of times we'll ask an `IdGenerator` for a fresh id before giving up.
// A healthy generator should never need more than one attempt.
const MAX_ID_ATTEMPTS: usize = 16;

/// An immutable view of the collection at a point in time
pub type Snapshot = Rc<[Expense]>;

type Subscriber = Box<dyn Fn(&Snapshot)>;

/// Produces candidate ids for new expenses.
///
/// Candidates don't need to be globally unique; the store discards any candidate
/// it has issued before. They do need to make progress, otherwise `add` fails
/// with `StoreError::IdCollision`.
pub trait IdGenerator {
    fn next_id(&mut self) -> ExpenseId;
}

/// Random UUID (v4) ids. This is the default generator.
#[derive(Debug, Default)]
pub struct UuidGenerator;

/// Monotonic ids of the form `{prefix}{n}`, starting at 1
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

/// Handle returned by `ExpenseStore::subscribe`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("no expense exists with id '{0}'")]
    NotFound(ExpenseId),
    #[error("could not generate a unique expense id after {0} attempts")]
    IdCollision(usize),
}

/// A mutation of the expense collection
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add(Expense),
    Update(ExpenseId, ExpensePatch),
    Delete(ExpenseId),
}

/// The sole owner of the in-memory expense collection.
///
/// Every successful mutation replaces the collection with a new `Snapshot` and
/// hands it to each subscriber. Snapshots that were handed out earlier are never
/// modified.
pub struct ExpenseStore {
    expenses: Snapshot,
    issued: HashSet<ExpenseId>,
    ids: Box<dyn IdGenerator>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> ExpenseId {
        Uuid::new_v4().to_string().into()
    }
}

impl SequentialIds {
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ExpenseId {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id.into()
    }
}

/// Applies `action` to `state`, returning the new collection.
///
/// Fails if the action targets an id that isn't in `state`. New records are
/// prepended; updates and deletes leave the order of every other record alone.
pub fn reduce(state: &[Expense], action: Action) -> Result<Vec<Expense>, StoreError> {
    match action {
        Action::Add(expense) => {
            let mut next = Vec::with_capacity(state.len() + 1);
            next.push(expense);
            next.extend_from_slice(state);
            Ok(next)
        }
        Action::Update(id, patch) => {
            let index = position(state, &id)?;
            let mut next = state.to_vec();
            next[index].apply(patch);
            Ok(next)
        }
        Action::Delete(id) => {
            let index = position(state, &id)?;
            let mut next = state.to_vec();
            next.remove(index);
            Ok(next)
        }
    }
}

fn position(state: &[Expense], id: &ExpenseId) -> Result<usize, StoreError> {
    state
        .iter()
        .position(|e| e.id() == id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))
}

impl ExpenseStore {
    /// Create a store seeded with the sample expenses
    pub fn new() -> Self {
        Self::empty().with_expenses(sample_expenses())
    }

    /// Create a store with no expenses
    pub fn empty() -> Self {
        ExpenseStore {
            expenses: Rc::from(Vec::new()),
            issued: HashSet::new(),
            ids: Box::new(UuidGenerator),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replace the collection with `expenses`.
    ///
    /// Records with an id that is already present are dropped, keeping the first.
    pub fn with_expenses(mut self, expenses: Vec<Expense>) -> Self {
        let mut seen = HashSet::new();
        let expenses: Vec<Expense> = expenses
            .into_iter()
            .filter(|e| {
                let fresh = seen.insert(e.id().clone());
                if !fresh {
                    warn!("dropping duplicate expense id '{}'", e.id());
                }
                fresh
            })
            .collect();

        self.issued.extend(seen);
        self.expenses = expenses.into();
        self
    }

    pub fn with_id_generator<G: IdGenerator + 'static>(mut self, ids: G) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// The current collection, most recently added first
    pub fn list(&self) -> &[Expense] {
        &self.expenses
    }

    /// A shared handle to the current collection that outlives later mutations
    pub fn snapshot(&self) -> Snapshot {
        Rc::clone(&self.expenses)
    }

    pub fn find(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Create a new expense at the front of the collection and return its id
    pub fn add(&mut self, data: ExpenseData) -> Result<ExpenseId, StoreError> {
        let id = self.issue_id()?;
        debug!("adding expense '{}'", id);

        self.dispatch(Action::Add(Expense::new(id.clone(), data)))?;
        Ok(id)
    }

    /// Merge `patch` over the expense identified by `id`
    pub fn update<P: Into<ExpensePatch>>(
        &mut self,
        id: &ExpenseId,
        patch: P,
    ) -> Result<(), StoreError> {
        debug!("updating expense '{}'", id);
        self.dispatch(Action::Update(id.clone(), patch.into()))
    }

    /// Remove the expense identified by `id`, returning the removed record
    pub fn delete(&mut self, id: &ExpenseId) -> Result<Expense, StoreError> {
        debug!("deleting expense '{}'", id);
        let removed = self
            .find(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        self.dispatch(Action::Delete(id.clone()))?;
        Ok(removed)
    }

    /// Register `f` to receive every snapshot published after a mutation
    pub fn subscribe<F>(&mut self, f: F) -> SubscriptionId
    where
        F: Fn(&Snapshot) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Returns whether a subscriber was removed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(s, _)| *s != id);
        self.subscribers.len() != before
    }

    fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
        let next = reduce(&self.expenses, action).map_err(|e| {
            warn!("{}", e);
            e
        })?;

        self.expenses = next.into();
        self.publish();
        Ok(())
    }

    fn publish(&self) {
        trace!(
            "publishing {} expenses to {} subscribers",
            self.expenses.len(),
            self.subscribers.len()
        );
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.expenses);
        }
    }

    fn issue_id(&mut self) -> Result<ExpenseId, StoreError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if self.issued.insert(id.clone()) {
                return Ok(id);
            }
            trace!("discarding previously issued id '{}'", id);
        }

        Err(StoreError::IdCollision(MAX_ID_ATTEMPTS))
    }
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExpenseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpenseStore")
            .field("expenses", &self.expenses)
            .field("issued", &self.issued.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
