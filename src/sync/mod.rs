use std::sync::Arc;

use crate::accounts::data::OwnerID;
use crate::data::Validate;
use crate::error::{StoreError, StoreResult};
use crate::events::{ChangeBus, Subscription, Table};

pub mod store;

pub use store::DirectStore;

pub type RecordID = i64;

/// Entities whose completion flag can be toggled from a view.
pub trait Completable {
    fn completed(&self) -> bool;
    fn set_completed(&mut self, completed: bool);
}

/// Scoped operations a view issues against the record store. Every call is
/// implicitly filtered by the owner identity.
pub trait RecordStore<R> {
    type Filter;
    type Draft: Validate;

    fn fetch(&self, owner: &OwnerID, filter: &Self::Filter) -> StoreResult<Vec<(RecordID, R)>>;
    fn insert(&self, owner: &OwnerID, draft: &Self::Draft) -> StoreResult<RecordID>;
}

/// Stores backing completable entities. Time blocks carry no completion
/// flag and stop at [`RecordStore`].
pub trait CompletionStore<R>: RecordStore<R> {
    fn set_completed(&self, owner: &OwnerID, id: RecordID, completed: bool) -> StoreResult<()>;
}

#[derive(Debug)]
pub enum ViewState<R> {
    Uninitialized,
    Loading,
    Ready(Vec<(RecordID, R)>),
}

/// Proof that a load was begun. `complete_load` only applies a result whose
/// ticket is still current; anything superseded by a newer load or by
/// teardown is discarded.
#[derive(Debug, Clone, Copy)]
pub struct LoadTicket {
    generation: u64,
}

/// Per-view state container for one entity list. Holds the local ordered
/// list, applies optimistic mutations, reverts them from a pre-image
/// snapshot on failure, and re-fetches when its change subscription fires.
pub struct ViewSynchronizer<R, S> {
    store: S,
    owner: OwnerID,
    state: ViewState<R>,
    load_generation: u64,
    subscription: Option<Subscription>,
    feedback: Option<Box<dyn FnMut(RecordID, bool)>>,
}

impl<R: Clone, S: RecordStore<R>> ViewSynchronizer<R, S> {
    pub fn new(store: S, owner: OwnerID) -> Self {
        ViewSynchronizer {
            store,
            owner,
            state: ViewState::Uninitialized,
            load_generation: 0,
            subscription: None,
            feedback: None,
        }
    }

    /// Registers a hook fired synchronously when a completion toggle is
    /// applied locally, before the store round-trip.
    pub fn with_feedback(mut self, feedback: impl FnMut(RecordID, bool) + 'static) -> Self {
        self.feedback = Some(Box::new(feedback));
        self
    }

    pub fn owner(&self) -> &OwnerID {
        &self.owner
    }

    pub fn state(&self) -> &ViewState<R> {
        &self.state
    }

    pub fn records(&self) -> &[(RecordID, R)] {
        match &self.state {
            ViewState::Ready(records) => records,
            _ => &[],
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        if let ViewState::Uninitialized = self.state {
            self.state = ViewState::Loading;
        }

        LoadTicket {
            generation: self.load_generation,
        }
    }

    /// Applies a load result unless the ticket went stale in the meantime.
    /// A failed load surfaces its error but never tears down the view: prior
    /// contents stay, or the list comes up empty if it was never populated.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: StoreResult<Vec<(RecordID, R)>>,
    ) -> StoreResult<()> {
        if ticket.generation != self.load_generation {
            return Ok(());
        }

        match result {
            Ok(records) => {
                self.state = ViewState::Ready(records);
                Ok(())
            }
            Err(e) => {
                if let ViewState::Loading = self.state {
                    self.state = ViewState::Ready(vec![]);
                }
                Err(e)
            }
        }
    }

    pub fn load(&mut self, filter: &S::Filter) -> StoreResult<()> {
        let ticket = self.begin_load();
        let result = self.store.fetch(&self.owner, filter);
        self.complete_load(ticket, result)
    }

    /// Validates and inserts a draft. The new record is deliberately not
    /// appended locally; it materializes through the notification round-trip.
    pub fn create(&mut self, draft: &S::Draft) -> StoreResult<RecordID> {
        draft.validate()?;
        self.store.insert(&self.owner, draft)
    }

    pub fn attach(&mut self, bus: &Arc<ChangeBus>, table: Table) {
        self.subscription = Some(Arc::clone(bus).subscribe(table, self.owner.clone()));
    }

    /// Tears down the subscription and invalidates any in-flight load so a
    /// late response cannot touch this view.
    pub fn detach(&mut self) {
        self.subscription = None;
        self.load_generation += 1;
    }

    /// Drains pending change signals and re-fetches once if any arrived.
    /// Signals carry no payload; several pending ones coalesce into a single
    /// re-read.
    pub fn poll(&mut self, filter: &S::Filter) -> StoreResult<bool> {
        let mut signalled = false;

        if let Some(subscription) = self.subscription.as_mut() {
            while subscription.try_recv().is_some() {
                signalled = true;
            }
        }

        if signalled {
            self.load(filter)?;
        }

        Ok(signalled)
    }
}

impl<R: Clone + Completable, S: CompletionStore<R>> ViewSynchronizer<R, S> {
    /// Optimistically negates a record's completion flag, then persists it.
    /// On failure the pre-image snapshot is restored verbatim; no re-fetch
    /// is attempted. Rapid toggles on the same record are not serialized:
    /// the last write the store observes wins and local state may diverge
    /// until the next notification-driven re-fetch.
    pub fn toggle_completion(&mut self, id: RecordID) -> StoreResult<bool> {
        let (snapshot, next) = {
            let records = match &mut self.state {
                ViewState::Ready(records) => records,
                _ => return Err(StoreError::RowNotFound),
            };

            let entry = records
                .iter_mut()
                .find(|(record_id, _)| *record_id == id)
                .ok_or(StoreError::RowNotFound)?;

            let snapshot = entry.1.clone();
            let next = !snapshot.completed();
            entry.1.set_completed(next);

            (snapshot, next)
        };

        if let Some(feedback) = self.feedback.as_mut() {
            feedback(id, next);
        }

        if let Err(e) = self.store.set_completed(&self.owner, id, next) {
            if let ViewState::Ready(records) = &mut self.state {
                if let Some(entry) = records.iter_mut().find(|(record_id, _)| *record_id == id) {
                    entry.1 = snapshot;
                }
            }
            return Err(e);
        }

        Ok(next)
    }
}
