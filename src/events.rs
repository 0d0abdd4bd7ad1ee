use rocket::form::FromFormField;
use rocket::response::stream::{Event, EventStream};
use rocket::{get, State};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::accounts::data::OwnerID;
use crate::accounts::identity::Identity;

pub type SubscriptionID = u64;

#[derive(Serialize, Deserialize, FromFormField, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Tasks,
    #[field(value = "time_blocks")]
    TimeBlocks,
    Goals,
    Milestones,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Edge-triggered change signal. Carries no row data; receivers must treat
/// it strictly as "re-read now".
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct ChangeEvent {
    pub table: Table,
    pub kind: ChangeKind,
}

struct Subscriber {
    table: Table,
    owner: OwnerID,
    sender: mpsc::UnboundedSender<ChangeEvent>,
}

struct BusInner {
    next_id: SubscriptionID,
    subscribers: HashMap<SubscriptionID, Subscriber>,
}

/// Fan-out bus for per-(table, owner) change subscriptions. Any number of
/// concurrent subscriptions may exist for the same key; each gets its own
/// receiver.
pub struct ChangeBus {
    inner: Mutex<BusInner>,
}

impl Default for ChangeBus {
    fn default() -> Self {
        ChangeBus {
            inner: Mutex::new(BusInner {
                next_id: 0,
                subscribers: HashMap::new(),
            }),
        }
    }
}

impl ChangeBus {
    // A poisoned lock only means a subscriber panicked mid-send; the
    // subscriber map itself is still usable, and teardown must never fail.
    fn lock_inner(&self) -> MutexGuard<'_, BusInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn subscribe(self: Arc<Self>, table: Table, owner: OwnerID) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();

        let mut inner = self.lock_inner();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(
            id,
            Subscriber {
                table,
                owner,
                sender,
            },
        );
        drop(inner);

        Subscription {
            id,
            bus: self,
            receiver,
        }
    }

    pub fn publish(&self, owner: &OwnerID, event: ChangeEvent) {
        let mut inner = self.lock_inner();

        let mut dead = vec![];
        let mut delivered = 0usize;

        for (id, subscriber) in inner.subscribers.iter() {
            if subscriber.table != event.table || &subscriber.owner != owner {
                continue;
            }

            if subscriber.sender.send(event).is_err() {
                dead.push(*id);
            } else {
                delivered += 1;
            }
        }

        for id in dead {
            inner.subscribers.remove(&id);
        }

        debug!(
            "published {:?} {:?} change to {} subscriber(s)",
            event.table, event.kind, delivered
        );
    }

    fn unsubscribe(&self, id: SubscriptionID) {
        self.lock_inner().subscribers.remove(&id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock_inner().subscribers.len()
    }
}

/// Handle to a live subscription. Dropping it unregisters the subscriber
/// from the bus.
pub struct Subscription {
    id: SubscriptionID,
    bus: Arc<ChangeBus>,
    receiver: mpsc::UnboundedReceiver<ChangeEvent>,
}

impl Subscription {
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<ChangeEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}

#[get("/events?<table>")]
pub fn events(
    identity: Identity,
    table: Table,
    bus: &State<Arc<ChangeBus>>,
) -> EventStream![] {
    let mut subscription = Arc::clone(bus.inner()).subscribe(table, identity.0);

    EventStream! {
        while let Some(event) = subscription.recv().await {
            yield Event::json(&event);
        }
    }
}
