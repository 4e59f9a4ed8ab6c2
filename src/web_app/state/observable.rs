// web_app/state/observable.rs - Subscriber list for the view stores
//
// Stores call `notify` after every state transition. Callbacks run
// synchronously on the UI thread and must not subscribe or unsubscribe from
// inside the callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Rc<dyn Fn(&T)>;

pub struct Observers<T> {
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<(SubscriptionId, Callback<T>)>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            callbacks: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.callbacks.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Returns false when `id` was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks.borrow_mut();
        let before = callbacks.len();
        callbacks.retain(|(sub, _)| *sub != id);
        callbacks.len() != before
    }

    pub fn notify(&self, value: &T) {
        // Snapshot first so a callback may read the store that owns us
        let callbacks: Vec<Callback<T>> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.callbacks.borrow_mut().clear();
    }
}
