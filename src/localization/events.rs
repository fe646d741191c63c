// SPDX-License-Identifier: MPL-2.0
//! Observer list for the "locale updated" broadcast.
//!
//! Listeners are plain `Fn()` callbacks dispatched synchronously, in
//! registration order, after every successful (re)load. [`subscribe`]
//! hands out a [`ListenerId`] that [`unsubscribe`] accepts later.
//!
//! Contract: no listener may subscribe or unsubscribe during dispatch.
//! [`notify`] borrows the list immutably while both mutations need
//! `&mut`, so for direct users the borrow checker enforces this; hosts
//! that share a store behind `Rc<RefCell<..>>` must not call back into it
//! from a listener.
//!
//! [`subscribe`]: LocaleListeners::subscribe
//! [`unsubscribe`]: LocaleListeners::unsubscribe
//! [`notify`]: LocaleListeners::notify

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn Fn()>;

/// Ordered list of "locale updated" listeners.
#[derive(Default)]
pub struct LocaleListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Callback)>,
}

impl std::fmt::Debug for LocaleListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleListeners")
            .field("len", &self.listeners.len())
            .finish()
    }
}

impl LocaleListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener and returns its id. Listeners fire in the
    /// order they were registered.
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if the id was already removed
    /// or never existed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Invokes every listener once, in registration order.
    pub fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener();
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notify_fires_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = LocaleListeners::new();

        for label in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            listeners.subscribe(move || order.borrow_mut().push(label));
        }

        listeners.notify();
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_removes_only_the_given_listener() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = LocaleListeners::new();

        let a = {
            let calls = Rc::clone(&calls);
            listeners.subscribe(move || calls.borrow_mut().push("a"))
        };
        let _b = {
            let calls = Rc::clone(&calls);
            listeners.subscribe(move || calls.borrow_mut().push("b"))
        };

        assert!(listeners.unsubscribe(a));
        assert!(!listeners.unsubscribe(a), "second removal must report false");

        listeners.notify();
        assert_eq!(*calls.borrow(), vec!["b"]);
    }

    #[test]
    fn empty_list_notifies_nobody() {
        let listeners = LocaleListeners::new();
        listeners.notify();
        assert!(listeners.is_empty());
        assert_eq!(listeners.len(), 0);
    }
}
