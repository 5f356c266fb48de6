use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};
use crate::dispose::Disposable;
use crate::error::{fatal, Result};
use crate::rx_impl::erase_observer;
use crate::rx_ref::Rx;

/// An external mutable property a node can be bound to.
pub trait Property<T> {
    fn assign(&self, value: T);
}

/// [Property] which assigns through a setter on a weakly-held object.
///
/// Once the object is gone assignments are ignored, so a binding never keeps its target alive.
pub struct Field<O, F> {
    target: Weak<O>,
    set: F
}

/// [Property] which calls a closure.
pub struct Setter<F>(pub F);

impl<T: 'static> Rx<T> {
    /// Call `callback` with the current value now, and again every time it changes.
    ///
    /// Observers of the same node run in the order they were registered. Releasing the returned
    /// [Disposable] stops the callback, even in the middle of a propagation which would have reached it.
    pub fn observe(&self, callback: impl FnMut(&T) + 'static) -> Disposable {
        fatal(self.try_observe(callback))
    }

    pub fn try_observe(&self, callback: impl FnMut(&T) + 'static) -> Result<Disposable> {
        let graph = self.graph()?;
        let callback = erase_observer(callback);
        graph.subscribe(self.node().index(), &callback)?;
        // The node only holds the callback weakly, this is the strong reference
        let node = self.clone();
        Ok(Disposable::new(move || {
            drop(callback);
            drop(node);
        }))
    }

    /// Keep `property` assigned to this node's value.
    ///
    /// Releasing the binding stops further assignments; the last assigned value stays.
    pub fn bind(&self, property: impl Property<T> + 'static) -> Disposable where T: Clone {
        self.observe(move |value| property.assign(value.clone()))
    }
}

impl<T> Property<T> for Rc<RefCell<T>> {
    fn assign(&self, value: T) {
        *self.borrow_mut() = value;
    }
}

impl<T> Property<T> for Rc<Cell<T>> {
    fn assign(&self, value: T) {
        self.set(value);
    }
}

impl<T> Property<T> for Weak<RefCell<T>> {
    fn assign(&self, value: T) {
        if let Some(target) = self.upgrade() {
            *target.borrow_mut() = value;
        }
    }
}

impl<O, F> Field<O, F> {
    pub fn new(target: &Rc<O>, set: F) -> Self {
        Field {
            target: Rc::downgrade(target),
            set
        }
    }
}

impl<T, O, F: Fn(&O, T)> Property<T> for Field<O, F> {
    fn assign(&self, value: T) {
        if let Some(target) = self.target.upgrade() {
            (self.set)(&target, value);
        }
    }
}

impl<T, F: Fn(T)> Property<T> for Setter<F> {
    fn assign(&self, value: T) {
        (self.0)(value)
    }
}

impl<O, F> Debug for Field<O, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("target_alive", &(self.target.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

impl<F> Debug for Setter<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Setter").finish_non_exhaustive()
    }
}
