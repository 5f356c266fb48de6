use std::any::Any;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};
use crate::dag::RxInput;

/// A node value. Values live behind `Rc` so the graph can hand them out without staying borrowed.
pub(crate) type Value = Rc<dyn Any>;
/// Type-erased equality predicate: `true` means "same value, don't propagate".
pub(crate) type EqFn = Rc<dyn Fn(&dyn Any, &dyn Any) -> bool>;
/// Type-erased derived-node computation.
pub(crate) type Recipe = Box<dyn FnMut(&RxInput<'_>) -> Value>;
/// Observer callback. The subscription owns the only strong reference.
pub(crate) type ObserverFn = RefCell<Box<dyn FnMut(&dyn Any)>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RxKind {
    Constant,
    Source,
    Derived,
    /// Derived node without a value, run for its side effects
    Effect
}

pub(crate) struct ObserverEntry {
    pub(crate) callback: Weak<ObserverFn>,
    /// Generation of the node value this observer was last called with
    pub(crate) seen: u64
}

/// A slot in the graph.
///
/// `current` is what readers see. Sources also have `next`, a written value which isn't committed
/// until the next propagation pass.
pub(crate) struct RxImpl {
    pub(crate) kind: RxKind,
    pub(crate) current: Value,
    pub(crate) next: Option<Value>,
    pub(crate) eq: Option<EqFn>,
    /// `None` for sources and constants, and for a derived node while its recipe runs
    pub(crate) recipe: Option<Recipe>,
    pub(crate) inputs: Vec<usize>,
    pub(crate) dependents: Vec<usize>,
    pub(crate) height: usize,
    /// Bumped every time `current` is replaced
    pub(crate) generation: u64,
    // Propagation flags
    pub(crate) queued: bool,
    pub(crate) did_recompute: bool,
    /// The last handle dropped, so it never runs again
    pub(crate) released: bool,
    pub(crate) observers: Vec<ObserverEntry>
}

impl RxImpl {
    pub(crate) fn new(kind: RxKind, init: Value, eq: Option<EqFn>) -> Self {
        RxImpl {
            kind,
            current: init,
            next: None,
            eq,
            recipe: None,
            inputs: Vec::new(),
            dependents: Vec::new(),
            height: 0,
            generation: 0,
            queued: false,
            did_recompute: false,
            released: false,
            observers: Vec::new()
        }
    }

    pub(crate) fn derived(kind: RxKind, init: Value, eq: Option<EqFn>, recipe: Recipe, inputs: Vec<usize>, height: usize) -> Self {
        RxImpl {
            recipe: Some(recipe),
            inputs,
            height,
            ..RxImpl::new(kind, init, eq)
        }
    }

    /// The written value if there is one, otherwise the current value.
    pub(crate) fn latest(&self) -> Value {
        self.next.as_ref().unwrap_or(&self.current).clone()
    }

    /// Observers which haven't seen `current` yet, pruning ones whose subscription was released.
    /// They're marked as having seen it.
    pub(crate) fn observers_to_notify(&mut self) -> Vec<Weak<ObserverFn>> {
        self.observers.retain(|entry| entry.callback.strong_count() > 0);
        let generation = self.generation;
        self.observers
            .iter_mut()
            .filter(|entry| entry.seen != generation)
            .map(|entry| {
                entry.seen = generation;
                entry.callback.clone()
            })
            .collect()
    }
}

impl Debug for RxImpl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RxImpl")
            .field("kind", &self.kind)
            .field("next.is_some()", &self.next.is_some())
            .field("inputs", &self.inputs)
            .field("dependents", &self.dependents)
            .field("height", &self.height)
            .field("generation", &self.generation)
            .field("queued", &self.queued)
            .field("did_recompute", &self.did_recompute)
            .field("released", &self.released)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

/// Wrap a typed predicate so it can sit in an untyped slot.
pub(crate) fn erase_eq<T: 'static>(eq: impl Fn(&T, &T) -> bool + 'static) -> EqFn {
    Rc::new(move |a: &dyn Any, b: &dyn Any| match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => eq(a, b),
        _ => false
    })
}

/// Wrap a typed observer so it can sit in an untyped slot.
pub(crate) fn erase_observer<T: 'static>(mut callback: impl FnMut(&T) + 'static) -> Rc<ObserverFn> {
    let callback: Box<dyn FnMut(&dyn Any)> = Box::new(move |value: &dyn Any| {
        if let Some(value) = value.downcast_ref::<T>() {
            callback(value)
        }
    });
    Rc::new(RefCell::new(callback))
}
