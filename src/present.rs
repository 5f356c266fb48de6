use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};
use log::debug;
use crate::dispose::Disposable;
use crate::owned::{Owned, WeakOwned};
use crate::rx_ref::Rx;

/// Side effect which shows and hides a child on a host, e.g. presenting a modal view.
///
/// Each call gets a [Transition]. The slot doesn't start another transition until it completes,
/// so a presenter never sees a dismiss and a present overlap. Synchronous presenters just let
/// the token drop; animated ones keep it until the animation finishes.
pub trait Presenter<H, C> {
    fn present(&mut self, host: &H, child: &C, done: Transition);
    fn dismiss(&mut self, host: &H, child: &C, done: Transition);
}

/// Completion token of one [Presenter] call. Completes on [Transition::complete] or on drop.
#[must_use = "dropping a Transition completes it immediately"]
pub struct Transition {
    slot: Weak<dyn TransitionSink>,
    id: u64,
    // Runs instead of the slot if the slot is gone, so the child is still released
    on_orphan: Option<Box<dyn FnOnce()>>
}

trait TransitionSink {
    fn finish(self: Rc<Self>, id: u64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionKind {
    Present,
    Dismiss
}

struct InFlight<C> {
    id: u64,
    kind: TransitionKind,
    child: Owned<C>
}

struct SlotState<C> {
    shown: Option<Owned<C>>,
    in_flight: Option<InFlight<C>>,
    /// Latest value of the presence node which hasn't been acted upon
    desired: Option<Option<Owned<C>>>,
    released: bool
}

/// Presence slot of one host: which child is shown and what should be shown next.
struct Slot<H, C> {
    host: WeakOwned<H>,
    state: RefCell<SlotState<C>>,
    presenter: RefCell<Option<Box<dyn Presenter<H, C>>>>,
    // Set while the presenter runs, so a transition completed inside it doesn't start the next one
    busy: Cell<bool>,
    next_id: Cell<u64>
}

impl<V: 'static> Owned<V> {
    /// Present whatever child `rx` holds on this container's object, and dismiss it when `rx` changes.
    ///
    /// Transitions run one at a time: the previous child is dismissed (and the dismissal completed)
    /// before the next one is presented, and values superseded in the meantime are skipped.
    /// A presented child is owned by this container: it's released after its dismissal completes,
    /// or when this container is released. Releasing this container while a transition is pending
    /// never calls the presenter again, and the pending child is released once the transition completes.
    pub fn bind_presented<C: 'static>(&self, rx: &Rx<Option<Owned<C>>>, presenter: impl Presenter<V, C> + 'static) {
        let slot = Rc::new(Slot {
            host: self.downgrade(),
            state: RefCell::new(SlotState {
                shown: None,
                in_flight: None,
                desired: None,
                released: false
            }),
            presenter: RefCell::new(Some(Box::new(presenter) as Box<dyn Presenter<V, C>>)),
            busy: Cell::new(false),
            next_id: Cell::new(0)
        });
        let observer_slot = slot.clone();
        self.append(rx.observe(move |child| {
            observer_slot.state.borrow_mut().desired = Some(child.clone());
            observer_slot.pump();
        }));
        self.append(Disposable::new(move || slot.shut_down()));
    }
}

impl<H: 'static, C: 'static> Slot<H, C> {
    /// Start transitions until one is pending or the slot shows what's desired.
    fn pump(self: &Rc<Self>) {
        if self.busy.get() {
            return;
        }
        loop {
            let (kind, child) = {
                let mut state = self.state.borrow_mut();
                if state.released || state.in_flight.is_some() {
                    return;
                }
                let Some(desired) = state.desired.take() else {
                    return;
                };
                match (state.shown.take(), desired) {
                    (Some(shown), Some(next)) if shown == next => {
                        state.shown = Some(shown);
                        continue;
                    }
                    (Some(shown), desired) => {
                        // Dismiss first, then come back for the rest
                        if desired.is_some() {
                            state.desired = Some(desired);
                        }
                        (TransitionKind::Dismiss, shown)
                    }
                    (None, Some(next)) => (TransitionKind::Present, next),
                    (None, None) => continue
                }
            };
            self.start(kind, child);
        }
    }

    fn start(self: &Rc<Self>, kind: TransitionKind, child: Owned<C>) {
        let Some(host) = self.host.upgrade().filter(|host| !host.is_released()) else {
            self.state.borrow_mut().released = true;
            return;
        };
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.state.borrow_mut().in_flight = Some(InFlight { id, kind, child: child.clone() });
        debug!("presentation slot: start {:?} transition {}", kind, id);

        let orphan = child.clone();
        let weak = Rc::downgrade(self);
        let slot: Weak<dyn TransitionSink> = weak;
        let done = Transition {
            slot,
            id,
            on_orphan: Some(Box::new(move || orphan.release()))
        };
        let Some(mut presenter) = self.presenter.borrow_mut().take() else {
            return;
        };
        self.busy.set(true);
        match kind {
            TransitionKind::Present => presenter.present(host.get(), child.get(), done),
            TransitionKind::Dismiss => presenter.dismiss(host.get(), child.get(), done)
        }
        self.busy.set(false);
        if !self.state.borrow().released {
            *self.presenter.borrow_mut() = Some(presenter);
        }
    }

    /// The host container was released.
    fn shut_down(&self) {
        let (idle_shown, presenter) = {
            let mut state = self.state.borrow_mut();
            state.released = true;
            state.desired = None;
            (state.shown.take(), self.presenter.borrow_mut().take())
        };
        debug!("presentation slot: host released");
        drop(presenter);
        if let Some(shown) = idle_shown {
            shown.release();
        }
    }
}

impl<H: 'static, C: 'static> TransitionSink for Slot<H, C> {
    fn finish(self: Rc<Self>, id: u64) {
        let release = {
            let mut state = self.state.borrow_mut();
            match state.in_flight.take() {
                Some(in_flight) if in_flight.id == id => {
                    debug!("presentation slot: finished {:?} transition {}", in_flight.kind, id);
                    match in_flight.kind {
                        TransitionKind::Present if !state.released => {
                            state.shown = Some(in_flight.child);
                            None
                        }
                        TransitionKind::Present => Some(in_flight.child),
                        TransitionKind::Dismiss => {
                            let presented_next = !state.released
                                && matches!(&state.desired, Some(Some(next)) if *next == in_flight.child);
                            if presented_next {
                                None
                            } else {
                                Some(in_flight.child)
                            }
                        }
                    }
                }
                other => {
                    state.in_flight = other;
                    None
                }
            }
        };
        if let Some(child) = release {
            child.release();
        }
        self.pump();
    }
}

impl Transition {
    /// Mark the transition as finished. Same as dropping it.
    pub fn complete(self) {}

    fn finish(&mut self) {
        let Some(on_orphan) = self.on_orphan.take() else {
            return;
        };
        match self.slot.upgrade() {
            Some(slot) => slot.finish(self.id),
            None => on_orphan()
        }
    }
}

impl Drop for Transition {
    fn drop(&mut self) {
        self.finish()
    }
}

impl Debug for Transition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("id", &self.id)
            .field("completed", &self.on_orphan.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::dag::RxGraph;
    use crate::owned::Owned;
    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Instant(Log);

    impl Presenter<&'static str, &'static str> for Instant {
        fn present(&mut self, host: &&'static str, child: &&'static str, _done: Transition) {
            self.0.borrow_mut().push(format!("{} presents {}", host, child));
        }

        fn dismiss(&mut self, host: &&'static str, child: &&'static str, _done: Transition) {
            self.0.borrow_mut().push(format!("{} dismisses {}", host, child));
        }
    }

    #[test]
    fn switching_children_dismisses_first() {
        let log = Log::default();
        let g = RxGraph::new();
        let host = Owned::new("host");
        let (a, b) = (Owned::new("a"), Owned::new("b"));
        let presence = g.source(None::<Owned<&'static str>>);
        host.bind_presented(presence.rx(), Instant(log.clone()));

        presence.write(Some(a.clone()));
        presence.write(Some(b.clone()));
        assert!(a.is_released());
        assert!(!b.is_released());
        assert_eq!(*log.borrow(), vec!["host presents a", "host dismisses a", "host presents b"]);

        host.release();
        assert!(b.is_released());
    }

    #[test]
    fn same_child_is_not_presented_twice() {
        let log = Log::default();
        let g = RxGraph::new();
        let host = Owned::new("host");
        let a = Owned::new("a");
        // Every write propagates, even of the same child
        let presence = g.source_with_eq(Some(a.clone()), |_, _| false);
        host.bind_presented(presence.rx(), Instant(log.clone()));
        presence.write(Some(a.clone()));
        assert_eq!(*log.borrow(), vec!["host presents a"]);
        assert!(!a.is_released());
    }
}
