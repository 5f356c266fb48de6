use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::{Rc, Weak};
use crate::dispose::{Disposable, DisposeBag};
use crate::rx_ref::Rx;

/// Owning container: an external object (e.g. a view) plus the disposables keeping its bindings alive.
///
/// Releasing the container (explicitly, or by dropping its last clone) releases every binding made
/// against it and every child container appended to it. Clones share the same container;
/// equality and hashing are by identity.
///
/// Containers are the only strong edge in the graph's ownership: nodes don't own their observers,
/// and bindings only reach back to their container weakly, so nothing here forms a cycle.
pub struct Owned<V>(Rc<OwnedInner<V>>);

/// Non-owning reference to an [Owned] container.
pub struct WeakOwned<V>(Weak<OwnedInner<V>>);

struct OwnedInner<V> {
    value: V,
    disposables: RefCell<DisposeBag>
}

/// Shared external object compared and hashed by identity.
///
/// For objects which have no structural equality but need to be told apart, e.g. as a [Source] value.
///
/// [Source]: crate::Source
pub struct ById<T: ?Sized>(pub Rc<T>);

impl<V: 'static> Owned<V> {
    pub fn new(value: V) -> Self {
        Owned(Rc::new(OwnedInner {
            value,
            disposables: RefCell::new(DisposeBag::new())
        }))
    }

    /// The contained object
    pub fn get(&self) -> &V {
        &self.0.value
    }

    /// Keep `disposable` alive until this container is released.
    pub fn append(&self, disposable: impl Into<Disposable>) {
        let mut disposable = disposable.into();
        let mut disposables = self.0.disposables.borrow_mut();
        if disposables.is_released() {
            drop(disposables);
            disposable.release();
        } else {
            disposables.append(disposable);
        }
    }

    /// Release every binding and child container. Idempotent.
    pub fn release(&self) {
        let children = self.0.disposables.borrow_mut().take_for_release();
        for mut child in children {
            child.release();
        }
    }

    pub fn is_released(&self) -> bool {
        self.0.disposables.borrow().is_released()
    }

    pub fn downgrade(&self) -> WeakOwned<V> {
        WeakOwned(Rc::downgrade(&self.0))
    }

    /// Box something derived from the contained object, which keeps this container alive.
    pub fn map<W: 'static>(self, f: impl FnOnce(&V) -> W) -> Owned<W> {
        let mapped = Owned::new(f(self.get()));
        mapped.append(self);
        mapped
    }

    /// Run `callback` with the object and the node's value now and on every change, until this container is released.
    pub fn observe<T: 'static>(&self, rx: &Rx<T>, mut callback: impl FnMut(&V, &T) + 'static) {
        let owner = self.downgrade();
        self.append(rx.observe(move |value| {
            if let Some(owner) = owner.upgrade() {
                if !owner.is_released() {
                    callback(owner.get(), value);
                }
            }
        }));
    }

    /// Keep a property of the object assigned to the node's value, until this container is released.
    pub fn bind<T: Clone + 'static>(&self, rx: &Rx<T>, set: impl Fn(&V, T) + 'static) {
        self.observe(rx, move |owner, value| set(owner, value.clone()));
    }
}

impl<V> WeakOwned<V> {
    pub fn upgrade(&self) -> Option<Owned<V>> {
        self.0.upgrade().map(Owned)
    }
}

impl<V> Clone for Owned<V> {
    fn clone(&self) -> Self {
        Owned(self.0.clone())
    }
}

impl<V> Clone for WeakOwned<V> {
    fn clone(&self) -> Self {
        WeakOwned(self.0.clone())
    }
}

impl<V> PartialEq for Owned<V> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<V> Eq for Owned<V> {}

impl<V> Hash for Owned<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state)
    }
}

impl<V: Debug> Debug for Owned<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Owned")
            .field("value", &self.0.value)
            .field("disposables", &self.0.disposables.borrow())
            .finish()
    }
}

impl<V> Debug for WeakOwned<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakOwned")
            .field("alive", &(self.0.strong_count() > 0))
            .finish()
    }
}

impl<V: 'static> From<Owned<V>> for Disposable {
    fn from(owned: Owned<V>) -> Self {
        Disposable::new(move || owned.release())
    }
}

impl<T: ?Sized> ById<T> {
    pub fn new(value: Rc<T>) -> Self {
        ById(value)
    }
}

impl<T: ?Sized> Clone for ById<T> {
    fn clone(&self) -> Self {
        ById(self.0.clone())
    }
}

impl<T: ?Sized> Deref for ById<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> PartialEq for ById<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Eq for ById<T> {}

impl<T: ?Sized> Hash for ById<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as *const ()).hash(state)
    }
}

impl<T: ?Sized + Debug> Debug for ById<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ById").field(&&*self.0).finish()
    }
}
