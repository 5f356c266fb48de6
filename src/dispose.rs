use std::fmt::{Debug, Formatter};
use std::mem::take;

/// Handle which stops something (a subscription, a binding, a whole container of them) when released.
///
/// Release is idempotent: releasing twice is a no-op. Dropping the handle releases it,
/// so keep it alive as long as the thing it controls should keep running.
#[must_use = "dropping a Disposable releases it immediately"]
pub struct Disposable(Option<Box<dyn FnOnce()>>);

/// Composite [Disposable]: an ordered collection of children released together.
///
/// Children are released depth-first in the order they were appended, each exactly once.
/// Appending to a released bag releases the appended disposable right away.
#[derive(Default)]
pub struct DisposeBag {
    children: Vec<Disposable>,
    released: bool
}

impl Disposable {
    /// Run `release` when this is released.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Disposable(Some(Box::new(release)))
    }

    /// A disposable which does nothing.
    pub fn empty() -> Self {
        Disposable(None)
    }

    pub fn release(&mut self) {
        if let Some(release) = self.0.take() {
            release()
        }
    }

    pub fn is_released(&self) -> bool {
        self.0.is_none()
    }
}

impl Drop for Disposable {
    fn drop(&mut self) {
        self.release()
    }
}

impl Debug for Disposable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposable")
            .field("is_released", &self.is_released())
            .finish()
    }
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, disposable: impl Into<Disposable>) {
        let mut disposable = disposable.into();
        if self.released {
            disposable.release();
        } else {
            self.children.push(disposable);
        }
    }

    pub fn release(&mut self) {
        for mut child in self.take_for_release() {
            child.release();
        }
    }

    /// Mark released and hand back the children, so the caller can release them without
    /// holding a borrow of the bag.
    pub(crate) fn take_for_release(&mut self) -> Vec<Disposable> {
        self.released = true;
        take(&mut self.children)
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.release()
    }
}

impl Debug for DisposeBag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisposeBag")
            .field("children", &self.children.len())
            .field("released", &self.released)
            .finish()
    }
}

impl From<DisposeBag> for Disposable {
    fn from(mut bag: DisposeBag) -> Self {
        Disposable::new(move || bag.release())
    }
}

impl Extend<Disposable> for DisposeBag {
    fn extend<I: IntoIterator<Item = Disposable>>(&mut self, iter: I) {
        for disposable in iter {
            self.append(disposable)
        }
    }
}
