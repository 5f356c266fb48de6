use crate::error::fatal;
use crate::rx_impl::erase_eq;
use crate::rx_ref::Rx;

impl<T: 'static> Rx<T> {
    /// A node whose value is always `f` of this one's.
    ///
    /// It's recomputed whenever this node changes, before any of its own dependents or observers run.
    /// Every recomputation counts as a change; use [Rx::map_eq] or [Rx::distinct] to filter repeats.
    pub fn map<U: 'static>(&self, mut f: impl FnMut(&T) -> U + 'static) -> Rx<U> {
        let input = self.clone();
        fatal(self.graph().and_then(|graph| graph.new_crx(move |g| f(&input.get_rc(g)), None)))
    }

    /// Like [Rx::map], but a result which is `eq` to the previous one doesn't propagate.
    pub fn map_eq<U: 'static>(&self, eq: impl Fn(&U, &U) -> bool + 'static, mut f: impl FnMut(&T) -> U + 'static) -> Rx<U> {
        let input = self.clone();
        fatal(self.graph().and_then(|graph| graph.new_crx(move |g| f(&input.get_rc(g)), Some(erase_eq(eq)))))
    }

    /// Project part of the value, only propagating when the part changes.
    pub fn select<U: PartialEq + 'static>(&self, f: impl FnMut(&T) -> U + 'static) -> Rx<U> {
        self.map_eq(<U as PartialEq>::eq, f)
    }

    /// This node's value, but only propagating when it's no longer `==` to the previous one.
    pub fn distinct(&self) -> Rx<T> where T: Clone + PartialEq {
        self.select(<T as Clone>::clone)
    }

    /// A node whose value is `f` of this one's and `other`'s.
    ///
    /// If both change in the same update it's recomputed once, with both new values.
    pub fn combine<U: 'static, V: 'static>(&self, other: &Rx<U>, mut f: impl FnMut(&T, &U) -> V + 'static) -> Rx<V> {
        let (a, b) = (self.clone(), other.clone());
        fatal(self.graph().and_then(|graph| graph.new_crx(move |g| f(&a.get_rc(g), &b.get_rc(g)), None)))
    }

    /// Like [Rx::combine], but a result which is `eq` to the previous one doesn't propagate.
    pub fn combine_eq<U: 'static, V: 'static>(&self, other: &Rx<U>, eq: impl Fn(&V, &V) -> bool + 'static, mut f: impl FnMut(&T, &U) -> V + 'static) -> Rx<V> {
        let (a, b) = (self.clone(), other.clone());
        fatal(self.graph().and_then(|graph| graph.new_crx(move |g| f(&a.get_rc(g), &b.get_rc(g)), Some(erase_eq(eq)))))
    }
}

impl<T: Clone + 'static> Rx<Vec<Rx<T>>> {
    /// One node holding the current values of every node in this list, in list order.
    ///
    /// When a member changes the result is recomputed. When the list itself changes, added members
    /// start being tracked and removed members stop being tracked in the same update,
    /// so changes to a removed member are never seen.
    pub fn flatten(&self) -> Rx<Vec<T>> {
        let outer = self.clone();
        fatal(self.graph().and_then(|graph| graph.new_crx(move |g| {
            outer.get_rc(g).iter().map(|member| member.get(g)).collect::<Vec<T>>()
        }, None)))
    }
}

impl<T: Clone + 'static> Rx<Rx<T>> {
    /// The value of whichever node this one currently holds.
    pub fn join(&self) -> Rx<T> {
        let outer = self.clone();
        fatal(self.graph().and_then(|graph| graph.new_crx(move |g| outer.get_rc(g).get(g), None)))
    }
}
