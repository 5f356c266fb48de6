use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::rc::{Rc, Weak};
use derivative::Derivative;
use crate::dag::{GraphCore, RxInput};
use crate::dag_uid::RxGraphUid;
use crate::error::{fatal, Result, RxError};
use crate::rx_impl::Value;

/// Index into the graph which keeps its node alive.
///
/// When the last one drops the node is collected.
#[derive(Debug)]
pub(crate) struct NodeRef {
    index: usize,
    graph_id: RxGraphUid,
    graph: Weak<GraphCore>
}

/// Handle to a node, which may be a source, constant or computed value.
///
/// Cloning the handle is cheap and refers to the same node. Equality and hashing are by node identity,
/// so a list of nodes can itself be the value of a node.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct Rx<T> {
    node: Rc<NodeRef>,
    phantom: PhantomData<fn() -> T>
}

/// Handle to a mutable root of the graph.
///
/// Derived nodes are read-only; sources are the only place new values enter the graph.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct Source<T>(Rx<T>);

impl NodeRef {
    pub(crate) fn new(graph: &Rc<GraphCore>, index: usize) -> Self {
        NodeRef {
            index,
            graph_id: graph.uid(),
            graph: Rc::downgrade(graph)
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn uid(&self) -> RxGraphUid {
        self.graph_id
    }

    pub(crate) fn graph(&self) -> Result<Rc<GraphCore>> {
        self.graph.upgrade().ok_or(RxError::GraphDropped)
    }
}

impl Drop for NodeRef {
    fn drop(&mut self) {
        if let Some(graph) = self.graph.upgrade() {
            graph.release_node(self.index);
        }
    }
}

impl<T: 'static> Rx<T> {
    pub(crate) fn new(node: NodeRef) -> Self {
        Rx {
            node: Rc::new(node),
            phantom: PhantomData
        }
    }

    pub(crate) fn node(&self) -> &NodeRef {
        &self.node
    }

    pub(crate) fn graph(&self) -> Result<Rc<GraphCore>> {
        self.node.graph()
    }

    /// Read the value from inside a computation, making this node one of its inputs.
    pub fn get(&self, input: &RxInput<'_>) -> T where T: Clone {
        T::clone(&self.get_rc(input))
    }

    /// Like [Rx::get] but without cloning the value.
    pub fn get_rc(&self, input: &RxInput<'_>) -> Rc<T> {
        downcast(fatal(input.read(&self.node)))
    }

    /// Read the current value. Outside of a computation, so this doesn't create a dependency.
    pub fn read(&self) -> T where T: Clone {
        fatal(self.try_read())
    }

    pub fn try_read(&self) -> Result<T> where T: Clone {
        let graph = self.graph()?;
        Ok(T::clone(&downcast(graph.current(self.node.index()))))
    }

    /// Borrow the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let graph = fatal(self.graph());
        let value = downcast::<T>(graph.current(self.node.index()));
        f(&value)
    }

    /// Whether both handles refer to the same node
    pub fn ptr_eq(&self, other: &Rx<T>) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl<T> PartialEq for Rx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node.graph_id == other.node.graph_id && self.node.index == other.node.index
    }
}

impl<T> Eq for Rx<T> {}

impl<T> Hash for Rx<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.index.hash(state)
    }
}

impl<T: Clone + 'static> Source<T> {
    pub(crate) fn new(node: NodeRef) -> Self {
        Source(Rx::new(node))
    }

    /// The node, to derive values from or observe.
    pub fn rx(&self) -> &Rx<T> {
        &self.0
    }

    /// Read the source. Inside a batch this is the most recently written value, even though
    /// nothing derived from it was recomputed yet.
    pub fn read(&self) -> T {
        fatal(self.try_read())
    }

    pub fn try_read(&self) -> Result<T> {
        let graph = self.0.graph()?;
        Ok(T::clone(&downcast(graph.latest(self.0.node.index()))))
    }

    /// Write a new value.
    ///
    /// If it's equal to the current value by the source's predicate, nothing happens.
    /// Otherwise, unless inside a batch or a running propagation, everything depending on this
    /// source is recomputed and observed before this returns.
    pub fn write(&self, value: T) {
        fatal(self.try_write(value))
    }

    pub fn try_write(&self, value: T) -> Result<()> {
        let graph = self.0.graph()?;
        graph.write(self.0.node.index(), Rc::new(value))
    }

    /// Mutate the value in place as one update. Writes `f` makes to other sources are part of the
    /// same update, so observers never see some of them applied and others not.
    pub fn change<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        fatal(self.try_change(f))
    }

    pub fn try_change<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let graph = self.0.graph()?;
        graph.batch(|| {
            let mut value = self.try_read()?;
            let result = f(&mut value);
            self.try_write(value)?;
            Ok(result)
        })?
    }

    /// Apply a transformation to the latest value, as one update.
    pub fn modify(&self, f: impl FnOnce(&T) -> T) {
        self.change(|value| *value = f(value))
    }
}

impl<T> PartialEq for Source<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Source<T> {}

fn downcast<T: 'static>(value: Value) -> Rc<T> {
    value.downcast::<T>().unwrap_or_else(|_| panic!("RxRef is corrupt: node holds a different type"))
}
