use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};
use log::debug;
use crate::dag::{GraphConfig, RxGraph};
use crate::owned::Owned;
use crate::rx_ref::{Rx, Source};

/// Application state which changes in response to messages.
pub trait Reducer {
    type Message;
    /// Follow-up work for whoever runs the application (e.g. a request). Not interpreted here.
    type Command;

    fn send(&mut self, message: Self::Message) -> Option<Self::Command>;
}

/// The one place which owns the application state and the view built from it.
///
/// The view function gets the state as a node and a [Sender]; everything it builds is bound to
/// that node, and messages sent through the sender update the state as one change.
pub struct Driver<S: Reducer, R> {
    // Fields drop in order: the view's bindings go before the state and the graph
    root: Owned<R>,
    state: Rc<Source<S>>,
    graph: RxGraph
}

/// Cloneable handle which sends messages to a [Driver].
///
/// Doesn't keep the driver alive: once it's gone, sending does nothing.
pub struct Sender<S>(Weak<Source<S>>);

impl<S: Reducer + Clone + PartialEq + 'static, R: 'static> Driver<S, R> {
    pub fn new(initial: S, view: impl FnOnce(&RxGraph, Rx<S>, Sender<S>) -> Owned<R>) -> Self {
        Self::with_config(GraphConfig::default(), initial, view)
    }

    pub fn with_config(config: GraphConfig, initial: S, view: impl FnOnce(&RxGraph, Rx<S>, Sender<S>) -> Owned<R>) -> Self {
        let graph = RxGraph::with_config(config);
        let state = Rc::new(graph.source(initial));
        let root = view(&graph, state.rx().clone(), Sender(Rc::downgrade(&state)));
        Driver { root, state, graph }
    }

    /// Run the reducer on the current state. Everything bound to the state is updated before this returns
    /// (or after the running update, if called from inside one).
    pub fn send(&self, message: S::Message) -> Option<S::Command> {
        send(&self.state, message)
    }

    pub fn sender(&self) -> Sender<S> {
        Sender(Rc::downgrade(&self.state))
    }

    /// The container built by the view function
    pub fn root(&self) -> &Owned<R> {
        &self.root
    }

    pub fn state(&self) -> &Rx<S> {
        self.state.rx()
    }

    pub fn graph(&self) -> &RxGraph {
        &self.graph
    }
}

impl<S: Reducer + Clone + PartialEq + 'static> Sender<S> {
    pub fn send(&self, message: S::Message) -> Option<S::Command> {
        match self.0.upgrade() {
            None => {
                debug!("Sender: message sent after its driver was dropped");
                None
            }
            Some(state) => send(&state, message)
        }
    }
}

fn send<S: Reducer + Clone + PartialEq + 'static>(state: &Source<S>, message: S::Message) -> Option<S::Command> {
    state.change(|state| state.send(message))
}

impl<S> Clone for Sender<S> {
    fn clone(&self) -> Self {
        Sender(self.0.clone())
    }
}

impl<S> Debug for Sender<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sender")
            .field("alive", &(self.0.strong_count() > 0))
            .finish()
    }
}

impl<S: Reducer, R: 'static> Debug for Driver<S, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("root_released", &self.root.is_released())
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}
