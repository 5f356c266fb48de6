use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::{Debug, Formatter};
use std::mem::take;
use std::rc::{Rc, Weak};
use log::{debug, trace, warn};
use crate::dag_uid::RxGraphUid;
use crate::dispose::Disposable;
use crate::error::{fatal, Result, RxError};
use crate::rx_impl::{erase_eq, EqFn, ObserverEntry, ObserverFn, Recipe, RxImpl, RxKind, Value};
use crate::rx_ref::{NodeRef, Rx, Source};

/// Knobs for an [RxGraph].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// How many propagation passes one mutation may take before it's considered a feedback loop.
    ///
    /// Each pass commits the writes queued by the previous pass's observers.
    pub pass_limit: usize
}

/// The centralized structure which contains all your interconnected reactive values.
///
/// At the root of the graph are your sources ([Source]), which you can explicitly write, and constants.
/// All other values are derived ([Rx]) and recomputed from their inputs.
/// Observers ([Rx::observe]) hang off any node and run side effects.
///
/// Unlike a lazily-recomputed graph, writing a source propagates immediately: by the time
/// [Source::write] returns, every derived value is consistent and every affected observer ran once.
///
/// ## Implementation
///
/// Internally this is a vector of node slots. Derived nodes record which nodes they read
/// (through [RxInput]) every time they run, so inputs may change between runs.
/// Each node has a height, one more than its tallest input, and dirty nodes recompute in
/// height order so nobody reads a stale input.
///
/// A mutation runs in passes:
/// 1. commit written source values which differ from the current ones (by the source's predicate),
/// 2. recompute dirty derived nodes lowest-height first,
/// 3. notify the observers of every node which changed, and rerun [RxGraph::run_crx] effects.
///
/// Writes made while a pass runs (e.g. from an observer) are queued for the next pass.
///
/// Handles ([Rx], [Source]) are reference counted. When the last handle of a node is dropped,
/// the node is collected once no propagation is running. Slots are never reused.
///
/// The graph and handles have an ID so that you can't read one graph's node from another graph's
/// computation. This is checked at runtime.
pub struct RxGraph(Rc<GraphCore>);

/// Non-owning reference to an [RxGraph].
///
/// Observers and computations live inside the graph, so they must not own it.
#[derive(Debug, Clone)]
pub struct WeakRxGraph(Weak<GraphCore>);

/// Lets you read nodes inside a computation, recording them as inputs.
pub struct RxInput<'a> {
    graph: &'a GraphCore,
    reads: RefCell<Vec<usize>>
}

pub(crate) struct GraphCore {
    uid: RxGraphUid,
    config: GraphConfig,
    nodes: RefCell<Vec<Option<RxImpl>>>,
    state: RefCell<PropagationState>,
    // Nodes whose last handle dropped. Separate from `nodes` because handles drop at awkward times.
    dead: RefCell<Vec<usize>>
}

#[derive(Debug, Default)]
struct PropagationState {
    batch_depth: usize,
    propagating: bool,
    pending_writes: Vec<usize>,
    dirty: BinaryHeap<Reverse<(usize, usize)>>,
    changed: Vec<usize>
}

enum Notification {
    Observers(Value, Vec<Weak<ObserverFn>>),
    Effect
}

struct PropagationGuard<'a>(&'a GraphCore);

struct BatchGuard<'a>(&'a GraphCore);

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            pass_limit: 1024
        }
    }
}

impl GraphConfig {
    pub fn with_pass_limit(mut self, pass_limit: usize) -> Self {
        self.pass_limit = pass_limit;
        self
    }
}

impl RxGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        RxGraph(Rc::new(GraphCore {
            uid: RxGraphUid::next(),
            config,
            nodes: RefCell::new(Vec::new()),
            state: RefCell::new(PropagationState::default()),
            dead: RefCell::new(Vec::new())
        }))
    }

    pub fn config(&self) -> &GraphConfig {
        &self.0.config
    }

    /// Create a [Source] whose writes are ignored when `==` to the current value.
    pub fn source<T: Clone + PartialEq + 'static>(&self, init: T) -> Source<T> {
        self.source_with_eq(init, <T as PartialEq>::eq)
    }

    /// Create a [Source] with an explicit equality predicate.
    ///
    /// Use this for values without structural equality (e.g. external objects compared by identity).
    pub fn source_with_eq<T: Clone + 'static>(&self, init: T, eq: impl Fn(&T, &T) -> bool + 'static) -> Source<T> {
        Source::new(self.0.new_source(init, erase_eq(eq)))
    }

    /// A node which never changes, so it can be composed with ones that do.
    pub fn constant<T: 'static>(&self, value: T) -> Rx<T> {
        Rx::new(self.0.add_node(RxImpl::new(RxKind::Constant, Rc::new(value), None)))
    }

    /// Create a computed value.
    ///
    /// Every node read through the [RxInput] becomes an input, and the inputs are re-recorded
    /// on each run, so the closure may read different nodes depending on what it sees.
    pub fn new_crx<T: 'static>(&self, compute: impl FnMut(&RxInput<'_>) -> T + 'static) -> Rx<T> {
        fatal(self.0.new_crx(compute, None))
    }

    /// Create a computed value which only notifies dependents and observers when `eq` says it changed.
    pub fn new_crx_eq<T: 'static>(&self, eq: impl Fn(&T, &T) -> bool + 'static, compute: impl FnMut(&RxInput<'_>) -> T + 'static) -> Rx<T> {
        fatal(self.0.new_crx(compute, Some(erase_eq(eq))))
    }

    /// Run a closure now and whenever the nodes it read change, without creating any outputs (for side-effects).
    ///
    /// Reruns happen alongside observers, after every derived value of the update is recomputed,
    /// so the closure runs once per update and only sees settled values.
    /// It stops running as soon as the returned [Disposable] is released, even mid-update.
    pub fn run_crx(&self, mut effect: impl FnMut(&RxInput<'_>) + 'static) -> Disposable {
        let recipe: Recipe = Box::new(move |input| {
            effect(input);
            Rc::new(()) as Value
        });
        let node = fatal(self.0.add_derived(RxKind::Effect, recipe, None));
        Disposable::new(move || drop(node))
    }

    /// Flatten a fixed list of nodes into one node holding their values.
    pub fn flatten<T: Clone + 'static>(&self, members: Vec<Rx<T>>) -> Rx<Vec<T>> {
        self.constant(members).flatten()
    }

    /// Run `f`, deferring propagation of every write it makes until it returns.
    ///
    /// Observers never see a state where only some of the writes were applied.
    pub fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
        fatal(self.try_batch(f))
    }

    pub fn try_batch<R>(&self, f: impl FnOnce() -> R) -> Result<R> {
        self.0.batch(f)
    }

    /// Number of nodes which haven't been collected.
    pub fn live_nodes(&self) -> usize {
        self.0.collect_garbage();
        self.0.nodes.borrow().iter().filter(|slot| slot.is_some()).count()
    }

    pub fn downgrade(&self) -> WeakRxGraph {
        WeakRxGraph(Rc::downgrade(&self.0))
    }

    #[cfg(test)]
    pub(crate) fn core(&self) -> &Rc<GraphCore> {
        &self.0
    }
}

impl Default for RxGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for RxGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

impl WeakRxGraph {
    /// The graph if it's still alive.
    ///
    /// Don't hold on to the result inside the graph's own observers.
    pub fn upgrade(&self) -> Option<RxGraph> {
        self.0.upgrade().map(RxGraph)
    }
}

impl<'a> RxInput<'a> {
    fn new(graph: &'a GraphCore) -> Self {
        RxInput {
            graph,
            reads: RefCell::new(Vec::new())
        }
    }

    /// Read a node's current value and record it as an input.
    pub(crate) fn read(&self, node: &NodeRef) -> Result<Value> {
        if node.uid() != self.graph.uid {
            return Err(RxError::ForeignHandle);
        }
        self.reads.borrow_mut().push(node.index());
        Ok(self.graph.current(node.index()))
    }

    fn into_reads(self) -> Vec<usize> {
        let mut reads = self.reads.into_inner();
        let mut seen = Vec::with_capacity(reads.len());
        reads.retain(|index| {
            if seen.contains(index) {
                false
            } else {
                seen.push(*index);
                true
            }
        });
        reads
    }
}

impl<'a> Debug for RxInput<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RxInput")
            .field("uid", &self.graph.uid)
            .field("reads", &self.reads.borrow())
            .finish()
    }
}

impl GraphCore {
    pub(crate) fn uid(&self) -> RxGraphUid {
        self.uid
    }

    #[cfg(test)]
    pub(crate) fn heights(&self) -> Vec<usize> {
        self.nodes.borrow().iter().map(|slot| slot.as_ref().map_or(usize::MAX, |rx| rx.height)).collect()
    }

    fn add_node(self: &Rc<Self>, rx: RxImpl) -> NodeRef {
        let index = {
            let mut nodes = self.nodes.borrow_mut();
            nodes.push(Some(rx));
            nodes.len() - 1
        };
        self.collect_garbage();
        NodeRef::new(self, index)
    }

    fn new_source<T: 'static>(self: &Rc<Self>, init: T, eq: EqFn) -> NodeRef {
        self.add_node(RxImpl::new(RxKind::Source, Rc::new(init), Some(eq)))
    }

    pub(crate) fn new_crx<T: 'static>(self: &Rc<Self>, mut compute: impl FnMut(&RxInput<'_>) -> T + 'static, eq: Option<EqFn>) -> Result<Rx<T>> {
        let recipe: Recipe = Box::new(move |input| Rc::new(compute(input)));
        Ok(Rx::new(self.add_derived(RxKind::Derived, recipe, eq)?))
    }

    fn add_derived(self: &Rc<Self>, kind: RxKind, mut recipe: Recipe, eq: Option<EqFn>) -> Result<NodeRef> {
        let input = RxInput::new(self);
        let init = self.batch(|| recipe(&input))?;
        let inputs = input.into_reads();

        let index = {
            let mut nodes = self.nodes.borrow_mut();
            let index = nodes.len();
            let mut height = 0;
            for &input in &inputs {
                let input = nodes[input].as_mut().expect("RxRef is corrupt: input was collected");
                input.dependents.push(index);
                height = height.max(input.height + 1);
            }
            trace!("RxGraph {:?}: new {:?} node {} at height {} with inputs {:?}", self.uid, kind, index, height, inputs);
            nodes.push(Some(RxImpl::derived(kind, init, eq, recipe, inputs, height)));
            index
        };
        self.collect_garbage();
        Ok(NodeRef::new(self, index))
    }

    /// The committed value of a node
    pub(crate) fn current(&self, index: usize) -> Value {
        let nodes = self.nodes.borrow();
        nodes[index].as_ref().expect("RxRef is corrupt: node was collected").current.clone()
    }

    /// The written value of a node if it's pending, otherwise the committed one
    pub(crate) fn latest(&self, index: usize) -> Value {
        let nodes = self.nodes.borrow();
        nodes[index].as_ref().expect("RxRef is corrupt: node was collected").latest()
    }

    /// Write a new value to a source. Propagates unless a batch or propagation is already running.
    pub(crate) fn write(&self, index: usize, value: Value) -> Result<()> {
        let replaced = {
            let mut nodes = self.nodes.borrow_mut();
            let rx = nodes[index].as_mut().expect("RxRef is corrupt: node was collected");
            debug_assert_eq!(rx.kind, RxKind::Source, "only sources can be written");
            let replaced = rx.next.replace(value);
            if replaced.is_none() {
                self.state.borrow_mut().pending_writes.push(index);
            }
            replaced
        };
        drop(replaced);
        self.propagate()
    }

    pub(crate) fn batch<R>(&self, f: impl FnOnce() -> R) -> Result<R> {
        let result = {
            self.state.borrow_mut().batch_depth += 1;
            let _guard = BatchGuard(self);
            f()
        };
        self.propagate()?;
        Ok(result)
    }

    /// Register an observer and call it with the node's current value.
    pub(crate) fn subscribe(&self, index: usize, callback: &Rc<ObserverFn>) -> Result<()> {
        let value = {
            let mut nodes = self.nodes.borrow_mut();
            let rx = nodes[index].as_mut().expect("RxRef is corrupt: node was collected");
            rx.observers.push(ObserverEntry {
                callback: Rc::downgrade(callback),
                seen: rx.generation
            });
            rx.current.clone()
        };
        // Writes the observer makes are handled after it returns
        self.batch(|| {
            let mut callback = callback.borrow_mut();
            (**callback)(&*value)
        })
    }

    /// Called when the last handle of a node drops.
    ///
    /// The node stops recomputing right away, but stays in its slot until the graph is idle.
    pub(crate) fn release_node(&self, index: usize) {
        if let Ok(mut nodes) = self.nodes.try_borrow_mut() {
            if let Some(rx) = nodes[index].as_mut() {
                rx.released = true;
            }
        }
        self.dead.borrow_mut().push(index);
        self.collect_garbage();
    }

    fn is_busy(&self) -> bool {
        match self.state.try_borrow() {
            Ok(state) => state.propagating || state.batch_depth > 0,
            Err(_) => true
        }
    }

    pub(crate) fn collect_garbage(&self) {
        loop {
            if self.is_busy() {
                return;
            }
            let next = self.dead.borrow_mut().pop();
            let Some(index) = next else {
                return;
            };
            let collected = {
                let Ok(mut nodes) = self.nodes.try_borrow_mut() else {
                    self.dead.borrow_mut().push(index);
                    return;
                };
                let collected = nodes[index].take();
                if let Some(rx) = &collected {
                    for &input in &rx.inputs {
                        if let Some(input) = nodes[input].as_mut() {
                            input.dependents.retain(|&dependent| dependent != index);
                        }
                    }
                    for &dependent in &rx.dependents {
                        if let Some(dependent) = nodes[dependent].as_mut() {
                            dependent.inputs.retain(|&input| input != index);
                        }
                    }
                }
                collected
            };
            if collected.is_some() {
                debug!("RxGraph {:?}: collected node {}", self.uid, index);
            }
            // May drop more handles, which re-enter `release_node`
            drop(collected);
        }
    }

    fn propagate(&self) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            if state.propagating || state.batch_depth > 0 {
                return Ok(());
            }
            state.propagating = true;
        }
        let guard = PropagationGuard(self);

        let mut passes = 0;
        loop {
            let pending = {
                let mut state = self.state.borrow_mut();
                if state.pending_writes.is_empty() {
                    break;
                }
                take(&mut state.pending_writes)
            };
            passes += 1;
            if passes > self.config.pass_limit {
                warn!("RxGraph {:?}: propagation didn't settle after {} passes", self.uid, self.config.pass_limit);
                self.abandon(pending);
                return Err(RxError::FeedbackLoop { passes: self.config.pass_limit });
            }
            debug!("RxGraph {:?}: pass {} with {} written sources", self.uid, passes, pending.len());

            self.commit_writes(pending);
            if let Err(err) = self.recompute_dirty().and_then(|()| self.notify_changed()) {
                self.abandon(Vec::new());
                return Err(err);
            }
        }

        drop(guard);
        self.collect_garbage();
        Ok(())
    }

    fn commit_writes(&self, pending: Vec<usize>) {
        for index in pending {
            let (next, current, eq) = {
                let mut nodes = self.nodes.borrow_mut();
                let Some(rx) = nodes[index].as_mut() else {
                    continue;
                };
                let Some(next) = rx.next.take() else {
                    continue;
                };
                (next, rx.current.clone(), rx.eq.clone())
            };
            if eq.is_some_and(|eq| eq(&*current, &*next)) {
                trace!("RxGraph {:?}: source {} written with an equal value", self.uid, index);
                continue;
            }
            self.replace_current(index, next);
        }
    }

    fn recompute_dirty(&self) -> Result<()> {
        loop {
            let next = self.state.borrow_mut().dirty.pop();
            let Some(Reverse((height, index))) = next else {
                return Ok(());
            };
            let (mut recipe, old, eq) = {
                let mut nodes = self.nodes.borrow_mut();
                let Some(rx) = nodes[index].as_mut() else {
                    continue;
                };
                if !rx.queued {
                    continue;
                }
                if rx.height != height {
                    // Height was raised after it got queued
                    self.state.borrow_mut().dirty.push(Reverse((rx.height, index)));
                    continue;
                }
                rx.queued = false;
                if rx.released {
                    continue;
                }
                if rx.kind == RxKind::Effect {
                    // Runs in the notify phase, once every input is settled
                    if !rx.did_recompute {
                        rx.did_recompute = true;
                        self.state.borrow_mut().changed.push(index);
                    }
                    continue;
                }
                let Some(recipe) = rx.recipe.take() else {
                    continue;
                };
                (recipe, rx.current.clone(), rx.eq.clone())
            };

            trace!("RxGraph {:?}: recompute node {} at height {}", self.uid, index, height);
            let input = RxInput::new(self);
            let value = recipe(&input);
            let inputs = input.into_reads();
            self.restore_recipe(index, recipe);
            if self.relink(index, inputs)? {
                // Read an input which may not be recomputed yet, so this value may be stale
                trace!("RxGraph {:?}: node {} read a taller input, requeued", self.uid, index);
                drop(value);
                self.enqueue(index);
                continue;
            }

            if eq.is_some_and(|eq| eq(&*old, &*value)) {
                trace!("RxGraph {:?}: node {} recomputed to an equal value", self.uid, index);
                continue;
            }
            self.replace_current(index, value);
        }
    }

    fn restore_recipe(&self, index: usize, recipe: Recipe) {
        let orphaned = {
            let mut nodes = self.nodes.borrow_mut();
            match nodes[index].as_mut() {
                Some(rx) => {
                    rx.recipe = Some(recipe);
                    None
                }
                None => Some(recipe)
            }
        };
        drop(orphaned);
    }

    /// Replace a derived node's inputs with the ones it just read. Returns whether its height was raised.
    fn relink(&self, index: usize, inputs: Vec<usize>) -> Result<bool> {
        if inputs.contains(&index) {
            return Err(RxError::Cycle { node: index });
        }
        let mut nodes = self.nodes.borrow_mut();
        let Some(rx) = nodes[index].as_mut() else {
            return Ok(false);
        };
        let old_height = rx.height;
        let old_inputs = std::mem::replace(&mut rx.inputs, inputs.clone());
        for &input in old_inputs.iter().filter(|input| !inputs.contains(input)) {
            if let Some(input) = nodes[input].as_mut() {
                input.dependents.retain(|&dependent| dependent != index);
            }
        }
        let mut required_height = 0;
        for &input in &inputs {
            if let Some(input_rx) = nodes[input].as_mut() {
                if !old_inputs.contains(&input) {
                    input_rx.dependents.push(index);
                }
                required_height = required_height.max(input_rx.height + 1);
            }
        }
        if required_height <= old_height {
            return Ok(false);
        }
        raise_height(&mut nodes[..], index, required_height)?;
        Ok(true)
    }

    fn replace_current(&self, index: usize, value: Value) {
        let (old, first_change, dependents) = {
            let mut nodes = self.nodes.borrow_mut();
            let Some(rx) = nodes[index].as_mut() else {
                return;
            };
            let old = std::mem::replace(&mut rx.current, value);
            rx.generation += 1;
            let first_change = !rx.did_recompute;
            rx.did_recompute = true;
            (old, first_change, rx.dependents.clone())
        };
        if first_change {
            self.state.borrow_mut().changed.push(index);
        }
        for dependent in dependents {
            self.enqueue(dependent);
        }
        // The old value may hold handles, so it drops outside of any borrow
        drop(old);
    }

    fn enqueue(&self, index: usize) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(rx) = nodes[index].as_mut() {
            if !rx.queued && !rx.released {
                rx.queued = true;
                self.state.borrow_mut().dirty.push(Reverse((rx.height, index)));
            }
        }
    }

    fn notify_changed(&self) -> Result<()> {
        let changed = take(&mut self.state.borrow_mut().changed);
        let mut notifications = {
            let mut nodes = self.nodes.borrow_mut();
            changed
                .into_iter()
                .filter_map(|index| {
                    let rx = nodes[index].as_mut()?;
                    rx.did_recompute = false;
                    let notification = match rx.kind {
                        RxKind::Effect => Notification::Effect,
                        _ => Notification::Observers(rx.current.clone(), rx.observers_to_notify())
                    };
                    Some((rx.height, index, notification))
                })
                .collect::<Vec<_>>()
        };
        notifications.sort_by_key(|(height, index, _)| (*height, *index));

        for (_, index, notification) in notifications {
            match notification {
                Notification::Effect => self.run_effect(index)?,
                Notification::Observers(value, observers) => {
                    for observer in observers {
                        // Released subscriptions (even ones released by an earlier observer in this loop) are skipped
                        let Some(observer) = observer.upgrade() else {
                            continue;
                        };
                        trace!("RxGraph {:?}: notify observer of node {}", self.uid, index);
                        let mut callback = observer.borrow_mut();
                        (**callback)(&*value);
                    }
                }
            }
        }
        Ok(())
    }

    /// Rerun a [RxGraph::run_crx] closure unless it was released earlier in this update.
    fn run_effect(&self, index: usize) -> Result<()> {
        let mut recipe = {
            let mut nodes = self.nodes.borrow_mut();
            let Some(rx) = nodes[index].as_mut().filter(|rx| !rx.released) else {
                return Ok(());
            };
            let Some(recipe) = rx.recipe.take() else {
                return Ok(());
            };
            recipe
        };
        trace!("RxGraph {:?}: run effect {}", self.uid, index);
        let input = RxInput::new(self);
        drop(recipe(&input));
        let inputs = input.into_reads();
        self.restore_recipe(index, recipe);
        // Nothing depends on an effect, so a raised height needs no requeue
        self.relink(index, inputs)?;
        Ok(())
    }

    /// Drop everything queued by a failed propagation so the graph stays usable.
    fn abandon(&self, pending: Vec<usize>) {
        let (pending, dirty, changed) = {
            let mut state = self.state.borrow_mut();
            let mut pending_writes = take(&mut state.pending_writes);
            pending_writes.extend(pending);
            (pending_writes, take(&mut state.dirty), take(&mut state.changed))
        };
        let discarded = {
            let mut nodes = self.nodes.borrow_mut();
            let mut discarded = Vec::new();
            for index in pending {
                if let Some(rx) = nodes[index].as_mut() {
                    discarded.extend(rx.next.take());
                }
            }
            for Reverse((_, index)) in dirty {
                if let Some(rx) = nodes[index].as_mut() {
                    rx.queued = false;
                }
            }
            for index in changed {
                if let Some(rx) = nodes[index].as_mut() {
                    rx.did_recompute = false;
                }
            }
            discarded
        };
        drop(discarded);
    }
}

/// Raise a node's height to at least `height`, and its dependents' above that.
fn raise_height(nodes: &mut [Option<RxImpl>], origin: usize, height: usize) -> Result<()> {
    let mut stack = vec![(origin, height)];
    while let Some((index, height)) = stack.pop() {
        let Some(rx) = nodes[index].as_mut() else {
            continue;
        };
        if rx.height >= height {
            continue;
        }
        rx.height = height;
        for &dependent in &rx.dependents {
            if dependent == origin {
                return Err(RxError::Cycle { node: origin });
            }
            stack.push((dependent, height + 1));
        }
    }
    Ok(())
}

impl<'a> Drop for PropagationGuard<'a> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.0.state.try_borrow_mut() {
            state.propagating = false;
        }
    }
}

impl<'a> Drop for BatchGuard<'a> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.0.state.try_borrow_mut() {
            state.batch_depth -= 1;
        }
    }
}

impl Debug for GraphCore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RxGraph")
            .field("uid", &self.uid)
            .field("config", &self.config)
            .field("nodes", &self.nodes.borrow().len())
            .field("state", &self.state.borrow())
            .finish_non_exhaustive()
    }
}
