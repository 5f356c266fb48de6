#![forbid(unsafe_code)]

//! `Rx` means "reactive value" (or "reactive X"). It is a wrapper for a value which changes,
//! and these changes trigger dependencies to recompute and side effects to re-run.
//!
//! There is an [RxGraph] which stores the entire dependency graph. At its roots are [Source]s,
//! which you write explicitly, and constants. Every other node is computed from other nodes
//! ([Rx::map], [Rx::combine], [Rx::flatten], or in general [RxGraph::new_crx]).
//!
//! Writing a source propagates immediately and in one go: by the time [Source::write] returns,
//! every derived value is consistent with its inputs, and every observer ([Rx::observe]) of a node which changed
//! ran exactly once with the final value. Several writes can be grouped into one update with
//! [Source::change] or [RxGraph::batch], so observers never see half of them applied.
//!
//! Observations return a [Disposable], which stops the observer when released (or dropped).
//! Disposables are collected into containers: a [DisposeBag], or an [Owned] which also holds the
//! object the bindings write into (e.g. a view). Releasing a container releases everything in it,
//! including nested containers. Nodes never own their observers, so nothing leaks through cycles.
//!
//! On top of that, [Owned::bind_presented] shows and hides a child container depending on a node,
//! one transition at a time, and a [Driver] owns the application state and the view built from it.
//!
//! ```
//! use rx_incremental::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let g = RxGraph::new();
//! let switch = g.source(false);
//! let label = switch.rx().map(|on| if *on { "on" } else { "off" });
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let log2 = log.clone();
//! let _observer = label.observe(move |label| log2.borrow_mut().push(*label));
//! switch.write(true);
//! switch.write(true);
//! assert_eq!(*log.borrow(), vec!["off", "on"]);
//! ```

pub(crate) mod dag;
pub(crate) mod dag_uid;
pub(crate) mod rx_impl;
pub(crate) mod rx_ref;
pub(crate) mod combinators;
pub(crate) mod observe;
pub(crate) mod dispose;
pub(crate) mod owned;
pub(crate) mod present;
pub(crate) mod driver;
pub(crate) mod error;

pub use dag::*;
pub use rx_ref::*;
pub use observe::*;
pub use dispose::*;
pub use owned::*;
pub use present::*;
pub use driver::*;
pub use error::RxError;
