use rx_incremental::*;
use test_log::test;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Observe `rx`, recording every value it's called with.
fn record<T: Clone + 'static>(rx: &Rx<T>) -> (Rc<RefCell<Vec<T>>>, Disposable) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log2 = log.clone();
    let observer = rx.observe(move |value: &T| log2.borrow_mut().push(value.clone()));
    (log, observer)
}

#[test]
fn test_source_write_read() {
    let g = RxGraph::new();
    let s = g.source(1);
    assert_eq!(s.read(), 1);
    assert_eq!(s.rx().read(), 1);
    s.write(2);
    assert_eq!(s.read(), 2);
    s.modify(|x| x * 10);
    assert_eq!(s.read(), 20);
    assert_eq!(s.rx().with(|x| x + 1), 21);
}

#[test]
fn test_equal_write_does_not_notify() {
    let g = RxGraph::new();
    let s = g.source(String::from("a"));
    let (log, _observer) = record(s.rx());
    s.write(String::from("a"));
    assert_eq!(*log.borrow(), vec!["a"]);
    s.write(String::from("b"));
    assert_eq!(*log.borrow(), vec!["a", "b"]);

    // Custom predicate: only the length matters
    let t = g.source_with_eq(String::from("xy"), |a, b| a.len() == b.len());
    let (log, _observer2) = record(t.rx());
    t.write(String::from("zw"));
    assert_eq!(t.read(), "xy");
    t.write(String::from("xyz"));
    assert_eq!(*log.borrow(), vec!["xy", "xyz"]);
}

#[test]
fn test_on_off() {
    let g = RxGraph::new();
    let s = g.source(false);
    let d = s.rx().map(|on| if *on { "on" } else { "off" });
    let (log, _observer) = record(&d);
    assert_eq!(*log.borrow(), vec!["off"]);
    s.write(true);
    assert_eq!(*log.borrow(), vec!["off", "on"]);
    s.write(true);
    assert_eq!(*log.borrow(), vec!["off", "on"]);
}

#[test]
fn test_map_chain() {
    let g = RxGraph::new();
    let s = g.source(1);
    let computed = Rc::new(Cell::new(0));
    let computed2 = computed.clone();
    let tail = s.rx().map(|x| x + 1).map(move |x| {
        computed2.set(computed2.get() + 1);
        x * 10
    });
    let (log, _observer) = record(&tail);
    assert_eq!(computed.get(), 1);

    s.write(4);
    assert_eq!(tail.read(), 50);
    assert_eq!(computed.get(), 2);
    assert_eq!(*log.borrow(), vec![20, 50]);
}

#[test]
fn test_diamond_is_glitch_free() {
    let g = RxGraph::new();
    let s = g.source(1);
    let doubled = s.rx().map(|x| x * 2);
    let tripled = s.rx().map(|x| x * 3);
    let pairs = Rc::new(RefCell::new(Vec::new()));
    let pairs2 = pairs.clone();
    let sum = doubled.combine(&tripled, move |a, b| {
        pairs2.borrow_mut().push((*a, *b));
        a + b
    });
    s.write(2);
    s.write(3);
    assert_eq!(sum.read(), 15);
    assert_eq!(*pairs.borrow(), vec![(2, 3), (4, 6), (6, 9)]);
}

#[test]
fn test_combine_change_notifies_once() {
    let g = RxGraph::new();
    let x = g.source(1);
    let y = g.source(2);
    let sum = x.rx().combine(y.rx(), |x, y| x + y);
    let (log, _observer) = record(&sum);

    let y2 = y.clone();
    let returned = x.change(move |x| {
        *x = 10;
        y2.write(20);
        "done"
    });
    assert_eq!(returned, "done");
    assert_eq!(*log.borrow(), vec![3, 30]);

    g.batch(|| {
        x.write(100);
        assert_eq!(x.read(), 100);
        // Not propagated yet
        assert_eq!(sum.read(), 30);
        y.write(200);
    });
    assert_eq!(*log.borrow(), vec![3, 30, 300]);
}

#[test]
fn test_distinct_and_select() {
    let g = RxGraph::new();
    let s = g.source((1, "a"));
    let (log, _observer) = record(&s.rx().select(|(n, _)| n % 2));
    s.write((3, "b"));
    s.write((4, "b"));
    assert_eq!(*log.borrow(), vec![1, 0]);

    let parity = s.rx().map(|(n, _)| n % 2);
    let (log, _observer2) = record(&parity.distinct());
    s.write((6, "c"));
    s.write((7, "c"));
    assert_eq!(*log.borrow(), vec![0, 1]);

    let (log, _observer3) = record(&s.rx().map_eq(|a: &usize, b| a == b, |(_, name)| name.len()));
    s.write((8, "d"));
    assert_eq!(*log.borrow(), vec![1]);
}

#[test]
fn test_flatten_tracks_membership() {
    let g = RxGraph::new();
    let a = g.source(1);
    let b = g.source(2);
    let b_computed = Rc::new(Cell::new(0));
    let b_computed2 = b_computed.clone();
    let a_member = a.rx().map(|x| *x);
    let b_member = b.rx().map(move |x| {
        b_computed2.set(b_computed2.get() + 1);
        *x
    });
    let list = g.source(vec![a_member.clone(), b_member.clone()]);
    let flat = list.rx().flatten();
    let (log, _observer) = record(&flat);

    a.write(10);
    assert_eq!(flat.read(), vec![10, 2]);
    assert_eq!(b_computed.get(), 1);

    list.write(vec![b_member.clone(), a_member.clone()]);
    assert_eq!(flat.read(), vec![2, 10]);

    list.write(vec![a_member.clone()]);
    b.write(3);
    assert_eq!(flat.read(), vec![10]);
    assert_eq!(*log.borrow(), vec![vec![1, 2], vec![10, 2], vec![2, 10], vec![10]]);
}

#[test]
fn test_flatten_fixed_list_and_join() {
    let g = RxGraph::new();
    let a = g.source(1);
    let flat = g.flatten(vec![g.constant(0), a.rx().clone()]);
    a.write(5);
    assert_eq!(flat.read(), vec![0, 5]);

    let b = g.source(2);
    let current = g.source(a.rx().clone());
    let joined = current.rx().join();
    let (log, _observer) = record(&joined);
    current.write(b.rx().clone());
    a.write(6);
    b.write(7);
    assert_eq!(joined.read(), 7);
    assert_eq!(*log.borrow(), vec![5, 2, 7]);
}

#[test]
fn test_dynamic_inputs() {
    let g = RxGraph::new();
    let use_left = g.source(true);
    let left = g.source(1);
    let right = g.source(2);
    let (use_left2, left2, right2) = (use_left.rx().clone(), left.rx().clone(), right.rx().clone());
    let chosen = g.new_crx(move |cx| if use_left2.get(cx) { left2.get(cx) } else { right2.get(cx) });
    let (log, _observer) = record(&chosen);
    right.write(3);
    use_left.write(false);
    left.write(4);
    right.write(5);
    assert_eq!(*log.borrow(), vec![1, 3, 5]);
}

#[test]
fn test_observers_run_in_registration_order() {
    let g = RxGraph::new();
    let s = g.source(0);
    let log = Rc::new(RefCell::new(Vec::new()));
    let observers = (1..=3)
        .map(|id| {
            let log = log.clone();
            s.rx().observe(move |x| log.borrow_mut().push((id, *x)))
        })
        .collect::<Vec<_>>();
    log.borrow_mut().clear();
    s.write(1);
    assert_eq!(*log.borrow(), vec![(1, 1), (2, 1), (3, 1)]);
    drop(observers);
    s.write(2);
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn test_released_observer_is_skipped_mid_update() {
    let g = RxGraph::new();
    let s = g.source(0);
    let second: Rc<RefCell<Option<Disposable>>> = Rc::new(RefCell::new(None));
    let second2 = second.clone();
    let _first = s.rx().observe(move |x| {
        if *x > 0 {
            second2.borrow_mut().take();
        }
    });
    let calls = Rc::new(Cell::new(0));
    let calls2 = calls.clone();
    *second.borrow_mut() = Some(s.rx().observe(move |_| calls2.set(calls2.get() + 1)));
    s.write(1);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_reentrant_writes_are_queued() {
    let g = RxGraph::new();
    let a = g.source(0);
    let b = g.source(0);
    let log = Rc::new(RefCell::new(Vec::new()));
    let (b2, log2) = (b.clone(), log.clone());
    let _a_observer = a.rx().observe(move |x| {
        log2.borrow_mut().push(format!("a={}", x));
        b2.write(x * 10);
    });
    let log3 = log.clone();
    let _pair_observer = a
        .rx()
        .map(|x| *x)
        .combine(b.rx(), |a, b| (*a, *b))
        .observe(move |(a, b)| log3.borrow_mut().push(format!("pair={},{}", a, b)));
    log.borrow_mut().clear();

    a.write(1);
    assert_eq!(*log.borrow(), vec!["a=1", "pair=1,0", "pair=1,10"]);
    assert_eq!(b.read(), 10);
}

#[test]
fn test_observer_registered_during_update_runs_once() {
    let g = RxGraph::new();
    let s = g.source(0);
    let calls = Rc::new(Cell::new(0));
    let late = Rc::new(RefCell::new(Vec::new()));
    let (s2, calls2, late2) = (s.clone(), calls.clone(), late.clone());
    let _observer = s.rx().map(|x| *x).observe(move |x| {
        if *x == 1 {
            let calls = calls2.clone();
            late2.borrow_mut().push(s2.rx().observe(move |_| calls.set(calls.get() + 1)));
        }
    });
    s.write(1);
    assert_eq!(calls.get(), 1);
    s.write(2);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_feedback_loop_is_reported() {
    let g = RxGraph::with_config(GraphConfig::default().with_pass_limit(8));
    assert_eq!(g.config().pass_limit, 8);
    let s = g.source(0);
    let s2 = s.clone();
    let result = s.rx().try_observe(move |x| s2.write(x + 1));
    assert_eq!(result.err(), Some(RxError::FeedbackLoop { passes: 8 }));

    // The graph is still usable
    s.try_write(100).unwrap();
    assert_eq!(s.read(), 100);
}

#[test]
#[should_panic(expected = "did not settle")]
fn test_feedback_loop_panics() {
    let g = RxGraph::with_config(GraphConfig::default().with_pass_limit(8));
    let s = g.source(0);
    let s2 = s.clone();
    let _observer = s.rx().observe(move |x| s2.write(x + 1));
}

#[test]
#[should_panic(expected = "different RxGraph")]
fn test_foreign_handle_panics() {
    let g1 = RxGraph::new();
    let g2 = RxGraph::new();
    let s = g1.source(1);
    let _crx = g2.new_crx(move |cx| s.rx().get(cx));
}

#[test]
fn test_dropped_graph() {
    let g = RxGraph::new();
    let s = g.source(1);
    let weak = g.downgrade();
    assert!(weak.upgrade().is_some());
    drop(g);
    assert!(weak.upgrade().is_none());
    assert_eq!(s.try_write(2), Err(RxError::GraphDropped));
    assert_eq!(s.try_read(), Err(RxError::GraphDropped));
}

#[test]
fn test_nodes_are_collected() {
    let g = RxGraph::new();
    let s = g.source(1);
    assert_eq!(g.live_nodes(), 1);
    {
        let m = s.rx().map(|x| x + 1).map(|x| x * 2);
        let _observer = m.observe(|_| {});
        assert_eq!(g.live_nodes(), 3);
    }
    assert_eq!(g.live_nodes(), 1);

    // A derived node keeps its inputs alive
    let m = {
        let t = g.source(1);
        t.rx().map(|x| x + 1)
    };
    assert_eq!(g.live_nodes(), 3);
    drop(m);
    assert_eq!(g.live_nodes(), 1);
    s.write(2);
    assert_eq!(s.read(), 2);
}

#[test]
fn test_run_crx() {
    let g = RxGraph::new();
    let s = g.source(1);
    let side_effect = Rc::new(Cell::new(0));
    let (s2, side_effect2) = (s.rx().clone(), side_effect.clone());
    let mut effect = g.run_crx(move |cx| side_effect2.set(side_effect2.get() + s2.get(cx)));
    assert_eq!(side_effect.get(), 1);
    s.write(2);
    assert_eq!(side_effect.get(), 3);
    effect.release();
    s.write(5);
    assert_eq!(side_effect.get(), 3);
}

#[test]
fn test_released_run_crx_stops_mid_update() {
    let g = RxGraph::new();
    let s = g.source(0);
    let t = g.source(0);
    let runs = Rc::new(Cell::new(0));
    let (s2, t2, runs2) = (s.rx().clone(), t.rx().clone(), runs.clone());
    let mut effect = g.run_crx(move |cx| {
        s2.get(cx);
        t2.get(cx);
        runs2.set(runs2.get() + 1);
    });
    assert_eq!(runs.get(), 1);

    // Released before the batch propagates
    g.batch(|| {
        effect.release();
        t.write(1);
    });
    assert_eq!(runs.get(), 1);

    // Released by an observer which runs earlier in the same update, then a write for the next pass
    let runs3 = runs.clone();
    let (s3, t3) = (s.rx().clone(), t.rx().clone());
    let effect = Rc::new(RefCell::new(Some(g.run_crx(move |cx| {
        s3.get(cx);
        t3.get(cx);
        runs3.set(runs3.get() + 1);
    }))));
    assert_eq!(runs.get(), 2);
    let t4 = t.clone();
    let _observer = s.rx().observe(move |x| {
        if *x > 0 {
            effect.borrow_mut().take();
            t4.write(*x);
        }
    });
    s.write(5);
    assert_eq!(t.read(), 5);
    assert_eq!(runs.get(), 2);
}

#[test]
fn test_run_crx_sees_settled_dynamic_inputs() {
    let g = RxGraph::new();
    let s = g.source(0);
    let switch = s.rx().map(|x| *x > 0);
    // Taller than anything the effect reads at first
    let tall = s.rx().map(|x| *x).map(|x| *x).map(|x| *x);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen2 = seen.clone();
    let _effect = g.run_crx(move |cx| {
        if switch.get(cx) {
            seen2.borrow_mut().push(tall.get(cx));
        }
    });
    assert!(seen.borrow().is_empty());
    s.write(5);
    assert_eq!(*seen.borrow(), vec![5]);
    s.write(6);
    assert_eq!(*seen.borrow(), vec![5, 6]);
}

#[test]
fn test_cycle_is_reported() {
    let g = RxGraph::new();
    let current = g.source(g.constant(1));
    let joined = current.rx().join();
    assert_eq!(joined.read(), 1);
    assert!(matches!(current.try_write(joined.clone()), Err(RxError::Cycle { .. })));
}

#[test]
#[should_panic(expected = "dependency cycle")]
fn test_cycle_panics() {
    let g = RxGraph::new();
    let current = g.source(g.constant(1));
    let joined = current.rx().join();
    current.write(joined.clone());
}

#[test]
fn test_readme() {
    // The centralized data dependency graph
    let g = RxGraph::new();

    // Create sources which you can write
    let var1 = g.source(1);
    let var2 = g.source("hello");
    assert_eq!(var1.read(), 1);
    var1.write(2);
    var2.write("world");
    assert_eq!(var2.read(), "world");

    // Create computed values which depend on these sources...
    let crx1 = var1.rx().map(|x| x * 2);
    // ...and other computed values
    let crx2 = var2.rx().combine(&crx1, |s, x| format!("{}-{}", s, x * 2));
    assert_eq!(crx1.read(), 4);
    assert_eq!(crx2.read(), "world-8");

    // Observe them, as long as the returned disposable is alive
    let (log, observer) = record(&crx2);
    var1.write(3);
    var2.write("rust");
    drop(observer);
    var1.write(4);
    assert_eq!(*log.borrow(), vec!["world-8", "world-12", "rust-12"]);
}
