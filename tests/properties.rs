//! Property tests for the cell emission contract.

use proptest::prelude::*;
use spark_cells::{cell, ObservableCell, Subscription};
use std::cell::RefCell;
use std::rc::Rc;

// =============================================================================
// Helpers
// =============================================================================

type Log = Rc<RefCell<Vec<i32>>>;

struct Recorded {
    incoming: Log,
    outgoing: Log,
    _subs: (Subscription, Subscription),
}

fn record(c: &ObservableCell<i32>) -> Recorded {
    let incoming: Log = Rc::default();
    let outgoing: Log = Rc::default();
    let i = c.subscribe_incoming({
        let incoming = incoming.clone();
        move |v| incoming.borrow_mut().push(*v)
    });
    let o = c.subscribe_outgoing({
        let outgoing = outgoing.clone();
        move |v| outgoing.borrow_mut().push(*v)
    });
    Recorded {
        incoming,
        outgoing,
        _subs: (i, o),
    }
}

#[derive(Debug, Clone)]
enum Op {
    Set(i32),
    Push(i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0i32..4).prop_map(Op::Set),
        (0i32..4).prop_map(Op::Push),
    ]
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn set_distinct_emits_once_each(v1 in any::<i32>(), v2 in any::<i32>()) {
        prop_assume!(v1 != v2);
        let c = cell(v1);
        let log = record(&c);

        c.set(v2).unwrap();
        prop_assert_eq!(c.get(), v2);
        prop_assert_eq!(log.incoming.borrow().clone(), vec![v1, v2]);
        prop_assert_eq!(log.outgoing.borrow().clone(), vec![v2]);
    }

    #[test]
    fn set_same_is_silent(v in any::<i32>()) {
        let c = cell(v);
        let log = record(&c);

        prop_assert!(!c.set(v).unwrap());
        prop_assert_eq!(log.incoming.borrow().len(), 1); // replay only
        prop_assert!(log.outgoing.borrow().is_empty());
    }

    #[test]
    fn push_emits_on_both(start in any::<i32>(), pushed in any::<i32>(), bound in any::<bool>()) {
        let c = cell(start);
        if bound {
            c.bind().unwrap();
        }
        let log = record(&c);

        c.push_from_widget(pushed).unwrap();
        prop_assert_eq!(log.incoming.borrow().clone(), vec![start, pushed]);
        prop_assert_eq!(log.outgoing.borrow().clone(), vec![pushed]);
    }

    /// Replays the operation sequence against a plain model of the contract.
    #[test]
    fn emissions_match_model(
        start in 0i32..4,
        before in prop::collection::vec(op(), 0..16),
        after in prop::collection::vec(op(), 0..16),
    ) {
        let c = cell(start);
        let log = record(&c);

        let mut current = start;
        let mut expected_in = vec![start];
        let mut expected_out = Vec::new();

        for (bound, ops) in [(false, &before), (true, &after)] {
            if bound {
                c.bind().unwrap();
            }
            for op in ops {
                match *op {
                    Op::Set(v) => {
                        c.set(v).unwrap();
                        if v != current {
                            current = v;
                            expected_in.push(v);
                            if !bound {
                                expected_out.push(v);
                            }
                        }
                    }
                    Op::Push(v) => {
                        c.push_from_widget(v).unwrap();
                        current = v;
                        expected_in.push(v);
                        expected_out.push(v);
                    }
                }
            }
        }

        prop_assert_eq!(c.get(), current);
        prop_assert_eq!(log.incoming.borrow().clone(), expected_in);
        prop_assert_eq!(log.outgoing.borrow().clone(), expected_out);
    }

    #[test]
    fn late_subscriber_gets_current_once(values in prop::collection::vec(any::<i32>(), 1..8)) {
        let c = cell(0);
        for v in &values {
            c.set(*v).unwrap();
        }
        let log = record(&c);
        prop_assert_eq!(log.incoming.borrow().clone(), vec![*values.last().unwrap()]);
    }

    #[test]
    fn disposed_cell_rejects_writes(v in any::<i32>(), w in any::<i32>()) {
        let c = cell(v);
        c.dispose();
        prop_assert!(c.set(w).is_err());
        prop_assert!(c.push_from_widget(w).is_err());
        prop_assert_eq!(c.get(), v);
    }
}
