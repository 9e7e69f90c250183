mod common;

use common::*;
use std::rc::Rc;
use viewstack::{CompositeFactory, TransactionOptions, ViewFactory, ViewHandle, ViewId};

fn chain(order: &[&str], calls: &CallLog) -> CompositeFactory {
    let mut composite = CompositeFactory::new();
    for label in order {
        let factory = match *label {
            "a" => StubFactory::new("a", calls.clone())
                .provides(1, "a-1")
                .provides(2, "a-2"),
            "b" => StubFactory::new("b", calls.clone())
                .provides(2, "b-2")
                .provides(3, "b-3"),
            "c" => StubFactory::new("c", calls.clone()).provides_with(
                4,
                "c-4",
                TransactionOptions::builder().add_to_back_stack(true).build(),
            ),
            other => panic!("unknown factory {}", other),
        };
        composite.join_factory(Rc::new(factory));
    }
    composite
}

const ORDERS: [[&str; 3]; 6] = [
    ["a", "b", "c"],
    ["a", "c", "b"],
    ["b", "a", "c"],
    ["b", "c", "a"],
    ["c", "a", "b"],
    ["c", "b", "a"],
];

#[test]
fn unclaimed_ids_resolve_to_nothing_in_every_order() {
    for order in ORDERS {
        let calls = new_call_log();
        let composite = chain(&order, &calls);
        for id in [0, 5, 99, -1] {
            let id = ViewId(id);
            assert!(!composite.is_provided(id), "{:?} claimed {}", order, id);
            assert!(composite.create_instance(id, None).is_none());
            assert!(composite.tag(id).is_none());
            assert!(composite.transaction_options(id, None).is_none());
        }
    }
}

#[test]
fn singly_claimed_ids_route_every_lookup_to_one_factory() {
    for order in ORDERS {
        for (id, owner) in [(1, "a"), (3, "b"), (4, "c")] {
            let calls = new_call_log();
            let composite = chain(&order, &calls);

            assert!(composite.is_provided(ViewId(id)));
            let handle = composite.create_instance(ViewId(id), None).unwrap();
            let tag = composite.tag(ViewId(id)).unwrap();
            composite.transaction_options(ViewId(id), None);

            assert_eq!(handle.kind(), format!("{}Screen", owner));
            assert_eq!(tag, format!("{}-{}", owner, id));
            assert_eq!(answering_factories(&calls, id), vec![owner.to_string()]);
        }
    }
}

#[test]
fn doubly_claimed_id_follows_join_order() {
    for order in ORDERS {
        let calls = new_call_log();
        let composite = chain(&order, &calls);
        let first_owner = order
            .iter()
            .find(|label| **label == "a" || **label == "b")
            .unwrap();

        assert_eq!(
            composite.tag(ViewId(2)),
            Some(format!("{}-2", first_owner))
        );
        assert_eq!(
            answering_factories(&calls, 2),
            vec![first_owner.to_string()]
        );
    }
}

#[test]
fn options_come_from_the_claiming_factory() {
    let calls = new_call_log();
    let composite = chain(&["a", "b", "c"], &calls);
    let options = composite.transaction_options(ViewId(4), None).unwrap();
    assert!(options.add_to_back_stack());
    assert!(composite.transaction_options(ViewId(1), None).is_none());
}

#[test]
fn local_mapping_is_fallback_only() {
    let calls = new_call_log();
    let mut composite = chain(&["a"], &calls);
    composite.register(ViewId(1), "local-1", |_, _| ViewHandle::new("Local"));
    composite.register(ViewId(50), "local-50", |_, _| ViewHandle::new("Local"));

    assert_eq!(composite.tag(ViewId(1)), Some("a-1".to_string()));
    assert_eq!(composite.tag(ViewId(50)), Some("local-50".to_string()));
    assert!(composite.is_provided(ViewId(50)));
}

#[test]
fn nested_composites_resolve_through_the_inner_chain() {
    let calls = new_call_log();
    let inner = chain(&["b"], &calls);
    let mut outer = chain(&["a"], &calls);
    outer.join_factory(Rc::new(inner));

    assert_eq!(outer.tag(ViewId(3)), Some("b-3".to_string()));
    assert_eq!(outer.tag(ViewId(2)), Some("a-2".to_string()));
}
