//! Property-based tests for state node behavior.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use stratum::action::{ActionError, ActionList, ActionRef};
use stratum::builder::{region_of, StateNodeBuilder};
use stratum::core::StateContext;
use stratum::node::{Content, Phase, StateNode};
use stratum::{event_enum, state_enum};

state_enum! {
    enum TestState {
        Root,
        A,
        B,
        C,
        D,
    }
}

event_enum! {
    enum TestEvent {
        Start,
        Stop,
        Pause,
        Resume,
    }
}

prop_compose! {
    fn arbitrary_event()(variant in 0..4u8) -> TestEvent {
        match variant {
            0 => TestEvent::Start,
            1 => TestEvent::Stop,
            2 => TestEvent::Pause,
            _ => TestEvent::Resume,
        }
    }
}

prop_compose! {
    fn arbitrary_child()(variant in 0..4u8) -> TestState {
        match variant {
            0 => TestState::A,
            1 => TestState::B,
            2 => TestState::C,
            _ => TestState::D,
        }
    }
}

type Log = Arc<Mutex<Vec<String>>>;

fn logging(log: &Log, line: String) -> ActionRef<TestState, TestEvent> {
    let log = log.clone();
    Arc::new(
        move |_: &StateContext<TestState, TestEvent>| -> Result<(), ActionError> {
            log.lock().unwrap().push(line.clone());
            Ok(())
        },
    )
}

fn failing(log: &Log, line: String) -> ActionRef<TestState, TestEvent> {
    let log = log.clone();
    Arc::new(
        move |_: &StateContext<TestState, TestEvent>| -> Result<(), ActionError> {
            log.lock().unwrap().push(line.clone());
            Err(ActionError::new(line.clone()))
        },
    )
}

proptest! {
    #[test]
    fn entry_actions_precede_exit_actions(entries in 0..6usize, exits in 0..6usize) {
        let log = Log::default();
        let entry_list: ActionList<_, _> =
            (0..entries).map(|i| logging(&log, format!("entry {i}"))).collect();
        let exit_list: ActionList<_, _> =
            (0..exits).map(|i| logging(&log, format!("exit {i}"))).collect();
        let node = StateNode::new(
            TestState::Root,
            Vec::new(),
            entry_list,
            exit_list,
            None,
            Content::Leaf,
        );
        let ctx = StateContext::new();

        prop_assert!(node.entry(&TestEvent::Start, &ctx).is_ok());
        prop_assert!(node.exit(&TestEvent::Stop, &ctx).is_ok());

        let expected: Vec<String> = (0..entries)
            .map(|i| format!("entry {i}"))
            .chain((0..exits).map(|i| format!("exit {i}")))
            .collect();
        prop_assert_eq!(&*log.lock().unwrap(), &expected);
    }

    #[test]
    fn failure_stops_at_failing_index(len in 1..8usize, fail_seed in 0..8usize) {
        let fail_at = fail_seed % len;
        let log = Log::default();
        let actions: ActionList<_, _> = (0..len)
            .map(|i| {
                if i == fail_at {
                    failing(&log, format!("action {i}"))
                } else {
                    logging(&log, format!("action {i}"))
                }
            })
            .collect();
        let node = StateNode::new(
            TestState::Root,
            Vec::new(),
            actions,
            ActionList::new(),
            None,
            Content::Leaf,
        );

        let err = node.entry(&TestEvent::Start, &StateContext::new()).unwrap_err();

        prop_assert_eq!(err.index(), fail_at);
        prop_assert_eq!(err.phase(), Phase::Entry);
        prop_assert_eq!(log.lock().unwrap().len(), fail_at + 1);
    }

    #[test]
    fn deferred_round_trip_preserves_membership(
        events in prop::collection::vec(arbitrary_event(), 0..10)
    ) {
        let node: StateNode<TestState, TestEvent> = StateNodeBuilder::new()
            .id(TestState::Root)
            .deferred(events.clone())
            .build()
            .unwrap();

        let expected: HashSet<TestEvent> = events.iter().copied().collect();
        let actual: HashSet<TestEvent> = node.deferred().iter().copied().collect();
        prop_assert_eq!(&actual, &expected);
        prop_assert_eq!(node.deferred().len(), expected.len());

        for event in &events {
            prop_assert!(node.should_defer(event));
        }
    }

    #[test]
    fn deferred_keeps_first_insertion_order(
        events in prop::collection::vec(arbitrary_event(), 0..10)
    ) {
        let node: StateNode<TestState, TestEvent> = StateNodeBuilder::new()
            .id(TestState::Root)
            .deferred(events.clone())
            .build()
            .unwrap();

        let mut seen = Vec::new();
        for event in events {
            if !seen.contains(&event) {
                seen.push(event);
            }
        }
        prop_assert_eq!(node.deferred(), seen.as_slice());
    }

    #[test]
    fn composite_ids_are_root_plus_active_children(
        children in prop::collection::vec(arbitrary_child(), 1..5)
    ) {
        let regions = children
            .iter()
            .enumerate()
            .map(|(i, child)| region_of(format!("r{i}"), StateNode::simple(*child)));
        let node: StateNode<TestState, TestEvent> = StateNodeBuilder::new()
            .id(TestState::Root)
            .regions(regions)
            .build()
            .unwrap();

        prop_assert_eq!(node.ids(), HashSet::from([TestState::Root]));
        prop_assert!(node.is_composite());
        prop_assert_eq!(node.is_orthogonal(), children.len() > 1);

        node.activate(&TestEvent::Start, &StateContext::new()).unwrap();

        let mut expected: HashSet<TestState> = children.iter().copied().collect();
        expected.insert(TestState::Root);
        prop_assert_eq!(node.ids(), expected);
    }

    #[test]
    fn ids_query_is_side_effect_free(children in prop::collection::vec(arbitrary_child(), 0..4)) {
        let regions = children
            .iter()
            .enumerate()
            .map(|(i, child)| region_of(format!("r{i}"), StateNode::simple(*child)));
        let node: StateNode<TestState, TestEvent> = StateNodeBuilder::new()
            .id(TestState::Root)
            .regions(regions)
            .build()
            .unwrap();
        node.activate(&TestEvent::Start, &StateContext::new()).unwrap();

        let first = node.ids();
        let second = node.ids();
        prop_assert_eq!(first, second);
    }
}
