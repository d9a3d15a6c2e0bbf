//! Level 2: Schematic Assembly Tests
//!
//! Builds small schematics through a NodeStore and checks that endpoints
//! coalesce, dots follow edits, and a bound DotTracker sees every transition.

mod common;

use common::{init_logging, wire, EventRecorder, TestNode};
use schematic_node::{Coords, DotTracker, NodeEvent, NodeStore, SimplePin, SimpleWire, WireGeometry};
use slint::{Model, VecModel};
use std::rc::Rc;

type Store = NodeStore<SimplePin, SimpleWire>;

/// Attach a wire to the nodes at both of its endpoints, creating them as needed.
///
/// The tracker listens to each node once, from the moment it is created.
fn place_wire(store: &mut Store, tracker: &DotTracker, w: SimpleWire) {
    place_wire_with(store, w, |node| {
        node.on_event(tracker.event_callback());
    });
}

/// Like `place_wire`, running `on_create` on each node the wire creates.
fn place_wire_with<F>(store: &mut Store, w: SimpleWire, on_create: F)
where
    F: Fn(&mut TestNode),
{
    let (start, end) = w.endpoints();
    for pos in [start, end] {
        let created = !store.contains(&pos);
        let node = store.get_or_insert(pos);
        if created {
            on_create(node);
        }
        node.add_wire(w);
    }
}

fn remove_wire(store: &mut Store, w: &SimpleWire) {
    let (start, end) = w.endpoints();
    for pos in [start, end] {
        if let Some(node) = store.get_mut(&pos) {
            node.remove_wire(w);
        }
    }
}

#[test]
fn test_polyline_has_no_dots() {
    init_logging();
    let mut store = Store::new();
    let tracker = DotTracker::new();

    place_wire(&mut store, &tracker, wire(1, (0.0, 0.0), (10.0, 0.0)));
    place_wire(&mut store, &tracker, wire(2, (10.0, 0.0), (10.0, 10.0)));
    place_wire(&mut store, &tracker, wire(3, (10.0, 10.0), (20.0, 10.0)));

    assert_eq!(store.len(), 4);
    assert!(store.dot_positions().is_empty());
    assert!(tracker.is_empty());
}

#[test]
fn test_jittered_endpoints_share_a_node() {
    let mut store = Store::new();
    let tracker = DotTracker::new();

    place_wire(&mut store, &tracker, wire(1, (0.0, 0.0), (10.0, 0.0)));
    place_wire(&mut store, &tracker, wire(2, (10.0004, 0.0003), (10.0, 10.0)));

    assert_eq!(store.len(), 3);
    let corner = store.get(&Coords::new(10.0, 0.0)).map(|n| n.wire_count());
    assert_eq!(corner, Some(2));
}

#[test]
fn test_t_junction_gets_dot() {
    let mut store = Store::new();
    let tracker = DotTracker::new();

    place_wire(&mut store, &tracker, wire(1, (0.0, 0.0), (10.0, 0.0)));
    place_wire(&mut store, &tracker, wire(2, (10.0, 0.0), (20.0, 0.0)));
    assert!(tracker.is_empty());

    let stub = wire(3, (10.0, 0.0), (10.0, 10.0));
    place_wire(&mut store, &tracker, stub);
    assert_eq!(tracker.positions(), vec![Coords::new(10.0, 0.0)]);

    remove_wire(&mut store, &stub);
    assert!(tracker.is_empty());
    assert_eq!(store.remove_empty(), 1, "the stub's far end is now empty");
}

#[test]
fn test_part_pin_on_wire_end_gets_dot() {
    let mut store = Store::new();
    let tracker = DotTracker::new();
    place_wire(&mut store, &tracker, wire(1, (0.0, 0.0), (10.0, 0.0)));

    let pin = SimplePin::new(500);
    if let Some(node) = store.get_mut(&Coords::new(10.0, 0.0)) {
        assert!(node.add_pin(pin));
    }
    assert!(tracker.contains(&Coords::new(10.0, 0.0)));

    if let Some(node) = store.get_mut(&Coords::new(10.0, 0.0)) {
        assert!(node.remove_pin(&pin));
    }
    assert!(tracker.is_empty());
}

#[test]
fn test_tracker_model_follows_store_edits() {
    let mut store = Store::new();
    let tracker = DotTracker::new();
    let model = Rc::new(VecModel::<(f32, f32)>::default());
    tracker.bind_model(model.clone(), |x, y| (x, y));

    place_wire(&mut store, &tracker, wire(1, (0.0, 0.0), (10.0, 0.0)));
    place_wire(&mut store, &tracker, wire(2, (10.0, 0.0), (20.0, 0.0)));
    place_wire(&mut store, &tracker, wire(3, (10.0, 0.0), (10.0, -10.0)));
    place_wire(&mut store, &tracker, wire(4, (20.0, 0.0), (20.0, 10.0)));
    place_wire(&mut store, &tracker, wire(5, (20.0, 0.0), (30.0, 0.0)));

    assert_eq!(model.row_count(), 2);
    let rows: Vec<(f32, f32)> = model.iter().collect();
    assert!(rows.contains(&(10.0, 0.0)));
    assert!(rows.contains(&(20.0, 0.0)));
    assert_eq!(store.dot_positions().len(), 2);
}

#[test]
fn test_clear_visited_after_walk() {
    let mut store = Store::new();
    let tracker = DotTracker::new();
    place_wire(&mut store, &tracker, wire(1, (0.0, 0.0), (10.0, 0.0)));

    for node in store.iter_mut() {
        node.set_visited(true);
    }
    assert!(store.iter().all(|n| n.is_visited()));

    store.clear_visited();
    assert!(store.iter().all(|n| !n.is_visited()));
}

#[test]
fn test_refilled_node_reports_each_transition_once() {
    let mut store = Store::new();
    let recorder = EventRecorder::new();
    let attach = |node: &mut TestNode| recorder.attach(node);
    let junction = Coords::new(10.0, 0.0);

    let a = wire(1, (0.0, 0.0), (10.0, 0.0));
    let b = wire(2, (10.0, 0.0), (20.0, 0.0));
    let c = wire(3, (10.0, 0.0), (10.0, 10.0));

    place_wire_with(&mut store, a, attach);
    remove_wire(&mut store, &a);
    assert!(store.get(&junction).map_or(false, |n| n.is_empty()));

    // The emptied junction is refilled, not recreated
    place_wire_with(&mut store, a, attach);
    place_wire_with(&mut store, b, attach);
    place_wire_with(&mut store, c, attach);
    assert_eq!(*recorder.events.borrow(), vec![NodeEvent::DotAdded(junction)]);

    remove_wire(&mut store, &c);
    assert_eq!(
        *recorder.events.borrow(),
        vec![NodeEvent::DotAdded(junction), NodeEvent::DotRemoved(junction)]
    );
}

#[test]
fn test_removing_dotted_node_clears_tracker() {
    let mut store = Store::new();
    let tracker = DotTracker::new();
    let model = Rc::new(VecModel::<(f32, f32)>::default());
    tracker.bind_model(model.clone(), |x, y| (x, y));
    let junction = Coords::new(10.0, 0.0);

    place_wire(&mut store, &tracker, wire(1, (0.0, 0.0), (10.0, 0.0)));
    place_wire(&mut store, &tracker, wire(2, (10.0, 0.0), (20.0, 0.0)));
    place_wire(&mut store, &tracker, wire(3, (10.0, 0.0), (10.0, 10.0)));
    assert!(tracker.contains(&junction));

    let removed = store.remove(&junction);
    assert_eq!(removed.map(|n| n.wire_count()), Some(3));
    assert!(tracker.is_empty());
    assert_eq!(model.row_count(), 0);
}
