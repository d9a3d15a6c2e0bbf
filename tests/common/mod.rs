//! Common test utilities for integration tests.

#![allow(dead_code)]

use schematic_node::{Coords, Node, NodeEvent, SimplePin, SimpleWire};
use std::cell::RefCell;
use std::rc::Rc;

pub type TestNode = Node<SimplePin, SimpleWire>;

/// Install a test logger so `RUST_LOG=debug` shows the dot decisions.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Records every event a node emits.
#[derive(Default, Clone)]
pub struct EventRecorder {
    pub events: Rc<RefCell<Vec<NodeEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register this recorder as a listener on `node`.
    pub fn attach(&self, node: &mut TestNode) {
        let events = self.events.clone();
        node.on_event(move |event| events.borrow_mut().push(*event));
    }

    pub fn count(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn last(&self) -> Option<NodeEvent> {
        self.events.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Wire from `start` to `end`.
pub fn wire(id: i32, start: (f64, f64), end: (f64, f64)) -> SimpleWire {
    SimpleWire::between(id, Coords::from(start), Coords::from(end))
}
