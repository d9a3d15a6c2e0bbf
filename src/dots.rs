//! Connection dot tracking for rendering.
//!
//! [`DotTracker`] listens to [`NodeEvent`]s from any number of nodes and keeps
//! the list of positions that currently show a junction dot. Bind a Slint
//! `VecModel` to it and the model is kept in sync on every transition.
//!
//! # Example
//!
//! ```ignore
//! use schematic_node::{DotTracker, NodeStore};
//!
//! let tracker = DotTracker::new();
//! let model = Rc::new(VecModel::<Dot>::default());
//! tracker.bind_model(model.clone(), |x, y| Dot { x, y });
//! window.set_dots(ModelRc::from(model));
//!
//! let node = store.get_or_insert(pos);
//! node.on_event(tracker.event_callback());
//! ```

use crate::coords::{coords_equal, Coords};
use crate::node::NodeEvent;
use log::debug;
use slint::{Model, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Internal trait for auto-syncing to Slint models.
trait ModelSyncer {
    fn sync(&self, dots: &[Coords]);
}

struct ConcreteModelSyncer<D, F> {
    model: Rc<VecModel<D>>,
    constructor: F,
}

impl<D, F> ModelSyncer for ConcreteModelSyncer<D, F>
where
    D: Clone + 'static,
    F: Fn(f32, f32) -> D,
{
    fn sync(&self, dots: &[Coords]) {
        for (i, dot) in dots.iter().enumerate() {
            let item = (self.constructor)(dot.x as f32, dot.y as f32);
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
        }
        while self.model.row_count() > dots.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

#[derive(Default)]
struct DotState {
    dots: Vec<Coords>,
    syncer: Option<Box<dyn ModelSyncer>>,
}

impl DotState {
    fn apply(&mut self, event: &NodeEvent) {
        let changed = match *event {
            NodeEvent::DotAdded(pos) => {
                if self.dots.iter().any(|dot| coords_equal(dot, &pos)) {
                    false
                } else {
                    self.dots.push(pos);
                    true
                }
            }
            NodeEvent::DotRemoved(pos) => {
                let len_before = self.dots.len();
                self.dots.retain(|dot| !coords_equal(dot, &pos));
                self.dots.len() != len_before
            }
            NodeEvent::VoltageChanged => false,
        };

        if changed {
            debug!("dot set changed ({:?}), {} dots", event, self.dots.len());
            self.sync();
        }
    }

    fn sync(&self) {
        if let Some(syncer) = &self.syncer {
            syncer.sync(&self.dots);
        }
    }
}

/// Collects dot positions reported by nodes.
///
/// Cloning a tracker is cheap; clones share the same dot list.
#[derive(Clone, Default)]
pub struct DotTracker {
    state: Rc<RefCell<DotState>>,
}

impl DotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a listener to register with [`Node::on_event`](crate::Node::on_event).
    ///
    /// ```ignore
    /// node.on_event(tracker.event_callback());
    /// ```
    pub fn event_callback(&self) -> impl Fn(&NodeEvent) + Clone + 'static {
        let state = self.state.clone();
        move |event: &NodeEvent| state.borrow_mut().apply(event)
    }

    /// Feed an event directly, without going through a node listener.
    pub fn handle_event(&self, event: &NodeEvent) {
        self.state.borrow_mut().apply(event);
    }

    /// Bind to a Slint model for automatic synchronization.
    ///
    /// The model is filled immediately and updated after every dot change.
    ///
    /// # Arguments
    ///
    /// * `model` - The VecModel to sync to
    /// * `constructor` - Function to create dot items from (x, y)
    pub fn bind_model<D, F>(&self, model: Rc<VecModel<D>>, constructor: F)
    where
        D: Clone + 'static,
        F: Fn(f32, f32) -> D + 'static,
    {
        let mut state = self.state.borrow_mut();
        state.syncer = Some(Box::new(ConcreteModelSyncer { model, constructor }));
        state.sync();
    }

    /// Current dot positions, in the order they appeared.
    pub fn positions(&self) -> Vec<Coords> {
        self.state.borrow().dots.clone()
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.state.borrow().dots.iter().any(|dot| coords_equal(dot, pos))
    }

    pub fn len(&self) -> usize {
        self.state.borrow().dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().dots.is_empty()
    }

    /// Forget all dots. A bound model is emptied too.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.dots.clear();
        state.sync();
    }
}
