//! Electrical connection points.
//!
//! A [`Node`] collects the pins and wires meeting at one schematic position
//! and decides whether that junction needs a connection dot. Every mutation
//! compares the dot state before and after, and listeners registered with
//! [`Node::on_event`] are told only about transitions.
//!
//! # Example
//!
//! ```ignore
//! use schematic_node::{Coords, DotTracker, Node, SimplePin, SimpleWire};
//!
//! let tracker = DotTracker::new();
//! let mut node = Node::new(Coords::new(10.0, 0.0), 0);
//! node.on_event(tracker.event_callback());
//!
//! node.add_wire(SimpleWire::between(1, Coords::new(0.0, 0.0), Coords::new(10.0, 0.0)));
//! node.add_pin(SimplePin::new(100)); // fires DotAdded((10, 0))
//! assert!(tracker.contains(&Coords::new(10.0, 0.0)));
//! ```

use crate::coords::{coords_equal, Coords};
use crate::error::NodeError;
use crate::geometry::{PinRef, WireGeometry};
use log::debug;

/// Notification emitted by a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeEvent {
    /// The node started needing a dot at this position
    DotAdded(Coords),
    /// The node stopped needing a dot at this position
    DotRemoved(Coords),
    /// Connectivity or voltage changed. Never emitted by mutations; see
    /// [`Node::emit_voltage_changed`].
    VoltageChanged,
}

/// Handle returned by [`Node::on_event`], used to unregister the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn Fn(&NodeEvent)>;

/// A junction of pins and wires at one schematic position.
///
/// # Type Parameters
///
/// - `P`: The pin type, must implement [`PinRef`]
/// - `W`: The wire type, must implement [`WireGeometry`]
pub struct Node<P, W> {
    key: Coords,
    number: i32,
    pins: Vec<P>,
    /// Tracked apart from `pins.len()`: removing an absent pin still counts down.
    pin_count: usize,
    wires: Vec<W>,
    visited: bool,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u32,
}

impl<P, W> Node<P, W> {
    /// Create an empty node at `key`.
    ///
    /// `number` is an identifier chosen by the owner and is not used for
    /// connectivity decisions.
    pub fn new(key: Coords, number: i32) -> Self {
        Self {
            key,
            number,
            pins: Vec::new(),
            pin_count: 0,
            wires: Vec::new(),
            visited: false,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn key(&self) -> Coords {
        self.key
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn pin_count(&self) -> usize {
        self.pin_count
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    pub fn pins(&self) -> &[P] {
        &self.pins
    }

    pub fn wires(&self) -> &[W] {
        &self.wires
    }

    /// True when no pins and no wires are attached.
    ///
    /// Empty nodes are not removed automatically; the owner is expected to
    /// discard them.
    pub fn is_empty(&self) -> bool {
        self.pin_count == 0 && self.wires.is_empty()
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Set the traversal mark. The node never changes it on its own.
    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    /// Register a listener for dot transitions and voltage updates.
    ///
    /// Listeners run synchronously, in registration order.
    pub fn on_event<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&NodeEvent) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns `true` if it was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != len_before
    }

    /// Notify listeners that the node's voltage or connectivity changed.
    pub fn emit_voltage_changed(&self) {
        self.emit(&NodeEvent::VoltageChanged);
    }

    fn emit(&self, event: &NodeEvent) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }
}

impl<P, W> Node<P, W>
where
    P: PinRef,
    W: WireGeometry,
{
    pub fn contains_pin(&self, id: i32) -> bool {
        self.pins.iter().any(|p| p.id() == id)
    }

    pub fn contains_wire(&self, id: i32) -> bool {
        self.wires.iter().any(|w| w.id() == id)
    }

    /// Decide whether this junction needs a connection dot.
    ///
    /// - A pin touching any wire always gets a dot.
    /// - Two or more pins, or three or more wires, always get a dot.
    /// - Exactly two wires get a dot unless they share an endpoint. Whether
    ///   the two wires are collinear is not checked.
    /// - Anything less needs no dot.
    pub fn needs_dot(&self) -> bool {
        let pins = self.pin_count;
        let wires = self.wires.len();

        if pins > 0 && wires > 0 {
            debug!("node {} at {}: dot (pins and wires meet)", self.number, self.key);
            return true;
        }
        if pins > 1 || wires > 2 {
            debug!(
                "node {} at {}: dot ({} pins, {} wires)",
                self.number, self.key, pins, wires
            );
            return true;
        }
        if let [first, second] = self.wires.as_slice() {
            let (start1, end1) = first.endpoints();
            let (start2, end2) = second.endpoints();

            let shared_endpoint = coords_equal(&start1, &start2)
                || coords_equal(&start1, &end2)
                || coords_equal(&end1, &end2)
                || coords_equal(&end1, &start2);

            debug!(
                "node {} at {}: two wires, shared endpoint: {}",
                self.number, self.key, shared_endpoint
            );
            return !shared_endpoint;
        }
        false
    }

    /// Attach a pin. Returns `false` if a pin with the same id is already attached.
    pub fn add_pin(&mut self, pin: P) -> bool {
        self.try_add_pin(pin).is_ok()
    }

    /// Detach a pin.
    ///
    /// Returns `false` only when the node has no pins. A pin that is not
    /// attached still counts down the pin count and reports success.
    pub fn remove_pin(&mut self, pin: &P) -> bool {
        self.try_remove_pin(pin).is_ok()
    }

    /// Attach a wire. Returns `false` if a wire with the same id is already attached.
    pub fn add_wire(&mut self, wire: W) -> bool {
        self.try_add_wire(wire).is_ok()
    }

    /// Detach a wire. Returns `false` if the node has no wires or `wire` is
    /// not attached.
    pub fn remove_wire(&mut self, wire: &W) -> bool {
        self.try_remove_wire(wire).is_ok()
    }

    /// Attach a pin, reporting the dot transition it caused, if any.
    pub fn try_add_pin(&mut self, pin: P) -> Result<Option<NodeEvent>, NodeError> {
        let id = pin.id();
        if self.contains_pin(id) {
            debug!("node {}: pin {} already there", self.number, id);
            return Err(NodeError::PinAlreadyPresent(id));
        }

        let before = self.needs_dot();
        self.pins.push(pin);
        self.pin_count += 1;
        Ok(self.notify_added(before))
    }

    /// Detach a pin, reporting the dot transition it caused, if any.
    pub fn try_remove_pin(&mut self, pin: &P) -> Result<Option<NodeEvent>, NodeError> {
        if self.pin_count == 0 {
            return Err(NodeError::NoPins);
        }

        let before = self.needs_dot();
        let id = pin.id();
        if let Some(index) = self.pins.iter().position(|p| p.id() == id) {
            self.pins.swap_remove(index);
        }
        self.pin_count -= 1;
        Ok(self.notify_removed(before))
    }

    /// Attach a wire, reporting the dot transition it caused, if any.
    pub fn try_add_wire(&mut self, wire: W) -> Result<Option<NodeEvent>, NodeError> {
        let id = wire.id();
        if self.contains_wire(id) {
            debug!("node {}: wire {} already there", self.number, id);
            return Err(NodeError::WireAlreadyPresent(id));
        }

        let before = self.needs_dot();
        self.wires.push(wire);
        Ok(self.notify_added(before))
    }

    /// Detach a wire, reporting the dot transition it caused, if any.
    pub fn try_remove_wire(&mut self, wire: &W) -> Result<Option<NodeEvent>, NodeError> {
        if self.wires.is_empty() {
            return Err(NodeError::NoWires);
        }

        let id = wire.id();
        let index = match self.wires.iter().position(|w| w.id() == id) {
            Some(index) => index,
            None => {
                debug!("node {}: wire {} not there", self.number, id);
                return Err(NodeError::WireNotFound(id));
            }
        };

        let before = self.needs_dot();
        self.wires.swap_remove(index);
        Ok(self.notify_removed(before))
    }

    fn notify_added(&self, before: bool) -> Option<NodeEvent> {
        if before || !self.needs_dot() {
            return None;
        }
        let event = NodeEvent::DotAdded(self.key);
        self.emit(&event);
        Some(event)
    }

    fn notify_removed(&self, before: bool) -> Option<NodeEvent> {
        if !before || self.needs_dot() {
            return None;
        }
        let event = NodeEvent::DotRemoved(self.key);
        self.emit(&event);
        Some(event)
    }

    /// Tell listeners a visible dot is going away with the node itself.
    pub(crate) fn retract_dot(&self) -> Option<NodeEvent> {
        if !self.needs_dot() {
            return None;
        }
        let event = NodeEvent::DotRemoved(self.key);
        self.emit(&event);
        Some(event)
    }
}
