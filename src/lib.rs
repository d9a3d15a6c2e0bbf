//! # Schematic Node Library
//!
//! Connection points for schematic capture editors. A node is the junction
//! where component pins and wire segments meet at one position; this crate
//! decides when such a junction must be drawn with a connection dot, so a real
//! connection can be told apart from wires that merely cross.
//!
//! ## Features
//!
//! - **Transition Notifications** - Nodes report `DotAdded`/`DotRemoved` only when the dot state flips
//! - **Trait-Based Architecture** - Pins and wires plug in via `PinRef` and `WireGeometry`
//! - **Jitter-Tolerant Lookup** - Positions within `1e-3` resolve to the same node
//! - **Slint Integration** - `DotTracker` keeps a `VecModel` of dot positions in sync
//!
//! ## Core Types
//!
//! - [`Node`] - Junction of pins and wires with the dot decision
//! - [`NodeStore`] - Position-keyed lookup of nodes
//! - [`DotTracker`] - Collects dot positions for rendering
//! - [`coords_hash`] / [`coords_equal`] - Spatial key comparator
//!
//! ## Example
//!
//! ```ignore
//! use schematic_node::{Coords, NodeStore, SimplePin, SimpleWire};
//!
//! let mut store: NodeStore<SimplePin, SimpleWire> = NodeStore::new();
//! let junction = Coords::new(10.0, 0.0);
//!
//! let node = store.get_or_insert(junction);
//! node.add_wire(SimpleWire::between(1, Coords::new(0.0, 0.0), junction));
//! node.add_pin(SimplePin::new(42));
//! assert!(node.needs_dot());
//! ```

pub mod coords;
pub mod geometry;
pub mod error;
pub mod node;
pub mod store;
pub mod dots;

pub use coords::{coords_equal, coords_hash, on_the_wire, Coords, HASH_EPSILON, ON_WIRE_EPSILON};
pub use geometry::{PinRef, SimplePin, SimpleWire, WireGeometry};
pub use error::NodeError;
pub use node::{ListenerId, Node, NodeEvent};
pub use store::NodeStore;
pub use dots::DotTracker;
