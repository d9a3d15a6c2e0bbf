use crate::coords::Coords;
use std::rc::Rc;

/// Trait for pin data attached to a node.
///
/// Nodes only need pin identity; the pin's own geometry stays with the part
/// that owns it.
pub trait PinRef {
    fn id(&self) -> i32;
}

/// Trait for wire data attached to a node.
///
/// # Example
///
/// ```ignore
/// struct MyWire {
///     id: i32,
///     from: Coords,
///     to: Coords,
/// }
///
/// impl WireGeometry for MyWire {
///     fn id(&self) -> i32 { self.id }
///     fn position_and_length(&self) -> (Coords, Coords) {
///         (self.from, self.to - self.from)
///     }
/// }
/// ```
pub trait WireGeometry {
    fn id(&self) -> i32;
    /// Start position and length vector; the end point is `start + length`.
    fn position_and_length(&self) -> (Coords, Coords);

    fn endpoints(&self) -> (Coords, Coords) {
        let (start, length) = self.position_and_length();
        (start, start + length)
    }
}

impl<T: PinRef + ?Sized> PinRef for Rc<T> {
    fn id(&self) -> i32 {
        (**self).id()
    }
}

impl<T: WireGeometry + ?Sized> WireGeometry for Rc<T> {
    fn id(&self) -> i32 {
        (**self).id()
    }
    fn position_and_length(&self) -> (Coords, Coords) {
        (**self).position_and_length()
    }
}

// === Standard Implementations ===

/// Simple implementation of PinRef
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplePin {
    pub id: i32,
}

impl SimplePin {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

impl PinRef for SimplePin {
    fn id(&self) -> i32 { self.id }
}

/// Simple implementation of WireGeometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleWire {
    pub id: i32,
    pub start: Coords,
    pub length: Coords,
}

impl SimpleWire {
    pub fn new(id: i32, start: Coords, length: Coords) -> Self {
        Self { id, start, length }
    }

    /// Build a wire from its two endpoints.
    pub fn between(id: i32, start: Coords, end: Coords) -> Self {
        Self { id, start, length: end - start }
    }
}

impl WireGeometry for SimpleWire {
    fn id(&self) -> i32 { self.id }
    fn position_and_length(&self) -> (Coords, Coords) { (self.start, self.length) }
}
