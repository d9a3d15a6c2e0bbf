use crate::coords::{coords_equal, coords_hash, Coords, HASH_EPSILON};
use crate::geometry::{PinRef, WireGeometry};
use crate::node::Node;
use log::trace;
use std::collections::{HashMap, HashSet};

/// Lookup table of nodes keyed by approximate position.
///
/// Nodes are bucketed by [`coords_hash`] and matched with [`coords_equal`],
/// so endpoints that differ only by floating-point jitter resolve to the same
/// node. Lookups probe the buckets of the query point nudged by
/// [`HASH_EPSILON`] on each axis, which also finds nodes whose key rounds to
/// a neighbouring integer.
///
/// The store only indexes nodes; it does not walk connectivity between them.
pub struct NodeStore<P, W> {
    buckets: HashMap<u32, Vec<Node<P, W>>>,
    len: usize,
    /// Wider than node numbers so it can step past `i32::MAX`.
    next_number: i64,
}

impl<P, W> Default for NodeStore<P, W> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
            len: 0,
            next_number: 0,
        }
    }
}

impl<P, W> NodeStore<P, W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the store.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn candidate_hashes(pos: &Coords) -> Vec<u32> {
        let mut hashes = Vec::with_capacity(9);
        for dx in [0.0, -HASH_EPSILON, HASH_EPSILON] {
            for dy in [0.0, -HASH_EPSILON, HASH_EPSILON] {
                let hash = coords_hash(&Coords::new(pos.x + dx, pos.y + dy));
                if !hashes.contains(&hash) {
                    hashes.push(hash);
                }
            }
        }
        hashes
    }

    /// Bucket hash and index of the node at `pos`.
    fn locate(&self, pos: &Coords) -> Option<(u32, usize)> {
        Self::candidate_hashes(pos).into_iter().find_map(|hash| {
            let bucket = self.buckets.get(&hash)?;
            let index = bucket.iter().position(|node| coords_equal(&node.key(), pos))?;
            Some((hash, index))
        })
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.locate(pos).is_some()
    }

    /// Find the node at `pos`.
    pub fn get(&self, pos: &Coords) -> Option<&Node<P, W>> {
        let (hash, index) = self.locate(pos)?;
        self.buckets.get(&hash)?.get(index)
    }

    /// Find the node at `pos` (mutable).
    pub fn get_mut(&mut self, pos: &Coords) -> Option<&mut Node<P, W>> {
        let (hash, index) = self.locate(pos)?;
        self.buckets.get_mut(&hash)?.get_mut(index)
    }

    /// Return the node at `pos`, creating an empty one if none exists.
    ///
    /// New nodes are numbered sequentially from 0 in creation order.
    pub fn get_or_insert(&mut self, pos: Coords) -> &mut Node<P, W> {
        let (hash, index) = match self.locate(&pos) {
            Some(found) => found,
            None => {
                let number = self.allocate_number();
                trace!("creating node {} at {}", number, pos);

                let hash = coords_hash(&pos);
                let bucket = self.buckets.entry(hash).or_default();
                bucket.push(Node::new(pos, number));
                self.len += 1;
                (hash, bucket.len() - 1)
            }
        };
        &mut self.buckets.entry(hash).or_default()[index]
    }

    /// Next sequential number, or the lowest unused one once the sequence
    /// has run past `i32::MAX`.
    fn allocate_number(&mut self) -> i32 {
        if let Ok(number) = i32::try_from(self.next_number) {
            self.next_number += 1;
            return number;
        }
        let used: HashSet<i32> = self.iter().map(|node| node.number()).collect();
        (0..=i32::MAX)
            .find(|number| !used.contains(number))
            .unwrap_or(i32::MIN)
    }

    /// Insert a node built elsewhere.
    ///
    /// Returns `false` (dropping `node`) if another node already occupies
    /// its position.
    pub fn insert(&mut self, node: Node<P, W>) -> bool {
        let key = node.key();
        if self.contains(&key) {
            trace!("node already present at {}", key);
            return false;
        }
        self.next_number = self.next_number.max(i64::from(node.number()) + 1);
        self.buckets.entry(coords_hash(&key)).or_default().push(node);
        self.len += 1;
        true
    }

    /// Drop every node with no pins and no wires.
    ///
    /// Returns the number of nodes removed.
    pub fn remove_empty(&mut self) -> usize {
        let len_before = self.len;
        for bucket in self.buckets.values_mut() {
            bucket.retain(|node| !node.is_empty());
        }
        self.buckets.retain(|_, bucket| !bucket.is_empty());
        self.len = self.buckets.values().map(Vec::len).sum();
        len_before - self.len
    }

    /// Reset the visited flag on every node.
    pub fn clear_visited(&mut self) {
        for node in self.iter_mut() {
            node.set_visited(false);
        }
    }

    /// Iterate over all nodes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<P, W>> + '_ {
        self.buckets.values().flat_map(|bucket| bucket.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node<P, W>> + '_ {
        self.buckets.values_mut().flat_map(|bucket| bucket.iter_mut())
    }
}

impl<P, W> NodeStore<P, W>
where
    P: PinRef,
    W: WireGeometry,
{
    /// Remove and return the node at `pos`.
    ///
    /// If the node still shows a dot, its listeners receive `DotRemoved`
    /// first so trackers do not keep a dot for a node that is gone.
    pub fn remove(&mut self, pos: &Coords) -> Option<Node<P, W>> {
        let (hash, index) = self.locate(pos)?;
        let bucket = self.buckets.get_mut(&hash)?;
        let node = bucket.swap_remove(index);
        node.retract_dot();
        if bucket.is_empty() {
            self.buckets.remove(&hash);
        }
        self.len -= 1;
        Some(node)
    }

    /// Positions of all nodes that currently need a connection dot.
    pub fn dot_positions(&self) -> Vec<Coords> {
        self.iter()
            .filter(|node| node.needs_dot())
            .map(|node| node.key())
            .collect()
    }
}
