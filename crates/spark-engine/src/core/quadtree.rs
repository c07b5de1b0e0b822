//! # Point quad-tree
//!
//! A region quad-tree over particle positions, used to answer "which
//! particles are near here" without scanning the whole pool.
//!
//! - Each node covers a rectangle and stores up to `capacity` particle refs.
//! - When a leaf overflows it splits into four quadrants (NW, NE, SW, SE) and
//!   pushes everything it held down into them.
//! - Quadrant membership uses half-open containment, so the four children
//!   partition their parent without double-covering the split lines.
//! - The root accepts its closed boundary. Points on the root's right or
//!   bottom edge belong to no child and stay at whichever node they reached.
//!
//! The tree borrows the particles it indexes and is rebuilt from scratch every
//! tick; it has no identity across ticks.

use crate::api::error::{Result, SimulationError};
use crate::core::geometry::{Circle, Rectangle, Vector2};
use crate::core::particle::Particle;

/// Deepest level a node may split to. Leaves at this depth grow past capacity
/// so that many coincident points cannot recurse forever.
pub const MAX_DEPTH: u32 = 24;

/// A particle borrowed from the pool together with its pool index.
#[derive(Debug, Clone, Copy)]
pub struct ParticleRef<'a> {
    pub index: usize,
    pub particle: &'a Particle,
}

impl<'a> ParticleRef<'a> {
    pub fn position(&self) -> Vector2 {
        self.particle.position
    }
}

/// Shape summary of a built tree, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Total node count, root included.
    pub nodes: usize,
    /// Deepest level reached (root is 0).
    pub depth: u32,
    /// Particles stored across all nodes.
    pub stored: usize,
}

struct Node<'a> {
    boundary: Rectangle,
    depth: u32,
    points: Vec<ParticleRef<'a>>,
    /// `Some` once divided: `[NW, NE, SW, SE]`.
    children: Option<Box<[Node<'a>; 4]>>,
}

impl<'a> Node<'a> {
    fn new(boundary: Rectangle, depth: u32, capacity: usize) -> Self {
        Self {
            boundary,
            depth,
            points: Vec::with_capacity(capacity),
            children: None,
        }
    }

    fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    fn insert(&mut self, item: ParticleRef<'a>, capacity: usize) {
        if let Some(children) = self.children.as_deref_mut() {
            match children.iter_mut().find(|c| c.boundary.contains(item.position())) {
                Some(child) => child.insert(item, capacity),
                // Outer right/bottom edge: no half-open child covers it.
                None => self.points.push(item),
            }
            return;
        }

        if self.points.len() < capacity || self.depth >= MAX_DEPTH {
            self.points.push(item);
            return;
        }

        self.subdivide(capacity);
        let held = std::mem::take(&mut self.points);
        for p in held {
            self.insert(p, capacity);
        }
        self.insert(item, capacity);
    }

    fn subdivide(&mut self, capacity: usize) {
        let [nw, ne, sw, se] = self.boundary.quadrants();
        let depth = self.depth + 1;
        self.children = Some(Box::new([
            Node::new(nw, depth, capacity),
            Node::new(ne, depth, capacity),
            Node::new(sw, depth, capacity),
            Node::new(se, depth, capacity),
        ]));
    }

    fn query_region(&self, rect: &Rectangle, out: &mut Vec<ParticleRef<'a>>) {
        if !self.boundary.intersects(rect) {
            return;
        }
        out.extend(self.points.iter().filter(|p| rect.contains_inclusive(p.position())));
        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.query_region(rect, out);
            }
        }
    }

    fn query_circle(&self, circle: &Circle, out: &mut Vec<ParticleRef<'a>>) {
        if !self.boundary.intersects_circle(circle) {
            return;
        }
        out.extend(self.points.iter().filter(|p| circle.contains(p.position())));
        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.query_circle(circle, out);
            }
        }
    }

    fn collect_stats(&self, stats: &mut IndexStats) {
        stats.nodes += 1;
        stats.depth = stats.depth.max(self.depth);
        stats.stored += self.points.len();
        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.collect_stats(stats);
            }
        }
    }
}

/// Quad-tree rooted at a fixed boundary with a per-leaf capacity.
pub struct QuadTree<'a> {
    root: Node<'a>,
    capacity: usize,
    len: usize,
}

impl<'a> QuadTree<'a> {
    /// Create an empty tree.
    ///
    /// Fails with `InvalidConfiguration` if the boundary has a non-positive or
    /// non-finite width/height, or if `capacity` is zero.
    pub fn new(boundary: Rectangle, capacity: usize) -> Result<Self> {
        let finite = [boundary.x, boundary.y, boundary.width, boundary.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || boundary.width <= 0.0 || boundary.height <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "quad-tree boundary must have positive size, got {}x{}",
                boundary.width, boundary.height
            )));
        }
        if capacity == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "quad-tree capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            root: Node::new(boundary, 0, capacity),
            capacity,
            len: 0,
        })
    }

    pub fn boundary(&self) -> Rectangle {
        self.root.boundary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of particles inserted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the root has split at least once.
    pub fn is_divided(&self) -> bool {
        self.root.is_divided()
    }

    /// Insert the particle at pool slot `index`.
    ///
    /// Returns `false` (and stores nothing) when the position lies outside the
    /// root boundary; keeping particles inside it is the caller's job.
    pub fn insert(&mut self, index: usize, particle: &'a Particle) -> bool {
        if !self.root.boundary.contains_inclusive(particle.position) {
            return false;
        }
        self.root.insert(ParticleRef { index, particle }, self.capacity);
        self.len += 1;
        true
    }

    /// Every stored particle inside `rect` (edges included), in traversal order.
    pub fn query_region(&self, rect: &Rectangle) -> Vec<ParticleRef<'a>> {
        let mut out = Vec::new();
        self.root.query_region(rect, &mut out);
        out
    }

    /// Every stored particle within `circle.radius` of its center (inclusive).
    pub fn query_circle(&self, circle: &Circle) -> Vec<ParticleRef<'a>> {
        let mut out = Vec::new();
        self.query_circle_into(circle, &mut out);
        out
    }

    /// Like [`QuadTree::query_circle`] but appends into a caller-owned buffer.
    pub fn query_circle_into(&self, circle: &Circle, out: &mut Vec<ParticleRef<'a>>) {
        self.root.query_circle(circle, out);
    }

    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats::default();
        self.root.collect_stats(&mut stats);
        stats
    }
}
