pub mod geometry;
pub mod particle;
pub mod quadtree;
pub mod rng;
pub mod time;
