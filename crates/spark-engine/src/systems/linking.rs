//! Link detection: which particle pairs are close enough to be drawn connected.
//!
//! Two strategies produce the same set of links:
//! - `link_particles_indexed` asks the quad-tree for neighbours of each
//!   active particle, so each query only touches nearby nodes.
//! - `link_particles_brute_force` checks every pair and is kept as the
//!   reference the indexed path is tested against.
//!
//! A pair `(a, b)` is emitted once, from the particle with the lower pool
//! index, and only when `distance < distance_to_link`.

use crate::core::geometry::{Circle, Vector2};
use crate::core::particle::Particle;
use crate::core::quadtree::{ParticleRef, QuadTree};

/// Two linked positions plus the fade factor the renderer draws them with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub point_a: Vector2,
    pub point_b: Vector2,
    /// `1 - d / distance_to_link`: 1 when touching, 0 at the threshold.
    pub alpha: f64,
}

/// How link pairs are computed each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStrategy {
    /// Circle queries against the per-tick quad-tree.
    #[default]
    Indexed,
    /// All-pairs scan, O(n^2).
    BruteForce,
}

/// Link for a pair at distance `d`, or `None` when too far apart.
fn link_for(a: &Particle, b: &Particle, distance_to_link: f64) -> Option<Link> {
    let d = a.position.distance(b.position);
    if d < distance_to_link {
        Some(Link {
            point_a: a.position,
            point_b: b.position,
            alpha: 1.0 - d / distance_to_link,
        })
    } else {
        None
    }
}

/// Links between active particles via the quad-tree.
///
/// `tree` must index exactly the active particles of `particles`, keyed by
/// their slot in that slice.
pub fn link_particles_indexed(
    particles: &[Particle],
    tree: &QuadTree<'_>,
    distance_to_link: f64,
    links: &mut Vec<Link>,
) {
    if distance_to_link <= 0.0 {
        return;
    }
    let mut candidates: Vec<ParticleRef<'_>> = Vec::new();
    for (i, a) in particles.iter().enumerate().filter(|(_, p)| p.active) {
        candidates.clear();
        tree.query_circle_into(&Circle::around(a.position, distance_to_link), &mut candidates);
        for candidate in &candidates {
            if candidate.index <= i {
                continue;
            }
            if let Some(link) = link_for(a, candidate.particle, distance_to_link) {
                links.push(link);
            }
        }
    }
}

/// Links between active particles by scanning every unordered pair.
pub fn link_particles_brute_force(
    particles: &[Particle],
    distance_to_link: f64,
    links: &mut Vec<Link>,
) {
    if distance_to_link <= 0.0 {
        return;
    }
    for (i, a) in particles.iter().enumerate() {
        if !a.active {
            continue;
        }
        for b in particles[i + 1..].iter().filter(|p| p.active) {
            if let Some(link) = link_for(a, b, distance_to_link) {
                links.push(link);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rectangle;
    use crate::core::rng::Rng;

    fn at(x: f64, y: f64) -> Particle {
        Particle {
            position: Vector2::new(x, y),
            ..Particle::new(true)
        }
    }

    fn build_tree<'a>(boundary: Rectangle, particles: &'a [Particle]) -> QuadTree<'a> {
        let mut tree = QuadTree::new(boundary, 4).unwrap();
        for (i, p) in particles.iter().enumerate().filter(|(_, p)| p.active) {
            assert!(tree.insert(i, p));
        }
        tree
    }

    fn indexed(particles: &[Particle], boundary: Rectangle, distance: f64) -> Vec<Link> {
        let tree = build_tree(boundary, particles);
        let mut links = Vec::new();
        link_particles_indexed(particles, &tree, distance, &mut links);
        links
    }

    fn brute(particles: &[Particle], distance: f64) -> Vec<Link> {
        let mut links = Vec::new();
        link_particles_brute_force(particles, distance, &mut links);
        links
    }

    fn pair_key(l: &Link) -> (u64, u64, u64, u64) {
        let (a, b) = if (l.point_a.x, l.point_a.y) <= (l.point_b.x, l.point_b.y) {
            (l.point_a, l.point_b)
        } else {
            (l.point_b, l.point_a)
        };
        (a.x.to_bits(), a.y.to_bits(), b.x.to_bits(), b.y.to_bits())
    }

    #[test]
    fn three_four_five_links_at_half_alpha() {
        let ps = [at(0.0, 0.0), at(3.0, 4.0)];
        let boundary = Rectangle::new(-10.0, -10.0, 30.0, 30.0);

        let links = indexed(&ps, boundary, 10.0);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].alpha, 0.5);
        assert_eq!(brute(&ps, 10.0), links);
    }

    #[test]
    fn distance_equal_to_threshold_is_not_linked() {
        let ps = [at(0.0, 0.0), at(3.0, 4.0)];
        let boundary = Rectangle::new(-10.0, -10.0, 30.0, 30.0);
        assert!(indexed(&ps, boundary, 5.0).is_empty());
        assert!(brute(&ps, 5.0).is_empty());
    }

    #[test]
    fn zero_distance_or_no_particles_gives_nothing() {
        let boundary = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let ps = [at(1.0, 1.0), at(1.0, 1.0)];
        assert!(indexed(&ps, boundary, 0.0).is_empty());
        assert!(brute(&ps, 0.0).is_empty());
        assert!(indexed(&[], boundary, 5.0).is_empty());
    }

    #[test]
    fn coincident_particles_link_with_full_alpha_once() {
        let boundary = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let ps = [at(2.0, 2.0), at(2.0, 2.0)];
        let links = indexed(&ps, boundary, 3.0);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].alpha, 1.0);
    }

    #[test]
    fn inactive_particles_are_not_linked() {
        let boundary = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let mut ps = [at(1.0, 1.0), at(2.0, 1.0), at(3.0, 1.0)];
        ps[1].active = false;
        let links = indexed(&ps, boundary, 5.0);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].point_b, Vector2::new(3.0, 1.0));
        assert_eq!(brute(&ps, 5.0).len(), 1);
    }

    #[test]
    fn alpha_decreases_with_distance() {
        let boundary = Rectangle::new(-1.0, -1.0, 20.0, 20.0);
        let ps = [at(0.0, 0.0), at(1.0, 0.0), at(4.0, 0.0), at(9.0, 0.0)];
        let mut links = indexed(&ps, boundary, 10.0);
        links.retain(|l| l.point_a == Vector2::ZERO);
        links.sort_by(|a, b| a.point_b.x.total_cmp(&b.point_b.x));
        let alphas: Vec<f64> = links.iter().map(|l| l.alpha).collect();
        assert_eq!(alphas.len(), 3);
        assert!(alphas.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn indexed_matches_brute_force() {
        let boundary = Rectangle::new(-60.0, -60.0, 920.0, 720.0);
        let mut rng = Rng::new(1234);
        for round in 0..10 {
            let ps: Vec<Particle> = (0..400)
                .map(|_| {
                    let mut p = at(
                        rng.range(boundary.left(), boundary.right()),
                        rng.range(boundary.top(), boundary.bottom()),
                    );
                    p.active = rng.next_f64() > 0.1;
                    p
                })
                .collect();
            let distance = 20.0 + round as f64 * 8.0;

            let mut fast: Vec<_> = indexed(&ps, boundary, distance).iter().map(pair_key).collect();
            let mut slow: Vec<_> = brute(&ps, distance).iter().map(pair_key).collect();
            fast.sort_unstable();
            slow.sort_unstable();
            assert_eq!(fast, slow, "round {}", round);

            let mut dedup = fast.clone();
            dedup.dedup();
            assert_eq!(dedup.len(), fast.len(), "duplicate pair in round {}", round);
        }
    }

    #[test]
    fn link_iff_closer_than_threshold() {
        let boundary = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let mut rng = Rng::new(77);
        let ps: Vec<Particle> = (0..120)
            .map(|_| at(rng.range(0.0, 100.0), rng.range(0.0, 100.0)))
            .collect();
        let distance = 15.0;
        let links = indexed(&ps, boundary, distance);

        let mut expected = 0;
        for i in 0..ps.len() {
            for j in i + 1..ps.len() {
                if ps[i].position.distance(ps[j].position) < distance {
                    expected += 1;
                }
            }
        }
        assert_eq!(links.len(), expected);
        for l in &links {
            let d = l.point_a.distance(l.point_b);
            assert!(d < distance);
            assert!((l.alpha - (1.0 - d / distance)).abs() < 1e-12);
            assert!(l.alpha > 0.0 && l.alpha <= 1.0);
        }
    }
}
