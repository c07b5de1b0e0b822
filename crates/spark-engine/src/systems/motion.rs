//! Euler motion and wrap-around at the simulation boundary.

use crate::core::geometry::Rectangle;
use crate::core::particle::Particle;

/// Snap a particle that left `boundary` to the opposite edge.
///
/// Crossing `left` lands exactly on `right` (not `right - overshoot`) and
/// vice versa; the same holds for `top`/`bottom`. Positions already inside,
/// edges included, are left alone.
pub fn wrap_position(particle: &mut Particle, boundary: &Rectangle) {
    let pos = &mut particle.position;
    if pos.x < boundary.left() {
        pos.x = boundary.right();
    } else if pos.x > boundary.right() {
        pos.x = boundary.left();
    }
    if pos.y < boundary.top() {
        pos.y = boundary.bottom();
    } else if pos.y > boundary.bottom() {
        pos.y = boundary.top();
    }
}

/// Advance one active particle by its velocity (no damping), then wrap.
pub fn step_particle(particle: &mut Particle, boundary: &Rectangle) {
    particle.position += particle.velocity;
    wrap_position(particle, boundary);
}

/// Move and wrap every active particle in `particles`. Inactive ones are untouched.
pub fn advance_particles(particles: &mut [Particle], boundary: &Rectangle) {
    for particle in particles.iter_mut().filter(|p| p.active) {
        step_particle(particle, boundary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vector2;
    use crate::core::rng::Rng;

    fn moving(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            position: Vector2::new(x, y),
            velocity: Vector2::new(vx, vy),
            ..Particle::new(true)
        }
    }

    fn bounds() -> Rectangle {
        Rectangle::new(-10.0, -10.0, 120.0, 70.0)
    }

    #[test]
    fn crossing_right_lands_exactly_on_left() {
        let mut p = moving(109.5, 0.0, 3.0, 0.0);
        step_particle(&mut p, &bounds());
        assert_eq!(p.position.x, -10.0);
    }

    #[test]
    fn crossing_left_lands_exactly_on_right() {
        let mut p = moving(-9.0, 0.0, -4.0, 0.0);
        step_particle(&mut p, &bounds());
        assert_eq!(p.position.x, 110.0);
    }

    #[test]
    fn crossing_top_and_bottom() {
        let b = bounds();
        let mut up = moving(0.0, -9.5, 0.0, -1.0);
        step_particle(&mut up, &b);
        assert_eq!(up.position.y, b.bottom());

        let mut down = moving(0.0, 59.0, 0.0, 2.0);
        step_particle(&mut down, &b);
        assert_eq!(down.position.y, b.top());
    }

    #[test]
    fn inside_motion_is_plain_euler() {
        let mut p = moving(1.0, 2.0, 0.5, -0.25);
        step_particle(&mut p, &bounds());
        assert_eq!(p.position, Vector2::new(1.5, 1.75));
    }

    #[test]
    fn repeated_wraps_stay_inside_boundary() {
        let b = bounds();
        let mut rng = Rng::new(4);
        let mut ps: Vec<Particle> = (0..200)
            .map(|_| {
                moving(
                    rng.range(b.left(), b.right()),
                    rng.range(b.top(), b.bottom()),
                    rng.range_inclusive(-7.0, 7.0),
                    rng.range_inclusive(-7.0, 7.0),
                )
            })
            .collect();
        for _ in 0..500 {
            advance_particles(&mut ps, &b);
            for p in &ps {
                assert!(b.contains_inclusive(p.position), "escaped: {:?}", p.position);
            }
        }
    }

    #[test]
    fn inactive_particles_do_not_move() {
        let mut ps = vec![moving(0.0, 0.0, 1.0, 1.0)];
        ps[0].active = false;
        advance_particles(&mut ps, &bounds());
        assert_eq!(ps[0].position, Vector2::ZERO);
    }
}
