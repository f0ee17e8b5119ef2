// particle.rs - A single node of the network
//
// Position and velocity in surface pixels, radius fixed at creation.

use super::Rng;
use crate::render::{self, Surface};

const MIN_SIZE: f64 = 2.0;
const SIZE_SPREAD: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
}

impl Particle {
    /// Random particle somewhere on a `w` x `h` surface.
    ///
    /// Each velocity component lands in `[-speed/2, speed/2)`, radius in `[2, 5)`.
    pub fn new(w: f64, h: f64, speed: f64, rng: &mut Rng) -> Self {
        Self {
            x: rng.next_f64() * w,
            y: rng.next_f64() * h,
            vx: (rng.next_f64() - 0.5) * speed,
            vy: (rng.next_f64() - 0.5) * speed,
            size: rng.next_f64() * SIZE_SPREAD + MIN_SIZE,
        }
    }

    /// One tick of motion with reflective walls.
    ///
    /// The wall test runs on the moved position, so a particle can sit up to
    /// one step outside the surface before it turns around.
    pub fn advance(&mut self, w: f64, h: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > w { self.vx = -self.vx; }
        if self.y < 0.0 || self.y > h { self.vy = -self.vy; }
    }

    pub fn render(&self, surface: &mut impl Surface, color: &str) {
        render::dot(surface, self.x, self.y, self.size, color);
    }

    #[inline]
    pub fn distance(&self, other: &Particle) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle { x, y, vx, vy, size: 3.0 }
    }

    #[test]
    fn new_particles_stay_in_bounds() {
        let mut rng = Rng::new(42);
        for _ in 0..1000 {
            let p = Particle::new(800.0, 600.0, 0.2, &mut rng);
            assert!((0.0..800.0).contains(&p.x));
            assert!((0.0..600.0).contains(&p.y));
            assert!(p.vx.abs() <= 0.1);
            assert!(p.vy.abs() <= 0.1);
            assert!((2.0..5.0).contains(&p.size));
        }
    }

    #[test]
    fn crossing_right_wall_flips_only_vx() {
        let mut p = at(99.9, 50.0, 0.5, 0.3);
        p.advance(100.0, 100.0);
        assert_eq!(p.vx, -0.5);
        assert_eq!(p.vy, 0.3);
        assert!(p.x > 100.0);
    }

    #[test]
    fn crossing_top_wall_flips_only_vy() {
        let mut p = at(50.0, 0.1, -0.2, -0.4);
        p.advance(100.0, 100.0);
        assert_eq!(p.vx, -0.2);
        assert_eq!(p.vy, 0.4);
    }

    #[test]
    fn landing_exactly_on_wall_does_not_reflect() {
        let mut p = at(99.5, 50.0, 0.5, 0.0);
        p.advance(100.0, 100.0);
        assert_eq!(p.x, 100.0);
        assert_eq!(p.vx, 0.5);

        p.advance(100.0, 100.0);
        assert_eq!(p.vx, -0.5);
    }

    #[test]
    fn corner_flips_both() {
        let mut p = at(0.1, 0.1, -0.3, -0.3);
        p.advance(100.0, 100.0);
        assert_eq!((p.vx, p.vy), (0.3, 0.3));
    }
}
