// sim/ - Particle network simulation
//
// Network owns the particles and the per-frame update/render/connect pass.
// AnimationLoop drives it from a frame scheduler.

mod animation;
mod particle;

pub use animation::{AnimationLoop, FrameCallback, FrameHandle, FrameScheduler, Viewport};
pub use particle::Particle;

use tracing::debug;

use crate::config::NetworkConfig;
use crate::render::{self, Surface, connection_opacity};

/// Particle network over a `w` x `h` surface
pub struct Network {
    cfg: NetworkConfig,

    // Surface dimensions
    w: u32,
    h: u32,

    particles: Vec<Particle>,

    rng: Rng,
}

impl Network {
    /// Empty network; nothing exists until the first `resize`.
    pub fn new(cfg: NetworkConfig, seed: u32) -> Self {
        Self {
            particles: Vec::with_capacity(cfg.particle_count),
            cfg,
            w: 0,
            h: 0,
            rng: Rng::new(seed),
        }
    }

    /// Adopt new surface dimensions and regenerate every particle.
    pub fn resize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
        self.respawn();
        debug!(w, h, particles = self.particles.len(), "network resized");
    }

    fn respawn(&mut self) {
        let (w, h) = (self.w as f64, self.h as f64);
        let speed = self.cfg.speed_scale;
        let rng = &mut self.rng;
        self.particles = (0..self.cfg.particle_count)
            .map(|_| Particle::new(w, h, speed, rng))
            .collect();
    }

    /// One animation frame: clear, move and draw particles, then link neighbours.
    pub fn tick(&mut self, surface: &mut impl Surface) {
        let (w, h) = (self.w as f64, self.h as f64);
        surface.clear_rect(0.0, 0.0, w, h);

        for p in &mut self.particles {
            p.advance(w, h);
            p.render(surface, self.cfg.particle_color);
        }

        for (i, j, opacity) in self.links() {
            let (a, b) = (&self.particles[i], &self.particles[j]);
            render::segment(
                surface,
                (a.x, a.y),
                (b.x, b.y),
                &self.cfg.link_color.with_alpha(opacity),
                self.cfg.link_width,
            );
        }
    }

    /// Every linked pair `(i, j, opacity)` with `i < j`.
    ///
    /// Brute force over all pairs; fine for a few dozen particles.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let max = self.cfg.connection_distance;
        let ps = &self.particles;
        (0..ps.len()).flat_map(move |i| {
            (i + 1..ps.len()).filter_map(move |j| {
                connection_opacity(ps[i].distance(&ps[j]), max).map(|o| (i, j, o))
            })
        })
    }

    pub fn particles(&self) -> &[Particle] { &self.particles }
    pub fn particles_mut(&mut self) -> &mut [Particle] { &mut self.particles }
    pub fn width(&self) -> u32 { self.w }
    pub fn height(&self) -> u32 { self.h }
}

/// xorshift32, uniform floats in `[0, 1)`
#[derive(Debug, Clone)]
pub struct Rng(u32);

impl Rng {
    pub fn new(seed: u32) -> Self {
        // Zero is a fixed point of xorshift
        Self(if seed == 0 { 0xDEADBEEF } else { seed })
    }

    #[inline(always)]
    pub fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x as f64 / (u32::MAX as f64 + 1.0)
    }
}
