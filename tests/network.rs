use std::rc::Rc;

use site_engine::config::NetworkConfig;
use site_engine::render::connection_opacity;
use site_engine::sim::{AnimationLoop, Network, Particle, Rng};
use site_engine::testing::{FixedViewport, ManualFrames, Op, RecordingSurface};

/// Particles never wander further than one step outside the surface.
#[test]
fn reflective_overshoot_is_bounded() {
    let mut net = Network::new(NetworkConfig { speed_scale: 40.0, ..NetworkConfig::default() }, 99);
    net.resize(300, 200);
    let (w, h) = (300.0, 200.0);

    let mut surface = RecordingSurface::default();
    for _ in 0..5_000 {
        net.tick(&mut surface);
        surface.ops.clear();
        for p in net.particles() {
            assert!(p.x >= -p.vx.abs() && p.x <= w + p.vx.abs(), "x={} vx={}", p.x, p.vx);
            assert!(p.y >= -p.vy.abs() && p.y <= h + p.vy.abs(), "y={} vy={}", p.y, p.vy);
        }
    }
}

#[test]
fn batch_creation_respects_bounds_and_speed() {
    let mut rng = Rng::new(2024);
    let speed = 0.2;
    let particles: Vec<_> = (0..500).map(|_| Particle::new(1280.0, 720.0, speed, &mut rng)).collect();

    assert_eq!(particles.len(), 500);
    for p in &particles {
        assert!(p.x >= 0.0 && p.x < 1280.0);
        assert!(p.y >= 0.0 && p.y < 720.0);
        assert!(p.vx.abs() <= speed / 2.0);
        assert!(p.vy.abs() <= speed / 2.0);
    }
}

/// 800x600 -> 1920x1080: a complete new set sampled in the new bounds.
#[test]
fn resize_regenerates_every_particle() {
    let frames = ManualFrames::default();
    let viewport = FixedViewport::new(800, 600);
    let anim = AnimationLoop::new(
        Network::new(NetworkConfig::default(), 5),
        Some(RecordingSurface::default()),
        viewport.clone(),
        frames.clone(),
    );

    let before = anim.borrow().network().particles().to_vec();
    assert_eq!(before.len(), 40);
    assert!(before.iter().all(|p| p.x < 800.0 && p.y < 600.0));

    viewport.set(1920, 1080);
    anim.borrow_mut().resize();

    let anim = anim.borrow();
    let after = anim.network().particles();
    assert_eq!(after.len(), 40);
    assert_eq!(anim.surface().unwrap().size, (1920, 1080));
    assert!(after.iter().all(|p| p.x >= 0.0 && p.x < 1920.0 && p.y >= 0.0 && p.y < 1080.0));
    assert!(after.iter().all(|p| !before.contains(p)));
}

#[test]
fn drawn_links_match_distance_rule() {
    let cfg = NetworkConfig::default();
    let max = cfg.connection_distance;
    let mut net = Network::new(cfg, 17);
    net.resize(600, 400);

    let mut surface = RecordingSurface::default();
    net.tick(&mut surface);

    let ps = net.particles();
    let mut expected = 0;
    for i in 0..ps.len() {
        for j in i + 1..ps.len() {
            if connection_opacity(ps[i].distance(&ps[j]), max).is_some() {
                expected += 1;
            }
        }
    }

    let frame = surface.last_frame();
    assert_eq!(frame.iter().filter(|op| matches!(op, Op::Stroke)).count(), expected);
    for op in frame {
        if let Op::StrokeColor(color) = op {
            let alpha: f64 = color
                .trim_start_matches("rgba(59, 130, 246, ")
                .trim_end_matches(')')
                .parse()
                .unwrap();
            assert!(alpha > 0.0 && alpha <= 1.0, "{color}");
        }
    }
}

#[test]
fn loop_keeps_running_frame_after_frame() {
    let frames = ManualFrames::default();
    let anim = AnimationLoop::new(
        Network::new(NetworkConfig::default(), 8),
        Some(RecordingSurface::default()),
        FixedViewport::new(640, 480),
        frames.clone(),
    );
    AnimationLoop::start(&anim);

    for _ in 0..120 {
        assert!(frames.run_next());
    }
    assert!(anim.borrow().is_running());
    assert_eq!(Rc::strong_count(&anim), 1);

    let clears = anim.borrow().surface().unwrap().count(|op| matches!(op, Op::Clear(..)));
    assert_eq!(clears, 120);
}
