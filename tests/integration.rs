// 场景集成测试

use portfolio::scene::particles::{FLOOR, SPAWN_HEIGHT};
use portfolio::scene::{CyberScene, FrameClock, PARTICLE_COUNT, ThreatKind};

#[test]
fn test_ten_minutes_of_frames() {
    let mut scene = CyberScene::with_seed(2024);
    let mut clock = FrameClock::manual();

    // 60fps 下 10 分钟
    for _ in 0..36_000 {
        let (elapsed, delta) = clock.advance(1.0 / 60.0);
        let frame = scene.frame(elapsed, delta);

        assert_eq!(frame.particles.len(), PARTICLE_COUNT * 3);
    }

    for p in scene.field().positions() {
        assert!(p[1] >= FLOOR && p[1] <= SPAWN_HEIGHT);
    }
    assert!(scene.field().wrap_counts().iter().all(|&w| w > 0));
}

#[test]
fn test_marker_pose_independent_of_frame_history() {
    let mut busy = CyberScene::with_seed(1);
    let mut idle = CyberScene::with_seed(1);

    for i in 0..500 {
        busy.frame(i as f32 * 0.01, 0.01);
    }

    let a = busy.frame(7.0, 0.01).markers;
    let b = idle.frame(7.0, 0.01).markers;
    assert_eq!(a, b);
    assert_eq!(a[0].0, ThreatKind::Skull);
}
