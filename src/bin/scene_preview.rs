// 无界面场景运行器
// 用法: scene-preview [frames] [seed]
// 以模拟 60fps 驱动场景，统计每帧耗时并以 JSON 输出最后一帧

use std::env;
use std::time::Instant;

use portfolio::scene::{CyberScene, FrameClock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();

    let frames: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(600);
    let seed: Option<u64> = args.get(2).and_then(|s| s.parse().ok());

    let mut scene = match seed {
        Some(s) => {
            tracing::info!("Using seed: {}", s);
            CyberScene::with_seed(s)
        }
        None => CyberScene::new(),
    };
    let mut clock = FrameClock::manual();

    tracing::info!(
        "Running {} frames with {} particles",
        frames,
        scene.field().len()
    );

    let mut slowest = 0.0f64;
    let start = Instant::now();
    for _ in 1..frames {
        let (elapsed, delta) = clock.advance(FRAME_DT);
        let frame_start = Instant::now();
        scene.frame(elapsed, delta);
        slowest = slowest.max(frame_start.elapsed().as_secs_f64());
    }

    let (elapsed, delta) = clock.advance(FRAME_DT);
    let frame = scene.frame(elapsed, delta);
    let total = start.elapsed().as_secs_f64();

    tracing::info!(
        "Done in {:.3}s: {:.2}us/frame avg, {:.2}us slowest",
        total,
        total / frames.max(1) as f64 * 1e6,
        slowest * 1e6
    );

    println!("{}", serde_json::to_string_pretty(&frame)?);

    let wraps: u64 = scene.field().wrap_counts().iter().map(|&w| u64::from(w)).sum();
    tracing::info!("Particles recycled: {}", wraps);

    Ok(())
}
