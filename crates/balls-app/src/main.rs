//! Balls 演示程序入口
//! 以固定步长驱动弹球世界，不打开窗口，只输出日志

mod config;
mod world;

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

use config::Config;
use world::World;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };

    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(config.level()?)
            .finish(),
    )?;

    info!("Starting balls...");
    debug!(?config, "Loaded config");

    let mut world = World::new(&config);
    if let Some(x) = config.pad_position {
        world.set_control(x);
    }
    info!(bricks = world.bricks().len(), pad = %world.pad(), "World ready");
    let delta = config.delta();
    let mut contacts = 0;
    let mut truncated = 0;

    for tick in 1..=config.ticks() {
        let outcome = world.update(delta);
        contacts += outcome.contacts;
        if outcome.truncated {
            truncated += 1;
        }

        if config.report_every > 0 && tick % u64::from(config.report_every) == 0 {
            let ball = world.ball();
            info!(
                tick,
                x = ball.shape.center.x,
                y = ball.shape.center.y,
                vx = ball.velocity.x,
                vy = ball.velocity.y,
                pad = %world.pad(),
                "ball"
            );
        }
    }

    info!(
        ticks = config.ticks(),
        contacts, truncated, "Simulation finished"
    );
    Ok(())
}
