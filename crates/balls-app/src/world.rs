//! 弹球世界
//!
//! 一个球、一块挡板、若干砖块，四周是墙。每步调用一次扫掠。

use balls_core::collision::Obstacle;
use balls_core::geometry::{AxisAlignedRect, Circle, Line};
use balls_core::math::{Point2, Vector2};
use balls_core::sweep::{sweep, Body, SweepConfig, SweepOutcome};
use tracing::trace;

use crate::config::Config;

pub struct World {
    walls: Vec<Line>,
    bricks: Vec<AxisAlignedRect>,
    ball: Body,
    pad: AxisAlignedRect,
    sweep: SweepConfig,
}

impl World {
    pub fn new(config: &Config) -> Self {
        let direction = Vector2::new(1.0, 3.0).normalize();

        Self {
            walls: arena_walls(config.arena_width, config.arena_height),
            bricks: vec![
                AxisAlignedRect::new(Point2::new(500.0, 400.0), 100.0, 50.0),
                AxisAlignedRect::new(Point2::new(300.0, 100.0), 100.0, 50.0),
            ],
            ball: Body::new(
                Circle::new(Point2::new(10.0, 3.0), 1.0),
                direction * config.ball_speed,
            ),
            pad: AxisAlignedRect::new(Point2::new(200.0, 50.0), 100.0, 50.0),
            sweep: config.sweep.clone(),
        }
    }

    /// 推进 `delta` 秒
    pub fn update(&mut self, delta: f64) -> SweepOutcome {
        trace!("pad position: {}", self.pad);

        let outcome = sweep(self.ball, delta, &self.obstacles(), &self.sweep);
        self.ball = outcome.body;
        outcome
    }

    /// 水平移动挡板
    ///
    /// 挡板移动不参与扫掠，调用方需保证挡板不会移到球上。
    pub fn set_control(&mut self, pad_position: f64) {
        self.pad.center.x = pad_position;
    }

    pub fn bricks(&self) -> &[AxisAlignedRect] {
        &self.bricks
    }

    pub fn pad(&self) -> &AxisAlignedRect {
        &self.pad
    }

    pub fn ball(&self) -> &Body {
        &self.ball
    }

    fn obstacles(&self) -> Vec<Obstacle> {
        self.walls
            .iter()
            .copied()
            .map(Obstacle::from)
            .chain(self.bricks.iter().copied().map(Obstacle::from))
            .chain(std::iter::once(Obstacle::from(self.pad)))
            .collect()
    }
}

fn arena_walls(width: f64, height: f64) -> Vec<Line> {
    let x = Vector2::x_axis();
    let y = Vector2::y_axis();
    vec![
        Line::new(x, 0.0),
        Line::new(x, width),
        Line::new(y, 0.0),
        Line::new(y, height),
    ]
}
