//! 逐帧扫掠
//!
//! 每帧的行程预算为 `|velocity| * delta`。反复求最近的碰撞，
//! 移动到接触点、扣除走过的距离、换成反射后的速度，
//! 直到预算用完或前方没有碰撞为止。
//!
//! 所有障碍物都是凸的，刚从某个障碍物反射出来的物体不会立即再次撞上它，
//! 因此下一步跳过上一次撞到的障碍物，避免在接触点上原地反复反射。

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::collision::{best_indexed_collision, Collide, Obstacle};
use crate::distance::distance;
use crate::geometry::Circle;
use crate::math::{normalized, Vector2};

/// 扫掠参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// 单帧最多处理的碰撞次数
    pub max_steps: usize,

    /// 剩余行程不超过该值时结束本帧
    pub min_travel: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            max_steps: 16,
            min_travel: 1e-9,
        }
    }
}

/// 运动物体：圆形外形加速度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub shape: Circle,
    pub velocity: Vector2,
}

impl Body {
    pub fn new(shape: Circle, velocity: Vector2) -> Self {
        Self { shape, velocity }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

/// 一帧扫掠的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOutcome {
    /// 帧末的物体状态
    pub body: Body,
    /// 本帧发生的碰撞次数
    pub contacts: usize,
    /// 本帧实际走过的距离
    pub travelled: f64,
    /// 是否因达到 `max_steps` 而提前结束
    pub truncated: bool,
}

/// 让物体在障碍物之间运动 `delta` 时间
pub fn sweep(body: Body, delta: f64, obstacles: &[Obstacle], config: &SweepConfig) -> SweepOutcome {
    let mut body = body;
    let mut budget = body.speed() * delta;
    let mut travelled = 0.0;
    let mut contacts = 0;
    let mut last_hit = None;

    while budget > config.min_travel {
        if contacts >= config.max_steps {
            debug!(contacts, budget, "sweep stopped at step limit");
            return SweepOutcome {
                body,
                contacts,
                travelled,
                truncated: true,
            };
        }

        let start = body.shape.center;
        let candidates = obstacles.iter().enumerate().map(|(index, obstacle)| {
            if last_hit == Some(index) {
                None
            } else {
                body.shape.collide(&body.velocity, obstacle)
            }
        });

        let hit = best_indexed_collision(&start, candidates)
            .map(|(index, collision)| (index, collision, distance(&start, &collision.position)))
            .filter(|(_, _, step)| *step <= budget);

        let Some((index, collision, step)) = hit else {
            if let Ok(direction) = normalized(body.velocity) {
                body.shape.center += direction.into_inner() * budget;
            }
            travelled += budget;
            break;
        };

        trace!(
            obstacle = obstacles[index].type_name(),
            x = collision.position.x,
            y = collision.position.y,
            step,
            "contact"
        );

        budget -= step;
        travelled += step;
        body.shape.center = collision.position;
        body.velocity = collision.movement;
        last_hit = Some(index);
        contacts += 1;
    }

    SweepOutcome {
        body,
        contacts,
        travelled,
        truncated: false,
    }
}

/// 并行扫掠多个互不影响的物体，返回总碰撞次数
pub fn sweep_all(
    bodies: &mut [Body],
    delta: f64,
    obstacles: &[Obstacle],
    config: &SweepConfig,
) -> usize {
    bodies
        .par_iter_mut()
        .map(|body| {
            let outcome = sweep(*body, delta, obstacles, config);
            *body = outcome.body;
            outcome.contacts
        })
        .sum()
}
