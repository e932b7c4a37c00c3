//! Balls 核心几何库
//!
//! 提供2D几何图元、距离与相交计算，以及运动点/圆对静止障碍物的扫掠碰撞求解。
//!
//! # 架构设计
//!
//! 自底向上分为四层：
//! - `geometry`: 图元（直线以 Hesse 法式存储，射线、线段共用其坐标参数化）
//! - `distance` / `intersection`: 只依赖图元的距离与相交计算
//! - `collision`: 扫掠碰撞，依赖前两层
//! - `sweep`: 逐帧消耗行程预算的扫掠循环
//!
//! 所有运算都是无副作用的纯函数，没有全局可变状态，可在多线程中直接调用。
//!
//! # 示例
//!
//! ```rust
//! use balls_core::prelude::*;
//!
//! // 直线 x = 5
//! let wall = Line::from_normal(Vector2::new(1.0, 0.0), 5.0).unwrap();
//!
//! let hit = collide(&Point2::origin(), &Vector2::new(1.0, 0.0), &wall).unwrap();
//! assert_eq!(hit.position, Point2::new(5.0, 0.0));
//! assert_eq!(hit.movement, Vector2::new(-1.0, 0.0));
//! ```

pub mod collision;
pub mod distance;
pub mod error;
pub mod geometry;
pub mod intersection;
pub mod math;
pub mod sweep;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::collision::{best_collision, collide, Collide, Collision, Obstacle};
    pub use crate::distance::{distance, Distance};
    pub use crate::error::GeometryError;
    pub use crate::geometry::{AxisAlignedRect, Circle, Line, Ray, Segment};
    pub use crate::intersection::{
        intersect, intersection_point, intersection_segment, Intersect, IntersectionPoint,
    };
    pub use crate::math::{mirror, Norm, Point2, Rotate90, Vector2};
    pub use crate::sweep::{sweep, sweep_all, Body, SweepConfig, SweepOutcome};
}
