//! 图元之间的距离
//!
//! 所有距离都是非负的闭式解，重叠或接触时为 0。
//! 只为下列图元对提供实现：
//!
//! | 左 | 右 |
//! |----|----|
//! | 点 | 点、圆、直线 |
//! | 圆 | 点、直线 |
//! | 直线 | 点、圆、矩形 |

use crate::geometry::{AxisAlignedRect, Circle, Line};
use crate::math::Point2;

/// 到另一个图元的距离
pub trait Distance<Rhs: ?Sized = Self> {
    fn distance_to(&self, other: &Rhs) -> f64;
}

/// 两个图元之间的距离
pub fn distance<A, B>(a: &A, b: &B) -> f64
where
    A: Distance<B> + ?Sized,
    B: ?Sized,
{
    a.distance_to(b)
}

impl Distance for Point2 {
    fn distance_to(&self, other: &Point2) -> f64 {
        (other - self).norm()
    }
}

impl Distance<Circle> for Point2 {
    fn distance_to(&self, circle: &Circle) -> f64 {
        (self.distance_to(&circle.center) - circle.radius).max(0.0)
    }
}

impl Distance<Point2> for Circle {
    fn distance_to(&self, point: &Point2) -> f64 {
        point.distance_to(self)
    }
}

impl Distance<Line> for Point2 {
    fn distance_to(&self, line: &Line) -> f64 {
        line.residual(self).abs()
    }
}

impl Distance<Point2> for Line {
    fn distance_to(&self, point: &Point2) -> f64 {
        point.distance_to(self)
    }
}

impl Distance<Circle> for Line {
    fn distance_to(&self, circle: &Circle) -> f64 {
        (self.residual(&circle.center).abs() - circle.radius).max(0.0)
    }
}

impl Distance<Line> for Circle {
    fn distance_to(&self, line: &Line) -> f64 {
        line.distance_to(self)
    }
}

impl Distance<AxisAlignedRect> for Line {
    /// 到四个角点距离的最小值；直线穿过矩形时为 0
    fn distance_to(&self, rect: &AxisAlignedRect) -> f64 {
        let residuals = rect.points().map(|p| self.residual(&p));

        // 任一对角线两端异号说明直线穿过矩形
        if residuals[0] * residuals[2] <= 0.0 || residuals[1] * residuals[3] <= 0.0 {
            return 0.0;
        }

        residuals
            .iter()
            .map(|r| r.abs())
            .fold(f64::INFINITY, f64::min)
    }
}
