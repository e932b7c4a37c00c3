//! 相交判定与交点计算
//!
//! 判定 (`intersect`) 返回布尔值；交点 (`intersection_point`) 和交线段
//! (`intersection_segment`) 在不存在时返回 `None`，不做近似。
//! 射线、线段的交点都是先求承载直线的交点，再按各自的坐标范围过滤。

use crate::geometry::{AxisAlignedRect, Circle, Line, Ray, Segment};
use crate::math::{det, square_distance, Point2, Vector2};

/// 与另一个图元是否相交（含接触）
pub trait Intersect<Rhs: ?Sized = Self> {
    fn intersects(&self, other: &Rhs) -> bool;
}

/// 与另一个图元的唯一交点
pub trait IntersectionPoint<Rhs: ?Sized = Self> {
    fn intersection_point(&self, other: &Rhs) -> Option<Point2>;
}

pub fn intersect<A, B>(a: &A, b: &B) -> bool
where
    A: Intersect<B> + ?Sized,
    B: ?Sized,
{
    a.intersects(b)
}

pub fn intersection_point<A, B>(a: &A, b: &B) -> Option<Point2>
where
    A: IntersectionPoint<B> + ?Sized,
    B: ?Sized,
{
    a.intersection_point(b)
}

impl Intersect<Circle> for Point2 {
    fn intersects(&self, circle: &Circle) -> bool {
        square_distance(self, &circle.center) <= circle.radius * circle.radius
    }
}

impl Intersect for Circle {
    fn intersects(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        square_distance(&self.center, &other.center) <= reach * reach
    }
}

impl Intersect<AxisAlignedRect> for Point2 {
    fn intersects(&self, rect: &AxisAlignedRect) -> bool {
        rect.contains_point(self)
    }
}

impl Intersect<Point2> for AxisAlignedRect {
    fn intersects(&self, point: &Point2) -> bool {
        point.intersects(self)
    }
}

impl Intersect for AxisAlignedRect {
    fn intersects(&self, other: &AxisAlignedRect) -> bool {
        (other.center.x - self.center.x).abs() <= (self.width + other.width) / 2.0
            && (other.center.y - self.center.y).abs() <= (self.height + other.height) / 2.0
    }
}

impl Intersect<AxisAlignedRect> for Circle {
    /// 快速近似判定
    ///
    /// 圆心在矩形内时为真；否则取圆心到最近竖边、最近横边的距离组成的"角点距离"与半径比较。
    /// 这不是精确的圆与矩形重叠判定：圆心正对某条边时，
    /// 另一轴上的距离仍会计入，因此会漏掉部分真实重叠。
    fn intersects(&self, rect: &AxisAlignedRect) -> bool {
        if self.center.intersects(rect) {
            return true;
        }

        let dx = (self.center.x - rect.min_x())
            .abs()
            .min((self.center.x - rect.max_x()).abs());
        let dy = (self.center.y - rect.min_y())
            .abs()
            .min((self.center.y - rect.max_y()).abs());
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

impl Intersect<Line> for Circle {
    fn intersects(&self, line: &Line) -> bool {
        line.residual(&self.center).abs() <= self.radius
    }
}

impl Intersect<Circle> for Line {
    fn intersects(&self, circle: &Circle) -> bool {
        circle.intersects(self)
    }
}

impl Intersect<AxisAlignedRect> for Line {
    /// 对角线两端的残差异号（或为零）即穿过矩形
    fn intersects(&self, rect: &AxisAlignedRect) -> bool {
        let r = rect.points().map(|p| self.residual(&p));
        r[0] * r[2] <= 0.0 || r[1] * r[3] <= 0.0
    }
}

impl Intersect<Line> for AxisAlignedRect {
    fn intersects(&self, line: &Line) -> bool {
        line.intersects(self)
    }
}

impl IntersectionPoint for Line {
    /// Cramer 法则求解两个 Hesse 方程
    ///
    /// 法线行列式为 0 时两直线平行或重合，没有唯一交点。
    fn intersection_point(&self, other: &Line) -> Option<Point2> {
        let d = det(self.norm(), other.norm());
        if d == 0.0 {
            return None;
        }

        let values = Vector2::new(self.value(), other.value());
        let dx = det(&values, &Vector2::new(self.norm().y, other.norm().y));
        let dy = det(&Vector2::new(self.norm().x, other.norm().x), &values);

        Some(Point2::new(dx / d, dy / d))
    }
}

impl IntersectionPoint<Line> for Ray {
    fn intersection_point(&self, line: &Line) -> Option<Point2> {
        self.line()
            .intersection_point(line)
            .filter(|p| self.contains_projection(p))
    }
}

impl IntersectionPoint<Segment> for Line {
    fn intersection_point(&self, segment: &Segment) -> Option<Point2> {
        self.intersection_point(segment.line())
            .filter(|p| segment.contains_projection(p))
    }
}

impl IntersectionPoint<Segment> for Ray {
    fn intersection_point(&self, segment: &Segment) -> Option<Point2> {
        self.line()
            .intersection_point(segment.line())
            .filter(|p| self.contains_projection(p) && segment.contains_projection(p))
    }
}

/// 直线被矩形截取的部分
///
/// 结果线段位于原直线上，覆盖直线与矩形边界各交点的坐标范围。
/// 只擦过一个角点时得到长度为 0 的线段。
pub fn intersection_segment(line: &Line, rect: &AxisAlignedRect) -> Option<Segment> {
    if !line.intersects(rect) {
        return None;
    }

    let (min, max) = rect
        .segments()
        .iter()
        .filter_map(|edge| line.intersection_point(edge))
        .map(|p| line.coordinate(&p))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), c| {
            (min.min(c), max.max(c))
        });

    if min > max {
        return None;
    }
    Some(Segment::on_line(*line, min, max))
}
