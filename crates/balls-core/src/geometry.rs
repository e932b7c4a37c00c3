//! 几何图元定义
//!
//! 支持的基本图元：
//! - 直线 (Line)，以 Hesse 法式存储
//! - 射线 (Ray)
//! - 线段 (Segment)
//! - 圆 (Circle)
//! - 轴对齐矩形 (AxisAlignedRect)
//!
//! 直线、射线和线段共用同一种参数化：点在直线方向上的投影坐标。
//! 射线和线段只是在直线上附加了坐标范围，因此所有求交运算最终都归结为一维比较。

use std::fmt;

use nalgebra::Unit;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::{normalized, Norm, Point2, Rotate90, Vector2};

/// 直线（Hesse 法式）
///
/// 对直线上任意点 P 有 `dot(norm, P - origin) == value`。
/// 直线方向为法线逆时针旋转 90°。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    norm: Norm,
    value: f64,
}

impl Line {
    pub fn new(norm: Norm, value: f64) -> Self {
        Self { norm, value }
    }

    /// 由任意（非零）法向量和偏移构造
    pub fn from_normal(normal: Vector2, value: f64) -> Result<Self, GeometryError> {
        Ok(Self::new(normalized(normal)?, value))
    }

    /// 经过指定点、沿单位方向的直线
    pub fn with_direction(point: Point2, direction: Norm) -> Self {
        let norm = direction.rotated_cw();
        let value = norm.dot(&point.coords);
        Self { norm, value }
    }

    /// 经过指定点、沿任意（非零）方向的直线
    pub fn through(point: Point2, direction: Vector2) -> Result<Self, GeometryError> {
        Ok(Self::with_direction(point, normalized(direction)?))
    }

    /// 经过两点的直线，方向从 `first` 指向 `second`
    pub fn from_points(first: Point2, second: Point2) -> Result<Self, GeometryError> {
        Self::through(first, second - first)
    }

    pub fn norm(&self) -> &Norm {
        &self.norm
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// 方向向量（法线逆时针旋转 90°）
    pub fn direction(&self) -> Norm {
        self.norm.rotated_ccw()
    }

    /// 直线上离原点最近的点，也是坐标 0 所在的点
    pub fn point(&self) -> Point2 {
        Point2::origin() + self.norm.into_inner() * self.value
    }

    /// 点在直线方向上的投影坐标
    pub fn coordinate(&self, point: &Point2) -> f64 {
        self.direction().dot(&point.coords)
    }

    /// 由投影坐标还原直线上的点
    pub fn point_at_coordinate(&self, coordinate: f64) -> Point2 {
        self.point() + self.direction().into_inner() * coordinate
    }

    /// 点在法线上的投影，与 `value` 之差即为带符号距离
    pub fn signed_distance(&self, point: &Point2) -> f64 {
        self.norm.dot(&point.coords)
    }

    /// Hesse 残差 `dot(norm, P) - value`，符号表示点位于直线哪一侧
    pub fn residual(&self, point: &Point2) -> f64 {
        self.signed_distance(point) - self.value
    }

    /// 沿法线朝 `point` 所在一侧平移 `amount`
    pub fn move_towards(&mut self, point: &Point2, amount: f64) {
        if self.signed_distance(point) >= self.value {
            self.value += amount;
        } else {
            self.value -= amount;
        }
    }

    pub fn moved_towards(&self, point: &Point2, amount: f64) -> Self {
        let mut moved = *self;
        moved.move_towards(point, amount);
        moved
    }
}

/// 射线：直线上坐标不小于起点坐标的部分
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    line: Line,
    start: f64,
}

impl Ray {
    pub fn new(origin: Point2, direction: Vector2) -> Result<Self, GeometryError> {
        let line = Line::through(origin, direction)?;
        let start = line.coordinate(&origin);
        Ok(Self { line, start })
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    /// 射线起点
    pub fn origin(&self) -> Point2 {
        self.line.point_at_coordinate(self.start)
    }

    pub fn direction(&self) -> Norm {
        self.line.direction()
    }

    /// 点的投影是否落在射线上
    pub fn contains_projection(&self, point: &Point2) -> bool {
        self.line.coordinate(point) >= self.start
    }
}

/// 线段：直线上的闭区间 `[start, end]`，构造时保证 `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    line: Line,
    start: f64,
    end: f64,
}

impl Segment {
    /// 由两个端点构造，端点重合时没有方向
    pub fn new(first: Point2, second: Point2) -> Result<Self, GeometryError> {
        let line = Line::from_points(first, second)?;
        let first = line.coordinate(&first);
        let second = line.coordinate(&second);
        Ok(Self::on_line(line, first, second))
    }

    /// 直线上两个坐标之间的部分
    pub fn on_line(line: Line, first: f64, second: f64) -> Self {
        let (start, end) = if first > second {
            (second, first)
        } else {
            (first, second)
        };
        Self { line, start, end }
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn norm(&self) -> &Norm {
        self.line.norm()
    }

    pub fn start(&self) -> Point2 {
        self.line.point_at_coordinate(self.start)
    }

    pub fn end(&self) -> Point2 {
        self.line.point_at_coordinate(self.end)
    }

    pub fn start_coordinate(&self) -> f64 {
        self.start
    }

    pub fn end_coordinate(&self) -> f64 {
        self.end
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn move_towards(&mut self, point: &Point2, amount: f64) {
        self.line.move_towards(point, amount);
    }

    pub fn moved_towards(&self, point: &Point2, amount: f64) -> Self {
        let mut moved = *self;
        moved.move_towards(point, amount);
        moved
    }

    /// 点的投影是否落在线段坐标区间内
    pub fn contains_projection(&self, point: &Point2) -> bool {
        let coordinate = self.line.coordinate(point);
        coordinate >= self.start && coordinate <= self.end
    }
}

/// 圆
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    /// 半径，约定非负
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// 轴对齐矩形
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAlignedRect {
    pub center: Point2,
    pub width: f64,
    pub height: f64,
}

impl AxisAlignedRect {
    pub fn new(center: Point2, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.center.x - self.width / 2.0
    }

    pub fn max_x(&self) -> f64 {
        self.center.x + self.width / 2.0
    }

    pub fn min_y(&self) -> f64 {
        self.center.y - self.height / 2.0
    }

    pub fn max_y(&self) -> f64 {
        self.center.y + self.height / 2.0
    }

    /// 四个角点，顺序为 (minX,minY) (minX,maxY) (maxX,maxY) (maxX,minY)
    pub fn points(&self) -> [Point2; 4] {
        [
            Point2::new(self.min_x(), self.min_y()),
            Point2::new(self.min_x(), self.max_y()),
            Point2::new(self.max_x(), self.max_y()),
            Point2::new(self.max_x(), self.min_y()),
        ]
    }

    /// 四条边，依次连接相邻角点
    ///
    /// 边的方向取坐标轴方向，宽或高为零的矩形也能得到（退化的）线段。
    pub fn segments(&self) -> [Segment; 4] {
        let ps = self.points();
        [
            edge(ps[0], ps[1], Vector2::new(0.0, 1.0)),
            edge(ps[1], ps[2], Vector2::new(1.0, 0.0)),
            edge(ps[2], ps[3], Vector2::new(0.0, -1.0)),
            edge(ps[3], ps[0], Vector2::new(-1.0, 0.0)),
        ]
    }

    pub fn contains_point(&self, point: &Point2) -> bool {
        (point.x - self.center.x).abs() <= self.width / 2.0
            && (point.y - self.center.y).abs() <= self.height / 2.0
    }
}

fn edge(from: Point2, to: Point2, axis: Vector2) -> Segment {
    let line = Line::with_direction(from, Unit::new_unchecked(axis));
    Segment::on_line(line, line.coordinate(&from), line.coordinate(&to))
}

impl fmt::Display for AxisAlignedRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{} x {}:{}]",
            self.min_x(),
            self.max_x(),
            self.min_y(),
            self.max_y()
        )
    }
}

/// 直线上离指定点最近的点（正交投影）
pub fn closest_point(line: &Line, point: &Point2) -> Point2 {
    let direction = line.direction();
    let coordinate = direction.dot(&point.coords);
    line.point() + direction.into_inner() * coordinate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, points_approx_eq};

    #[test]
    fn test_line_through_point_satisfies_equation() {
        let p = Point2::new(2.0, 3.0);
        let line = Line::through(p, Vector2::new(1.0, 0.0)).unwrap();

        assert!(approx_eq(line.norm().x, 0.0));
        assert!(approx_eq(line.norm().y, -1.0));
        assert!(approx_eq(line.signed_distance(&p), line.value()));
        assert!(approx_eq(line.value(), -3.0));
        assert!(approx_eq(line.direction().x, 1.0));
    }

    #[test]
    fn test_degenerate_line() {
        let p = Point2::new(1.0, 1.0);
        assert!(Line::through(p, Vector2::zeros()).is_err());
        assert!(Line::from_points(p, p).is_err());
        assert!(Segment::new(p, p).is_err());
        assert!(Ray::new(p, Vector2::zeros()).is_err());
    }

    #[test]
    fn test_coordinate_round_trip() {
        let line = Line::from_points(Point2::new(-1.0, 4.0), Point2::new(5.0, -2.5)).unwrap();
        for c in [-100.0, -3.25, 0.0, 1.0, 42.5] {
            let p = line.point_at_coordinate(c);
            assert!(approx_eq(line.coordinate(&p), c));
            assert!(approx_eq(line.signed_distance(&p), line.value()));
        }
    }

    #[test]
    fn test_move_towards() {
        // x = 5
        let line = Line::from_normal(Vector2::new(1.0, 0.0), 5.0).unwrap();

        let left = line.moved_towards(&Point2::new(0.0, 0.0), 1.0);
        assert!(approx_eq(left.value(), 4.0));

        let right = line.moved_towards(&Point2::new(9.0, 0.0), 1.0);
        assert!(approx_eq(right.value(), 6.0));

        // 原直线不变
        assert!(approx_eq(line.value(), 5.0));
    }

    #[test]
    fn test_closest_point() {
        let line = Line::through(Point2::new(0.0, 2.0), Vector2::new(1.0, 1.0)).unwrap();
        let p = closest_point(&line, &Point2::new(2.0, 0.0));
        assert!(points_approx_eq(&p, &Point2::new(0.0, 2.0)));
    }

    #[test]
    fn test_segment_order_normalized() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        let forward = Segment::new(a, b).unwrap();
        let backward = Segment::new(b, a).unwrap();

        assert!(forward.start_coordinate() <= forward.end_coordinate());
        assert!(backward.start_coordinate() <= backward.end_coordinate());
        assert!(approx_eq(forward.length(), 10.0));

        let forward_ends = [forward.start(), forward.end()];
        let backward_ends = [backward.start(), backward.end()];
        for p in [a, b] {
            assert!(forward_ends.iter().any(|q| points_approx_eq(q, &p)));
            assert!(backward_ends.iter().any(|q| points_approx_eq(q, &p)));
        }

        let flipped = Segment::on_line(*forward.line(), 10.0, 0.0);
        assert!(points_approx_eq(&flipped.start(), &forward.start()));
        assert!(points_approx_eq(&flipped.end(), &forward.end()));
    }

    #[test]
    fn test_ray_and_segment_containment() {
        let ray = Ray::new(Point2::new(1.0, 1.0), Vector2::new(1.0, 0.0)).unwrap();
        assert!(ray.contains_projection(&Point2::new(1.0, 7.0)));
        assert!(ray.contains_projection(&Point2::new(100.0, 1.0)));
        assert!(!ray.contains_projection(&Point2::new(0.5, 1.0)));
        assert!(points_approx_eq(&ray.origin(), &Point2::new(1.0, 1.0)));

        let segment = Segment::new(Point2::new(0.0, 0.0), Point2::new(0.0, 4.0)).unwrap();
        assert!(segment.contains_projection(&Point2::new(3.0, 0.0)));
        assert!(segment.contains_projection(&Point2::new(-3.0, 4.0)));
        assert!(!segment.contains_projection(&Point2::new(0.0, 4.5)));
    }

    #[test]
    fn test_rect_corners_and_edges() {
        let rect = AxisAlignedRect::new(Point2::new(200.0, 50.0), 100.0, 50.0);
        assert!(approx_eq(rect.min_x(), 150.0));
        assert!(approx_eq(rect.max_x(), 250.0));
        assert!(approx_eq(rect.min_y(), 25.0));
        assert!(approx_eq(rect.max_y(), 75.0));

        let ps = rect.points();
        assert_eq!(ps[0], Point2::new(150.0, 25.0));
        assert_eq!(ps[2], Point2::new(250.0, 75.0));

        for (i, segment) in rect.segments().iter().enumerate() {
            let from = ps[i];
            let to = ps[(i + 1) % 4];
            let ends = [segment.start(), segment.end()];
            assert!(ends.iter().any(|q| points_approx_eq(q, &from)));
            assert!(ends.iter().any(|q| points_approx_eq(q, &to)));
        }

        assert!(rect.contains_point(&Point2::new(150.0, 75.0)));
        assert!(!rect.contains_point(&Point2::new(149.0, 50.0)));
        assert_eq!(rect.to_string(), "[150:250 x 25:75]");
    }

    #[test]
    fn test_line_serde() {
        let line = Line::from_normal(Vector2::new(0.0, 2.0), 3.0).unwrap();
        let json = serde_json::to_string(&line).unwrap();
        let restored: Line = serde_json::from_str(&json).unwrap();
        assert_eq!(line, restored);
    }
}
