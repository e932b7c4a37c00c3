//! 扫掠碰撞求解
//!
//! 给定运动的点或圆、位移向量和静止障碍物，求沿位移方向第一次接触的位置，
//! 以及在接触面上反射后的位移。只考虑位移方向上（前方）的接触，
//! 不限制行进距离：超出剩余行程的接触由调用方（见 [`crate::sweep`]）丢弃。
//!
//! 起点已与障碍物重叠时：正在离开则没有碰撞；正在深入则在起点原地反射，
//! 得到距离为 0 的接触，把物体推回外侧。
//!
//! 复合形状由多个候选碰撞组成，取离起点最近的一个：
//! - 圆对线段 = 平移后的线段 + 两个端点处的圆
//! - 圆对矩形 = 四条边

use serde::{Deserialize, Serialize};

use crate::distance::distance;
use crate::geometry::{closest_point, AxisAlignedRect, Circle, Line, Ray, Segment};
use crate::intersection::intersection_point;
use crate::math::{mirror, normalized, square_distance, Point2, Vector2};

/// 碰撞结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    /// 接触点
    pub position: Point2,
    /// 反射后的位移，用于本帧剩余的运动
    pub movement: Vector2,
}

/// 运动图元对静止障碍物的碰撞
pub trait Collide<O: ?Sized> {
    fn collide(&self, movement: &Vector2, obstacle: &O) -> Option<Collision>;
}

/// 以 `movement` 运动的 `moving` 与静止的 `obstacle` 的第一次接触
pub fn collide<M, O>(moving: &M, movement: &Vector2, obstacle: &O) -> Option<Collision>
where
    M: Collide<O> + ?Sized,
    O: ?Sized,
{
    moving.collide(movement, obstacle)
}

/// 从候选中选出离 `start` 最近的碰撞
///
/// 空候选被跳过；距离相同时保留先出现的。
pub fn best_collision<I>(start: &Point2, collisions: I) -> Option<Collision>
where
    I: IntoIterator<Item = Option<Collision>>,
{
    best_indexed_collision(start, collisions).map(|(_, collision)| collision)
}

/// 同 [`best_collision`]，并返回获胜候选在序列中的下标
pub fn best_indexed_collision<I>(start: &Point2, collisions: I) -> Option<(usize, Collision)>
where
    I: IntoIterator<Item = Option<Collision>>,
{
    let mut best = None;
    let mut best_distance = f64::INFINITY;

    for (index, collision) in collisions.into_iter().enumerate() {
        let Some(collision) = collision else {
            continue;
        };

        let d = distance(start, &collision.position);
        if d < best_distance {
            best = Some((index, collision));
            best_distance = d;
        }
    }

    best
}

impl Collide<Line> for Point2 {
    fn collide(&self, movement: &Vector2, line: &Line) -> Option<Collision> {
        let ray = Ray::new(*self, *movement).ok()?;
        let position = intersection_point(&ray, line)?;

        Some(Collision {
            position,
            movement: mirror(movement, line.norm()),
        })
    }
}

impl Collide<Circle> for Point2 {
    fn collide(&self, movement: &Vector2, circle: &Circle) -> Option<Collision> {
        let square_radius = circle.radius * circle.radius;

        // 起点已在圆内：正在离开时不算碰撞，正在深入时原地反射
        let outward = self - circle.center;
        if outward.norm_squared() < square_radius {
            if outward.dot(movement) >= 0.0 {
                return None;
            }
            let surface = normalized(outward).ok()?;
            return Some(Collision {
                position: *self,
                movement: mirror(movement, &surface),
            });
        }

        let movement_line = Line::through(*self, *movement).ok()?;
        let closest = closest_point(&movement_line, &circle.center);

        let square_offset = square_distance(&closest, &circle.center);
        if square_offset >= square_radius {
            return None;
        }

        // 从最近点退回到圆周：勾股定理求出弦的一半
        let missing = (square_radius - square_offset).sqrt();
        let back = normalized(self - closest).ok()?;
        let position = closest + back.into_inner() * missing;

        // 接触点必须在运动前方
        if (position - self).dot(movement) < 0.0 {
            return None;
        }

        let surface = normalized(position - circle.center).ok()?;
        Some(Collision {
            position,
            movement: mirror(movement, &surface),
        })
    }
}

impl Collide<Segment> for Point2 {
    fn collide(&self, movement: &Vector2, segment: &Segment) -> Option<Collision> {
        let ray = Ray::new(*self, *movement).ok()?;
        let position = intersection_point(&ray, segment)?;

        Some(Collision {
            position,
            movement: mirror(movement, segment.norm()),
        })
    }
}

impl Collide<Circle> for Circle {
    /// 把两圆半径合并到障碍圆上，转化为圆心（点）对圆
    fn collide(&self, movement: &Vector2, circle: &Circle) -> Option<Collision> {
        let grown = Circle::new(circle.center, circle.radius + self.radius);
        self.center.collide(movement, &grown)
    }
}

impl Collide<Point2> for Circle {
    fn collide(&self, movement: &Vector2, point: &Point2) -> Option<Collision> {
        self.collide(movement, &Circle::new(*point, 0.0))
    }
}

impl Collide<Line> for Circle {
    /// 直线朝圆心方向平移一个半径（Minkowski 和），再按圆心对直线求解
    fn collide(&self, movement: &Vector2, line: &Line) -> Option<Collision> {
        if !approaches(line, &self.center, movement) {
            return None;
        }
        if let Some(contact) = overlapping_contact(line, self, movement) {
            return Some(contact);
        }
        let shifted = line.moved_towards(&self.center, self.radius);
        self.center.collide(movement, &shifted)
    }
}

impl Collide<Segment> for Circle {
    /// 圆可能撞上平移后的线段本体，也可能绕过任一端点
    fn collide(&self, movement: &Vector2, segment: &Segment) -> Option<Collision> {
        let body = if approaches(segment.line(), &self.center, movement) {
            overlapping_contact(segment.line(), self, movement)
                .filter(|_| segment.contains_projection(&self.center))
                .or_else(|| {
                    let shifted = segment.moved_towards(&self.center, self.radius);
                    self.center.collide(movement, &shifted)
                })
        } else {
            None
        };
        let start_cap = Circle::new(segment.start(), self.radius);
        let end_cap = Circle::new(segment.end(), self.radius);

        best_collision(
            &self.center,
            [
                body,
                self.center.collide(movement, &start_cap),
                self.center.collide(movement, &end_cap),
            ],
        )
    }
}

impl Collide<AxisAlignedRect> for Circle {
    /// 逐条边求解后取最近者
    ///
    /// 角点由各边端点处的圆处理，并非精确的凸多边形 Minkowski 和。
    fn collide(&self, movement: &Vector2, rect: &AxisAlignedRect) -> Option<Collision> {
        best_collision(
            &self.center,
            rect.segments()
                .iter()
                .map(|segment| self.collide(movement, segment)),
        )
    }
}

/// 圆心是否正朝直线运动
///
/// 圆与直线已有重叠、且正在离开时，平移后的直线可能仍在圆心前方，不应算作碰撞。
fn approaches(line: &Line, center: &Point2, movement: &Vector2) -> bool {
    line.residual(center) * line.norm().dot(movement) < 0.0
}

/// 圆已与直线重叠时在圆心原地反射，把它推回直线外侧
///
/// 只在 [`approaches`] 成立时调用；距离为 0，总会被 [`best_collision`] 优先选中。
fn overlapping_contact(line: &Line, circle: &Circle, movement: &Vector2) -> Option<Collision> {
    (line.residual(&circle.center).abs() < circle.radius).then(|| Collision {
        position: circle.center,
        movement: mirror(movement, line.norm()),
    })
}

/// 静止障碍物
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    Line(Line),
    Circle(Circle),
    Segment(Segment),
    Point(Point2),
    Rect(AxisAlignedRect),
}

impl Obstacle {
    /// 获取障碍物的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Obstacle::Line(_) => "Line",
            Obstacle::Circle(_) => "Circle",
            Obstacle::Segment(_) => "Segment",
            Obstacle::Point(_) => "Point",
            Obstacle::Rect(_) => "Rect",
        }
    }
}

impl Collide<Obstacle> for Circle {
    fn collide(&self, movement: &Vector2, obstacle: &Obstacle) -> Option<Collision> {
        match obstacle {
            Obstacle::Line(line) => self.collide(movement, line),
            Obstacle::Circle(circle) => self.collide(movement, circle),
            Obstacle::Segment(segment) => self.collide(movement, segment),
            Obstacle::Point(point) => self.collide(movement, point),
            Obstacle::Rect(rect) => self.collide(movement, rect),
        }
    }
}

impl From<Line> for Obstacle {
    fn from(line: Line) -> Self {
        Obstacle::Line(line)
    }
}

impl From<Circle> for Obstacle {
    fn from(circle: Circle) -> Self {
        Obstacle::Circle(circle)
    }
}

impl From<Segment> for Obstacle {
    fn from(segment: Segment) -> Self {
        Obstacle::Segment(segment)
    }
}

impl From<Point2> for Obstacle {
    fn from(point: Point2) -> Self {
        Obstacle::Point(point)
    }
}

impl From<AxisAlignedRect> for Obstacle {
    fn from(rect: AxisAlignedRect) -> Self {
        Obstacle::Rect(rect)
    }
}
