//! 数学基础类型
//!
//! 基于 nalgebra 提供的向量、点和单位向量类型的别名，以及平面几何中常用的辅助函数。

use nalgebra as na;

use crate::error::GeometryError;

/// 2D点类型
pub type Point2 = na::Point2<f64>;

/// 2D向量类型
pub type Vector2 = na::Vector2<f64>;

/// 单位方向向量
///
/// 只能通过 [`normalized`] 从非零向量构造，保证长度为 1。
/// 直线方程和反射公式都依赖这一点。
pub type Norm = na::Unit<Vector2>;

/// 数值容差，用于几何比较
pub const EPSILON: f64 = 1e-10;

/// 判断两个浮点数是否近似相等
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// 判断两个2D点是否近似相等
#[inline]
pub fn points_approx_eq(a: &Point2, b: &Point2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// 判断两个2D向量是否近似相等
#[inline]
pub fn vectors_approx_eq(a: &Vector2, b: &Vector2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// 将向量归一化为单位方向
///
/// 零向量或含有非有限分量的向量没有方向，返回 [`GeometryError::DegenerateDirection`]。
pub fn normalized(vector: Vector2) -> Result<Norm, GeometryError> {
    if !vector.iter().all(|c| c.is_finite()) {
        return Err(GeometryError::DegenerateDirection {
            x: vector.x,
            y: vector.y,
        });
    }
    na::Unit::try_new(vector, 0.0).ok_or(GeometryError::DegenerateDirection {
        x: vector.x,
        y: vector.y,
    })
}

/// 原地归一化，零向量保持不变
pub fn normalize(vector: &mut Vector2) {
    if vector.norm_squared() > 0.0 {
        let length = vector.norm();
        *vector /= length;
    }
}

/// 90°旋转
pub trait Rotate90: Sized {
    /// 顺时针旋转：(x, y) -> (y, -x)
    fn rotated_cw(&self) -> Self;

    /// 逆时针旋转：(x, y) -> (-y, x)
    fn rotated_ccw(&self) -> Self;
}

impl Rotate90 for Vector2 {
    fn rotated_cw(&self) -> Self {
        Vector2::new(self.y, -self.x)
    }

    fn rotated_ccw(&self) -> Self {
        Vector2::new(-self.y, self.x)
    }
}

impl Rotate90 for Norm {
    // 旋转不改变长度
    fn rotated_cw(&self) -> Self {
        na::Unit::new_unchecked(self.into_inner().rotated_cw())
    }

    fn rotated_ccw(&self) -> Self {
        na::Unit::new_unchecked(self.into_inner().rotated_ccw())
    }
}

/// 二维叉积（行列式）：a.x * b.y - a.y * b.x
#[inline]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// 两个列向量组成的 2x2 矩阵的行列式，与 [`cross`] 相同
#[inline]
pub fn det(a: &Vector2, b: &Vector2) -> f64 {
    cross(a, b)
}

/// 从 a 转到 b 是否为左转（逆时针）
pub fn left_turn(a: &Vector2, b: &Vector2) -> bool {
    cross(a, b) > 0.0
}

/// 从 a 转到 b 是否为右转（顺时针）
pub fn right_turn(a: &Vector2, b: &Vector2) -> bool {
    cross(a, b) < 0.0
}

/// 两点距离的平方
#[inline]
pub fn square_distance(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm_squared()
}

/// 关于外法线 `norm` 所在表面的镜像反射：v - 2n(v·n)
///
/// 法向分量取反，切向分量保持不变。所有碰撞响应都由它计算。
pub fn mirror(vector: &Vector2, norm: &Norm) -> Vector2 {
    let coordinate = norm.dot(vector);
    vector - norm.into_inner() * (2.0 * coordinate)
}
