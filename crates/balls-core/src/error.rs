//! 几何错误定义

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("Degenerate direction: ({x}, {y}) cannot be normalized")]
    DegenerateDirection { x: f64, y: f64 },
}
