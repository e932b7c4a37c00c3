//! 演示程序配置
//!
//! 从 JSON 文件读取，缺省字段取默认值。

use std::path::Path;

use anyhow::{anyhow, ensure, Context, Result};
use balls_core::sweep::SweepConfig;
use serde::{Deserialize, Serialize};
use tracing::Level;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 每秒模拟步数
    pub fps: u32,
    /// 模拟总时长（秒）
    pub duration_seconds: f64,
    /// 每隔多少步输出一次状态，0 表示不输出
    pub report_every: u32,
    /// 日志级别：trace / debug / info / warn / error
    pub log_level: String,
    /// 场地宽度，四周有墙
    pub arena_width: f64,
    /// 场地高度
    pub arena_height: f64,
    /// 球的初始速率，方向固定为 (1, 3)
    pub ball_speed: f64,
    /// 挡板中心的初始横坐标，缺省时为 200
    pub pad_position: Option<f64>,
    pub sweep: SweepConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 240,
            duration_seconds: 5.0,
            report_every: 240,
            log_level: "info".to_string(),
            arena_width: 1024.0,
            arena_height: 768.0,
            ball_speed: 300.0,
            pad_position: None,
            sweep: SweepConfig::default(),
        }
    }
}

impl Config {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.fps > 0, "fps must be positive");
        ensure!(
            self.duration_seconds >= 0.0,
            "duration_seconds must not be negative"
        );
        ensure!(
            self.arena_width > 0.0 && self.arena_height > 0.0,
            "arena size must be positive"
        );
        self.level()?;
        Ok(())
    }

    /// 单步时长（秒）
    pub fn delta(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }

    /// 总步数
    pub fn ticks(&self) -> u64 {
        (self.duration_seconds * f64::from(self.fps)).round() as u64
    }

    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| anyhow!("Unknown log level: {}", self.log_level))
    }
}
