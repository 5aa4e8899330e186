//! 目标函数接口，以及默认目标函数的实现
//!

use crate::schedule::ScheduleGrid;
use serde::Serialize;
use std::fmt::Display;
pub mod default;
pub mod metric;

pub trait Objective {
    type Metric: Display + Clone + Serialize;

    /// Metric 存放了各项指标；后面的 f64 是对各项指标加权求和得到的适应度，越大越好
    fn evaluate(&self, grid: &ScheduleGrid) -> (Self::Metric, f64);
}
