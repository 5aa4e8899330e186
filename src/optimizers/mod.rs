//! 优化方法的实现
//!

use crate::objectives::Objective;
use crate::schedule::ScheduleGrid;
pub mod genetic;

pub struct OptimizationResult<O: Objective> {
    /// 修复后的最优排班表
    pub schedule: ScheduleGrid,
    pub metric: O::Metric,
    pub fitness: f64,
    /// 每一代种群中的最高适应度，第 0 项为初始种群
    pub history: Vec<f64>,
}
