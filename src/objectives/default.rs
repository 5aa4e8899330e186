use super::metric::Metric;
use super::Objective;
use crate::config::ObjectiveConfig;
use crate::context::ShiftContext;
use crate::data::{Availability, DemandMap, Slot};
use crate::schedule::{ScheduleGrid, SLOT_CAPACITY};

/// 各项指标的权重
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub preference: f64,
    pub fairness: f64,
    pub uncovered: f64,
    pub overstaffed: f64,
    pub off_demand: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            preference: 1.0,
            fairness: 2.0,
            uncovered: 5.0,
            overstaffed: 10.0,
            off_demand: 100.0,
        }
    }
}

impl From<&ObjectiveConfig> for Weights {
    fn from(config: &ObjectiveConfig) -> Self {
        let default = Self::default();
        Self {
            preference: config.preference.unwrap_or(default.preference),
            fairness: config.fairness.unwrap_or(default.fairness),
            uncovered: config.uncovered.unwrap_or(default.uncovered),
            overstaffed: config.overstaffed.unwrap_or(default.overstaffed),
            off_demand: config.off_demand.unwrap_or(default.off_demand),
        }
    }
}

/// 默认目标函数：希望一致的奖励、时数不均的惩罚、人数不当的惩罚
#[derive(Debug, Clone)]
pub struct ShiftObjective {
    availabilities: Vec<Availability>,
    demand: DemandMap,
    weights: Weights,
}

impl ShiftObjective {
    pub fn new(context: &ShiftContext, weights: Weights) -> Self {
        Self {
            availabilities: context.availabilities.clone(),
            demand: context.demand,
            weights,
        }
    }

    /// 出勤时数的总体标准差（除以人数而不是人数减一）；没有员工时为 0
    ///
    /// 时数按员工下标统计而不是按名字，重名的员工各算各的。
    fn hours_std(&self, grid: &ScheduleGrid) -> f64 {
        let hours = grid.hours_per_employee(self.availabilities.len());
        if hours.is_empty() {
            return 0.0;
        }
        let count = hours.len() as f64;
        let mean = hours.iter().sum::<usize>() as f64 / count;
        let variance = hours
            .iter()
            .map(|&x| (x as f64 - mean).powi(2))
            .sum::<f64>()
            / count;
        variance.sqrt()
    }
}

impl Objective for ShiftObjective {
    type Metric = Metric;

    fn evaluate(&self, grid: &ScheduleGrid) -> (Metric, f64) {
        let mut preference_hits = 0;
        for (employee, availability) in self.availabilities.iter().enumerate() {
            for slot in availability.iter() {
                // 希望时段必然有需求，这里不必再查需求表
                if grid.get(slot).contains(&employee) {
                    preference_hits += 1;
                }
            }
        }

        let hours_std = self.hours_std(grid);

        let mut uncovered_slots = 0;
        let mut overstaffed = 0;
        let mut off_demand_slots = 0;
        for slot in Slot::all() {
            let count = grid.get(slot).len();
            if !self.demand.is_demanded(slot) {
                if count > 0 {
                    off_demand_slots += 1;
                }
            } else if count == 0 {
                uncovered_slots += 1;
            } else if count > SLOT_CAPACITY {
                overstaffed += count - SLOT_CAPACITY;
            }
        }

        let Weights {
            preference,
            fairness,
            uncovered,
            overstaffed: overstaffed_weight,
            off_demand,
        } = self.weights;
        let fitness = preference * preference_hits as f64
            - fairness * hours_std
            - uncovered * uncovered_slots as f64
            - overstaffed_weight * overstaffed as f64
            - off_demand * off_demand_slots as f64;

        let metric = Metric {
            preference_hits,
            hours_std,
            uncovered_slots,
            overstaffed,
            off_demand_slots,
            fitness,
        };
        (metric, fitness)
    }
}
