//! 配置文件的定义与校验
//!

use crate::data::{Employee, HOURS};
use crate::optimizers::genetic::GeneticAlgorithm;
use crate::Error;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

/// 目标函数各项指标的权重，未给出的使用默认值
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveConfig {
    pub preference: Option<f64>,
    pub fairness: Option<f64>,
    pub uncovered: Option<f64>,
    pub overstaffed: Option<f64>,
    pub off_demand: Option<f64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizationConfig {
    pub objective: Option<ObjectiveConfig>,
    pub genetic: Option<GeneticAlgorithm>,
    pub seed: Option<u64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub info: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    pub optimization: Option<OptimizationConfig>,
}

impl Config {
    pub fn genetic(&self) -> GeneticAlgorithm {
        self.optimization
            .as_ref()
            .and_then(|x| x.genetic.clone())
            .unwrap_or_default()
    }

    pub fn objective(&self) -> ObjectiveConfig {
        self.optimization
            .as_ref()
            .and_then(|x| x.objective.clone())
            .unwrap_or_default()
    }

    pub fn seed(&self) -> Option<u64> {
        self.optimization.as_ref().and_then(|x| x.seed)
    }

    /// 检查员工列表以及算法参数是否合法
    pub fn validate(&self) -> Result<(), Error> {
        let mut ids = FxHashSet::default();
        for employee in &self.employees {
            if employee.name.trim().is_empty() {
                return Err(format!("员工 {} 的名字为空", employee.id).into());
            }
            if !ids.insert(employee.id) {
                return Err(format!("员工编号 {} 重复", employee.id).into());
            }
            for preference in &employee.preferences {
                if let Some(hour) = preference.hours.iter().find(|h| !HOURS.contains(h)) {
                    return Err(format!(
                        "员工 {} 在 {} 的希望时段 {hour} 点不在 8 点到 24 点之间",
                        employee.name, preference.day
                    )
                    .into());
                }
            }
        }
        self.genetic().validate()
    }
}
