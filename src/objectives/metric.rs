// 排班表各项指标的数据结构以及它们输出到命令行的方式

use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    /// 排在自己希望时段内的人次
    pub preference_hits: usize,
    /// 各员工出勤时数的总体标准差
    pub hours_std: f64,
    /// 有需求却无人出勤的时段数
    pub uncovered_slots: usize,
    /// 所有时段超出两人的人数之和
    pub overstaffed: usize,
    /// 没有需求却有人出勤的时段数
    pub off_demand_slots: usize,
    pub fitness: f64,
}

impl Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("希望一致：{}；", self.preference_hits))?;
        f.write_str(&format!("时数标准差：{:.2}；", self.hours_std))?;
        if self.uncovered_slots > 0 {
            f.write_str(&format!("缺人时段：{}；", self.uncovered_slots))?;
        }
        if self.overstaffed > 0 {
            f.write_str(&format!("超员人数：{}；", self.overstaffed))?;
        }
        if self.off_demand_slots > 0 {
            f.write_str(&format!("无需求时段出勤：{}；", self.off_demand_slots))?;
        }
        f.write_str(&format!("适应度：{:.2}\n", self.fitness))
    }
}
