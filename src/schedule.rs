//! 排班表的表示，以及修复、渲染等操作。
//!
//! 排班表是一个长度为 `SLOT_COUNT` 的定长缓冲区，每个时段存放已排员工的下标列表。
//! 员工在排班表中只以下标出现，名字只在渲染时才解析，所以重名的员工不会互相混淆。
//!

use crate::data::{DayOfWeek, DemandMap, Employee, Slot, DAYS, SLOT_COUNT};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// 每个时段最多安排的人数
pub const SLOT_CAPACITY: usize = 2;

#[derive(Debug, PartialEq, Eq)]
pub struct ScheduleGrid {
    slots: Vec<Vec<usize>>,
}

impl Clone for ScheduleGrid {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }

    /// 复用已有的缓冲区，避免每一代都重新分配
    fn clone_from(&mut self, source: &Self) {
        self.slots.clone_from(&source.slots);
    }
}

impl Default for ScheduleGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl ScheduleGrid {
    /// 所有时段都为空的排班表
    pub fn empty() -> Self {
        Self {
            slots: vec![Vec::new(); SLOT_COUNT],
        }
    }

    pub fn get(&self, slot: Slot) -> &[usize] {
        &self.slots[slot.index()]
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut Vec<usize> {
        &mut self.slots[slot.index()]
    }

    /// 不检查容量，直接追加到时段末尾
    pub fn assign(&mut self, slot: Slot, employee: usize) {
        self.slots[slot.index()].push(employee);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &[usize])> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, list)| (Slot::from_index(index), list.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// 清空所有没有需求的时段
    pub fn clear_undemanded(&mut self, demand: &DemandMap) {
        for (index, list) in self.slots.iter_mut().enumerate() {
            if !demand.is_demanded(Slot::from_index(index)) {
                list.clear();
            }
        }
    }

    /// 没有需求的时段清空，超员的时段按现有顺序只保留前两人
    pub fn repair(&mut self, demand: &DemandMap) {
        for (index, list) in self.slots.iter_mut().enumerate() {
            if !demand.is_demanded(Slot::from_index(index)) {
                list.clear();
            } else {
                list.truncate(SLOT_CAPACITY);
            }
        }
    }

    pub fn repaired(&self, demand: &DemandMap) -> Self {
        let mut grid = self.clone();
        grid.repair(demand);
        grid
    }

    /// 每名员工被安排的总时段数；超出 `employee_count` 的下标不计入
    pub fn hours_per_employee(&self, employee_count: usize) -> Vec<usize> {
        let mut hours = vec![0; employee_count];
        for &employee in self.slots.iter().flatten() {
            if let Some(count) = hours.get_mut(employee) {
                *count += 1;
            }
        }
        hours
    }

    /// 把员工下标解析为名字，得到便于展示的排班表
    pub fn to_table(&self, employees: &[Employee]) -> ShiftTable {
        let mut table = BTreeMap::new();
        for (slot, list) in self.iter() {
            let names = list
                .iter()
                .filter_map(|&index| employees.get(index))
                .map(|employee| employee.name.clone())
                .collect();
            table
                .entry(slot.day())
                .or_insert_with(BTreeMap::new)
                .insert(slot.hour(), names);
        }
        ShiftTable(table)
    }

    /// 每名员工的出勤汇总
    pub fn summaries(&self, employees: &[Employee]) -> Vec<EmployeeSummary> {
        employees
            .iter()
            .enumerate()
            .map(|(index, employee)| {
                let days = DAYS
                    .iter()
                    .filter_map(|&day| {
                        let hours: Vec<u8> = Slot::of_day(day)
                            .filter(|&slot| self.get(slot).contains(&index))
                            .map(Slot::hour)
                            .collect();
                        (!hours.is_empty()).then_some((day, hours))
                    })
                    .collect::<Vec<_>>();
                let total_hours = days.iter().map(|(_, hours)| hours.len()).sum();
                EmployeeSummary {
                    name: employee.name.clone(),
                    total_hours,
                    days,
                }
            })
            .collect()
    }
}

/// 一个候选排班表以及它的适应度
///
/// 适应度为 `None` 表示排班表刚被替换过，尚未评价。
#[derive(Debug, Clone)]
pub struct Chromosome {
    pub grid: ScheduleGrid,
    pub fitness: Option<f64>,
}

impl Chromosome {
    pub fn new(grid: ScheduleGrid) -> Self {
        Self {
            grid,
            fitness: None,
        }
    }

    pub fn evaluated(grid: ScheduleGrid, fitness: f64) -> Self {
        Self {
            grid,
            fitness: Some(fitness),
        }
    }

    /// 未评价的个体视为最差
    pub fn score(&self) -> f64 {
        self.fitness.unwrap_or(f64::NEG_INFINITY)
    }
}

/// 适应度最高的个体的位置；并列时取最靠前的一个
pub fn best_index(population: &[Chromosome]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, chromosome) in population.iter().enumerate() {
        match best {
            Some(current) if chromosome.score() <= population[current].score() => {}
            _ => best = Some(index),
        }
    }
    best
}

/// 以名字展示的排班表：星期 → 小时 → 员工名
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftTable(pub BTreeMap<DayOfWeek, BTreeMap<u8, Vec<String>>>);

impl ShiftTable {
    pub fn names(&self, slot: Slot) -> &[String] {
        self.0
            .get(&slot.day())
            .and_then(|hours| hours.get(&slot.hour()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Display for ShiftTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = crate::data::HOURS
            .iter()
            .map(|hour| format!("{hour}:00"))
            .join("\t");
        writeln!(f, "曜日\t{header}")?;
        for day in DAYS {
            let cells = Slot::of_day(day)
                .map(|slot| self.names(slot).iter().join(","))
                .join("\t");
            writeln!(f, "{day}\t{cells}")?;
        }
        Ok(())
    }
}

/// 一名员工的出勤汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSummary {
    pub name: String,
    pub total_hours: usize,
    pub days: Vec<(DayOfWeek, Vec<u8>)>,
}

impl Display for EmployeeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}：合计出勤 {} 小时", self.name, self.total_hours)?;
        for (day, hours) in &self.days {
            let hours = hours.iter().map(|hour| format!("{hour}:00")).join(", ");
            writeln!(f, "  {day}曜：{hours}")?;
        }
        Ok(())
    }
}
