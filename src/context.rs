//! 一次优化运行的上下文：员工、各自的出勤意愿、需求表，以及每个时段可排的员工。
//!
//! 上下文在运行开始时构建一次，之后只读。
//!

use crate::data::{Availability, DemandMap, Employee, Slot, SLOT_COUNT};
use crate::schedule::{ScheduleGrid, SLOT_CAPACITY};
use crate::Error;
use rand::Rng;
use rustc_hash::FxHashSet;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ShiftContext {
    pub employees: Vec<Employee>,
    pub availabilities: Vec<Availability>,
    pub demand: DemandMap,
    eligible: Vec<Vec<usize>>,
}

impl ShiftContext {
    pub fn new(employees: Vec<Employee>) -> Self {
        let availabilities: Vec<Availability> =
            employees.iter().map(Employee::availability).collect();
        let demand = DemandMap::from_availabilities(availabilities.iter().copied());
        let mut eligible = vec![Vec::new(); SLOT_COUNT];
        for (employee, availability) in availabilities.iter().enumerate() {
            for slot in availability.iter() {
                eligible[slot.index()].push(employee);
            }
        }

        let mut names = FxHashSet::default();
        for (employee, availability) in employees.iter().zip(&availabilities) {
            if !names.insert(employee.name.as_str()) {
                warn!("员工名 {} 重复，展示时将无法区分", employee.name);
            }
            if availability.is_empty() {
                warn!("员工 {} 没有提交任何希望时段，不会被排班", employee.name);
            }
        }

        Self {
            employees,
            availabilities,
            demand,
            eligible,
        }
    }

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    /// 愿意在该时段出勤的员工下标，按员工顺序排列
    pub fn eligible(&self, slot: Slot) -> &[usize] {
        &self.eligible[slot.index()]
    }

    /// 随机生成一个初始排班表
    ///
    /// 依次遍历每名员工的每个希望时段，以 1/2 的概率排入，但时段已满两人时不再排入。
    /// 遍历顺序决定了谁先占到名额，这本身也是初始种群多样性的来源之一。
    pub fn random_grid<R: Rng + ?Sized>(&self, rng: &mut R) -> ScheduleGrid {
        let mut grid = ScheduleGrid::empty();
        for (employee, availability) in self.availabilities.iter().enumerate() {
            for slot in availability.iter() {
                if rng.random_bool(0.5) && grid.get(slot).len() < SLOT_CAPACITY {
                    grid.assign(slot, employee);
                }
            }
        }
        grid.clear_undemanded(&self.demand);
        grid
    }

    /// 把排班表序列化为 YAML，用于保存中间结果
    pub fn serialize(&self, grid: &ScheduleGrid) -> Result<String, Error> {
        let table = grid.to_table(&self.employees);
        Ok(serde_yaml::to_string(&table)?)
    }
}
