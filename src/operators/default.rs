use super::{Crossover, Mutation, Selection};
use crate::context::ShiftContext;
use crate::data::{DemandMap, Slot, DAYS, SLOT_COUNT};
use crate::schedule::{Chromosome, ScheduleGrid, SLOT_CAPACITY};
use rand::seq::IndexedRandom;
use rand::Rng;

/// 锦标赛选择：有放回地随机抽取若干个体，取适应度最高者
///
/// 适应度相同时保留先抽到的个体。
#[derive(Debug, Clone, Copy)]
pub struct TournamentSelection {
    pub size: usize,
}

impl TournamentSelection {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Selection for TournamentSelection {
    fn select<'a, R: Rng + ?Sized>(
        &self,
        population: &'a [Chromosome],
        rng: &mut R,
    ) -> &'a Chromosome {
        let mut best = &population[rng.random_range(0..population.len())];
        for _ in 1..self.size {
            let candidate = &population[rng.random_range(0..population.len())];
            if candidate.score() > best.score() {
                best = candidate;
            }
        }
        best
    }
}

/// 以天为单位的交叉：每一天整天的安排都来自同一个亲本
///
/// 每天独立地抛一次硬币决定亲本；没有需求的时段留空，超员的时段按顺序只保留前两人。
#[derive(Debug, Clone, Copy)]
pub struct DayCrossover {
    demand: DemandMap,
}

impl DayCrossover {
    pub fn new(context: &ShiftContext) -> Self {
        Self {
            demand: context.demand,
        }
    }
}

impl Crossover for DayCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        first: &ScheduleGrid,
        second: &ScheduleGrid,
        child: &mut ScheduleGrid,
        rng: &mut R,
    ) {
        for day in DAYS {
            let parent = if rng.random_bool(0.5) { first } else { second };
            for slot in Slot::of_day(day) {
                let list = child.get_mut(slot);
                list.clear();
                if self.demand.is_demanded(slot) {
                    let source = parent.get(slot);
                    list.extend_from_slice(&source[..source.len().min(SLOT_CAPACITY)]);
                }
            }
        }
    }
}

/// 逐时段的开关变异
///
/// 每个有需求的时段以 `rate` 的概率触发：从愿意在该时段出勤的员工中随机选一人，
/// 已排入则移除，未排入且时段未满则加入，时段已满则什么也不做。
/// 没有需求的时段无论是否触发都会被清空。
#[derive(Debug, Clone)]
pub struct ToggleMutation {
    pub rate: f64,
    demand: DemandMap,
    eligible: Vec<Vec<usize>>,
}

impl ToggleMutation {
    pub fn new(context: &ShiftContext, rate: f64) -> Self {
        let eligible = (0..SLOT_COUNT)
            .map(|index| context.eligible(Slot::from_index(index)).to_vec())
            .collect();
        Self {
            rate,
            demand: context.demand,
            eligible,
        }
    }
}

impl Mutation for ToggleMutation {
    fn mutate<R: Rng + ?Sized>(&self, grid: &mut ScheduleGrid, rng: &mut R) {
        for slot in Slot::all() {
            if !self.demand.is_demanded(slot) {
                grid.get_mut(slot).clear();
                continue;
            }
            if rng.random::<f64>() >= self.rate {
                continue;
            }
            let Some(&employee) = self.eligible[slot.index()].choose(rng) else {
                continue;
            };
            let list = grid.get_mut(slot);
            if let Some(position) = list.iter().position(|&x| x == employee) {
                list.remove(position);
            } else if list.len() < SLOT_CAPACITY {
                list.push(employee);
            }
        }
    }
}
