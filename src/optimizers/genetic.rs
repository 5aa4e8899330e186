//! 遗传算法

use super::OptimizationResult;
use crate::context::ShiftContext;
use crate::interfaces::{Interface, Message};
use crate::objectives::Objective;
use crate::operators::default::{DayCrossover, TournamentSelection, ToggleMutation};
use crate::operators::{Crossover, Mutation, Selection};
use crate::schedule::{best_index, Chromosome, ScheduleGrid};
use crate::Error;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::{debug, info, warn};
use web_time::Instant;

/// 遗传算法的参数：种群大小、代数、锦标赛规模、变异率
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticAlgorithm {
    pub population_size: usize,
    pub generations: usize,
    pub tournament_size: usize,
    pub mutation_rate: f64,
    pub report_interval: Option<usize>,
}

impl Default for GeneticAlgorithm {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            tournament_size: 3,
            mutation_rate: 0.1,
            report_interval: None,
        }
    }
}

impl GeneticAlgorithm {
    pub fn validate(&self) -> Result<(), Error> {
        if self.population_size == 0 {
            return Err("种群大小必须大于 0".into());
        }
        if self.tournament_size == 0 {
            return Err("锦标赛规模必须大于 0".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(format!("变异率 {} 不在 0 到 1 之间", self.mutation_rate).into());
        }
        Ok(())
    }

    /// 使用默认的选择、交叉、变异算子求解
    pub fn solve<O: Objective, R: Rng + ?Sized>(
        &self,
        context: &ShiftContext,
        objective: &O,
        rng: &mut R,
        interface: &dyn Interface,
    ) -> OptimizationResult<O> {
        let selection = TournamentSelection::new(self.tournament_size);
        let crossover = DayCrossover::new(context);
        let mutation = ToggleMutation::new(context, self.mutation_rate);
        self.solve_with(
            context, objective, &selection, &crossover, &mutation, rng, interface,
        )
    }

    /// 遗传算法求解的主函数
    #[allow(clippy::too_many_arguments)]
    pub fn solve_with<O, S, C, M, R>(
        &self,
        context: &ShiftContext,
        objective: &O,
        selection: &S,
        crossover: &C,
        mutation: &M,
        rng: &mut R,
        interface: &dyn Interface,
    ) -> OptimizationResult<O>
    where
        O: Objective,
        S: Selection,
        C: Crossover,
        M: Mutation,
        R: Rng + ?Sized,
    {
        info!(
            employees = context.employee_count(),
            demanded_slots = context.demand.demanded_slots(),
            population_size = self.population_size,
            generations = self.generations,
            "开始遗传算法优化"
        );
        let evaluate = |grid: ScheduleGrid| {
            let (_, fitness) = objective.evaluate(&grid);
            Chromosome::evaluated(grid, fitness)
        };

        let mut population: Vec<Chromosome> = (0..self.population_size)
            .map(|_| evaluate(context.random_grid(rng)))
            .collect();
        // 上一代的排班表留作下一代的缓冲区
        let mut spare: Vec<ScheduleGrid> = Vec::with_capacity(self.population_size);
        let mut history = Vec::with_capacity(self.generations + 1);
        let mut best_fitness = f64::NEG_INFINITY;
        if let Some(index) = best_index(&population) {
            best_fitness = population[index].score();
            history.push(best_fitness);
        }
        let report_interval = self.report_interval.unwrap_or(10).max(1);
        let start_time = Instant::now();

        for generation in 1..=self.generations {
            let Some(elite) = best_index(&population) else {
                break;
            };
            let mut next = Vec::with_capacity(self.population_size);
            // 精英个体连同适应度原样保留，不重新计算也不变异
            let mut elite_grid = spare.pop().unwrap_or_default();
            elite_grid.clone_from(&population[elite].grid);
            next.push(Chromosome {
                grid: elite_grid,
                fitness: population[elite].fitness,
            });
            while next.len() < self.population_size {
                let first = selection.select(&population, rng);
                let second = selection.select(&population, rng);
                let mut child = spare.pop().unwrap_or_default();
                crossover.crossover(&first.grid, &second.grid, &mut child, rng);
                mutation.mutate(&mut child, rng);
                next.push(evaluate(child));
            }
            let retired = std::mem::replace(&mut population, next);
            spare.extend(retired.into_iter().map(|x| x.grid));

            let generation_best = best_index(&population).map_or(f64::NEG_INFINITY, |index| {
                population[index].score()
            });
            history.push(generation_best);
            debug!(generation, best_fitness = generation_best, "完成一代");

            if generation_best > best_fitness {
                best_fitness = generation_best;
                if let Some(index) = best_index(&population) {
                    let (metric, _) = objective.evaluate(&population[index].grid);
                    let schedule = match context.serialize(&population[index].grid) {
                        Ok(schedule) => Some(schedule),
                        Err(e) => {
                            warn!("无法序列化中间结果：{e}");
                            None
                        }
                    };
                    interface.send(Message::BetterSolution {
                        generation,
                        metric: format!("{metric}"),
                        schedule,
                    });
                }
            }
            if generation % report_interval == 0 || generation == self.generations {
                let mean_fitness = population.iter().map(Chromosome::score).sum::<f64>()
                    / population.len() as f64;
                interface.send(Message::Progress {
                    generation,
                    best_fitness,
                    mean_fitness,
                });
            }
            if generation == report_interval {
                let elapsed = start_time.elapsed().as_micros() as u64 / report_interval as u64;
                interface.send(Message::Elapsed { time: elapsed });
            }
        }

        let schedule = best_index(&population)
            .map(|index| population[index].grid.repaired(&context.demand))
            .unwrap_or_default();
        let (metric, fitness) = objective.evaluate(&schedule);
        info!(fitness, "遗传算法优化完成");
        OptimizationResult {
            schedule,
            metric,
            fitness,
            history,
        }
    }
}
