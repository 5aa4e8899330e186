//! 算子接口，以及默认算子的实现（选择、交叉、变异）
//!

use crate::schedule::{Chromosome, ScheduleGrid};
use rand::Rng;

pub mod default;

pub trait Selection {
    /// 从种群中选出一个亲本；种群不能为空
    fn select<'a, R: Rng + ?Sized>(
        &self,
        population: &'a [Chromosome],
        rng: &mut R,
    ) -> &'a Chromosome;
}

pub trait Crossover {
    /// 由两个亲本生成一个子代，写入 `child`；`child` 原有的内容会被完全覆盖
    fn crossover<R: Rng + ?Sized>(
        &self,
        first: &ScheduleGrid,
        second: &ScheduleGrid,
        child: &mut ScheduleGrid,
        rng: &mut R,
    );
}

pub trait Mutation {
    /// 对一个新生成的子代就地施加随机扰动
    fn mutate<R: Rng + ?Sized>(&self, grid: &mut ScheduleGrid, rng: &mut R);
}
