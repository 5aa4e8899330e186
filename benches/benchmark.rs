use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shift::context::ShiftContext;
use shift::data::random_employees;
use shift::interfaces::Silent;
use shift::objectives::default::{ShiftObjective, Weights};
use shift::objectives::Objective;
use shift::operators::default::{DayCrossover, ToggleMutation};
use shift::operators::{Crossover, Mutation};
use shift::optimizers::genetic::GeneticAlgorithm;
use shift::schedule::ScheduleGrid;

fn context(count: usize) -> ShiftContext {
    let mut rng = StdRng::seed_from_u64(2024);
    ShiftContext::new(random_employees(count, &mut rng))
}

fn evaluation(b: &mut Criterion) {
    let context = context(10);
    let objective = ShiftObjective::new(&context, Weights::default());
    let mut rng = StdRng::seed_from_u64(1);
    let grid = context.random_grid(&mut rng);
    b.bench_function("适应度计算", |b| b.iter(|| objective.evaluate(&grid)));
}

fn reproduction(b: &mut Criterion) {
    let context = context(10);
    let crossover = DayCrossover::new(&context);
    let mutation = ToggleMutation::new(&context, 0.1);
    let mut rng = StdRng::seed_from_u64(2);
    let first = context.random_grid(&mut rng);
    let second = context.random_grid(&mut rng);
    let mut child = ScheduleGrid::empty();
    b.bench_function("交叉与变异", |b| {
        b.iter(|| {
            crossover.crossover(&first, &second, &mut child, &mut rng);
            mutation.mutate(&mut child, &mut rng);
        })
    });
}

fn full_run(b: &mut Criterion) {
    let context = context(5);
    let objective = ShiftObjective::new(&context, Weights::default());
    let algorithm = GeneticAlgorithm::default();
    let mut group = b.benchmark_group("完整优化");
    group.sample_size(10);
    group.bench_function("五名员工", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(3);
            algorithm.solve(&context, &objective, &mut rng, &Silent)
        })
    });
    group.finish();
}

criterion_group!(benches, evaluation, reproduction, full_run);
criterion_main!(benches);
