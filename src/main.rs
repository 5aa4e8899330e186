//! shift: 一周排班优化系统［命令行版］
//!
//! `shift` 是一个使用 Rust 编写的命令行程序。用户提供员工及其希望时段的配置文件，
//! 本程序基于遗传算法生成排班表，并输出每名员工的出勤汇总和评测指标。

use std::thread;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shift::context::ShiftContext;
use shift::data::random_employees;
use shift::interfaces::command_line::{Command, CommandLine, CommandLineArgs};
use shift::objectives::default::{ShiftObjective, Weights};
use shift::optimizers::genetic::GeneticAlgorithm;
use shift::optimizers::OptimizationResult;
use shift::{config::Config, Error};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn run_optimization(
    context: &ShiftContext,
    weights: Weights,
    algorithm: &GeneticAlgorithm,
    seed: u64,
    cli: &CommandLine,
) -> OptimizationResult<ShiftObjective> {
    let objective = ShiftObjective::new(context, weights);
    let mut rng = StdRng::seed_from_u64(seed);
    algorithm.solve(context, &objective, &mut rng, cli)
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CommandLineArgs::parse();
    let cli = CommandLine::new(args.clone(), args.output.clone())?;
    match args.command {
        Command::Random { count } => {
            let seed = args.seed.unwrap_or_else(rand::random);
            let mut rng = StdRng::seed_from_u64(seed);
            let config = Config {
                employees: random_employees(count, &mut rng),
                ..Default::default()
            };
            cli.write_config(&config)?;
        }
        Command::Optimize { .. } => {
            let config = cli.read_config()?;
            config.validate()?;
            let seed = args.seed.or(config.seed()).unwrap_or_else(rand::random);
            info!(seed, "随机数种子");
            let context = ShiftContext::new(config.employees.clone());
            let weights = Weights::from(&config.objective());
            let algorithm = config.genetic();
            let threads = args.threads.unwrap_or(1).max(1);
            let best = if threads == 1 {
                run_optimization(&context, weights, &algorithm, seed, &cli)
            } else {
                // 每个线程使用独立的随机数生成器
                let mut handles = vec![];
                for index in 0..threads {
                    let context = context.clone();
                    let algorithm = algorithm.clone();
                    let child = cli.child(index)?;
                    let seed = seed.wrapping_add(index as u64);
                    let handle = thread::spawn(move || {
                        run_optimization(&context, weights, &algorithm, seed, &child)
                    });
                    handles.push(handle);
                }
                let mut results = vec![];
                for handle in handles {
                    let result = handle
                        .join()
                        .map_err(|_| Error::from("优化线程异常退出"))?;
                    results.push(result);
                }
                let mut best: Option<OptimizationResult<ShiftObjective>> = None;
                for result in results {
                    if best.as_ref().map_or(true, |x| result.fitness > x.fitness) {
                        best = Some(result);
                    }
                }
                best.ok_or("没有得到任何优化结果")?
            };
            cli.write_schedule(&context.employees, &best.schedule, &best.metric)?;
        }
    }
    Ok(())
}
