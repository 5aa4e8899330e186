//! libshift 是使用 Rust 实现的一周排班优化算法。
//!
//! 给定若干员工以及他们各自愿意出勤的时段，本库用遗传算法为一周 7 天、每天 17 个整点时段安排人员，
//! 在满足希望、避免缺人或超员、以及让出勤时数尽量均匀这三个目标之间取得平衡。
//!
//! shift 是使用 libshift 实现的命令行程序，读入员工配置文件，输出排班表和每名员工的出勤汇总。

pub mod config;
pub mod context;
pub mod data;
pub mod interfaces;
pub mod objectives;
pub mod operators;
pub mod optimizers;
pub mod schedule;

use context::ShiftContext;
use data::Employee;
use interfaces::Silent;
use objectives::default::{ShiftObjective, Weights};
use optimizers::genetic::GeneticAlgorithm;
use rand::Rng;
use schedule::ScheduleGrid;
use std::fmt::{self, Display};

/// 错误类型
#[derive(Debug, Clone)]
pub struct Error {
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self { message: value }
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self {
            message: format!("读写文件失败：{value}"),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(value: serde_yaml::Error) -> Self {
        Self {
            message: format!("YAML 解析错误：{value}"),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self {
            message: format!("JSON 解析错误：{value}"),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Self {
            message: format!("CSV 读写错误：{value}"),
        }
    }
}

/// 用默认参数和全局随机数生成器排班
pub fn generate_schedule(employees: &[Employee]) -> ScheduleGrid {
    generate_schedule_with(employees, &GeneticAlgorithm::default(), &mut rand::rng())
}

/// 用给定参数和随机数生成器排班；相同的种子和输入总是得到相同的结果
///
/// 返回的排班表每个时段至多两人，没有需求的时段一定为空。
pub fn generate_schedule_with<R: Rng + ?Sized>(
    employees: &[Employee],
    algorithm: &GeneticAlgorithm,
    rng: &mut R,
) -> ScheduleGrid {
    let context = ShiftContext::new(employees.to_vec());
    let objective = ShiftObjective::new(&context, Weights::default());
    algorithm.solve(&context, &objective, rng, &Silent).schedule
}
