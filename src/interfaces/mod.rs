use serde::Serialize;
use serde_with::skip_serializing_none;

pub mod command_line;

/// 向用户反馈的消息类型
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Progress {
        generation: usize,
        best_fitness: f64,
        mean_fitness: f64,
    },
    BetterSolution {
        generation: usize,
        metric: String,
        schedule: Option<String>,
    },
    Elapsed {
        time: u64,
    },
}

/// 定义了向用户报告消息的接口，用于统一不同调用方的输出方式
///
/// 调用方只需要实现 send 方法，就可向用户报告优化过程中的各种数据
pub trait Interface {
    fn send(&self, message: Message);
}

/// 什么也不报告
pub struct Silent;

impl Interface for Silent {
    fn send(&self, _message: Message) {}
}
