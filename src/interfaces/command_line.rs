use crate::config::Config;
use crate::data::{Employee, HOURS};
use crate::interfaces::{Interface, Message};
use crate::objectives::metric::Metric;
use crate::schedule::{EmployeeSummary, ScheduleGrid};
use crate::Error;
use chrono::Local;
use clap::{Parser, Subcommand};
use csv::WriterBuilder;
use itertools::Itertools;
use serde::Serialize;
use std::fs::{create_dir_all, read_to_string, write, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// 命令行参数的定义
#[derive(Parser, Clone)]
#[command(name = "排班优化系统")]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
pub struct CommandLineArgs {
    #[command(subcommand)]
    pub command: Command,
    /// 随机数种子，优先于配置文件中的种子
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,
    /// 线程数，默认为 1；多线程时各线程独立优化，取最好的结果
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,
    /// 输出目录，默认为当前时刻命名的目录
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// 命令行中所有可用的子命令
#[derive(Subcommand, Clone)]
pub enum Command {
    /// 根据配置文件中员工的希望时段优化排班
    Optimize {
        /// 配置文件，默认为 config.yaml
        config: Option<PathBuf>,
    },
    /// 随机生成演示用的员工希望时段，保存为配置文件
    Random {
        /// 员工人数
        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },
}

impl CommandLineArgs {
    pub fn is_multithreaded(&self) -> bool {
        self.threads.is_some_and(|x| x > 1)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    metric: &'a Metric,
    employees: &'a [EmployeeSummary],
}

/// 通过命令行来使用 libshift 的入口，实现了界面特征
pub struct CommandLine {
    pub args: CommandLineArgs,
    pub output_dir: PathBuf,
}

impl CommandLine {
    pub fn new(args: CommandLineArgs, maybe_output_dir: Option<PathBuf>) -> Result<Self, Error> {
        let output_dir = maybe_output_dir.unwrap_or_else(|| {
            let time = Local::now().format("%m-%d+%H_%M_%S").to_string();
            PathBuf::from(format!("output-{time}"))
        });
        create_dir_all(&output_dir)?;
        Ok(Self { args, output_dir })
    }

    pub fn config_path(&self) -> PathBuf {
        match &self.args.command {
            Command::Optimize { config: Some(path) } => path.clone(),
            _ => PathBuf::from("config.yaml"),
        }
    }

    pub fn read_config(&self) -> Result<Config, Error> {
        let path = self.config_path();
        let content = read_to_string(&path)
            .map_err(|_| Error::from(format!("文件 {} 不存在", path.display())))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn write_config(&self, config: &Config) -> Result<PathBuf, Error> {
        let path = self.output_dir.join("config.yaml");
        write(&path, serde_yaml::to_string(config)?)?;
        println!("已生成 {} 名员工的希望时段，保存在 {} 中", config.employees.len(), path.display());
        Ok(path)
    }

    /// 输出排班表、每名员工的出勤汇总以及评测指标
    pub fn write_schedule(
        &self,
        employees: &[Employee],
        schedule: &ScheduleGrid,
        metric: &Metric,
    ) -> Result<(), Error> {
        let table = schedule.to_table(employees);
        let summaries = schedule.summaries(employees);

        let tsv_path = self.output_dir.join("schedule.tsv");
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_path(&tsv_path)?;
        let mut header = vec!["曜日".to_string()];
        header.extend(HOURS.iter().map(|hour| format!("{hour}:00")));
        writer.write_record(&header)?;
        for (day, hours) in &table.0 {
            let mut record = vec![day.to_string()];
            record.extend(hours.values().map(|names| names.iter().join(",")));
            writer.write_record(&record)?;
        }
        writer.flush()?;

        write(
            self.output_dir.join("schedule.yaml"),
            serde_yaml::to_string(&table)?,
        )?;
        let report = Report {
            metric,
            employees: &summaries,
        };
        write(
            self.output_dir.join("summary.json"),
            serde_json::to_string_pretty(&report)?,
        )?;

        print!("{table}");
        for summary in &summaries {
            print!("{summary}");
        }
        print!("{metric}");
        println!("已完成排班，结果保存在 {} 中", self.output_dir.display());
        Ok(())
    }

    pub fn child(&self, index: usize) -> Result<CommandLine, Error> {
        let child_dir = self.output_dir.join(format!("{index}"));
        CommandLine::new(self.args.clone(), Some(child_dir))
    }
}

impl Interface for CommandLine {
    fn send(&self, message: Message) {
        let mut writer: Box<dyn Write> = if self.args.is_multithreaded() {
            let log_path = self.output_dir.join("log.txt");
            match OpenOptions::new().create(true).append(true).open(log_path) {
                Ok(file) => Box::new(file),
                Err(e) => {
                    warn!("无法打开日志文件：{e}");
                    return;
                }
            }
        } else {
            Box::new(std::io::stdout())
        };
        let result = match message {
            Message::Progress {
                generation,
                best_fitness,
                mean_fitness,
            } => writeln!(
                &mut writer,
                "已演化 {generation} 代，最高适应度为 {best_fitness:.2}，平均适应度为 {mean_fitness:.2}"
            ),
            Message::Elapsed { time } => writeln!(&mut writer, "演化一代用时：{time} μs"),
            Message::BetterSolution {
                generation,
                metric,
                schedule,
            } => {
                let now = Local::now();
                if let Some(schedule) = schedule {
                    // best.yaml 总是目前为止最好的排班
                    if let Err(e) = write(self.output_dir.join("best.yaml"), schedule) {
                        warn!("无法保存中间结果：{e}");
                    }
                }
                writeln!(
                    &mut writer,
                    "{} 第 {generation} 代搜索到了一个更好的排班，评测指标如下：\n{metric}",
                    now.format("%H:%M:%S"),
                )
            }
        };
        if let Err(e) = result {
            warn!("无法输出消息：{e}");
        }
    }
}
