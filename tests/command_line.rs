use clap::Parser;
use shift::config::Config;
use shift::context::ShiftContext;
use shift::data::{DayOfWeek, Employee, ShiftPreference, Slot};
use shift::interfaces::command_line::{Command, CommandLine, CommandLineArgs};
use shift::objectives::default::{ShiftObjective, Weights};
use shift::objectives::Objective;
use shift::schedule::ScheduleGrid;
use std::fs::{read_to_string, remove_dir_all};
use std::path::{Path, PathBuf};

fn output_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("libshift-{name}-{}", std::process::id()));
    let _ = remove_dir_all(&dir);
    dir
}

fn employee(id: usize, name: &str, day: DayOfWeek, hours: &[u8]) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        preferences: vec![ShiftPreference {
            day,
            hours: hours.to_vec(),
        }],
    }
}

#[test]
fn random_subcommand_parses() {
    let args = CommandLineArgs::try_parse_from(["shift", "random", "--count", "8"]).unwrap();
    assert!(matches!(args.command, Command::Random { count: 8 }));
    assert_eq!(args.seed, None);

    let args = CommandLineArgs::try_parse_from(["shift", "random"]).unwrap();
    assert!(matches!(args.command, Command::Random { count: 5 }));
}

#[test]
fn options_are_accepted_after_the_subcommand() {
    let args =
        CommandLineArgs::try_parse_from(["shift", "optimize", "config.yaml", "--seed", "42"])
            .unwrap();
    assert!(matches!(
        args.command,
        Command::Optimize { config: Some(ref path) } if path == Path::new("config.yaml")
    ));
    assert_eq!(args.seed, Some(42));
    assert!(!args.is_multithreaded());

    let args = CommandLineArgs::try_parse_from([
        "shift",
        "optimize",
        "config.yaml",
        "--threads",
        "4",
        "--output",
        "result",
    ])
    .unwrap();
    assert_eq!(args.threads, Some(4));
    assert_eq!(args.output, Some(PathBuf::from("result")));
    assert!(args.is_multithreaded());
}

#[test]
fn options_are_accepted_before_the_subcommand() {
    let args = CommandLineArgs::try_parse_from(["shift", "-s", "7", "optimize"]).unwrap();
    assert_eq!(args.seed, Some(7));
    assert!(matches!(args.command, Command::Optimize { config: None }));
    assert!(CommandLineArgs::try_parse_from(["shift", "optimize", "--bogus"]).is_err());
}

#[test]
fn config_path_defaults_to_config_yaml() {
    let dir = output_dir("default-config");
    let args = CommandLineArgs::try_parse_from([
        "shift",
        "optimize",
        "--output",
        dir.to_str().unwrap(),
    ])
    .unwrap();
    let cli = CommandLine::new(args.clone(), args.output.clone()).unwrap();
    assert_eq!(cli.config_path(), PathBuf::from("config.yaml"));
    assert!(dir.is_dir());
    remove_dir_all(&dir).unwrap();
}

#[test]
fn config_and_schedule_files_are_written() {
    let dir = output_dir("write-schedule");
    let config_path = dir.join("config.yaml");
    let args = CommandLineArgs::try_parse_from([
        "shift",
        "optimize",
        config_path.to_str().unwrap(),
        "--output",
        dir.to_str().unwrap(),
    ])
    .unwrap();
    let cli = CommandLine::new(args.clone(), args.output.clone()).unwrap();

    let employees = vec![
        employee(0, "A", DayOfWeek::Monday, &[8, 9]),
        employee(1, "B", DayOfWeek::Monday, &[8]),
    ];
    let config = Config {
        employees: employees.clone(),
        ..Default::default()
    };
    assert_eq!(cli.write_config(&config).unwrap(), config_path);
    let read = cli.read_config().unwrap();
    assert_eq!(read.employees, employees);

    let mut grid = ScheduleGrid::empty();
    grid.assign(Slot::new(DayOfWeek::Monday, 8).unwrap(), 0);
    grid.assign(Slot::new(DayOfWeek::Monday, 8).unwrap(), 1);
    grid.assign(Slot::new(DayOfWeek::Monday, 9).unwrap(), 0);
    let context = ShiftContext::new(employees.clone());
    let (metric, fitness) = ShiftObjective::new(&context, Weights::default()).evaluate(&grid);
    cli.write_schedule(&employees, &grid, &metric).unwrap();

    let tsv = read_to_string(dir.join("schedule.tsv")).unwrap();
    let rows: Vec<Vec<&str>> = tsv.lines().map(|line| line.split('\t').collect()).collect();
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|row| row.len() == 18));
    assert_eq!(rows[0][0], "曜日");
    assert_eq!(rows[0][1], "8:00");
    assert_eq!(rows[0][17], "24:00");
    assert_eq!(rows[1][0], "月");
    assert_eq!(rows[1][1], "A,B");
    assert_eq!(rows[1][2], "A");
    assert_eq!(rows[1][3], "");
    assert_eq!(rows[7][0], "日");

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&read_to_string(dir.join("schedule.yaml")).unwrap()).unwrap();
    assert_eq!(yaml["月"][8][0].as_str(), Some("A"));

    let summary: serde_json::Value =
        serde_json::from_str(&read_to_string(dir.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["metric"]["fitness"].as_f64(), Some(fitness));
    assert_eq!(summary["metric"]["preference_hits"].as_u64(), Some(3));
    assert_eq!(summary["employees"][0]["name"], "A");
    assert_eq!(summary["employees"][0]["total_hours"].as_u64(), Some(2));
    assert_eq!(summary["employees"][1]["total_hours"].as_u64(), Some(1));

    remove_dir_all(&dir).unwrap();
}
