//! 排班问题的基本数据格式：星期、时段、员工以及员工的出勤意愿。
//!
//! 一周共有 7 天，每天有 17 个整点时段（8 点到 24 点），所以一共有 119 个时段。
//! 时段在内部按「天 × 小时」展平为 `0..SLOT_COUNT` 的下标，便于用定长缓冲区存储排班。
//!

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// 星期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[serde(rename = "月", alias = "Mon")]
    Monday,
    #[serde(rename = "火", alias = "Tue")]
    Tuesday,
    #[serde(rename = "水", alias = "Wed")]
    Wednesday,
    #[serde(rename = "木", alias = "Thu")]
    Thursday,
    #[serde(rename = "金", alias = "Fri")]
    Friday,
    #[serde(rename = "土", alias = "Sat")]
    Saturday,
    #[serde(rename = "日", alias = "Sun")]
    Sunday,
}

pub const DAYS: [DayOfWeek; 7] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
    DayOfWeek::Sunday,
];

/// 每天可以排班的整点时段
pub const HOURS: [u8; 17] = [8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24];

pub const SLOT_COUNT: usize = DAYS.len() * HOURS.len();

impl DayOfWeek {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "月",
            DayOfWeek::Tuesday => "火",
            DayOfWeek::Wednesday => "水",
            DayOfWeek::Thursday => "木",
            DayOfWeek::Friday => "金",
            DayOfWeek::Saturday => "土",
            DayOfWeek::Sunday => "日",
        }
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 一周中的一个时段，内部存储展平后的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(usize);

impl Slot {
    /// 小时不在 `HOURS` 中时返回 `None`
    pub fn new(day: DayOfWeek, hour: u8) -> Option<Self> {
        let hour_index = HOURS.iter().position(|&h| h == hour)?;
        Some(Self(day.index() * HOURS.len() + hour_index))
    }

    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < SLOT_COUNT);
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn day(self) -> DayOfWeek {
        DAYS[self.0 / HOURS.len()]
    }

    pub fn hour(self) -> u8 {
        HOURS[self.0 % HOURS.len()]
    }

    /// 按先天后小时的顺序遍历所有时段
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..SLOT_COUNT).map(Slot)
    }

    /// 某一天的全部时段
    pub fn of_day(day: DayOfWeek) -> impl Iterator<Item = Slot> {
        let start = day.index() * HOURS.len();
        (start..start + HOURS.len()).map(Slot)
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:00", self.day(), self.hour())
    }
}

/// 员工对某一天提交的希望时段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPreference {
    pub day: DayOfWeek,
    pub hours: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: usize,
    pub name: String,
    #[serde(default)]
    pub preferences: Vec<ShiftPreference>,
}

impl Employee {
    pub fn availability(&self) -> Availability {
        Availability::from_preferences(&self.preferences)
    }
}

/// 员工愿意出勤的时段集合，用位集表示
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Availability(u128);

impl Availability {
    /// 同一天内重复的小时只记一次；不在 `HOURS` 中的小时被忽略
    pub fn from_preferences(preferences: &[ShiftPreference]) -> Self {
        let mut availability = Self::default();
        for preference in preferences {
            for &hour in &preference.hours {
                if let Some(slot) = Slot::new(preference.day, hour) {
                    availability.insert(slot);
                }
            }
        }
        availability
    }

    pub fn insert(&mut self, slot: Slot) {
        self.0 |= 1u128 << slot.index();
    }

    pub fn contains(&self, slot: Slot) -> bool {
        (self.0 >> slot.index()) & 1 == 1
    }

    pub fn union(&self, other: &Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// 按时段下标升序遍历
    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        Slot::all().filter(move |slot| self.contains(*slot))
    }
}

/// 需求表：至少有一名员工愿意出勤的时段即为有需求的时段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemandMap(Availability);

impl DemandMap {
    pub fn build(employees: &[Employee]) -> Self {
        Self::from_availabilities(employees.iter().map(Employee::availability))
    }

    pub fn from_availabilities<I: IntoIterator<Item = Availability>>(availabilities: I) -> Self {
        let union = availabilities
            .into_iter()
            .fold(Availability::default(), |acc, x| acc.union(&x));
        Self(union)
    }

    pub fn is_demanded(&self, slot: Slot) -> bool {
        self.0.contains(slot)
    }

    pub fn demanded_slots(&self) -> usize {
        self.0.len()
    }
}

/// 演示用的员工名，超出后在名字后面加上轮次
const DEMO_NAMES: [&str; 5] = ["A", "B", "C", "D", "E"];

fn demo_name(index: usize) -> String {
    let name = DEMO_NAMES[index % DEMO_NAMES.len()];
    match index / DEMO_NAMES.len() {
        0 => name.to_string(),
        round => format!("{name}{}", round + 1),
    }
}

/// 随机生成演示用的员工及其希望时段
///
/// 每名员工随机选取 1 到 7 个不同的日子，每天再随机选取 1 到 17 个不同的小时。
pub fn random_employees<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Employee> {
    (0..count)
        .map(|id| {
            let day_count = rng.random_range(1..=DAYS.len());
            let mut days = DAYS.to_vec();
            days.shuffle(rng);
            let preferences = days
                .into_iter()
                .take(day_count)
                .map(|day| {
                    let hour_count = rng.random_range(1..=HOURS.len());
                    let hours = HOURS.choose_multiple(rng, hour_count).copied().collect();
                    ShiftPreference { day, hours }
                })
                .collect();
            Employee {
                id,
                name: demo_name(id),
                preferences,
            }
        })
        .collect()
}
