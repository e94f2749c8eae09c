//! 周数计算
//!
//! 规则：每周从周一开始，包含 1 月 1 日的那一周是第 1 周。
//! 这不是 ISO-8601（周四规则），跨年附近的日期不会归入上一年的周，
//! 一年可能有 53 周，闰年且 1 月 1 日为周日时有 54 周。

use chrono::{Datelike, Local, NaiveDate};

/// 计算日期所在的周数（从 1 开始）
pub fn week_number(date: NaiveDate) -> u32 {
    let ordinal0 = date.ordinal0();
    // 1 月 1 日距离其所在周周一的天数
    let jan1_offset = (date.weekday().num_days_from_monday() + 7 - ordinal0 % 7) % 7;
    (ordinal0 + jan1_offset) / 7 + 1
}

/// 当前日期来源
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// 本地时区的系统时钟
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
