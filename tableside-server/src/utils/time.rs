//! 时间工具函数 - 本地日历日边界
//!
//! 所有日期→时间戳转换统一在聚合层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{Local, NaiveDate, TimeZone};

/// 当前 Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 今天的本地日历日期
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// 日期开始 (00:00:00 本地时区) → Unix millis
///
/// DST gap fallback: 如果本地时间不存在，fallback 到 UTC。
pub fn day_start_millis(date: NaiveDate) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap();
    Local
        .from_local_datetime(&naive)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期结束 → 次日 00:00:00 的 Unix millis
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds_are_half_open() {
        let today = today_local();
        let start = day_start_millis(today);
        let end = day_end_millis(today);
        assert!(start < end);
        // one local day is 24h outside DST transitions
        assert!(end - start >= 23 * 3600 * 1000);
        assert!(end - start <= 25 * 3600 * 1000);

        let now = now_millis();
        assert!(now >= start && now < end);
    }
}
