//! 时间工具函数
//!
//! 销售日志统一记录 UTC Unix 毫秒时间戳；
//! 日期字符串 → 报表范围的解析统一在 API handler 层完成。

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use super::{AppError, AppResult};

/// 当前时刻 Unix 毫秒
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析月份字符串 (YYYY-MM) → (year, month)
pub fn parse_month(month: &str) -> AppResult<(i32, u32)> {
    let parsed = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid month format: {}", month)))?;
    Ok((parsed.year(), parsed.month()))
}

/// 解析每日发送时间 (HH:MM)，失败返回 23:00
pub fn parse_send_time(time: &str) -> NaiveTime {
    NaiveTime::parse_from_str(time, "%H:%M").unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse relay send time '{}': {}, falling back to 23:00",
            time,
            e
        );
        NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN)
    })
}

/// 毫秒时间戳 → UTC datetime
pub fn millis_to_utc(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// 毫秒时间戳 → "YYYY-MM-DD" (UTC)
pub fn format_date(millis: i64) -> String {
    millis_to_utc(millis).format("%Y-%m-%d").to_string()
}

/// 毫秒时间戳 → "HH:MM" (UTC)
pub fn format_time(millis: i64) -> String {
    millis_to_utc(millis).format("%H:%M").to_string()
}

/// 毫秒时间戳 → "YYYY-MM-DD HH:MM:SS" (UTC)
pub fn format_datetime(millis: i64) -> String {
    millis_to_utc(millis).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_month_accepts_yyyy_mm() {
        assert_eq!(parse_month("2024-03").unwrap(), (2024, 3));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("March").is_err());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2024-03-15").is_ok());
        assert!(parse_date("15/03/2024").is_err());
    }

    #[test]
    fn formats_are_utc() {
        // 2024-03-15 09:30:00 UTC
        let millis = 1_710_495_000_000;
        assert_eq!(format_date(millis), "2024-03-15");
        assert_eq!(format_time(millis), "09:30");
        assert_eq!(format_datetime(millis), "2024-03-15 09:30:00");
    }

    #[test]
    fn send_time_falls_back_to_2300() {
        assert_eq!(parse_send_time("08:15"), NaiveTime::from_hms_opt(8, 15, 0).unwrap());
        assert_eq!(parse_send_time("bogus"), NaiveTime::from_hms_opt(23, 0, 0).unwrap());
    }
}
