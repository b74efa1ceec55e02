//! 截止日期模块
//!
//! 后端使用 `LocalDate`，线上格式为 `YYYY-MM-DD`，
//! 与 `<input type="date">` 的值格式一致。

use chrono::NaiveDate;

/// 日期输入框使用的格式
pub const INPUT_FORMAT: &str = "%Y-%m-%d";

/// 卡片上展示的格式
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y";

/// 解析日期输入框的值
///
/// - 空字符串 → `Ok(None)`
/// - 非法格式 → `Err`
pub fn parse_date_input(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, INPUT_FORMAT).map(Some)
}

/// 格式化截止日期用于展示
pub fn format_due_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format(DISPLAY_FORMAT).to_string(),
        None => "No due date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_input_values() {
        assert_eq!(parse_date_input(""), Ok(None));
        assert_eq!(parse_date_input("  "), Ok(None));
        assert_eq!(
            parse_date_input("2024-02-29"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29))
        );
        assert!(parse_date_input("2023-02-29").is_err());
        assert!(parse_date_input("29/02/2024").is_err());
    }

    #[test]
    fn formats_for_display() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(format_due_date(date), "05/01/2024");
        assert_eq!(format_due_date(None), "No due date");
    }
}
