//! 시간 관련 유틸리티
//!
//! Unix 초 단위 타임스탬프 변환과 날짜 포맷팅

pub mod logging;

use chrono::{DateTime, TimeZone, Utc};

/// 타임스탬프(초)를 DateTime<Utc>로 변환
pub fn timestamp_to_datetime(timestamp_secs: i64) -> Option<DateTime<Utc>> {
  Utc.timestamp_opt(timestamp_secs, 0).single()
}

/// 타임스탬프(초)를 포맷팅된 문자열로 변환 (범위 밖이면 빈 문자열)
pub fn format_timestamp(timestamp_secs: i64, format: &str) -> String {
  timestamp_to_datetime(timestamp_secs)
    .map(|dt| dt.format(format).to_string())
    .unwrap_or_default()
}

/// en-US 짧은 날짜 형식 (M/D/YYYY, UTC)
pub fn format_short_date(timestamp_secs: i64) -> String {
  format_timestamp(timestamp_secs, "%-m/%-d/%Y")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_short_date_has_no_padding() {
    let ts = Utc.with_ymd_and_hms(2024, 3, 5, 21, 0, 0).unwrap().timestamp();
    assert_eq!(format_short_date(ts), "3/5/2024");

    let ts = Utc.with_ymd_and_hms(2023, 12, 18, 0, 0, 0).unwrap().timestamp();
    assert_eq!(format_short_date(ts), "12/18/2023");
  }

  #[test]
  fn test_out_of_range_timestamp() {
    assert!(timestamp_to_datetime(i64::MAX).is_none());
    assert_eq!(format_short_date(i64::MAX), "");
  }
}
