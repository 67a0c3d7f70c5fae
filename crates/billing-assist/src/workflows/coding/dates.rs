use chrono::NaiveDate;

use super::CodingError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_PREFIX_LEN: usize = 10;

/// Accepts `YYYY-MM-DD` or an ISO-8601 timestamp whose first ten characters are the date.
pub(crate) fn parse_service_date(field: &str, raw: &str) -> Result<NaiveDate, CodingError> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }

    trimmed
        .get(..DATE_PREFIX_LEN)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
        .ok_or_else(|| CodingError::InvalidDateFormat {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn parses_plain_calendar_dates() {
        assert_eq!(
            parse_service_date("dos", "2025-08-26").expect("parses"),
            date(2025, 8, 26)
        );
    }

    #[test]
    fn parses_iso_timestamps_by_date_prefix() {
        assert_eq!(
            parse_service_date("dos", "2024-08-20T14:30:00Z").expect("parses"),
            date(2024, 8, 20)
        );
        assert_eq!(
            parse_service_date("dos", "2024-08-20 09:00").expect("parses"),
            date(2024, 8, 20)
        );
    }

    #[test]
    fn reports_field_and_value_for_malformed_dates() {
        match parse_service_date("history.recent_cpts[0].dos", "08/20/2024") {
            Err(CodingError::InvalidDateFormat { field, value }) => {
                assert_eq!(field, "history.recent_cpts[0].dos");
                assert_eq!(value, "08/20/2024");
            }
            other => panic!("expected invalid date, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_and_short_values() {
        assert!(parse_service_date("dos", "").is_err());
        assert!(parse_service_date("dos", "2024-08").is_err());
    }
}
