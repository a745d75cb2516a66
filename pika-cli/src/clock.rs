use chrono::{NaiveDate, NaiveDateTime};

/// clap value parser for `--now`: `YYYY-MM-DDTHH:MM` or a bare date
/// (midnight).
pub fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| format!("expected YYYY-MM-DDTHH:MM, got '{s}'"))
}

/// clap value parser for due dates.
pub fn parse_due(s: &str) -> Result<NaiveDate, String> {
    pika_core::time::parse_date_only(s).map_err(|e| e.to_string())
}

/// The `--now` override, else the local wall clock.
pub fn resolve_now(now: Option<NaiveDateTime>) -> NaiveDateTime {
    now.unwrap_or_else(|| chrono::Local::now().naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn now_formats() {
        assert_eq!(parse_now("2026-02-16T18:30").unwrap().hour(), 18);
        assert_eq!(parse_now("2026-02-16T18:30:05").unwrap().second(), 5);
        assert_eq!(parse_now("2026-02-16").unwrap().hour(), 0);
        assert!(parse_now("tomorrow").is_err());
    }

    #[test]
    fn due_dates_are_strict() {
        assert!(parse_due("2026-02-28").is_ok());
        assert!(parse_due("2026-02-30").is_err());
        assert!(parse_due("2/28").is_err());
    }
}
