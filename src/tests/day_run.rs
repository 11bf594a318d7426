// @file: oi_chart/src/tests/day_run.rs
// @description: End-to-end run of one day cycle with an injected fixture session.
// @author: LAS.

#[cfg(test)]
mod day_run_tests {
    use crate::app::run_current_day;
    use crate::core::errors::AppError;
    use crate::tests::fixtures::fixture_session::{test_config, Call, FixtureSession};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_twenty_minutes_into_the_day() {
        let session = FixtureSession::new(5);
        let config = test_config();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 20, 0).unwrap();

        let day = run_current_day(&session, &config, now).unwrap();

        // Prices first, then open interest, one partial window each
        assert_eq!(
            session.calls(),
            vec![
                Call::Kline { symbol: "BTCUSD".to_string(), interval_minutes: 5, start_time: 1_704_067_200, limit: Some(4) },
                Call::OpenInterest { symbol: "BTCUSD".to_string(), period: "5min".to_string(), start_time: 1_704_067_200, limit: Some(4) },
            ]
        );
        assert_eq!(day.prices.len(), 4);
        assert_eq!(day.open_interest.len(), 4);
        assert_eq!(day.figure.data.len(), 2);
        assert_eq!(day.figure.layout.title.text, "BTCUSD today");
    }

    #[test]
    fn test_custom_title_and_interval() {
        let session = FixtureSession::new(15);
        let mut config = test_config();
        config.interval_minutes = 15;
        config.chart_title = Some("Inverse perp OI".to_string());
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap();

        let day = run_current_day(&session, &config, now).unwrap();

        // 82_800s at 15min: one 180_000s page is never filled, 92 rows requested
        assert_eq!(session.limits(), vec![Some(92), Some(92)]);
        assert_eq!(day.prices.len(), 92);
        assert_eq!(day.figure.layout.title.text, "Inverse perp OI");
    }

    #[test]
    fn test_failure_stops_before_open_interest() {
        let mut session = FixtureSession::new(5);
        session.fail_at = Some(0);
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        let result = run_current_day(&session, &test_config(), now);

        assert!(matches!(result, Err(AppError::Transport(_))));
        assert_eq!(session.calls().len(), 1);
    }
}
