//! Behavior tests for range resolution against cached reference calendars.

use std::sync::Arc;

use owldata_core::{Granularity, OwlError, RangeError};
use owldata_tests::{session, url, with_calendars, ScriptedHttpClient};

// =============================================================================
// Counting
// =============================================================================

#[tokio::test]
async fn when_day_range_is_inside_calendar_count_is_inclusive() {
    // Given: a day calendar of 20190101..=20190105
    let http = Arc::new(with_calendars(ScriptedHttpClient::new()));
    let client = session(http.clone());

    // When: a three-day range is resolved
    let count = client
        .resolve_range("20190102", "20190104", Granularity::Day)
        .await
        .expect("valid range resolves");

    // Then: both ends are counted
    assert_eq!(count, 3);
}

#[tokio::test]
async fn when_range_extends_past_calendar_only_known_periods_count() {
    let http = Arc::new(with_calendars(ScriptedHttpClient::new()));
    let client = session(http);

    let count = client
        .resolve_range("2015", "2017", Granularity::Year)
        .await
        .expect("valid range resolves");

    assert_eq!(count, 2);
}

#[tokio::test]
async fn when_quarter_range_is_resolved_tokens_compare_numerically() {
    let http = Arc::new(with_calendars(ScriptedHttpClient::new()));
    let client = session(http);

    let count = client
        .resolve_range("201804", "201902", Granularity::Quarter)
        .await
        .expect("valid range resolves");

    assert_eq!(count, 3);
}

#[tokio::test]
async fn when_range_falls_between_periods_count_is_zero() {
    let http = Arc::new(with_calendars(ScriptedHttpClient::new()));
    let client = session(http);

    let count = client
        .resolve_range("201701", "201712", Granularity::Month)
        .await
        .expect("valid range resolves");

    assert_eq!(count, 0);
}

// =============================================================================
// Calendar caching
// =============================================================================

#[tokio::test]
async fn when_same_granularity_is_resolved_twice_calendar_is_fetched_once() {
    // Given: a fresh session
    let http = Arc::new(with_calendars(ScriptedHttpClient::new()));
    let client = session(http.clone());

    // When: the day calendar is needed twice and the month calendar once
    for _ in 0..2 {
        client
            .resolve_range("20190101", "20190105", Granularity::Day)
            .await
            .expect("valid range resolves");
    }
    client
        .resolve_range("201901", "201902", Granularity::Month)
        .await
        .expect("valid range resolves");

    // Then: each calendar endpoint was hit exactly once
    assert_eq!(http.count_requests_to(&url("CAL-D")), 1);
    assert_eq!(http.count_requests_to(&url("CAL-M")), 1);
    assert_eq!(client.calendars().len().await, 2);
}

#[tokio::test]
async fn when_calendar_is_invalidated_next_resolution_refetches() {
    let http = Arc::new(with_calendars(ScriptedHttpClient::new()));
    let client = session(http.clone());

    client
        .resolve_range("20190101", "20190102", Granularity::Day)
        .await
        .expect("valid range resolves");
    assert!(client.calendars().invalidate(Granularity::Day).await);
    client
        .resolve_range("20190101", "20190102", Granularity::Day)
        .await
        .expect("valid range resolves");

    assert_eq!(http.count_requests_to(&url("CAL-D")), 2);
}

#[tokio::test]
async fn when_calendar_fetch_fails_nothing_is_cached() {
    // Given: the day calendar endpoint is unreachable
    let http = Arc::new(ScriptedHttpClient::new().fail(url("CAL-D"), "connection reset"));
    let client = session(http);

    // When: a day range is resolved
    let err = client
        .resolve_range("20190101", "20190102", Granularity::Day)
        .await
        .expect_err("fetch failure must surface");

    // Then: the failure is reported and the cache stays empty
    assert_eq!(err.code(), "FetchError");
    assert!(!client.calendars().contains(Granularity::Day).await);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn when_start_is_after_end_resolution_fails_without_fetching() {
    let http = Arc::new(with_calendars(ScriptedHttpClient::new()));
    let client = session(http.clone());

    let err = client
        .resolve_range("20190104", "20190102", Granularity::Day)
        .await
        .expect_err("reversed range must fail");

    assert!(matches!(err, OwlError::Range(RangeError::Order { .. })));
    assert_eq!(err.code(), "DateError");
    assert!(http.recorded_requests().is_empty());
}

#[tokio::test]
async fn when_token_width_is_wrong_granularity_error_is_returned() {
    let http = Arc::new(with_calendars(ScriptedHttpClient::new()));
    let client = session(http.clone());

    let cases = [
        ("2019", "20190101", Granularity::Day, "DayError"),
        ("20191", "201902", Granularity::Month, "MonthError"),
        ("20190", "201902", Granularity::Quarter, "SeasonError"),
        ("201", "2019", Granularity::Year, "YearError"),
    ];

    for (start, end, granularity, code) in cases {
        let err = client
            .resolve_range(start, end, granularity)
            .await
            .expect_err("malformed token must fail");
        assert_eq!(err.code(), code, "{start}..{end} at {granularity}");
    }
    assert!(http.recorded_requests().is_empty());
}

#[tokio::test]
async fn when_day_token_is_not_a_real_date_day_error_is_returned() {
    let http = Arc::new(with_calendars(ScriptedHttpClient::new()));
    let client = session(http);

    let err = client
        .resolve_range("20190101", "20190230", Granularity::Day)
        .await
        .expect_err("impossible date must fail");

    assert_eq!(
        err.to_string(),
        RangeError::Day {
            token: String::from("20190230")
        }
        .to_string()
    );
}

#[tokio::test]
async fn when_quarter_tokens_are_resolved_only_width_is_checked() {
    // Given: a quarter calendar holding 201901 and 201902
    let http = Arc::new(with_calendars(ScriptedHttpClient::new()));
    let client = session(http);

    // When: the start token names quarter 00
    let count = client
        .resolve_range("201900", "201902", Granularity::Quarter)
        .await
        .expect("quarter tokens skip calendar validation");

    // Then: the range still resolves numerically
    assert_eq!(count, 2);
}
