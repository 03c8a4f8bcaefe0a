//! Arrival fetching and normalization.
//!
//! For one route at one stop, queries predictions (and schedules, when
//! enabled) and turns each returned resource into an [`ArrivalRecord`]
//! measured in minutes from "now".

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::FetchConfig;
use crate::domain::{
    ArrivalRecord, DataFormatError, RouteId, SourceKind, StopId, direction_name, minutes_until,
    parse_local_timestamp,
};
use crate::error::Error;
use crate::mbta::{ArrivalResource, TransitSource};

/// Fetches and normalizes arrivals for single routes.
pub struct ArrivalFetcher<'a, S, K> {
    source: &'a S,
    clock: &'a K,
    config: FetchConfig,
}

impl<'a, S: TransitSource, K: Clock> ArrivalFetcher<'a, S, K> {
    pub fn new(source: &'a S, clock: &'a K, config: FetchConfig) -> Self {
        Self {
            source,
            clock,
            config,
        }
    }

    /// Sources queried per route, in query order.
    pub fn source_kinds(&self) -> impl Iterator<Item = SourceKind> {
        let include_scheduled = self.config.include_scheduled;
        SourceKind::ALL
            .into_iter()
            .filter(move |kind| *kind == SourceKind::Prediction || include_scheduled)
    }

    /// Arrivals for `route` at `stop`, predictions first.
    ///
    /// A source with no results contributes nothing and is reported at info
    /// level. Any failure aborts the whole route: records already converted
    /// from an earlier source are discarded.
    pub async fn fetch_arrivals(
        &self,
        stop: &StopId,
        route: &RouteId,
        direction_names: &[String],
    ) -> Result<Vec<ArrivalRecord>, Error> {
        let mut records = Vec::new();

        for kind in self.source_kinds() {
            let items = self
                .source
                .arrivals(kind, route, stop, self.config.page_limit)
                .await?;

            if items.is_empty() {
                info!("no {kind} found for route: {route}, stop_id: {stop}");
                continue;
            }

            // One "now" per batch keeps relative order within the batch exact
            let now = self.clock.now();
            for item in &items {
                records.push(normalize_arrival(item, kind, route, direction_names, now)?);
            }
            debug!(%route, %stop, source = %kind, count = items.len(), "fetched arrivals");
        }

        Ok(records)
    }
}

/// Convert one prediction or schedule into an arrival record.
pub fn normalize_arrival(
    item: &ArrivalResource,
    kind: SourceKind,
    route: &RouteId,
    direction_names: &[String],
    now: NaiveDateTime,
) -> Result<ArrivalRecord, DataFormatError> {
    let at = parse_local_timestamp(item.attributes.stop_time()?)?;
    let direction = direction_name(route, direction_names, item.attributes.direction_code()?)?;

    Ok(ArrivalRecord {
        route: route.clone(),
        direction: direction.to_string(),
        minutes_until_arrival: minutes_until(at, now),
        source_kind: kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::mbta::{MockSource, parse_arrival};
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    fn stop() -> StopId {
        StopId::new("1241")
    }

    fn route() -> RouteId {
        RouteId::new("57")
    }

    fn directions() -> Vec<String> {
        vec!["Inbound".to_string(), "Outbound".to_string()]
    }

    fn arrival(time: &str, direction: i64) -> Value {
        json!({
            "type": "prediction",
            "attributes": {"arrival_time": time, "direction_id": direction}
        })
    }

    fn record(minutes: i64, direction: &str, kind: SourceKind) -> ArrivalRecord {
        ArrivalRecord {
            route: route(),
            direction: direction.to_string(),
            minutes_until_arrival: minutes,
            source_kind: kind,
        }
    }

    #[tokio::test]
    async fn predictions_then_schedules() {
        let source = MockSource::new()
            .with_arrivals(
                SourceKind::Scheduled,
                route(),
                stop(),
                vec![arrival("2024-03-15T17:20:00-04:00", 1)],
            )
            .with_arrivals(
                SourceKind::Prediction,
                route(),
                stop(),
                vec![arrival("2024-03-15T14:05:00-04:00", 0)],
            );
        let clock = FixedClock(now());
        let fetcher = ArrivalFetcher::new(&source, &clock, FetchConfig::default());

        let records = fetcher
            .fetch_arrivals(&stop(), &route(), &directions())
            .await
            .unwrap();

        assert_eq!(
            records,
            vec![
                record(5, "Inbound", SourceKind::Prediction),
                record(200, "Outbound", SourceKind::Scheduled),
            ]
        );
        assert_eq!(source.arrival_calls(), 2);
    }

    #[tokio::test]
    async fn schedules_skipped_when_disabled() {
        let source = MockSource::new().with_arrivals(
            SourceKind::Scheduled,
            route(),
            stop(),
            vec![arrival("2024-03-15T14:20:00-04:00", 1)],
        );
        let clock = FixedClock(now());
        let config = FetchConfig {
            include_scheduled: false,
            ..FetchConfig::default()
        };
        let fetcher = ArrivalFetcher::new(&source, &clock, config);

        let records = fetcher
            .fetch_arrivals(&stop(), &route(), &directions())
            .await
            .unwrap();

        assert!(records.is_empty());
        assert_eq!(source.arrival_calls(), 1);
        assert_eq!(
            fetcher.source_kinds().collect::<Vec<_>>(),
            vec![SourceKind::Prediction]
        );
    }

    #[tokio::test]
    async fn no_data_is_not_an_error() {
        let source = MockSource::new();
        let clock = FixedClock(now());
        let fetcher = ArrivalFetcher::new(&source, &clock, FetchConfig::default());

        let records = fetcher
            .fetch_arrivals(&stop(), &route(), &directions())
            .await
            .unwrap();

        assert!(records.is_empty());
        assert_eq!(source.arrival_calls(), 2);
    }

    #[tokio::test]
    async fn page_limit_is_passed_through() {
        let items = (1..=5)
            .map(|m| arrival(&format!("2024-03-15T14:0{m}:00-04:00"), 0))
            .collect();
        let source =
            MockSource::new().with_arrivals(SourceKind::Prediction, route(), stop(), items);
        let clock = FixedClock(now());
        let config = FetchConfig {
            page_limit: 2,
            include_scheduled: false,
        };

        let records = ArrivalFetcher::new(&source, &clock, config)
            .fetch_arrivals(&stop(), &route(), &directions())
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn out_of_range_direction_fails_route() {
        let source = MockSource::new().with_arrivals(
            SourceKind::Prediction,
            route(),
            stop(),
            vec![
                arrival("2024-03-15T14:05:00-04:00", 0),
                arrival("2024-03-15T14:06:00-04:00", 2),
            ],
        );
        let clock = FixedClock(now());

        let result = ArrivalFetcher::new(&source, &clock, FetchConfig::default())
            .fetch_arrivals(&stop(), &route(), &directions())
            .await;

        assert!(matches!(
            result,
            Err(Error::DataFormat(DataFormatError::DirectionOutOfRange { code: 2, available: 2, .. }))
        ));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let source = MockSource::new().with_unavailable_route(route());
        let clock = FixedClock(now());

        let result = ArrivalFetcher::new(&source, &clock, FetchConfig::default())
            .fetch_arrivals(&stop(), &route(), &directions())
            .await;

        assert!(matches!(result, Err(Error::Transport(_))));
        // No retry, and schedules are not attempted after predictions fail
        assert_eq!(source.arrival_calls(), 1);
    }

    #[test]
    fn normalize_uses_departure_for_first_stop() {
        let item = parse_arrival(&json!({
            "attributes": {
                "arrival_time": null,
                "departure_time": "2024-03-15T14:12:00-04:00",
                "direction_id": 1
            }
        }))
        .unwrap();

        let normalized =
            normalize_arrival(&item, SourceKind::Scheduled, &route(), &directions(), now())
                .unwrap();
        assert_eq!(normalized, record(12, "Outbound", SourceKind::Scheduled));
    }

    #[test]
    fn normalize_keeps_negative_minutes() {
        let item = parse_arrival(&arrival("2024-03-15T13:58:00-04:00", 0)).unwrap();
        let normalized =
            normalize_arrival(&item, SourceKind::Prediction, &route(), &directions(), now())
                .unwrap();
        assert_eq!(normalized.minutes_until_arrival, -2);
    }

    #[test]
    fn normalize_rejects_bad_timestamp() {
        let item = parse_arrival(&arrival("quarter past two", 0)).unwrap();
        let err = normalize_arrival(&item, SourceKind::Prediction, &route(), &directions(), now())
            .unwrap_err();
        assert!(matches!(err, DataFormatError::InvalidTimestamp { .. }));
    }

    #[test]
    fn normalize_rejects_negative_direction() {
        let item = parse_arrival(&arrival("2024-03-15T14:05:00-04:00", -1)).unwrap();
        let err = normalize_arrival(&item, SourceKind::Prediction, &route(), &directions(), now())
            .unwrap_err();
        assert!(matches!(err, DataFormatError::DirectionOutOfRange { code: -1, .. }));
    }
}
