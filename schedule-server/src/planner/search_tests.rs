//! End-to-end tests for itinerary search.

use super::fixtures::{TestNetwork, id, sample, t};
use super::*;
use crate::domain::{Badge, ClockTime, Itinerary, ServiceDay, StationId};
use crate::network::NetworkIndex;

fn search(index: &NetworkIndex, request: &SearchRequest) -> SearchResult {
    let config = SearchConfig::default();
    Planner::new(index, &config).search(request).unwrap()
}

fn numbers(result: &SearchResult) -> Vec<String> {
    result
        .itineraries
        .iter()
        .map(|r| r.itinerary.train_numbers())
        .collect()
}

fn alger_thenia(index: &NetworkIndex) -> SearchRequest {
    SearchRequest::new(id(index, "Alger"), id(index, "Thenia"))
}

#[test]
fn alger_to_thenia_includes_sample_direct_trains() {
    let index = sample();
    let result = search(&index, &alger_thenia(&index));
    let found = numbers(&result);

    for number in ["27", "33", "35"] {
        assert!(found.iter().any(|n| n == number), "missing train {number}");
    }

    for ranked in result.itineraries.iter().filter(|r| r.itinerary.is_direct()) {
        let leg = ranked.itinerary.legs()[0];
        assert!(leg.stops().windows(2).all(|w| w[0].sequence < w[1].sequence));
        assert!(leg.duration().minutes() < 70);
    }
    assert!(!result.ranked);
}

#[test]
fn alger_to_thenia_unfiltered_order() {
    let index = sample();
    let result = search(&index, &alger_thenia(&index));

    // Directs in train order, then connections in discovery order, all
    // through the El Harrach hub
    assert_eq!(
        numbers(&result),
        vec!["27", "33", "35", "41", "1025 + 27", "1025 + 33", "1025 + 35", "Z201 + 35", "Z201 + 41"]
    );
    assert_eq!(result.direct_count, 4);
    assert_eq!(result.connection_count, 5);

    let el_harrach = id(&index, "El Harrach");
    for ranked in &result.itineraries {
        if let Some(transfer) = ranked.itinerary.transfer() {
            assert_eq!(transfer.station, el_harrach);
        }
        assert!(ranked.score.is_none());
        assert!(ranked.badges.is_empty());
    }
}

#[test]
fn alger_to_thenia_at_seven_on_monday() {
    let index = sample();
    let request = alger_thenia(&index).at(t("07:00")).on(ServiceDay::MONDAY);
    let result = search(&index, &request);

    assert!(result.ranked);
    assert_eq!(numbers(&result), vec!["33", "Z201 + 35", "27", "35"]);

    let scores: Vec<Option<u32>> = result.itineraries.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![Some(359), Some(449), Some(459), Some(959)]);

    let first = &result.itineraries[0];
    assert_eq!(first.badges, vec![Badge::Direct, Badge::Fast, Badge::BestOverall, Badge::Fastest]);
}

#[test]
fn lookback_excludes_earlier_departures() {
    let index = sample();

    // 06:20 is within an hour of 07:00 but not of 07:30
    let result = search(&index, &alger_thenia(&index).at(t("07:30")).on(ServiceDay::MONDAY));
    assert_eq!(numbers(&result), vec!["33", "Z201 + 35", "35"]);

    // 1025 leaves Alger at 05:35, before 07:00 - 60 min
    let result = search(&index, &alger_thenia(&index).at(t("07:00")).on(ServiceDay::MONDAY));
    assert!(numbers(&result).iter().all(|n| !n.starts_with("1025")));
}

#[test]
fn friday_swaps_train_sets() {
    let index = sample();
    let result = search(&index, &alger_thenia(&index).on(ServiceDay::FRIDAY));
    assert_eq!(numbers(&result), vec!["33", "35", "41", "Z201 + 35", "Z201 + 41"]);

    let result = search(&index, &alger_thenia(&index).on(ServiceDay::THURSDAY));
    assert_eq!(
        numbers(&result),
        vec!["27", "33", "35", "1025 + 27", "1025 + 33", "1025 + 35", "Z201 + 35"]
    );
}

#[test]
fn both_connection_legs_are_day_checked() {
    let index = sample();
    // Z201 runs daily but 41 only on Fridays
    for day in [ServiceDay::SUNDAY, ServiceDay::MONDAY, ServiceDay::SATURDAY] {
        let result = search(&index, &alger_thenia(&index).on(day));
        assert!(!numbers(&result).contains(&"Z201 + 41".to_string()), "{day}");
    }
}

#[test]
fn thenia_to_zeralda_connection_details() {
    let index = sample();
    let request = SearchRequest::new(id(&index, "Thenia"), id(&index, "Zéralda"))
        .at(t("06:00"))
        .on(ServiceDay::MONDAY);
    let result = search(&index, &request);

    assert_eq!(result.direct_count, 0);
    assert_eq!(result.connection_count, 1);

    let ranked = &result.itineraries[0];
    let Itinerary::Connection(connection) = &ranked.itinerary else {
        panic!("expected a connection");
    };
    assert_eq!(ranked.itinerary.train_numbers(), "22 + Z201");
    assert_eq!(ranked.itinerary.route_names(), "Thenia - Alger / Alger - Zéralda");

    let transfer = connection.transfer();
    assert_eq!(transfer.name_fr, "El Harrach");
    assert_eq!(transfer.arrival, t("06:44"));
    assert_eq!(transfer.departure, t("07:46"));
    assert_eq!(transfer.wait_minutes, 62);
    assert_eq!(connection.total_duration().to_string(), "2h25");

    assert_eq!(ranked.score, Some(145 + 30));
    assert_eq!(ranked.badges, vec![Badge::BestOverall, Badge::Fastest]);

    // 22 does not run on Fridays
    let friday = SearchRequest::new(id(&index, "Thenia"), id(&index, "Zéralda")).on(ServiceDay::FRIDAY);
    assert!(search(&index, &friday).itineraries.is_empty());
}

#[test]
fn no_route_is_empty_not_error() {
    let index = sample();
    let request = SearchRequest::new(id(&index, "Rouiba SNVI"), id(&index, "Blida"));
    let result = search(&index, &request);
    assert!(result.itineraries.is_empty());
}

#[test]
fn same_origin_and_destination_is_empty() {
    let index = sample();
    let alger = id(&index, "Alger");
    let result = search(&index, &SearchRequest::new(alger, alger).at(t("08:00")));
    assert_eq!(result, SearchResult::empty(true));
}

#[test]
fn unknown_station_is_an_error() {
    let index = sample();
    let config = SearchConfig::default();
    let planner = Planner::new(&index, &config);

    let request = SearchRequest::new(StationId(999), id(&index, "Alger"));
    assert_eq!(planner.search(&request), Err(SearchError::StationNotFound(StationId(999))));

    let request = SearchRequest::new(id(&index, "Alger"), StationId(0));
    assert_eq!(planner.search(&request), Err(SearchError::StationNotFound(StationId(0))));
}

#[test]
fn connections_skipped_when_direct_service_is_plentiful() {
    let build = |directs: usize| {
        let mut network = TestNetwork::new()
            .daily("C1", &[("O", "05:00"), ("T", "05:10")])
            .daily("C2", &[("T", "05:30"), ("D", "05:50")]);
        for i in 0..directs {
            let dep = ClockTime::from_minutes(6 * 60 + 10 * i as u32).to_string();
            let arr = ClockTime::from_minutes(6 * 60 + 10 * i as u32 + 30).to_string();
            network = network.daily(&format!("D{i}"), &[("O", dep.as_str()), ("D", arr.as_str())]);
        }
        network.build()
    };

    let index = build(9);
    let result = search(&index, &SearchRequest::new(id(&index, "O"), id(&index, "D")));
    assert_eq!(result.direct_count, 9);
    assert_eq!(result.connection_count, 1);

    let index = build(10);
    let result = search(&index, &SearchRequest::new(id(&index, "O"), id(&index, "D")));
    assert_eq!(result.direct_count, 10);
    assert_eq!(result.connection_count, 0);
}

#[test]
fn capacity_keeps_lowest_scoring_twenty() {
    let mut network = TestNetwork::new();
    for i in 0..30u32 {
        // Spread around 12:00, alternating before and after
        let offset = (i / 2) * 7;
        let dep = if i % 2 == 0 { 12 * 60 + offset } else { 12 * 60 - offset - 3 };
        let dep_s = ClockTime::from_minutes(dep).to_string();
        let arr_s = ClockTime::from_minutes(dep + 40 + i % 5).to_string();
        network = network.daily(&format!("T{i}"), &[("O", dep_s.as_str()), ("D", arr_s.as_str())]);
    }
    let index = network.build();
    let requested = t("12:00");
    let config = SearchConfig {
        lookback_mins: 24 * 60,
        ..SearchConfig::default()
    };

    let request = SearchRequest::new(id(&index, "O"), id(&index, "D")).at(requested);
    let result = Planner::new(&index, &config).search(&request).unwrap();
    assert_eq!(result.itineraries.len(), 20);

    let mut all: Vec<u32> = find_direct_legs(&index, id(&index, "O"), id(&index, "D"))
        .into_iter()
        .map(|leg| score(&Itinerary::Direct(leg), requested, &config))
        .collect();
    all.sort_unstable();
    let kept: Vec<u32> = result.itineraries.iter().filter_map(|r| r.score).collect();
    assert_eq!(kept, all[..20].to_vec());
}

#[test]
fn request_from_query() {
    let today = ServiceDay::MONDAY;
    let query = |from: Option<&str>, to: Option<&str>, time: Option<&str>, day: Option<&str>| SearchQuery {
        origin: from.map(String::from),
        destination: to.map(String::from),
        time: time.map(String::from),
        day: day.map(String::from),
    };

    let request = SearchRequest::from_query(&query(Some("1"), Some("18"), Some("07:00"), Some("5")), today).unwrap();
    assert_eq!(request.origin, StationId(1));
    assert_eq!(request.destination, StationId(18));
    assert_eq!(request.requested_time, Some(t("07:00")));
    assert_eq!(request.day, DaySelection::Day(ServiceDay::FRIDAY));

    let request = SearchRequest::from_query(&query(Some("1"), Some("18"), Some("7h"), Some("x")), today).unwrap();
    assert_eq!(request.requested_time, None);
    assert_eq!(request.day, DaySelection::Unfiltered);

    let request = SearchRequest::from_query(&query(Some("1"), Some("18"), None, Some("")), today).unwrap();
    assert_eq!(request.day, DaySelection::Day(today));

    assert_eq!(
        SearchRequest::from_query(&query(None, Some("18"), None, None), today),
        Err(SearchError::MissingStation("origin"))
    );
    assert_eq!(
        SearchRequest::from_query(&query(Some("1"), Some(" "), None, None), today),
        Err(SearchError::MissingStation("destination"))
    );
    assert!(matches!(
        SearchRequest::from_query(&query(Some("Alger"), Some("18"), None, None), today),
        Err(SearchError::InvalidStationId(_))
    ));
}

#[test]
fn malformed_time_disables_filter_and_ranking() {
    let index = sample();
    let query = SearchQuery {
        origin: Some(id(&index, "Alger").to_string()),
        destination: Some(id(&index, "Thenia").to_string()),
        time: Some("seven".to_string()),
        day: Some("1".to_string()),
    };
    let request = SearchRequest::from_query(&query, ServiceDay::MONDAY).unwrap();
    let result = search(&index, &request);

    assert!(!result.ranked);
    assert!(numbers(&result).contains(&"27".to_string()));
    assert!(result.itineraries.iter().all(|r| r.score.is_none()));
}
