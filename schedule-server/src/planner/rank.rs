//! Itinerary ranking for search results.
//!
//! Lower scores are better. Proximity to the requested departure time
//! dominates (each minute of difference is weighted heavily), duration
//! breaks ties, and connections carry a small fixed penalty.

use crate::domain::{Badge, ClockTime, Itinerary, RankedItinerary};

use super::config::SearchConfig;

/// Score an itinerary against a requested departure time.
///
/// `weight × |departure − requested| + duration + transfer penalty`, all in
/// minutes. The departure difference is taken within the day.
pub fn score(itinerary: &Itinerary, requested: ClockTime, config: &SearchConfig) -> u32 {
    let proximity = itinerary.departure_time().abs_diff_minutes(requested);
    let penalty = if itinerary.is_direct() {
        0
    } else {
        config.transfer_penalty_mins
    };

    config
        .proximity_weight
        .saturating_mul(proximity)
        .saturating_add(itinerary.duration().minutes())
        .saturating_add(penalty)
}

/// Rank itineraries and cap the result at `config.max_results`.
///
/// Without a requested time no ranking pass runs: discovery order is kept
/// and no scores or badges are attached.
///
/// With one, itineraries are stable-sorted by [`score`] and badged:
/// `Direct` and `Fast` per itinerary, `Best Overall` on the first, and
/// `Fastest` on the shortest of the whole set (the best ranked among equals).
/// `Fastest` is picked before the cap is applied, so when the shortest
/// itinerary ranks below the cut no returned itinerary carries it.
pub fn rank_itineraries(
    itineraries: Vec<Itinerary>,
    requested: Option<ClockTime>,
    config: &SearchConfig,
) -> Vec<RankedItinerary> {
    let Some(requested) = requested else {
        return itineraries
            .into_iter()
            .take(config.max_results)
            .map(RankedItinerary::unranked)
            .collect();
    };

    let mut ranked: Vec<RankedItinerary> = itineraries
        .into_iter()
        .map(|itinerary| {
            let mut badges = Vec::new();
            if itinerary.is_direct() {
                badges.push(Badge::Direct);
            }
            if itinerary.duration().minutes() < config.fast_threshold_mins {
                badges.push(Badge::Fast);
            }
            RankedItinerary {
                score: Some(score(&itinerary, requested, config)),
                itinerary,
                badges,
            }
        })
        .collect();

    // sort_by_key is stable
    ranked.sort_by_key(|r| r.score);

    if let Some(best) = ranked.first_mut() {
        best.badges.push(Badge::BestOverall);
    }

    let fastest = ranked
        .iter()
        .enumerate()
        .min_by_key(|(i, r)| (r.itinerary.duration(), *i))
        .map(|(i, _)| i);
    if let Some(i) = fastest {
        ranked[i].badges.push(Badge::Fastest);
    }

    ranked.truncate(config.max_results);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Connection, Leg, LegStop, OperatingDays, StationId, Train, TrainId};
    use crate::planner::fixtures::t;

    fn leg(train: u32, from: (u32, &str), to: (u32, &str)) -> Leg {
        let train = Train::new(TrainId(train), train.to_string(), "Route", OperatingDays::Daily);
        let stop = |(id, time): (u32, &str), sequence| LegStop {
            station: StationId(id),
            name_fr: format!("S{id}"),
            name_ar: String::new(),
            time: t(time),
            sequence,
        };
        Leg::new(&train, vec![stop(from, 1), stop(to, 2)]).unwrap()
    }

    fn direct(train: u32, dep: &str, arr: &str) -> Itinerary {
        Itinerary::Direct(leg(train, (1, dep), (2, arr)))
    }

    fn connection(a: u32, b: u32, dep: &str, change: (&str, &str), arr: &str) -> Itinerary {
        let first = leg(a, (1, dep), (3, change.0));
        let second = leg(b, (3, change.1), (2, arr));
        Itinerary::Connection(Connection::new(first, second).unwrap())
    }

    fn numbers(ranked: &[RankedItinerary]) -> Vec<String> {
        ranked.iter().map(|r| r.itinerary.train_numbers()).collect()
    }

    #[test]
    fn score_formula() {
        let config = SearchConfig::default();
        // 33 departs 30 min after 07:00 and takes 59 min
        assert_eq!(score(&direct(33, "07:30", "08:29"), t("07:00"), &config), 359);
        // 27 departs 40 min before
        assert_eq!(score(&direct(27, "06:20", "07:19"), t("07:00"), &config), 459);
        // Connections pay the transfer penalty
        let c = connection(1, 2, "07:00", ("07:20", "07:35"), "08:00");
        assert_eq!(score(&c, t("07:00"), &config), 60 + 30);
    }

    #[test]
    fn closer_departure_ranks_first() {
        let config = SearchConfig::default();
        let itineraries = vec![direct(2, "08:05", "08:45"), direct(1, "07:05", "07:45")];
        let ranked = rank_itineraries(itineraries, Some(t("07:00")), &config);
        assert_eq!(numbers(&ranked), vec!["1", "2"]);
        assert!(ranked[0].score < ranked[1].score);
    }

    #[test]
    fn badges() {
        let config = SearchConfig::default();
        let itineraries = vec![
            connection(5, 6, "07:00", ("07:20", "07:35"), "08:50"),
            direct(1, "07:05", "08:20"),
            direct(2, "09:00", "09:40"),
        ];
        let ranked = rank_itineraries(itineraries, Some(t("07:00")), &config);

        assert_eq!(numbers(&ranked), vec!["1", "5 + 6", "2"]);
        assert_eq!(ranked[0].badges, vec![Badge::Direct, Badge::BestOverall]);
        assert!(ranked[1].badges.is_empty());
        assert_eq!(ranked[2].badges, vec![Badge::Direct, Badge::Fast, Badge::Fastest]);
    }

    #[test]
    fn best_overall_can_also_be_fastest() {
        let config = SearchConfig::default();
        let ranked = rank_itineraries(
            vec![direct(1, "07:00", "07:30"), direct(2, "08:00", "09:30")],
            Some(t("07:00")),
            &config,
        );
        assert_eq!(
            ranked[0].badges,
            vec![Badge::Direct, Badge::Fast, Badge::BestOverall, Badge::Fastest]
        );
    }

    #[test]
    fn fastest_tie_goes_to_better_ranked() {
        let config = SearchConfig::default();
        let ranked = rank_itineraries(
            vec![direct(2, "08:00", "08:40"), direct(1, "07:00", "07:40")],
            Some(t("07:00")),
            &config,
        );
        assert!(ranked[0].has_badge(Badge::Fastest));
        assert!(!ranked[1].has_badge(Badge::Fastest));
    }

    #[test]
    fn equal_scores_keep_discovery_order() {
        let config = SearchConfig::default();
        let ranked = rank_itineraries(
            vec![direct(9, "06:50", "07:50"), direct(3, "07:10", "08:10")],
            Some(t("07:00")),
            &config,
        );
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(numbers(&ranked), vec!["9", "3"]);
    }

    #[test]
    fn no_time_means_no_ranking() {
        let config = SearchConfig::default();
        let ranked = rank_itineraries(
            vec![direct(2, "09:00", "09:40"), direct(1, "07:00", "07:40")],
            None,
            &config,
        );
        assert_eq!(numbers(&ranked), vec!["2", "1"]);
        assert!(ranked.iter().all(|r| r.score.is_none() && r.badges.is_empty()));
    }

    #[test]
    fn truncates_to_max_results() {
        let config = SearchConfig::default();
        let itineraries: Vec<Itinerary> = (0..30)
            .map(|i| {
                let dep = ClockTime::from_minutes(6 * 60 + i * 10);
                let arr = ClockTime::from_minutes(6 * 60 + i * 10 + 45);
                Itinerary::Direct(leg(i, (1, dep.to_string().as_str()), (2, arr.to_string().as_str())))
            })
            .collect();

        let ranked = rank_itineraries(itineraries.clone(), Some(t("06:00")), &config);
        assert_eq!(ranked.len(), 20);
        assert_eq!(ranked[0].itinerary.train_numbers(), "0");
        assert_eq!(ranked[19].itinerary.train_numbers(), "19");

        assert_eq!(rank_itineraries(itineraries, None, &config).len(), 20);
    }

    #[test]
    fn fastest_below_the_cut_is_dropped() {
        let config = SearchConfig::default();
        let mut itineraries: Vec<Itinerary> = (0..24)
            .map(|i| {
                let dep = ClockTime::from_minutes(6 * 60 + i * 10);
                let arr = ClockTime::from_minutes(6 * 60 + i * 10 + 45);
                Itinerary::Direct(leg(i, (1, dep.to_string().as_str()), (2, arr.to_string().as_str())))
            })
            .collect();
        // Shortest trip, but far from the requested time
        itineraries.push(direct(99, "12:00", "12:20"));

        let ranked = rank_itineraries(itineraries, Some(t("06:00")), &config);
        assert_eq!(ranked.len(), 20);
        assert!(ranked.iter().all(|r| !r.has_badge(Badge::Fastest)));
        assert!(ranked.iter().all(|r| r.itinerary.train_numbers() != "99"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Leg, LegStop, OperatingDays, StationId, Train, TrainId};
    use proptest::prelude::*;

    fn direct(train: u32, dep: u32, mins: u32) -> Itinerary {
        let train = Train::new(TrainId(train), train.to_string(), "Route", OperatingDays::Daily);
        let stop = |station, time, sequence| LegStop {
            station: StationId(station),
            name_fr: String::new(),
            name_ar: String::new(),
            time: ClockTime::from_minutes(time),
            sequence,
        };
        Itinerary::Direct(Leg::new(&train, vec![stop(1, dep, 1), stop(2, dep + mins, 2)]).unwrap())
    }

    /// (departure minute, duration) pairs that stay within one day.
    fn trips() -> impl Strategy<Value = Vec<(u32, u32)>> {
        prop::collection::vec((300u32..1200, 5u32..180), 0..40)
    }

    proptest! {
        #[test]
        fn output_is_sorted_and_capped(trips in trips(), requested in 300u32..1200) {
            let config = SearchConfig::default();
            let itineraries: Vec<Itinerary> = trips
                .iter()
                .enumerate()
                .map(|(i, (dep, mins))| direct(i as u32, *dep, *mins))
                .collect();
            let n = itineraries.len();

            let ranked = rank_itineraries(itineraries, Some(ClockTime::from_minutes(requested)), &config);

            prop_assert_eq!(ranked.len(), n.min(config.max_results));
            prop_assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
        }

        #[test]
        fn kept_itineraries_are_the_lowest_scoring(trips in trips(), requested in 300u32..1200) {
            let config = SearchConfig::default();
            let requested = ClockTime::from_minutes(requested);
            let itineraries: Vec<Itinerary> = trips
                .iter()
                .enumerate()
                .map(|(i, (dep, mins))| direct(i as u32, *dep, *mins))
                .collect();

            let mut all: Vec<u32> = itineraries.iter().map(|it| score(it, requested, &config)).collect();
            all.sort_unstable();

            let ranked = rank_itineraries(itineraries, Some(requested), &config);
            let kept: Vec<u32> = ranked.iter().filter_map(|r| r.score).collect();
            prop_assert_eq!(&kept[..], &all[..kept.len()]);
        }

        #[test]
        fn exactly_one_best_and_one_fastest(trips in trips(), requested in 300u32..1200) {
            prop_assume!(!trips.is_empty());
            let config = SearchConfig { max_results: 100, ..SearchConfig::default() };
            let itineraries: Vec<Itinerary> = trips
                .iter()
                .enumerate()
                .map(|(i, (dep, mins))| direct(i as u32, *dep, *mins))
                .collect();

            let ranked = rank_itineraries(itineraries, Some(ClockTime::from_minutes(requested)), &config);
            let best = ranked.iter().filter(|r| r.has_badge(Badge::BestOverall)).count();
            let fastest: Vec<&RankedItinerary> = ranked.iter().filter(|r| r.has_badge(Badge::Fastest)).collect();

            prop_assert_eq!(best, 1);
            prop_assert_eq!(fastest.len(), 1);
            let min = trips.iter().map(|(_, mins)| *mins).min().unwrap_or_default();
            prop_assert_eq!(fastest[0].itinerary.duration().minutes(), min);
        }
    }
}
