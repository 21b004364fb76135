use chart_layout::core::{ChartDate, ChartMode, Interval, factors, max_x_ticks, x_ticks};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn daily(count: usize, stride_days: i64) -> Vec<ChartDate> {
    let start = NaiveDate::from_ymd_opt(2023, 11, 20)
        .expect("start date")
        .and_hms_opt(0, 0, 0)
        .expect("midnight");
    (0..count)
        .map(|index| {
            let time = start + Duration::days(stride_days * index as i64);
            ChartDate::new(time.to_string(), time)
        })
        .collect()
}

fn mode() -> impl Strategy<Value = ChartMode> {
    prop_oneof![Just(ChartMode::ItemComparison), Just(ChartMode::TimeComparison)]
}

fn interval() -> impl Strategy<Value = (Interval, i64)> {
    prop_oneof![
        Just((Interval::Day, 1)),
        Just((Interval::Week, 7)),
        Just((Interval::Month, 30)),
        Just((Interval::Quarter, 91)),
        Just((Interval::Year, 365)),
    ]
}

proptest! {
    #[test]
    fn ticks_fit_the_budget_and_start_at_the_first_date(
        count in 0usize..400,
        width in 0.0f64..2_000.0,
        mode in mode(),
        (interval, stride) in interval()
    ) {
        let dates = daily(count, stride);
        let ticks = x_ticks(&dates, width, mode, interval);

        prop_assert!(ticks.len() <= max_x_ticks(width, mode));
        prop_assert_eq!(ticks.is_empty(), dates.is_empty());
        if let Some(first) = ticks.first() {
            prop_assert_eq!(first, &dates[0]);
        }
        prop_assert!(ticks.windows(2).all(|pair| pair[0].time < pair[1].time));
        prop_assert!(ticks.iter().all(|tick| dates.contains(tick)));
    }

    #[test]
    fn factors_are_sorted_divisors(n in 1usize..50_000) {
        let divisors = factors(n);
        prop_assert_eq!(divisors.first().copied(), Some(1));
        prop_assert_eq!(divisors.last().copied(), Some(n));
        prop_assert!(divisors.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(divisors.iter().all(|factor| n % factor == 0));
        let len = divisors.len();
        prop_assert!((0..len).all(|index| divisors[index] * divisors[len - 1 - index] == n));
    }
}
