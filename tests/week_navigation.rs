use chrono::{Datelike, FixedOffset, NaiveDate, TimeZone, Utc, Weekday};
use imdera_dashboard::calendar::{advance_weeks, week_window_for};
use imdera_dashboard::data::seed_classes;
use imdera_dashboard::filter::filter_by_day;
use imdera_dashboard::{CalendarWeekEngine, FixedClock, Locale};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bogota() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap()
}

#[test]
fn paging_through_weeks_keeps_monday_starts() {
    let engine = CalendarWeekEngine::new(FixedClock::on_date(date(2024, 1, 17), bogota()), bogota());
    let mut anchor = engine.today();
    let mut previous_start = engine.current_week().start();

    for _ in 0..60 {
        anchor = engine.advance_weeks(anchor, 1);
        let window = engine.week_window_for(anchor);
        assert_eq!(window.start().weekday(), Weekday::Mon);
        assert_eq!((window.start() - previous_start).num_days(), 7);
        previous_start = window.start();
    }

    assert_eq!(engine.advance_weeks(anchor, -60), date(2024, 1, 17));
}

#[test]
fn leap_years_and_year_ends() {
    for (anchor, monday, sunday) in [
        (date(2020, 2, 29), date(2020, 2, 24), date(2020, 3, 1)),
        (date(2021, 1, 1), date(2020, 12, 28), date(2021, 1, 3)),
        (date(2027, 1, 3), date(2026, 12, 28), date(2027, 1, 3)),
        (date(2100, 3, 1), date(2100, 3, 1), date(2100, 3, 7)),
    ] {
        let window = week_window_for(anchor);
        assert_eq!(window.start(), monday, "anchor {anchor}");
        assert_eq!(window.end(), sunday, "anchor {anchor}");
    }
    assert_eq!(advance_weeks(date(2024, 2, 22), 1), date(2024, 2, 29));
}

#[test]
fn today_is_marked_in_the_current_week() {
    let instant = Utc.with_ymd_and_hms(2024, 1, 19, 2, 0, 0).unwrap();
    let engine = CalendarWeekEngine::new(FixedClock(instant), bogota());
    let window = engine.current_week();
    let cells = window.day_cells(engine.today(), Locale::Es);

    let today: Vec<_> = cells.iter().filter(|c| c.is_today).collect();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].label, "jue");
    assert_eq!(today[0].day_number, 18);
    assert!(today[0].is_selected);
    assert!(engine.is_today(&instant));
}

#[test]
fn week_days_drive_the_day_filter() {
    let classes = seed_classes();
    let window = week_window_for(date(2024, 1, 15));
    let per_day: Vec<usize> = window
        .days
        .iter()
        .map(|day| filter_by_day(&classes, *day).len())
        .collect();
    assert_eq!(per_day, vec![1, 0, 0, 1, 0, 1, 0]);
}
