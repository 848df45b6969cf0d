use chrono::NaiveDate;
use imdera_dashboard::data::seed_classes;
use imdera_dashboard::filter::{filter_by_day, filter_by_query, filter_classes, group_by_time_slot};
use imdera_dashboard::{availability_percent, ClassFilter, ClassRecord, ClassStatus, Locale};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(id: &str, name: &str, on: NaiveDate) -> ClassRecord {
    ClassRecord {
        id: id.to_string(),
        name: name.to_string(),
        date: on,
        time_slot: "09:00 - 12:00".to_string(),
        location: "Centro IMDERA".to_string(),
        instructor_name: "Laura Gómez".to_string(),
        student_count: 20,
        max_capacity: 25,
        status: ClassStatus::Scheduled,
        roster: Vec::new(),
    }
}

fn two_records() -> Vec<ClassRecord> {
    vec![
        record("1", "Emprendimiento Digital", date(2024, 1, 15)),
        record("3", "Marketing Digital", date(2024, 1, 12)),
    ]
}

#[test]
fn day_filter_picks_the_class_on_that_day() {
    let records = two_records();
    let result = filter_by_day(&records, date(2024, 1, 15));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Emprendimiento Digital");
}

#[test]
fn day_and_query_must_both_hold() {
    let records = two_records();
    assert_eq!(filter_by_query(&records, "digital", Locale::Es).len(), 2);

    let result = filter_classes(&records, Some(date(2024, 1, 15)), Some("digital"), Locale::Es);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "1");
}

#[test]
fn filtering_leaves_the_source_untouched() {
    let records = seed_classes();
    let before = records.clone();
    let view = ClassFilter::new(Locale::Es)
        .on_day(date(2024, 1, 18))
        .matching("gestión");
    let result = view.apply(&records);
    assert_eq!(result.len(), 1);
    assert_eq!(records, before);
}

#[test]
fn grouping_seed_week_keeps_every_record_once() {
    let records = seed_classes();
    let groups = group_by_time_slot(&records);
    let total: usize = groups.iter().map(|g| g.classes.len()).sum();
    assert_eq!(total, records.len());
    for record in &records {
        let hits = groups
            .iter()
            .flat_map(|g| g.classes.iter())
            .filter(|r| r.id == record.id)
            .count();
        assert_eq!(hits, 1);
    }
}

#[test]
fn availability_examples() {
    assert_eq!(availability_percent(25, 25), 100);
    assert_eq!(availability_percent(30, 25), 100);
    assert_eq!(availability_percent(0, 25), 0);
    assert_eq!(availability_percent(5, 0), 0);
    assert_eq!(records_percent(&seed_classes()), vec![83, 72, 100, 75]);
}

fn records_percent(records: &[ClassRecord]) -> Vec<u8> {
    records.iter().map(ClassRecord::availability_percent).collect()
}
