use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::locale::Locale;
use crate::models::ClassRecord;

/// Active filters for one view. `None` means the filter is off.
#[derive(Debug, Clone, Default)]
pub struct ClassFilter {
    pub day: Option<NaiveDate>,
    pub query: Option<String>,
    pub locale: Locale,
}

impl ClassFilter {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn on_day(mut self, day: NaiveDate) -> Self {
        self.day = Some(day);
        self
    }

    pub fn matching(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn apply<'a>(&self, records: &'a [ClassRecord]) -> Vec<&'a ClassRecord> {
        records
            .iter()
            .filter(|record| self.day.map_or(true, |day| record.date == day))
            .filter(|record| match self.query.as_deref() {
                Some(query) => matches_query(record, query, self.locale),
                None => true,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeSlotGroup<'a> {
    pub time_slot: &'a str,
    pub classes: Vec<&'a ClassRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub classes: Vec<&'a ClassRecord>,
}

pub fn filter_by_day(records: &[ClassRecord], day: NaiveDate) -> Vec<&ClassRecord> {
    ClassFilter::default().on_day(day).apply(records)
}

pub fn filter_by_query<'a>(
    records: &'a [ClassRecord],
    query: &str,
    locale: Locale,
) -> Vec<&'a ClassRecord> {
    ClassFilter::new(locale).matching(query).apply(records)
}

pub fn filter_classes<'a>(
    records: &'a [ClassRecord],
    day: Option<NaiveDate>,
    query: Option<&str>,
    locale: Locale,
) -> Vec<&'a ClassRecord> {
    ClassFilter {
        day,
        query: query.map(str::to_string),
        locale,
    }
    .apply(records)
}

/// Blank queries match everything. Otherwise a case-insensitive substring of
/// the class name or the instructor name, surrounding whitespace included.
pub fn matches_query(record: &ClassRecord, query: &str, locale: Locale) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    let needle = locale.fold(query);
    locale.fold(&record.name).contains(&needle)
        || locale.fold(&record.instructor_name).contains(&needle)
}

pub fn group_by_time_slot<'a, I>(records: I) -> Vec<TimeSlotGroup<'a>>
where
    I: IntoIterator<Item = &'a ClassRecord>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<TimeSlotGroup<'a>> = Vec::new();

    for record in records {
        let slot = record.time_slot.as_str();
        let idx = *index.entry(slot).or_insert_with(|| {
            groups.push(TimeSlotGroup {
                time_slot: slot,
                classes: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].classes.push(record);
    }

    groups
}

/// Groups by calendar day in order of first appearance.
pub fn group_by_day<'a, I>(records: I) -> Vec<DayGroup<'a>>
where
    I: IntoIterator<Item = &'a ClassRecord>,
{
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut groups: Vec<DayGroup<'a>> = Vec::new();

    for record in records {
        let idx = *index.entry(record.date).or_insert_with(|| {
            groups.push(DayGroup {
                date: record.date,
                classes: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].classes.push(record);
    }

    groups
}

pub fn availability_percent(student_count: u32, max_capacity: u32) -> u8 {
    if max_capacity == 0 {
        return 0;
    }

    let ratio = f64::from(student_count) / f64::from(max_capacity) * 100.0;
    ratio.min(100.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityBand {
    High,
    Medium,
    Low,
}

impl AvailabilityBand {
    pub fn for_percent(percent: u8) -> Self {
        match percent {
            76..=u8::MAX => AvailabilityBand::High,
            26..=75 => AvailabilityBand::Medium,
            _ => AvailabilityBand::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AvailabilityBand::High => "high",
            AvailabilityBand::Medium => "medium",
            AvailabilityBand::Low => "low",
        }
    }
}
