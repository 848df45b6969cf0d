use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub display_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub attendance_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub location: String,
    pub instructor_name: String,
    pub student_count: u32,
    pub max_capacity: u32,
    pub status: ClassStatus,
    #[serde(default)]
    pub roster: Vec<Student>,
}

impl ClassRecord {
    pub fn availability_percent(&self) -> u8 {
        crate::filter::availability_percent(self.student_count, self.max_capacity)
    }
}

/// Lifecycle state of a class. Spanish names from the original data files are
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassStatus {
    #[serde(alias = "programada")]
    Scheduled,
    #[serde(alias = "en-curso")]
    InProgress,
    #[serde(alias = "completada")]
    Completed,
    #[serde(alias = "cancelada")]
    Cancelled,
}

/// Badge tone used by the presentation layer for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Blue,
    Green,
    Gray,
    Red,
}

impl ClassStatus {
    pub const ALL: [ClassStatus; 4] = [
        ClassStatus::Scheduled,
        ClassStatus::InProgress,
        ClassStatus::Completed,
        ClassStatus::Cancelled,
    ];

    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Es, ClassStatus::Scheduled) => "Programada",
            (Locale::Es, ClassStatus::InProgress) => "En curso",
            (Locale::Es, ClassStatus::Completed) => "Finalizada",
            (Locale::Es, ClassStatus::Cancelled) => "Cancelada",
            (Locale::En, ClassStatus::Scheduled) => "Scheduled",
            (Locale::En, ClassStatus::InProgress) => "In progress",
            (Locale::En, ClassStatus::Completed) => "Completed",
            (Locale::En, ClassStatus::Cancelled) => "Cancelled",
        }
    }

    pub fn tone(self) -> StatusTone {
        match self {
            ClassStatus::Scheduled => StatusTone::Blue,
            ClassStatus::InProgress => StatusTone::Green,
            ClassStatus::Completed => StatusTone::Gray,
            ClassStatus::Cancelled => StatusTone::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusSummary {
    pub status: ClassStatus,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct RosterSummary {
    pub confirmed: usize,
    pub total: usize,
    pub confirmed_percent: u8,
}
