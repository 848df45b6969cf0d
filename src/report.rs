use std::fmt::Write;

use chrono::Datelike;

use crate::calendar::WeekWindow;
use crate::filter::{self, AvailabilityBand};
use crate::locale::Locale;
use crate::models::{ClassRecord, ClassStatus, StatusSummary};
use crate::roster;

/// One entry per status, in canonical order, including empty ones.
pub fn summarize_by_status<'a, I>(records: I) -> Vec<StatusSummary>
where
    I: IntoIterator<Item = &'a ClassRecord>,
{
    let mut counts = [0usize; ClassStatus::ALL.len()];
    for record in records {
        if let Some(idx) = ClassStatus::ALL.iter().position(|s| *s == record.status) {
            counts[idx] += 1;
        }
    }

    ClassStatus::ALL
        .iter()
        .zip(counts)
        .map(|(&status, count)| StatusSummary { status, count })
        .collect()
}

pub fn build_week_report(window: &WeekWindow, records: &[ClassRecord], locale: Locale) -> String {
    let in_week: Vec<&ClassRecord> = records.iter().filter(|r| window.contains(r.date)).collect();
    let summaries = summarize_by_status(in_week.iter().copied());

    let mut output = String::new();

    let _ = writeln!(output, "# Weekly Class Report");
    let _ = writeln!(
        output,
        "Week of {} to {} ({})",
        window.start(),
        window.end(),
        window.title(locale)
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Mix");

    if in_week.is_empty() {
        let _ = writeln!(output, "No classes scheduled this week.");
    } else {
        for summary in summaries.iter().filter(|s| s.count > 0) {
            let _ = writeln!(
                output,
                "- {}: {}",
                summary.status.label(locale),
                class_count(summary.count)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Schedule");

    for day in window.days {
        let classes = filter::filter_by_day(records, day);
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "### {} {}",
            locale.weekday_abbrev(day.weekday()),
            day.day()
        );

        if classes.is_empty() {
            let _ = writeln!(output, "No classes.");
            continue;
        }

        for group in filter::group_by_time_slot(classes) {
            let slot = if group.time_slot.is_empty() {
                "(no time)"
            } else {
                group.time_slot
            };
            for class in group.classes {
                let percent = class.availability_percent();
                let _ = writeln!(
                    output,
                    "- {} {} @ {} with {}: {}/{} ({}%, {}) [{}]",
                    slot,
                    class.name,
                    class.location,
                    class.instructor_name,
                    class.student_count,
                    class.max_capacity,
                    percent,
                    AvailabilityBand::for_percent(percent).label(),
                    class.status.label(locale)
                );
            }
        }
    }

    let summary = roster::summarize(in_week.iter().flat_map(|c| c.roster.iter()));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Roster Confirmations");

    if summary.total == 0 {
        let _ = writeln!(output, "No students enrolled this week.");
    } else {
        let _ = writeln!(
            output,
            "{} of {} students confirmed ({}%)",
            summary.confirmed, summary.total, summary.confirmed_percent
        );
    }

    output
}

pub fn class_count(count: usize) -> String {
    match count {
        1 => "1 class".to_string(),
        n => format!("{n} classes"),
    }
}
