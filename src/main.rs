use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::{FixedOffset, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imdera_dashboard::calendar::{self, CalendarWeekEngine, Clock, FixedClock, SystemClock};
use imdera_dashboard::filter::{self, AvailabilityBand, ClassFilter};
use imdera_dashboard::models::ClassRecord;
use imdera_dashboard::reminder::{self, ReminderDraft};
use imdera_dashboard::roster::{self, RosterSelection};
use imdera_dashboard::{data, report, Locale};

#[derive(Parser)]
#[command(name = "imdera-dashboard")]
#[command(about = "Class calendar, rosters and reminders for IMDERA promotors", long_about = None)]
struct Cli {
    /// JSON or CSV class file; the demo program is used when omitted
    #[arg(long, global = true, env = "IMDERA_DATA")]
    data: Option<PathBuf>,
    /// Pin "today" to a fixed date (YYYY-MM-DD)
    #[arg(long, global = true, env = "IMDERA_TODAY")]
    today: Option<NaiveDate>,
    /// Reference timezone as hours east of UTC
    #[arg(
        long,
        global = true,
        env = "IMDERA_UTC_OFFSET",
        default_value_t = -5,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(i32).range(-12..=14)
    )]
    utc_offset: i32,
    #[arg(long, global = true, env = "IMDERA_LOCALE", value_enum, default_value_t = Locale::Es)]
    locale: Locale,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the days of a week with their class counts
    Week {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Whole weeks to move forward (negative for backward)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
        #[arg(long)]
        json: bool,
    },
    /// List classes filtered by day and search text
    Classes {
        #[arg(long)]
        day: Option<NaiveDate>,
        /// Matches class or instructor names
        #[arg(long)]
        query: Option<String>,
        /// Defaults to time slot when a day is given, to day otherwise
        #[arg(long, value_enum)]
        group_by: Option<GroupBy>,
        #[arg(long)]
        json: bool,
    },
    /// Show a class roster, optionally flipping attendance confirmations
    Roster {
        #[arg(long)]
        class: String,
        #[arg(long = "toggle")]
        toggle: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Prepare WhatsApp reminders for selected students of a class
    Remind {
        #[arg(long)]
        class: String,
        #[arg(long = "student", required_unless_present = "all")]
        students: Vec<String>,
        #[arg(long, conflicts_with = "students")]
        all: bool,
        #[arg(long, conflicts_with = "quick")]
        message: Option<String>,
        /// Use the short reminder template
        #[arg(long)]
        quick: bool,
        /// Simulated sending time
        #[arg(long, default_value_t = 2000)]
        delay_ms: u64,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report for a week
    Report {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupBy {
    Slot,
    Day,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "imdera_dashboard=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let locale = cli.locale;
    let zone = FixedOffset::east_opt(cli.utc_offset * 3600)
        .with_context(|| format!("UTC offset {} is out of range", cli.utc_offset))?;
    let clock: Box<dyn Clock> = match cli.today {
        Some(date) => Box::new(FixedClock::on_date(date, zone)),
        None => Box::new(SystemClock),
    };
    let engine = CalendarWeekEngine::new(clock, zone);

    let classes = match &cli.data {
        Some(path) => data::load_classes(path)
            .with_context(|| format!("failed to load classes from {}", path.display()))?,
        None => data::seed_classes(),
    };

    match cli.command {
        Commands::Week { date, offset, json } => {
            let today = engine.today();
            let anchor = engine.advance_weeks(date.unwrap_or(today), offset);
            let mut window = engine.week_window_for(anchor);
            if date.is_none() && offset == 0 {
                window = window.select(today);
            }
            let cells = window.day_cells(today, locale);

            if json {
                println!("{}", serde_json::to_string_pretty(&cells)?);
                return Ok(());
            }

            println!("{}", window.title(locale));
            for cell in &cells {
                let count = filter::filter_by_day(&classes, cell.date).len();
                let marker = match (cell.is_selected, cell.is_today) {
                    (true, _) => ">",
                    (false, true) => "*",
                    (false, false) => " ",
                };
                println!(
                    "{} {:<4}{:>2}  {}",
                    marker,
                    cell.label,
                    cell.day_number,
                    report::class_count(count)
                );
            }
        }
        Commands::Classes {
            day,
            query,
            group_by,
            json,
        } => {
            let mut view = ClassFilter::new(locale);
            if let Some(day) = day {
                view = view.on_day(day);
            }
            if let Some(query) = query {
                view = view.matching(query);
            }
            let matches = view.apply(&classes);
            let group_by = group_by.unwrap_or(if day.is_some() {
                GroupBy::Slot
            } else {
                GroupBy::Day
            });

            if json {
                let body = match group_by {
                    GroupBy::Slot => serde_json::to_string_pretty(&filter::group_by_time_slot(matches))?,
                    GroupBy::Day => serde_json::to_string_pretty(&filter::group_by_day(matches))?,
                };
                println!("{body}");
                return Ok(());
            }

            if matches.is_empty() {
                println!("No classes match these filters.");
                return Ok(());
            }

            match group_by {
                GroupBy::Slot => {
                    for group in filter::group_by_time_slot(matches) {
                        println!("{}", display_slot(group.time_slot));
                        for class in group.classes {
                            print_class(class, locale);
                        }
                    }
                }
                GroupBy::Day => {
                    for group in filter::group_by_day(matches) {
                        println!("{}", group.date);
                        for class in group.classes {
                            print_class(class, locale);
                        }
                    }
                }
            }
        }
        Commands::Roster {
            class,
            toggle,
            json,
        } => {
            let record = find_class(&classes, &class)?;
            let mut students = record.roster.clone();
            for id in &toggle {
                match roster::toggle_attendance(&mut students, id) {
                    Some(confirmed) => info!(student_id = %id, confirmed, "attendance toggled"),
                    None => warn!(student_id = %id, class_id = %record.id, "student not on roster"),
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&students)?);
                return Ok(());
            }

            println!("{} ({})", record.name, record.time_slot);
            if students.is_empty() {
                println!("No students enrolled.");
                return Ok(());
            }
            for student in &students {
                let mark = if student.attendance_confirmed { "x" } else { " " };
                println!(
                    "[{}] {} {} ({})",
                    mark, student.id, student.display_name, student.phone_number
                );
            }
            let summary = roster::summarize(&students);
            println!(
                "{} of {} confirmed ({}%)",
                summary.confirmed, summary.total, summary.confirmed_percent
            );
        }
        Commands::Remind {
            class,
            students,
            all,
            message,
            quick,
            delay_ms,
            json,
        } => {
            let record = find_class(&classes, &class)?;
            let mut selection = RosterSelection::new();
            if all {
                selection.toggle_all(&record.roster);
            } else {
                for id in &students {
                    if !selection.is_selected(id) {
                        selection.toggle(id);
                    }
                }
            }

            let message = match message {
                Some(text) => text,
                None if quick => reminder::quick_message(record, locale),
                None => reminder::standard_message(record, locale),
            };
            let draft = ReminderDraft::new(record, &selection, &message)
                .with_context(|| format!("cannot send reminders for class {}", record.id))?;

            info!(recipients = draft.recipients().len(), delay_ms, "sending reminders");
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            let receipt = draft.dispatch();

            if json {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
                return Ok(());
            }

            println!("Reminders sent to {} student(s):", receipt.sent);
            for delivery in &receipt.deliveries {
                println!("- {}: {}", delivery.display_name, delivery.link);
            }
        }
        Commands::Report { date, out } => {
            let window = calendar::week_window_for(date.unwrap_or_else(|| engine.today()));
            let markdown = report::build_week_report(&window, &classes, locale);
            match out {
                Some(path) => {
                    std::fs::write(&path, markdown)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "report written");
                    println!("Report written to {}.", path.display());
                }
                None => print!("{markdown}"),
            }
        }
    }

    Ok(())
}

fn find_class<'a>(classes: &'a [ClassRecord], id: &str) -> anyhow::Result<&'a ClassRecord> {
    classes
        .iter()
        .find(|c| c.id == id)
        .with_context(|| format!("no class with id {id}"))
}

fn display_slot(slot: &str) -> &str {
    if slot.is_empty() {
        "(no time)"
    } else {
        slot
    }
}

fn print_class(class: &ClassRecord, locale: Locale) {
    let percent = class.availability_percent();
    let band = AvailabilityBand::for_percent(percent).label();
    println!(
        "  [{}] {} {} | {} | {} | {}/{} ({}% {}) | {}",
        class.id,
        class.name,
        class.time_slot,
        class.location,
        class.instructor_name,
        class.student_count,
        class.max_capacity,
        percent,
        band,
        class.status.label(locale)
    );
}
