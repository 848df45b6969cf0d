use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta,
    TimeZone, Utc,
};
use serde::Serialize;

use crate::locale::Locale;

pub const DAYS_PER_WEEK: usize = 7;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Noon of `date` in `zone`, so the calendar day survives any offset.
    pub fn on_date(date: NaiveDate, zone: FixedOffset) -> Self {
        let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
        let utc = noon - TimeDelta::seconds(i64::from(zone.local_minus_utc()));
        FixedClock(Utc.from_utc_datetime(&utc))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Anything that can be reduced to a calendar day in a reference timezone.
pub trait CalendarDay {
    fn calendar_day(&self, zone: &FixedOffset) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self, _zone: &FixedOffset) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self, _zone: &FixedOffset) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self, zone: &FixedOffset) -> NaiveDate {
        self.with_timezone(zone).date_naive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub anchor_date: NaiveDate,
    pub days: [NaiveDate; DAYS_PER_WEEK],
    pub selected_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub label: &'static str,
    pub day_number: u32,
    pub is_today: bool,
    pub is_selected: bool,
}

impl WeekWindow {
    pub fn start(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn end(&self) -> NaiveDate {
        self.days[DAYS_PER_WEEK - 1]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains(&date)
    }

    /// Moves focus to `date` without changing the visible week.
    pub fn select(mut self, date: NaiveDate) -> Self {
        self.selected_date = date;
        self
    }

    pub fn title(&self, locale: Locale) -> String {
        locale.month_title(self.selected_date)
    }

    pub fn day_cells(&self, today: NaiveDate, locale: Locale) -> Vec<DayCell> {
        self.days
            .iter()
            .map(|&date| DayCell {
                date,
                label: locale.weekday_abbrev(date.weekday()),
                day_number: date.day(),
                is_today: date == today,
                is_selected: date == self.selected_date,
            })
            .collect()
    }
}

/// The Monday-first week containing `date`, with `date` selected.
///
/// At either end of the representable range, where that week does not fit,
/// the nearest whole week inside the range is used, so `days` stay
/// consecutive but may not contain `date`.
pub fn week_window_for(date: NaiveDate) -> WeekWindow {
    let back = u64::from(date.weekday().num_days_from_monday());
    let fits = |monday: &NaiveDate| monday.checked_add_days(Days::new(6)).is_some();
    let monday = date
        .checked_sub_days(Days::new(back))
        .filter(fits)
        .or_else(|| date.checked_sub_days(Days::new(back + 7)).filter(fits))
        .or_else(|| date.checked_add_days(Days::new(7 - back)))
        .unwrap_or(date);
    let days: [NaiveDate; DAYS_PER_WEEK] = std::array::from_fn(|i| {
        monday
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(NaiveDate::MAX)
    });

    WeekWindow {
        anchor_date: date,
        days,
        selected_date: date,
    }
}

/// Adds whole weeks as calendar days. Saturates at the representable bounds.
pub fn advance_weeks(anchor: NaiveDate, delta_weeks: i64) -> NaiveDate {
    if delta_weeks == 0 {
        return anchor;
    }

    TimeDelta::try_weeks(delta_weeks)
        .and_then(|delta| anchor.checked_add_signed(delta))
        .unwrap_or(if delta_weeks > 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        })
}

pub struct CalendarWeekEngine<C = SystemClock> {
    clock: C,
    zone: FixedOffset,
}

impl<C: Clock> CalendarWeekEngine<C> {
    pub fn new(clock: C, zone: FixedOffset) -> Self {
        Self { clock, zone }
    }

    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().calendar_day(&self.zone)
    }

    pub fn week_window_for(&self, date: NaiveDate) -> WeekWindow {
        week_window_for(date)
    }

    /// Window for the week containing today, with today selected.
    pub fn current_week(&self) -> WeekWindow {
        week_window_for(self.today())
    }

    pub fn advance_weeks(&self, anchor: NaiveDate, delta_weeks: i64) -> NaiveDate {
        advance_weeks(anchor, delta_weeks)
    }

    pub fn is_same_calendar_day<A, B>(&self, a: &A, b: &B) -> bool
    where
        A: CalendarDay + ?Sized,
        B: CalendarDay + ?Sized,
    {
        a.calendar_day(&self.zone) == b.calendar_day(&self.zone)
    }

    pub fn is_today<A: CalendarDay + ?Sized>(&self, value: &A) -> bool {
        value.calendar_day(&self.zone) == self.today()
    }
}
