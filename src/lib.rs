pub mod calendar;
pub mod data;
pub mod error;
pub mod filter;
pub mod locale;
pub mod models;
pub mod reminder;
pub mod report;
pub mod roster;

pub use calendar::{CalendarWeekEngine, Clock, FixedClock, SystemClock, WeekWindow};
pub use filter::{availability_percent, ClassFilter};
pub use locale::Locale;
pub use models::{ClassRecord, ClassStatus, Student};
