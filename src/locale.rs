use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Display locale for day names, month titles and status labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn weekday_abbrev(self, weekday: Weekday) -> &'static str {
        let idx = weekday.num_days_from_monday() as usize;
        match self {
            Locale::Es => ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"][idx],
            Locale::En => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"][idx],
        }
    }

    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        let idx = weekday.num_days_from_monday() as usize;
        match self {
            Locale::Es => [
                "lunes",
                "martes",
                "miércoles",
                "jueves",
                "viernes",
                "sábado",
                "domingo",
            ][idx],
            Locale::En => [
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
            ][idx],
        }
    }

    pub fn month_name(self, month: u32) -> &'static str {
        const ES: [&str; 12] = [
            "enero",
            "febrero",
            "marzo",
            "abril",
            "mayo",
            "junio",
            "julio",
            "agosto",
            "septiembre",
            "octubre",
            "noviembre",
            "diciembre",
        ];
        const EN: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::Es => ES[idx],
            Locale::En => EN[idx],
        }
    }

    /// "enero 2024" / "January 2024"
    pub fn month_title(self, date: NaiveDate) -> String {
        format!("{} {}", self.month_name(date.month()), date.year())
    }

    /// "lunes 15 de enero" / "Monday, January 15"
    pub fn long_date(self, date: NaiveDate) -> String {
        let weekday = self.weekday_name(date.weekday());
        let month = self.month_name(date.month());
        match self {
            Locale::Es => format!("{} {} de {}", weekday, date.day(), month),
            Locale::En => format!("{}, {} {}", weekday, month, date.day()),
        }
    }

    /// Case folding used for search. Unicode-aware so accented names match
    /// regardless of case ("GESTIÓN" folds to "gestión").
    pub fn fold(self, text: &str) -> String {
        text.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_names() {
        assert_eq!(Locale::Es.weekday_abbrev(Weekday::Wed), "mié");
        assert_eq!(
            Locale::Es.month_title(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            "enero 2024"
        );
    }

    #[test]
    fn long_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
        assert_eq!(Locale::Es.long_date(date), "miércoles 17 de enero");
        assert_eq!(Locale::En.long_date(date), "Wednesday, January 17");
    }

    #[test]
    fn fold_lowers_accented_capitals() {
        assert_eq!(Locale::Es.fold("GESTIÓN Financiera"), "gestión financiera");
    }
}
