// --- File: crates/clinic_wizard/src/calendar.rs ---
//! Month grid for the date-selection step.
use chrono::{Datelike, Months, NaiveDate, Weekday};
use std::fmt::Write as _;

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Weekdays from today on. Weekends and past days cannot be booked.
pub fn is_bookable_date(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today && !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub disabled: bool,
    pub selected: bool,
}

/// One month laid out Sunday-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st.
    pub leading_blanks: usize,
    pub days: Vec<CalendarDay>,
    today: NaiveDate,
    selected: Option<NaiveDate>,
}

impl MonthView {
    /// `None` when `year`/`month` is not a real month.
    pub fn new(
        year: i32,
        month: u32,
        today: NaiveDate,
        selected: Option<NaiveDate>,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self::containing(first, today, selected))
    }

    /// The month `date` falls in.
    pub fn containing(date: NaiveDate, today: NaiveDate, selected: Option<NaiveDate>) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let days = first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .map(|date| CalendarDay {
                date,
                disabled: !is_bookable_date(date, today),
                selected: selected == Some(date),
            })
            .collect();

        Self {
            year: first.year(),
            month: first.month(),
            leading_blanks: first.weekday().num_days_from_sunday() as usize,
            days,
            today,
            selected,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.days.first().map(|d| d.date).unwrap_or(self.today)
    }

    pub fn previous(&self) -> Self {
        self.shifted(-1)
    }

    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    fn shifted(&self, months: i32) -> Self {
        let first = self.first_day();
        let target = if months < 0 {
            first.checked_sub_months(Months::new(months.unsigned_abs()))
        } else {
            first.checked_add_months(Months::new(months as u32))
        };
        match target {
            Some(date) => Self::containing(date, self.today, self.selected),
            None => self.clone(),
        }
    }

    pub fn selectable_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().filter(|d| !d.disabled).map(|d| d.date)
    }

    /// `October 2026`
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Text grid: `[dd]` selected, `(dd)` unavailable.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:^35}", self.title());
        for name in DAY_NAMES {
            let _ = write!(out, "{:>5}", name);
        }
        out.push('\n');

        let mut column = 0;
        for _ in 0..self.leading_blanks {
            out.push_str("     ");
            column += 1;
        }
        for day in &self.days {
            let n = day.date.day();
            let cell = if day.selected {
                format!("[{:>2}]", n)
            } else if day.disabled {
                format!("({:>2})", n)
            } else {
                format!(" {:>2} ", n)
            };
            let _ = write!(out, " {}", cell);
            column += 1;
            if column % 7 == 0 {
                out.push('\n');
            }
        }
        if column % 7 != 0 {
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn october_2026_starts_on_thursday() {
        let view = MonthView::new(2026, 10, date(2026, 10, 1), None).unwrap();
        assert_eq!(view.leading_blanks, 4);
        assert_eq!(view.days.len(), 31);
        assert_eq!(view.title(), "October 2026");
    }

    #[test]
    fn past_days_and_weekends_are_disabled() {
        let today = date(2026, 10, 14); // Wednesday
        let view = MonthView::new(2026, 10, today, None).unwrap();

        let disabled = |d: u32| view.days[(d - 1) as usize].disabled;
        assert!(disabled(13));
        assert!(!disabled(14));
        assert!(!disabled(16));
        assert!(disabled(17)); // Saturday
        assert!(disabled(18)); // Sunday
        assert!(!disabled(19));
    }

    #[test]
    fn selected_day_is_flagged() {
        let today = date(2026, 10, 1);
        let view = MonthView::new(2026, 10, today, Some(date(2026, 10, 20))).unwrap();
        let selected: Vec<_> = view.days.iter().filter(|d| d.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, date(2026, 10, 20));
        assert!(view.render().contains("[20]"));
    }

    #[test]
    fn navigation_wraps_years() {
        let today = date(2026, 12, 1);
        let december = MonthView::new(2026, 12, today, None).unwrap();

        let january = december.next();
        assert_eq!((january.year, january.month), (2027, 1));
        assert_eq!(january.previous(), december);

        let february = january.next();
        assert_eq!(february.days.len(), 28);
    }

    #[test]
    fn invalid_month_is_none() {
        assert!(MonthView::new(2026, 13, date(2026, 1, 1), None).is_none());
        assert!(MonthView::new(2026, 0, date(2026, 1, 1), None).is_none());
    }

    #[test]
    fn render_has_a_row_per_week() {
        // February 2026 starts on a Sunday and has exactly four weeks
        let view = MonthView::new(2026, 2, date(2026, 1, 1), None).unwrap();
        assert_eq!(view.leading_blanks, 0);
        assert_eq!(view.render().lines().count(), 2 + 4);
    }
}
