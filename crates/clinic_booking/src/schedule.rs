// --- File: crates/clinic_booking/src/schedule.rs ---
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;
use clinic_common::error::{config_error, ClinicError};
use clinic_common::timezone::parse_time_zone;
use clinic_config::ScheduleConfig;

/// Typed, validated view of [`ScheduleConfig`].
#[derive(Debug, Clone)]
pub struct Schedule {
    pub time_zone: Tz,
    pub slot_duration: Duration,
    pub working_days: Vec<Weekday>,
    /// Daily windows in local time, `start < end`, sorted by start.
    pub windows: Vec<(NaiveTime, NaiveTime)>,
    pub lead_time: Option<Duration>,
}

impl Schedule {
    pub fn from_config(config: &ScheduleConfig) -> Result<Self, ClinicError> {
        let time_zone = parse_time_zone(&config.time_zone)?;

        if config.slot_minutes <= 0 {
            return Err(config_error(format!(
                "schedule.slot_minutes must be positive, got {}",
                config.slot_minutes
            )));
        }
        let slot_duration = minutes("schedule.slot_minutes", config.slot_minutes)?;

        let working_days = config
            .working_days
            .iter()
            .map(|d| {
                d.parse::<Weekday>()
                    .map_err(|_| config_error(format!("unknown weekday '{}'", d)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut windows = config
            .windows
            .iter()
            .map(|w| {
                let start = parse_window_time(&w.start)?;
                let end = parse_window_time(&w.end)?;
                if end <= start {
                    return Err(config_error(format!(
                        "schedule window {}-{} ends before it starts",
                        w.start, w.end
                    )));
                }
                Ok((start, end))
            })
            .collect::<Result<Vec<_>, ClinicError>>()?;
        windows.sort();
        if let Some(pair) = windows.windows(2).find(|pair| pair[1].0 < pair[0].1) {
            return Err(config_error(format!(
                "schedule windows {}-{} and {}-{} overlap",
                pair[0].0.format("%H:%M"),
                pair[0].1.format("%H:%M"),
                pair[1].0.format("%H:%M"),
                pair[1].1.format("%H:%M")
            )));
        }

        let lead_time = match config.lead_time_minutes {
            Some(m) if m < 0 => {
                return Err(config_error(format!(
                    "schedule.lead_time_minutes must not be negative, got {}",
                    m
                )))
            }
            Some(m) => Some(minutes("schedule.lead_time_minutes", m)?),
            None => None,
        };

        Ok(Self {
            time_zone,
            slot_duration,
            working_days,
            windows,
            lead_time,
        })
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.working_days.contains(&date.weekday())
    }

    /// Slots a full working day yields.
    pub fn slots_per_day(&self) -> usize {
        self.windows
            .iter()
            .map(|(start, end)| {
                let minutes = (*end - *start).num_minutes();
                (minutes / self.slot_duration.num_minutes()) as usize
            })
            .sum()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::Asia::Kolkata,
            slot_duration: Duration::minutes(30),
            working_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            windows: vec![
                (hm(10, 0), hm(12, 0)),
                (hm(15, 0), hm(17, 0)),
            ],
            lead_time: None,
        }
    }
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

fn minutes(key: &str, value: i64) -> Result<Duration, ClinicError> {
    Duration::try_minutes(value)
        .ok_or_else(|| config_error(format!("{} is out of range, got {}", key, value)))
}

fn parse_window_time(input: &str) -> Result<NaiveTime, ClinicError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| config_error(format!("invalid schedule time '{}', expected HH:MM", input)))
}
