//! # Date Eligibility
//!
//! Decides which calendar days can be booked. The venue opens on weekends and
//! holidays; lodging only on Saturdays and on Sundays followed by a Monday
//! holiday (long weekends).
//!
//! Holidays come from a fixed table and must be extended by hand every year.
//! All dates are civil dates in [VENUE_TIMEZONE](consts::VENUE_TIMEZONE).

use chrono::{Datelike, Days, NaiveDate, TimeDelta, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, sync::LazyLock};

use super::{
    cart::Selections,
    catalog::{self, PlanType},
};
use crate::consts;

/// Colombian statutory holidays (Ley 51 de 1983, moved to Monday when applicable)
pub const HOLIDAYS: [&str; 36] = [
    "2026-01-01",
    "2026-01-12",
    "2026-03-23",
    "2026-04-02",
    "2026-04-03",
    "2026-05-01",
    "2026-05-18",
    "2026-06-08",
    "2026-06-15",
    "2026-06-29",
    "2026-07-20",
    "2026-08-07",
    "2026-08-17",
    "2026-10-12",
    "2026-11-02",
    "2026-11-16",
    "2026-12-08",
    "2026-12-25",
    "2027-01-01",
    "2027-01-11",
    "2027-03-22",
    "2027-03-25",
    "2027-03-26",
    "2027-05-01",
    "2027-05-10",
    "2027-05-31",
    "2027-06-07",
    "2027-07-05",
    "2027-07-20",
    "2027-08-07",
    "2027-08-16",
    "2027-10-18",
    "2027-11-01",
    "2027-11-15",
    "2027-12-08",
    "2027-12-25",
];

static HOLIDAY_SET: LazyLock<HashSet<NaiveDate>> = LazyLock::new(|| {
    HOLIDAYS
        .iter()
        .filter_map(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .collect()
});

const WEEKDAYS_ES: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS_ES: [&str; 12] = [
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

/// Kind of booking a selection represents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    #[default]
    DayPass,
    Lodging,
}

impl BookingType {
    /// Any lodging plan in the selection turns it into a lodging booking
    pub fn from_selections(selections: &Selections) -> Self {
        let has_lodging = selections.iter().any(|(key, qty)| {
            *qty > 0
                && catalog::find_plan(*key)
                    .is_some_and(|plan| plan.plan_type == PlanType::Alojamiento)
        });

        if has_lodging {
            BookingType::Lodging
        } else {
            BookingType::DayPass
        }
    }

    pub fn is_eligible(self, date: NaiveDate) -> bool {
        match self {
            BookingType::DayPass => is_open_day(date),
            BookingType::Lodging => is_lodging_eligible(date),
        }
    }

    pub fn days_ahead(self) -> u32 {
        match self {
            BookingType::DayPass => consts::DAY_PASS_DAYS_AHEAD,
            BookingType::Lodging => consts::LODGING_DAYS_AHEAD,
        }
    }

    pub fn max_dates(self) -> usize {
        match self {
            BookingType::DayPass => consts::DAY_PASS_MAX_DATES,
            BookingType::Lodging => usize::MAX,
        }
    }
}

/// Today's date at the venue
pub fn venue_today() -> NaiveDate {
    Utc::now().with_timezone(&consts::VENUE_TIMEZONE).date_naive()
}

pub fn is_holiday(date: NaiveDate) -> bool {
    HOLIDAY_SET.contains(&date)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Day pass eligibility: Saturday, Sunday or holiday
pub fn is_open_day(date: NaiveDate) -> bool {
    is_weekend(date) || is_holiday(date)
}

/// Sunday followed by a Monday holiday
pub fn is_lodging_bridge_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun && date.succ_opt().is_some_and(is_holiday)
}

/// Lodging eligibility: every Saturday and long weekend Sundays
pub fn is_lodging_eligible(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sat || is_lodging_bridge_sunday(date)
}

/// Eligible dates from tomorrow up to `days_ahead` days after `today`.
///
/// The iterator is lazy and [Clone], so it can be restarted.
pub fn available_dates(
    today: NaiveDate,
    days_ahead: u32,
    booking: BookingType,
) -> impl Iterator<Item = NaiveDate> + Clone {
    (1..=u64::from(days_ahead))
        .filter_map(move |offset| today.checked_add_days(Days::new(offset)))
        .filter(move |date| booking.is_eligible(*date))
}

/// Dates offered for `booking`, day passes are capped to the first fifteen
pub fn booking_dates(today: NaiveDate, booking: BookingType) -> Vec<NaiveDate> {
    available_dates(today, booking.days_ahead(), booking)
        .take(booking.max_dates())
        .collect()
}

/// Voucher expiry, visit date plus thirty days
pub fn expiry_date(visit_date: NaiveDate) -> NaiveDate {
    visit_date + TimeDelta::days(consts::VOUCHER_VALIDITY_DAYS)
}

/// Display only label of the day kind
pub fn day_label(date: NaiveDate) -> &'static str {
    if is_holiday(date) {
        return "Festivo";
    }

    match date.weekday() {
        Weekday::Sun => "Domingo",
        Weekday::Sat => "Sábado",
        _ => "",
    }
}

fn weekday_es(date: NaiveDate) -> &'static str {
    WEEKDAYS_ES
        .get(date.weekday().num_days_from_monday() as usize)
        .copied()
        .unwrap_or_default()
}

fn month_es(date: NaiveDate) -> &'static str {
    MONTHS_ES
        .get(date.month0() as usize)
        .copied()
        .unwrap_or_default()
}

/// `sábado, 17 de octubre de 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        weekday_es(date),
        date.day(),
        month_es(date),
        date.year()
    )
}

/// `sáb, 17 oct`
pub fn format_short_date(date: NaiveDate) -> String {
    let weekday: String = weekday_es(date).chars().take(3).collect();
    let month: String = month_es(date).chars().take(3).collect();

    format!("{weekday}, {} {month}", date.day())
}
