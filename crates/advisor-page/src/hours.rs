//! Hours of operation.
//!
//! The hours data arrives as one entry per weekday with open intervals in
//! 24-hour `HH:MM` form, plus dated holiday overrides. [`render_hours`]
//! lays it out as a titled table, Monday first, with holidays after.

use std::fmt::Write;

use advisor_richtext::escape_html;
use serde::Deserialize;

use crate::record::nullable;

/// Weekly hours.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hours {
    pub monday: Option<DayHours>,
    pub tuesday: Option<DayHours>,
    pub wednesday: Option<DayHours>,
    pub thursday: Option<DayHours>,
    pub friday: Option<DayHours>,
    pub saturday: Option<DayHours>,
    pub sunday: Option<DayHours>,
    #[serde(deserialize_with = "nullable")]
    pub holiday_hours: Vec<HolidayHours>,
    /// Date the location reopens after a temporary closure.
    pub reopen_date: Option<String>,
}

/// Hours for a single day.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DayHours {
    #[serde(deserialize_with = "nullable")]
    pub is_closed: bool,
    #[serde(deserialize_with = "nullable")]
    pub open_intervals: Vec<Interval>,
}

/// Hours for a specific date overriding the weekly schedule.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HolidayHours {
    #[serde(deserialize_with = "nullable")]
    pub date: String,
    #[serde(deserialize_with = "nullable")]
    pub is_closed: bool,
    #[serde(deserialize_with = "nullable")]
    pub is_regular_hours: bool,
    #[serde(deserialize_with = "nullable")]
    pub open_intervals: Vec<Interval>,
}

/// An open interval in `HH:MM` form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Interval {
    #[serde(deserialize_with = "nullable")]
    pub start: String,
    #[serde(deserialize_with = "nullable")]
    pub end: String,
}

/// Day of the week, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// schema.org day name (`https://schema.org/Monday`).
    pub fn schema_url(self) -> String {
        format!("https://schema.org/{}", self.label())
    }
}

impl Hours {
    pub fn day(&self, day: Weekday) -> Option<&DayHours> {
        match day {
            Weekday::Monday => self.monday.as_ref(),
            Weekday::Tuesday => self.tuesday.as_ref(),
            Weekday::Wednesday => self.wednesday.as_ref(),
            Weekday::Thursday => self.thursday.as_ref(),
            Weekday::Friday => self.friday.as_ref(),
            Weekday::Saturday => self.saturday.as_ref(),
            Weekday::Sunday => self.sunday.as_ref(),
        }
    }

    /// Days present in the data, Monday first.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DayHours)> {
        Weekday::ALL
            .into_iter()
            .filter_map(move |day| self.day(day).map(|hours| (day, hours)))
    }

    /// Holiday overrides with a date, in record order.
    pub fn holidays(&self) -> impl Iterator<Item = &HolidayHours> {
        self.holiday_hours.iter().filter(|h| !h.date.is_empty())
    }

    /// True when there is nothing to show: no weekday, holiday or reopen date.
    pub fn is_empty(&self) -> bool {
        self.days().next().is_none()
            && self.holidays().next().is_none()
            && self.reopen_date.as_deref().is_none_or(str::is_empty)
    }
}

impl DayHours {
    /// Display text for the day: `Closed`, `Open 24 Hours` or the intervals.
    pub fn display(&self) -> String {
        display_intervals(self.is_closed, &self.open_intervals)
    }
}

impl HolidayHours {
    /// Display text for the date; `Regular Hours` when the weekly schedule holds.
    pub fn display(&self) -> String {
        if self.is_regular_hours && !self.is_closed {
            return "Regular Hours".to_owned();
        }
        display_intervals(self.is_closed, &self.open_intervals)
    }
}

fn display_intervals(is_closed: bool, intervals: &[Interval]) -> String {
    if is_closed || intervals.is_empty() {
        return "Closed".to_owned();
    }
    if intervals.iter().any(Interval::is_all_day) {
        return "Open 24 Hours".to_owned();
    }
    intervals
        .iter()
        .map(|interval| {
            format!(
                "{} - {}",
                format_time(&interval.start),
                format_time(&interval.end)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl Interval {
    pub fn is_all_day(&self) -> bool {
        self.start == "00:00" && self.end == "23:59"
    }
}

/// Convert `HH:MM` to 12-hour form (`17:30` → `5:30 PM`).
///
/// Values that are not `HH:MM` are returned unchanged.
pub fn format_time(value: &str) -> String {
    let parsed = value
        .split_once(':')
        .and_then(|(h, m)| Some((h.parse::<u32>().ok()?, m)))
        .filter(|(h, m)| *h < 24 && m.len() == 2 && m.chars().all(|c| c.is_ascii_digit()));
    let Some((hour, minutes)) = parsed else {
        return value.to_owned();
    };
    let (display_hour, suffix) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!("{display_hour}:{minutes} {suffix}")
}

/// Render the hours widget with a title.
pub fn render_hours(title: &str, hours: &Hours) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str("<div class=\"hours\">\n");
    let _ = writeln!(
        html,
        "<div class=\"text-xl font-semibold mb-4\">{}</div>",
        escape_html(title)
    );
    html.push_str("<table class=\"hours-table\">\n<tbody>\n");
    for (day, day_hours) in hours.days() {
        let _ = writeln!(
            html,
            "<tr class=\"hours-row\"><td class=\"hours-day pr-4\">{}</td>\
             <td class=\"hours-intervals\">{}</td></tr>",
            day.label(),
            escape_html(&day_hours.display()),
        );
    }
    html.push_str("</tbody>\n</table>\n");
    let mut holidays = hours.holidays().peekable();
    if holidays.peek().is_some() {
        html.push_str("<div class=\"font-semibold mt-4 mb-2\">Holiday Hours</div>\n");
        html.push_str("<table class=\"hours-table hours-holidays\">\n<tbody>\n");
        for holiday in holidays {
            let _ = writeln!(
                html,
                "<tr class=\"hours-row\"><td class=\"hours-day pr-4\">{}</td>\
                 <td class=\"hours-intervals\">{}</td></tr>",
                escape_html(&holiday.date),
                escape_html(&holiday.display()),
            );
        }
        html.push_str("</tbody>\n</table>\n");
    }
    if let Some(date) = hours.reopen_date.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(
            html,
            "<div class=\"hours-reopen mt-2\">Reopening on {}</div>",
            escape_html(date)
        );
    }
    html.push_str("</div>\n");
    html
}
