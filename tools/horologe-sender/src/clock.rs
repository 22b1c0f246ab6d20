use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use horologe_protocol::TimeMessage;

/// `HH:MM`, 24-hour clock
const TIME_FORMAT: &str = "%H:%M";
/// `YYYY-MM-DD`
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Full English weekday name
const WEEKDAY_FORMAT: &str = "%A";

/// Build the protocol message for a wall-clock time
pub fn message_for(now: &NaiveDateTime) -> Result<TimeMessage> {
    let time = now.format(TIME_FORMAT).to_string();
    let date = now.format(DATE_FORMAT).to_string();
    let weekday = now.format(WEEKDAY_FORMAT).to_string();
    TimeMessage::new(&time, &date, &weekday)
        .with_context(|| format!("cannot build message for {now}"))
}

/// Current local wall-clock time
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
