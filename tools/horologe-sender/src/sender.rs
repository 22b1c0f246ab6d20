use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use horologe_hal::UartTx;
use horologe_protocol::TimeMessage;
use tracing::info;

use crate::clock::message_for;

/// When to send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Delay between messages
    pub interval: Duration,
    /// Number of messages to send, 0 for no limit
    pub count: u64,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            count: 0,
        }
    }
}

/// Encode and write one message, terminator included
pub fn send_message<T>(tx: &mut T, message: &TimeMessage) -> Result<()>
where
    T: UartTx,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    let line = message.encode_to_vec().context("failed to encode message")?;
    tx.write_all(&line).context("serial write failed")?;
    tx.flush().context("serial flush failed")?;
    Ok(())
}

/// Send the current time on a schedule
///
/// `now` supplies the wall-clock time for each message and `sleep` waits
/// between them; `sleep` returning `Break` stops the loop early. Returns the
/// number of messages sent.
pub fn run<T, N, S>(tx: &mut T, schedule: &Schedule, mut now: N, mut sleep: S) -> Result<u64>
where
    T: UartTx,
    T::Error: std::error::Error + Send + Sync + 'static,
    N: FnMut() -> NaiveDateTime,
    S: FnMut(Duration) -> ControlFlow<()>,
{
    let mut sent = 0u64;

    loop {
        let message = message_for(&now())?;
        send_message(tx, &message)?;
        sent += 1;
        info!(line = %message, "Sent time");

        if schedule.count != 0 && sent >= schedule.count {
            return Ok(sent);
        }
        if sleep(schedule.interval).is_break() {
            info!(sent, "Stopped by user");
            return Ok(sent);
        }
    }
}
