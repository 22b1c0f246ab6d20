use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use horologe_hal::uart::{UartConfig, DEFAULT_BAUDRATE};
use horologe_sender::clock::{local_now, message_for};
use horologe_sender::link::{describe, list_ports, resolve_port, SerialLink};
use horologe_sender::sender::{run, send_message, Schedule};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// horologe-sender – feeds the local time to a Horologe clock display.
#[derive(Parser, Debug)]
#[command(name = "horologe-sender", version)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Send the current time repeatedly.
    Send {
        #[command(flatten)]
        port: PortArgs,
        /// Delay between updates, e.g. 60s/5m.
        #[arg(long, value_parser = humantime::parse_duration, default_value = "60s")]
        interval: Duration,
        /// Stop after N updates (0 = run until interrupted).
        #[arg(long, default_value = "0")]
        count: u64,
        /// Wait after opening the port; many boards reset when it opens.
        #[arg(long, value_parser = humantime::parse_duration, default_value = "2s")]
        settle: Duration,
    },
    /// Send the current time once and exit.
    Once {
        #[command(flatten)]
        port: PortArgs,
        /// Wait after opening the port; many boards reset when it opens.
        #[arg(long, value_parser = humantime::parse_duration, default_value = "2s")]
        settle: Duration,
    },
    /// List detected serial ports.
    ListPorts,
    /// Print the line that would be sent now.
    Preview,
}

#[derive(Args, Debug)]
struct PortArgs {
    /// Serial port, e.g. /dev/ttyACM0 or COM4. Auto-detected when there is a single USB port.
    #[arg(long, env = "HOROLOGE_PORT")]
    port: Option<String>,
    /// Baud rate; must match the display firmware.
    #[arg(long, env = "HOROLOGE_BAUD", default_value_t = DEFAULT_BAUDRATE)]
    baud: u32,
}

impl PortArgs {
    fn open(&self, settle: Duration) -> Result<SerialLink> {
        let available = if self.port.is_some() {
            Vec::new()
        } else {
            list_ports()?
        };
        let path = resolve_port(self.port.as_deref(), &available)?;
        let link = SerialLink::open(&path, &UartConfig::with_baudrate(self.baud))?;

        if !settle.is_zero() {
            info!(
                settle = %humantime::format_duration(settle),
                "Waiting for the display to reset"
            );
            std::thread::sleep(settle);
        }
        Ok(link)
    }
}

/// Channel that receives one message when Ctrl+C is pressed
fn interrupt_channel() -> Result<Receiver<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()?;
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || match runtime.block_on(tokio::signal::ctrl_c()) {
        Ok(()) => {
            let _ = tx.send(());
        }
        Err(e) => warn!(error = %e, "Ctrl+C handler unavailable"),
    });
    Ok(rx)
}

/// Wait out one interval, breaking early on Ctrl+C
fn sleep_or_interrupt(interrupt: &Receiver<()>, interval: Duration) -> ControlFlow<()> {
    match interrupt.recv_timeout(interval) {
        Ok(()) => ControlFlow::Break(()),
        Err(RecvTimeoutError::Timeout) => ControlFlow::Continue(()),
        // No handler installed; fall back to a plain sleep
        Err(RecvTimeoutError::Disconnected) => {
            std::thread::sleep(interval);
            ControlFlow::Continue(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Send {
            port,
            interval,
            count,
            settle,
        } => {
            let mut link = port.open(settle)?;
            let interrupt = interrupt_channel()?;
            let schedule = Schedule { interval, count };
            info!(
                port = link.name(),
                interval = %humantime::format_duration(interval),
                "Sending time updates, Ctrl+C to stop"
            );
            let sent = run(&mut link, &schedule, local_now, |interval| {
                sleep_or_interrupt(&interrupt, interval)
            })?;
            info!(sent, "Done");
        }
        Cmd::Once { port, settle } => {
            let mut link = port.open(settle)?;
            let message = message_for(&local_now())?;
            send_message(&mut link, &message)?;
            info!(port = link.name(), line = %message, "Sent time");
        }
        Cmd::ListPorts => {
            let ports = list_ports()?;
            if ports.is_empty() {
                println!("no serial ports found");
            }
            for port in &ports {
                println!("{}", describe(port));
            }
        }
        Cmd::Preview => {
            println!("{}", message_for(&local_now())?);
        }
    }

    Ok(())
}
