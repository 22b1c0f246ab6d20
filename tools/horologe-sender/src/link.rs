use std::io::Write;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use horologe_hal::{DataBits, Parity, StopBits, UartConfig, UartTx};
use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use tracing::{debug, info};

/// Write timeout for the serial port
const WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// Open serial connection to the display
pub struct SerialLink {
    name: String,
    port: Box<dyn SerialPort>,
}

impl SerialLink {
    /// Open `path` with the given line settings
    pub fn open(path: &str, config: &UartConfig) -> Result<Self> {
        let port = serialport::new(path, config.baudrate)
            .data_bits(match config.data_bits {
                DataBits::Seven => serialport::DataBits::Seven,
                DataBits::Eight => serialport::DataBits::Eight,
            })
            .parity(match config.parity {
                Parity::None => serialport::Parity::None,
                Parity::Even => serialport::Parity::Even,
                Parity::Odd => serialport::Parity::Odd,
            })
            .stop_bits(match config.stop_bits {
                StopBits::One => serialport::StopBits::One,
                StopBits::Two => serialport::StopBits::Two,
            })
            .timeout(WRITE_TIMEOUT)
            .open()
            .with_context(|| format!("failed to open serial port {path}"))?;

        info!(port = path, baud = config.baudrate, "Serial port open");
        Ok(Self {
            name: path.to_string(),
            port,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl UartTx for SerialLink {
    type Error = std::io::Error;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.port.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.port.flush()
    }
}

/// Serial ports visible to the OS
pub fn list_ports() -> Result<Vec<SerialPortInfo>> {
    serialport::available_ports().context("failed to enumerate serial ports")
}

/// One-line description of a port for listings
pub fn describe(info: &SerialPortInfo) -> String {
    match &info.port_type {
        SerialPortType::UsbPort(usb) => format!(
            "{}  usb {:04x}:{:04x} {}",
            info.port_name,
            usb.vid,
            usb.pid,
            usb.product.as_deref().unwrap_or("")
        ),
        SerialPortType::PciPort => format!("{}  pci", info.port_name),
        SerialPortType::BluetoothPort => format!("{}  bluetooth", info.port_name),
        SerialPortType::Unknown => info.port_name.clone(),
    }
}

/// Pick the port to use
///
/// An explicit port wins. Otherwise the single USB serial port is used;
/// zero or several candidates is an error listing what was found.
pub fn resolve_port(explicit: Option<&str>, available: &[SerialPortInfo]) -> Result<String> {
    if let Some(port) = explicit {
        return Ok(port.to_string());
    }

    let usb: Vec<&SerialPortInfo> = available
        .iter()
        .filter(|p| matches!(p.port_type, SerialPortType::UsbPort(_)))
        .collect();

    match usb.as_slice() {
        [only] => {
            debug!(port = %only.port_name, "Auto-selected the only USB serial port");
            Ok(only.port_name.clone())
        }
        [] => bail!("no USB serial port found; pass --port or set HOROLOGE_PORT"),
        many => {
            let names: Vec<&str> = many.iter().map(|p| p.port_name.as_str()).collect();
            bail!(
                "several USB serial ports found ({}); pass --port or set HOROLOGE_PORT",
                names.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::UsbPortInfo;

    fn usb(name: &str) -> SerialPortInfo {
        SerialPortInfo {
            port_name: name.to_string(),
            port_type: SerialPortType::UsbPort(UsbPortInfo {
                vid: 0x2341,
                pid: 0x0043,
                serial_number: None,
                manufacturer: None,
                product: Some("Clock".to_string()),
            }),
        }
    }

    fn builtin(name: &str) -> SerialPortInfo {
        SerialPortInfo {
            port_name: name.to_string(),
            port_type: SerialPortType::Unknown,
        }
    }

    #[test]
    fn test_explicit_port_wins() {
        let ports = [usb("/dev/ttyACM0")];
        assert_eq!(resolve_port(Some("COM4"), &ports).unwrap(), "COM4");
    }

    #[test]
    fn test_single_usb_port_selected() {
        let ports = [builtin("/dev/ttyS0"), usb("/dev/ttyACM0")];
        assert_eq!(resolve_port(None, &ports).unwrap(), "/dev/ttyACM0");
    }

    #[test]
    fn test_no_usb_port_is_error() {
        let ports = [builtin("/dev/ttyS0")];
        assert!(resolve_port(None, &ports).is_err());
    }

    #[test]
    fn test_several_usb_ports_is_error() {
        let ports = [usb("/dev/ttyACM0"), usb("/dev/ttyUSB0")];
        let err = resolve_port(None, &ports).unwrap_err().to_string();
        assert!(err.contains("/dev/ttyACM0"));
        assert!(err.contains("/dev/ttyUSB0"));
    }

    #[test]
    fn test_describe_usb_port() {
        assert_eq!(describe(&usb("/dev/ttyACM0")), "/dev/ttyACM0  usb 2341:0043 Clock");
    }
}
