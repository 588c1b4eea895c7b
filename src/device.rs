use std::{fmt, future::Future, time::Duration};

use common::{LedColor, LedCommand};
use tracing::debug;

/// Why a request to the ESP32 didn't go through.
#[derive(Debug)]
pub enum DeviceError {
    /// Connection refused, DNS failure, timeout, and the like
    Request(reqwest::Error),
    /// The device answered with something other than a 2xx
    Status(u16),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) if e.is_timeout() => write!(f, "request timed out: {e}"),
            Self::Request(e) => write!(f, "request failed: {e}"),
            Self::Status(code) => write!(f, "device answered with status {code}"),
        }
    }
}

impl std::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(e) => Some(e),
            Self::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for DeviceError {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

/// Build the URL the ESP32 serves for one LED command, e.g.
/// `http://192.168.1.100/led/blue/on`.
///
/// The address is used as typed; it is not validated.
pub fn command_url(device_address: &str, color: LedColor, command: LedCommand) -> String {
    format!("http://{}/led/{}/{}", device_address, color, command)
}

/// Something that can deliver a command URL to the device.
pub trait DeviceClient: Send + Sync {
    fn send(&self, url: &str) -> impl Future<Output = Result<(), DeviceError>> + Send;
}

/// The real client: a plain GET with a bounded timeout.
#[derive(Clone, Debug)]
pub struct HttpDeviceClient {
    client: reqwest::Client,
}

impl HttpDeviceClient {
    pub fn new(timeout: Duration) -> Result<Self, DeviceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl DeviceClient for HttpDeviceClient {
    async fn send(&self, url: &str) -> Result<(), DeviceError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(DeviceError::Status(status.as_u16()));
        }

        Ok(())
    }
}
