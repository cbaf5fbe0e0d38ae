use serde::Serialize;
use std::fmt::{self, Display};

mod info;

pub use info::DeviceInfo;

/// Prefixes that mark a model code as a device identifier rather than a SKU.
pub static DEVICE_FAMILY_PREFIXES: [&str; 5] = ["iPhone", "iPod", "iPad", "AppleTV", "Watch"];

/// The synthetic identifier for the Simulator pseudo-device.
pub static SIMULATOR_IDENTIFIER: &str = "x86_64";

/// Suffix marking an identifier as a simulated device, e.g.
/// `"iPhone8,1;Simulator"`.
pub static SIMULATOR_SUFFIX: &str = ";Simulator";

/// One resolved device: its model identifier and the color variants the
/// database declares for it.
///
/// An empty color list means the device has a single default variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescription {
    identifier: String,
    colors: Vec<String>,
}

impl Display for DeviceDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

impl DeviceDescription {
    pub(crate) fn new(identifier: String, colors: Vec<String>) -> Self {
        Self { identifier, colors }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}
