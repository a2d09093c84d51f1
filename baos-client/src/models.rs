//! Response shapes of the gateway's JSON web services.
//!
//! Every response is wrapped in an [`Envelope`]. Its `Data` member is kept
//! undecoded until the envelope reports success, and is then decoded into
//! one of the record types below.

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// The outer wrapper of every gateway response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope {
    /// Whether the service call succeeded.
    pub result: bool,
    /// The name of the service that answered.
    #[serde(default)]
    pub service: String,
    /// The error code reported when `result` is false.
    #[serde(default)]
    pub error: Option<String>,
    /// The service specific payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    /// Decode the payload into the given shape.
    pub fn decode_data<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data)
    }
}

/// Basic information about the gateway itself, as returned by the
/// `getServerItem` service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServerItem {
    pub hardware_type: Vec<u8>,
    pub hardware_version: u32,
    pub firmware_version: u32,
    pub knx_manufacturer_code_dev: u32,
    pub knx_manufacturer_code_app: u32,
    pub application_id: u32,
    pub application_version: u32,
    pub serial_number: Vec<u8>,
    /// Milliseconds since the last reset.
    pub time_since_reset: u64,
    pub bus_connection_state: u32,
    pub maximal_buffer_size: u32,
    pub length_of_description_string: u32,
    pub baudrate: u32,
    pub current_buffer_size: u32,
    pub programming_mode: u32,
    pub protocol_version: u32,
    pub indication_sending: u32,
    pub protocol_version_web_services: u32,
}

impl ServerItem {
    /// The serial number as dot separated decimal bytes, e.g. `0.197.1.1.23.42`.
    pub fn serial_number_string(&self) -> String {
        self.serial_number
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// The type description of a single datapoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatapointDescription {
    pub datapoint: u32,
    pub value_type: u32,
    pub configuration_flags: u32,
    /// The KNX datapoint type main number (DPT1, DPT5, ...).
    pub datapoint_type: u32,
}

/// The human readable label of a single datapoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescriptionString {
    pub datapoint: u32,
    pub description: String,
}

/// The current value of a single datapoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatapointValue {
    pub datapoint: u32,
    /// The format the value is encoded in, e.g. `DPT1`.
    pub format: String,
    pub length: u32,
    pub state: u32,
    /// The value itself. Its JSON type depends on `format`.
    pub value: serde_json::Value,
}

impl DatapointValue {
    /// Decode the raw value into a concrete type.
    pub fn decode_value<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.value)
    }
}
