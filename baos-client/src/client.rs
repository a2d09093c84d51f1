//! Client for the gateway's JSON web services.
//!
//! The read services for datapoints only accept a contiguous block of
//! datapoints per call. [`BaosClient::fetch_batched`] accepts any list of
//! identifiers, splits it into runs with [`compress`], issues one call per
//! run in order, and concatenates the records. The first failing call
//! aborts the whole operation and no records are returned.
//!
//! The three datapoint record kinds only differ in the service they query
//! and the record they decode, which is captured by [`RecordKind`].

use serde::de::DeserializeOwned;

use crate::config::Settings;
use crate::error::Error;
use crate::models::DatapointDescription;
use crate::models::DatapointValue;
use crate::models::DescriptionString;
use crate::models::Envelope;
use crate::models::ServerItem;
use crate::runs::compress;
use crate::runs::Run;
use crate::transport::HttpTransport;
use crate::transport::Transport;

/// The number of server items requested by [`BaosClient::get_server_item`].
pub const SERVER_ITEM_COUNT: u32 = 18;

/// A kind of per-datapoint record that can be read for a run of
/// datapoints.
pub trait RecordKind {
    /// The decoded record, one per datapoint in the run.
    type Record: DeserializeOwned;

    /// The name of the gateway service.
    const SERVICE: &'static str;

    /// The service query that reads the records for the given run.
    fn query(run: Run) -> String {
        format!(
            "{}?DatapointStart={}&DatapointCount={}",
            Self::SERVICE,
            run.base(),
            run.length()
        )
    }
}

/// Type and configuration flags of datapoints, read from
/// `getDatapointDescription`.
#[derive(Debug, Clone, Copy)]
pub struct Descriptions;

impl RecordKind for Descriptions {
    type Record = DatapointDescription;
    const SERVICE: &'static str = "getDatapointDescription";
}

/// Human readable labels of datapoints, read from `getDescriptionString`.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionStrings;

impl RecordKind for DescriptionStrings {
    type Record = DescriptionString;
    const SERVICE: &'static str = "getDescriptionString";
}

/// Current values of datapoints, read from `getDatapointValue` in the
/// gateway's default format.
#[derive(Debug, Clone, Copy)]
pub struct Values;

impl RecordKind for Values {
    type Record = DatapointValue;
    const SERVICE: &'static str = "getDatapointValue";

    fn query(run: Run) -> String {
        format!(
            "{}?DatapointStart={}&DatapointCount={}&Format=Default",
            Self::SERVICE,
            run.base(),
            run.length()
        )
    }
}

/// A value to write to a single datapoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteValue {
    /// DPT1, a boolean switch.
    Dpt1(bool),
    /// DPT5, an unsigned 8 bit value.
    Dpt5(u8),
}

impl WriteValue {
    /// The KNX datapoint type main number.
    pub fn dpt(&self) -> u8 {
        match self {
            WriteValue::Dpt1(_) => 1,
            WriteValue::Dpt5(_) => 5,
        }
    }

    fn query_value(&self) -> String {
        match self {
            WriteValue::Dpt1(value) => value.to_string(),
            WriteValue::Dpt5(value) => value.to_string(),
        }
    }
}

/// Client for a single gateway.
#[derive(Debug, Clone)]
pub struct BaosClient<T = HttpTransport> {
    transport: T,
}

impl BaosClient<HttpTransport> {
    /// Create a client for the gateway described by the given settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, Error> {
        let transport = HttpTransport::new(settings.gateway.url.clone(), settings.gateway.timeout)?;
        Ok(Self::new(transport))
    }
}

impl<T: Transport> BaosClient<T> {
    /// Create a client that talks to the gateway through the given
    /// transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue the given service query and decode the envelope of the
    /// response. An envelope with `Result: false` is returned as
    /// [`Error::Remote`].
    #[tracing::instrument(skip(self))]
    pub async fn get_envelope(&self, query: &str) -> Result<Envelope, Error> {
        let body = self.transport.get(query).await?;

        let envelope: Envelope = serde_json::from_slice(&body)
            .map_err(|err| Error::DecodeEnvelope(err, query.to_string()))?;

        if !envelope.result {
            let error = envelope.error.unwrap_or_default();
            tracing::warn!(service = %envelope.service, %error, "Gateway rejected the request");
            return Err(Error::Remote {
                query: query.to_string(),
                service: envelope.service,
                error,
            });
        }

        Ok(envelope)
    }

    /// Fetch basic information about the gateway.
    pub async fn get_server_item(&self) -> Result<ServerItem, Error> {
        let query = format!("getServerItem?ItemStart=1&ItemCount={SERVER_ITEM_COUNT}");
        self.get_envelope(&query)
            .await?
            .decode_data()
            .map_err(|err| Error::DecodePayload(err, query))
    }

    /// Fetch the records of one kind for a single run of datapoints.
    ///
    /// The gateway must answer with exactly one record per datapoint in
    /// the run, otherwise [`Error::RecordCountMismatch`] is returned.
    #[tracing::instrument(skip_all, fields(service = K::SERVICE, %run))]
    pub async fn fetch_run<K: RecordKind>(&self, run: Run) -> Result<Vec<K::Record>, Error> {
        let query = K::query(run);
        let records: Vec<K::Record> = self
            .get_envelope(&query)
            .await?
            .decode_data()
            .map_err(|err| Error::DecodePayload(err, query.clone()))?;

        let expected = run.length() as usize;
        if records.len() != expected {
            return Err(Error::RecordCountMismatch {
                query,
                expected,
                actual: records.len(),
            });
        }

        Ok(records)
    }

    /// Fetch the records of one kind for an arbitrary list of datapoints,
    /// using one call per run of consecutive identifiers.
    ///
    /// The records are returned in the order of the runs, and within a run
    /// in the order the gateway returns them. Runs are fetched one after
    /// the other, and the first error is returned without any records.
    pub async fn fetch_batched<K: RecordKind>(
        &self,
        datapoints: &[u32],
    ) -> Result<Vec<K::Record>, Error> {
        let runs = compress(datapoints);
        tracing::debug!(
            service = K::SERVICE,
            datapoints = datapoints.len(),
            runs = runs.len(),
            "Fetching datapoints in runs"
        );

        let mut records = Vec::with_capacity(datapoints.len());
        for run in runs {
            records.extend(self.fetch_run::<K>(run).await?);
        }

        Ok(records)
    }

    /// Fetch the descriptions of the given datapoints.
    pub async fn get_datapoint_descriptions(
        &self,
        datapoints: &[u32],
    ) -> Result<Vec<DatapointDescription>, Error> {
        self.fetch_batched::<Descriptions>(datapoints).await
    }

    /// Fetch the description strings of the given datapoints.
    pub async fn get_description_strings(
        &self,
        datapoints: &[u32],
    ) -> Result<Vec<DescriptionString>, Error> {
        self.fetch_batched::<DescriptionStrings>(datapoints).await
    }

    /// Fetch the current values of the given datapoints.
    pub async fn get_datapoint_values(
        &self,
        datapoints: &[u32],
    ) -> Result<Vec<DatapointValue>, Error> {
        self.fetch_batched::<Values>(datapoints).await
    }

    /// Write a value to a single datapoint.
    #[tracing::instrument(skip(self))]
    pub async fn set_datapoint_value(
        &self,
        datapoint: u32,
        value: WriteValue,
    ) -> Result<Envelope, Error> {
        let query = format!(
            "setDatapointValue?Datapoint={}&Format=DPT{}&Length=1&Value={}",
            datapoint,
            value.dpt(),
            value.query_value()
        );
        self.get_envelope(&query).await
    }
}
