use std::path::PathBuf;

use baos_client::client::WriteValue;
use baos_client::config::Settings;
use baos_client::transport::HttpTransport;
use baos_client::BaosClient;
use clap::{Args, Parser, Subcommand};
use url::Url;

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Gateway error: {0}")]
    Gateway(#[from] baos_client::Error),
    #[error("No value to write, pass --dpt1 or --dpt5")]
    MissingWriteValue,
}

/// Query and control datapoints of a KNX BAOS gateway.
#[derive(Debug, Parser)]
struct CliArgs {
    /// Optional path to a TOML config file.
    #[clap(long, short)]
    config: Option<PathBuf>,
    /// Base URL of the gateway's web services. Overrides the config.
    #[clap(long, env = "BAOS_URL")]
    url: Option<Url>,
    /// Write human readable logs instead of JSON.
    #[clap(long)]
    pretty_logs: bool,
    #[clap(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Show basic information about the gateway
    Info,
    /// Show description and current value of datapoints
    Show(DatapointArgs),
    /// Show the type descriptions of datapoints
    Descriptions(DatapointArgs),
    /// Write a value to a single datapoint
    Set(SetArgs),
}

#[derive(Debug, Args)]
struct DatapointArgs {
    /// Comma separated datapoint identifiers, e.g. 700,701,711,712
    #[clap(value_delimiter = ',', required = true)]
    datapoints: Vec<u32>,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// The datapoint to write.
    datapoint: u32,
    #[command(flatten)]
    value: ValueArgs,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct ValueArgs {
    /// Write a DPT1 (boolean) value.
    #[clap(long)]
    dpt1: Option<bool>,
    /// Write a DPT5 (unsigned 8 bit) value.
    #[clap(long)]
    dpt5: Option<u8>,
}

impl ValueArgs {
    fn write_value(&self) -> Result<WriteValue, Error> {
        match (self.dpt1, self.dpt5) {
            (Some(value), _) => Ok(WriteValue::Dpt1(value)),
            (_, Some(value)) => Ok(WriteValue::Dpt5(value)),
            (None, None) => Err(Error::MissingWriteValue),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = CliArgs::parse();
    baos_client::logging::setup_logging(args.pretty_logs);

    let mut settings = Settings::new(args.config.as_ref())?;
    if let Some(url) = args.url {
        settings.gateway.url = url;
    }

    let client = BaosClient::from_settings(&settings)?;

    match args.command {
        CliCommand::Info => info(&client).await?,
        CliCommand::Show(args) => show(&client, &args.datapoints).await?,
        CliCommand::Descriptions(args) => descriptions(&client, &args.datapoints).await?,
        CliCommand::Set(args) => {
            let value = args.value.write_value()?;
            client.set_datapoint_value(args.datapoint, value).await?;
            println!("{} <- {:?}", args.datapoint, value);
        }
    }

    Ok(())
}

async fn info(client: &BaosClient<HttpTransport>) -> Result<(), baos_client::Error> {
    let item = client.get_server_item().await?;
    println!(
        "{} fw:{} sn:{}",
        client.transport().base_url(),
        item.firmware_version,
        item.serial_number_string()
    );
    Ok(())
}

async fn show(
    client: &BaosClient<HttpTransport>,
    datapoints: &[u32],
) -> Result<(), baos_client::Error> {
    let strings = client.get_description_strings(datapoints).await?;
    let values = client.get_datapoint_values(datapoints).await?;

    for (value, string) in values.iter().zip(&strings) {
        println!(
            "{:5} {:>5} \"{}\": {}",
            value.datapoint, value.format, string.description, value.value
        );
    }
    Ok(())
}

async fn descriptions(
    client: &BaosClient<HttpTransport>,
    datapoints: &[u32],
) -> Result<(), baos_client::Error> {
    for desc in client.get_datapoint_descriptions(datapoints).await? {
        println!(
            "{:5} dpt:{:<3} type:{:<3} flags:{:#04x}",
            desc.datapoint, desc.datapoint_type, desc.value_type, desc.configuration_flags
        );
    }
    Ok(())
}
