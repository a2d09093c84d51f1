use baos_client::transport::HttpTransport;
use baos_client::BaosClient;
use mockito::Matcher;
use mockito::ServerGuard;

mod datapoints;

pub const SERVER_ITEM: &str = include_str!("../fixtures/getServerItem.json");
pub const DESCRIPTIONS_1_33: &str = include_str!("../fixtures/getDatapointDescription-1-33.json");
pub const STRINGS_1_33: &str = include_str!("../fixtures/getDescriptionString-1-33.json");
pub const STRINGS_INVALID: &str = include_str!("../fixtures/getDescriptionString-invalid.json");
pub const VALUES_700_2: &str = include_str!("../fixtures/getDatapointValue-700-2.json");
pub const VALUES_711_2: &str = include_str!("../fixtures/getDatapointValue-711-2.json");

/// A client pointed at the `/baos/` path of the given mock server.
pub fn client_for(server: &ServerGuard) -> BaosClient {
    let base = format!("{}/baos/", server.url());
    let transport = HttpTransport::from_url_str(&base, None).unwrap();
    BaosClient::new(transport)
}

/// Matches the `DatapointStart` and `DatapointCount` query parameters of a
/// run.
pub fn run_query(start: u32, count: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("DatapointStart".into(), start.to_string()),
        Matcher::UrlEncoded("DatapointCount".into(), count.to_string()),
    ])
}
