use baos_client::transport::HttpTransport;
use baos_client::BaosClient;
use baos_client::Error;
use mockito::Matcher;
use mockito::Server;

use crate::client_for;
use crate::run_query;
use crate::DESCRIPTIONS_1_33;
use crate::STRINGS_1_33;
use crate::STRINGS_INVALID;
use crate::VALUES_700_2;
use crate::VALUES_711_2;

#[tokio::test]
async fn descriptions_for_a_full_range() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/baos/getDatapointDescription")
        .match_query(run_query(1, 33))
        .with_status(200)
        .with_body(DESCRIPTIONS_1_33)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let datapoints: Vec<u32> = (1..=33).collect();
    let descriptions = client.get_datapoint_descriptions(&datapoints).await.unwrap();

    assert_eq!(descriptions.len(), 33);
    assert_eq!(descriptions[7].datapoint_type, 3);

    mock.assert_async().await;
}

#[tokio::test]
async fn description_strings_for_a_full_range() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/baos/getDescriptionString")
        .match_query(run_query(1, 33))
        .with_status(200)
        .with_body(STRINGS_1_33)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let datapoints: Vec<u32> = (1..=33).collect();
    let strings = client.get_description_strings(&datapoints).await.unwrap();

    assert_eq!(strings.len(), 33);
    assert_eq!(strings[10].description, "Jalo. N4.015 Auf/Ab");

    mock.assert_async().await;
}

#[tokio::test]
async fn invalid_run_surfaces_the_gateway_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/baos/getDescriptionString")
        .match_query(run_query(543, 3))
        .with_status(200)
        .with_body(STRINGS_INVALID)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.get_description_strings(&[543, 544, 545]).await;

    match result {
        Err(err) => {
            assert_eq!(err.remote_error(), Some("InvalidParam"));
            assert!(err.to_string().contains("InvalidParam"));
        }
        Ok(_) => panic!("expected the gateway error to be returned"),
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn values_are_fetched_per_run_with_default_format() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/baos/getDatapointValue")
        .match_query(Matcher::AllOf(vec![
            run_query(700, 2),
            Matcher::UrlEncoded("Format".into(), "Default".into()),
        ]))
        .with_status(200)
        .with_body(VALUES_700_2)
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/baos/getDatapointValue")
        .match_query(Matcher::AllOf(vec![
            run_query(711, 2),
            Matcher::UrlEncoded("Format".into(), "Default".into()),
        ]))
        .with_status(200)
        .with_body(VALUES_711_2)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let values = client
        .get_datapoint_values(&[700, 701, 711, 712])
        .await
        .unwrap();

    let ids: Vec<u32> = values.iter().map(|v| v.datapoint).collect();
    assert_eq!(ids, vec![700, 701, 711, 712]);
    assert!(values[0].decode_value::<bool>().unwrap());
    assert_eq!(values[2].decode_value::<u8>().unwrap(), 128);

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn later_runs_are_not_fetched_after_a_failure() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("GET", "/baos/getDatapointValue")
        .match_query(run_query(700, 2))
        .with_status(200)
        .with_body(r#"{"Result": false, "Service": "GetDatapointValue", "Error": "InternalError"}"#)
        .expect(1)
        .create_async()
        .await;
    let never = server
        .mock("GET", "/baos/getDatapointValue")
        .match_query(run_query(711, 2))
        .with_status(200)
        .with_body(VALUES_711_2)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.get_datapoint_values(&[700, 701, 711, 712]).await;

    assert!(matches!(result, Err(Error::Remote { ref error, .. }) if error == "InternalError"));

    failing.assert_async().await;
    never.assert_async().await;
}

#[tokio::test]
async fn server_error_page_is_an_envelope_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/baos/getDatapointDescription")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("<html><body>Internal Server Error</body></html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.get_datapoint_descriptions(&[1, 2]).await;

    assert!(matches!(result, Err(Error::DecodeEnvelope(_, _))));
}

#[tokio::test]
async fn unreachable_gateway_is_a_request_error() {
    // Nothing listens on the port once the listener is dropped.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base = format!("http://127.0.0.1:{port}/baos/");
    let client = BaosClient::new(HttpTransport::from_url_str(&base, None).unwrap());
    let result = client.get_datapoint_descriptions(&[1, 2, 5]).await;

    match result {
        Err(Error::Request(_, query)) => {
            assert_eq!(query, "getDatapointDescription?DatapointStart=1&DatapointCount=2");
        }
        other => panic!("expected a request error for the first run, got {other:?}"),
    }
}
