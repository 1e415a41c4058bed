use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use keylocker::ApiServer;
use keylocker_registry::SharedRegistry;
use keylocker_types::{Identifier, KeyToken};
use keylocker_utils::logging;
use tokio::time::sleep;

/// Spawn an initialized API server on a free port and wait until it
/// answers health checks.
async fn start_server() -> SocketAddr {
    let registry = SharedRegistry::new();
    registry.initialize().unwrap();

    let port = portpicker::pick_unused_port().unwrap();
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    let api = ApiServer::builder().registry(registry).build();
    tokio::spawn(api.serve(addr));

    let client = reqwest::Client::new();
    for _ in 0..50 {
        if let Ok(resp) = client.get(format!("http://{addr}/i/health")).send().await {
            if resp.status().is_success() {
                return addr;
            }
        }
        sleep(Duration::from_millis(20)).await;
    }
    panic!("api server did not become healthy")
}

fn random_token() -> KeyToken {
    KeyToken::from(rand::random::<[u8; 20]>())
}

#[tokio::test]
async fn social_key_roundtrip() {
    logging::init_logging();

    let addr = start_server().await;
    let client = reqwest::Client::new();

    let uuid = "0x000000000";
    let key = "0x1000000000000000000000000000000000000000";

    let resp = client
        .post(format!("http://{addr}/v1/keys"))
        .json(&serde_json::json!({ "uuid": uuid, "keys": [key] }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let set: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        set["identifier"].as_str().unwrap(),
        Identifier::derive(uuid).to_string()
    );

    let resp = client
        .get(format!("http://{addr}/v1/keys/{uuid}"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let got: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        got["identifier"].as_str().unwrap(),
        Identifier::derive(uuid).to_string()
    );
    assert_eq!(got["keys"][0].as_str().unwrap(), key);
}

#[tokio::test]
async fn overwrite_replaces_and_unknown_reads_empty() {
    logging::init_logging();

    let addr = start_server().await;
    let client = reqwest::Client::new();

    // an identifier that was never written reads back empty
    let resp = client
        .get(format!("http://{addr}/v1/keys/wallet-unknown"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let got: serde_json::Value = resp.json().await.unwrap();
    assert!(got["keys"].as_array().unwrap().is_empty());

    let first = vec![random_token(), random_token()];
    let second = vec![random_token()];

    for keys in [&first, &second] {
        let resp = client
            .post(format!("http://{addr}/v1/keys"))
            .json(&serde_json::json!({ "uuid": "wallet-1", "keys": keys }))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
    }

    let got: serde_json::Value = client
        .get(format!("http://{addr}/v1/keys/wallet-1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let keys: Vec<KeyToken> = serde_json::from_value(got["keys"].clone()).unwrap();
    assert_eq!(keys, second);
}

#[tokio::test]
async fn uninitialized_service_is_unavailable() {
    logging::init_logging();

    // serve a registry whose initialization step never ran
    let registry = SharedRegistry::new();
    let port = portpicker::pick_unused_port().unwrap();
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    let api = ApiServer::builder().registry(registry).build();
    tokio::spawn(api.serve(addr));

    let client = reqwest::Client::new();
    let mut health = None;
    for _ in 0..50 {
        if let Ok(resp) = client.get(format!("http://{addr}/i/health")).send().await {
            health = Some(resp.status());
            break;
        }
        sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(health.expect("api server did not answer").as_u16(), 503);

    let resp = client
        .get(format!("http://{addr}/v1/keys/wallet-3"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 503);

    let resp = client
        .post(format!("http://{addr}/v1/keys"))
        .json(&serde_json::json!({ "uuid": "wallet-3", "keys": [random_token()] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 503);
}

#[tokio::test]
async fn empty_key_sequence_is_rejected() {
    logging::init_logging();

    let addr = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{addr}/v1/keys"))
        .json(&serde_json::json!({ "uuid": "wallet-2", "keys": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
}
