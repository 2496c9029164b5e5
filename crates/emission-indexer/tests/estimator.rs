// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end estimation runs against a mocked explorer API.

use alloy::primitives::U256;
use emission_indexer::{EmissionConfig, EmissionService, ScanClient, ServiceError};
use httpmock::prelude::*;

fn test_config(query_count: u64) -> EmissionConfig {
    EmissionConfig {
        token_symbol: "TEST".to_string(),
        first_block: 100,
        window_size: 100,
        query_count,
        decimals: 0,
        burn_ratio: 0.0,
        ..Default::default()
    }
}

fn test_service(server: &MockServer, config: EmissionConfig) -> EmissionService {
    let client = ScanClient::new(server.base_url().parse().unwrap(), "TESTKEY").unwrap();
    EmissionService::new(client, config).unwrap()
}

#[tokio::test]
async fn test_estimation_sums_all_windows() {
    let server = MockServer::start();

    let first = server.mock(|when, then| {
        when.method(GET).path("/api").query_param("fromBlock", "100").query_param("toBlock", "199");
        then.status(200).header("content-type", "application/json").json_body(serde_json::json!({
            "status": "1",
            "message": "OK",
            "result": [{ "data": "0x1" }, { "data": "0x2" }]
        }));
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/api").query_param("fromBlock", "200").query_param("toBlock", "299");
        then.status(200).header("content-type", "application/json").json_body(serde_json::json!({
            "status": "1",
            "message": "OK",
            "result": [{ "data": "0x3" }]
        }));
    });
    // An empty window is reported as a rejection by the explorer but is data,
    // not a failure.
    let third = server.mock(|when, then| {
        when.method(GET).path("/api").query_param("fromBlock", "300").query_param("toBlock", "399");
        then.status(200).header("content-type", "application/json").json_body(serde_json::json!({
            "status": "0",
            "message": "No records found",
            "result": []
        }));
    });

    let service = test_service(&server, test_config(3));
    let estimate = service.run().await.unwrap();

    first.assert();
    second.assert();
    third.assert();

    assert_eq!(estimate.minted_raw, U256::from(6));
    assert_eq!(estimate.emitted, 6.0);
    assert_eq!(estimate.first_block, 100);
    assert_eq!(estimate.final_block, 400);
    assert_eq!(
        estimate.summary("TEST"),
        "6.000 TEST emitted from block 100 to block 400."
    );
}

#[tokio::test]
async fn test_burn_adjustment_is_applied() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api").query_param("fromBlock", "100");
        then.status(200).header("content-type", "application/json").json_body(serde_json::json!({
            "status": "1",
            "message": "OK",
            "result": [{ "data": "0x2" }, { "data": "0x4" }]
        }));
    });

    let config = EmissionConfig { burn_ratio: 0.5, ..test_config(1) };
    let service = test_service(&server, config);
    let estimate = service.run().await.unwrap();

    assert_eq!(estimate.minted, 6.0);
    assert_eq!(estimate.emitted, 3.0);
}

#[tokio::test]
async fn test_one_failed_query_fails_the_run() {
    let server = MockServer::start();

    for from in ["100", "300"] {
        server.mock(|when, then| {
            when.method(GET).path("/api").query_param("fromBlock", from);
            then.status(200).header("content-type", "application/json").json_body(
                serde_json::json!({
                    "status": "1",
                    "message": "OK",
                    "result": [{ "data": "0x1" }]
                }),
            );
        });
    }
    server.mock(|when, then| {
        when.method(GET).path("/api").query_param("fromBlock", "200");
        then.status(503);
    });

    let service = test_service(&server, test_config(3));
    let err = service.run().await.unwrap_err();
    assert!(matches!(err, ServiceError::Scan(_)));
}

#[tokio::test]
async fn test_rate_limited_query_fails_the_run() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api").query_param("fromBlock", "100");
        then.status(200).header("content-type", "application/json").json_body(serde_json::json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Max rate limit reached"
        }));
    });

    let service = test_service(&server, test_config(1));
    assert!(service.run().await.is_err());
}

#[tokio::test]
async fn test_degenerate_range_yields_zero_estimate() {
    let server = MockServer::start();

    let service = test_service(&server, test_config(0));
    let estimate = service.run().await.unwrap();

    assert_eq!(estimate.minted_raw, U256::ZERO);
    assert_eq!(estimate.emitted, 0.0);
    assert_eq!(estimate.final_block, 100);
}

#[tokio::test]
async fn test_invalid_burn_ratio_is_rejected_at_construction() {
    let server = MockServer::start();
    let client = ScanClient::new(server.base_url().parse().unwrap(), "TESTKEY").unwrap();
    let config = EmissionConfig { burn_ratio: 1.5, ..test_config(1) };
    assert!(matches!(
        EmissionService::new(client, config),
        Err(ServiceError::InvalidConfig(_))
    ));
}
