/*
 * Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

use config_binder::configs::{
    Blob, BlobStorageType, CloudStorageConfig, Compressor, GrpcClient, MySql, Net, Servers,
};
use config_binder::{Bind, Compile};
use std::collections::HashMap;

#[test]
fn partial_toml_should_leave_children_absent() {
    let net: Net = toml::from_str(
        r#"
        [dns]
        cache_enabled = true
        refresh_duration = "1m"
        cache_expiration = "10m"
        "#,
    )
    .expect("Failed to parse net config");
    assert!(net.dns.is_some());
    assert_eq!(net.dialer, None);
    assert_eq!(net.socket_option, None);
    assert_eq!(net.tls, None);
    assert_eq!(net.opts().unwrap().len(), 3);
}

#[test]
fn rpc_client_should_deserialize_with_insecure_default_dialing() {
    let client: GrpcClient = toml::from_str(
        r#"
        addrs = ["_AGENT_ADDR_", "10.0.0.2:8081"]
        health_check_duration = "10s"

        [connection_pool]
        enable_rebalance = true
        rebalance_duration = "30m"
        size = 3
        "#,
    )
    .expect("Failed to parse gRPC client config");
    assert!(client.dial_option.as_ref().is_some_and(|dial| dial.insecure));
    assert_eq!(client.tls, None);

    let env = HashMap::from([("AGENT_ADDR".to_string(), "10.0.0.1:8081".to_string())]);
    let bound = client.bind_with(&env);
    assert_eq!(bound.addrs, vec!["10.0.0.1:8081", "10.0.0.2:8081"]);
    assert!(bound.opts().is_ok());
}

#[test]
fn servers_should_deserialize_nested_tables() {
    let servers: Servers = toml::from_str(
        r#"
        full_shutdown_duration = "600s"
        startup_strategy = ["liveness", "grpc", "readiness"]

        [[servers]]
        name = "grpc"
        host = "0.0.0.0"
        port = 8081
        mode = "GRPC"

        [servers.grpc]
        bidirectional_stream_concurrency = 20

        [[health_check_servers]]
        name = "readiness"
        port = 3001
        mode = "REST"
        "#,
    )
    .expect("Failed to parse servers config");
    assert_eq!(servers.servers.len(), 1);
    assert_eq!(servers.servers[0].grpc.as_ref().map(|grpc| grpc.bidirectional_stream_concurrency), Some(20));
    let bound = servers.bind_with(&HashMap::new());
    assert!(!bound.server_opts("grpc").unwrap().is_empty());
    assert!(!bound.server_opts("readiness").unwrap().is_empty());
}

#[test]
fn json_documents_should_round_trip_through_the_schema() {
    let mysql = MySql {
        host: "mysql".to_string(),
        port: 3306,
        ..MySql::default()
    }
    .bind_with(&HashMap::new());
    let json = serde_json::to_string(&mysql).expect("Failed to serialize MySQL config");
    let parsed: MySql = serde_json::from_str(&json).expect("Failed to parse MySQL config");
    assert_eq!(parsed, mysql);
}

#[test]
fn compressor_should_read_flattened_core_fields() {
    let compressor: Compressor = toml::from_str(
        r#"
        compress_algorithm = "zstd"
        compression_level = 3
        concurrent_limit = 10
        queue_check_duration = "200ms"
        "#,
    )
    .expect("Failed to parse compressor config");
    assert_eq!(compressor.compress_core.compress_algorithm, "zstd");
    assert_eq!(compressor.compress_core.compression_level, 3);
    assert_eq!(compressor.concurrent_limit, 10);
}

#[test]
fn blob_should_deserialize_with_one_backend() {
    let blob: Blob = toml::from_str(
        r#"
        storage_type = "_BLOB_STORAGE_"
        bucket = "vald-backup"

        [s3]
        endpoint = "https://s3.us-west-2.amazonaws.com"
        region = "us-west-2"
        max_retries = 3
        max_part_size = "64mb"
        "#,
    )
    .expect("Failed to parse blob config");
    assert_eq!(blob.cloud_storage, None);

    let env = HashMap::from([("BLOB_STORAGE".to_string(), "S3".to_string())]);
    let bound = blob.bind_with(&env);
    assert_eq!(bound.storage_type(), BlobStorageType::S3);
    assert_eq!(bound.s3.as_ref().map(|s3| s3.max_retries), Some(3));
    assert_eq!(bound.cloud_storage, Some(CloudStorageConfig::default()));
}
