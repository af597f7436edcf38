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

pub mod blob;
pub mod cassandra;
pub mod compress;
pub mod discoverer;
pub mod grpc;
pub mod mysql;
pub mod net;
pub mod redis;
pub mod server;
pub mod tls;

pub use blob::{Blob, BlobStorageType, CloudStorageClient, CloudStorageConfig, S3Config};
pub use cassandra::{Cassandra, HostFilter, PoolConfig, ReconnectionPolicy, RetryPolicy};
pub use compress::{CompressAlgorithm, CompressCore, Compressor, CompressorRegisterer};
pub use discoverer::DiscovererClient;
pub use grpc::{
    Backoff, CallOption, CircuitBreaker, ConnectionPool, DialOption, GrpcClient,
    GrpcClientKeepalive,
};
pub use mysql::MySql;
pub use net::{Dialer, Dns, Net, SocketOption};
pub use redis::Redis;
pub use server::{GrpcServer, GrpcServerKeepalive, HttpServer, Server, Servers};
pub use tls::Tls;
