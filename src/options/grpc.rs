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

use crate::options::dialer::DialerOption;
use rustls::ClientConfig;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BackoffPolicy {
    pub initial_duration: Duration,
    pub backoff_time_limit: Duration,
    pub maximum_duration: Duration,
    pub jitter_limit: Duration,
    pub backoff_factor: f64,
    pub retry_count: usize,
    pub enable_error_log: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CircuitBreakerPolicy {
    pub closed_error_rate: f32,
    pub half_open_error_rate: f32,
    pub min_samples: i64,
    pub open_timeout: Duration,
    pub closed_refresh_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallPolicy {
    pub wait_for_ready: bool,
    pub max_retry_rpc_buffer_size: usize,
    pub max_recv_msg_size: usize,
    pub max_send_msg_size: usize,
    pub content_subtype: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeepalivePolicy {
    pub time: Duration,
    pub timeout: Duration,
    pub permit_without_stream: bool,
}

/// Directives consumed by the RPC client builder, in application order.
#[derive(Debug, Clone)]
pub enum GrpcOption {
    HealthCheckDuration(Duration),
    ConnectionPoolRebalanceDuration(Duration),
    ConnectionPoolSize(usize),
    OldConnCloseDuration(Duration),
    ResolveDns(bool),
    EnableConnectionPoolRebalance(bool),
    Addrs(Vec<String>),
    Backoff(BackoffPolicy),
    CircuitBreaker(CircuitBreakerPolicy),
    CallOptions(CallPolicy),
    WriteBufferSize(usize),
    ReadBufferSize(usize),
    InitialWindowSize(i32),
    InitialConnectionWindowSize(i32),
    MaxMsgSize(usize),
    BackoffMaxDelay(Duration),
    BackoffBaseDelay(Duration),
    BackoffMultiplier(f64),
    BackoffJitter(f64),
    MinConnectTimeout(Duration),
    DialTimeout(Duration),
    EnableBackoff(bool),
    Insecure(bool),
    Dialer(Vec<DialerOption>),
    Keepalive(KeepalivePolicy),
    Tls(Arc<ClientConfig>),
}
