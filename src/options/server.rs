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

use crate::options::dialer::SocketFlag;
use crate::options::tls::TlsOption;
use std::time::Duration;
use strum::{Display, EnumString};

/// Protocol served by a process server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ServerMode {
    #[strum(to_string = "rest", serialize = "http")]
    Rest,
    Grpc,
    #[strum(to_string = "gql", serialize = "graphql")]
    Gql,
}

impl ServerMode {
    /// Parses a mode name, ignoring case. `http` and `graphql` are accepted as aliases.
    pub fn parse(mode: &str) -> Option<Self> {
        mode.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HttpTimeouts {
    pub shutdown_duration: Duration,
    pub handler_timeout: Duration,
    pub idle_timeout: Duration,
    pub read_header_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GrpcSettings {
    pub connection_timeout: Duration,
    pub header_table_size: u32,
    pub initial_conn_window_size: i32,
    pub initial_window_size: i32,
    pub interceptors: Vec<String>,
    pub max_header_list_size: u32,
    pub max_receive_message_size: usize,
    pub max_send_message_size: usize,
    pub read_buffer_size: usize,
    pub write_buffer_size: usize,
    pub enable_reflection: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ServerKeepalivePolicy {
    pub max_conn_idle: Duration,
    pub max_conn_age: Duration,
    pub max_conn_age_grace: Duration,
    pub time: Duration,
    pub timeout: Duration,
    pub min_time: Duration,
    pub permit_without_stream: bool,
}

/// Directives consumed by the process server builder.
#[derive(Debug)]
pub enum ServerOption {
    Name(String),
    Host(String),
    Port(u16),
    Network(String),
    SocketPath(String),
    ProbeWaitTime(Duration),
    SocketFlag(SocketFlag),
    Restart(bool),
    Mode(ServerMode),
    HttpTimeouts(HttpTimeouts),
    GrpcSettings(GrpcSettings),
    BidirectionalStreamConcurrency(usize),
    GrpcKeepalive(ServerKeepalivePolicy),
    Tls(Vec<TlsOption>),
}
