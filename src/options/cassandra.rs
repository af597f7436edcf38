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
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Consistency {
    Any,
    One,
    Two,
    Three,
    Quorum,
    All,
    #[strum(to_string = "local_quorum", serialize = "localquorum")]
    LocalQuorum,
    #[strum(to_string = "each_quorum", serialize = "eachquorum")]
    EachQuorum,
    #[strum(to_string = "local_one", serialize = "localone")]
    LocalOne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SerialConsistency {
    Serial,
    #[strum(to_string = "local_serial", serialize = "localserial")]
    LocalSerial,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RetryPolicy {
    pub num_retries: usize,
    pub min_duration: Duration,
    pub max_duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReconnectionPolicy {
    pub max_retries: usize,
    pub initial_interval: Duration,
}

/// Directives consumed by the columnar store driver.
#[derive(Debug, Clone)]
pub enum CassandraOption {
    Hosts(Vec<String>),
    CqlVersion(String),
    ProtoVersion(i32),
    Timeout(Duration),
    ConnectTimeout(Duration),
    Port(u16),
    Keyspace(String),
    NumConns(usize),
    Consistency(Consistency),
    SerialConsistency(SerialConsistency),
    Username(String),
    Password(String),
    RetryPolicy(RetryPolicy),
    ReconnectionPolicy(ReconnectionPolicy),
    SocketKeepalive(Duration),
    MaxPreparedStmts(usize),
    MaxRoutingKeyInfo(usize),
    PageSize(usize),
    DcAwareRouting(String),
    NonLocalReplicasFallback(bool),
    ShuffleReplicas(bool),
    TokenAwareHostPolicy(bool),
    HostFilter { data_center: String, white_list: Vec<String> },
    EnableHostVerification(bool),
    DefaultTimestamp(bool),
    ReconnectInterval(Duration),
    MaxWaitSchemaAgreement(Duration),
    IgnorePeerAddr(bool),
    DisableInitialHostLookup(bool),
    DisableNodeStatusEvents(bool),
    DisableTopologyEvents(bool),
    DisableSchemaEvents(bool),
    DisableSkipMetadata(bool),
    DefaultIdempotence(bool),
    WriteCoalesceWaitTime(Duration),
    Tls(Arc<ClientConfig>),
    Dialer(Vec<DialerOption>),
}
