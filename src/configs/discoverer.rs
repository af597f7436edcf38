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

use crate::bind::{Bind, bind_or_default};
use crate::compile::Compile;
use crate::configs::grpc::GrpcClient;
use crate::env::{EnvLookup, resolve};
use crate::error::ConfigError;
use crate::options::grpc::GrpcOption;
use serde::{Deserialize, Serialize};

/// RPC client pointed at a discoverer service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscovererClient {
    pub host: String,
    pub port: u16,
    pub duration: String,
    pub client: Option<GrpcClient>,
    pub agent_client_options: Option<GrpcClient>,
}

impl DiscovererClient {
    /// The `host:port` address of the discoverer, if both parts are set.
    pub fn address(&self) -> Option<String> {
        if self.host.is_empty() || self.port == 0 {
            return None;
        }
        Some(join_host_port(&self.host, self.port))
    }
}

pub(crate) fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

impl Bind for DiscovererClient {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        let mut discoverer = DiscovererClient {
            host: resolve(&self.host, env),
            duration: resolve(&self.duration, env),
            ..self
        };
        let mut client = discoverer.client.take().unwrap_or_default();
        if let Some(address) = discoverer.address() {
            client.addrs.push(address);
        }
        discoverer.client = Some(client.bind_with(env));
        discoverer.agent_client_options = bind_or_default(discoverer.agent_client_options, env);
        discoverer
    }
}

impl Compile for DiscovererClient {
    type Directive = GrpcOption;

    fn opts(&self) -> Result<Vec<GrpcOption>, ConfigError> {
        self.client.opts()
    }
}
