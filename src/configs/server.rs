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

use crate::bind::{Bind, bind_each, bind_or_default, bind_present};
use crate::compile::{Compile, parse_duration};
use crate::configs::net::{SocketOption, socket_flag};
use crate::configs::tls::Tls;
use crate::env::{EnvLookup, resolve, resolve_all};
use crate::error::ConfigError;
use crate::options::server::{
    GrpcSettings, HttpTimeouts, ServerKeepalivePolicy, ServerMode, ServerOption,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Servers {
    pub servers: Vec<Server>,
    pub health_check_servers: Vec<Server>,
    pub metrics_servers: Vec<Server>,
    pub startup_strategy: Vec<String>,
    pub shutdown_strategy: Vec<String>,
    pub full_shutdown_duration: String,
    pub tls: Option<Tls>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub name: String,
    pub network: String,
    pub host: String,
    pub port: u16,
    pub socket_path: String,
    pub mode: String,
    pub probe_wait_time: String,
    pub http: Option<HttpServer>,
    pub grpc: Option<GrpcServer>,
    pub socket_option: Option<SocketOption>,
    pub restart: bool,
    pub tls: Option<Tls>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServer {
    pub shutdown_duration: String,
    pub handler_timeout: String,
    pub idle_timeout: String,
    pub read_header_timeout: String,
    pub read_timeout: String,
    pub write_timeout: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcServer {
    pub bidirectional_stream_concurrency: usize,
    pub connection_timeout: String,
    pub header_table_size: u32,
    pub initial_conn_window_size: i32,
    pub initial_window_size: i32,
    pub interceptors: Vec<String>,
    pub keepalive: Option<GrpcServerKeepalive>,
    pub max_header_list_size: u32,
    pub max_receive_message_size: usize,
    pub max_send_message_size: usize,
    pub read_buffer_size: usize,
    pub write_buffer_size: usize,
    pub enable_reflection: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcServerKeepalive {
    pub max_conn_idle: String,
    pub max_conn_age: String,
    pub max_conn_age_grace: String,
    pub time: String,
    pub timeout: String,
    pub min_time: String,
    pub permit_without_stream: bool,
}

impl Bind for Servers {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        Servers {
            servers: bind_each(self.servers, env),
            health_check_servers: bind_each(self.health_check_servers, env),
            metrics_servers: bind_each(self.metrics_servers, env),
            startup_strategy: resolve_all(&self.startup_strategy, env),
            shutdown_strategy: resolve_all(&self.shutdown_strategy, env),
            full_shutdown_duration: resolve(&self.full_shutdown_duration, env),
            tls: bind_or_default(self.tls, env),
        }
    }
}

impl Bind for Server {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        Server {
            name: resolve(&self.name, env),
            network: resolve(&self.network, env),
            host: resolve(&self.host, env),
            socket_path: resolve(&self.socket_path, env),
            mode: resolve(&self.mode, env),
            probe_wait_time: resolve(&self.probe_wait_time, env),
            http: bind_or_default(self.http, env),
            grpc: bind_or_default(self.grpc, env),
            socket_option: bind_or_default(self.socket_option, env),
            tls: bind_or_default(self.tls, env),
            ..self
        }
    }
}

impl Bind for HttpServer {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        HttpServer {
            shutdown_duration: resolve(&self.shutdown_duration, env),
            handler_timeout: resolve(&self.handler_timeout, env),
            idle_timeout: resolve(&self.idle_timeout, env),
            read_header_timeout: resolve(&self.read_header_timeout, env),
            read_timeout: resolve(&self.read_timeout, env),
            write_timeout: resolve(&self.write_timeout, env),
        }
    }
}

impl Bind for GrpcServer {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        GrpcServer {
            connection_timeout: resolve(&self.connection_timeout, env),
            interceptors: resolve_all(&self.interceptors, env),
            keepalive: bind_present(self.keepalive, env),
            ..self
        }
    }
}

impl Bind for GrpcServerKeepalive {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        GrpcServerKeepalive {
            max_conn_idle: resolve(&self.max_conn_idle, env),
            max_conn_age: resolve(&self.max_conn_age, env),
            max_conn_age_grace: resolve(&self.max_conn_age_grace, env),
            time: resolve(&self.time, env),
            timeout: resolve(&self.timeout, env),
            min_time: resolve(&self.min_time, env),
            ..self
        }
    }
}

impl Server {
    /// The configured protocol, or `None` when the mode name is not recognized.
    pub fn server_mode(&self) -> Option<ServerMode> {
        ServerMode::parse(&self.mode)
    }

    fn opts_with_tls(&self, tls: Option<&Tls>) -> Result<Vec<ServerOption>, ConfigError> {
        let mut opts = vec![
            ServerOption::Name(self.name.clone()),
            ServerOption::Host(self.host.clone()),
            ServerOption::Port(self.port),
            ServerOption::Network(self.network.clone()),
            ServerOption::SocketPath(self.socket_path.clone()),
            ServerOption::ProbeWaitTime(parse_duration(
                "server.probe_wait_time",
                &self.probe_wait_time,
            )?),
            ServerOption::SocketFlag(socket_flag(self.socket_option.as_ref())),
            ServerOption::Restart(self.restart),
        ];

        match self.server_mode() {
            Some(mode @ (ServerMode::Rest | ServerMode::Gql)) => {
                opts.push(ServerOption::Mode(mode));
                if let Some(http) = &self.http {
                    opts.push(ServerOption::HttpTimeouts(http.timeouts()?));
                }
            }
            Some(ServerMode::Grpc) => {
                opts.push(ServerOption::Mode(ServerMode::Grpc));
                if let Some(grpc) = &self.grpc {
                    grpc.append_opts(&mut opts)?;
                }
            }
            None => {
                warn!(
                    "Unknown mode: {} for server: {}, no protocol options will be applied",
                    self.mode, self.name
                );
            }
        }

        if let Some(tls) = tls.filter(|tls| tls.enabled) {
            opts.push(ServerOption::Tls(tls.opts()?));
        }
        debug!("Compiled {} options for server: {}", opts.len(), self.name);
        Ok(opts)
    }
}

impl Compile for Server {
    type Directive = ServerOption;

    fn opts(&self) -> Result<Vec<ServerOption>, ConfigError> {
        self.opts_with_tls(self.tls.as_ref())
    }
}

impl HttpServer {
    fn timeouts(&self) -> Result<HttpTimeouts, ConfigError> {
        Ok(HttpTimeouts {
            shutdown_duration: parse_duration("http.shutdown_duration", &self.shutdown_duration)?,
            handler_timeout: parse_duration("http.handler_timeout", &self.handler_timeout)?,
            idle_timeout: parse_duration("http.idle_timeout", &self.idle_timeout)?,
            read_header_timeout: parse_duration(
                "http.read_header_timeout",
                &self.read_header_timeout,
            )?,
            read_timeout: parse_duration("http.read_timeout", &self.read_timeout)?,
            write_timeout: parse_duration("http.write_timeout", &self.write_timeout)?,
        })
    }
}

impl GrpcServer {
    fn append_opts(&self, opts: &mut Vec<ServerOption>) -> Result<(), ConfigError> {
        opts.push(ServerOption::GrpcSettings(GrpcSettings {
            connection_timeout: parse_duration("grpc.connection_timeout", &self.connection_timeout)?,
            header_table_size: self.header_table_size,
            initial_conn_window_size: self.initial_conn_window_size,
            initial_window_size: self.initial_window_size,
            interceptors: self.interceptors.clone(),
            max_header_list_size: self.max_header_list_size,
            max_receive_message_size: self.max_receive_message_size,
            max_send_message_size: self.max_send_message_size,
            read_buffer_size: self.read_buffer_size,
            write_buffer_size: self.write_buffer_size,
            enable_reflection: self.enable_reflection,
        }));
        opts.push(ServerOption::BidirectionalStreamConcurrency(
            self.bidirectional_stream_concurrency,
        ));
        if let Some(keepalive) = &self.keepalive {
            opts.push(ServerOption::GrpcKeepalive(ServerKeepalivePolicy {
                max_conn_idle: parse_duration("keepalive.max_conn_idle", &keepalive.max_conn_idle)?,
                max_conn_age: parse_duration("keepalive.max_conn_age", &keepalive.max_conn_age)?,
                max_conn_age_grace: parse_duration(
                    "keepalive.max_conn_age_grace",
                    &keepalive.max_conn_age_grace,
                )?,
                time: parse_duration("keepalive.time", &keepalive.time)?,
                timeout: parse_duration("keepalive.timeout", &keepalive.timeout)?,
                min_time: parse_duration("keepalive.min_time", &keepalive.min_time)?,
                permit_without_stream: keepalive.permit_without_stream,
            }));
        }
        Ok(())
    }
}

impl Servers {
    /// Looks a server up by name across the service, health check and metrics servers.
    pub fn server(&self, name: &str) -> Option<&Server> {
        self.servers
            .iter()
            .chain(&self.health_check_servers)
            .chain(&self.metrics_servers)
            .find(|server| server.name == name)
    }

    /// Compiles the named server. A server without enabled TLS of its own
    /// falls back to the shared TLS node.
    pub fn server_opts(&self, name: &str) -> Result<Vec<ServerOption>, ConfigError> {
        let Some(server) = self.server(name) else {
            warn!("Server: {name} is not configured");
            return Ok(Vec::new());
        };
        let tls = server
            .tls
            .as_ref()
            .filter(|tls| tls.enabled)
            .or(self.tls.as_ref());
        server.opts_with_tls(tls)
    }

    pub fn full_shutdown_duration(&self) -> Result<std::time::Duration, ConfigError> {
        parse_duration("full_shutdown_duration", &self.full_shutdown_duration)
    }
}
