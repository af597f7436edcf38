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

use crate::bind::{Bind, bind_or_default, bind_present};
use crate::compile::{Compile, parse_duration};
use crate::configs::net::Net;
use crate::configs::tls::{Tls, client_config};
use crate::env::{EnvLookup, resolve, resolve_all};
use crate::error::ConfigError;
use crate::options::cassandra::{
    CassandraOption, Consistency, ReconnectionPolicy as ReconnectionDirective,
    RetryPolicy as RetryDirective, SerialConsistency,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, error};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cassandra {
    pub hosts: Vec<String>,
    pub cql_version: String,
    pub proto_version: i32,
    pub timeout: String,
    pub connect_timeout: String,
    pub port: u16,
    pub keyspace: String,
    pub num_conns: usize,
    pub consistency: String,
    pub serial_consistency: String,
    pub username: String,
    pub password: String,
    pub pool_config: Option<PoolConfig>,
    pub retry_policy: Option<RetryPolicy>,
    pub reconnection_policy: Option<ReconnectionPolicy>,
    pub host_filter: Option<HostFilter>,
    pub socket_keepalive: String,
    pub max_prepared_stmts: usize,
    pub max_routing_key_info: usize,
    pub page_size: usize,
    pub tls: Option<Tls>,
    pub net: Option<Net>,
    pub enable_host_verification: bool,
    pub default_timestamp: bool,
    pub reconnect_interval: String,
    pub max_wait_schema_agreement: String,
    pub ignore_peer_addr: bool,
    pub disable_initial_host_lookup: bool,
    pub disable_node_status_events: bool,
    pub disable_topology_events: bool,
    pub disable_schema_events: bool,
    pub disable_skip_metadata: bool,
    pub default_idempotence: bool,
    pub write_coalesce_wait_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub data_center: String,
    pub dc_aware_routing: bool,
    pub non_local_replicas_fallback: bool,
    pub shuffle_replicas: bool,
    pub token_aware_host_policy: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub num_retries: usize,
    pub min_duration: String,
    pub max_duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconnectionPolicy {
    pub max_retries: usize,
    pub initial_interval: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostFilter {
    pub enabled: bool,
    pub data_center: String,
    pub white_list: Vec<String>,
}

impl Bind for Cassandra {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        Cassandra {
            hosts: resolve_all(&self.hosts, env),
            cql_version: resolve(&self.cql_version, env),
            timeout: resolve(&self.timeout, env),
            connect_timeout: resolve(&self.connect_timeout, env),
            keyspace: resolve(&self.keyspace, env),
            consistency: resolve(&self.consistency, env),
            serial_consistency: resolve(&self.serial_consistency, env),
            username: resolve(&self.username, env),
            password: resolve(&self.password, env),
            pool_config: bind_or_default(self.pool_config, env),
            retry_policy: bind_or_default(self.retry_policy, env),
            reconnection_policy: bind_or_default(self.reconnection_policy, env),
            host_filter: bind_present(self.host_filter, env),
            socket_keepalive: resolve(&self.socket_keepalive, env),
            tls: bind_or_default(self.tls, env),
            net: bind_or_default(self.net, env),
            reconnect_interval: resolve(&self.reconnect_interval, env),
            max_wait_schema_agreement: resolve(&self.max_wait_schema_agreement, env),
            write_coalesce_wait_time: resolve(&self.write_coalesce_wait_time, env),
            ..self
        }
    }
}

impl Bind for PoolConfig {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        PoolConfig {
            data_center: resolve(&self.data_center, env),
            ..self
        }
    }
}

impl Bind for RetryPolicy {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        RetryPolicy {
            min_duration: resolve(&self.min_duration, env),
            max_duration: resolve(&self.max_duration, env),
            ..self
        }
    }
}

impl Bind for ReconnectionPolicy {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        ReconnectionPolicy {
            initial_interval: resolve(&self.initial_interval, env),
            ..self
        }
    }
}

impl Bind for HostFilter {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        HostFilter {
            data_center: resolve(&self.data_center, env),
            white_list: resolve_all(&self.white_list, env),
            ..self
        }
    }
}

fn parse_consistency(value: &str) -> Result<Option<Consistency>, ConfigError> {
    if value.is_empty() {
        return Ok(None);
    }
    Consistency::from_str(value).map(Some).map_err(|_| {
        error!("Invalid cassandra consistency: {value}");
        ConfigError::InvalidConsistency(value.to_owned())
    })
}

fn parse_serial_consistency(value: &str) -> Result<Option<SerialConsistency>, ConfigError> {
    if value.is_empty() {
        return Ok(None);
    }
    SerialConsistency::from_str(value).map(Some).map_err(|_| {
        error!("Invalid cassandra serial consistency: {value}");
        ConfigError::InvalidConsistency(value.to_owned())
    })
}

impl Compile for Cassandra {
    type Directive = CassandraOption;

    fn opts(&self) -> Result<Vec<CassandraOption>, ConfigError> {
        let mut opts = vec![
            CassandraOption::Hosts(self.hosts.clone()),
            CassandraOption::CqlVersion(self.cql_version.clone()),
            CassandraOption::ProtoVersion(self.proto_version),
            CassandraOption::Timeout(parse_duration("cassandra.timeout", &self.timeout)?),
            CassandraOption::ConnectTimeout(parse_duration(
                "cassandra.connect_timeout",
                &self.connect_timeout,
            )?),
            CassandraOption::Port(self.port),
            CassandraOption::Keyspace(self.keyspace.clone()),
            CassandraOption::NumConns(self.num_conns),
        ];
        if let Some(consistency) = parse_consistency(&self.consistency)? {
            opts.push(CassandraOption::Consistency(consistency));
        }
        if let Some(serial) = parse_serial_consistency(&self.serial_consistency)? {
            opts.push(CassandraOption::SerialConsistency(serial));
        }
        opts.push(CassandraOption::Username(self.username.clone()));
        opts.push(CassandraOption::Password(self.password.clone()));

        if let Some(retry) = &self.retry_policy {
            opts.push(CassandraOption::RetryPolicy(RetryDirective {
                num_retries: retry.num_retries,
                min_duration: parse_duration("retry_policy.min_duration", &retry.min_duration)?,
                max_duration: parse_duration("retry_policy.max_duration", &retry.max_duration)?,
            }));
        }
        if let Some(reconnection) = &self.reconnection_policy {
            opts.push(CassandraOption::ReconnectionPolicy(ReconnectionDirective {
                max_retries: reconnection.max_retries,
                initial_interval: parse_duration(
                    "reconnection_policy.initial_interval",
                    &reconnection.initial_interval,
                )?,
            }));
        }

        opts.extend([
            CassandraOption::SocketKeepalive(parse_duration(
                "cassandra.socket_keepalive",
                &self.socket_keepalive,
            )?),
            CassandraOption::MaxPreparedStmts(self.max_prepared_stmts),
            CassandraOption::MaxRoutingKeyInfo(self.max_routing_key_info),
            CassandraOption::PageSize(self.page_size),
        ]);

        if let Some(pool) = &self.pool_config {
            if pool.dc_aware_routing {
                opts.push(CassandraOption::DcAwareRouting(pool.data_center.clone()));
            }
            opts.extend([
                CassandraOption::NonLocalReplicasFallback(pool.non_local_replicas_fallback),
                CassandraOption::ShuffleReplicas(pool.shuffle_replicas),
                CassandraOption::TokenAwareHostPolicy(pool.token_aware_host_policy),
            ]);
        }

        if let Some(filter) = self.host_filter.as_ref().filter(|filter| filter.enabled) {
            opts.push(CassandraOption::HostFilter {
                data_center: filter.data_center.clone(),
                white_list: filter.white_list.clone(),
            });
        }

        opts.extend([
            CassandraOption::EnableHostVerification(self.enable_host_verification),
            CassandraOption::DefaultTimestamp(self.default_timestamp),
            CassandraOption::ReconnectInterval(parse_duration(
                "cassandra.reconnect_interval",
                &self.reconnect_interval,
            )?),
            CassandraOption::MaxWaitSchemaAgreement(parse_duration(
                "cassandra.max_wait_schema_agreement",
                &self.max_wait_schema_agreement,
            )?),
            CassandraOption::IgnorePeerAddr(self.ignore_peer_addr),
            CassandraOption::DisableInitialHostLookup(self.disable_initial_host_lookup),
            CassandraOption::DisableNodeStatusEvents(self.disable_node_status_events),
            CassandraOption::DisableTopologyEvents(self.disable_topology_events),
            CassandraOption::DisableSchemaEvents(self.disable_schema_events),
            CassandraOption::DisableSkipMetadata(self.disable_skip_metadata),
            CassandraOption::DefaultIdempotence(self.default_idempotence),
            CassandraOption::WriteCoalesceWaitTime(parse_duration(
                "cassandra.write_coalesce_wait_time",
                &self.write_coalesce_wait_time,
            )?),
        ]);

        if let Some(tls) = self.tls.as_ref().filter(|tls| tls.enabled) {
            opts.push(CassandraOption::Tls(client_config(tls)?));
        }
        if let Some(net) = &self.net {
            opts.push(CassandraOption::Dialer(net.opts()?));
        }
        debug!("Compiled {} cassandra options", opts.len());
        Ok(opts)
    }
}

impl Cassandra {
    /// Parsed consistency level, when one is configured.
    pub fn consistency_level(&self) -> Result<Option<Consistency>, ConfigError> {
        parse_consistency(&self.consistency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::net::Dns;
    use crate::error::ConfigErrorKind;
    use std::collections::HashMap;

    fn cassandra() -> Cassandra {
        Cassandra {
            hosts: vec!["cassandra-0".to_string(), "cassandra-1".to_string()],
            cql_version: "3.0.0".to_string(),
            proto_version: 4,
            timeout: "600ms".to_string(),
            connect_timeout: "3s".to_string(),
            port: 9042,
            keyspace: "vald".to_string(),
            num_conns: 2,
            consistency: "quorum".to_string(),
            ..Cassandra::default()
        }
    }

    #[test]
    fn bind_should_default_structural_children() {
        let bound = cassandra().bind_with(&HashMap::new());
        assert_eq!(bound.pool_config, Some(PoolConfig::default()));
        assert_eq!(bound.retry_policy, Some(RetryPolicy::default()));
        assert_eq!(bound.reconnection_policy, Some(ReconnectionPolicy::default()));
        assert_eq!(bound.tls, Some(Tls::default()));
        assert!(bound.net.is_some());
        assert_eq!(bound.host_filter, None);
    }

    #[test]
    fn bind_should_resolve_hosts_and_credentials() {
        let env = HashMap::from([
            ("CASSANDRA_HOST".to_string(), "cassandra.svc".to_string()),
            ("CASSANDRA_PASSWORD".to_string(), "secret".to_string()),
        ]);
        let bound = Cassandra {
            hosts: vec!["_CASSANDRA_HOST_".to_string()],
            password: "_CASSANDRA_PASSWORD_".to_string(),
            ..Cassandra::default()
        }
        .bind_with(&env);
        assert_eq!(bound.hosts, vec!["cassandra.svc"]);
        assert_eq!(bound.password, "secret");
    }

    #[test]
    fn opts_should_parse_consistency() {
        let opts = cassandra().opts().unwrap();
        assert!(opts
            .iter()
            .any(|opt| matches!(opt, CassandraOption::Consistency(Consistency::Quorum))));
        assert!(!opts
            .iter()
            .any(|opt| matches!(opt, CassandraOption::SerialConsistency(_))));
        assert_eq!(
            cassandra().consistency_level().unwrap(),
            Some(Consistency::Quorum)
        );
        assert_eq!(Cassandra::default().consistency_level().unwrap(), None);
    }

    #[test]
    fn unknown_consistency_should_be_rejected() {
        let cassandra = Cassandra {
            consistency: "most".to_string(),
            ..cassandra()
        };
        match cassandra.opts().unwrap_err() {
            ConfigError::InvalidConsistency(value) => assert_eq!(value, "most"),
            other => panic!("unexpected error: {other}"),
        }
        let cassandra = Cassandra {
            serial_consistency: "quorum".to_string(),
            ..Cassandra::default()
        };
        assert_eq!(
            cassandra.opts().unwrap_err().kind(),
            ConfigErrorKind::InvalidConsistency
        );
    }

    #[test]
    fn host_filter_should_be_emitted_only_when_enabled() {
        let mut cassandra = Cassandra {
            host_filter: Some(HostFilter {
                enabled: false,
                data_center: "dc1".to_string(),
                white_list: vec!["10.0.0.1".to_string()],
            }),
            ..cassandra()
        };
        let has_filter = |opts: &[CassandraOption]| {
            opts.iter()
                .any(|opt| matches!(opt, CassandraOption::HostFilter { .. }))
        };
        assert!(!has_filter(&cassandra.opts().unwrap()));
        if let Some(filter) = cassandra.host_filter.as_mut() {
            filter.enabled = true;
        }
        assert!(has_filter(&cassandra.opts().unwrap()));
    }

    #[test]
    fn dialer_should_come_last_when_net_is_present() {
        let bound = cassandra().bind_with(&HashMap::new());
        let opts = bound.opts().unwrap();
        assert!(matches!(opts.last(), Some(CassandraOption::Dialer(dialer)) if dialer.len() == 6));
        assert!(
            !cassandra()
                .opts()
                .unwrap()
                .iter()
                .any(|opt| matches!(opt, CassandraOption::Dialer(_)))
        );
    }

    #[test]
    fn dns_error_should_match_other_domains() {
        let cassandra = Cassandra {
            net: Some(Net {
                dns: Some(Dns {
                    cache_enabled: true,
                    refresh_duration: "5m".to_string(),
                    cache_expiration: "1m".to_string(),
                }),
                ..Net::default()
            }),
            ..cassandra()
        };
        assert_eq!(
            cassandra.opts().unwrap_err().kind(),
            ConfigErrorKind::InvalidDnsConfig
        );
    }
}
