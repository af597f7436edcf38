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
use crate::options::grpc::{
    BackoffPolicy, CallPolicy, CircuitBreakerPolicy, GrpcOption, KeepalivePolicy,
};
use crate::validatable::Validatable;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcClient {
    pub addrs: Vec<String>,
    pub health_check_duration: String,
    pub connection_pool: Option<ConnectionPool>,
    pub backoff: Option<Backoff>,
    pub circuit_breaker: Option<CircuitBreaker>,
    pub call_option: Option<CallOption>,
    pub dial_option: Option<DialOption>,
    pub tls: Option<Tls>,
}

impl Default for GrpcClient {
    fn default() -> Self {
        GrpcClient {
            addrs: Vec::new(),
            health_check_duration: String::new(),
            connection_pool: None,
            backoff: None,
            circuit_breaker: None,
            call_option: None,
            dial_option: Some(insecure_dial_option()),
            tls: None,
        }
    }
}

fn insecure_dial_option() -> DialOption {
    DialOption {
        insecure: true,
        ..DialOption::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionPool {
    pub resolve_dns: bool,
    pub enable_rebalance: bool,
    pub rebalance_duration: String,
    pub size: usize,
    pub old_conn_close_duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backoff {
    pub initial_duration: String,
    pub backoff_time_limit: String,
    pub maximum_duration: String,
    pub jitter_limit: String,
    pub backoff_factor: f64,
    pub retry_count: usize,
    pub enable_error_log: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBreaker {
    pub closed_error_rate: f32,
    pub half_open_error_rate: f32,
    pub min_samples: i64,
    pub open_timeout: String,
    pub closed_refresh_timeout: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallOption {
    pub wait_for_ready: bool,
    pub max_retry_rpc_buffer_size: usize,
    pub max_recv_msg_size: usize,
    pub max_send_msg_size: usize,
    pub content_subtype: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialOption {
    pub write_buffer_size: usize,
    pub read_buffer_size: usize,
    pub initial_window_size: i32,
    pub initial_connection_window_size: i32,
    pub max_msg_size: usize,
    pub backoff_max_delay: String,
    pub backoff_base_delay: String,
    pub backoff_multiplier: f64,
    pub backoff_jitter: f64,
    pub min_connection_timeout: String,
    pub timeout: String,
    pub enable_backoff: bool,
    pub insecure: bool,
    pub net: Option<Net>,
    pub keepalive: Option<GrpcClientKeepalive>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcClientKeepalive {
    pub time: String,
    pub timeout: String,
    pub permit_without_stream: bool,
}

impl Bind for GrpcClient {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        let mut addrs = resolve_all(&self.addrs, env);
        addrs.sort();
        addrs.dedup();

        let tls = bind_or_default(self.tls, env);
        let mut dial_option = self
            .dial_option
            .unwrap_or_else(insecure_dial_option)
            .bind_with(env);
        if !tls.as_ref().is_some_and(|tls| tls.enabled) {
            dial_option.insecure = true;
        }

        GrpcClient {
            addrs,
            health_check_duration: resolve(&self.health_check_duration, env),
            connection_pool: bind_or_default(self.connection_pool, env),
            backoff: bind_present(self.backoff, env),
            circuit_breaker: bind_present(self.circuit_breaker, env),
            call_option: bind_present(self.call_option, env),
            dial_option: Some(dial_option),
            tls,
        }
    }
}

impl Bind for ConnectionPool {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        ConnectionPool {
            rebalance_duration: resolve(&self.rebalance_duration, env),
            old_conn_close_duration: resolve(&self.old_conn_close_duration, env),
            ..self
        }
    }
}

impl Bind for Backoff {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        Backoff {
            initial_duration: resolve(&self.initial_duration, env),
            backoff_time_limit: resolve(&self.backoff_time_limit, env),
            maximum_duration: resolve(&self.maximum_duration, env),
            jitter_limit: resolve(&self.jitter_limit, env),
            ..self
        }
    }
}

impl Bind for CircuitBreaker {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        CircuitBreaker {
            open_timeout: resolve(&self.open_timeout, env),
            closed_refresh_timeout: resolve(&self.closed_refresh_timeout, env),
            ..self
        }
    }
}

impl Bind for CallOption {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        CallOption {
            content_subtype: resolve(&self.content_subtype, env),
            ..self
        }
    }
}

impl Bind for DialOption {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        DialOption {
            backoff_max_delay: resolve(&self.backoff_max_delay, env),
            backoff_base_delay: resolve(&self.backoff_base_delay, env),
            min_connection_timeout: resolve(&self.min_connection_timeout, env),
            timeout: resolve(&self.timeout, env),
            net: bind_present(self.net, env),
            keepalive: bind_present(self.keepalive, env),
            ..self
        }
    }
}

impl Bind for GrpcClientKeepalive {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        GrpcClientKeepalive {
            time: resolve(&self.time, env),
            timeout: resolve(&self.timeout, env),
            ..self
        }
    }
}

impl Validatable<ConfigError> for CircuitBreaker {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, rate) in [
            ("circuit_breaker.closed_error_rate", self.closed_error_rate),
            ("circuit_breaker.half_open_error_rate", self.half_open_error_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                error!("Invalid {name}: {rate}, it must be between 0 and 1");
                return Err(ConfigError::invalid_option(name, rate));
            }
        }
        if self.min_samples < 0 {
            error!(
                "Invalid circuit_breaker.min_samples: {}, it must not be negative",
                self.min_samples
            );
            return Err(ConfigError::invalid_option(
                "circuit_breaker.min_samples",
                self.min_samples,
            ));
        }
        Ok(())
    }
}

impl Compile for GrpcClient {
    type Directive = GrpcOption;

    fn opts(&self) -> Result<Vec<GrpcOption>, ConfigError> {
        let mut opts = vec![GrpcOption::HealthCheckDuration(parse_duration(
            "health_check_duration",
            &self.health_check_duration,
        )?)];

        if let Some(pool) = &self.connection_pool {
            opts.push(GrpcOption::ConnectionPoolRebalanceDuration(parse_duration(
                "connection_pool.rebalance_duration",
                &pool.rebalance_duration,
            )?));
            opts.push(GrpcOption::ConnectionPoolSize(pool.size));
            opts.push(GrpcOption::OldConnCloseDuration(parse_duration(
                "connection_pool.old_conn_close_duration",
                &pool.old_conn_close_duration,
            )?));
            opts.push(GrpcOption::ResolveDns(pool.resolve_dns));
            opts.push(GrpcOption::EnableConnectionPoolRebalance(
                pool.enable_rebalance,
            ));
        }

        if !self.addrs.is_empty() {
            opts.push(GrpcOption::Addrs(self.addrs.clone()));
        }

        if let Some(backoff) = &self.backoff {
            opts.push(GrpcOption::Backoff(backoff.policy()?));
        }

        if let Some(circuit_breaker) = &self.circuit_breaker {
            circuit_breaker.validate()?;
            opts.push(GrpcOption::CircuitBreaker(circuit_breaker.policy()?));
        }

        if let Some(call_option) = &self.call_option {
            opts.push(GrpcOption::CallOptions(CallPolicy {
                wait_for_ready: call_option.wait_for_ready,
                max_retry_rpc_buffer_size: call_option.max_retry_rpc_buffer_size,
                max_recv_msg_size: call_option.max_recv_msg_size,
                max_send_msg_size: call_option.max_send_msg_size,
                content_subtype: call_option.content_subtype.clone(),
            }));
        }

        if let Some(dial_option) = &self.dial_option {
            dial_option.append_opts(&mut opts)?;

            if let Some(net) = dial_option
                .net
                .as_ref()
                .filter(|net| !net.dialer_timeout().is_empty())
            {
                opts.push(GrpcOption::Dialer(net.opts()?));
            }

            if let Some(keepalive) = &dial_option.keepalive {
                opts.push(GrpcOption::Keepalive(KeepalivePolicy {
                    time: parse_duration("keepalive.time", &keepalive.time)?,
                    timeout: parse_duration("keepalive.timeout", &keepalive.timeout)?,
                    permit_without_stream: keepalive.permit_without_stream,
                }));
            }
        }

        match self.tls.as_ref().filter(|tls| tls.enabled) {
            Some(tls) => opts.push(GrpcOption::Tls(client_config(tls)?)),
            None => opts.push(GrpcOption::Insecure(true)),
        }

        debug!("Compiled {} gRPC client options", opts.len());
        Ok(opts)
    }
}

impl Backoff {
    fn policy(&self) -> Result<BackoffPolicy, ConfigError> {
        Ok(BackoffPolicy {
            initial_duration: parse_duration("backoff.initial_duration", &self.initial_duration)?,
            backoff_time_limit: parse_duration(
                "backoff.backoff_time_limit",
                &self.backoff_time_limit,
            )?,
            maximum_duration: parse_duration("backoff.maximum_duration", &self.maximum_duration)?,
            jitter_limit: parse_duration("backoff.jitter_limit", &self.jitter_limit)?,
            backoff_factor: self.backoff_factor,
            retry_count: self.retry_count,
            enable_error_log: self.enable_error_log,
        })
    }
}

impl CircuitBreaker {
    fn policy(&self) -> Result<CircuitBreakerPolicy, ConfigError> {
        Ok(CircuitBreakerPolicy {
            closed_error_rate: self.closed_error_rate,
            half_open_error_rate: self.half_open_error_rate,
            min_samples: self.min_samples,
            open_timeout: parse_duration("circuit_breaker.open_timeout", &self.open_timeout)?,
            closed_refresh_timeout: parse_duration(
                "circuit_breaker.closed_refresh_timeout",
                &self.closed_refresh_timeout,
            )?,
        })
    }
}

impl DialOption {
    fn append_opts(&self, opts: &mut Vec<GrpcOption>) -> Result<(), ConfigError> {
        opts.extend([
            GrpcOption::WriteBufferSize(self.write_buffer_size),
            GrpcOption::ReadBufferSize(self.read_buffer_size),
            GrpcOption::InitialWindowSize(self.initial_window_size),
            GrpcOption::InitialConnectionWindowSize(self.initial_connection_window_size),
            GrpcOption::MaxMsgSize(self.max_msg_size),
            GrpcOption::BackoffMaxDelay(parse_duration(
                "dial_option.backoff_max_delay",
                &self.backoff_max_delay,
            )?),
            GrpcOption::BackoffBaseDelay(parse_duration(
                "dial_option.backoff_base_delay",
                &self.backoff_base_delay,
            )?),
            GrpcOption::BackoffMultiplier(self.backoff_multiplier),
            GrpcOption::BackoffJitter(self.backoff_jitter),
            GrpcOption::MinConnectTimeout(parse_duration(
                "dial_option.min_connection_timeout",
                &self.min_connection_timeout,
            )?),
            GrpcOption::DialTimeout(parse_duration("dial_option.timeout", &self.timeout)?),
            GrpcOption::EnableBackoff(self.enable_backoff),
            GrpcOption::Insecure(self.insecure),
        ]);
        Ok(())
    }
}
