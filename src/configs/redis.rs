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
use crate::compile::{Compile, parse_duration};
use crate::configs::net::Net;
use crate::configs::tls::{Tls, client_config};
use crate::env::{EnvLookup, resolve, resolve_all};
use crate::error::ConfigError;
use crate::options::redis::RedisOption;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Redis {
    pub addrs: Vec<String>,
    pub db: u32,
    pub dial_timeout: String,
    pub idle_check_frequency: String,
    pub idle_timeout: String,
    pub initial_ping_time_limit: String,
    pub initial_ping_duration: String,
    pub key_pref: String,
    pub max_conn_age: String,
    pub max_redirects: usize,
    pub max_retries: usize,
    pub max_retry_backoff: String,
    pub min_idle_conns: usize,
    pub min_retry_backoff: String,
    pub username: String,
    pub password: String,
    pub pool_size: usize,
    pub pool_timeout: String,
    pub read_only: bool,
    pub read_timeout: String,
    pub route_by_latency: bool,
    pub route_randomly: bool,
    pub tls: Option<Tls>,
    pub net: Option<Net>,
    pub write_timeout: String,
    pub kv_prefix: String,
    pub vk_prefix: String,
    pub prefix_delimiter: String,
}

impl Bind for Redis {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        Redis {
            addrs: resolve_all(&self.addrs, env),
            dial_timeout: resolve(&self.dial_timeout, env),
            idle_check_frequency: resolve(&self.idle_check_frequency, env),
            idle_timeout: resolve(&self.idle_timeout, env),
            initial_ping_time_limit: resolve(&self.initial_ping_time_limit, env),
            initial_ping_duration: resolve(&self.initial_ping_duration, env),
            key_pref: resolve(&self.key_pref, env),
            max_conn_age: resolve(&self.max_conn_age, env),
            max_retry_backoff: resolve(&self.max_retry_backoff, env),
            min_retry_backoff: resolve(&self.min_retry_backoff, env),
            username: resolve(&self.username, env),
            password: resolve(&self.password, env),
            pool_timeout: resolve(&self.pool_timeout, env),
            read_timeout: resolve(&self.read_timeout, env),
            tls: bind_or_default(self.tls, env),
            net: bind_or_default(self.net, env),
            write_timeout: resolve(&self.write_timeout, env),
            kv_prefix: resolve(&self.kv_prefix, env),
            vk_prefix: resolve(&self.vk_prefix, env),
            prefix_delimiter: resolve(&self.prefix_delimiter, env),
            ..self
        }
    }
}

impl Compile for Redis {
    type Directive = RedisOption;

    fn opts(&self) -> Result<Vec<RedisOption>, ConfigError> {
        let mut opts = vec![
            RedisOption::Addrs(self.addrs.clone()),
            RedisOption::Db(self.db),
            RedisOption::DialTimeout(parse_duration("redis.dial_timeout", &self.dial_timeout)?),
            RedisOption::IdleCheckFrequency(parse_duration(
                "redis.idle_check_frequency",
                &self.idle_check_frequency,
            )?),
            RedisOption::IdleTimeout(parse_duration("redis.idle_timeout", &self.idle_timeout)?),
            RedisOption::InitialPingTimeLimit(parse_duration(
                "redis.initial_ping_time_limit",
                &self.initial_ping_time_limit,
            )?),
            RedisOption::InitialPingDuration(parse_duration(
                "redis.initial_ping_duration",
                &self.initial_ping_duration,
            )?),
            RedisOption::MaxConnAge(parse_duration("redis.max_conn_age", &self.max_conn_age)?),
            RedisOption::PoolSize(self.pool_size),
            RedisOption::MinIdleConns(self.min_idle_conns),
            RedisOption::PoolTimeout(parse_duration("redis.pool_timeout", &self.pool_timeout)?),
            RedisOption::ReadTimeout(parse_duration("redis.read_timeout", &self.read_timeout)?),
            RedisOption::WriteTimeout(parse_duration("redis.write_timeout", &self.write_timeout)?),
            RedisOption::MaxRetries(self.max_retries),
            RedisOption::MinRetryBackoff(parse_duration(
                "redis.min_retry_backoff",
                &self.min_retry_backoff,
            )?),
            RedisOption::MaxRetryBackoff(parse_duration(
                "redis.max_retry_backoff",
                &self.max_retry_backoff,
            )?),
            RedisOption::MaxRedirects(self.max_redirects),
            RedisOption::KeyPrefix(self.key_pref.clone()),
            RedisOption::KvPrefix(self.kv_prefix.clone()),
            RedisOption::VkPrefix(self.vk_prefix.clone()),
            RedisOption::PrefixDelimiter(self.prefix_delimiter.clone()),
            RedisOption::Username(self.username.clone()),
            RedisOption::Password(self.password.clone()),
            RedisOption::ReadOnly(self.read_only),
            RedisOption::RouteByLatency(self.route_by_latency),
            RedisOption::RouteRandomly(self.route_randomly),
        ];
        if let Some(tls) = self.tls.as_ref().filter(|tls| tls.enabled) {
            opts.push(RedisOption::Tls(client_config(tls)?));
        }
        if let Some(net) = &self.net {
            opts.push(RedisOption::Dialer(net.opts()?));
        }
        debug!("Compiled {} redis options", opts.len());
        Ok(opts)
    }
}
