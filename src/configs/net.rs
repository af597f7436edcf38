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
use crate::configs::tls::{Tls, client_config};
use crate::env::{EnvLookup, resolve};
use crate::error::ConfigError;
use crate::options::dialer::{DialerOption, SocketFlag};
use crate::validatable::{Validatable, validate_dns_cache};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Net {
    pub dns: Option<Dns>,
    pub dialer: Option<Dialer>,
    pub socket_option: Option<SocketOption>,
    pub tls: Option<Tls>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dns {
    pub cache_enabled: bool,
    pub refresh_duration: String,
    pub cache_expiration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialer {
    pub timeout: String,
    pub keepalive: String,
    pub fallback_delay: String,
    pub dual_stack_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketOption {
    pub reuse_port: bool,
    pub reuse_addr: bool,
    pub tcp_fast_open: bool,
    pub tcp_no_delay: bool,
    pub tcp_cork: bool,
    pub tcp_quick_ack: bool,
    pub tcp_defer_accept: bool,
    pub ip_transparent: bool,
    pub ip_recover_destination_addr: bool,
}

impl Bind for Net {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        Net {
            dns: bind_or_default(self.dns, env),
            dialer: bind_or_default(self.dialer, env),
            socket_option: bind_or_default(self.socket_option, env),
            tls: bind_or_default(self.tls, env),
        }
    }
}

impl Bind for Dns {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        Dns {
            refresh_duration: resolve(&self.refresh_duration, env),
            cache_expiration: resolve(&self.cache_expiration, env),
            ..self
        }
    }
}

impl Bind for Dialer {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        Dialer {
            timeout: resolve(&self.timeout, env),
            keepalive: resolve(&self.keepalive, env),
            fallback_delay: resolve(&self.fallback_delay, env),
            ..self
        }
    }
}

impl Bind for SocketOption {
    fn bind_with<E: EnvLookup + ?Sized>(self, _env: &E) -> Self {
        self
    }
}

impl Validatable<ConfigError> for Dns {
    fn validate(&self) -> Result<(), ConfigError> {
        let refresh = parse_duration("dns.refresh_duration", &self.refresh_duration)?;
        let expiration = parse_duration("dns.cache_expiration", &self.cache_expiration)?;
        validate_dns_cache(self.cache_enabled, refresh, expiration)
    }
}

impl SocketOption {
    pub fn to_socket_flag(&self) -> SocketFlag {
        let mut flag = SocketFlag::empty();
        flag.set(SocketFlag::REUSE_PORT, self.reuse_port);
        flag.set(SocketFlag::REUSE_ADDR, self.reuse_addr);
        flag.set(SocketFlag::TCP_FAST_OPEN, self.tcp_fast_open);
        flag.set(SocketFlag::TCP_NO_DELAY, self.tcp_no_delay);
        flag.set(SocketFlag::TCP_CORK, self.tcp_cork);
        flag.set(SocketFlag::TCP_QUICK_ACK, self.tcp_quick_ack);
        flag.set(SocketFlag::TCP_DEFER_ACCEPT, self.tcp_defer_accept);
        flag.set(SocketFlag::IP_TRANSPARENT, self.ip_transparent);
        flag.set(
            SocketFlag::IP_RECOVER_DESTINATION_ADDR,
            self.ip_recover_destination_addr,
        );
        flag
    }
}

/// Flags of an optional socket option node. An absent node sets no flag.
pub fn socket_flag(option: Option<&SocketOption>) -> SocketFlag {
    option.map(SocketOption::to_socket_flag).unwrap_or_default()
}

impl Net {
    /// Dialer timeout as configured, used to decide whether a dialer is wanted at all.
    pub(crate) fn dialer_timeout(&self) -> &str {
        self.dialer
            .as_ref()
            .map(|dialer| dialer.timeout.as_str())
            .unwrap_or_default()
    }
}

impl Compile for Net {
    type Directive = DialerOption;

    fn opts(&self) -> Result<Vec<DialerOption>, ConfigError> {
        let mut opts = Vec::with_capacity(9);
        if let Some(dns) = &self.dns {
            dns.validate()?;
            opts.push(DialerOption::DnsCacheExpiration(parse_duration(
                "dns.cache_expiration",
                &dns.cache_expiration,
            )?));
            opts.push(DialerOption::DnsRefreshDuration(parse_duration(
                "dns.refresh_duration",
                &dns.refresh_duration,
            )?));
            if dns.cache_enabled {
                opts.push(DialerOption::EnableDnsCache);
            }
        }
        if let Some(dialer) = &self.dialer {
            opts.push(DialerOption::Keepalive(parse_duration(
                "dialer.keepalive",
                &dialer.keepalive,
            )?));
            opts.push(DialerOption::Timeout(parse_duration(
                "dialer.timeout",
                &dialer.timeout,
            )?));
            opts.push(DialerOption::FallbackDelay(parse_duration(
                "dialer.fallback_delay",
                &dialer.fallback_delay,
            )?));
            if dialer.dual_stack_enabled {
                opts.push(DialerOption::EnableDualStack);
            }
        }
        if let Some(socket_option) = &self.socket_option {
            opts.push(DialerOption::SocketFlag(socket_option.to_socket_flag()));
        }
        if let Some(tls) = self.tls.as_ref().filter(|tls| tls.enabled) {
            opts.push(DialerOption::Tls(client_config(tls)?));
        }
        debug!("Compiled {} dialer options", opts.len());
        Ok(opts)
    }
}
