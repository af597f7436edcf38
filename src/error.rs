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

use humantime::format_duration;
use std::time::Duration;
use strum::{EnumDiscriminants, IntoStaticStr};
use thiserror::Error;

/// The error type returned by option compilation.
///
/// Binding never fails, so every variant originates from `opts()`.
/// Use [`ConfigError::kind`] to compare errors without matching on messages.
#[derive(Debug, Error, EnumDiscriminants, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[strum_discriminants(
    name(ConfigErrorKind),
    vis(pub),
    derive(IntoStaticStr, Hash),
    strum(serialize_all = "snake_case")
)]
pub enum ConfigError {
    #[error("TLS cert or key not found")]
    TlsCertOrKeyNotFound,
    #[error(
        "invalid DNS cache configuration: refresh duration {} is longer than cache expiration {}",
        fmt_duration(.refresh),
        fmt_duration(.expiration)
    )]
    InvalidDnsConfig {
        refresh: Duration,
        expiration: Duration,
    },
    #[error("Invalid duration for {field}: {value}")]
    InvalidDuration { field: &'static str, value: String },
    #[error("Invalid option {name}: {value}")]
    InvalidOption { name: &'static str, value: String },
    #[error("Invalid TLS certificate, Path: {0}")]
    InvalidTlsCertificate(String),
    #[error("Invalid TLS private key, Path: {0}")]
    InvalidTlsPrivateKey(String),
    #[error("Invalid consistency level: {0}")]
    InvalidConsistency(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Tls(#[from] rustls::Error),
}

fn fmt_duration(duration: &Duration) -> humantime::FormattedDuration {
    format_duration(*duration)
}

impl ConfigError {
    pub fn kind(&self) -> ConfigErrorKind {
        ConfigErrorKind::from(self)
    }

    pub fn as_code(&self) -> &'static str {
        self.kind().into()
    }

    pub(crate) fn invalid_dns_config(refresh: Duration, expiration: Duration) -> Self {
        ConfigError::InvalidDnsConfig {
            refresh,
            expiration,
        }
    }

    pub(crate) fn invalid_option(name: &'static str, value: impl ToString) -> Self {
        ConfigError::InvalidOption {
            name,
            value: value.to_string(),
        }
    }
}
