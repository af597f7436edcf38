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

use crate::error::ConfigError;
use std::time::Duration;
use tracing::error;

pub trait Validatable<E: std::error::Error> {
    fn validate(&self) -> Result<(), E>;
}

/// Both the certificate and the key are required once TLS is enabled.
pub fn validate_tls_material(enabled: bool, cert: &str, key: &str) -> Result<(), ConfigError> {
    if enabled && (cert.is_empty() || key.is_empty()) {
        error!("TLS is enabled but the certificate or the key path is empty");
        return Err(ConfigError::TlsCertOrKeyNotFound);
    }
    Ok(())
}

/// The cache must not be refreshed less often than its entries expire.
pub fn validate_dns_cache(
    enabled: bool,
    refresh: Duration,
    expiration: Duration,
) -> Result<(), ConfigError> {
    if enabled && refresh > expiration {
        error!(
            "DNS refresh duration {} is longer than cache expiration {}",
            humantime::format_duration(refresh),
            humantime::format_duration(expiration)
        );
        return Err(ConfigError::invalid_dns_config(refresh, expiration));
    }
    Ok(())
}
