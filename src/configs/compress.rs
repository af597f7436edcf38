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
use crate::compile::parse_duration;
use crate::env::{EnvLookup, resolve};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumString};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CompressAlgorithm {
    Gob,
    Gzip,
    Lz4,
    Zstd,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressCore {
    pub compress_algorithm: String,
    pub compression_level: i32,
}

impl CompressCore {
    /// The configured algorithm, or `None` when it is empty or not recognized.
    pub fn algorithm(&self) -> Option<CompressAlgorithm> {
        if self.compress_algorithm.is_empty() {
            return None;
        }
        match self.compress_algorithm.parse() {
            Ok(algorithm) => Some(algorithm),
            Err(_) => {
                warn!(
                    "Unknown compression algorithm: {}, compression is disabled",
                    self.compress_algorithm
                );
                None
            }
        }
    }
}

impl Bind for CompressCore {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        CompressCore {
            compress_algorithm: resolve(&self.compress_algorithm, env),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Compressor {
    #[serde(flatten)]
    pub compress_core: CompressCore,
    pub concurrent_limit: usize,
    pub queue_check_duration: String,
}

impl Compressor {
    pub fn queue_check_duration(&self) -> Result<Duration, ConfigError> {
        parse_duration("queue_check_duration", &self.queue_check_duration)
    }
}

impl Bind for Compressor {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        Compressor {
            compress_core: self.compress_core.bind_with(env),
            queue_check_duration: resolve(&self.queue_check_duration, env),
            ..self
        }
    }
}

/// Registration queue feeding a [`Compressor`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorRegisterer {
    pub concurrent_limit: usize,
    pub queue_check_duration: String,
    pub compressor: Option<Compressor>,
}

impl CompressorRegisterer {
    pub fn queue_check_duration(&self) -> Result<Duration, ConfigError> {
        parse_duration("registerer.queue_check_duration", &self.queue_check_duration)
    }
}

impl Bind for CompressorRegisterer {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        CompressorRegisterer {
            queue_check_duration: resolve(&self.queue_check_duration, env),
            compressor: bind_or_default(self.compressor, env),
            ..self
        }
    }
}
