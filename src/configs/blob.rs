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
use crate::env::{EnvLookup, resolve};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;

/// Backend holding backup blobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BlobStorageType {
    #[default]
    Unknown,
    S3,
    CloudStorage,
}

impl BlobStorageType {
    /// Parses a storage name, ignoring case. Anything unrecognized is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blob {
    pub storage_type: String,
    pub bucket: String,
    pub s3: Option<S3Config>,
    pub cloud_storage: Option<CloudStorageConfig>,
}

impl Blob {
    pub fn storage_type(&self) -> BlobStorageType {
        let storage_type = BlobStorageType::parse(&self.storage_type);
        if storage_type == BlobStorageType::Unknown && !self.storage_type.is_empty() {
            warn!("Unknown blob storage type: {}", self.storage_type);
        }
        storage_type
    }
}

impl Bind for Blob {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        Blob {
            storage_type: resolve(&self.storage_type, env),
            bucket: resolve(&self.bucket, env),
            s3: bind_or_default(self.s3, env),
            cloud_storage: bind_or_default(self.cloud_storage, env),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_access_key: String,
    pub token: String,
    pub max_retries: usize,
    pub force_path_style: bool,
    pub use_accelerate: bool,
    pub use_arn_region: bool,
    pub use_dual_stack: bool,
    pub enable_ssl: bool,
    pub enable_param_validation: bool,
    pub enable_100_continue: bool,
    pub enable_content_md5_validation: bool,
    pub enable_endpoint_discovery: bool,
    pub enable_endpoint_host_prefix: bool,
    pub max_part_size: String,
    pub max_chunk_size: String,
}

impl Bind for S3Config {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        S3Config {
            endpoint: resolve(&self.endpoint, env),
            region: resolve(&self.region, env),
            access_key: resolve(&self.access_key, env),
            secret_access_key: resolve(&self.secret_access_key, env),
            token: resolve(&self.token, env),
            max_part_size: resolve(&self.max_part_size, env),
            max_chunk_size: resolve(&self.max_chunk_size, env),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudStorageConfig {
    pub url: String,
    pub client: Option<CloudStorageClient>,
    pub write_buffer_size: usize,
    pub write_cache_control: String,
    pub write_content_disposition: String,
    pub write_content_encoding: String,
    pub write_content_language: String,
    pub write_content_type: String,
}

impl Bind for CloudStorageConfig {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        CloudStorageConfig {
            url: resolve(&self.url, env),
            client: bind_or_default(self.client, env),
            write_cache_control: resolve(&self.write_cache_control, env),
            write_content_disposition: resolve(&self.write_content_disposition, env),
            write_content_encoding: resolve(&self.write_content_encoding, env),
            write_content_language: resolve(&self.write_content_language, env),
            write_content_type: resolve(&self.write_content_type, env),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudStorageClient {
    pub credentials_file_path: String,
    pub credentials_json: String,
}

impl Bind for CloudStorageClient {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        CloudStorageClient {
            credentials_file_path: resolve(&self.credentials_file_path, env),
            credentials_json: resolve(&self.credentials_json, env),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fake_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn storage_type_should_display_its_name() {
        assert_eq!(BlobStorageType::S3.to_string(), "s3");
        assert_eq!(BlobStorageType::CloudStorage.to_string(), "cloud_storage");
        assert_eq!(BlobStorageType::default().to_string(), "unknown");
    }

    #[test]
    fn storage_type_should_parse_ignoring_case() {
        assert_eq!(BlobStorageType::parse("s3"), BlobStorageType::S3);
        assert_eq!(BlobStorageType::parse("S3"), BlobStorageType::S3);
        assert_eq!(
            BlobStorageType::parse("cloud_storage"),
            BlobStorageType::CloudStorage
        );
        assert_eq!(
            BlobStorageType::parse("CLOUD_storage"),
            BlobStorageType::CloudStorage
        );
    }

    #[test]
    fn empty_or_unknown_storage_type_should_parse_to_unknown() {
        assert_eq!(BlobStorageType::parse(""), BlobStorageType::Unknown);
        assert_eq!(BlobStorageType::parse("storage"), BlobStorageType::Unknown);
        let blob = Blob {
            storage_type: "storage".to_string(),
            ..Blob::default()
        };
        assert_eq!(blob.storage_type(), BlobStorageType::Unknown);
    }

    #[test]
    fn bind_should_default_absent_backends() {
        let blob = Blob {
            storage_type: "s3".to_string(),
            bucket: "test.vald".to_string(),
            ..Blob::default()
        }
        .bind_with(&fake_env(&[]));
        assert_eq!(blob.storage_type, "s3");
        assert_eq!(blob.bucket, "test.vald");
        assert_eq!(blob.s3, Some(S3Config::default()));
        assert_eq!(blob.cloud_storage, Some(CloudStorageConfig::default()));
        assert_eq!(blob.storage_type(), BlobStorageType::S3);
    }

    #[test]
    fn bind_should_keep_present_backends() {
        let s3 = S3Config {
            endpoint: "https://test.vald".to_string(),
            ..S3Config::default()
        };
        let cloud_storage = CloudStorageConfig {
            url: "gs://test.vald".to_string(),
            client: Some(CloudStorageClient::default()),
            ..CloudStorageConfig::default()
        };
        let blob = Blob {
            storage_type: "s3".to_string(),
            bucket: "test.vald".to_string(),
            s3: Some(s3.clone()),
            cloud_storage: Some(cloud_storage.clone()),
        }
        .bind_with(&fake_env(&[]));
        assert_eq!(blob.s3, Some(s3));
        assert_eq!(blob.cloud_storage, Some(cloud_storage));
    }

    #[test]
    fn bind_should_resolve_blob_fields_from_environment() {
        let env = fake_env(&[("STORAGE_TYPE", "s3"), ("BUCKET", "test.vald")]);
        let blob = Blob {
            storage_type: "_STORAGE_TYPE_".to_string(),
            bucket: "_BUCKET_".to_string(),
            ..Blob::default()
        }
        .bind_with(&env);
        assert_eq!(blob.storage_type, "s3");
        assert_eq!(blob.bucket, "test.vald");
    }

    #[test]
    fn s3_bind_should_resolve_string_fields_only() {
        let env = fake_env(&[
            ("ENDPOINT", "https://test.us-west-2.amazonaws.com"),
            ("REGION", "us-west-2"),
            ("ACCESS_KEY", "access_key"),
            ("SECRET_ACCESS_KEY", "secret_access_key"),
            ("TOKEN", "token"),
            ("MAX_PART_SIZE", "32mb"),
            ("MAX_CHUNK_SIZE", "42mb"),
        ]);
        let s3 = S3Config {
            endpoint: "_ENDPOINT_".to_string(),
            region: "_REGION_".to_string(),
            access_key: "_ACCESS_KEY_".to_string(),
            secret_access_key: "_SECRET_ACCESS_KEY_".to_string(),
            token: "_TOKEN_".to_string(),
            max_retries: 3,
            enable_ssl: true,
            max_part_size: "_MAX_PART_SIZE_".to_string(),
            max_chunk_size: "_MAX_CHUNK_SIZE_".to_string(),
            ..S3Config::default()
        }
        .bind_with(&env);
        assert_eq!(
            s3,
            S3Config {
                endpoint: "https://test.us-west-2.amazonaws.com".to_string(),
                region: "us-west-2".to_string(),
                access_key: "access_key".to_string(),
                secret_access_key: "secret_access_key".to_string(),
                token: "token".to_string(),
                max_retries: 3,
                enable_ssl: true,
                max_part_size: "32mb".to_string(),
                max_chunk_size: "42mb".to_string(),
                ..S3Config::default()
            }
        );
    }

    #[test]
    fn cloud_storage_bind_should_default_absent_client() {
        let config = CloudStorageConfig {
            url: "gs://test.vald".to_string(),
            write_buffer_size: 256,
            write_content_type: "text/plain".to_string(),
            ..CloudStorageConfig::default()
        }
        .bind_with(&fake_env(&[]));
        assert_eq!(config.client, Some(CloudStorageClient::default()));
        assert_eq!(config.write_buffer_size, 256);
        assert_eq!(config.write_content_type, "text/plain");
    }

    #[test]
    fn cloud_storage_bind_should_resolve_client_and_write_fields() {
        let env = fake_env(&[
            ("URL", "gs://test.vald"),
            ("CLIENT_CREDENTIALS_FILE_PATH", "/var/cred"),
            ("CLIENT_CREDENTIALS_JSON", "{\"type\": \"json\"}"),
            ("WRITE_CACHE_CONTROL", "no-cache"),
            ("WRITE_CONTENT_DISPOSITION", "attachment"),
            ("WRITE_CONTENT_ENCODING", "uint8"),
            ("WRITE_CONTENT_LANGUAGE", "en-US"),
            ("WRITE_CONTENT_TYPE", "text/plain"),
        ]);
        let config = CloudStorageConfig {
            url: "_URL_".to_string(),
            client: Some(CloudStorageClient {
                credentials_file_path: "_CLIENT_CREDENTIALS_FILE_PATH_".to_string(),
                credentials_json: "_CLIENT_CREDENTIALS_JSON_".to_string(),
            }),
            write_buffer_size: 256,
            write_cache_control: "_WRITE_CACHE_CONTROL_".to_string(),
            write_content_disposition: "_WRITE_CONTENT_DISPOSITION_".to_string(),
            write_content_encoding: "_WRITE_CONTENT_ENCODING_".to_string(),
            write_content_language: "_WRITE_CONTENT_LANGUAGE_".to_string(),
            write_content_type: "_WRITE_CONTENT_TYPE_".to_string(),
        }
        .bind_with(&env);
        assert_eq!(config.url, "gs://test.vald");
        assert_eq!(
            config.client,
            Some(CloudStorageClient {
                credentials_file_path: "/var/cred".to_string(),
                credentials_json: "{\"type\": \"json\"}".to_string(),
            })
        );
        assert_eq!(config.write_buffer_size, 256);
        assert_eq!(config.write_cache_control, "no-cache");
        assert_eq!(config.write_content_disposition, "attachment");
        assert_eq!(config.write_content_encoding, "uint8");
        assert_eq!(config.write_content_language, "en-US");
        assert_eq!(config.write_content_type, "text/plain");
    }
}
