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

use crate::bind::Bind;
use crate::compile::Compile;
use crate::env::{EnvLookup, resolve};
use crate::error::ConfigError;
use crate::options::tls::{NoServerVerification, TlsOption};
use crate::validatable::{Validatable, validate_tls_material};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::{ClientConfig, RootCertStore};
use rustls_pemfile::{certs, private_key};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tls {
    pub enabled: bool,
    pub cert: String,
    pub key: String,
    pub ca: String,
    pub insecure_skip_verify: bool,
}

impl Bind for Tls {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        Tls {
            cert: resolve(&self.cert, env),
            key: resolve(&self.key, env),
            ca: resolve(&self.ca, env),
            ..self
        }
    }
}

impl Validatable<ConfigError> for Tls {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_tls_material(self.enabled, &self.cert, &self.key)
    }
}

impl Compile for Tls {
    type Directive = TlsOption;

    fn opts(&self) -> Result<Vec<TlsOption>, ConfigError> {
        if !self.enabled {
            return Ok(Vec::new());
        }
        self.validate()?;

        let mut opts = Vec::with_capacity(4);
        opts.push(TlsOption::Certificates(load_certificates(&self.cert)?));
        opts.push(TlsOption::PrivateKey(load_private_key(&self.key)?));
        if !self.ca.is_empty() {
            opts.push(TlsOption::RootCertificates(load_certificates(&self.ca)?));
        }
        opts.push(TlsOption::InsecureSkipVerify(self.insecure_skip_verify));
        debug!("Compiled {} TLS options", opts.len());
        Ok(opts)
    }
}

impl Tls {
    pub fn client_config(&self) -> Result<Arc<ClientConfig>, ConfigError> {
        client_config(self)
    }
}

/// Builds a client TLS context from an enabled node.
///
/// Without a CA the bundled web PKI roots are trusted. A disabled node is rejected.
pub fn client_config(tls: &Tls) -> Result<Arc<ClientConfig>, ConfigError> {
    if !tls.enabled {
        error!("Cannot build a client TLS context from a disabled TLS configuration");
        return Err(ConfigError::invalid_option("tls.enabled", tls.enabled));
    }
    let mut chain = None;
    let mut key = None;
    let mut roots = RootCertStore::empty();
    let mut custom_roots = false;
    let mut insecure_skip_verify = false;
    for opt in tls.opts()? {
        match opt {
            TlsOption::Certificates(certs) => chain = Some(certs),
            TlsOption::PrivateKey(private_key) => key = Some(private_key),
            TlsOption::RootCertificates(certs) => {
                custom_roots = true;
                for cert in certs {
                    roots.add(cert).map_err(|e| {
                        error!("Failed to add a certificate from the CA file: {}. {e}", tls.ca);
                        ConfigError::InvalidTlsCertificate(tls.ca.clone())
                    })?;
                }
            }
            TlsOption::InsecureSkipVerify(skip) => insecure_skip_verify = skip,
        }
    }
    if !custom_roots {
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let builder = ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()?;
    let builder = if insecure_skip_verify {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoServerVerification::new(provider)))
    } else {
        builder.with_root_certificates(roots)
    };
    let config = match (chain, key) {
        (Some(chain), Some(key)) => builder.with_client_auth_cert(chain, key)?,
        _ => builder.with_no_client_auth(),
    };
    Ok(Arc::new(config))
}

fn load_certificates(path: &str) -> Result<Vec<CertificateDer<'static>>, ConfigError> {
    let file = File::open(path).inspect_err(|e| {
        error!("Failed to open the certificate file: {path}. {e}");
    })?;
    let mut reader = BufReader::new(file);
    let certs = certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            error!("Failed to parse the certificate file: {path}. {e}");
            ConfigError::InvalidTlsCertificate(path.to_owned())
        })?;
    if certs.is_empty() {
        error!("No certificates found in the certificate file: {path}");
        return Err(ConfigError::InvalidTlsCertificate(path.to_owned()));
    }
    Ok(certs)
}

fn load_private_key(path: &str) -> Result<PrivateKeyDer<'static>, ConfigError> {
    let file = File::open(path).inspect_err(|e| {
        error!("Failed to open the private key file: {path}. {e}");
    })?;
    let mut reader = BufReader::new(file);
    match private_key(&mut reader) {
        Ok(Some(key)) => Ok(key),
        Ok(None) => {
            error!("No private key found in the key file: {path}");
            Err(ConfigError::InvalidTlsPrivateKey(path.to_owned()))
        }
        Err(e) => {
            error!("Failed to parse the private key file: {path}. {e}");
            Err(ConfigError::InvalidTlsPrivateKey(path.to_owned()))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ConfigErrorKind;
    use std::collections::HashMap;
    use std::io;
    use std::path::Path;
    use tempfile::TempDir;

    pub(crate) struct Fixture {
        pub(crate) dir: TempDir,
        pub(crate) cert: String,
        pub(crate) key: String,
        pub(crate) ca: String,
    }

    pub(crate) fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let generated = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let write = |name: &str, contents: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, contents).unwrap();
            path_string(&path)
        };
        let cert = write("server.crt", &generated.cert.pem());
        let key = write("server.key", &generated.signing_key.serialize_pem());
        let ca = write("ca.pem", &generated.cert.pem());
        Fixture { dir, cert, key, ca }
    }

    fn path_string(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    pub(crate) fn enabled(fixture: &Fixture) -> Tls {
        Tls {
            enabled: true,
            cert: fixture.cert.clone(),
            key: fixture.key.clone(),
            ca: fixture.ca.clone(),
            insecure_skip_verify: false,
        }
    }

    #[test]
    fn bind_should_resolve_paths() {
        let env = HashMap::from([
            ("TLS_CERT".to_string(), "/certs/server.crt".to_string()),
            ("TLS_KEY".to_string(), "/certs/server.key".to_string()),
        ]);
        let tls = Tls {
            enabled: true,
            cert: "_TLS_CERT_".to_string(),
            key: "_TLS_KEY_".to_string(),
            ca: "_TLS_CA_".to_string(),
            insecure_skip_verify: true,
        }
        .bind_with(&env);
        assert_eq!(tls.cert, "/certs/server.crt");
        assert_eq!(tls.key, "/certs/server.key");
        assert_eq!(tls.ca, "_TLS_CA_");
        assert!(tls.enabled);
        assert!(tls.insecure_skip_verify);
    }

    #[test]
    fn disabled_tls_should_compile_to_nothing() {
        let tls = Tls {
            cert: "/does/not/exist".to_string(),
            ..Tls::default()
        };
        assert!(tls.opts().unwrap().is_empty());
    }

    #[test]
    fn enabled_tls_without_material_should_fail_before_reading_files() {
        let tls = Tls {
            enabled: true,
            ca: "/does/not/exist".to_string(),
            ..Tls::default()
        };
        let error = tls.opts().unwrap_err();
        assert_eq!(error.kind(), ConfigErrorKind::TlsCertOrKeyNotFound);
    }

    #[test]
    fn enabled_tls_should_load_material() {
        let fixture = fixture();
        let opts = enabled(&fixture).opts().unwrap();
        assert_eq!(opts.len(), 4);
        assert!(matches!(&opts[0], TlsOption::Certificates(certs) if certs.len() == 1));
        assert!(matches!(opts[1], TlsOption::PrivateKey(_)));
        assert!(matches!(&opts[2], TlsOption::RootCertificates(certs) if certs.len() == 1));
        assert!(matches!(opts[3], TlsOption::InsecureSkipVerify(false)));
    }

    #[test]
    fn root_certificates_should_be_skipped_without_ca() {
        let fixture = fixture();
        let tls = Tls {
            ca: String::new(),
            ..enabled(&fixture)
        };
        let opts = tls.opts().unwrap();
        assert_eq!(opts.len(), 3);
        assert!(!opts.iter().any(|opt| matches!(opt, TlsOption::RootCertificates(_))));
    }

    #[test]
    fn missing_key_file_should_surface_io_error() {
        let fixture = fixture();
        let tls = Tls {
            key: fixture.dir.path().join("missing.key").to_string_lossy().into_owned(),
            ..enabled(&fixture)
        };
        match tls.opts().unwrap_err() {
            ConfigError::Io(error) => assert_eq!(error.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn garbage_key_file_should_be_rejected() {
        let fixture = fixture();
        let garbage = fixture.dir.path().join("garbage.key");
        std::fs::write(&garbage, "not a key").unwrap();
        let tls = Tls {
            key: path_string(&garbage),
            ..enabled(&fixture)
        };
        assert_eq!(
            tls.opts().unwrap_err().kind(),
            ConfigErrorKind::InvalidTlsPrivateKey
        );
    }

    #[test]
    fn client_config_should_be_built_from_material() {
        let fixture = fixture();
        assert!(client_config(&enabled(&fixture)).is_ok());
        let insecure = Tls {
            ca: String::new(),
            insecure_skip_verify: true,
            ..enabled(&fixture)
        };
        assert!(insecure.client_config().is_ok());
    }

    #[test]
    fn client_config_should_reject_disabled_tls() {
        let fixture = fixture();
        let disabled = Tls {
            enabled: false,
            ..enabled(&fixture)
        };
        match client_config(&disabled).unwrap_err() {
            ConfigError::InvalidOption { name, value } => {
                assert_eq!(name, "tls.enabled");
                assert_eq!(value, "false");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(Tls::default().client_config().is_err());
    }
}
