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

use config_binder::configs::Tls;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub struct TestCertificates {
    pub dir: TempDir,
    pub cert: String,
    pub key: String,
    pub ca: String,
}

/// Generates a self-signed certificate and key for TLS tests.
pub fn generate_test_certificates() -> TestCertificates {
    let dir = tempfile::tempdir().expect("Failed to create a temporary directory");
    let generated = rcgen::generate_simple_self_signed(vec![
        "localhost".to_string(),
        "127.0.0.1".to_string(),
    ])
    .expect("Failed to generate a self-signed certificate");

    let write = |name: &str, contents: String| {
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write a test certificate");
        path_string(&path)
    };
    let cert = write("test_cert.pem", generated.cert.pem());
    let key = write("test_key.pem", generated.signing_key.serialize_pem());
    let ca = write("test_ca.pem", generated.cert.pem());
    TestCertificates { dir, cert, key, ca }
}

pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl TestCertificates {
    pub fn tls(&self) -> Tls {
        Tls {
            enabled: true,
            cert: self.cert.clone(),
            key: self.key.clone(),
            ca: self.ca.clone(),
            insecure_skip_verify: false,
        }
    }

    pub fn missing(&self, name: &str) -> String {
        path_string(&self.dir.path().join(name))
    }
}
