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

//! Environment variable placeholders.
//!
//! A configuration value written as `_NAME_` is replaced with the value of the
//! environment variable `NAME` when the tree is bound. If the variable is not
//! set, the literal is kept as is. A value that is itself a placeholder is
//! followed until a plain value, an unset variable or a repeated name is reached,
//! so binding an already bound value leaves it unchanged.

use std::collections::{BTreeMap, HashMap};
use std::env;
use tracing::trace;

const PLACEHOLDER_DELIMITER: char = '_';
const MAX_PLACEHOLDER_DEPTH: usize = 16;

/// Source of environment values used while binding.
pub trait EnvLookup {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Reads the process environment on every lookup.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvLookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: EnvLookup + ?Sized> EnvLookup for &E {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Returns the variable name for a `_NAME_` placeholder.
pub fn placeholder_name(raw: &str) -> Option<&str> {
    if raw.len() <= 2 {
        return None;
    }
    raw.strip_prefix(PLACEHOLDER_DELIMITER)?
        .strip_suffix(PLACEHOLDER_DELIMITER)
}

pub fn resolve<E: EnvLookup + ?Sized>(raw: &str, env: &E) -> String {
    let mut current = raw.to_owned();
    let mut seen: Vec<String> = Vec::new();
    while let Some(name) = placeholder_name(&current) {
        if seen.len() == MAX_PLACEHOLDER_DEPTH || seen.iter().any(|known| known == name) {
            break;
        }
        let Some(value) = env.lookup(name) else {
            break;
        };
        trace!("Resolved placeholder {current} from environment variable {name}");
        seen.push(name.to_owned());
        current = value;
    }
    current
}

pub fn resolve_all<E: EnvLookup + ?Sized>(raw: &[String], env: &E) -> Vec<String> {
    raw.iter().map(|value| resolve(value, env)).collect()
}

/// Resolves `raw` against the process environment.
pub fn actual_value(raw: &str) -> String {
    resolve(raw, &ProcessEnv)
}

/// Resolves every element of `raw` against the process environment.
pub fn actual_values(raw: &[String]) -> Vec<String> {
    resolve_all(raw, &ProcessEnv)
}
