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

//! Projection of bound nodes into option sequences.

use crate::error::ConfigError;
use std::time::Duration;
use tracing::error;

/// Compiles a bound node into the ordered directives of one client domain.
///
/// Implementations build the whole sequence before returning it, so an error
/// never comes with a partial sequence.
pub trait Compile {
    type Directive;

    fn opts(&self) -> Result<Vec<Self::Directive>, ConfigError>;
}

impl<T: Compile + ?Sized> Compile for &T {
    type Directive = T::Directive;

    fn opts(&self) -> Result<Vec<Self::Directive>, ConfigError> {
        (**self).opts()
    }
}

/// An absent node compiles to an empty sequence.
impl<T: Compile> Compile for Option<T> {
    type Directive = T::Directive;

    fn opts(&self) -> Result<Vec<Self::Directive>, ConfigError> {
        match self {
            Some(node) => node.opts(),
            None => Ok(Vec::new()),
        }
    }
}

/// Parses a duration field. An empty value means "use the downstream default"
/// and is returned as [`Duration::ZERO`].
pub fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Duration::ZERO);
    }
    humantime::parse_duration(value).map_err(|e| {
        error!("Failed to parse {field} duration: {value}. {e}");
        ConfigError::InvalidDuration {
            field,
            value: value.to_owned(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigErrorKind;

    struct Counter(usize);

    impl Compile for Counter {
        type Directive = usize;

        fn opts(&self) -> Result<Vec<usize>, ConfigError> {
            Ok((0..self.0).collect())
        }
    }

    #[test]
    fn absent_node_should_compile_to_empty_sequence() {
        let node: Option<Counter> = None;
        assert!(node.opts().unwrap().is_empty());
        let node: Option<&Counter> = None;
        assert!(node.opts().unwrap().is_empty());
    }

    #[test]
    fn present_node_should_compile_through_option_and_reference() {
        let counter = Counter(3);
        assert_eq!(Some(&counter).opts().unwrap(), vec![0, 1, 2]);
        assert_eq!(Some(Counter(1)).opts().unwrap(), vec![0]);
    }

    #[test]
    fn empty_duration_should_mean_downstream_default() {
        assert_eq!(parse_duration("timeout", "").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("timeout", "  ").unwrap(), Duration::ZERO);
    }

    #[test]
    fn go_style_durations_should_parse() {
        assert_eq!(parse_duration("timeout", "30ms").unwrap(), Duration::from_millis(30));
        assert_eq!(parse_duration("timeout", "3s").unwrap(), Duration::from_secs(3));
        assert_eq!(parse_duration("timeout", "10m").unwrap(), Duration::from_secs(600));
        assert_eq!(parse_duration("timeout", "24h").unwrap(), Duration::from_secs(86_400));
    }

    #[test]
    fn malformed_duration_should_name_the_field() {
        let error = parse_duration("dial_timeout", "soon").unwrap_err();
        assert_eq!(error.kind(), ConfigErrorKind::InvalidDuration);
        assert_eq!(error.to_string(), "Invalid duration for dial_timeout: soon");
    }
}
