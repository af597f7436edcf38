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

//! Binding and compilation of declarative service configuration.
//!
//! A configuration tree is first bound, which resolves `_NAME_` environment
//! placeholders and fills in every required child, and then compiled into the
//! ordered option directives of each downstream client.

pub mod bind;
pub mod compile;
pub mod configs;
pub mod env;
pub mod error;
pub mod options;
pub mod validatable;

pub use bind::Bind;
pub use compile::Compile;
pub use configs::tls::client_config;
pub use env::{EnvLookup, ProcessEnv, actual_value, actual_values};
pub use error::{ConfigError, ConfigErrorKind};
pub use validatable::Validatable;
