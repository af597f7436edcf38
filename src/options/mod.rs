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

//! Typed directives produced by option compilation, one enum per client domain.

pub mod cassandra;
pub mod dialer;
pub mod grpc;
pub mod mysql;
pub mod redis;
pub mod server;
pub mod tls;

pub use cassandra::CassandraOption;
pub use dialer::{DialerOption, SocketFlag};
pub use grpc::GrpcOption;
pub use mysql::MySqlOption;
pub use redis::RedisOption;
pub use server::{ServerMode, ServerOption};
pub use tls::TlsOption;
