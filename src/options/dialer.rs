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

use bitflags::bitflags;
use rustls::ClientConfig;
use std::sync::Arc;
use std::time::Duration;

bitflags! {
    /// Socket options applied by the dialer or the server listener.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SocketFlag: u32 {
        const REUSE_PORT = 1 << 0;
        const REUSE_ADDR = 1 << 1;
        const TCP_FAST_OPEN = 1 << 2;
        const TCP_NO_DELAY = 1 << 3;
        const TCP_CORK = 1 << 4;
        const TCP_QUICK_ACK = 1 << 5;
        const TCP_DEFER_ACCEPT = 1 << 6;
        const IP_TRANSPARENT = 1 << 7;
        const IP_RECOVER_DESTINATION_ADDR = 1 << 8;
    }
}

/// Directives consumed by the DNS-caching network dialer.
#[derive(Debug, Clone)]
pub enum DialerOption {
    DnsCacheExpiration(Duration),
    DnsRefreshDuration(Duration),
    EnableDnsCache,
    Keepalive(Duration),
    Timeout(Duration),
    FallbackDelay(Duration),
    EnableDualStack,
    SocketFlag(SocketFlag),
    Tls(Arc<ClientConfig>),
}
