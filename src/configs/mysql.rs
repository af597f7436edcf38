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
use crate::compile::{Compile, parse_duration};
use crate::configs::net::Net;
use crate::configs::tls::{Tls, client_config};
use crate::env::{EnvLookup, resolve};
use crate::error::ConfigError;
use crate::options::mysql::MySqlOption;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MySql {
    pub db: String,
    pub network: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub name: String,
    pub charset: String,
    pub timezone: String,
    pub initial_ping_time_limit: String,
    pub initial_ping_duration: String,
    pub conn_max_life_time: String,
    pub max_open_conns: usize,
    pub max_idle_conns: usize,
    pub tls: Option<Tls>,
    pub net: Option<Net>,
}

impl Bind for MySql {
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self {
        MySql {
            db: resolve(&self.db, env),
            network: resolve(&self.network, env),
            host: resolve(&self.host, env),
            user: resolve(&self.user, env),
            pass: resolve(&self.pass, env),
            name: resolve(&self.name, env),
            charset: resolve(&self.charset, env),
            timezone: resolve(&self.timezone, env),
            initial_ping_time_limit: resolve(&self.initial_ping_time_limit, env),
            initial_ping_duration: resolve(&self.initial_ping_duration, env),
            conn_max_life_time: resolve(&self.conn_max_life_time, env),
            tls: bind_or_default(self.tls, env),
            net: bind_or_default(self.net, env),
            ..self
        }
    }
}

impl Compile for MySql {
    type Directive = MySqlOption;

    fn opts(&self) -> Result<Vec<MySqlOption>, ConfigError> {
        let mut opts = vec![
            MySqlOption::Db(self.db.clone()),
            MySqlOption::Network(self.network.clone()),
            MySqlOption::Host(self.host.clone()),
            MySqlOption::Port(self.port),
            MySqlOption::User(self.user.clone()),
            MySqlOption::Pass(self.pass.clone()),
            MySqlOption::Name(self.name.clone()),
            MySqlOption::Charset(self.charset.clone()),
            MySqlOption::Timezone(self.timezone.clone()),
            MySqlOption::InitialPingTimeLimit(parse_duration(
                "mysql.initial_ping_time_limit",
                &self.initial_ping_time_limit,
            )?),
            MySqlOption::InitialPingDuration(parse_duration(
                "mysql.initial_ping_duration",
                &self.initial_ping_duration,
            )?),
            MySqlOption::ConnMaxLifeTime(parse_duration(
                "mysql.conn_max_life_time",
                &self.conn_max_life_time,
            )?),
            MySqlOption::MaxIdleConns(self.max_idle_conns),
            MySqlOption::MaxOpenConns(self.max_open_conns),
        ];
        if let Some(net) = &self.net {
            opts.push(MySqlOption::Dialer(net.opts()?));
        }
        if let Some(tls) = self.tls.as_ref().filter(|tls| tls.enabled) {
            opts.push(MySqlOption::Tls(client_config(tls)?));
        }
        debug!("Compiled {} MySQL options", opts.len());
        Ok(opts)
    }
}
