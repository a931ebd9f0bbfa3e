// Copyright 2025 OPPO.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![allow(clippy::should_implement_trait)]

use crate::conf::{ExplorerConf, GatewayConf};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::read_to_string;
use webfs_util::common::LogConf;
use webfs_util::{try_err, CommonResult};

// Console configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConsoleConf {
    pub gateway: GatewayConf,

    pub console: ExplorerConf,

    pub log: LogConf,
}

impl ConsoleConf {
    pub const ENV_CONF_FILE: &'static str = "WEBFS_CONF_FILE";
    pub const ENV_GATEWAY_ADDRESS: &'static str = "WEBFS_GATEWAY_ADDRESS";
    pub const ENV_USER_NAME: &'static str = "WEBFS_USER_NAME";

    pub fn from<T: AsRef<str>>(path: T) -> CommonResult<Self> {
        let str = try_err!(read_to_string(path.as_ref()));
        let mut conf = try_err!(toml::from_str::<Self>(&str));

        // Check the environment variable configuration.
        if let Ok(v) = env::var(Self::ENV_GATEWAY_ADDRESS) {
            conf.gateway.address = v;
        }
        if let Ok(v) = env::var(Self::ENV_USER_NAME) {
            conf.gateway.user_name = v;
        }

        conf.init()?;
        Ok(conf)
    }

    pub fn from_str(str: &str) -> CommonResult<Self> {
        let mut conf = try_err!(toml::from_str::<Self>(str));
        conf.init()?;
        Ok(conf)
    }

    // Load from WEBFS_CONF_FILE when it is set, defaults otherwise.
    pub fn from_env() -> CommonResult<Self> {
        match env::var(Self::ENV_CONF_FILE) {
            Ok(path) => Self::from(path),
            Err(_) => {
                let mut conf = Self::default();
                if let Ok(v) = env::var(Self::ENV_GATEWAY_ADDRESS) {
                    conf.gateway.address = v;
                }
                if let Ok(v) = env::var(Self::ENV_USER_NAME) {
                    conf.gateway.user_name = v;
                }
                conf.init()?;
                Ok(conf)
            }
        }
    }

    pub fn init(&mut self) -> CommonResult<()> {
        self.gateway.init()?;
        self.console.init()?;
        Ok(())
    }

    pub fn print(&self) -> CommonResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
