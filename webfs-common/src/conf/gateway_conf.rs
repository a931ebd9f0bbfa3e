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

use serde::{Deserialize, Serialize};
use std::time::Duration;
use webfs_util::{err_box, CommonResult};

// WebHDFS gateway endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConf {
    // scheme://host:port of the gateway, without a trailing "/".
    pub address: String,

    // Path prefix the filesystem is mounted under.
    pub prefix: String,

    // Sent as user.name on every request when not empty.
    pub user_name: String,

    pub conn_timeout_ms: u64,

    // 0 means no timeout.
    pub request_timeout_ms: u64,
}

impl GatewayConf {
    pub const DEFAULT_ADDRESS: &'static str = "http://localhost:9870";

    pub const DEFAULT_PREFIX: &'static str = "/webhdfs/v1";

    pub fn init(&mut self) -> CommonResult<()> {
        let address = self.address.trim().trim_end_matches('/');
        if !address.starts_with("http://") && !address.starts_with("https://") {
            return err_box!("gateway address must be an http(s) url: {}", self.address);
        }
        self.address = address.to_string();

        let prefix = self.prefix.trim().trim_matches('/');
        self.prefix = if prefix.is_empty() {
            String::new()
        } else {
            format!("/{}", prefix)
        };
        self.user_name = self.user_name.trim().to_string();

        Ok(())
    }

    pub fn user_name(&self) -> Option<&str> {
        if self.user_name.is_empty() {
            None
        } else {
            Some(&self.user_name)
        }
    }

    pub fn conn_timeout(&self) -> Duration {
        Duration::from_millis(self.conn_timeout_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.request_timeout_ms))
        }
    }

    // Base url every request path is appended to.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.address, self.prefix)
    }
}

impl Default for GatewayConf {
    fn default() -> Self {
        Self {
            address: Self::DEFAULT_ADDRESS.to_string(),
            prefix: Self::DEFAULT_PREFIX.to_string(),
            user_name: "".to_string(),
            conn_timeout_ms: 30 * 1000,
            request_timeout_ms: 0,
        }
    }
}
