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

use crate::state::OctalPermission;
use serde::{Deserialize, Serialize};
use webfs_util::common::ByteUnit;
use webfs_util::{err_box, CommonResult};

// Console behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConf {
    // Bytes fetched by a tail preview.
    #[serde(skip)]
    pub tail_chunk_size: u64,
    #[serde(alias = "tail_chunk_size")]
    pub tail_chunk_size_str: String,

    // Directory shown when no address is given.
    pub home_dir: String,

    // Permission of directories created from the console, gateway default when unset.
    pub dir_permission: Option<OctalPermission>,
}

impl ExplorerConf {
    pub const TAIL_CHUNK_SIZE: u64 = 32768;

    pub fn init(&mut self) -> CommonResult<()> {
        self.tail_chunk_size = ByteUnit::from_str(&self.tail_chunk_size_str)?.as_byte();
        if self.tail_chunk_size == 0 {
            return err_box!("tail_chunk_size must be greater than 0");
        }
        if self.home_dir.trim().is_empty() {
            self.home_dir = "/".to_string();
        }
        Ok(())
    }
}

impl Default for ExplorerConf {
    fn default() -> Self {
        Self {
            tail_chunk_size: Self::TAIL_CHUNK_SIZE,
            tail_chunk_size_str: "32KB".to_string(),
            home_dir: "/".to_string(),
            dir_permission: None,
        }
    }
}
