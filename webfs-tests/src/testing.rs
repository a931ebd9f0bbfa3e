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

use crate::{JsonRenderer, MockGateway, RecordingSurface};
use std::sync::Arc;
use webfs_common::conf::ExplorerConf;
use webfs_common::state::{
    DatanodeInfo, ExtendedBlock, FileStatus, FileType, LocatedBlock, LocatedBlocks,
    OctalPermission,
};
use webfs_console::context::Renderer;
use webfs_console::Console;
use webfs_util::common::Logger;
use webfs_util::runtime::AsyncRuntime;
use webfs_util::CommonResult;

/// A console wired to a mock gateway and a recording surface.
pub struct TestConsole {
    pub console: Console<MockGateway>,
    pub gateway: Arc<MockGateway>,
    pub surface: Arc<RecordingSurface>,
}

pub struct Testing;

impl Testing {
    pub const MODIFIED: i64 = 1_700_000_000_000;

    pub fn runtime() -> CommonResult<AsyncRuntime> {
        Logger::default();
        Ok(AsyncRuntime::current_thread("webfs-test")?)
    }

    pub fn multi_runtime() -> CommonResult<AsyncRuntime> {
        Logger::default();
        Ok(AsyncRuntime::new("webfs-test", 2)?)
    }

    pub fn console() -> TestConsole {
        Self::console_with(ExplorerConf::default(), Arc::new(JsonRenderer::new()))
    }

    pub fn console_with(conf: ExplorerConf, renderer: Arc<dyn Renderer>) -> TestConsole {
        let gateway = Arc::new(MockGateway::new());
        let surface = Arc::new(RecordingSurface::new());
        let console = Console::new(gateway.clone(), renderer, surface.clone(), conf);
        TestConsole {
            console,
            gateway,
            surface,
        }
    }

    pub fn dir(name: &str) -> FileStatus {
        FileStatus {
            name: name.to_string(),
            file_type: FileType::Directory,
            permission: OctalPermission::DIR_DEFAULT,
            owner: "hdfs".to_string(),
            group: "supergroup".to_string(),
            modification_time: Self::MODIFIED,
            ..Default::default()
        }
    }

    pub fn file(name: &str, length: u64) -> FileStatus {
        FileStatus {
            name: name.to_string(),
            file_type: FileType::File,
            permission: OctalPermission::FILE_DEFAULT,
            owner: "hdfs".to_string(),
            group: "supergroup".to_string(),
            replication: 3,
            length,
            block_size: 134217728,
            modification_time: Self::MODIFIED,
            ..Default::default()
        }
    }

    // Contiguous blocks of `block_size` covering `length` bytes, one replica each.
    pub fn blocks(length: u64, block_size: u64) -> LocatedBlocks {
        let mut located_blocks = vec![];
        let mut offset = 0;
        let mut id = 1073741825;
        while offset < length {
            let len = block_size.min(length - offset);
            located_blocks.push(LocatedBlock {
                start_offset: offset,
                block: ExtendedBlock {
                    block_id: id,
                    block_pool_id: "BP-1".to_string(),
                    generation_stamp: 1001,
                    num_bytes: len,
                },
                locations: vec![DatanodeInfo {
                    host_name: format!("dn{}", id % 3),
                    ip_addr: "10.0.0.1".to_string(),
                    xfer_port: 9866,
                    info_port: 9864,
                }],
                is_corrupt: false,
            });
            offset += len;
            id += 1;
        }

        LocatedBlocks {
            file_length: length,
            located_blocks,
            is_under_construction: false,
            is_last_block_complete: true,
            last_located_block: None,
        }
    }
}
