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

use crate::error::FsError;
use crate::FsResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DatanodeInfo {
    pub host_name: String,
    pub ip_addr: String,
    pub xfer_port: u16,
    pub info_port: u16,
}

impl DatanodeInfo {
    // Host name when the gateway reports one, the ip otherwise.
    pub fn host(&self) -> &str {
        if self.host_name.is_empty() {
            &self.ip_addr
        } else {
            &self.host_name
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtendedBlock {
    pub block_id: i64,
    pub block_pool_id: String,
    pub generation_stamp: i64,
    pub num_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LocatedBlock {
    pub start_offset: u64,
    pub block: ExtendedBlock,
    pub locations: Vec<DatanodeInfo>,
    pub is_corrupt: bool,
}

impl LocatedBlock {
    pub fn id(&self) -> i64 {
        self.block.block_id
    }

    pub fn offset(&self) -> u64 {
        self.start_offset
    }

    pub fn len(&self) -> u64 {
        self.block.num_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.block.num_bytes == 0
    }

    pub fn end(&self) -> u64 {
        self.start_offset + self.block.num_bytes
    }

    pub fn hosts(&self) -> Vec<String> {
        self.locations.iter().map(|x| x.host().to_string()).collect()
    }
}

/// Answer of GET_BLOCK_LOCATIONS.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LocatedBlocks {
    pub file_length: u64,
    pub located_blocks: Vec<LocatedBlock>,
    pub is_under_construction: bool,
    pub is_last_block_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_located_block: Option<LocatedBlock>,
}

impl LocatedBlocks {
    pub fn block_num(&self) -> usize {
        self.located_blocks.len()
    }

    // Blocks must follow each other without gaps and cover the whole file.
    pub fn check_contiguous(&self) -> FsResult<()> {
        let mut expect = 0;
        for (i, block) in self.located_blocks.iter().enumerate() {
            if block.offset() != expect {
                return Err(FsError::abnormal_data(format!(
                    "block {} starts at {}, expected {}",
                    i,
                    block.offset(),
                    expect
                )));
            }
            expect = block.end();
        }

        if expect != self.file_length {
            return Err(FsError::abnormal_data(format!(
                "blocks cover {} bytes, file length is {}",
                expect, self.file_length
            )));
        }
        Ok(())
    }

    pub fn block_at(&self, offset: u64) -> Option<&LocatedBlock> {
        let idx = self
            .located_blocks
            .partition_point(|b| b.end() <= offset);
        self.located_blocks
            .get(idx)
            .filter(|b| b.offset() <= offset && offset < b.end())
    }
}

#[cfg(test)]
mod tests {
    use crate::state::{DatanodeInfo, ExtendedBlock, LocatedBlock, LocatedBlocks};
    use crate::FsResult;

    fn block(id: i64, offset: u64, len: u64) -> LocatedBlock {
        LocatedBlock {
            start_offset: offset,
            block: ExtendedBlock {
                block_id: id,
                num_bytes: len,
                ..Default::default()
            },
            locations: vec![DatanodeInfo {
                host_name: format!("dn{}", id),
                ..Default::default()
            }],
            is_corrupt: false,
        }
    }

    #[test]
    fn contiguous() -> FsResult<()> {
        let blocks = LocatedBlocks {
            file_length: 250,
            located_blocks: vec![block(1, 0, 100), block(2, 100, 100), block(3, 200, 50)],
            ..Default::default()
        };
        blocks.check_contiguous()?;
        assert_eq!(blocks.block_at(0).map(|b| b.id()), Some(1));
        assert_eq!(blocks.block_at(100).map(|b| b.id()), Some(2));
        assert_eq!(blocks.block_at(249).map(|b| b.id()), Some(3));
        assert!(blocks.block_at(250).is_none());

        let gap = LocatedBlocks {
            file_length: 250,
            located_blocks: vec![block(1, 0, 100), block(3, 200, 50)],
            ..Default::default()
        };
        assert!(gap.check_contiguous().is_err());

        let short = LocatedBlocks {
            file_length: 300,
            located_blocks: vec![block(1, 0, 100)],
            ..Default::default()
        };
        assert!(short.check_contiguous().is_err());

        LocatedBlocks::default().check_contiguous()?;
        Ok(())
    }

    #[test]
    fn from_json() -> FsResult<()> {
        let json = r#"{"fileLength":1366,"isLastBlockComplete":true,"isUnderConstruction":false,
            "locatedBlocks":[{"block":{"blockId":1073741825,"blockPoolId":"BP-1","generationStamp":1001,
            "numBytes":1366},"isCorrupt":false,"startOffset":0,
            "locations":[{"hostName":"dn1.local","ipAddr":"10.0.0.1","xferPort":9866},
                         {"hostName":"","ipAddr":"10.0.0.2","xferPort":9866}]}]}"#;
        let blocks: LocatedBlocks = serde_json::from_str(json)?;
        assert_eq!(blocks.block_num(), 1);
        assert_eq!(blocks.located_blocks[0].hosts(), vec!["dn1.local", "10.0.0.2"]);
        blocks.check_contiguous()?;
        Ok(())
    }
}
