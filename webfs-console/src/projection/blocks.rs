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

use serde::Serialize;
use webfs_common::state::LocatedBlock;
use webfs_util::common::ByteUnit;

/// Byte range `[start, end)` fetched by a tail preview. `offset` is what goes
/// on the OPEN request, None when the window starts at the beginning.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PreviewWindow {
    pub start: u64,
    pub end: u64,
    pub offset: Option<u64>,
}

impl PreviewWindow {
    pub fn tail(file_length: u64, chunk_size: u64) -> Self {
        let start = file_length.saturating_sub(chunk_size);
        Self {
            start,
            end: file_length,
            offset: if start > 0 { Some(start) } else { None },
        }
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BlockEntry {
    pub index: usize,
    pub label: String,
    pub block_id: i64,
    pub generation_stamp: i64,
    pub offset: u64,
    pub length: u64,
    pub size: String,
    pub hosts: Vec<String>,
    pub corrupt: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BlockView {
    pub file_length: u64,
    pub show_blocks: bool,
    pub menu: Vec<BlockEntry>,
    pub preview: PreviewWindow,
}

pub fn project_blocks(blocks: &[LocatedBlock], file_length: u64, tail_chunk_size: u64) -> BlockView {
    let menu = if file_length == 0 {
        vec![]
    } else {
        blocks
            .iter()
            .enumerate()
            .map(|(i, b)| BlockEntry {
                index: i,
                label: format!("Block {}", i),
                block_id: b.id(),
                generation_stamp: b.block.generation_stamp,
                offset: b.offset(),
                length: b.len(),
                size: ByteUnit::byte_to_string(b.len()),
                hosts: b.hosts(),
                corrupt: b.is_corrupt,
            })
            .collect()
    };

    BlockView {
        file_length,
        show_blocks: file_length > 0,
        menu,
        preview: PreviewWindow::tail(file_length, tail_chunk_size),
    }
}

#[cfg(test)]
mod tests {
    use crate::projection::{project_blocks, PreviewWindow};
    use webfs_common::state::{ExtendedBlock, LocatedBlock};

    const TAIL: u64 = 32768;

    #[test]
    fn preview_window() {
        let w = PreviewWindow::tail(100000, TAIL);
        assert_eq!((w.start, w.end), (67232, 100000));
        assert_eq!(w.offset, Some(67232));
        assert_eq!(w.len(), TAIL);

        let w = PreviewWindow::tail(1000, TAIL);
        assert_eq!((w.start, w.end), (0, 1000));
        assert_eq!(w.offset, None);

        let w = PreviewWindow::tail(TAIL, TAIL);
        assert_eq!(w.offset, None);
        assert_eq!(w.len(), TAIL);
    }

    #[test]
    fn block_menu() {
        let blocks: Vec<LocatedBlock> = (0..3)
            .map(|i| LocatedBlock {
                start_offset: i * 100,
                block: ExtendedBlock {
                    block_id: 1000 + i as i64,
                    num_bytes: 100,
                    ..Default::default()
                },
                ..Default::default()
            })
            .collect();

        let view = project_blocks(&blocks, 300, TAIL);
        assert!(view.show_blocks);
        let labels: Vec<&str> = view.menu.iter().map(|x| x.label.as_str()).collect();
        assert_eq!(labels, vec!["Block 0", "Block 1", "Block 2"]);
        assert_eq!(view.menu[2].offset, 200);

        let view = project_blocks(&[], 0, TAIL);
        assert!(!view.show_blocks);
        assert!(view.menu.is_empty());
        assert!(view.preview.is_empty());
    }
}
