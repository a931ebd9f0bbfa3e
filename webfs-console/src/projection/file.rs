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

use crate::projection::{project_blocks, BlockView, PreviewWindow};
use serde::Serialize;
use webfs_common::fs::Path;
use webfs_common::state::{FileStatus, LocatedBlocks, PosixPermission};
use webfs_util::common::{ByteUnit, LocalTime};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileDetailView {
    pub title: String,
    pub name: String,
    pub path: String,
    // Relative to the gateway prefix.
    pub download_path: String,
    pub permission: String,
    pub octal: String,
    pub flags: [bool; PosixPermission::FLAG_NUM],
    pub owner: String,
    pub group: String,
    pub replication: u16,
    pub block_size: String,
    pub size: String,
    pub modified: String,
    pub blocks: BlockView,
}

pub fn project_file(
    path: &Path,
    status: &FileStatus,
    located: &LocatedBlocks,
    tail_chunk_size: u64,
) -> FileDetailView {
    let name = path.name().to_string();
    FileDetailView {
        title: format!("File information - {}", name),
        name,
        path: path.to_string(),
        download_path: format!("{}?op=OPEN", path),
        permission: status.symbolic_permission(),
        octal: status.permission.to_string(),
        flags: status.posix_permission().to_flags(),
        owner: status.owner.clone(),
        group: status.group.clone(),
        replication: status.replication,
        block_size: ByteUnit::byte_to_string(status.block_size),
        size: ByteUnit::byte_to_string(located.file_length),
        modified: LocalTime::mills_to_string(status.modification_time),
        blocks: project_blocks(&located.located_blocks, located.file_length, tail_chunk_size),
    }
}

/// Text of a tail preview.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PreviewView {
    pub path: String,
    pub window: PreviewWindow,
    pub bytes: usize,
    pub text: String,
}

pub fn project_preview(path: &Path, window: PreviewWindow, data: &[u8]) -> PreviewView {
    PreviewView {
        path: path.to_string(),
        window,
        bytes: data.len(),
        text: String::from_utf8_lossy(data).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::projection::{project_file, project_preview, PreviewWindow};
    use webfs_common::fs::Path;
    use webfs_common::state::{FileStatus, LocatedBlocks, OctalPermission};
    use webfs_common::FsResult;

    #[test]
    fn file_detail() -> FsResult<()> {
        let path = Path::new("/logs/app.log")?;
        let status = FileStatus {
            permission: OctalPermission::new(1644)?,
            owner: "alice".to_string(),
            ..Default::default()
        };
        let located = LocatedBlocks {
            file_length: 0,
            ..Default::default()
        };

        let view = project_file(&path, &status, &located, 32768);
        assert_eq!(view.title, "File information - app.log");
        assert_eq!(view.download_path, "/logs/app.log?op=OPEN");
        assert_eq!(view.permission, "-rw-r--r-T");
        assert_eq!(
            view.flags,
            [true, true, true, false, true, false, false, true, false, false]
        );
        assert!(!view.blocks.show_blocks);
        Ok(())
    }

    #[test]
    fn preview_text() -> FsResult<()> {
        let path = Path::new("/a.txt")?;
        let view = project_preview(&path, PreviewWindow::tail(5, 32768), b"hello");
        assert_eq!(view.text, "hello");
        assert_eq!(view.bytes, 5);
        Ok(())
    }
}
