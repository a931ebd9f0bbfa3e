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

use webfs_common::error::FsError;
use webfs_common::fs::Path;
use webfs_common::state::{FileStatus, OctalPermission, PosixPermission};
use webfs_common::FsResult;
use webfs_util::common::{ByteUnit, LocalTime};

/// Octal digits ("755", "1777") or a full symbolic string ("drwxr-xr-t").
pub fn parse_mode(mode: &str) -> FsResult<OctalPermission> {
    let mode = mode.trim();
    if mode.chars().all(|c| c.is_ascii_digit()) {
        OctalPermission::from_str(mode)
    } else {
        Ok(PosixPermission::parse_symbolic(mode)?.to_octal())
    }
}

/// "owner", "owner:group" or ":group".
pub fn parse_owner(arg: &str) -> FsResult<(String, String)> {
    let (owner, group) = match arg.split_once(':') {
        Some((o, g)) => (o.trim(), g.trim()),
        None => (arg.trim(), ""),
    };
    if owner.is_empty() && group.is_empty() {
        return Err(FsError::common(format!("invalid owner: {:?}", arg)));
    }
    Ok((owner.to_string(), group.to_string()))
}

/// Resolve `arg` against `cwd`, understanding "." and "..".
pub fn resolve_path(cwd: &Path, arg: &str) -> FsResult<Path> {
    let arg = arg.trim();
    let mut parts: Vec<&str> = if arg.starts_with(Path::SEPARATOR) {
        vec![]
    } else {
        cwd.components()
    };

    for name in arg.split(Path::SEPARATOR) {
        match name {
            "" | "." => (),
            ".." => {
                parts.pop();
            }
            v => parts.push(v),
        }
    }
    Path::from_str(format!("/{}", parts.join(Path::SEPARATOR)))
}

pub fn format_status(path: &Path, status: &FileStatus) -> String {
    let mut lines = vec![
        format!("Path:         {}", path),
        format!("Type:         {}", status.file_type),
        format!(
            "Permission:   {} ({})",
            status.symbolic_permission(),
            status.permission
        ),
        format!("Owner:        {}", status.owner),
        format!("Group:        {}", status.group),
        format!("Modified:     {}", LocalTime::mills_to_string(status.modification_time)),
    ];

    if status.is_dir() {
        lines.push(format!("Children:     {}", status.children_num));
    } else {
        lines.push(format!(
            "Size:         {} ({} bytes)",
            ByteUnit::byte_to_string(status.length),
            status.length
        ));
        lines.push(format!("Replication:  {}", status.replication));
        lines.push(format!(
            "Block size:   {}",
            ByteUnit::byte_to_string(status.block_size)
        ));
    }
    if let Some(target) = &status.symlink {
        lines.push(format!("Symlink:      {}", target));
    }
    lines.join("\n")
}
