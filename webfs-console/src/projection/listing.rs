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
use webfs_common::fs::Path;
use webfs_common::state::{FileStatus, FileType};
use webfs_util::common::{ByteUnit, LocalTime};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Breadcrumb {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EntryRow {
    pub name: String,
    pub path: String,
    pub file_type: FileType,
    pub is_dir: bool,
    pub permission: String,
    pub octal: String,
    pub owner: String,
    pub group: String,
    pub replication: u16,
    pub length: u64,
    pub size: String,
    pub modified: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListingView {
    pub dir: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub rows: Vec<EntryRow>,
}

pub fn breadcrumbs(dir: &Path) -> Vec<Breadcrumb> {
    dir.ancestors()
        .into_iter()
        .map(|p| {
            let name = if p.is_root() {
                Path::SEPARATOR.to_string()
            } else {
                p.name().to_string()
            };
            Breadcrumb {
                name,
                path: p.into(),
            }
        })
        .collect()
}

pub fn project_row(dir: &Path, status: &FileStatus) -> EntryRow {
    EntryRow {
        name: status.name.clone(),
        path: Path::append_path(dir.path(), &status.name),
        file_type: status.file_type,
        is_dir: status.is_dir(),
        permission: status.symbolic_permission(),
        octal: status.permission.to_string(),
        owner: status.owner.clone(),
        group: status.group.clone(),
        replication: status.replication,
        length: status.length,
        size: ByteUnit::byte_to_string(status.length),
        modified: LocalTime::mills_to_string(status.modification_time),
    }
}

/// One row per entry, in gateway order.
pub fn project_listing(dir: &Path, entries: &[FileStatus]) -> ListingView {
    ListingView {
        dir: dir.to_string(),
        breadcrumbs: breadcrumbs(dir),
        rows: entries.iter().map(|x| project_row(dir, x)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use crate::projection::project_listing;
    use webfs_common::fs::Path;
    use webfs_common::state::{FileStatus, FileType, OctalPermission};
    use webfs_common::FsResult;

    fn entry(name: &str, file_type: FileType, acl: bool) -> FileStatus {
        FileStatus {
            name: name.to_string(),
            file_type,
            permission: OctalPermission::new(755).unwrap(),
            owner: "hdfs".to_string(),
            group: "supergroup".to_string(),
            acl_bit: acl,
            length: 2048,
            ..Default::default()
        }
    }

    #[test]
    fn rows_follow_input() -> FsResult<()> {
        let dir = Path::new("/user/alice")?;
        for n in [0, 1, 7] {
            let entries: Vec<FileStatus> = (0..n)
                .map(|i| entry(&format!("f{}", i), FileType::File, false))
                .collect();
            let view = project_listing(&dir, &entries);
            assert_eq!(view.rows.len(), n);
        }

        let entries = vec![
            entry("zeta", FileType::Directory, true),
            entry("alpha", FileType::File, false),
        ];
        let view = project_listing(&dir, &entries);
        assert_eq!(view.rows[0].name, "zeta");
        assert_eq!(view.rows[0].path, "/user/alice/zeta");
        assert_eq!(view.rows[0].permission, "drwxr-xr-x+");
        assert_eq!(view.rows[1].permission, "-rwxr-xr-x");
        assert_eq!(view.rows[1].size, "2.0KB");
        Ok(())
    }

    #[test]
    fn breadcrumbs() -> FsResult<()> {
        let view = project_listing(&Path::new("/user/alice")?, &[]);
        let crumbs: Vec<(&str, &str)> = view
            .breadcrumbs
            .iter()
            .map(|b| (b.name.as_str(), b.path.as_str()))
            .collect();
        assert_eq!(
            crumbs,
            vec![("/", "/"), ("user", "/user"), ("alice", "/user/alice")]
        );

        let view = project_listing(&Path::root(), &[]);
        assert_eq!(view.breadcrumbs.len(), 1);
        assert_eq!(view.dir, "/");
        Ok(())
    }
}
