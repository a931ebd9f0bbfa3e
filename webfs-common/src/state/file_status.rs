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

use crate::state::{FileType, OctalPermission, PosixPermission};
use serde::{Deserialize, Serialize};

/// One entry of a WebHDFS listing, as found under `FileStatuses.FileStatus`
/// or `FileStatus`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FileStatus {
    // Empty when the status describes the requested path itself.
    #[serde(rename = "pathSuffix")]
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub permission: OctalPermission,
    pub owner: String,
    pub group: String,
    pub replication: u16,
    pub length: u64,
    pub acl_bit: bool,

    pub block_size: u64,
    pub modification_time: i64,
    pub access_time: i64,
    pub children_num: i32,
    pub file_id: u64,
    pub storage_policy: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symlink: Option<String>,
}

impl FileStatus {
    pub fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }

    pub fn posix_permission(&self) -> PosixPermission {
        PosixPermission::from_octal(self.permission)
    }

    // Symbolic permission, with a trailing "+" when an ACL is present.
    pub fn symbolic_permission(&self) -> String {
        let mut s = PosixPermission::decode(self.permission, self.file_type);
        if self.acl_bit {
            s.push('+');
        }
        s
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileStatuses {
    #[serde(rename = "FileStatus", default)]
    pub file_status: Vec<FileStatus>,
}

#[cfg(test)]
mod tests {
    use crate::state::{FileStatus, FileStatuses, FileType};
    use crate::FsResult;

    #[test]
    fn from_json() -> FsResult<()> {
        let json = r#"{"FileStatus": [
            {"accessTime":0,"blockSize":0,"childrenNum":2,"fileId":16386,"group":"supergroup",
             "length":0,"modificationTime":1700000000000,"owner":"hdfs","pathSuffix":"tmp",
             "permission":"1777","replication":0,"storagePolicy":0,"type":"DIRECTORY"},
            {"accessTime":1700000000000,"blockSize":134217728,"childrenNum":0,"fileId":16390,
             "group":"supergroup","length":1366,"modificationTime":1700000000000,"owner":"alice",
             "pathSuffix":"a.txt","permission":"644","replication":3,"type":"FILE","aclBit":true}
        ]}"#;

        let list: FileStatuses = serde_json::from_str(json)?;
        println!("{:#?}", list);
        assert_eq!(list.file_status.len(), 2);

        let dir = &list.file_status[0];
        assert_eq!(dir.name, "tmp");
        assert_eq!(dir.file_type, FileType::Directory);
        assert_eq!(dir.symbolic_permission(), "drwxrwxrwt");

        let file = &list.file_status[1];
        assert_eq!(file.replication, 3);
        assert_eq!(file.length, 1366);
        assert_eq!(file.symbolic_permission(), "-rw-r--r--+");
        Ok(())
    }

    #[test]
    fn missing_fields() -> FsResult<()> {
        let status: FileStatus = serde_json::from_str(r#"{"pathSuffix":"x","type":"FILE"}"#)?;
        assert_eq!(status.permission.value(), 0);
        assert!(!status.acl_bit);
        Ok(())
    }
}
