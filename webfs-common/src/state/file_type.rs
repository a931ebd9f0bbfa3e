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
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    #[default]
    File,
    Directory,
    Symlink,
}

impl FileType {
    pub fn is_dir(&self) -> bool {
        *self == FileType::Directory
    }

    // First character of the symbolic permission string.
    pub fn type_char(&self) -> char {
        if self.is_dir() {
            'd'
        } else {
            '-'
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::File => "FILE",
            FileType::Directory => "DIRECTORY",
            FileType::Symlink => "SYMLINK",
        }
    }
}

impl TryFrom<&str> for FileType {
    type Error = FsError;

    fn try_from(value: &str) -> FsResult<Self> {
        let file_type = match value.to_ascii_uppercase().as_str() {
            "FILE" | "F" => FileType::File,
            "DIRECTORY" | "DIR" | "D" => FileType::Directory,
            "SYMLINK" | "L" => FileType::Symlink,
            _ => return Err(FsError::common(format!("invalid file type: {}", value))),
        };
        Ok(file_type)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
