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

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// WebHDFS operations used by the console.
#[repr(i8)]
#[derive(Debug, IntoPrimitive, TryFromPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
pub enum OpKind {
    // read operations.
    GetFileStatus = 1,
    ListStatus = 2,
    GetBlockLocations = 3,
    Open = 4,

    // mutating operations.
    Mkdirs = 10,
    Create = 11,
    SetPermission = 12,
    SetOwner = 13,
    SetReplication = 14,
}

impl OpKind {
    pub const ALL: [OpKind; 9] = [
        OpKind::GetFileStatus,
        OpKind::ListStatus,
        OpKind::GetBlockLocations,
        OpKind::Open,
        OpKind::Mkdirs,
        OpKind::Create,
        OpKind::SetPermission,
        OpKind::SetOwner,
        OpKind::SetReplication,
    ];

    // Value of the `op` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::GetFileStatus => "GETFILESTATUS",
            OpKind::ListStatus => "LISTSTATUS",
            OpKind::GetBlockLocations => "GET_BLOCK_LOCATIONS",
            OpKind::Open => "OPEN",
            OpKind::Mkdirs => "MKDIRS",
            OpKind::Create => "CREATE",
            OpKind::SetPermission => "SETPERMISSION",
            OpKind::SetOwner => "SETOWNER",
            OpKind::SetReplication => "SETREPLICATION",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_uppercase();
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    pub fn is_read(&self) -> bool {
        matches!(
            self,
            OpKind::GetFileStatus | OpKind::ListStatus | OpKind::GetBlockLocations | OpKind::Open
        )
    }

    pub fn method(&self) -> HttpMethod {
        if self.is_read() {
            HttpMethod::Get
        } else {
            HttpMethod::Put
        }
    }

    // Top level key of the success envelope, None for raw or empty bodies.
    pub fn response_key(&self) -> Option<&'static str> {
        match self {
            OpKind::GetFileStatus => Some("FileStatus"),
            OpKind::ListStatus => Some("FileStatuses"),
            OpKind::GetBlockLocations => Some("LocatedBlocks"),
            OpKind::Mkdirs => Some("boolean"),
            OpKind::SetReplication => Some("boolean"),
            _ => None,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
