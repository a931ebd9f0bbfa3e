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

#![allow(clippy::should_implement_trait)]

use crate::error::FsError;
use crate::FsResult;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"/+").unwrap());

/// An absolute path on the remote filesystem.
///
/// The root is "/", a non-root path never ends with "/", repeated slashes
/// collapse, an empty input is the root and a relative input is anchored at
/// the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    full_path: String,
}

impl Path {
    pub const SEPARATOR: &'static str = "/";

    pub fn new<T: AsRef<str>>(s: T) -> FsResult<Self> {
        Self::from_str(s)
    }

    pub fn from_str<T: AsRef<str>>(s: T) -> FsResult<Self> {
        let full_path = Self::normalize_path(s.as_ref());
        for name in full_path.split(Self::SEPARATOR) {
            if name == "." || name == ".." {
                return Err(FsError::invalid_path(
                    s.as_ref(),
                    format!("component {} is not allowed", name),
                ));
            }
            if name.contains(':') || name.contains('\0') {
                return Err(FsError::invalid_path(
                    s.as_ref(),
                    format!("component {} contains a reserved character", name),
                ));
            }
        }
        Ok(Self { full_path })
    }

    pub fn root() -> Self {
        Self {
            full_path: Self::SEPARATOR.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.full_path
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn name(&self) -> &str {
        match self.full_path.rfind(Self::SEPARATOR) {
            None => "",
            Some(v) => &self.full_path[v + 1..],
        }
    }

    pub fn is_root(&self) -> bool {
        self.full_path == Self::SEPARATOR
    }

    pub fn parent(&self) -> Option<Path> {
        if self.is_root() {
            return None;
        }
        match self.full_path.rfind(Self::SEPARATOR) {
            None | Some(0) => Some(Self::root()),
            Some(v) => Some(Self {
                full_path: self.full_path[..v].to_string(),
            }),
        }
    }

    pub fn join(&self, name: impl AsRef<str>) -> FsResult<Path> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(FsError::invalid_path(
                &self.full_path,
                "cannot join an empty name",
            ));
        }
        Self::from_str(Self::append_path(&self.full_path, name))
    }

    // Names from the root down, empty for the root itself.
    pub fn components(&self) -> Vec<&str> {
        if self.is_root() {
            vec![]
        } else {
            self.full_path[1..].split(Self::SEPARATOR).collect()
        }
    }

    // Every cumulative prefix, root first: /a/b -> [/, /a, /a/b].
    pub fn ancestors(&self) -> Vec<Path> {
        let mut result = vec![Self::root()];
        let mut current = String::new();
        for name in self.components() {
            current.push_str(Self::SEPARATOR);
            current.push_str(name);
            result.push(Self {
                full_path: current.clone(),
            });
        }
        result
    }

    /// Strips one trailing "/" from `prefix` and joins `name` with "/".
    pub fn append_path(prefix: &str, name: &str) -> String {
        let prefix = prefix.strip_suffix(Self::SEPARATOR).unwrap_or(prefix);
        format!("{}{}{}", prefix, Self::SEPARATOR, name)
    }

    fn normalize_path(path: &str) -> String {
        let p = SLASHES.replace_all(path.trim(), Self::SEPARATOR);
        let p = p.trim_end_matches(Self::SEPARATOR);
        if p.is_empty() {
            Self::SEPARATOR.to_string()
        } else if p.starts_with(Self::SEPARATOR) {
            p.to_string()
        } else {
            format!("{}{}", Self::SEPARATOR, p)
        }
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::root()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_path)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.full_path
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.full_path
    }
}

impl TryFrom<&str> for Path {
    type Error = FsError;

    fn try_from(s: &str) -> FsResult<Self> {
        Path::from_str(s)
    }
}
