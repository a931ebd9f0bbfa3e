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
use crate::state::FileType;
use crate::FsResult;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const SYMBOLS: [&str; 8] = ["---", "--x", "-w-", "-wx", "r--", "r-x", "rw-", "rwx"];

#[repr(u8)]
#[derive(Debug, IntoPrimitive, TryFromPrimitive, PartialEq, Eq, Hash, Copy, Clone, Default)]
pub enum PosixAction {
    #[default]
    None = 0,
    Execute = 1,
    Write = 2,
    WriteExecute = 3,
    Read = 4,
    ReadExecute = 5,
    ReadWrite = 6,
    All = 7,
}

impl PosixAction {
    pub fn from_bits(read: bool, write: bool, execute: bool) -> Self {
        let v = (read as u8) << 2 | (write as u8) << 1 | execute as u8;
        Self::try_from(v).unwrap_or_default()
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOLS[u8::from(*self) as usize]
    }

    pub fn can_read(&self) -> bool {
        u8::from(*self) & 4 != 0
    }

    pub fn can_write(&self) -> bool {
        u8::from(*self) & 2 != 0
    }

    pub fn can_execute(&self) -> bool {
        u8::from(*self) & 1 != 0
    }

    fn bits(&self) -> [bool; 3] {
        [self.can_read(), self.can_write(), self.can_execute()]
    }
}

impl TryFrom<&str> for PosixAction {
    type Error = FsError;

    fn try_from(s: &str) -> FsResult<Self> {
        match SYMBOLS.iter().position(|x| *x == s) {
            Some(v) => Ok(Self::try_from(v as u8).unwrap_or_default()),
            None => Err(FsError::encoding(format!("invalid permission triple: {}", s))),
        }
    }
}

/// Permission bits written the way the gateway writes them: octal digits in a
/// decimal number, 755 rather than 493. The leading fourth digit is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct OctalPermission(u16);

impl OctalPermission {
    pub const MAX: u16 = 7777;

    pub const DIR_DEFAULT: OctalPermission = OctalPermission(755);

    pub const FILE_DEFAULT: OctalPermission = OctalPermission(644);

    pub fn new(value: u16) -> FsResult<Self> {
        let v = Self::check(value as u32)?;
        Ok(Self(v))
    }

    pub fn from_str<T: AsRef<str>>(s: T) -> FsResult<Self> {
        let s = s.as_ref().trim();
        if s.is_empty() || s.len() > 5 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(FsError::encoding(format!("invalid octal permission: {:?}", s)));
        }
        let value: u32 = s.parse()?;
        Ok(Self(Self::check(value)?))
    }

    fn check(value: u32) -> FsResult<u16> {
        if value > Self::MAX as u32 {
            return Err(FsError::encoding(format!(
                "octal permission {} is out of range [0, {}]",
                value,
                Self::MAX
            )));
        }

        let mut n = value;
        while n > 0 {
            if n % 10 > 7 {
                return Err(FsError::encoding(format!(
                    "invalid octal digit {} in {}",
                    n % 10,
                    value
                )));
            }
            n /= 10;
        }
        Ok(value as u16)
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for OctalPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl Serialize for OctalPermission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct OctalVisitor;

impl<'de> Visitor<'de> for OctalVisitor {
    type Value = OctalPermission;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an octal permission such as \"755\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        OctalPermission::from_str(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let v = u16::try_from(v).map_err(E::custom)?;
        OctalPermission::new(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        let v = u16::try_from(v).map_err(E::custom)?;
        OctalPermission::new(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for OctalPermission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OctalVisitor)
    }
}

/// Structured form of a permission.
///
/// `special` is the leading octal digit; only its lowest bit (sticky) is shown in
/// the symbolic form. The sticky flag always rewrites the last character, `t`
/// when other has execute and `T` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PosixPermission {
    pub special: u8,
    pub user_act: PosixAction,
    pub group_act: PosixAction,
    pub other_act: PosixAction,
}

impl PosixPermission {
    pub const FLAG_NUM: usize = 10;

    pub fn new(user_act: PosixAction, group_act: PosixAction, other_act: PosixAction) -> Self {
        Self {
            special: 0,
            user_act,
            group_act,
            other_act,
        }
    }

    pub fn with_sticky(mut self, sticky: bool) -> Self {
        if sticky {
            self.special |= 1;
        } else {
            self.special &= !1;
        }
        self
    }

    pub fn sticky(&self) -> bool {
        self.special & 1 == 1
    }

    pub fn from_octal(bits: OctalPermission) -> Self {
        let mut n = bits.value();
        let mut digit = || {
            let d = (n % 10) as u8;
            n /= 10;
            PosixAction::try_from(d).unwrap_or_default()
        };
        let other_act = digit();
        let group_act = digit();
        let user_act = digit();

        Self {
            special: (bits.value() / 1000) as u8,
            user_act,
            group_act,
            other_act,
        }
    }

    pub fn to_octal(&self) -> OctalPermission {
        let v = self.special as u16 * 1000
            + u8::from(self.user_act) as u16 * 100
            + u8::from(self.group_act) as u16 * 10
            + u8::from(self.other_act) as u16;
        OctalPermission(v)
    }

    pub fn decode(bits: OctalPermission, file_type: FileType) -> String {
        Self::from_octal(bits).to_symbolic(file_type)
    }

    pub fn encode(flags: [bool; Self::FLAG_NUM]) -> OctalPermission {
        Self::from_flags(flags).to_octal()
    }

    pub fn to_symbolic(&self, file_type: FileType) -> String {
        let mut s = String::with_capacity(Self::FLAG_NUM);
        s.push(file_type.type_char());
        s.push_str(self.user_act.symbol());
        s.push_str(self.group_act.symbol());
        s.push_str(self.other_act.symbol());

        if self.sticky() {
            s.pop();
            s.push(if self.other_act.can_execute() { 't' } else { 'T' });
        }
        s
    }

    pub fn parse_symbolic(s: &str) -> FsResult<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != Self::FLAG_NUM || !s.is_ascii() {
            return Err(FsError::encoding(format!(
                "symbolic permission must have {} characters: {:?}",
                Self::FLAG_NUM,
                s
            )));
        }
        if chars[0] != 'd' && chars[0] != '-' {
            return Err(FsError::encoding(format!("invalid file type char in {}", s)));
        }

        let (other, sticky) = match chars[9] {
            't' => (format!("{}x", &s[7..9]), true),
            'T' => (format!("{}-", &s[7..9]), true),
            _ => (s[7..10].to_string(), false),
        };

        let perm = Self::new(
            PosixAction::try_from(&s[1..4])?,
            PosixAction::try_from(&s[4..7])?,
            PosixAction::try_from(other.as_str())?,
        );
        Ok(perm.with_sticky(sticky))
    }

    // [sticky, ur, uw, ux, gr, gw, gx, or, ow, ox]
    pub fn to_flags(&self) -> [bool; Self::FLAG_NUM] {
        let mut flags = [false; Self::FLAG_NUM];
        flags[0] = self.sticky();
        flags[1..4].copy_from_slice(&self.user_act.bits());
        flags[4..7].copy_from_slice(&self.group_act.bits());
        flags[7..10].copy_from_slice(&self.other_act.bits());
        flags
    }

    pub fn from_flags(flags: [bool; Self::FLAG_NUM]) -> Self {
        let perm = Self::new(
            PosixAction::from_bits(flags[1], flags[2], flags[3]),
            PosixAction::from_bits(flags[4], flags[5], flags[6]),
            PosixAction::from_bits(flags[7], flags[8], flags[9]),
        );
        perm.with_sticky(flags[0])
    }
}

impl From<OctalPermission> for PosixPermission {
    fn from(value: OctalPermission) -> Self {
        Self::from_octal(value)
    }
}
