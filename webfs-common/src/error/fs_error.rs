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

use crate::state::RemoteException;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::io;
use std::num::ParseIntError;
use thiserror::Error;
use webfs_util::error::{ErrorExt, ErrorImpl, StringError};
use webfs_util::CommonError;

// Uniformly defined console error codes.
#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
pub enum ErrorKind {
    IO = 1,
    Transport = 2,
    Gateway = 3,
    Encoding = 4,
    InvalidPath = 5,
    AbnormalData = 6,

    #[num_enum(default)]
    Common = 10000,
}

/// Where a gateway request went and what came back, if anything did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub url: String,
    // None when the request never got a response (connect failure, timeout).
    pub status: Option<u16>,
}

/// A RemoteException envelope returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFailure {
    pub url: String,
    pub status: u16,
    pub exception: RemoteException,
}

#[derive(Debug, Error)]
pub enum FsError {
    // local io error.
    #[error("{0}")]
    IO(ErrorImpl<io::Error>),

    // The request failed without a RemoteException envelope.
    #[error("{0}")]
    Transport(ErrorImpl<StringError, RequestInfo>),

    // The gateway reported a RemoteException.
    #[error("{0}")]
    Gateway(ErrorImpl<StringError, RemoteFailure>),

    // Malformed permission input, out-of-range octal value.
    #[error("{0}")]
    Encoding(ErrorImpl<StringError>),

    // The path is incorrect.
    #[error("{0}")]
    InvalidPath(ErrorImpl<StringError>),

    // The gateway answered with data the console cannot interpret.
    #[error("{0}")]
    AbnormalData(ErrorImpl<StringError>),

    // Other errors that are not defined.
    #[error("{0}")]
    Common(ErrorImpl<StringError>),
}

impl FsError {
    pub fn common<T: AsRef<str>>(error: T) -> Self {
        let str = error.as_ref();
        Self::Common(ErrorImpl::with_source(str.into()))
    }

    pub fn io(error: io::Error) -> Self {
        Self::IO(ErrorImpl::with_source(error))
    }

    pub fn transport(url: impl Into<String>, status: Option<u16>, cause: impl Into<String>) -> Self {
        let info = RequestInfo {
            url: url.into(),
            status,
        };
        Self::Transport(ErrorImpl::with_data(cause.into().into(), info))
    }

    pub fn gateway(url: impl Into<String>, status: u16, exception: RemoteException) -> Self {
        let msg = if exception.message.is_empty() {
            exception.exception.clone()
        } else {
            exception.message.clone()
        };
        let failure = RemoteFailure {
            url: url.into(),
            status,
            exception,
        };
        Self::Gateway(ErrorImpl::with_data(msg.into(), failure))
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(ErrorImpl::with_source(msg.into().into()))
    }

    pub fn invalid_path(path: impl AsRef<str>, ext_msg: impl AsRef<str>) -> Self {
        let msg = format!("Path {} is invalid, {}", path.as_ref(), ext_msg.as_ref());
        Self::InvalidPath(ErrorImpl::with_source(msg.into()))
    }

    pub fn abnormal_data(msg: impl Into<String>) -> Self {
        Self::AbnormalData(ErrorImpl::with_source(msg.into().into()))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::IO(_) => ErrorKind::IO,
            FsError::Transport(_) => ErrorKind::Transport,
            FsError::Gateway(_) => ErrorKind::Gateway,
            FsError::Encoding(_) => ErrorKind::Encoding,
            FsError::InvalidPath(_) => ErrorKind::InvalidPath,
            FsError::AbnormalData(_) => ErrorKind::AbnormalData,
            FsError::Common(_) => ErrorKind::Common,
        }
    }

    // HTTP status of the failed request, if the gateway answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FsError::Transport(e) => e.data().and_then(|v| v.status),
            FsError::Gateway(e) => e.data().map(|v| v.status),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            FsError::Transport(e) => e.data().map(|v| v.url.as_str()),
            FsError::Gateway(e) => e.data().map(|v| v.url.as_str()),
            _ => None,
        }
    }

    pub fn remote(&self) -> Option<&RemoteException> {
        match self {
            FsError::Gateway(e) => e.data().map(|v| &v.exception),
            _ => None,
        }
    }

    // The message without the context trail.
    pub fn cause(&self) -> String {
        match self {
            FsError::IO(e) => e.source.to_string(),
            FsError::Transport(e) => e.source.as_str().to_string(),
            FsError::Gateway(e) => e.source.as_str().to_string(),
            FsError::Encoding(e) => e.source.as_str().to_string(),
            FsError::InvalidPath(e) => e.source.as_str().to_string(),
            FsError::AbnormalData(e) => e.source.as_str().to_string(),
            FsError::Common(e) => e.source.as_str().to_string(),
        }
    }
}

impl From<String> for FsError {
    fn from(value: String) -> Self {
        FsError::Common(ErrorImpl::with_source(value.into()))
    }
}

impl From<CommonError> for FsError {
    fn from(value: CommonError) -> Self {
        FsError::Common(ErrorImpl::with_source(value.into()))
    }
}

impl From<io::Error> for FsError {
    fn from(value: io::Error) -> Self {
        Self::IO(ErrorImpl::with_source(value))
    }
}

impl From<serde_json::Error> for FsError {
    fn from(value: serde_json::Error) -> Self {
        Self::AbnormalData(ErrorImpl::with_source(value.to_string().into()))
    }
}

impl From<toml::de::Error> for FsError {
    fn from(value: toml::de::Error) -> Self {
        Self::Common(ErrorImpl::with_source(value.to_string().into()))
    }
}

impl From<ParseIntError> for FsError {
    fn from(value: ParseIntError) -> Self {
        Self::Encoding(ErrorImpl::with_source(value.to_string().into()))
    }
}

impl ErrorExt for FsError {
    fn ctx(self, ctx: impl Into<String>) -> Self {
        match self {
            FsError::IO(e) => FsError::IO(e.ctx(ctx)),
            FsError::Transport(e) => FsError::Transport(e.ctx(ctx)),
            FsError::Gateway(e) => FsError::Gateway(e.ctx(ctx)),
            FsError::Encoding(e) => FsError::Encoding(e.ctx(ctx)),
            FsError::InvalidPath(e) => FsError::InvalidPath(e.ctx(ctx)),
            FsError::AbnormalData(e) => FsError::AbnormalData(e.ctx(ctx)),
            FsError::Common(e) => FsError::Common(e.ctx(ctx)),
        }
    }

    // Only a request that never got an answer is worth repeating by hand.
    fn should_retry(&self) -> bool {
        matches!(self, FsError::Transport(_)) && self.status().is_none()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ErrorKind, FsError};
    use crate::state::RemoteException;
    use webfs_util::error::ErrorExt;

    #[test]
    fn gateway_error() {
        let remote = RemoteException {
            exception: "AccessControlException".to_string(),
            java_class_name: "org.apache.hadoop.security.AccessControlException".to_string(),
            message: "Permission denied: user=x".to_string(),
        };
        let e = FsError::gateway("http://nn:9870/webhdfs/v1/a?op=MKDIRS", 403, remote);
        assert_eq!(e.kind(), ErrorKind::Gateway);
        assert_eq!(e.status(), Some(403));
        assert_eq!(e.to_string(), "Permission denied: user=x");
        assert_eq!(e.remote().map(|r| r.exception.as_str()), Some("AccessControlException"));

        let e = e.ctx("mkdir /a");
        assert_eq!(e.cause(), "Permission denied: user=x");
        assert!(e.to_string().ends_with("mkdir /a"));
        assert!(!e.should_retry());
    }

    #[test]
    fn transport_error() {
        let e = FsError::transport("http://nn/x", None, "connection refused");
        assert_eq!(e.status(), None);
        assert_eq!(e.url(), Some("http://nn/x"));
        assert!(e.should_retry());

        let e = FsError::transport("http://nn/x", Some(500), "Internal Server Error");
        assert_eq!(e.status(), Some(500));
        assert!(!e.should_retry());
        assert_eq!(i32::from(e.kind()), 2);
    }
}
