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
use crate::state::RemoteException;
use std::fmt::{Display, Formatter};

/// The text shown in the console's alert panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    pub text: String,
    pub status: Option<u16>,
}

impl DisplayMessage {
    pub fn new(text: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }
}

impl Display for DisplayMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Maps a failed gateway exchange to a user facing message.
///
/// A non-empty `RemoteException.message` always wins; otherwise the HTTP status
/// picks one of four fixed texts. The result is never empty.
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub const NOT_FOUND: &'static str = "Path does not exist on HDFS or WebHDFS is disabled. Please check your path or enable WebHDFS";

    const UNKNOWN: &'static str = "Unknown error";

    pub fn classify(
        status: Option<u16>,
        remote: Option<&RemoteException>,
        url: &str,
        cause: &str,
    ) -> DisplayMessage {
        if let Some(r) = remote {
            if !r.message.is_empty() {
                return DisplayMessage::new(r.message.as_str(), status);
            }
        }

        let cause = if cause.is_empty() { Self::UNKNOWN } else { cause };
        let text = match status {
            Some(401) => format!(
                "Authentication failed when trying to open {}: Unauthorized.",
                url
            ),
            Some(403) => format!("Permission denied when trying to open {}: {}", url, cause),
            Some(404) => Self::NOT_FOUND.to_string(),
            _ => format!("Failed to retrieve data from {}: {}", url, cause),
        };
        DisplayMessage::new(text, status)
    }

    pub fn classify_error(err: &FsError) -> DisplayMessage {
        match err {
            FsError::Transport(e) => {
                let (url, status) = match e.data() {
                    Some(info) => (info.url.as_str(), info.status),
                    None => ("", None),
                };
                Self::classify(status, None, url, e.source.as_str())
            }

            FsError::Gateway(e) => match e.data() {
                Some(f) => Self::classify(
                    Some(f.status),
                    Some(&f.exception),
                    &f.url,
                    &f.exception.exception,
                ),
                None => Self::local(e.source.as_str()),
            },

            _ => Self::local(&err.cause()),
        }
    }

    // Errors raised before any request was sent carry their own text.
    fn local(text: &str) -> DisplayMessage {
        if text.is_empty() {
            DisplayMessage::new(Self::UNKNOWN, None)
        } else {
            DisplayMessage::new(text, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ErrorClassifier, FsError};
    use crate::state::RemoteException;

    const URL: &str = "http://nn:9870/webhdfs/v1/a?op=LISTSTATUS";

    fn remote(msg: &str) -> RemoteException {
        RemoteException {
            exception: "AccessControlException".to_string(),
            java_class_name: "org.apache.hadoop.security.AccessControlException".to_string(),
            message: msg.to_string(),
        }
    }

    #[test]
    fn status_table() {
        let m = ErrorClassifier::classify(Some(401), None, URL, "Unauthorized");
        assert_eq!(
            m.text,
            format!("Authentication failed when trying to open {}: Unauthorized.", URL)
        );

        let m = ErrorClassifier::classify(Some(403), None, URL, "Forbidden");
        assert_eq!(
            m.text,
            format!("Permission denied when trying to open {}: Forbidden", URL)
        );

        let m = ErrorClassifier::classify(Some(404), None, URL, "Not Found");
        assert!(m.text.contains("does not exist"));

        let m = ErrorClassifier::classify(Some(500), None, URL, "Internal Server Error");
        assert_eq!(
            m.text,
            format!("Failed to retrieve data from {}: Internal Server Error", URL)
        );

        let m = ErrorClassifier::classify(None, None, URL, "");
        assert!(!m.text.is_empty());
    }

    #[test]
    fn remote_message_wins() {
        let r = remote("Permission denied: user=x");
        let m = ErrorClassifier::classify(Some(403), Some(&r), URL, "Forbidden");
        assert_eq!(m.text, "Permission denied: user=x");

        // An empty message falls back to the status table.
        let r = remote("");
        let m = ErrorClassifier::classify(Some(404), Some(&r), URL, "");
        assert_eq!(m.text, ErrorClassifier::NOT_FOUND);
    }

    #[test]
    fn classify_error_kinds() {
        let e = FsError::gateway(URL, 403, remote("Permission denied: user=x"));
        assert_eq!(
            ErrorClassifier::classify_error(&e).text,
            "Permission denied: user=x"
        );

        let e = FsError::transport(URL, Some(404), "Not Found");
        let m = ErrorClassifier::classify_error(&e);
        assert!(m.text.contains("does not exist"));
        assert_eq!(m.status, Some(404));

        let e = FsError::transport(URL, None, "connection refused");
        assert_eq!(
            ErrorClassifier::classify_error(&e).text,
            format!("Failed to retrieve data from {}: connection refused", URL)
        );

        let e = FsError::encoding("invalid octal digit 8 in 758");
        assert_eq!(
            ErrorClassifier::classify_error(&e).text,
            "invalid octal digit 8 in 758"
        );
    }
}
