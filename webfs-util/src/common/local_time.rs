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

use chrono::{DateTime, Local, Utc};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

const LOG_FORMAT: &str = "%y/%m/%d %H:%M:%S%.3f";
const LISTING_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct LocalTime {
    timezone: Local,
}

impl LocalTime {
    pub fn new() -> Self {
        Self { timezone: Local }
    }

    pub fn mills() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    // Format a millisecond epoch timestamp the way directory listings show it.
    // Out-of-range values fall back to the epoch.
    pub fn mills_to_string(mills: i64) -> String {
        let time = DateTime::from_timestamp_millis(mills)
            .or_else(|| DateTime::from_timestamp(0, 0))
            .map(|t| t.with_timezone(&Local));
        match time {
            Some(t) => t.format(LISTING_FORMAT).to_string(),
            None => String::new(),
        }
    }
}

impl Default for LocalTime {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let time = Utc::now().with_timezone(&self.timezone);
        write!(w, "{}", time.format(LOG_FORMAT))
    }
}
