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

use std::fmt;

use tracing::{Event, Subscriber};
use tracing_log::NormalizeEvent;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{
    format::{FormatEvent, FormatFields},
    FmtContext, FormattedFields,
};
use tracing_subscriber::registry::LookupSpan;

use crate::common::{LocalTime, LogConf};

pub struct LogFormatter {
    display_thread: bool,
    display_position: bool,
}

impl LogFormatter {
    pub fn new(conf: &LogConf) -> Self {
        Self {
            display_thread: conf.display_thread,
            display_position: conf.display_position,
        }
    }

    pub fn short_target(target: &str) -> &str {
        target.split("::").last().unwrap_or("")
    }
}

/// format log message eg:
/// 25/03/02 16:23:12.626 INFO navigator.rs:120 commit /user/alice, 12 entries
impl<S, N> FormatEvent<S, N> for LogFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        LocalTime::new().format_time(&mut writer)?;

        let normalized_meta = event.normalized_metadata();
        let metadata = normalized_meta.as_ref().unwrap_or_else(|| event.metadata());
        write!(writer, " {}", metadata.level())?;

        if self.display_thread {
            let current_thread = std::thread::current();
            match current_thread.name() {
                Some(name) => write!(writer, " {}-{:0>2?}", name, current_thread.id())?,
                None => write!(writer, " {:0>2?}", current_thread.id())?,
            }
        }

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, " {}", span.metadata().name())?;

                let ext = span.extensions();
                if let Some(fields) = &ext.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{}}}", fields)?;
                    }
                }
                write!(writer, ":")?;
            }
        }

        if self.display_position {
            let target = Self::short_target(metadata.target());
            write!(writer, " {}.rs:{} ", target, metadata.line().unwrap_or(0))?;
        } else {
            write!(writer, " ")?;
        }

        ctx.format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
