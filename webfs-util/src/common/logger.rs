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

use crate::common::LogFormatter;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::io;
use std::str::FromStr;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

// log_dir = "stdout" | "stderr" | "" writes to the console, anything else is a directory
// of daily rolling files named after file_name (default "webfs").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConf {
    pub level: String,
    pub log_dir: String,
    pub file_name: String,
    pub max_log_files: usize,

    // Whether to output thread name and id
    pub display_thread: bool,
    // Whether to output the logging location
    pub display_position: bool,

    // Events of these targets go to a separate "<target>.log", e.g. the gateway access log.
    pub targets: Vec<String>,
}

impl Default for LogConf {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            log_dir: Logger::TARGET_STDERR.to_string(),
            file_name: "".to_string(),
            max_log_files: 10,
            display_thread: false,
            display_position: true,
            targets: vec![],
        }
    }
}

static INSTANCE: OnceCell<Logger> = OnceCell::new();

#[allow(unused)]
#[derive(Debug)]
pub struct Logger {
    inner: Vec<WorkerGuard>,
}

impl Logger {
    pub const TARGET_STDOUT: &'static str = "stdout";

    pub const TARGET_STDERR: &'static str = "stderr";

    pub const DEFAULT_FILE_NAME: &'static str = "webfs";

    fn level(conf: &LogConf) -> Level {
        Level::from_str(&conf.level).unwrap_or(Level::INFO)
    }

    pub fn new(conf: LogConf) -> Self {
        if !conf.targets.is_empty() {
            Self::with_target(conf)
        } else {
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(Self::level(&conf))
                .with_ansi(false)
                .event_format(LogFormatter::new(&conf));

            let (writer, guard) = Self::create_writer(&conf);
            let _ = subscriber.with_writer(writer).try_init();

            Logger { inner: vec![guard] }
        }
    }

    pub fn with_target(conf: LogConf) -> Self {
        let level = Self::level(&conf);
        let targets = conf.targets.clone();

        let (w1, g1) = Self::create_writer(&conf);
        let main = fmt::layer()
            .with_ansi(false)
            .with_writer(w1)
            .event_format(LogFormatter::new(&conf))
            .with_filter(filter_fn(move |m| {
                !targets.iter().any(|t| m.target() == t) && m.level() <= &level
            }));

        let mut guards = vec![g1];
        let mut layers = Vec::new();
        for target in &conf.targets {
            let mut target_conf = conf.clone();
            target_conf.file_name = format!("{}.log", target);
            let (w, g) = Self::create_writer(&target_conf);
            guards.push(g);

            let target = target.to_string();
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(w)
                .event_format(LogFormatter::new(&conf))
                .with_filter(filter_fn(move |m| {
                    m.target() == target && m.level() <= &level
                }))
                .boxed();
            layers.push(layer);
        }

        let _ = tracing_subscriber::registry()
            .with(main)
            .with(layers)
            .try_init();

        Logger { inner: guards }
    }

    pub fn default() {
        Self::init(LogConf::default())
    }

    pub fn init(conf: LogConf) {
        INSTANCE.get_or_init(|| Self::new(conf));
    }

    pub fn create_writer(conf: &LogConf) -> (NonBlocking, WorkerGuard) {
        let file_name = if conf.file_name.is_empty() {
            Self::DEFAULT_FILE_NAME
        } else {
            &conf.file_name
        };

        let log_dir = conf.log_dir.to_ascii_lowercase();
        if log_dir == Self::TARGET_STDOUT {
            return tracing_appender::non_blocking(io::stdout());
        } else if log_dir == Self::TARGET_STDERR || log_dir.is_empty() {
            return tracing_appender::non_blocking(io::stderr());
        }

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(file_name)
            .max_log_files(conf.max_log_files)
            .build(&conf.log_dir);

        match appender {
            Ok(v) => tracing_appender::non_blocking(v),
            Err(e) => {
                eprintln!(
                    "Failed to create log appender in {}: {}, fall back to stderr",
                    conf.log_dir, e
                );
                tracing_appender::non_blocking(io::stderr())
            }
        }
    }
}
