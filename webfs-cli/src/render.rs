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

use log::debug;
use serde_json::Value;
use std::io::Write;
use webfs_common::error::{DisplayMessage, FsError};
use webfs_common::FsResult;
use webfs_console::context::{Control, Renderer, Surface, View};
use webfs_util::sync::ArcMutex;
use webfs_util::{ternary, try_log};

fn text<'a>(v: &'a Value, key: &str) -> &'a str {
    v.get(key).and_then(|x| x.as_str()).unwrap_or("")
}

fn number(v: &Value, key: &str) -> u64 {
    v.get(key).and_then(|x| x.as_u64()).unwrap_or(0)
}

fn list<'a>(v: &'a Value, key: &str) -> FsResult<&'a Vec<Value>> {
    match v.get(key).and_then(|x| x.as_array()) {
        Some(v) => Ok(v),
        None => Err(FsError::abnormal_data(format!("view model has no {} list", key))),
    }
}

/// Plain text rendering of the console views, in the layout of `hdfs dfs -ls`.
pub struct TextRenderer;

impl TextRenderer {
    fn explorer(data: &Value) -> FsResult<String> {
        let rows = list(data, "rows")?;
        let mut out = vec![format!("Found {} items in {}", rows.len(), text(data, "dir"))];
        for row in rows {
            let is_dir = row.get("is_dir").and_then(|x| x.as_bool()).unwrap_or(false);
            let replication = ternary!(
                is_dir,
                "-".to_string(),
                number(row, "replication").to_string()
            );
            out.push(format!(
                "{:<11} {:>3} {:<10} {:<12} {:>9} {} {}",
                text(row, "permission"),
                replication,
                text(row, "owner"),
                text(row, "group"),
                text(row, "size"),
                text(row, "modified"),
                text(row, "name"),
            ));
        }
        Ok(out.join("\n"))
    }

    fn file_info(data: &Value) -> FsResult<String> {
        let mut out = vec![
            text(data, "title").to_string(),
            format!("  Path:        {}", text(data, "path")),
            format!(
                "  Permission:  {} ({})",
                text(data, "permission"),
                text(data, "octal")
            ),
            format!("  Owner:       {}", text(data, "owner")),
            format!("  Group:       {}", text(data, "group")),
            format!("  Replication: {}", number(data, "replication")),
            format!("  Block size:  {}", text(data, "block_size")),
            format!("  Size:        {}", text(data, "size")),
            format!("  Modified:    {}", text(data, "modified")),
            format!("  Download:    {}", text(data, "download_path")),
        ];

        let blocks = data.get("blocks").unwrap_or(&Value::Null);
        for block in list(blocks, "menu")? {
            let hosts: Vec<&str> = block
                .get("hosts")
                .and_then(|x| x.as_array())
                .map(|x| x.iter().filter_map(|h| h.as_str()).collect())
                .unwrap_or_default();
            out.push(format!(
                "  {}: id={} genstamp={} offset={} size={} hosts=[{}]",
                text(block, "label"),
                block.get("block_id").unwrap_or(&Value::Null),
                block.get("generation_stamp").unwrap_or(&Value::Null),
                number(block, "offset"),
                text(block, "size"),
                hosts.join(", ")
            ));
        }
        Ok(out.join("\n"))
    }

    fn preview(data: &Value) -> FsResult<String> {
        let window = data.get("window").unwrap_or(&Value::Null);
        Ok(format!(
            "--- {} [{}, {}) ---\n{}",
            text(data, "path"),
            number(window, "start"),
            number(window, "end"),
            text(data, "text")
        ))
    }
}

impl Renderer for TextRenderer {
    fn render(&self, view: View, data: &Value) -> FsResult<String> {
        match view {
            View::Explorer => Self::explorer(data),
            View::FileInfo => Self::file_info(data),
            View::FilePreview => Self::preview(data),
        }
    }
}

/// Prints views to stdout and alerts to stderr.
///
/// Address updates are queued; the shell hands them back to the console as
/// fragment change events, the way a browser fires `hashchange`.
#[derive(Default)]
pub struct TerminalSurface {
    pending: ArcMutex<Vec<String>>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_pending(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending.lock())
    }
}

impl Surface for TerminalSurface {
    fn show_alert(&self, msg: &DisplayMessage) {
        match msg.status {
            Some(status) => eprintln!("[{}] {}", status, msg.text),
            None => eprintln!("[error] {}", msg.text),
        }
    }

    fn hide_alert(&self) {}

    fn set_address(&self, hash: &str) {
        self.pending.lock().push(hash.to_string());
    }

    fn set_enabled(&self, control: Control, enabled: bool) {
        debug!("{:?} enabled: {}", control, enabled);
    }

    fn show_view(&self, _: View, markup: &str) {
        let mut out = std::io::stdout().lock();
        try_log!(writeln!(out, "{}", markup), ());
    }
}
