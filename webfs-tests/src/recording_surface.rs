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

use serde_json::Value;
use webfs_common::error::{DisplayMessage, FsError};
use webfs_common::FsResult;
use webfs_console::context::{Control, Renderer, Surface, View};
use webfs_util::sync::ArcMutex;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Alert(DisplayMessage),
    HideAlert,
    Address(String),
    Enabled(Control, bool),
    View(View, String),
}

/// Surface that keeps every call it receives, in order.
#[derive(Default)]
pub struct RecordingSurface {
    events: ArcMutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear()
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.lock().push(event)
    }

    pub fn alerts(&self) -> Vec<DisplayMessage> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Alert(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn addresses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Address(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn views(&self, view: View) -> Vec<Value> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::View(v, markup) if v == view => serde_json::from_str(&markup).ok(),
                _ => None,
            })
            .collect()
    }

    pub fn last_view(&self, view: View) -> Option<Value> {
        self.views(view).pop()
    }

    pub fn toggles(&self, control: Control) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Enabled(c, enabled) if c == control => Some(enabled),
                _ => None,
            })
            .collect()
    }

    // A control is enabled unless its last toggle disabled it.
    pub fn is_enabled(&self, control: Control) -> bool {
        self.toggles(control).last().copied().unwrap_or(true)
    }
}

impl Surface for RecordingSurface {
    fn show_alert(&self, msg: &DisplayMessage) {
        self.push(SurfaceEvent::Alert(msg.clone()))
    }

    fn hide_alert(&self) {
        self.push(SurfaceEvent::HideAlert)
    }

    fn set_address(&self, hash: &str) {
        self.push(SurfaceEvent::Address(hash.to_string()))
    }

    fn set_enabled(&self, control: Control, enabled: bool) {
        self.push(SurfaceEvent::Enabled(control, enabled))
    }

    fn show_view(&self, view: View, markup: &str) {
        self.push(SurfaceEvent::View(view, markup.to_string()))
    }
}

/// Renders the view model itself as JSON so tests can read it back.
#[derive(Default)]
pub struct JsonRenderer {
    fail_on: Option<View>,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(view: View) -> Self {
        Self {
            fail_on: Some(view),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, view: View, data: &Value) -> FsResult<String> {
        if self.fail_on == Some(view) {
            return Err(FsError::common(format!("template {} is missing", view)));
        }
        Ok(data.to_string())
    }
}
