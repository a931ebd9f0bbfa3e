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

use log::{debug, warn};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use webfs_common::conf::ExplorerConf;
use webfs_common::error::{DisplayMessage, ErrorClassifier, FsError};
use webfs_common::FsResult;
use webfs_util::sync::ArcMutex;

/// Views the console asks the renderer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Explorer,
    FileInfo,
    FilePreview,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Explorer => "explorer",
            View::FileInfo => "file-info",
            View::FilePreview => "file-preview",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Controls the console disables while their action is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Mkdir,
    Upload,
    Chmod,
    Chown,
    SetReplication,
    Preview,
}

/// Turns a view model into markup. Must not have side effects.
pub trait Renderer: Send + Sync {
    fn render(&self, view: View, data: &serde_json::Value) -> FsResult<String>;
}

/// The host UI: alert panel, address fragment, controls and the view area.
pub trait Surface: Send + Sync {
    fn show_alert(&self, msg: &DisplayMessage);

    fn hide_alert(&self);

    // Mirror the current directory into the address, e.g. "#/user/alice".
    fn set_address(&self, hash: &str);

    fn set_enabled(&self, control: Control, enabled: bool);

    fn show_view(&self, view: View, markup: &str);
}

/// Single message slot, the next error replaces the previous one.
#[derive(Clone, Default)]
pub struct AlertSlot(ArcMutex<Option<DisplayMessage>>);

impl AlertSlot {
    pub fn set(&self, msg: DisplayMessage) {
        *self.0.lock() = Some(msg);
    }

    pub fn clear(&self) {
        self.0.lock().take();
    }

    pub fn get(&self) -> Option<DisplayMessage> {
        self.0.lock().clone()
    }
}

/// Re-enables its control when dropped.
pub struct ControlGuard {
    surface: Arc<dyn Surface>,
    control: Control,
}

impl Drop for ControlGuard {
    fn drop(&mut self) {
        self.surface.set_enabled(self.control, true);
    }
}

/// Everything the console components share, passed to each of them.
pub struct ConsoleContext<G> {
    pub gateway: Arc<G>,
    pub renderer: Arc<dyn Renderer>,
    pub surface: Arc<dyn Surface>,
    pub conf: ExplorerConf,
    pub alert: AlertSlot,
}

impl<G> ConsoleContext<G> {
    pub fn new(
        gateway: Arc<G>,
        renderer: Arc<dyn Renderer>,
        surface: Arc<dyn Surface>,
        conf: ExplorerConf,
    ) -> Self {
        Self {
            gateway,
            renderer,
            surface,
            conf,
            alert: AlertSlot::default(),
        }
    }

    // Classify the error, keep it in the alert slot and show it.
    pub fn report(&self, err: &FsError) -> DisplayMessage {
        let msg = ErrorClassifier::classify_error(err);
        warn!("{} ({:?})", msg, err.kind());
        self.alert.set(msg.clone());
        self.surface.show_alert(&msg);
        msg
    }

    pub fn hide_alert(&self) {
        self.alert.clear();
        self.surface.hide_alert();
    }

    pub fn disable(&self, control: Control) -> ControlGuard {
        self.surface.set_enabled(control, false);
        ControlGuard {
            surface: self.surface.clone(),
            control,
        }
    }

    // Render a view model and hand the markup to the surface.
    pub fn show<T: Serialize>(&self, view: View, model: &T) -> FsResult<()> {
        let data = serde_json::to_value(model)?;
        let markup = self.renderer.render(view, &data)?;
        debug!("render {}, {} bytes", view, markup.len());
        self.surface.show_view(view, &markup);
        Ok(())
    }
}

impl<G> Clone for ConsoleContext<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            renderer: self.renderer.clone(),
            surface: self.surface.clone(),
            conf: self.conf.clone(),
            alert: self.alert.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::context::*;
    use webfs_common::error::FsError;

    #[derive(Default)]
    struct Toggles(ArcMutex<Vec<(Control, bool)>>);

    impl Surface for Toggles {
        fn show_alert(&self, _: &DisplayMessage) {}

        fn hide_alert(&self) {}

        fn set_address(&self, _: &str) {}

        fn set_enabled(&self, control: Control, enabled: bool) {
            self.0.lock().push((control, enabled));
        }

        fn show_view(&self, _: View, _: &str) {}
    }

    struct Echo;

    impl Renderer for Echo {
        fn render(&self, view: View, data: &serde_json::Value) -> FsResult<String> {
            Ok(format!("{}:{}", view, data))
        }
    }

    #[test]
    fn guard_and_alert() {
        let surface = Arc::new(Toggles::default());
        let ctx = ConsoleContext::new(
            Arc::new(()),
            Arc::new(Echo),
            surface.clone(),
            ExplorerConf::default(),
        );

        {
            let _guard = ctx.disable(Control::Upload);
            assert_eq!(surface.0.lock().clone(), vec![(Control::Upload, false)]);
        }
        assert_eq!(surface.0.lock().last(), Some(&(Control::Upload, true)));

        let msg = ctx.report(&FsError::transport("http://nn/x", Some(401), ""));
        assert!(msg.text.starts_with("Authentication failed when trying to open http://nn/x"));
        assert_eq!(ctx.alert.get(), Some(msg));

        let msg = ctx.report(&FsError::transport("http://nn/y", Some(500), "boom"));
        assert_eq!(ctx.alert.get(), Some(msg));
        ctx.hide_alert();
        assert!(ctx.alert.get().is_none());

        assert!(ctx.show(View::FileInfo, &vec![1, 2]).is_ok());
        assert_eq!(View::FilePreview.to_string(), "file-preview");
    }
}
