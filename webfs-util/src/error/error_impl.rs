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

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;

/// Error wrapper shared by every error enum of the workspace.
///
/// `source` is the original error, `ctx` collects the places the error passed
/// through, and `data` optionally carries structured information the caller
/// needs to react to the failure (for example the HTTP status of a gateway
/// response), so the error can be classified without parsing its message.
pub struct ErrorImpl<E, D = ()> {
    pub source: E,

    pub ctx: Vec<String>,

    pub data: Option<D>,
}

impl<E, D> ErrorImpl<E, D>
where
    E: Error,
{
    pub fn new(source: E, data: Option<D>) -> Self {
        Self {
            source,
            ctx: vec![],
            data,
        }
    }

    pub fn with_source(source: E) -> Self {
        Self::new(source, None)
    }

    pub fn with_data(source: E, data: D) -> Self {
        Self::new(source, Some(data))
    }

    pub fn ctx(mut self, ctx: impl Into<String>) -> Self {
        self.ctx.push(ctx.into());
        self
    }

    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }
}

impl<E, D> Display for ErrorImpl<E, D>
where
    E: Error,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.ctx.is_empty() {
            write!(f, "{}", self.source)
        } else {
            write!(f, "{}: {}", self.source, self.ctx.join("\n"))
        }
    }
}

impl<E, D> Debug for ErrorImpl<E, D>
where
    E: Error,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]{}", self.ctx.join("\n"), self.source)
    }
}

impl<E, D> Deref for ErrorImpl<E, D> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.source
    }
}
