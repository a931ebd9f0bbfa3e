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

use std::future::Future;
use std::io;
use std::thread;
use tokio::runtime::{Builder, Runtime};

pub type JoinHandle<T> = tokio::task::JoinHandle<T>;

// Name of the current thread, "unnamed" for threads created without one.
pub fn thread_name() -> String {
    thread::current().name().unwrap_or("unnamed").to_string()
}

#[derive(Debug)]
pub struct AsyncRuntime {
    inner: Runtime,
    name_prefix: String,
    io_threads: usize,
}

impl AsyncRuntime {
    pub fn new<T: AsRef<str>>(name_prefix: T, io_threads: usize) -> io::Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(io_threads.max(1))
            .thread_name(name_prefix.as_ref())
            .enable_all()
            .build()?;

        Ok(AsyncRuntime {
            inner: rt,
            name_prefix: String::from(name_prefix.as_ref()),
            io_threads,
        })
    }

    pub fn current_thread(name: impl AsRef<str>) -> io::Result<Self> {
        let name = name.as_ref();
        let rt = Builder::new_current_thread()
            .enable_all()
            .thread_name(name)
            .build()?;

        Ok(AsyncRuntime {
            inner: rt,
            name_prefix: name.to_string(),
            io_threads: 1,
        })
    }

    pub fn io_threads(&self) -> usize {
        self.io_threads
    }

    pub fn thread_name(&self) -> &str {
        &self.name_prefix
    }

    pub fn spawn<F>(&self, task: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.inner.spawn(task)
    }

    pub fn block_on<F>(&self, task: F) -> F::Output
    where
        F: Future,
    {
        self.inner.block_on(task)
    }
}
