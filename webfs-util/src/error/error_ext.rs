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

// Error extension interface, lets every layer attach the context it was in.
pub trait ErrorExt: Error {
    fn ctx(self, ctx: impl Into<String>) -> Self;

    // Whether the same request may be issued again and is expected to succeed.
    fn should_retry(&self) -> bool {
        false
    }
}
