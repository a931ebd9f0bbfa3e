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

mod fs;
mod shell;

pub use self::fs::FsCommand;
pub use self::shell::ShellCommand;

use clap::Subcommand;
use std::sync::Arc;
use webfs_client::HttpGateway;
use webfs_common::conf::ConsoleConf;
use webfs_common::version;
use webfs_common::FsResult;

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Fs(FsCommand),

    /// Interactive session: cd, ls, open, preview, mkdir, put, chmod, chown, setrep, back, pwd
    Shell(ShellCommand),

    /// Show version information
    Version,
}

impl Commands {
    pub async fn execute(self, gateway: Arc<HttpGateway>, conf: ConsoleConf) -> FsResult<()> {
        match self {
            Commands::Fs(cmd) => cmd.execute(&gateway, &conf).await,
            Commands::Shell(cmd) => cmd.execute(gateway, conf).await,
            Commands::Version => {
                println!("{}", version::version_string());
                Ok(())
            }
        }
    }
}
