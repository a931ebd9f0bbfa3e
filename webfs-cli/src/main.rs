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

mod cmds;
mod render;
mod util;

use clap::Parser;
use cmds::Commands;
use std::sync::Arc;
use webfs_client::HttpGateway;
use webfs_common::conf::ConsoleConf;
use webfs_common::error::ErrorClassifier;
use webfs_util::common::Logger;
use webfs_util::runtime::AsyncRuntime;
use webfs_util::CommonResult;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct WebfsArgs {
    /// Configuration file, WEBFS_CONF_FILE is used when not given
    #[arg(short, long)]
    conf: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> CommonResult<()> {
    let args = WebfsArgs::parse();

    let conf = match &args.conf {
        Some(path) => ConsoleConf::from(path)
            .map_err(|e| format!("Failed to load configuration from {}: {}", path, e))?,
        None => ConsoleConf::from_env()
            .map_err(|e| format!("Failed to load configuration: {}", e))?,
    };
    Logger::init(conf.log.clone());

    let rt = AsyncRuntime::current_thread("webfs-cli")?;
    let gateway = Arc::new(HttpGateway::new(conf.gateway.clone())?);

    rt.block_on(async move {
        let result = args.command.execute(gateway, conf).await;
        if let Err(e) = &result {
            eprintln!("Error: {}", ErrorClassifier::classify_error(e));
            std::process::exit(1);
        }
        Ok(())
    })
}
