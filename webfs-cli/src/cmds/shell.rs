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

use crate::render::{TerminalSurface, TextRenderer};
use crate::util::{parse_mode, parse_owner, resolve_path};
use clap::Parser;
use log::info;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use webfs_client::{Gateway, HttpGateway};
use webfs_common::conf::ConsoleConf;
use webfs_common::error::FsError;
use webfs_common::fs::Path;
use webfs_common::FsResult;
use webfs_console::{Console, MutationOutcome, NavOutcome, UploadFile};
use webfs_util::try_option;

const HELP: &str = "\
commands:
  cd <dir>                  change directory
  ls                        reload the current directory
  open <name>               enter a directory or show file details
  preview [name]            show the tail of a file, the open one by default
  mkdir <name> [mode]       create a directory
  put <local>...            upload files into the current directory
  chmod <mode> <name>       octal (755) or symbolic (-rw-r--r--)
  chown <owner[:group]> <name>
  setrep <n> <name>
  back                      previous directory
  pwd                       print the current directory
  exit";

#[derive(Parser, Debug)]
pub struct ShellCommand {
    /// Directory to start in, the configured home_dir by default
    #[arg(value_name = "path")]
    path: Option<String>,
}

struct Shell {
    console: Console<HttpGateway>,
    surface: Arc<TerminalSurface>,
    history: Vec<String>,
}

impl ShellCommand {
    pub async fn execute(self, gateway: Arc<HttpGateway>, conf: ConsoleConf) -> FsResult<()> {
        let surface = Arc::new(TerminalSurface::new());
        let console = Console::new(
            gateway,
            Arc::new(TextRenderer),
            surface.clone(),
            conf.console.clone(),
        );
        let mut shell = Shell {
            console,
            surface,
            history: vec![],
        };

        shell.console.start(self.path.as_deref()).await;
        shell.deliver_address().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            shell.prompt()?;
            let line = match lines.next_line().await? {
                Some(v) => v,
                None => break,
            };
            let args: Vec<&str> = line.split_whitespace().collect();
            if args.is_empty() {
                continue;
            }
            if matches!(args[0], "exit" | "quit") {
                break;
            }

            if let Err(e) = shell.run(&args).await {
                // Local errors go through the same alert path as gateway errors.
                shell.console.context().report(&e);
            }
            shell.deliver_address().await;
        }
        Ok(())
    }
}

impl Shell {
    fn prompt(&self) -> FsResult<()> {
        let mut out = std::io::stdout().lock();
        write!(out, "webfs:{}> ", self.console.state().current_dir)?;
        out.flush()?;
        Ok(())
    }

    // Feed address updates back as fragment changes and record them for `back`.
    async fn deliver_address(&mut self) {
        for hash in self.surface.take_pending() {
            if self.history.last() != Some(&hash) {
                self.history.push(hash.clone());
            }
            self.console.on_hash_change(&format!("#{}", hash)).await;
        }
    }

    fn resolve(&self, arg: &str) -> FsResult<Path> {
        resolve_path(&self.console.state().current_dir, arg)
    }

    fn arg<'a>(args: &[&'a str], index: usize) -> FsResult<&'a str> {
        let cmd = args.first().copied().unwrap_or_default();
        let v = try_option!(args.get(index).copied(), "{}: missing argument, try help", cmd);
        Ok(v)
    }

    fn print_mutation(outcome: MutationOutcome) {
        match outcome {
            MutationOutcome::Partial { succeeded, failed } => {
                println!("{} succeeded, {} failed", succeeded.len(), failed.len());
                for (name, msg) in failed {
                    println!("  {}: {}", name, msg);
                }
            }
            MutationOutcome::Unchanged => println!("nothing changed"),
            // Applied reloads the listing, failures are already on the alert line.
            _ => (),
        }
    }

    async fn run(&mut self, args: &[&str]) -> FsResult<()> {
        let console = &self.console;
        match args[0] {
            "help" => println!("{}", HELP),

            "pwd" => println!("{}", console.state().current_dir),

            "cd" => {
                let target = self.resolve(Self::arg(args, 1)?)?;
                console.navigate(target.path()).await;
            }

            "ls" => {
                console.refresh().await;
            }

            "open" => {
                let name = Self::arg(args, 1)?;
                let file_type = console
                    .listing()
                    .iter()
                    .find(|x| x.name == name)
                    .map(|x| x.file_type);
                match file_type {
                    Some(v) => {
                        console.select_entry(name, v).await;
                    }
                    None => return Err(FsError::common(format!("{}: no such entry", name))),
                }
            }

            "preview" => {
                let path = match args.get(1) {
                    Some(v) => self.resolve(v)?,
                    None => match console.state().selected {
                        Some(v) => v.path,
                        None => return Err(FsError::common("no file is open")),
                    },
                };
                let len = match console.navigator().find_entry(&path) {
                    Some(v) if !v.is_dir() => v.length,
                    Some(_) => return Err(FsError::invalid_path(path, "is a directory")),
                    None => console.context().gateway.get_file_status(&path).await?.length,
                };
                console.preview_tail(path.path(), len).await;
            }

            "mkdir" => {
                let name = Self::arg(args, 1)?;
                let dir = console.state().current_dir;
                let outcome = match args.get(2) {
                    Some(mode) => {
                        let bits = parse_mode(mode)?;
                        console
                            .submit_mkdir_with_permission(dir.path(), name, bits)
                            .await
                    }
                    None => console.submit_mkdir(dir.path(), name).await,
                };
                Self::print_mutation(outcome);
            }

            "put" => {
                Self::arg(args, 1)?;
                let mut files = vec![];
                for local in &args[1..] {
                    let local = std::path::Path::new(local);
                    let name = match local.file_name() {
                        Some(v) => v.to_string_lossy().to_string(),
                        None => {
                            return Err(FsError::common(format!(
                                "{} has no file name",
                                local.display()
                            )))
                        }
                    };
                    files.push(UploadFile::new(name, tokio::fs::read(local).await?));
                }
                let dir = console.state().current_dir;
                info!("upload {} files to {}", files.len(), dir);
                Self::print_mutation(console.submit_upload(dir.path(), files).await);
            }

            "chmod" => {
                let bits = parse_mode(Self::arg(args, 1)?)?;
                let path = self.resolve(Self::arg(args, 2)?)?;
                Self::print_mutation(console.submit_chmod(path.path(), bits).await);
            }

            "chown" => {
                let (owner, group) = parse_owner(Self::arg(args, 1)?)?;
                let path = self.resolve(Self::arg(args, 2)?)?;
                Self::print_mutation(console.submit_chown(path.path(), &owner, &group).await);
            }

            "setrep" => {
                let replication: u16 = Self::arg(args, 1)?.parse()?;
                let path = self.resolve(Self::arg(args, 2)?)?;
                Self::print_mutation(
                    console
                        .submit_set_replication(path.path(), replication)
                        .await,
                );
            }

            "back" => {
                if self.history.len() < 2 {
                    return Err(FsError::common("no previous directory"));
                }
                let current = self.history.pop();
                if let Some(prev) = self.history.last().cloned() {
                    let res = self.console.on_hash_change(&format!("#{}", prev)).await;
                    if let (NavOutcome::Failed(_), Some(v)) = (res, current) {
                        self.history.push(v);
                    }
                }
            }

            v => return Err(FsError::common(format!("unknown command {}, try help", v))),
        }
        Ok(())
    }
}
