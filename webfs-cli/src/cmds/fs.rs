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

use crate::render::TextRenderer;
use crate::util::{format_status, parse_mode, parse_owner};
use bytes::Bytes;
use clap::Subcommand;
use futures::future::join_all;
use std::io::Write;
use std::path::PathBuf;
use webfs_client::{Gateway, HttpGateway};
use webfs_common::conf::ConsoleConf;
use webfs_common::error::{ErrorClassifier, FsError};
use webfs_common::fs::Path;
use webfs_common::FsResult;
use webfs_console::context::{Renderer, View};
use webfs_console::projection::{project_file, project_listing, PreviewWindow};
use webfs_util::common::ByteUnit;

#[derive(Subcommand, Debug)]
pub enum FsCommand {
    /// List a directory
    Ls {
        #[arg(value_name = "path", default_value = "/")]
        path: String,
    },

    /// Show the status of a file or directory
    Stat {
        #[arg(value_name = "path")]
        path: String,
    },

    /// Show file details and block locations
    Blocks {
        #[arg(value_name = "path")]
        path: String,
    },

    /// Print the last bytes of a file
    Tail {
        #[arg(value_name = "path")]
        path: String,

        #[arg(short = 'c', long, help = "Bytes to read, e.g. 4KB. Defaults to tail_chunk_size")]
        bytes: Option<String>,
    },

    /// Create a directory and any missing parents
    Mkdir {
        #[arg(value_name = "path")]
        path: String,

        #[arg(short, long, help = "Octal permission, e.g. 755")]
        permission: Option<String>,
    },

    /// Upload local files into a directory
    Put {
        #[arg(required = true, help = "Local files")]
        local: Vec<PathBuf>,

        #[arg(short, long, default_value = "/", help = "Target directory")]
        dir: String,

        #[arg(short, long, help = "Overwrite existing files")]
        force: bool,
    },

    /// Change permission, octal (1755) or symbolic (drwxr-xr-t)
    Chmod {
        #[arg(value_name = "mode")]
        mode: String,

        #[arg(value_name = "path")]
        path: String,
    },

    /// Change owner and group, as owner[:group]
    Chown {
        #[arg(value_name = "owner[:group]")]
        owner: String,

        #[arg(value_name = "path")]
        path: String,
    },

    /// Set the replication factor of a file
    Setrep {
        #[arg(value_name = "replication")]
        replication: u16,

        #[arg(value_name = "path")]
        path: String,
    },
}

impl FsCommand {
    pub async fn execute(self, gateway: &HttpGateway, conf: &ConsoleConf) -> FsResult<()> {
        match self {
            FsCommand::Ls { path } => {
                let path = Path::from_str(path)?;
                let entries = gateway.list_status(&path).await?;
                let view = serde_json::to_value(project_listing(&path, &entries))?;
                println!("{}", TextRenderer.render(View::Explorer, &view)?);
                Ok(())
            }

            FsCommand::Stat { path } => {
                let path = Path::from_str(path)?;
                let status = gateway.get_file_status(&path).await?;
                println!("{}", format_status(&path, &status));
                Ok(())
            }

            FsCommand::Blocks { path } => {
                let path = Path::from_str(path)?;
                let (located, status) = futures::join!(
                    gateway.get_block_locations(&path),
                    gateway.get_file_status(&path)
                );
                let (located, status) = (located?, status?);
                located.check_contiguous()?;

                let view = project_file(&path, &status, &located, conf.console.tail_chunk_size);
                let view = serde_json::to_value(view)?;
                println!("{}", TextRenderer.render(View::FileInfo, &view)?);
                Ok(())
            }

            FsCommand::Tail { path, bytes } => {
                let path = Path::from_str(path)?;
                let chunk = match bytes {
                    Some(v) => ByteUnit::from_str(&v)
                        .map_err(|e| FsError::encoding(e.to_string()))?
                        .as_byte(),
                    None => conf.console.tail_chunk_size,
                };

                let status = gateway.get_file_status(&path).await?;
                if status.is_dir() {
                    return Err(FsError::invalid_path(path, "is a directory"));
                }
                let window = PreviewWindow::tail(status.length, chunk);
                let data = gateway.open(&path, window.offset, Some(window.len())).await?;

                let mut out = std::io::stdout().lock();
                out.write_all(&data)?;
                out.flush()?;
                Ok(())
            }

            FsCommand::Mkdir { path, permission } => {
                let path = Path::from_str(path)?;
                let permission = match permission {
                    Some(v) => Some(parse_mode(&v)?),
                    None => conf.console.dir_permission,
                };
                if gateway.mkdirs(&path, permission).await? {
                    println!("Created {}", path);
                    Ok(())
                } else {
                    Err(FsError::common(format!("mkdirs {} returned false", path)))
                }
            }

            FsCommand::Put { local, dir, force } => {
                let dir = Path::from_str(dir)?;
                let mut uploads = vec![];
                for file in &local {
                    let name = match file.file_name() {
                        Some(v) => v.to_string_lossy().to_string(),
                        None => {
                            return Err(FsError::common(format!(
                                "{} has no file name",
                                file.display()
                            )))
                        }
                    };
                    let data = Bytes::from(tokio::fs::read(file).await?);
                    uploads.push((dir.join(name)?, data));
                }

                let calls = uploads
                    .iter()
                    .map(|(path, data)| gateway.create(path, data.clone(), force));
                let results = join_all(calls).await;

                let mut failed = 0;
                for ((path, data), res) in uploads.iter().zip(results) {
                    match res {
                        Ok(_) => println!("Uploaded {} ({})", path, ByteUnit::byte_to_string(data.len() as u64)),
                        Err(e) => {
                            failed += 1;
                            eprintln!("Failed {}: {}", path, ErrorClassifier::classify_error(&e));
                        }
                    }
                }

                if failed > 0 {
                    Err(FsError::common(format!("{} of {} uploads failed", failed, uploads.len())))
                } else {
                    Ok(())
                }
            }

            FsCommand::Chmod { mode, path } => {
                let path = Path::from_str(path)?;
                let bits = parse_mode(&mode)?;
                gateway.set_permission(&path, bits).await?;
                println!("Permission of {} set to {}", path, bits);
                Ok(())
            }

            FsCommand::Chown { owner, path } => {
                let path = Path::from_str(path)?;
                let (owner, group) = parse_owner(&owner)?;
                gateway
                    .set_owner(&path, Some(&owner), Some(&group))
                    .await?;
                println!("Owner of {} set to {}:{}", path, owner, group);
                Ok(())
            }

            FsCommand::Setrep { replication, path } => {
                let path = Path::from_str(path)?;
                if replication == 0 {
                    return Err(FsError::common("replication must be greater than 0"));
                }
                if gateway.set_replication(&path, replication).await? {
                    println!("Replication of {} set to {}", path, replication);
                    Ok(())
                } else {
                    Err(FsError::common(format!("{} is not a file", path)))
                }
            }
        }
    }
}
