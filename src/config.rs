// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use clap::Parser;
use tracing::Level;

/// Two-player chess at the console.
///
/// Players take turns typing `m <from> <to>` to move, `c k` or `c q` to
/// castle, `u` to take back the last move and `q` to quit.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "console-chess", version)]
pub struct Config {
    /// Draw pieces and prompts without colour.
    #[arg(long)]
    pub no_color: bool,

    /// Do not print the list of commands before every prompt.
    #[arg(long)]
    pub no_help: bool,

    /// Most verbose log level written to stderr (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: Level,
}
