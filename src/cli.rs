// Copyright 2025 Fernando Borretti
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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::edit::add;
use crate::cmd::edit::delete;
use crate::cmd::edit::mark;
use crate::cmd::export::export_roster;
use crate::cmd::list::list_roster;
use crate::cmd::report::print_report;
use crate::cmd::serve::serve;
use crate::config::Config;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Start the HTTP server.
    Serve {
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Address to listen on, overriding the configuration.
        #[arg(long)]
        bind: Option<String>,
        /// Keep everything in memory instead of the configured database.
        #[arg(long)]
        ephemeral: bool,
    },
    /// Print every student and how many days they attended.
    List {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Add a student.
    Add {
        /// The student's name.
        name: String,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Delete a student and their whole attendance history.
    Delete {
        /// The student's id.
        student_id: String,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Mark one or more students present (or absent) on a day.
    Mark {
        /// Ids of the students to mark.
        #[arg(required = true)]
        student_ids: Vec<String>,
        /// The day, as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Mark absent instead of present.
        #[arg(long)]
        absent: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the attendance report for a day.
    Report {
        /// The day, as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the roster as JSON, for backups.
    Export {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            config,
            bind,
            ephemeral,
        } => {
            let mut config = Config::load(config)?;
            if let Some(bind) = bind {
                config.bind = bind;
            }
            serve(config, ephemeral).await
        }
        Command::List { config } => list_roster(&Config::load(config)?),
        Command::Add { name, config } => add(&Config::load(config)?, &name),
        Command::Delete { student_id, config } => delete(&Config::load(config)?, &student_id),
        Command::Mark {
            student_ids,
            date,
            absent,
            config,
        } => mark(&Config::load(config)?, student_ids, date, !absent),
        Command::Report { date, config } => print_report(&Config::load(config)?, date),
        Command::Export { config } => export_roster(&Config::load(config)?),
    }
}
