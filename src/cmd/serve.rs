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

use std::sync::Arc;

use crate::config::Config;
use crate::error::Fallible;
use crate::store::Store;
use crate::store::memory::MemoryStore;
use crate::web::server::start_server;
use crate::web::state::ServerState;

pub async fn serve(config: Config, ephemeral: bool) -> Fallible<()> {
    let bind = config.bind_addr()?;
    let store: Arc<dyn Store> = if ephemeral {
        log::debug!("Using an ephemeral in-memory store.");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(config.open_store()?)
    };
    let state = ServerState::new(store, &config);
    start_server(state, bind).await
}
