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
use std::sync::Mutex;

use crate::config::Config;
use crate::reducer::DuplicatePolicy;
use crate::store::Store;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn Store>,
    pub class_name: String,
    pub duplicate_policy: DuplicatePolicy,
    /// Held for the whole read-apply-overwrite of a mutation, so requests
    /// to this process never interleave their writes.
    pub write_lock: Arc<Mutex<()>>,
}

impl ServerState {
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        Self {
            store,
            class_name: config.class_name.clone(),
            duplicate_policy: config.duplicate_policy,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}
