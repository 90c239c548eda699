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

use std::net::SocketAddr;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;

use crate::error::Fallible;
use crate::web::api::get_data;
use crate::web::api::get_export;
use crate::web::api::get_report;
use crate::web::api::get_student;
use crate::web::api::method_not_allowed_handler;
use crate::web::api::not_found_handler;
use crate::web::api::post_data;
use crate::web::state::ServerState;

pub fn router(state: ServerState) -> Router {
    let app = Router::new();
    let app = app.route("/api/data", get(get_data).post(post_data));
    let app = app.route("/api/report", get(get_report));
    let app = app.route("/api/students/{id}", get(get_student));
    let app = app.route("/api/export", get(get_export));
    let app = app.method_not_allowed_fallback(method_not_allowed_handler);
    let app = app.fallback(not_found_handler);
    app.with_state(state)
}

pub async fn start_server(state: ServerState, bind: SocketAddr) -> Fallible<()> {
    log::debug!("Using {} store.", state.store.backend());
    let app = router(state);
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    println!("Listening on http://{bind}/");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::debug!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    match ctrl_c().await {
        Ok(()) => log::debug!("Received interrupt, shutting down."),
        Err(e) => {
            log::error!("could not listen for interrupts: {e}");
            std::future::pending::<()>().await;
        }
    }
}
