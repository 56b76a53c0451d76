//! editora serve - Run the REST API

use std::sync::Arc;

use clap::Args;

use crate::app::AppContext;
use crate::error::{EditoraError, Result};
use crate::server::{self, ServerState};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Listen address; defaults to server.bind from config
    #[arg(long)]
    pub bind: Option<String>,
}

pub fn run(ctx: &AppContext, args: &ServeArgs) -> Result<()> {
    let bind = args
        .bind
        .clone()
        .unwrap_or_else(|| ctx.config.server.bind.clone());
    let state = ServerState::new(Arc::clone(&ctx.db), ctx.search_settings());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| EditoraError::Server(format!("failed to start runtime: {err}")))?;
    runtime.block_on(server::serve(state, &bind))
}
