mod configuration;
mod inline;
mod lifecycle;
mod notes;
mod notifications;
mod tree;

pub use configuration::*;
pub use inline::*;
pub use lifecycle::*;
pub use notes::*;
pub use notifications::*;
pub use tree::*;

use serde::de::DeserializeOwned;
use source_notes_core::{NotesError, Session};
use tower_lsp::jsonrpc::{Error, ErrorCode, Result};
use tower_lsp::lsp_types::{ExecuteCommandParams, MessageType};
use tower_lsp::Client;

use crate::state::GlobalState;

/// Send a log message to the client unless the configured level filters it out
pub(crate) async fn log_to_client(
    client: &Client,
    state: &GlobalState,
    typ: MessageType,
    message: impl Into<String>,
) {
    let message = message.into();
    log::debug!("{}", message);
    if state.config.read().await.allows(typ) {
        client.log_message(typ, message).await;
    }
}

/// Show a failed note operation to the user and turn it into a JSON-RPC error
pub(crate) async fn report_error(client: &Client, err: NotesError) -> Error {
    log::error!("{}", err);
    client.show_message(MessageType::ERROR, err.to_string()).await;
    crate::conversion::notes_error_to_rpc_error(&err)
}

/// Decode the first command argument
pub(crate) fn parse_first_arg<T: DeserializeOwned>(params: &ExecuteCommandParams) -> Result<T> {
    let Some(first_arg) = params.arguments.first() else {
        return Err(Error::invalid_params("Missing params"));
    };
    serde_json::from_value(first_arg.clone())
        .map_err(|e| Error::invalid_params(format!("Invalid params: {}", e)))
}

/// Error for requests that arrive before (or without) a workspace session
pub(crate) fn workspace_not_found() -> Error {
    crate::conversion::notes_error_to_rpc_error(&NotesError::WorkspaceNotFound)
}

/// Run a session operation on the blocking pool.
///
/// Session calls read and write the note document with std::fs, so they stay
/// off the async executor. The session write lock is held until `op` returns.
/// Failures, including a missing workspace, are shown to the user.
pub(crate) async fn run_session<T, F>(client: &Client, state: &GlobalState, op: F) -> Result<T>
where
    F: FnOnce(&mut Session) -> source_notes_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let mut session_lock = state.session.clone().write_owned().await;
    let outcome = tokio::task::spawn_blocking(move || session_lock.as_mut().map(op))
        .await
        .map_err(|e| Error {
            code: ErrorCode::InternalError,
            message: format!("Session task failed: {}", e).into(),
            data: None,
        })?;

    match outcome {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(report_error(client, e).await),
        None => Err(report_error(client, NotesError::WorkspaceNotFound).await),
    }
}
