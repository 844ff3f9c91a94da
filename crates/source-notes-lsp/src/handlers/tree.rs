use crate::handlers::workspace_not_found;
use crate::protocol::GetTreeResult;
use crate::state::GlobalState;
use tower_lsp::jsonrpc::Result;

/// Handle "sourceNotes/getTree" request
/// Returns the root nodes of the notes tree
pub async fn handle_get_tree(state: &GlobalState) -> Result<GetTreeResult> {
    let session_lock = state.session.read().await;
    let Some(session) = session_lock.as_ref() else {
        return Err(workspace_not_found());
    };

    let roots = session.tree().roots().to_vec();
    log::debug!("Returning {} root nodes", roots.len());

    Ok(GetTreeResult { roots })
}
