use crate::config::LspSettings;
use crate::handlers::log_to_client;
use crate::state::GlobalState;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

/// Handle "workspace/didChangeConfiguration"
/// Settings live under the "sourceNotes" section
pub async fn handle_did_change_configuration(
    client: &Client,
    state: &GlobalState,
    params: DidChangeConfigurationParams,
) {
    let serde_json::Value::Object(map) = params.settings else {
        return;
    };
    let Some(settings) = map.get("sourceNotes") else {
        return;
    };

    match serde_json::from_value::<LspSettings>(settings.clone()) {
        Ok(new_settings) => {
            {
                let mut config_lock = state.config.write().await;
                *config_lock = new_settings;
            }
            log_to_client(client, state, MessageType::INFO, "Settings updated").await;
        }
        Err(e) => {
            client
                .log_message(
                    MessageType::ERROR,
                    format!("Failed to parse updated settings: {}", e),
                )
                .await;
        }
    }
}
