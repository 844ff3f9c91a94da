use tokio::sync::mpsc::UnboundedReceiver;
use tower_lsp::Client;

use crate::protocol::TreeChanged;

/// Forwards tree rebuilds to the client as `sourceNotes/treeChanged`.
///
/// Signals that pile up while a notification is in flight collapse into one.
pub struct TreeNotifier {
    client: Client,
    receiver: UnboundedReceiver<()>,
}

impl TreeNotifier {
    pub fn new(client: Client, receiver: UnboundedReceiver<()>) -> Self {
        Self { client, receiver }
    }

    pub async fn start(mut self) {
        log::debug!("Tree notifier started");

        while self.receiver.recv().await.is_some() {
            while self.receiver.try_recv().is_ok() {}
            self.client.send_notification::<TreeChanged>(()).await;
        }

        log::debug!("Tree notifier stopped");
    }
}
