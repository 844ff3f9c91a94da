//! Source Notes LSP Server Binary Entry Point

use source_notes_lsp::create_lsp_service;
use tower_lsp::Server;

#[tokio::main]
async fn main() {
    // stdout carries the protocol; logs go to stderr
    env_logger::init();

    log::info!("Source Notes LSP Server starting, listening on stdin/stdout");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_lsp_service();
    Server::new(stdin, stdout, socket).serve(service).await;
}
