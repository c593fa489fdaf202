//! The main entry point for the chat-typeahead compose box.
use anyhow::Result;

/// Parses the command line, loads configuration and runs the terminal UI
/// until Ctrl+C.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the terminal cannot
/// be set up.
#[tokio::main]
async fn main() -> Result<()> {
    chat_typeahead::app::launch().await
}
