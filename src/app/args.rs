use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "chat-typeahead")]
#[command(about = "A terminal compose box with mention, stream and emoji suggestions")]
pub struct AppArgs {
    #[arg(long, help = "Typeahead settings file (JSON)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Users, streams and emoji to suggest (JSON)")]
    pub candidates: Option<PathBuf>,

    #[arg(long, help = "Maximum number of suggestions shown")]
    pub items: Option<usize>,

    #[arg(long = "min-length", help = "Characters needed before suggestions appear")]
    pub min_length: Option<usize>,

    #[arg(long, help = "Open menus above their field")]
    pub dropup: bool,

    #[arg(
        long = "stream-delay-ms",
        default_value_t = 300,
        help = "Simulated latency of the stream lookup (0 answers immediately)"
    )]
    pub stream_delay_ms: u64,

    #[arg(
        long = "log-level",
        default_value = "debug",
        help = "Log level for the log pane (RUST_LOG takes precedence)"
    )]
    pub log_level: String,
}

impl AppArgs {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }

    pub fn stream_delay(&self) -> Option<Duration> {
        (self.stream_delay_ms > 0).then(|| Duration::from_millis(self.stream_delay_ms))
    }
}
