use bookbot::api::HttpCompletionClient;
use bookbot::booking::ToolRegistry;
use bookbot::cli::Args;
use bookbot::config::Config;
use bookbot::error::Result;
use bookbot::models::ToolResult;
use bookbot::relay::Relay;
use bookbot::session::ChatSession;
use bookbot::ui::chat::{run_interactive, run_one_shot};
use bookbot::ui::output::display_error;
use bookbot::ui::LiveOutput;
use clap::Parser;
use std::process;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "bookbot=debug" } else { "warn" };
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_ansi(is_tty)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            display_error(&e);
            process::exit(1);
        }
    };

    init_logging(config.verbose);

    if let Err(e) = run(args, config).await {
        display_error(&e);
        process::exit(1);
    }
}

async fn run(args: Args, config: Config) -> Result<()> {
    let live = Arc::new(LiveOutput::new(&config.assistant.name));

    let delta_live = Arc::clone(&live);
    let client = HttpCompletionClient::new(&config.api_key, &config.api_endpoint, config.stream_timeout)?
        .with_delta_sink(Arc::new(move |delta: &str| delta_live.on_delta(delta)));

    let tool_live = Arc::clone(&live);
    let mut relay = Relay::new(Box::new(client), config.model.clone())
        .with_streaming(config.stream)
        .with_tool_sink(Arc::new(move |result: &ToolResult| tool_live.on_tool_result(result)));

    if config.tools.enabled {
        relay = relay.with_tools(ToolRegistry::new(&config.tools));
    }

    debug!(
        model = relay.model(),
        endpoint = %config.api_endpoint,
        tools = ?relay.tool_names(),
        stream = config.stream,
        "relay ready"
    );

    let mut session = ChatSession::new(&config.assistant, config.system_prompt.as_deref());

    match args.one_shot_prompt() {
        Some(prompt) => run_one_shot(&relay, &mut session, &live, &prompt).await,
        None => run_interactive(&relay, &mut session, &live).await,
    }
}
