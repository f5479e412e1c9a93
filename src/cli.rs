use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "bookbot")]
#[command(about = "Holiday booking assistant chat over an OpenAI-compatible API", long_about = None)]
pub struct Args {
    #[arg(
        long = "demo",
        help = "Run a single canned booking request and exit"
    )]
    pub demo: bool,

    #[arg(short = 'm', long = "model", help = "Model name to request")]
    pub model: Option<String>,

    #[arg(
        long = "api-endpoint",
        help = "Custom API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(long = "stream", help = "Stream the final answer as it is generated")]
    pub stream: bool,

    #[arg(long = "no-tools", help = "Do not offer the booking tools to the model")]
    pub no_tools: bool,

    #[arg(long = "config", help = "Path to a YAML or JSON config file")]
    pub config: Option<PathBuf>,

    #[arg(short = 'v', long = "verbose", help = "Log requests and tool calls to stderr")]
    pub verbose: bool,

    #[arg(help = "Message to send; starts an interactive chat when omitted")]
    pub prompt: Vec<String>,
}

impl Args {
    /// The one-shot message, if any.
    pub fn one_shot_prompt(&self) -> Option<String> {
        if self.demo {
            Some(crate::config::defaults::DEMO_PROMPT.to_string())
        } else if self.prompt.is_empty() {
            None
        } else {
            Some(self.prompt.join(" "))
        }
    }
}
