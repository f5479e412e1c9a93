use crate::error::Result;
use crate::relay::{Relay, TurnOutcome};
use crate::session::ChatSession;
use crate::ui::output::{self, LiveOutput};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info_span, Instrument};

const EXIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

/// Send one user message and render the answer.
pub async fn handle_turn(
    relay: &Relay,
    session: &mut ChatSession,
    live: &LiveOutput,
    text: &str,
) -> Result<TurnOutcome> {
    session.add_user_message(text);
    live.begin_turn();

    let span = info_span!("turn", session = %session.session_id);
    let mut tool_results = Vec::new();
    let result = relay
        .run_turn_into(session.conversation_mut(), &mut tool_results)
        .instrument(span)
        .await;

    match result {
        Ok(outcome) => {
            live.end_turn(&outcome.reply, outcome.streamed);
            session.record_outcome(&outcome);
            Ok(outcome)
        }
        Err(e) => {
            live.clear_typing();
            // tools that already ran were shown and are in the history
            session.record_tool_results(&tool_results);
            Err(e)
        }
    }
}

/// Read messages from stdin until EOF or an exit command. Turn errors are
/// shown and the session carries on.
pub async fn run_interactive(relay: &Relay, session: &mut ChatSession, live: &LiveOutput) -> Result<()> {
    for entry in session.transcript().entries() {
        output::display_entry(entry);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        output::prompt()?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => {
                println!();
                break;
            }
        };

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if EXIT_COMMANDS.contains(&text) {
            break;
        }

        if let Err(e) = handle_turn(relay, session, live, text).await {
            output::display_error(&e);
        }
    }

    Ok(())
}

/// Answer a single message and return.
pub async fn run_one_shot(
    relay: &Relay,
    session: &mut ChatSession,
    live: &LiveOutput,
    prompt: &str,
) -> Result<()> {
    output::display_entry(&crate::ui::TranscriptEntry::user(prompt));
    handle_turn(relay, session, live, prompt).await?;
    Ok(())
}
