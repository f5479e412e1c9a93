use crate::config::{AssistantConfig, Config};
use crate::models::{Conversation, Message, ToolResult};
use crate::relay::TurnOutcome;
use crate::ui::{Transcript, TranscriptEntry};
use uuid::Uuid;

/// One chat session: the history sent to the model and what the user sees.
/// Lives for the process only.
pub struct ChatSession {
    pub session_id: String,
    assistant_name: String,
    conversation: Conversation,
    transcript: Transcript,
}

impl ChatSession {
    pub fn new(assistant: &AssistantConfig, system_prompt: Option<&str>) -> Self {
        let mut conversation = Conversation::new();
        let mut transcript = Transcript::new();

        if let Some(prompt) = system_prompt {
            conversation.push(Message::system(format!(
                "Today's date is {}.\n\n{}",
                Config::get_current_date(),
                prompt
            )));
        }

        // The greeting is part of the history the model sees.
        if !assistant.greeting.trim().is_empty() {
            conversation.push(Message::assistant(assistant.greeting.clone()));
            transcript.push(TranscriptEntry::assistant(&assistant.name, &assistant.greeting));
        }

        Self {
            session_id: Uuid::new_v4().to_string(),
            assistant_name: assistant.name.clone(),
            conversation,
            transcript,
        }
    }

    pub fn assistant_name(&self) -> &str {
        &self.assistant_name
    }

    pub fn add_user_message(&mut self, text: &str) {
        self.conversation.push(Message::user(text));
        self.transcript.push(TranscriptEntry::user(text));
    }

    pub fn record_tool_results(&mut self, results: &[ToolResult]) {
        for result in results {
            self.transcript.push(TranscriptEntry::tool(result));
        }
    }

    pub fn record_outcome(&mut self, outcome: &TurnOutcome) {
        self.record_tool_results(&outcome.tool_results);
        self.transcript
            .push(TranscriptEntry::assistant(&self.assistant_name, &outcome.reply));
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}
