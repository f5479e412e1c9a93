use crate::models::{Role, ToolResult};
use crate::ui::transcript::{Direction, TranscriptEntry};
use colored::*;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use terminal_size::{terminal_size, Width};

const MIN_FRAME_WIDTH: usize = 40;
const MAX_FRAME_WIDTH: usize = 100;

fn frame_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(80)
        .clamp(MIN_FRAME_WIDTH, MAX_FRAME_WIDTH)
}

/// Draw `body` inside a titled box `width` columns wide. Long lines are not
/// wrapped.
pub fn boxed_block(title: &str, body: &str, width: usize) -> String {
    let header = format!("┌─[{}]", title);
    let header_len = header.chars().count();
    let mut block = header;
    block.push_str(&"─".repeat(width.saturating_sub(header_len)));
    block.push('\n');

    for line in body.trim_end().lines() {
        block.push_str("│ ");
        block.push_str(line);
        block.push('\n');
    }

    block.push('└');
    block.push_str(&"─".repeat(width.saturating_sub(1)));
    block
}

/// Display a tool result in a boxed format
pub fn display_tool_result(name: &str, result: &str) {
    let block = boxed_block(&format!("TOOL: {}", name), result, frame_width());
    println!("{}", block.cyan());
}

/// Display a tool error in a boxed format
pub fn display_tool_error(name: &str, error: &str) {
    let block = boxed_block(&format!("TOOL ERROR: {}", name), error, frame_width());
    println!("{}", block.yellow());
}

pub fn display_tool(result: &ToolResult) {
    if result.is_error {
        display_tool_error(&result.name, &result.content);
    } else {
        display_tool_result(&result.name, &result.content);
    }
}

pub fn display_entry(entry: &TranscriptEntry) {
    match (entry.direction, entry.role) {
        (_, Role::Tool) if entry.is_error => display_tool_error(&entry.sender, &entry.text),
        (_, Role::Tool) => display_tool_result(&entry.sender, &entry.text),
        (Direction::Outgoing, _) => {
            println!("{} {}", format!("{}:", entry.sender).blue().bold(), entry.text)
        }
        (Direction::Incoming, _) => {
            println!("{} {}", format!("{}:", entry.sender).green().bold(), entry.text)
        }
    }
}

pub fn display_error(error: &dyn std::fmt::Display) {
    eprintln!("{} {}", "Error:".red(), error);
}

pub fn prompt() -> io::Result<()> {
    print!("{} ", ">".blue().bold());
    io::stdout().flush()
}

/// Terminal state shared by the streaming and tool sinks during a turn.
///
/// Whichever output arrives first clears the typing indicator; streamed text
/// gets the assistant's name printed once in front of it.
pub struct LiveOutput {
    assistant_name: String,
    typing: AtomicBool,
    reply_started: AtomicBool,
}

impl LiveOutput {
    pub fn new(assistant_name: &str) -> Self {
        Self {
            assistant_name: assistant_name.to_string(),
            typing: AtomicBool::new(false),
            reply_started: AtomicBool::new(false),
        }
    }

    pub fn begin_turn(&self) {
        self.reply_started.store(false, Ordering::SeqCst);
        self.typing.store(true, Ordering::SeqCst);
        print!("{}", format!("{} is typing...", self.assistant_name).dimmed());
        let _ = io::stdout().flush();
    }

    pub fn clear_typing(&self) {
        if self.typing.swap(false, Ordering::SeqCst) {
            print!("\r\x1b[K");
            let _ = io::stdout().flush();
        }
    }

    pub fn on_delta(&self, delta: &str) {
        self.clear_typing();
        if !self.reply_started.swap(true, Ordering::SeqCst) {
            print!("{} ", format!("{}:", self.assistant_name).green().bold());
        }
        print!("{}", delta);
        let _ = io::stdout().flush();
    }

    pub fn on_tool_result(&self, result: &ToolResult) {
        self.clear_typing();
        display_tool(result);
    }

    /// Finish the turn; prints `reply` unless it was already streamed.
    pub fn end_turn(&self, reply: &str, streamed: bool) {
        self.clear_typing();
        if streamed && self.reply_started.load(Ordering::SeqCst) {
            println!();
        } else {
            display_entry(&TranscriptEntry::assistant(&self.assistant_name, reply));
        }
    }
}
