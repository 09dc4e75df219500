//! Interactive chat session over stdin.

use std::io::{self, BufRead, Write};

use crate::chat::{ChatClient, HistoryEntry};
use crate::context::{ChatContext, WorkspaceScanner};

const HISTORY_PREVIEW_CHARS: usize = 60;
const FILE_LIST_LIMIT: usize = 20;
const HISTORY_LIST_LIMIT: usize = 10;

/// Read-eval-print loop around a [`ChatClient`] and a workspace scanner.
pub struct InteractiveSession {
    chat: ChatClient,
    scanner: WorkspaceScanner,
    agent: Option<String>,
    model: Option<String>,
}

impl InteractiveSession {
    pub fn new(
        chat: ChatClient,
        scanner: WorkspaceScanner,
        agent: Option<String>,
        model: Option<String>,
    ) -> Self {
        Self {
            chat,
            scanner,
            agent,
            model,
        }
    }

    /// Run until `/exit`, EOF, or a read error.
    pub fn run(&mut self) -> io::Result<()> {
        self.print_welcome();
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("You: ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                println!("\nSession ended.");
                return Ok(());
            };
            let input = line?;
            let input = input.trim();
            if input.is_empty() {
                continue;
            }
            if input.starts_with('/') {
                if !self.handle_command(input) {
                    return Ok(());
                }
                continue;
            }
            self.process_message(input);
        }
    }

    fn print_welcome(&self) {
        println!("{}", "=".repeat(60));
        println!("CLI Pilot - Interactive Chat Session");
        println!("{}", "=".repeat(60));
        println!("Workspace: {}", self.scanner.root().display());
        if let Some(agent) = &self.agent {
            println!("Agent: {agent}");
        }
        if let Some(model) = &self.model {
            println!("Model: {model}");
        }
        println!();
        println!("Commands:");
        println!("  /help     - Show help");
        println!("  /context  - Show workspace context");
        println!("  /files    - List workspace files");
        println!("  /history  - Show chat history");
        println!("  /clear    - Clear chat history");
        println!("  /exit     - Exit session");
        println!();
        println!("Type your message and press Enter to chat.");
        println!("{}", "=".repeat(60));
        println!();
    }

    /// Returns false when the session should end.
    fn handle_command(&mut self, input: &str) -> bool {
        match input.to_lowercase().as_str() {
            "/help" => self.show_help(),
            "/context" => self.show_context(),
            "/files" => self.show_files(),
            "/history" => self.show_history(),
            "/clear" => {
                self.chat.clear_history();
                println!("Chat history cleared.\n");
            }
            "/exit" | "/quit" | "/q" => {
                println!("Goodbye!");
                return false;
            }
            other => println!("Unknown command: {other}. Try /help.\n"),
        }
        true
    }

    fn process_message(&mut self, message: &str) {
        let context = ChatContext {
            workspace: self.scanner.root().display().to_string(),
            files: Vec::new(),
            workspace_info: Some(self.scanner.workspace_context()),
        };
        let response = self.chat.send_message(
            message,
            context,
            self.agent.as_deref(),
            self.model.as_deref(),
        );
        println!("\nCopilot: {}", response.content);
        if !response.references.is_empty() {
            println!("\nReferences: {}", response.references.join(", "));
        }
        println!();
    }

    fn show_help(&self) {
        println!();
        println!("CLI Pilot Help");
        println!("{}", "=".repeat(40));
        println!("  /help     - Show this help message");
        println!("  /context  - Show workspace context information");
        println!("  /files    - List relevant files in workspace");
        println!("  /history  - Show chat history");
        println!("  /clear    - Clear chat history");
        println!("  /exit     - Exit interactive session");
        println!();
        println!("Chat examples:");
        println!("  - Explain this code");
        println!("  - Create a Python function that validates emails");
        println!("  - Fix the bug in my authentication logic");
        println!("  - Write tests for the User class");
        println!("{}", "=".repeat(40));
        println!();
    }

    fn show_context(&self) {
        println!();
        println!("Workspace Context");
        println!("{}", "=".repeat(40));
        let context = self.scanner.workspace_context();
        println!("Path: {}", context.path);
        if context.project_info.kind != "unknown" {
            println!("Project Type: {}", context.project_info.kind);
        }
        if let Some(git) = &context.git_info {
            if let Some(branch) = &git.branch {
                println!("Git Branch: {branch}");
            }
            if let Some(remote) = &git.remote {
                println!("Git Remote: {remote}");
            }
        }
        println!("Total Files: {}", context.stats.total_files);
        println!("Total Size: {} bytes", context.stats.total_size);
        if !context.stats.file_types.is_empty() {
            let mut counts: Vec<_> = context.stats.file_types.iter().collect();
            counts.sort_by(|a, b| b.1.cmp(a.1));
            println!("File Types:");
            for (ext, count) in counts.into_iter().take(5) {
                println!("  {ext}: {count} files");
            }
        }
        println!("{}", "=".repeat(40));
        println!();
    }

    fn show_files(&self) {
        println!();
        println!("Workspace Files");
        println!("{}", "=".repeat(40));
        let files = self.scanner.relevant_files();
        if files.is_empty() {
            println!("No relevant files found.");
        } else {
            println!("Showing {} files:", files.len());
            for (index, file) in files.iter().take(FILE_LIST_LIMIT).enumerate() {
                println!(
                    "  {:2}. {} ({}, {})",
                    index + 1,
                    file.path,
                    file.language.unwrap_or("unknown"),
                    format_file_size(file.size)
                );
            }
            if files.len() > FILE_LIST_LIMIT {
                println!("  ... and {} more files", files.len() - FILE_LIST_LIMIT);
            }
        }
        println!("{}", "=".repeat(40));
        println!();
    }

    fn show_history(&self) {
        println!();
        println!("Chat History");
        println!("{}", "=".repeat(40));
        let history = self.chat.history();
        if history.is_empty() {
            println!("No chat history available.");
        } else {
            let start = history.len().saturating_sub(HISTORY_LIST_LIMIT);
            for (index, entry) in history[start..].iter().enumerate() {
                match entry {
                    HistoryEntry::Request { message, .. } => {
                        println!("  {:2}. You: {}", index + 1, preview(message));
                    }
                    HistoryEntry::Response { content, .. } => {
                        println!("  {:2}. Copilot: {}", index + 1, preview(content));
                    }
                }
            }
        }
        println!("{}", "=".repeat(40));
        println!();
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > HISTORY_PREVIEW_CHARS {
        let head: String = text.chars().take(HISTORY_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

fn format_file_size(size: u64) -> String {
    if size < 1024 {
        format!("{size} B")
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_text() {
        let long = "x".repeat(100);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), HISTORY_PREVIEW_CHARS + 3);
    }

    #[test]
    fn preview_keeps_short_text() {
        assert_eq!(preview("hello"), "hello");
    }

    #[test]
    fn file_sizes_format_by_magnitude() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.0 MB");
    }
}
