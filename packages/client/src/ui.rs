//! Terminal I/O for the client.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{mpsc, watch};

/// Prompt for the current session state
pub fn prompt_for(display_name: Option<&str>) -> String {
    match display_name {
        Some(name) => format!("{}> ", name),
        None => "name> ".to_string(),
    }
}

/// Redisplay the prompt after printing output
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}

/// Print a block of output above the prompt
pub fn print_above_prompt(text: &str, prompt: &str) {
    print!("\n{}\n", text.trim_end_matches('\n'));
    redisplay_prompt(prompt);
}

/// Spawn a blocking thread for rustyline (synchronous readline).
///
/// Each non-empty line is forwarded on the returned channel. The channel
/// closes on Ctrl+C or Ctrl+D. The prompt is re-read before every line.
pub fn spawn_readline(prompt: watch::Receiver<String>) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            let current_prompt = prompt.borrow().clone();
            match rl.readline(&current_prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_for_unnamed_session() {
        // テスト項目: 名前未設定のときは名前入力用のプロンプトになる
        // given (前提条件):

        // when (操作):
        let prompt = prompt_for(None);

        // then (期待する結果):
        assert_eq!(prompt, "name> ");
    }

    #[test]
    fn test_prompt_for_active_session() {
        // テスト項目: 入室後は表示名がプロンプトになる
        // given (前提条件):

        // when (操作):
        let prompt = prompt_for(Some("Alice"));

        // then (期待する結果):
        assert_eq!(prompt, "Alice> ");
    }
}
