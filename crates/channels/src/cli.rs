//! CLI channel — interactive terminal-based chat.
//!
//! Reads one turn per line from stdin and writes replies to stdout.
//! Used by `medtriage chat`.

use std::sync::Mutex;
use async_trait::async_trait;
use medtriage_core::channel::{Channel, ChannelId, ChannelMessage};
use medtriage_core::error::ChannelError;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

type LineSource = Box<dyn AsyncBufRead + Send + Unpin>;

/// Interactive CLI channel for terminal-based chat.
pub struct CliChannel {
    id: ChannelId,
    input: Mutex<Option<LineSource>>,
}

impl CliChannel {
    pub fn new() -> Self {
        Self {
            id: ChannelId("cli".into()),
            input: Mutex::new(None),
        }
    }

    /// Read turns from `reader` instead of stdin.
    pub fn with_input(reader: impl AsyncBufRead + Send + Unpin + 'static) -> Self {
        Self {
            id: ChannelId("cli".into()),
            input: Mutex::new(Some(Box::new(reader))),
        }
    }

    fn take_input(&self) -> LineSource {
        self.input
            .lock()
            .ok()
            .and_then(|mut input| input.take())
            .unwrap_or_else(|| Box::new(BufReader::new(io::stdin())))
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Lines that end the session.
pub fn is_exit_command(line: &str) -> bool {
    matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q")
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    fn id(&self) -> &ChannelId {
        &self.id
    }

    async fn start(
        &self,
    ) -> Result<mpsc::Receiver<Result<ChannelMessage, ChannelError>>, ChannelError> {
        let (tx, rx) = mpsc::channel(32);
        let channel_id = self.id.clone();
        let mut lines = self.take_input().lines();

        tokio::spawn(async move {
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            continue;
                        }

                        if is_exit_command(&line) {
                            debug!("Exit command received");
                            break;
                        }

                        let msg = ChannelMessage {
                            channel_id: channel_id.clone(),
                            sender_id: "local_user".into(),
                            content: line,
                            chat_id: "cli_session".into(),
                        };

                        if tx.send(Ok(msg)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF (Ctrl+D)
                    Err(e) => {
                        let _ = tx.send(Err(ChannelError::ConnectionLost(e.to_string()))).await;
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, _chat_id: &str, content: &str) -> Result<(), ChannelError> {
        let mut stdout = io::stdout();
        let delivery_failed = |e: std::io::Error| ChannelError::DeliveryFailed {
            channel: "cli".into(),
            reason: e.to_string(),
        };

        stdout
            .write_all(format!("{content}\n\n").as_bytes())
            .await
            .map_err(delivery_failed)?;
        stdout.flush().await.map_err(delivery_failed)
    }
}
