#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::fmt;
use std::io::{self, IsTerminal, Write};
use zeroize::{Zeroize, Zeroizing};

pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

const PROMPT: &str = "GitHub Personal Access Token (used only in this session): ";

/// Account name plus access token.
///
/// The token is never printed: `Debug` masks it and callers only reach it
/// through [`Credential::token`]. `clear` and drop zero the buffer.
pub struct Credential {
    account: String,
    token: Zeroizing<String>,
}

impl Credential {
    pub fn new(account: impl Into<String>, token: impl Into<String>) -> Result<Self, AppError> {
        let raw = Zeroizing::new(token.into());
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(no_credential("Empty GitHub token provided."));
        }
        Ok(Self {
            account: account.into(),
            token: Zeroizing::new(trimmed.to_string()),
        })
    }

    /// Resolve the token from `GITHUB_TOKEN`, falling back to a non-echoing
    /// prompt when stdin is a terminal.
    pub fn resolve(account: impl Into<String>) -> Result<Self, AppError> {
        let account = account.into();
        if let Some(token) = token_from_env() {
            tracing::debug!("using token from {}", TOKEN_ENV_VAR);
            return Self::new(account, token.as_str());
        }

        if !io::stdin().is_terminal() {
            return Err(no_credential("No GitHub token provided."));
        }

        let token = prompt_hidden(PROMPT)?;
        Self::new(account, token.as_str())
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    pub fn is_cleared(&self) -> bool {
        self.token.is_empty()
    }

    /// Zero and empty the token. Copies held by the OS (the process
    /// environment) are out of reach.
    pub fn clear(&mut self) {
        self.token.zeroize();
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("account", &self.account)
            .field("token", &"***")
            .finish()
    }
}

fn token_from_env() -> Option<Zeroizing<String>> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .map(Zeroizing::new)
        .filter(|value| !value.trim().is_empty())
}

fn no_credential(message: &str) -> AppError {
    AppError::new(ErrorCategory::NoCredential, message)
}

fn prompt_hidden(prompt: &str) -> Result<Zeroizing<String>, AppError> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    enable_raw_mode()
        .map_err(|e| no_credential(&format!("Cannot read token from terminal: {}", e)))?;
    let result = read_hidden_line();
    // Raw mode must be left even when reading failed.
    let restored = disable_raw_mode();
    writeln!(stderr)?;
    restored.map_err(|e| no_credential(&format!("Failed to restore terminal: {}", e)))?;

    result
}

/// Longest token accepted from the prompt; the buffer never reallocates.
const MAX_PROMPT_LEN: usize = 255;

fn read_hidden_line() -> Result<Zeroizing<String>, AppError> {
    let mut buffer = Zeroizing::new(String::with_capacity(MAX_PROMPT_LEN + 4));
    loop {
        let event =
            event::read().map_err(|e| no_credential(&format!("Terminal read failed: {}", e)))?;
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event
        else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }
        match code {
            KeyCode::Enter => return Ok(buffer),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(no_credential("Token prompt cancelled."));
            }
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(no_credential("No GitHub token provided."));
            }
            KeyCode::Char(c) if buffer.len() + c.len_utf8() <= MAX_PROMPT_LEN => buffer.push(c),
            KeyCode::Char(_) => {}
            KeyCode::Esc => return Err(no_credential("Token prompt cancelled.")),
            _ => {}
        }
    }
}
