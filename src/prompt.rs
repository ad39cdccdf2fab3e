//! Masked terminal prompt for token entry.

use std::io::Error;

use async_trait::async_trait;

/// Source of a user-supplied access token.
///
/// Cancellation (empty submission or closed input) is a normal outcome,
/// reported as `None`, not an error.
#[async_trait]
pub trait TokenPrompt: Send + Sync {
    /// Ask the user for a token.
    ///
    /// # Errors
    /// Returns error if the terminal cannot be read at all.
    async fn read_token(&self) -> Result<Option<String>, Error>;
}

/// Interactive prompt reading from the controlling terminal with input
/// masked, so the token never echoes.
pub struct TerminalPrompt;

#[async_trait]
impl TokenPrompt for TerminalPrompt {
    async fn read_token(&self) -> Result<Option<String>, Error> {
        // Terminal reads block, so hop to the blocking pool.
        let input = tokio::task::spawn_blocking(|| rpassword::prompt_password("Enter token: "))
            .await
            .map_err(Error::other)?;

        match input {
            Ok(token) if token.trim().is_empty() => Ok(None),
            Ok(token) => Ok(Some(token.trim().to_string())),
            // Closed stdin (e.g. piped input ran out) counts as cancellation.
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}
