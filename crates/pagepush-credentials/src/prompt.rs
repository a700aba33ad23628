//! Interactive password entry.

use console::Term;

/// Source of a password when the secret store has none.
pub trait PasswordPrompt {
    /// Ask for the password of `username`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if input cannot be read.
    fn prompt_password(&self, username: &str) -> std::io::Result<String>;
}

/// Reads the password from the controlling terminal without echo.
pub struct ConsolePrompt {
    term: Term,
}

impl ConsolePrompt {
    /// Create a prompt that writes to stderr and reads from the terminal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordPrompt for ConsolePrompt {
    fn prompt_password(&self, username: &str) -> std::io::Result<String> {
        self.term.write_str(&format!("Password for {username}: "))?;
        self.term.read_secure_line()
    }
}
