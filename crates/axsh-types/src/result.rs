//! ExecResult — the plain-text result of every command execution.
//!
//! The command surface is deliberately unstructured: one text block in, one
//! text block out, failures included. The outer security wrapper and the
//! terminal layer both work on raw strings, so nothing richer is exposed.

/// The result of executing one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Exit code. 0 means success.
    pub code: i64,
    /// Standard output as a string.
    pub out: String,
    /// Standard error as a string.
    pub err: String,
}

impl ExecResult {
    /// Create a successful result with output.
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            err: String::new(),
        }
    }

    /// Create a failed result with an error message.
    pub fn failure(code: i64, err: impl Into<String>) -> Self {
        Self {
            code,
            out: String::new(),
            err: err.into(),
        }
    }

    /// True if the command succeeded (code == 0).
    pub fn ok(&self) -> bool {
        self.code == 0
    }

    /// Collapse into the single text block the outer surface expects.
    pub fn render(&self) -> String {
        if self.ok() {
            self.out.clone()
        } else {
            self.err.clone()
        }
    }
}

impl Default for ExecResult {
    fn default() -> Self {
        Self::success("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_renders_stdout() {
        let r = ExecResult::success("hello");
        assert!(r.ok());
        assert_eq!(r.render(), "hello");
    }

    #[test]
    fn failure_renders_stderr() {
        let r = ExecResult::failure(1, "cd: nope: no such path");
        assert!(!r.ok());
        assert_eq!(r.render(), "cd: nope: no such path");
    }
}
