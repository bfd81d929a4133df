//! Salted one-way password hashing through an external interpreter.
//!
//! The hash itself is computed by a child process. [`CryptBackend`] decides
//! which command to spawn; [`run`] spawns it, relays its stdout line by line
//! and checks its exit status. Replacing the interpreter only means providing
//! another backend.

use std::process::Stdio;

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::debug;

use crate::secret::Passphrase;

/// Builds the child process that computes `crypt(key, salt)`.
pub trait CryptBackend {
    /// Human-readable name used in error messages.
    fn name(&self) -> &str;

    /// A ready-to-spawn command. Key and salt must travel as arguments,
    /// never spliced into script text.
    fn command(&self, key: &str, salt: &str) -> Command;
}

/// Evaluates Perl's built-in `crypt`.
#[derive(Debug, Clone)]
pub struct PerlCrypt {
    interpreter: String,
}

impl PerlCrypt {
    const SCRIPT: &'static str = "print crypt($ARGV[0], $ARGV[1]);";

    pub fn new(interpreter: impl Into<String>) -> Self {
        Self { interpreter: interpreter.into() }
    }
}

impl CryptBackend for PerlCrypt {
    fn name(&self) -> &str {
        &self.interpreter
    }

    fn command(&self, key: &str, salt: &str) -> Command {
        let mut command = Command::new(&self.interpreter);
        command.arg("-e").arg(Self::SCRIPT).arg("--").arg(key).arg(salt);
        command
    }
}

/// Spawns the backend, copies each stdout line to `out`, then waits for the
/// child. Spawn failures and non-zero exits are errors.
pub async fn run<B, W>(backend: &B, key: &Passphrase, salt: &str, out: &mut W) -> Result<()>
where
    B: CryptBackend + ?Sized,
    W: AsyncWrite + Unpin,
{
    let mut child = backend
        .command(key.expose_secret(), salt)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("could not invoke {}", backend.name()))?;

    let stdout = child.stdout.take().context("child stdout not captured")?;
    let mut lines = BufReader::new(stdout).lines();

    while let Some(line) = lines.next_line().await.context("failed to read child output")? {
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    out.flush().await?;

    let status = child.wait().await.with_context(|| format!("failed to wait for {}", backend.name()))?;
    debug!("{} exited with {status}", backend.name());

    if !status.success() {
        match status.code() {
            Some(code) => bail!("child process ended abnormally: {code}"),
            None => bail!("child process terminated by signal"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs a shell snippet; `$1` and `$2` are the key and salt.
    struct Shell(&'static str);

    impl CryptBackend for Shell {
        fn name(&self) -> &str {
            "sh"
        }

        fn command(&self, key: &str, salt: &str) -> Command {
            let mut command = Command::new("sh");
            command.arg("-c").arg(self.0).arg("sh").arg(key).arg(salt);
            command
        }
    }

    #[test]
    fn test_perl_command_passes_arguments() {
        let command = PerlCrypt::new("perl").command("pa\"ss", "ab");
        let args: Vec<_> = command.as_std().get_args().map(|a| a.to_string_lossy().into_owned()).collect();

        assert_eq!(command.as_std().get_program(), "perl");
        assert_eq!(args, vec!["-e", PerlCrypt::SCRIPT, "--", "pa\"ss", "ab"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_relays_output_lines() {
        let mut out = Vec::new();
        run(&Shell("printf '%s-%s\\nsecond' \"$1\" \"$2\""), &Passphrase::new("secret"), "xy", &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "secret-xy\nsecond\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_error() {
        let mut out = Vec::new();
        let err = run(&Shell("echo partial; exit 3"), &Passphrase::new("secret"), "xy", &mut out).await.unwrap_err();

        assert!(err.to_string().contains('3'));
        assert_eq!(out, b"partial\n");
    }

    #[tokio::test]
    async fn test_spawn_failure_is_error() {
        let backend = PerlCrypt::new("/nonexistent/interpreter-for-tests");
        let err = run(&backend, &Passphrase::new("secret"), "xy", &mut Vec::new()).await.unwrap_err();

        assert!(err.to_string().contains("could not invoke"));
    }
}
