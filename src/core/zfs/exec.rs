use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Run an external command and capture stdout as UTF-8 text.
///
/// A non-zero exit is an error; stderr is folded into the diagnostic.
///
/// # Errors
/// Returns an error if the command cannot be spawned, exits non-zero, or
/// emits invalid UTF-8.
pub fn capture_stdout(program: &Path, args: &[&str]) -> Result<String> {
    debug!("running {} {:?}", program.display(), args);

    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("failed to run {}", program.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "{} {:?} exited with {}: {}",
            program.display(),
            args,
            output.status,
            stderr.trim()
        );
    }

    String::from_utf8(output.stdout)
        .with_context(|| format!("{} emitted invalid UTF-8", program.display()))
}
