use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::InvocationFailure;

/// Runs `<executable> <filter>` with `json` as the whole of stdin.
///
/// Returns stdout verbatim on exit status 0. Any other outcome is a failure and
/// whatever the engine printed is dropped. Callers are expected to skip blank
/// filters; a blank filter is rejected here without spawning.
///
/// Dropping the returned future kills the engine.
pub async fn run(executable: &Path, json: &str, filter: &str) -> Result<String, InvocationFailure> {
    if filter.trim().is_empty() {
        return Err(InvocationFailure::EmptyFilter);
    }

    let mut child = Command::new(executable)
        .arg(filter)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|error| InvocationFailure::Spawn {
            message: error.to_string(),
            missing: error.kind() == ErrorKind::NotFound,
        })?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| InvocationFailure::Io("engine stdin was not captured".to_string()))?;

    // Feed stdin while draining stdout so a large document cannot fill both pipes.
    let feed = async move {
        stdin.write_all(json.as_bytes()).await?;
        stdin.shutdown().await?;
        Ok::<(), std::io::Error>(())
    };
    let (fed, output) = tokio::join!(feed, child.wait_with_output());

    let output = output.map_err(|error| InvocationFailure::Io(error.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::debug!(
            filter,
            code = ?output.status.code(),
            "filter engine failed: {stderr}"
        );
        return Err(InvocationFailure::Exit {
            code: output.status.code(),
            stderr,
        });
    }

    if let Err(error) = fed {
        // The engine may exit successfully without reading everything.
        if error.kind() != ErrorKind::BrokenPipe {
            return Err(InvocationFailure::Io(error.to_string()));
        }
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
