use std::io;
use thiserror::Error;

/// Errors reading or decoding a hook payload.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read stdin: {0}")]
    Read(#[from] io::Error),

    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors querying the repository for status information.
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] io::Error),

    #[error("git {command} exited with {code}: {stderr}")]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },
}
