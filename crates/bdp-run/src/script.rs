//! External script execution.
//!
//! A script asset runs as a child process and is expected to create its own
//! table. The target is passed through environment variables:
//! - `BDP_DB_PATH`: database location
//! - `BDP_SCHEMA`: target schema
//! - `BDP_TABLE`: target table

use bdp_core::Asset;
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

pub const ENV_DB_PATH: &str = "BDP_DB_PATH";
pub const ENV_SCHEMA: &str = "BDP_SCHEMA";
pub const ENV_TABLE: &str = "BDP_TABLE";

/// Environment added on top of the inherited one
pub fn build_env_vars(asset: &Asset, db_path: &str) -> HashMap<String, String> {
    let mut env = HashMap::new();
    env.insert(ENV_DB_PATH.to_string(), db_path.to_string());
    env.insert(ENV_SCHEMA.to_string(), asset.schema().to_string());
    env.insert(ENV_TABLE.to_string(), asset.table().to_string());
    env
}

/// Captured result of a finished script
#[derive(Debug, Clone)]
pub struct ScriptOutput {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run `interpreter <script>` and wait for it
pub fn run_script(
    interpreter: &str,
    script: &Path,
    env: &HashMap<String, String>,
) -> std::io::Result<ScriptOutput> {
    let output = Command::new(interpreter).arg(script).envs(env).output()?;

    Ok(ScriptOutput {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}
