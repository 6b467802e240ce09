//! Per-kind dispatch and the sequential run loop

use crate::error::{MaterializeError, MaterializeResult};
use crate::script::{build_env_vars, run_script};
use crate::transform::{TransformContext, TransformRegistry};
use bdp_core::{Asset, AssetKind, AssetName, CoreError, FrameError};
use bdp_db::{Database, DbError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

/// Interpreter used for script assets when none is configured
pub const DEFAULT_INTERPRETER: &str = "bash";

/// Outcome of one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Success => write!(f, "success"),
            RunStatus::Error => write!(f, "error"),
        }
    }
}

/// Run result for a single asset
#[derive(Debug, Clone, Serialize)]
pub struct AssetRunResult {
    pub asset: String,
    pub kind: AssetKind,
    pub status: RunStatus,
    pub duration_secs: f64,
    pub error: Option<String>,
}

/// Results of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunResults {
    pub timestamp: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub success_count: usize,
    pub failure_count: usize,
    pub results: Vec<AssetRunResult>,
}

/// Results plus the error that stopped the run, if any
#[derive(Debug)]
pub struct RunOutcome {
    pub results: RunResults,
    pub failure: Option<MaterializeError>,
}

impl RunOutcome {
    /// The results when every asset succeeded, the stopping error otherwise
    pub fn into_result(self) -> MaterializeResult<RunResults> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.results),
        }
    }
}

/// Executes assets against one database
pub struct Materializer<'a> {
    db: &'a dyn Database,
    transforms: &'a TransformRegistry,
    interpreter: String,
}

impl<'a> Materializer<'a> {
    pub fn new(db: &'a dyn Database, transforms: &'a TransformRegistry) -> Self {
        Self {
            db,
            transforms,
            interpreter: DEFAULT_INTERPRETER.to_string(),
        }
    }

    /// Program used to run script assets
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Materialize `order` one asset at a time, stopping at the first failure.
    ///
    /// `on_result` sees each result as soon as its asset finishes.
    pub fn run(
        &self,
        assets: &BTreeMap<AssetName, Asset>,
        order: &[AssetName],
        mut on_result: impl FnMut(&AssetRunResult),
    ) -> RunOutcome {
        let start = Instant::now();
        let mut results = Vec::with_capacity(order.len());
        let mut failure = None;

        for name in order {
            let Some(asset) = assets.get(name) else {
                log::warn!("Stopping run: {} is not a discovered asset", name);
                failure = Some(MaterializeError::Core(CoreError::UnknownAssets {
                    names: vec![name.to_string()],
                }));
                break;
            };
            let asset_start = Instant::now();
            log::info!("Materializing {} [{}]", name, asset.kind);
            let outcome = self.materialize(asset);
            let duration_secs = asset_start.elapsed().as_secs_f64();

            let result = AssetRunResult {
                asset: name.to_string(),
                kind: asset.kind,
                status: if outcome.is_ok() {
                    RunStatus::Success
                } else {
                    RunStatus::Error
                },
                duration_secs,
                error: outcome.as_ref().err().map(ToString::to_string),
            };
            on_result(&result);
            results.push(result);

            if let Err(err) = outcome {
                log::warn!("Stopping run: {} failed", name);
                failure = Some(err);
                break;
            }
            log::debug!("Finished {} in {:.3}s", name, duration_secs);
        }

        let success_count = results
            .iter()
            .filter(|r| r.status == RunStatus::Success)
            .count();
        let failure_count = results.len() - success_count;
        RunOutcome {
            results: RunResults {
                timestamp: Utc::now(),
                elapsed_secs: start.elapsed().as_secs_f64(),
                success_count,
                failure_count,
                results,
            },
            failure,
        }
    }

    /// Materialize one asset according to its kind
    pub fn materialize(&self, asset: &Asset) -> MaterializeResult<()> {
        match asset.kind {
            AssetKind::Query => self.run_query(asset),
            AssetKind::Transform => self.run_transform(asset),
            AssetKind::Script => self.run_script(asset),
        }
    }

    fn run_query(&self, asset: &Asset) -> MaterializeResult<()> {
        let sql = asset.body().trim().trim_end_matches(';').trim_end();
        if sql.is_empty() {
            return Err(MaterializeError::EmptyQuery {
                asset: asset.name.to_string(),
                path: asset.path.display().to_string(),
            });
        }
        self.db
            .create_schema_if_not_exists(asset.schema())
            .and_then(|()| {
                self.db
                    .replace_table_as(asset.schema(), asset.table(), sql)
            })
            .map_err(|e| db_error(asset, e))
    }

    fn run_transform(&self, asset: &Asset) -> MaterializeResult<()> {
        let func = self.transforms.get(asset.name.as_str()).ok_or_else(|| {
            MaterializeError::MissingTransform {
                asset: asset.name.to_string(),
                path: asset.path.display().to_string(),
                table: asset.table().to_string(),
            }
        })?;

        let ctx = TransformContext::new(self.db, &asset.name);
        let frame = func(&ctx).map_err(|err| match err.downcast::<FrameError>() {
            Ok(frame_err) => MaterializeError::InvalidFrame {
                asset: asset.name.to_string(),
                path: asset.path.display().to_string(),
                source: *frame_err,
            },
            Err(err) => MaterializeError::TransformFailed {
                asset: asset.name.to_string(),
                path: asset.path.display().to_string(),
                message: err.to_string(),
            },
        })?;

        self.db
            .create_schema_if_not_exists(asset.schema())
            .and_then(|()| self.db.write_frame(asset.schema(), asset.table(), &frame))
            .map_err(|e| db_error(asset, e))
    }

    fn run_script(&self, asset: &Asset) -> MaterializeResult<()> {
        self.db
            .create_schema_if_not_exists(asset.schema())
            .map_err(|e| db_error(asset, e))?;

        let env = build_env_vars(asset, self.db.location());
        let output = run_script(&self.interpreter, &asset.path, &env).map_err(|e| {
            MaterializeError::ScriptSpawn {
                path: asset.path.display().to_string(),
                interpreter: self.interpreter.clone(),
                source: e,
            }
        })?;
        log::debug!(
            "Script {} exited with {}",
            asset.path.display(),
            output.exit_code
        );
        if !output.stdout.is_empty() {
            log::debug!("{} stdout:\n{}", asset.name, output.stdout.trim_end());
        }
        if !output.success {
            return Err(MaterializeError::ScriptFailed {
                asset: asset.name.to_string(),
                path: asset.path.display().to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        let exists = self
            .db
            .table_exists(asset.schema(), asset.table())
            .map_err(|e| db_error(asset, e))?;
        if !exists {
            return Err(MaterializeError::TableNotCreated {
                path: asset.path.display().to_string(),
                table: asset.name.to_string(),
            });
        }
        Ok(())
    }
}

fn db_error(asset: &Asset, source: DbError) -> MaterializeError {
    MaterializeError::Database {
        asset: asset.name.to_string(),
        path: asset.path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "execute_test.rs"]
mod tests;
