//! This module implements the data structures included in scripts.

pub(crate) mod entries;
pub(crate) mod errors;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tecmacro::prelude::*;

use crate::script::entries::*;
use crate::script::errors::ScriptError;

/// A tecmagic script. Contains Tecplot's whereabouts, polyline sets and jobs.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Script {
  /// How to run Tecplot.
  pub(crate) tecplot: TecplotConfig,
  /// Named polyline sets.
  pub(crate) polylines: BTreeMap<String, PolylineSet>,
  /// Alter-data jobs.
  #[serde(alias = "alters")]
  pub(crate) alter: Vec<AlterEntry>,
  /// Extraction jobs.
  #[serde(alias = "extractions")]
  pub(crate) extraction: Vec<ExtractionEntry>,
  /// Picture jobs.
  #[serde(alias = "pictures")]
  pub(crate) picture: Vec<PictureEntry>,
}

/// A job with its name.
pub(crate) struct NamedJob {
  /// The name.
  pub(crate) name: String,
  /// The job.
  pub(crate) job: Box<dyn MacroJob>,
}

/// Gives unnamed jobs a name from their kind and position.
fn job_name(name: Option<String>, kind: &str, index: usize) -> String {
  return name.unwrap_or_else(|| format!("{}_{}", kind, index + 1));
}

impl Script {
  /// Prepares a script for running: resolves polyline sets and names every
  /// job. Alter-data jobs come first since pictures may open the layouts
  /// they save, then extractions, then pictures.
  pub(crate) fn prepare(self) -> Result<ReadyScript, ScriptError> {
    let mut jobs: Vec<NamedJob> = Vec::new();
    for (i, a) in self.alter.into_iter().enumerate() {
      jobs.push(NamedJob {
        name: job_name(a.name, "alter", i),
        job: Box::new(a.job),
      });
    }
    for (i, e) in self.extraction.into_iter().enumerate() {
      let name = job_name(e.name.clone(), "extraction", i);
      jobs.push(NamedJob { name, job: Box::new(e.resolve(&self.polylines)?) });
    }
    for (i, p) in self.picture.into_iter().enumerate() {
      jobs.push(NamedJob {
        name: job_name(p.name, "picture", i),
        job: Box::new(p.job),
      });
    }
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for j in jobs.iter() {
      if !seen.insert(&j.name) {
        return Err(ScriptError::DuplicateJob(j.name.clone()));
      }
    }
    return Ok(ReadyScript { tecplot: self.tecplot, jobs });
  }
}

/// A script that is ready to run after names having been resolved.
pub(crate) struct ReadyScript {
  /// How to run Tecplot.
  pub(crate) tecplot: TecplotConfig,
  /// The jobs, in running order.
  pub(crate) jobs: Vec<NamedJob>,
}

impl ReadyScript {
  /// Picks the jobs to run. All of them if no names are given.
  pub(crate) fn select(
    &self,
    only: &[String]
  ) -> Result<Vec<&NamedJob>, ScriptError> {
    for n in only {
      if !self.jobs.iter().any(|j| &j.name == n) {
        return Err(ScriptError::JobNotFound(n.clone()));
      }
    }
    return Ok(
      self.jobs.iter()
        .filter(|j| only.is_empty() || only.contains(&j.name))
        .collect()
    );
  }

  /// Runs a single job.
  pub(crate) fn run(
    &self,
    job: &NamedJob,
    dry_run: bool
  ) -> Result<RunReport, ScriptError> {
    return Ok(run_job(&self.tecplot, job.job.as_ref(), dry_run)?);
  }
}
