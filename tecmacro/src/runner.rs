//! This defines subroutines to write macros to disk and have Tecplot run them.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use subprocess::{Exec, ExitStatus};

use crate::commands::DEFAULT_INSTALL_DIR;
use crate::error::{MacroError, MacroResult};
use crate::jobs::MacroJob;

/// This is how Tecplot gets started on a macro.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RunMethod {
  /// The macro file is handed to the shell, which opens it with whatever is
  /// associated with `.mcr` files.
  Shell,
  /// An executable is run with some arguments, then the macro path.
  Executable {
    /// The Tecplot executable.
    exe: PathBuf,
    /// Arguments that go before the macro path.
    args: Vec<String>,
  },
}

/// Where Tecplot lives and how to start it. Reads from the `[tecplot]` table
/// of a script.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TecplotConfig {
  /// Installation directory, bound to `|MFBD|` in every macro.
  pub install_dir: String,
  /// The executable. If absent, macros are handed to the shell.
  pub exe: Option<PathBuf>,
  /// Arguments for the executable, before the macro path. The defaults run
  /// it in batch mode.
  pub args: Vec<String>,
}

impl Default for TecplotConfig {
  fn default() -> Self {
    return Self {
      install_dir: DEFAULT_INSTALL_DIR.to_string(),
      exe: None,
      args: vec!["-b".to_string(), "-p".to_string()],
    };
  }
}

impl TecplotConfig {
  /// The run method this configuration describes.
  pub fn method(&self) -> RunMethod {
    return match self.exe {
      Some(ref exe) => RunMethod::Executable {
        exe: exe.clone(),
        args: self.args.clone(),
      },
      None => RunMethod::Shell,
    };
  }
}

/// What happened when running a job.
#[derive(Clone, Debug)]
pub struct RunReport {
  /// Where the macro was written.
  pub macro_file: PathBuf,
  /// Exit status of Tecplot. None if it wasn't run.
  pub status: Option<ExitStatus>,
  /// Expected outputs that don't exist after the run.
  pub missing: Vec<PathBuf>,
}

impl RunReport {
  /// Whether Tecplot exited cleanly and left every expected file behind.
  pub fn ok(&self) -> bool {
    return self.status.map_or(true, |s| s.success())
      && self.missing.is_empty();
  }
}

/// Writes a macro to a file, creating its directory if needed.
pub fn write_macro<P: AsRef<Path>>(text: &str, path: P) -> MacroResult<()> {
  let path = path.as_ref();
  if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
    std::fs::create_dir_all(dir)
      .map_err(|e| MacroError::File(dir.to_path_buf(), e))?;
  }
  std::fs::write(path, text).map_err(|e| MacroError::File(path.to_path_buf(), e))?;
  debug!("Wrote {} bytes of macro to {}.", text.len(), path.display());
  return Ok(());
}

/// Runs a macro file and waits for Tecplot to finish.
pub fn execute_macro<P: AsRef<Path>>(
  method: &RunMethod,
  path: P
) -> MacroResult<ExitStatus> {
  let path = path.as_ref();
  let exec = match method {
    RunMethod::Shell => Exec::shell(format!("\"{}\"", path.display())),
    RunMethod::Executable { exe, args } => {
      Exec::cmd(exe).args(args.as_slice()).arg(path)
    },
  };
  debug!("Running {}.", exec.to_cmdline_lossy());
  return exec.join().map_err(|e| MacroError::Launch(e.to_string()));
}

/// Returns the paths that don't exist.
pub fn missing_outputs(expected: &[PathBuf]) -> Vec<PathBuf> {
  return expected.iter().filter(|p| !p.exists()).cloned().collect();
}

/// Builds a job's macro, writes it and, unless told otherwise, creates its
/// output directories, runs it and checks for its outputs. A failed run is
/// reported, not raised.
pub fn run_job(
  config: &TecplotConfig,
  job: &dyn MacroJob,
  dry_run: bool
) -> MacroResult<RunReport> {
  let text = job.build(&config.install_dir)?;
  let macro_file = job.macro_file().to_path_buf();
  write_macro(&text, &macro_file)?;
  if dry_run {
    info!("Wrote {}, not running it.", macro_file.display());
    return Ok(RunReport { macro_file, status: None, missing: Vec::new() });
  }
  for dir in job.output_dirs()? {
    std::fs::create_dir_all(&dir).map_err(|e| MacroError::File(dir.clone(), e))?;
    debug!("Output directory {} is ready.", dir.display());
  }
  info!("Running {}...", macro_file.display());
  let status = execute_macro(&config.method(), &macro_file)?;
  if !status.success() {
    warn!("Tecplot exited with {:?} on {}.", status, macro_file.display());
  }
  let missing = missing_outputs(&job.expected_outputs()?);
  for m in missing.iter() {
    warn!("Expected output {} was not produced.", m.display());
  }
  return Ok(RunReport { macro_file, status: Some(status), missing });
}
