#![deny(warnings)]

use {
    anyhow::{Context, Result, anyhow, bail},
    platform::Platform,
    std::{
        env,
        ffi::OsString,
        iter,
        path::{Path, PathBuf},
        process::{self, ExitStatus},
    },
};

pub mod command;
pub mod platform;
#[cfg(test)]
mod test;
mod venv;

/// Provision the runtime environment for a Python application and hand off
/// to its entry point, blocking until it exits.
///
/// `app_dir` defaults to the directory containing the running executable and
/// becomes the working directory, so relative paths resolve the same way no
/// matter where the caller invoked us from. Setup is fail-fast: the first
/// step that fails aborts the whole run, and nothing is retried or cleaned
/// up.
pub fn bootstrap(
    app_dir: Option<&Path>,
    env_name: &str,
    entry_point: &Path,
    requirements: &[String],
    python: Option<&Path>,
    quiet: bool,
) -> Result<ExitStatus> {
    let app_dir = match app_dir {
        Some(dir) => dir
            .canonicalize()
            .with_context(|| format!("unable to resolve app directory {}", dir.display()))?,
        None => executable_dir()?,
    };
    env::set_current_dir(&app_dir)
        .with_context(|| format!("unable to enter {}", app_dir.display()))?;

    let platform = Platform::detect()?;
    let env_dir = app_dir.join(env_name);

    if !quiet {
        println!("Preparing environment in {}", env_dir.display());
    }
    venv::ensure(&env_dir, platform, python)?;

    if !quiet {
        println!("Installing {}", requirements.join(", "));
    }
    venv::install(&env_dir, platform, requirements)?;

    if !entry_point.exists() {
        bail!(
            "entry point {} not found in {}",
            entry_point.display(),
            app_dir.display()
        );
    }

    if !quiet {
        println!("Starting {}", entry_point.display());
    }
    let status = process::Command::new(venv::interpreter(&env_dir, platform))
        .arg(entry_point)
        .env("VIRTUAL_ENV", &env_dir)
        .env("PATH", activated_path(&env_dir, platform)?)
        .status()
        .with_context(|| format!("unable to launch {}", entry_point.display()))?;

    if !quiet {
        println!("{} exited ({status})", entry_point.display());
    }

    Ok(status)
}

/// The directory containing the running executable, the analogue of a shell
/// script resolving its own location before doing anything else.
fn executable_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("unable to determine executable path")?;
    Ok(exe
        .parent()
        .ok_or_else(|| anyhow!("executable {} has no parent directory", exe.display()))?
        .to_path_buf())
}

/// `PATH` with the environment's scripts directory prepended, which is all
/// an activate script does that matters to a child process.
fn activated_path(env_dir: &Path, platform: Platform) -> Result<OsString> {
    let scripts = env_dir.join(platform.scripts_dir());
    match env::var_os("PATH") {
        Some(path) => env::join_paths(iter::once(scripts).chain(env::split_paths(&path)))
            .context("unable to rebuild PATH"),
        None => Ok(scripts.into_os_string()),
    }
}
