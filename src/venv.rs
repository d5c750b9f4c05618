use {
    crate::platform::Platform,
    anyhow::{Context, Result, bail},
    std::{
        path::{Path, PathBuf},
        process::Command,
    },
};

/// Absolute path of the environment's own interpreter.
pub fn interpreter(env_dir: &Path, platform: Platform) -> PathBuf {
    env_dir
        .join(platform.scripts_dir())
        .join(platform.exe("python"))
}

/// Create the virtual environment if its interpreter is not already present.
/// Safe to call on every run; an existing usable environment is left
/// untouched. A directory that exists but holds no interpreter is reported
/// rather than overwritten.
pub fn ensure(env_dir: &Path, platform: Platform, python: Option<&Path>) -> Result<()> {
    if interpreter(env_dir, platform).exists() {
        return Ok(());
    }

    if env_dir.exists() {
        bail!(
            "{} exists but contains no {} interpreter",
            env_dir.display(),
            platform.scripts_dir()
        );
    }

    let python = base_python(python)?;
    log::debug!("running {} -m venv {}", python.display(), env_dir.display());
    let output = Command::new(&python)
        .arg("-m")
        .arg("venv")
        .arg(env_dir)
        .output()
        .with_context(|| format!("unable to run {}", python.display()))?;

    if !output.status.success() {
        bail!(
            "virtual environment creation failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(())
}

/// Upgrade `pip` itself, then install the requested packages, suppressing
/// normal installer output. Reinstalling an already-satisfied package is a
/// no-op for `pip`, so this too is safe on every run.
pub fn install(env_dir: &Path, platform: Platform, packages: &[String]) -> Result<()> {
    let python = interpreter(env_dir, platform);

    pip(&python, &["install", "--quiet", "--upgrade", "pip"]).context("unable to upgrade pip")?;

    let mut args = vec!["install", "--quiet"];
    args.extend(packages.iter().map(String::as_str));
    pip(&python, &args).with_context(|| format!("unable to install {}", packages.join(", ")))
}

fn pip(python: &Path, args: &[&str]) -> Result<()> {
    log::debug!("running {} -m pip {}", python.display(), args.join(" "));
    let output = Command::new(python)
        .arg("-m")
        .arg("pip")
        .args(args)
        .output()
        .with_context(|| format!("unable to run {}", python.display()))?;

    if !output.status.success() {
        bail!("pip failed: {}", String::from_utf8_lossy(&output.stderr));
    }

    Ok(())
}

/// Pick the interpreter used to create the environment: an explicit override
/// is trusted as-is, otherwise `python3` then `python` are probed on `PATH`.
pub fn base_python(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(python) = explicit {
        return Ok(python.to_path_buf());
    }

    for name in ["python3", "python"] {
        if let Ok(output) = Command::new(name).arg("--version").output() {
            if output.status.success() {
                return Ok(PathBuf::from(name));
            }
        }
    }

    bail!("no python3 or python interpreter found in $PATH")
}
