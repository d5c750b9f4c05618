use {
    anyhow::Result,
    clap::Parser as _,
    std::{ffi::OsString, path::PathBuf, process},
};

/// A utility to provision a Python virtual environment and launch an app
#[derive(clap::Parser, Debug)]
#[command(author, version, about)]
pub struct Options {
    /// Directory containing the application.
    ///
    /// Defaults to the directory containing this executable, so a bare
    /// invocation next to the app behaves like a launcher script.
    #[arg(short = 'a', long)]
    pub app_dir: Option<PathBuf>,

    /// Name of the virtual-environment directory, created alongside the app
    /// if absent
    #[arg(long, default_value = ".venv")]
    pub venv: String,

    /// Application entry point, relative to the app directory
    #[arg(short = 'e', long, default_value = "app.py")]
    pub entry_point: PathBuf,

    /// Package to install into the environment (may be repeated)
    #[arg(short = 'r', long = "requirement", default_value = "flask")]
    pub requirements: Vec<String>,

    /// Interpreter used to create the environment (default: `python3` or
    /// `python` found in `$PATH`)
    #[arg(long)]
    pub python: Option<PathBuf>,

    /// Disable non-error output
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

pub fn run<T: Into<OsString> + Clone, I: IntoIterator<Item = T>>(args: I) -> Result<()> {
    let options = Options::parse_from(args);

    let status = crate::bootstrap(
        options.app_dir.as_deref(),
        &options.venv,
        &options.entry_point,
        &options.requirements,
        options.python.as_deref(),
        options.quiet,
    )?;

    if !status.success() {
        process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}
