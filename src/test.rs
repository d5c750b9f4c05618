#![deny(warnings)]

use {
    crate::{platform::Platform, venv},
    anyhow::Result,
    std::{fs, path::Path},
};

#[test]
fn platform_identifiers() -> Result<()> {
    assert_eq!(Platform::from_identifier("linux-gnu")?, Platform::Unix);
    assert_eq!(Platform::from_identifier("darwin23")?, Platform::Unix);
    assert_eq!(Platform::from_identifier("freebsd14.1")?, Platform::Unix);
    assert_eq!(Platform::from_identifier("solaris2.11")?, Platform::Unix);
    assert_eq!(Platform::from_identifier("msys")?, Platform::Windows);
    assert_eq!(Platform::from_identifier("cygwin")?, Platform::Windows);
    assert_eq!(Platform::from_identifier("win32")?, Platform::Windows);
    Ok(())
}

#[test]
fn unknown_platform_identifier_is_an_error() {
    let error = Platform::from_identifier("plan9").unwrap_err();
    assert!(error.to_string().contains("plan9"));
}

#[test]
fn environment_layout() {
    let env_dir = Path::new(".venv");
    assert_eq!(
        venv::interpreter(env_dir, Platform::Unix),
        env_dir.join("bin").join("python")
    );
    assert_eq!(
        venv::interpreter(env_dir, Platform::Windows),
        env_dir.join("Scripts").join("python.exe")
    );
}

#[test]
fn existing_environment_is_left_alone() -> Result<()> {
    let tempdir = tempfile::tempdir()?;
    let env_dir = tempdir.path().join(".venv");
    fs::create_dir_all(env_dir.join("bin"))?;
    fs::write(env_dir.join("bin").join("python"), "")?;

    // The override points nowhere; ensure must not try to run it when the
    // environment is already usable.
    venv::ensure(
        &env_dir,
        Platform::Unix,
        Some(Path::new("/nonexistent/python")),
    )
}

#[test]
fn unusable_environment_is_an_error() -> Result<()> {
    let tempdir = tempfile::tempdir()?;
    let env_dir = tempdir.path().join(".venv");
    fs::create_dir_all(&env_dir)?;

    let error = venv::ensure(
        &env_dir,
        Platform::Unix,
        Some(Path::new("/nonexistent/python")),
    )
    .unwrap_err();
    assert!(error.to_string().contains("interpreter"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn install_upgrades_pip_then_installs_quietly() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let tempdir = tempfile::tempdir()?;
    let env_dir = tempdir.path().join(".venv");
    fs::create_dir_all(env_dir.join("bin"))?;

    // The environment's interpreter records every invocation so the pip
    // argument construction can be checked exactly.
    let interpreter = env_dir.join("bin").join("python");
    fs::write(
        &interpreter,
        "#!/bin/sh\necho \"$@\" >>\"$(dirname \"$0\")/args.log\"\n",
    )?;
    fs::set_permissions(&interpreter, fs::Permissions::from_mode(0o755))?;

    venv::install(
        &env_dir,
        Platform::Unix,
        &["flask".to_owned(), "gunicorn".to_owned()],
    )?;

    let log = fs::read_to_string(env_dir.join("bin").join("args.log"))?;
    assert_eq!(
        log.lines().collect::<Vec<_>>(),
        [
            "-m pip install --quiet --upgrade pip",
            "-m pip install --quiet flask gunicorn",
        ]
    );
    Ok(())
}

#[test]
fn explicit_interpreter_override_is_trusted() -> Result<()> {
    assert_eq!(
        venv::base_python(Some(Path::new("/opt/python3.12/bin/python")))?,
        Path::new("/opt/python3.12/bin/python")
    );
    Ok(())
}
