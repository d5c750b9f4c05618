use {
    anyhow::{Result, bail},
    std::env,
};

/// Which virtual-environment layout convention applies: executables under
/// `bin/` on Unix-like systems, under `Scripts/` (with an `.exe` suffix) on
/// Windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    /// Honor an `$OSTYPE`-style identifier when one is set, otherwise use
    /// the compile-time target family.
    pub fn detect() -> Result<Self> {
        match env::var("OSTYPE") {
            Ok(id) if !id.is_empty() => Self::from_identifier(&id),
            _ => Ok(Self::native()),
        }
    }

    /// Parse an identifier such as `linux-gnu`, `darwin23`, or `msys`. An
    /// identifier that matches neither family is an explicit error rather
    /// than a silent guess.
    pub fn from_identifier(id: &str) -> Result<Self> {
        let lower = id.to_ascii_lowercase();
        if lower.starts_with("linux")
            || lower.starts_with("darwin")
            || lower.starts_with("solaris")
            || lower.contains("bsd")
        {
            Ok(Self::Unix)
        } else if lower.starts_with("msys")
            || lower.starts_with("cygwin")
            || lower.starts_with("win")
        {
            Ok(Self::Windows)
        } else {
            bail!("unrecognized platform identifier {id:?}")
        }
    }

    fn native() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Name of the directory inside a virtual environment that holds its
    /// executables.
    pub fn scripts_dir(self) -> &'static str {
        match self {
            Self::Unix => "bin",
            Self::Windows => "Scripts",
        }
    }

    pub fn exe(self, name: &str) -> String {
        match self {
            Self::Unix => name.to_string(),
            Self::Windows => format!("{name}.exe"),
        }
    }
}
