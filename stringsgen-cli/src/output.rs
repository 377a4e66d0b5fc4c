//! Where generated text goes.

use std::{
    convert::Infallible,
    fmt::{Display, Formatter},
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use stringsgen::Error;
use tempfile::NamedTempFile;
use tracing::info;

/// Output destination: standard output or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Console,
    File(PathBuf),
}

/// What [`Destination::write`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Printed,
    Written,
    /// The file already held exactly this content.
    Unchanged,
}

impl Display for Destination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Console => write!(f, "console"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for Destination {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "console" | "-" => Destination::Console,
            path => Destination::File(PathBuf::from(path)),
        })
    }
}

impl Destination {
    /// Writes `content`. A file that already holds it is left untouched.
    pub fn write(&self, content: &str) -> Result<WriteOutcome, Error> {
        match self {
            Destination::Console => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
                Ok(WriteOutcome::Printed)
            }
            Destination::File(path) => {
                if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
                    info!(path = %path.display(), "output unchanged, not rewriting");
                    return Ok(WriteOutcome::Unchanged);
                }

                replace_file(path, |file| file.write_all(content.as_bytes()))?;
                info!(path = %path.display(), bytes = content.len(), "wrote output");
                Ok(WriteOutcome::Written)
            }
        }
    }
}

/// Replaces `path` with what `fill` writes. The content goes to a temporary
/// file in the same directory which is renamed over `path` only after `fill`
/// succeeded, so `path` never holds partial output.
pub fn replace_file(
    path: &Path,
    fill: impl FnOnce(&mut NamedTempFile) -> io::Result<()>,
) -> Result<(), Error> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    copy_target_permissions(file.as_file(), path)?;
    fill(&mut file)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Gives the temporary file the permissions of the file it replaces.
/// Temporary files are created owner-only.
fn copy_target_permissions(file: &fs::File, path: &Path) -> io::Result<()> {
    match fs::metadata(path) {
        Ok(metadata) => file.set_permissions(metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => set_new_file_permissions(file),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn set_new_file_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_new_file_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
