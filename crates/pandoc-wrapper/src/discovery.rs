//! Locating and validating the pandoc executable.
//!
//! When no path is configured the binary is searched for on `PATH`, the same
//! way `which` does. Whatever path is used must point at an executable file;
//! nothing checks that it really is pandoc.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{PandocError, PandocResult};

/// Program name searched for when no executable is configured.
pub const DEFAULT_PROGRAM: &str = "pandoc";

/// Search the current `PATH` for `program`.
pub fn locate(program: &str) -> PandocResult<PathBuf> {
    locate_in(program, &search_path())
}

fn search_path() -> OsString {
    std::env::var_os("PATH").unwrap_or_default()
}

/// Search the directories of `search_path` (a `PATH`-style list) for an
/// executable named `program`. The first match wins.
pub fn locate_in(program: &str, search_path: &OsStr) -> PandocResult<PathBuf> {
    for dir in std::env::split_paths(search_path) {
        if dir.as_os_str().is_empty() {
            continue;
        }

        for candidate in candidates(&dir, program) {
            if is_executable(&candidate) {
                info!(path = %candidate.display(), "Found {} on PATH", program);
                return Ok(candidate);
            }
        }
    }

    debug!(program, "Program not found on PATH");
    Err(PandocError::NotFound {
        program: program.to_string(),
    })
}

#[cfg(windows)]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(format!("{program}.exe")), dir.join(program)]
}

#[cfg(not(windows))]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

/// Whether `path` is a regular file with an execute permission bit set.
///
/// Symlinks are followed. On Unix any of the owner, group or other execute
/// bits is enough, so a file only other users may run still passes here and
/// fails later at spawn time with `Io(PermissionDenied)`. On non-Unix
/// platforms any regular file counts.
pub fn is_executable(path: &Path) -> bool {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return false,
    };

    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

/// Resolve the executable to use: the explicit path if one was given and
/// is non-empty, otherwise a `PATH` lookup of [`DEFAULT_PROGRAM`].
pub fn resolve_executable(explicit: Option<&Path>) -> PandocResult<PathBuf> {
    resolve_executable_in(explicit, &search_path())
}

/// Like [`resolve_executable`], searching `search_path` instead of `PATH`.
pub fn resolve_executable_in(
    explicit: Option<&Path>,
    search_path: &OsStr,
) -> PandocResult<PathBuf> {
    let path = match explicit.filter(|p| !p.as_os_str().is_empty()) {
        Some(p) => {
            info!(path = %p.display(), "Using explicitly configured pandoc path");
            p.to_path_buf()
        }
        None => locate_in(DEFAULT_PROGRAM, search_path)?,
    };

    ensure_executable(path)
}

/// Fail with `NotExecutable` unless `path` is an executable file.
pub fn ensure_executable(path: PathBuf) -> PandocResult<PathBuf> {
    if is_executable(&path) {
        Ok(path)
    } else {
        Err(PandocError::NotExecutable { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn write_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\n").expect("write");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).expect("chmod");
        path
    }

    #[test]
    fn test_locate_in_empty_path() {
        let err = locate_in("pandoc", OsStr::new("")).expect_err("nothing to search");
        assert!(matches!(err, PandocError::NotFound { ref program } if program == "pandoc"));
    }

    #[test]
    fn test_locate_in_missing_dir() {
        let err = locate_in("pandoc", OsStr::new("/nonexistent/bin")).expect_err("not found");
        assert!(matches!(err, PandocError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_in_first_executable_wins() {
        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        write_file(first.path(), "pandoc", 0o644);
        let expected = write_file(second.path(), "pandoc", 0o755);

        let search = std::env::join_paths([first.path(), second.path()]).expect("join");
        let found = locate_in("pandoc", &search).expect("should find");
        assert_eq!(found, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable() {
        let temp = tempfile::tempdir().expect("tempdir");
        let exec = write_file(temp.path(), "exec", 0o755);
        let plain = write_file(temp.path(), "plain", 0o644);

        assert!(is_executable(&exec));
        assert!(!is_executable(&plain));
        assert!(!is_executable(temp.path()));
        assert!(!is_executable(&temp.path().join("missing")));
    }

    #[test]
    fn test_resolve_without_path_on_empty_search_path() {
        let err = resolve_executable_in(None, OsStr::new("")).expect_err("nothing to search");
        assert!(matches!(err, PandocError::NotFound { ref program } if program == DEFAULT_PROGRAM));

        let err = resolve_executable_in(Some(Path::new("")), OsStr::new("/nonexistent/bin"))
            .expect_err("empty explicit path falls back to lookup");
        assert!(matches!(err, PandocError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable_any_execute_bit() {
        let temp = tempfile::tempdir().expect("tempdir");
        let others_only = write_file(temp.path(), "others", 0o601);
        assert!(is_executable(&others_only));
    }

    #[test]
    fn test_ensure_executable_nonexistent() {
        let err = ensure_executable(PathBuf::from("/nonexistent/pandoc")).expect_err("missing");
        assert!(matches!(err, PandocError::NotExecutable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_explicit_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let exec = write_file(temp.path(), "pandoc", 0o755);
        let resolved = resolve_executable(Some(&exec)).expect("resolves");
        assert_eq!(resolved, exec);

        let plain = write_file(temp.path(), "notes.txt", 0o600);
        let err = resolve_executable(Some(&plain)).expect_err("not executable");
        assert!(matches!(err, PandocError::NotExecutable { path } if path == plain));
    }
}
