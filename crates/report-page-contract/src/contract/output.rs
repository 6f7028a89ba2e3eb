// crates/report-page-contract/src/contract/output.rs
// ============================================================================
// Module: Contract Output Root
// Description: Capability-scoped access to the artifact output directory.
// Purpose: Write and read artifacts without following symlinks.
// Dependencies: cap-std, cap-primitives
// ============================================================================

//! ## Overview
//! The output directory is opened once from an ambient anchor and walked one
//! component at a time with no-follow semantics. Every later read and write
//! is relative to that handle, so a symlink planted anywhere under the
//! output tree surfaces as [`ContractError::OutputPath`] instead of
//! redirecting IO.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use cap_primitives::fs::FollowSymlinks;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use cap_std::fs::OpenOptions;

use crate::ContractError;

/// Attempts made to claim a fresh temporary file name.
const TEMP_NAME_ATTEMPTS: u32 = 64;

/// Handle to the artifact output directory.
pub(super) struct OutputRoot {
    /// Capability handle for the directory.
    dir: Dir,
    /// Path the handle was opened from, for error reporting.
    display_path: PathBuf,
}

impl OutputRoot {
    /// Opens `path`, creating missing components when `create` is set.
    pub(super) fn open(path: &Path, create: bool) -> Result<Self, ContractError> {
        if path.as_os_str().is_empty() {
            return Err(ContractError::OutputPath(path.to_path_buf()));
        }
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|err| ContractError::Io(err.to_string()))?
                .join(path)
        };
        let mut anchor = PathBuf::new();
        let mut children: Vec<OsString> = Vec::new();
        for component in absolute.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => anchor.push(component.as_os_str()),
                Component::CurDir => {}
                Component::Normal(name) => children.push(name.to_os_string()),
                Component::ParentDir => return Err(ContractError::OutputPath(absolute)),
            }
        }
        if anchor.as_os_str().is_empty() || children.is_empty() {
            return Err(ContractError::OutputPath(absolute));
        }
        let mut dir = Dir::open_ambient_dir(&anchor, ambient_authority())
            .map_err(|err| ContractError::Io(err.to_string()))?;
        for child in &children {
            dir = child_dir(&dir, Path::new(child), create)
                .map_err(|err| map_open_error(&err, path))?;
        }
        Ok(Self {
            dir,
            display_path: path.to_path_buf(),
        })
    }

    /// Atomically replaces the file at relative `artifact_path`.
    pub(super) fn write(&self, artifact_path: &str, bytes: &[u8]) -> Result<(), ContractError> {
        let relative = relative_path(artifact_path)?;
        let (parent, file_name) = self.parent_of(&relative, true)?;
        for attempt in 0 .. TEMP_NAME_ATTEMPTS {
            let mut temp_name = OsString::from(".tmp-");
            temp_name.push(&file_name);
            temp_name.push(format!(".{}.{attempt}", std::process::id()));
            let mut options = OpenOptions::new();
            options.write(true).create_new(true);
            options._cap_fs_ext_follow(FollowSymlinks::No);
            match parent.open_with(&temp_name, &options) {
                Ok(mut file) => {
                    let written = file
                        .write_all(bytes)
                        .and_then(|()| file.sync_all())
                        .and_then(|()| parent.rename(&temp_name, &parent, &file_name));
                    if let Err(err) = written {
                        let _ = parent.remove_file(&temp_name);
                        return Err(ContractError::Io(err.to_string()));
                    }
                    return Ok(());
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
                Err(err) => return Err(map_open_error(&err, &relative)),
            }
        }
        Err(ContractError::Generation(format!(
            "unable to allocate temporary file for {artifact_path}"
        )))
    }

    /// Reads `artifact_path`, failing when its size differs from `expected_len`.
    pub(super) fn read_exact_len(
        &self,
        artifact_path: &str,
        expected_len: usize,
    ) -> Result<Vec<u8>, ContractError> {
        let relative = relative_path(artifact_path)?;
        let (parent, file_name) = self.parent_of(&relative, false)?;
        let mut options = OpenOptions::new();
        options.read(true);
        options._cap_fs_ext_follow(FollowSymlinks::No);
        let mut file =
            parent.open_with(&file_name, &options).map_err(|err| map_open_error(&err, &relative))?;
        let metadata = file.metadata().map_err(|err| ContractError::Io(err.to_string()))?;
        if !metadata.is_file() {
            return Err(ContractError::OutputPath(relative));
        }
        let expected_len = u64::try_from(expected_len).map_err(|_| {
            ContractError::Generation(String::from("expected length exceeds addressable size"))
        })?;
        if metadata.len() != expected_len {
            return Err(ContractError::Generation(format!(
                "artifact size mismatch: {artifact_path}"
            )));
        }
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|err| ContractError::Io(err.to_string()))?;
        Ok(bytes)
    }

    /// Lists every regular file below the root as a `/`-separated path.
    pub(super) fn list_files(&self) -> Result<BTreeSet<String>, ContractError> {
        let mut files = BTreeSet::new();
        walk(&self.dir, Path::new(""), &mut files)?;
        Ok(files)
    }

    /// Opens the parent directory of `relative` and returns it with the file name.
    fn parent_of(&self, relative: &Path, create: bool) -> Result<(Dir, OsString), ContractError> {
        let mut components: Vec<&std::ffi::OsStr> = Vec::new();
        for component in relative.components() {
            let Component::Normal(name) = component else {
                return Err(ContractError::OutputPath(relative.to_path_buf()));
            };
            components.push(name);
        }
        let Some((file_name, parents)) = components.split_last() else {
            return Err(ContractError::OutputPath(relative.to_path_buf()));
        };
        let mut current =
            self.dir.try_clone().map_err(|err| ContractError::Io(err.to_string()))?;
        for name in parents {
            current = child_dir(&current, Path::new(name), create)
                .map_err(|err| map_open_error(&err, &self.display_path.join(relative)))?;
        }
        Ok((current, (*file_name).to_os_string()))
    }
}

/// Opens (or creates) a child directory without following symlinks.
fn child_dir(parent: &Dir, name: &Path, create: bool) -> std::io::Result<Dir> {
    let open = |parent: &Dir| -> std::io::Result<Dir> {
        let mut options = OpenOptions::new();
        options.read(true);
        options._cap_fs_ext_follow(FollowSymlinks::No);
        let file = parent.open_with(name, &options)?;
        if !file.metadata()?.is_dir() {
            return Err(std::io::Error::new(ErrorKind::InvalidInput, "not a directory"));
        }
        Ok(Dir::from_std_file(file.into_std()))
    };
    match open(parent) {
        Err(err) if err.kind() == ErrorKind::NotFound && create => {
            parent.create_dir(name)?;
            open(parent)
        }
        result => result,
    }
}

/// Recursively records files under `dir`; symlinks are rejected.
fn walk(dir: &Dir, prefix: &Path, files: &mut BTreeSet<String>) -> Result<(), ContractError> {
    for entry in dir.entries().map_err(|err| ContractError::Io(err.to_string()))? {
        let entry = entry.map_err(|err| ContractError::Io(err.to_string()))?;
        let relative = prefix.join(entry.file_name());
        let file_type = entry.file_type().map_err(|err| ContractError::Io(err.to_string()))?;
        if file_type.is_symlink() {
            return Err(ContractError::OutputPath(relative));
        }
        if file_type.is_dir() {
            let child = entry.open_dir().map_err(|err| ContractError::Io(err.to_string()))?;
            walk(&child, &relative, files)?;
        } else if file_type.is_file() {
            let text = relative.to_str().ok_or_else(|| ContractError::OutputPath(relative.clone()))?;
            files.insert(text.replace('\\', "/"));
        }
    }
    Ok(())
}

/// Validates an artifact path as relative and traversal-free.
fn relative_path(path: &str) -> Result<PathBuf, ContractError> {
    if path.trim().is_empty() {
        return Err(ContractError::Generation(String::from("artifact path is empty")));
    }
    let candidate = PathBuf::from(path);
    let unsafe_component = candidate.components().any(|component| {
        matches!(component, Component::ParentDir | Component::RootDir | Component::Prefix(_))
    });
    if candidate.is_absolute() || unsafe_component {
        return Err(ContractError::Generation(format!("artifact path is not relative: {path}")));
    }
    Ok(candidate)
}

/// Maps open failures caused by the path itself to [`ContractError::OutputPath`].
fn map_open_error(err: &std::io::Error, path: &Path) -> ContractError {
    let path_error = matches!(
        err.kind(),
        ErrorKind::NotFound
            | ErrorKind::InvalidInput
            | ErrorKind::PermissionDenied
            | ErrorKind::NotADirectory
            | ErrorKind::Unsupported
    );
    // ELOOP on unix, reparse-point errors on windows.
    let loop_error = if cfg!(unix) {
        err.raw_os_error() == Some(40)
    } else {
        matches!(err.raw_os_error(), Some(681 | 1920))
    };
    if path_error || loop_error {
        ContractError::OutputPath(path.to_path_buf())
    } else {
        ContractError::Io(err.to_string())
    }
}
