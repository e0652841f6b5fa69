use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use lpm_utils::prune_empty_dirs;

use crate::archive::payload_files;

enum Applied {
    Created(PathBuf),
    Overwritten { dest: PathBuf, backup: PathBuf },
}

/// Copies every file under `payload` into `root`.
///
/// Files that would be overwritten are first saved under `backup_dir`. If
/// any copy fails, created files are deleted and saved ones restored before
/// the error is returned. On success the relative paths written are returned.
pub fn apply_payload(payload: &Path, root: &Path, backup_dir: &Path) -> io::Result<Vec<String>> {
    let files = payload_files(payload)?;
    let mut applied = Vec::with_capacity(files.len());

    for (src, rel) in &files {
        if let Err(e) = apply_one(src, rel, root, backup_dir, &mut applied) {
            rollback(applied, root);
            return Err(io::Error::new(e.kind(), format!("{rel}: {e}")));
        }
    }

    Ok(files.into_iter().map(|(_, rel)| rel).collect())
}

fn apply_one(
    src: &Path,
    rel: &str,
    root: &Path,
    backup_dir: &Path,
    applied: &mut Vec<Applied>,
) -> io::Result<()> {
    let dest = root.join(rel);

    if dest.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "a directory is in the way",
        ));
    }

    if dest.exists() {
        let backup = backup_dir.join(rel);
        if let Some(parent) = backup.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&dest, &backup)?;
        applied.push(Applied::Overwritten {
            dest: dest.clone(),
            backup,
        });
    } else {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        applied.push(Applied::Created(dest.clone()));
    }

    fs::copy(src, &dest)?;
    Ok(())
}

fn rollback(applied: Vec<Applied>, root: &Path) {
    for step in applied.into_iter().rev() {
        match step {
            Applied::Created(dest) => {
                let _ = fs::remove_file(&dest);
                if let Some(parent) = dest.parent() {
                    prune_empty_dirs(parent, root);
                }
            }
            Applied::Overwritten { dest, backup } => {
                let _ = fs::copy(&backup, &dest);
            }
        }
    }
}

/// Root-relative paths of the files a payload would install.
pub fn list_payload(payload: &Path) -> io::Result<Vec<String>> {
    Ok(payload_files(payload)?
        .into_iter()
        .map(|(_, rel)| rel)
        .collect())
}

/// Deletes the given root-relative files and prunes directories left empty.
/// Missing files are skipped; paths escaping `root` are ignored. A file that
/// cannot be deleted does not stop the others; those files are returned with
/// their errors.
#[must_use]
pub fn remove_files(root: &Path, files: &[String]) -> Vec<(String, io::Error)> {
    let mut failed = Vec::new();

    for rel in files {
        let rel_path = Path::new(rel);
        if rel_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            continue;
        }

        let path = root.join(rel_path);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                failed.push((rel.clone(), e));
                continue;
            }
        }
        if let Some(parent) = path.parent() {
            prune_empty_dirs(parent, root);
        }
    }

    failed
}
