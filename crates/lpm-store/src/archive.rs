use flate2::Compression;
use flate2::read::GzDecoder;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use lpm_constants::{MANIFEST_FILE, PACKAGE_EXTENSION, PAYLOAD_DIR};
use lpm_utils::{ensure_dir_exists, staging_path};

use crate::manifest::PackageManifest;

#[derive(Debug, Clone)]
pub struct PackedArtifact {
    pub path: PathBuf,
    pub manifest: PackageManifest,
    pub sha256: String,
    pub file_count: usize,
}

#[must_use]
pub fn artifact_file_name(manifest: &PackageManifest) -> String {
    format!(
        "{}-{}.{PACKAGE_EXTENSION}",
        manifest.name, manifest.version
    )
}

/// Packs `source` (a folder with `manifest.json` and `files/`) into
/// `out_dir`. Entries are sorted and carry no timestamps or owners, so the
/// same input always yields the same bytes.
pub fn pack_folder(source: &Path, out_dir: &Path) -> io::Result<PackedArtifact> {
    if !source.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", source.display()),
        ));
    }

    let manifest = PackageManifest::read(source)?;

    let payload = source.join(PAYLOAD_DIR);
    if !payload.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no '{PAYLOAD_DIR}' directory", source.display()),
        ));
    }
    let files = payload_files(&payload)?;

    ensure_dir_exists(out_dir)?;
    let out = out_dir.join(artifact_file_name(&manifest));
    let tmp = staging_path(&out);

    if let Err(e) = write_archive(&tmp, &source.join(MANIFEST_FILE), &files) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, &out)?;

    let sha256 = file_digest(&out)?;
    Ok(PackedArtifact {
        path: out,
        manifest,
        sha256,
        file_count: files.len(),
    })
}

fn write_archive(dest: &Path, manifest: &Path, files: &[(PathBuf, String)]) -> io::Result<()> {
    let file = File::create(dest)?;
    let encoder = flate2::GzBuilder::new()
        .mtime(0)
        .write(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    append_file(&mut builder, manifest, MANIFEST_FILE)?;
    append_payload_dir(&mut builder)?;
    for (path, rel) in files {
        append_file(&mut builder, path, &format!("{PAYLOAD_DIR}/{rel}"))?;
    }

    let encoder = builder.into_inner()?;
    let mut file = encoder.finish()?;
    file.flush()?;
    file.sync_all()
}

fn append_file<W: Write>(builder: &mut tar::Builder<W>, path: &Path, name: &str) -> io::Result<()> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;

    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Regular);
    header.set_size(metadata.len());
    header.set_mode(normalized_mode(&metadata));
    header.set_mtime(0);
    header.set_uid(0);
    header.set_gid(0);

    builder.append_data(&mut header, name, file)
}

// Keeps `files/` present in packages that ship no files.
fn append_payload_dir<W: Write>(builder: &mut tar::Builder<W>) -> io::Result<()> {
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Directory);
    header.set_size(0);
    header.set_mode(0o755);
    header.set_mtime(0);
    header.set_uid(0);
    header.set_gid(0);

    builder.append_data(&mut header, format!("{PAYLOAD_DIR}/"), io::empty())
}

#[cfg(unix)]
fn normalized_mode(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    if metadata.permissions().mode() & 0o111 == 0 {
        0o644
    } else {
        0o755
    }
}

#[cfg(not(unix))]
fn normalized_mode(_metadata: &fs::Metadata) -> u32 {
    0o644
}

/// Unpacks an artifact into `staging` and returns its manifest.
pub fn unpack_artifact(artifact: &Path, staging: &Path) -> io::Result<PackageManifest> {
    let file = File::open(artifact)?;
    let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    archive.set_preserve_permissions(true);
    archive.unpack(staging)?;

    PackageManifest::read(staging)
}

/// Reads the manifest of an artifact without unpacking its payload.
pub fn read_artifact_manifest(artifact: &Path) -> io::Result<PackageManifest> {
    let file = File::open(artifact)?;
    let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));

    for entry in archive.entries()? {
        let mut entry = entry?;
        if entry.path()?.as_os_str() == MANIFEST_FILE {
            let mut content = String::new();
            io::Read::read_to_string(&mut entry, &mut content)?;
            return PackageManifest::from_json(&content);
        }
    }

    Err(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{} contains no {MANIFEST_FILE}", artifact.display()),
    ))
}

pub fn file_digest(path: &Path) -> io::Result<String> {
    let mut file = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Regular files below `dir`, paired with their `/`-separated relative path,
/// sorted by that path.
pub(crate) fn payload_files(dir: &Path) -> io::Result<Vec<(PathBuf, String)>> {
    let content = fs_extra::dir::get_dir_content(dir).map_err(io::Error::other)?;

    let mut files = content
        .files
        .into_iter()
        .map(PathBuf::from)
        .map(|path| relative_key(dir, &path).map(|rel| (path, rel)))
        .collect::<io::Result<Vec<_>>>()?;
    files.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(files)
}

fn relative_key(base: &Path, path: &Path) -> io::Result<String> {
    let rel = path.strip_prefix(base).map_err(io::Error::other)?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_package(dir: &Path) -> PathBuf {
        let src = dir.join("hello-src");
        fs::create_dir_all(src.join("files/bin")).unwrap();
        fs::create_dir_all(src.join("files/share/hello")).unwrap();
        fs::write(
            src.join(MANIFEST_FILE),
            r#"{"name":"hello","version":"1.0"}"#,
        )
        .unwrap();
        fs::write(src.join("files/bin/hello"), "#!/bin/sh\necho hello\n").unwrap();
        fs::write(src.join("files/share/hello/README"), "hi").unwrap();
        src
    }

    #[test]
    fn test_pack_then_unpack() {
        let dir = tempfile::tempdir().unwrap();
        let src = sample_package(dir.path());

        let packed = pack_folder(&src, &dir.path().join("out")).unwrap();
        assert_eq!(packed.file_count, 2);
        assert!(packed.path.ends_with("hello-1.0.lpkg"));

        let staging = dir.path().join("staging");
        let manifest = unpack_artifact(&packed.path, &staging).unwrap();
        assert_eq!(manifest.name, "hello");
        assert_eq!(
            fs::read_to_string(staging.join("files/share/hello/README")).unwrap(),
            "hi"
        );
    }

    #[test]
    fn test_read_manifest_without_unpacking() {
        let dir = tempfile::tempdir().unwrap();
        let src = sample_package(dir.path());
        let packed = pack_folder(&src, dir.path()).unwrap();

        let manifest = read_artifact_manifest(&packed.path).unwrap();
        assert_eq!(manifest, packed.manifest);
    }

    #[test]
    fn test_pack_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let src = sample_package(dir.path());

        let first = pack_folder(&src, &dir.path().join("a")).unwrap();
        // touching the sources must not change the archive
        fs::write(src.join("files/share/hello/README"), "hi").unwrap();
        let second = pack_folder(&src, &dir.path().join("b")).unwrap();

        assert_eq!(first.sha256, second.sha256);
    }

    #[test]
    fn test_pack_requires_payload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("pkg");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join(MANIFEST_FILE), r#"{"name":"x","version":"1"}"#).unwrap();

        let err = pack_folder(&src, dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!dir.path().join("x-1.lpkg").exists());
    }

    #[test]
    fn test_unpack_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.lpkg");
        fs::write(&bogus, "definitely not gzip").unwrap();
        assert!(unpack_artifact(&bogus, &dir.path().join("staging")).is_err());
    }

    #[test]
    fn test_payload_files_sorted_relative() {
        let dir = tempfile::tempdir().unwrap();
        let src = sample_package(dir.path());
        let rels: Vec<String> = payload_files(&src.join(PAYLOAD_DIR))
            .unwrap()
            .into_iter()
            .map(|(_, rel)| rel)
            .collect();
        assert_eq!(rels, vec!["bin/hello", "share/hello/README"]);
    }
}
