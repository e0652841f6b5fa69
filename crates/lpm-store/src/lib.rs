pub mod apply;
pub mod archive;
pub mod manifest;

pub use apply::{apply_payload, list_payload, remove_files};
pub use archive::{
    PackedArtifact, artifact_file_name, file_digest, pack_folder, read_artifact_manifest,
    unpack_artifact,
};
pub use manifest::PackageManifest;
