use std::fs;
use std::path::{Path, PathBuf};

use lpm_core::{BuildManager, Context, InstallManager, InstallOutcome, RemoveManager, RemoveOutcome};
use lpm_local::LocalRegistry;
use lpm_registry::{Catalog, CatalogEntry, IndexCache};
use lpm_settings::{Config, Folders};
use tempfile::TempDir;

fn context(dir: &Path) -> Context {
    let folders = Folders::from_host(&dir.join("save"), &dir.join("downloads"));
    folders.create_all().unwrap();
    Context::new(
        Config {
            debug_mode: true,
            ..Config::default()
        },
        folders,
    )
}

fn write_source(dir: &Path) -> PathBuf {
    let src = dir.join("greeter");
    fs::create_dir_all(src.join("files/share/greeter")).unwrap();
    fs::create_dir_all(src.join("files/bin")).unwrap();
    fs::write(
        src.join("manifest.json"),
        r#"{"name":"greeter","version":"0.3.1","description":"Says hello"}"#,
    )
    .unwrap();
    fs::write(src.join("files/bin/greeter"), "#!/bin/sh\necho hi\n").unwrap();
    fs::write(src.join("files/share/greeter/motd"), "welcome").unwrap();
    src
}

fn snapshot(ctx: &Context) -> (Vec<(String, String)>, String, Vec<String>, String) {
    let registry = LocalRegistry::load(&ctx.folders.installed_file()).unwrap();
    let entry = registry.get("greeter").unwrap().clone();
    let contents = entry
        .files
        .iter()
        .map(|f| {
            (
                f.clone(),
                fs::read_to_string(ctx.folders.root.join(f)).unwrap(),
            )
        })
        .collect();
    (contents, entry.version, entry.files, entry.integrity)
}

#[test]
fn build_then_install_local_matches_catalog_install() {
    let work = TempDir::new().unwrap();
    let src = write_source(work.path());

    let builder_dir = TempDir::new().unwrap();
    let builder = context(builder_dir.path());
    let artifact = BuildManager::new(&builder).build_folder(&src).unwrap();

    let local_dir = TempDir::new().unwrap();
    let local = context(local_dir.path());
    let outcome = InstallManager::new(&local).install_local(&artifact).unwrap();
    assert_eq!(outcome, InstallOutcome::Installed { version: "0.3.1".into() });

    let catalog_dir = TempDir::new().unwrap();
    let from_catalog = context(catalog_dir.path());
    IndexCache::empty(&from_catalog.folders.index_file())
        .replace(Catalog::from_entries([CatalogEntry {
            name: "greeter".into(),
            version: "0.3.1".into(),
            url: artifact.display().to_string(),
            description: None,
            dependencies: Vec::new(),
        }]))
        .unwrap();
    InstallManager::new(&from_catalog).install("greeter").unwrap();

    assert_eq!(snapshot(&local), snapshot(&from_catalog));
    assert!(artifact.exists());
}

#[test]
fn identical_sources_build_identical_artifacts() {
    let work = TempDir::new().unwrap();
    let src = write_source(work.path());

    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    let first = BuildManager::new(&context(first_dir.path()))
        .build_folder(&src)
        .unwrap();
    let second = BuildManager::new(&context(second_dir.path()))
        .build_folder(&src)
        .unwrap();

    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn install_then_remove_leaves_root_clean() {
    let work = TempDir::new().unwrap();
    let src = write_source(work.path());
    let sandbox = TempDir::new().unwrap();
    let ctx = context(sandbox.path());
    let artifact = BuildManager::new(&ctx).build_folder(&src).unwrap();

    InstallManager::new(&ctx).install_local(&artifact).unwrap();
    assert!(ctx.folders.root.join("share/greeter/motd").exists());

    let outcome = RemoveManager::new(&ctx).remove("greeter").unwrap();

    assert_eq!(outcome, RemoveOutcome::Removed { version: "0.3.1".into() });
    assert!(!ctx.folders.root.join("share/greeter").exists());
    assert!(!ctx.folders.root.join("bin/greeter").exists());
    assert!(
        LocalRegistry::load(&ctx.folders.installed_file())
            .unwrap()
            .list_installed()
            .is_empty()
    );
}
