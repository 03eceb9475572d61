//! Integration tests for the packaging pipeline stages.
//!
//! Bundler-level end-to-end runs need PyInstaller on the host, so these
//! tests exercise each stage against real filesystem fixtures instead: a
//! generated source raster for the icon stage and hand-built `.app` trees
//! for injection and finalization.

use chat_packager::pipeline::{Bundle, finalize, icons, metadata};
use chat_packager::settings::UiMode;
use chat_packager::{PackagerError, version};
use std::path::Path;

/// Write a plausible source icon: a 512x512 solid-color PNG.
fn write_source_icon(path: &Path) {
    let img = image::RgbaImage::from_pixel(512, 512, image::Rgba([40, 90, 200, 255]));
    img.save(path).unwrap();
}

/// Build a minimal `.app` tree with a manifest carrying identity fields.
fn write_fake_bundle(root: &Path) -> Bundle {
    let contents = root.join("Contents");
    std::fs::create_dir_all(contents.join("MacOS")).unwrap();

    let mut dict = plist::Dictionary::new();
    dict.insert(
        "CFBundleIdentifier".to_string(),
        plist::Value::String("com.intranet.chat.client".to_string()),
    );
    dict.insert(
        "CFBundleExecutable".to_string(),
        plist::Value::String("IntranetChat".to_string()),
    );
    plist::Value::Dictionary(dict)
        .to_file_xml(contents.join("Info.plist"))
        .unwrap();

    Bundle::new(root.to_path_buf())
}

fn manifest_dict(bundle: &Bundle) -> plist::Dictionary {
    plist::Value::from_file(bundle.manifest_path())
        .unwrap()
        .into_dictionary()
        .unwrap()
}

#[tokio::test]
async fn staging_produces_twelve_rasters() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("client.png");
    write_source_icon(&source);

    let staging = dir.path().join("IntranetChat.iconset");
    icons::stage_iconset(&source, &staging).await.unwrap();

    let staged: Vec<_> = std::fs::read_dir(&staging).unwrap().collect();
    assert_eq!(staged.len(), 12);
    assert!(icons::verify_complete(&staging).is_ok());

    // The 2x entry of the largest base size reaches 1024 pixels.
    let biggest = image::open(staging.join("icon_512x512@2x.png")).unwrap();
    assert_eq!(biggest.width(), 1024);
}

#[tokio::test]
async fn staging_is_reset_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("client.png");
    write_source_icon(&source);

    let staging = dir.path().join("IntranetChat.iconset");
    icons::stage_iconset(&source, &staging).await.unwrap();

    // A stale raster from a previous source must not survive a rerun.
    let stale = staging.join("icon_9999x9999.png");
    std::fs::write(&stale, b"stale").unwrap();
    icons::stage_iconset(&source, &staging).await.unwrap();

    assert!(!stale.exists());
    assert_eq!(std::fs::read_dir(&staging).unwrap().count(), 12);
}

#[tokio::test]
async fn missing_icon_source_fails_without_writes() {
    let dir = tempfile::tempdir().unwrap();
    let staging = dir.path().join("IntranetChat.iconset");
    let output = dir.path().join("IntranetChat.icns");

    let err = icons::generate(&dir.path().join("absent.png"), &staging, &output)
        .await
        .unwrap_err();

    assert!(matches!(err, PackagerError::MissingAsset { .. }));
    assert!(!staging.exists());
    assert!(!output.exists());
}

#[tokio::test]
async fn compiled_icon_resource_is_non_empty() {
    if which::which("iconutil").is_err() {
        eprintln!("iconutil unavailable, skipping compile check");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("client.png");
    write_source_icon(&source);

    let staging = dir.path().join("IntranetChat.iconset");
    let output = dir.path().join("IntranetChat.icns");
    icons::generate(&source, &staging, &output).await.unwrap();

    assert!(output.metadata().unwrap().len() > 0);
}

#[test]
fn injection_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = write_fake_bundle(&dir.path().join("IntranetChat.app"));

    assert!(metadata::inject(&bundle, "2.3.1", UiMode::Windowed).is_empty());
    let first = manifest_dict(&bundle);
    assert!(metadata::inject(&bundle, "2.3.1", UiMode::Windowed).is_empty());
    let second = manifest_dict(&bundle);

    assert_eq!(first, second);
    assert_eq!(
        second.get(metadata::KEY_SHORT_VERSION),
        Some(&plist::Value::String("2.3.1".to_string()))
    );
    assert_eq!(
        second.get(metadata::KEY_BUILD_VERSION),
        Some(&plist::Value::String("2.3.1".to_string()))
    );
}

#[test]
fn background_agent_sets_the_suppression_flag() {
    let dir = tempfile::tempdir().unwrap();
    let server = write_fake_bundle(&dir.path().join("IntranetChatServer.app"));
    metadata::inject(&server, "1.0.0", UiMode::BackgroundAgent);
    assert_eq!(
        manifest_dict(&server).get(metadata::KEY_BACKGROUND_AGENT),
        Some(&plist::Value::Boolean(true))
    );

    let client = write_fake_bundle(&dir.path().join("IntranetChat.app"));
    metadata::inject(&client, "1.0.0", UiMode::Windowed);
    assert!(
        manifest_dict(&client)
            .get(metadata::KEY_BACKGROUND_AGENT)
            .is_none()
    );
}

#[test]
fn missing_manifest_is_advisory_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = Bundle::new(dir.path().join("Empty.app"));

    let advisories = metadata::inject(&bundle, "1.0.0", UiMode::Windowed);
    assert_eq!(advisories.len(), 1);
    assert_eq!(advisories[0].stage, "metadata");
}

#[tokio::test]
async fn finalize_never_fails_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = write_fake_bundle(&dir.path().join("IntranetChat.app"));

    // Whether or not codesign/xattr exist on this host, the stage completes
    // and reports at most advisories.
    let advisories = finalize::finalize(&bundle).await;
    for advisory in advisories {
        assert_eq!(advisory.stage, "finalize");
    }
}

#[tokio::test]
async fn declared_version_flows_into_the_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let entry = dir.path().join("qt_chat_client.py");
    std::fs::write(&entry, "import sys\nAPP_VERSION = \"2.3.1\"\n").unwrap();

    let bundle = write_fake_bundle(&dir.path().join("IntranetChat.app"));
    let resolved = version::extract_from_script(&entry).await;
    metadata::inject(&bundle, &resolved, UiMode::Windowed);

    let dict = manifest_dict(&bundle);
    assert_eq!(
        dict.get(metadata::KEY_SHORT_VERSION),
        Some(&plist::Value::String("2.3.1".to_string()))
    );
    assert_eq!(
        dict.get(metadata::KEY_BUILD_VERSION),
        Some(&plist::Value::String("2.3.1".to_string()))
    );
}

#[tokio::test]
async fn undeclared_version_stamps_the_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let entry = dir.path().join("qt_chat_client.py");
    std::fs::write(&entry, "import sys\n\ndef main():\n    pass\n").unwrap();

    let bundle = write_fake_bundle(&dir.path().join("IntranetChat.app"));
    let resolved = version::extract_from_script(&entry).await;
    metadata::inject(&bundle, &resolved, UiMode::Windowed);

    assert_eq!(
        manifest_dict(&bundle).get(metadata::KEY_SHORT_VERSION),
        Some(&plist::Value::String("0.0.0".to_string()))
    );
}
