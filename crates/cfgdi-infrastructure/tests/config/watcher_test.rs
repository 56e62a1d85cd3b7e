//! Configuration Watcher Tests

use std::sync::Arc;
use std::time::Duration;

use cfgdi_domain::ConfigNode;
use cfgdi_infrastructure::{ConfigLoader, ConfigRoot, ConfigWatchEvent, ConfigWatcher};
use serde_json::json;
use tempfile::TempDir;

use crate::test_utils::write_json;

#[test]
fn test_watcher_requires_runtime() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_json(temp_dir.path(), "appsettings.json", &json!({}));
    let root = ConfigRoot::new(json!({}));

    let result = ConfigWatcher::new(path.clone(), ConfigLoader::new().with_config_path(&path), root);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_manual_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_json(temp_dir.path(), "appsettings.json", &json!({"Greeting": {"Name": "World"}}));
    let loader = ConfigLoader::new().with_config_path(&path);
    let root = ConfigRoot::new(loader.load().unwrap().document);
    let section = root.section("Greeting");
    let _subscription = section.on_change(Arc::new(|| {}));

    let watcher = ConfigWatcher::new(path.clone(), loader, Arc::clone(&root)).unwrap();
    let mut events = watcher.subscribe();

    write_json(temp_dir.path(), "appsettings.json", &json!({"Greeting": {"Name": "Mars"}}));
    let notified = watcher.reload().unwrap();

    assert_eq!(notified, 1);
    assert_eq!(section.value(), Some(json!({"Name": "Mars"})));
    assert!(matches!(
        events.recv().await.unwrap(),
        ConfigWatchEvent::Reloaded { notified: 1 }
    ));

    // Drop watcher explicitly before temp_dir to avoid race conditions
    drop(watcher);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_file_change_reloads_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_json(temp_dir.path(), "appsettings.json", &json!({"Greeting": {"Name": "World"}}));
    let loader = ConfigLoader::new().with_config_path(&path);
    let root = ConfigRoot::new(loader.load().unwrap().document);

    let watcher = ConfigWatcher::new(path.clone(), loader, Arc::clone(&root)).unwrap();
    let mut events = watcher.subscribe();

    // Small delay so the watcher is armed before the write
    tokio::time::sleep(Duration::from_millis(50)).await;
    write_json(temp_dir.path(), "appsettings.json", &json!({"Greeting": {"Name": "Mars"}}));

    let reloaded = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match events.recv().await {
                Ok(ConfigWatchEvent::Reloaded { .. })
                    if root.get("Greeting:Name") == Some(json!("Mars")) =>
                {
                    return true;
                }
                Ok(_) => {}
                Err(_) => return false,
            }
        }
    })
    .await
    .unwrap_or(false);

    assert!(reloaded, "watcher did not pick up the file change");
    drop(watcher);
}
