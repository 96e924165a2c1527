#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Writes a lockfile v3 document whose `packages` map holds `entries`
/// (`(key, version)` pairs) in the given order, after the root entry.
pub fn write_lockfile(root: &Path, entries: &[(&str, &str)]) {
    let mut packages = serde_json::Map::new();
    packages.insert(
        String::new(),
        serde_json::json!({ "name": "fixture", "version": "1.0.0" }),
    );
    for (key, version) in entries {
        packages.insert(key.to_string(), serde_json::json!({ "version": version }));
    }
    let doc = serde_json::json!({
        "name": "fixture",
        "version": "1.0.0",
        "lockfileVersion": 3,
        "requires": true,
        "packages": packages,
    });
    fs::write(
        root.join("package-lock.json"),
        serde_json::to_string_pretty(&doc).unwrap(),
    )
    .unwrap();
}

/// Writes `dir/package.json` with the given `scripts` object.
pub fn write_manifest(dir: &Path, scripts: serde_json::Value) {
    fs::create_dir_all(dir).unwrap();
    let doc = serde_json::json!({ "name": "pkg", "version": "1.0.0", "scripts": scripts });
    fs::write(dir.join("package.json"), doc.to_string()).unwrap();
}
