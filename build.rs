use std::collections::hash_map::DefaultHasher;
use std::fmt::Write as _;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Static files served with a `?v=` cache key, relative to the crate root.
const HASHED_ASSETS: &[&str] = &["static/js/viewer.js", "static/css/viewer.css"];

fn content_hash(path: &Path) -> String {
    let bytes = fs::read(path).unwrap_or_default();
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    let mut digest = format!("{:016x}", hasher.finish());
    digest.truncate(8);
    digest
}

fn main() {
    println!("cargo:rerun-if-changed=templates/");

    let mut table = String::from("/// (URL path, content hash) for every cache-busted asset\n");
    table.push_str("pub const ASSET_HASHES: &[(&str, &str)] = &[\n");
    for asset in HASHED_ASSETS {
        println!("cargo:rerun-if-changed={asset}");
        let hash = content_hash(Path::new(asset));
        let _ = writeln!(table, "    (\"/{asset}\", \"{hash}\"),");
    }
    table.push_str("];\n");

    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    fs::write(Path::new(&out_dir).join("asset_hashes.rs"), table)
        .expect("failed to write asset_hashes.rs");
}
