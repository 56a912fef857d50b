//! Template filters.

include!(concat!(env!("OUT_DIR"), "/asset_hashes.rs"));

/// Version key for a static asset path, if the build hashed it.
pub fn asset_hash(path: &str) -> Option<&'static str> {
    ASSET_HASHES
        .iter()
        .find(|(asset, _)| *asset == path)
        .map(|(_, hash)| *hash)
}

/// `{{ "/static/js/viewer.js"|asset_url }}` renders as
/// `/static/js/viewer.js?v=<hash>`. Unknown paths pass through.
#[askama::filter_fn]
pub fn asset_url(path: impl std::fmt::Display, _: &dyn askama::Values) -> askama::Result<String> {
    let path = path.to_string();
    Ok(match asset_hash(&path) {
        Some(hash) => format!("{path}?v={hash}"),
        None => path,
    })
}
