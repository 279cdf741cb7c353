use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};

/// Hashes everything under `styles/` into `STYLES_HASH` so stylesheet
/// links change whenever a stylesheet does.
fn main() {
    println!("cargo:rerun-if-changed=styles/");

    let mut hasher = DefaultHasher::new();

    let mut paths: Vec<_> = fs::read_dir("styles")
        .expect("styles directory is missing")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    for path in paths {
        let contents = fs::read(&path).expect("unreadable stylesheet");
        path.file_name().hash(&mut hasher);
        contents.hash(&mut hasher);
    }

    let hash = format!("{:016x}", hasher.finish());
    println!("cargo:rustc-env=STYLES_HASH={}", &hash[..8]);
}
