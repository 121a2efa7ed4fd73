#![allow(dead_code)]
use std::env;
use std::fs;
use std::path::PathBuf;

/// Create a unique file path inside the system temp dir and remove any
/// leftover from a previous run.
pub fn temp_file(name: &str, ext: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_gametime.{ext}"));
    fs::remove_file(&path).ok();
    path
}

/// Unique cache-file path for a tracker test.
pub fn temp_cache(name: &str) -> PathBuf {
    temp_file(name, "json")
}

pub fn write_file(path: &PathBuf, content: &str) {
    fs::write(path, content).expect("write test file");
}
