// tests/writes_through_writer.rs
// Fails if UPDATE/INSERT statements are issued outside the writer module.
// Keeping every write in configdb/writer.rs is what guarantees the
// one-transaction-per-database contract.

use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            let p = e.path();
            if p.is_dir() {
                collect_rs_files(&p, files);
            } else if p.extension().map(|s| s == "rs").unwrap_or(false) {
                files.push(p);
            }
        }
    }
}

fn is_whitelisted(path: &Path) -> bool {
    let p = path.to_string_lossy().replace('\\', "/");
    // The writer owns all mutating statements; connection setup may use
    // execute_batch for PRAGMAs.
    p.ends_with("/configdb/writer.rs") || p.ends_with("/configdb/connection.rs")
}

fn strip_test_modules(source: &str) -> String {
    // Inline #[cfg(test)] modules build fixture databases directly.
    match source.find("#[cfg(test)]") {
        Some(pos) => source[..pos].to_string(),
        None => source.to_string(),
    }
}

#[test]
fn mutating_statements_only_in_writer() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let src_dir = Path::new(manifest_dir).join("src");

    let mut files = Vec::new();
    collect_rs_files(&src_dir, &mut files);
    assert!(!files.is_empty(), "no source files found under {:?}", src_dir);

    let bad_patterns = ["UPDATE ", "INSERT INTO", "DELETE FROM", "execute_batch("];

    let mut offenders: Vec<(String, String)> = Vec::new();
    for file in files {
        if is_whitelisted(&file) {
            continue;
        }
        let Ok(source) = fs::read_to_string(&file) else {
            continue;
        };
        let runtime_source = strip_test_modules(&source);
        for pattern in bad_patterns {
            if runtime_source.contains(pattern) {
                offenders.push((file.display().to_string(), pattern.to_string()));
            }
        }
    }

    assert!(
        offenders.is_empty(),
        "mutating SQL outside configdb/writer.rs: {:?}",
        offenders
    );
}
