//! Hygiene: coding standards enforced at test time.
//!
//! Scans `src/` (test files excluded) for antipatterns. Each pattern has a
//! budget; the budget only ever goes down.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// `(pattern, budget, why)`.
const BUDGETS: &[(&str, usize, &str)] = &[
    // Panics.
    (".unwrap()", 0, "propagate or handle the error"),
    (".expect(", 0, "propagate or handle the error"),
    ("panic!(", 0, "return an error instead"),
    ("unreachable!(", 0, "make the state unrepresentable"),
    ("todo!(", 0, "finish the stub"),
    ("unimplemented!(", 0, "finish the stub"),
    // Silent loss.
    ("let _ =", 0, "inspect the value or log it"),
    (".ok()", 0, "inspect the error before discarding it"),
    // Logging goes through `tracing`.
    ("println!(", 0, "use tracing"),
    ("eprintln!(", 0, "use tracing"),
    ("dbg!(", 0, "remove debugging output"),
    // Structure.
    ("#[allow(dead_code)]", 0, "delete the dead code"),
];

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn sources_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "run from the crate root");
}

#[test]
fn budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for &(pattern, max, why) in BUDGETS {
        let hits = count_in_source(&files, pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > max {
            failures.push(format!("{pattern} budget exceeded: found {count}, max {max} ({why}).\n{}", format_hits(&hits)));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn every_module_has_a_sibling_test_file() {
    let exempt = ["lib.rs", "consts.rs", "error.rs", "web.rs"];
    let missing: Vec<String> = source_files()
        .into_iter()
        .filter(|f| !exempt.iter().any(|e| f.path.ends_with(e)))
        .filter(|f| !Path::new(&f.path.replace(".rs", "_test.rs")).exists())
        .map(|f| f.path)
        .collect();
    assert!(missing.is_empty(), "modules without tests:\n{}", missing.join("\n"));
}
