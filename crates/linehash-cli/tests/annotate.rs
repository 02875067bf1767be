//! End-to-end tests for `linehash annotate` and `linehash hash`.
//!
//! Every command runs inside its own temporary directory with `GITHUB_WORKSPACE` cleared, so
//! neither a stray `linehash.toml` nor the CI environment leaks into the source-root choice.

use assert_cmd::Command;
use linehash_test_util::{
    SourceTree, line_hash, result_at, sarif_with_results, strip_line_hashes,
};
use predicates::prelude::*;
use serde_json::{Value, json};

/// Wraps the deprecated cargo_bin to centralize the deprecation warning.
#[allow(deprecated)]
fn linehash_cmd(tree: &SourceTree) -> Command {
    let mut cmd = Command::cargo_bin("linehash")
        .expect("linehash binary not found - run `cargo build` first");
    cmd.current_dir(tree.root()).env_remove("GITHUB_WORKSPACE");
    cmd
}

fn write_report(tree: &SourceTree, rel: &str, report: &Value) {
    tree.write(rel, &serde_json::to_string_pretty(report).expect("serialize report"));
}

fn read_report(tree: &SourceTree, rel: &str) -> Value {
    let text = std::fs::read_to_string(tree.root().join(rel)).expect("read report");
    serde_json::from_str(&text).expect("parse report")
}

const SOURCE: &str = "x = 2\nx = 1\nprint(x)\nx = 3\nprint(x)\nx = 4\nprint(x)\n";

#[test]
fn annotates_in_place_against_the_current_directory() {
    let tree = SourceTree::new();
    tree.write("src/prog.py", SOURCE);
    let report = sarif_with_results(vec![
        result_at("src/prog.py", Some(2)),
        result_at("src/prog.py", Some(3)),
        result_at("src/missing.py", Some(1)),
    ]);
    write_report(&tree, "results.sarif", &report);

    linehash_cmd(&tree)
        .args(["annotate", "--sarif", "results.sarif"])
        .assert()
        .success();

    let out = read_report(&tree, "results.sarif");
    assert_eq!(line_hash(&out, 0, 0), Some("bb609acbe9138d60:1"));
    assert_eq!(line_hash(&out, 0, 1), Some("1131fd5871777f34:1"));
    assert_eq!(line_hash(&out, 0, 2), None);
    assert_eq!(strip_line_hashes(out), report);
}

#[test]
fn output_and_source_root_flags() {
    let tree = SourceTree::new();
    tree.write("checkout/prog.py", SOURCE);
    write_report(
        &tree,
        "in.sarif",
        &sarif_with_results(vec![result_at("prog.py", Some(1))]),
    );

    linehash_cmd(&tree)
        .args([
            "annotate",
            "--sarif",
            "in.sarif",
            "--output",
            "out/annotated.sarif",
            "--source-root",
            "checkout",
            "--pretty",
        ])
        .assert()
        .success();

    let text = std::fs::read_to_string(tree.root().join("out/annotated.sarif")).expect("read");
    assert!(text.contains('\n'), "pretty output spans lines");
    let out: Value = serde_json::from_str(&text).expect("parse");
    assert_eq!(line_hash(&out, 0, 0), Some("e54938cc54b302f1:1"));

    let input = read_report(&tree, "in.sarif");
    assert_eq!(line_hash(&input, 0, 0), None, "input left untouched");
}

#[test]
fn absolute_uris_under_the_source_root() {
    let tree = SourceTree::new();
    let file = tree.write("checkout/prog.py", SOURCE);
    write_report(
        &tree,
        "in.sarif",
        &sarif_with_results(vec![
            result_at(file.as_str(), Some(1)),
            result_at(&format!("file://{file}"), Some(2)),
        ]),
    );

    linehash_cmd(&tree)
        .args(["annotate", "--sarif", "in.sarif", "--source-root"])
        .arg(tree.root().join("checkout").as_str())
        .assert()
        .success();

    let out = read_report(&tree, "in.sarif");
    assert_eq!(line_hash(&out, 0, 0), Some("e54938cc54b302f1:1"));
    assert_eq!(line_hash(&out, 0, 1), Some("bb609acbe9138d60:1"));
}

#[cfg(unix)]
#[test]
fn absolute_uris_under_a_symlinked_source_root() {
    let tree = SourceTree::new();
    tree.write("real/prog.py", SOURCE);
    let link = tree.root().join("link");
    std::os::unix::fs::symlink(tree.root().join("real"), &link).expect("symlink");
    write_report(
        &tree,
        "in.sarif",
        &sarif_with_results(vec![
            result_at(link.join("prog.py").as_str(), Some(1)),
            result_at("prog.py", Some(1)),
        ]),
    );

    linehash_cmd(&tree)
        .args(["annotate", "--sarif", "in.sarif", "--source-root", "link"])
        .assert()
        .success();

    let out = read_report(&tree, "in.sarif");
    assert_eq!(line_hash(&out, 0, 0), Some("e54938cc54b302f1:1"));
    assert_eq!(line_hash(&out, 0, 1), Some("e54938cc54b302f1:1"));
}

#[test]
fn source_root_from_github_workspace() {
    let tree = SourceTree::new();
    tree.write("ws/prog.py", SOURCE);
    write_report(
        &tree,
        "in.sarif",
        &sarif_with_results(vec![result_at("prog.py", Some(1))]),
    );

    linehash_cmd(&tree)
        .env("GITHUB_WORKSPACE", tree.root().join("ws").as_str())
        .args(["annotate", "--sarif", "in.sarif"])
        .assert()
        .success();

    let out = read_report(&tree, "in.sarif");
    assert_eq!(line_hash(&out, 0, 0), Some("e54938cc54b302f1:1"));
}

#[test]
fn source_root_from_config_file() {
    let tree = SourceTree::new();
    tree.write("repo/prog.py", SOURCE);
    tree.write(
        "ci/linehash.toml",
        "schema = \"linehash.config.v1\"\nsource_root = \"../repo\"\nparallel = false\n",
    );
    write_report(
        &tree,
        "in.sarif",
        &sarif_with_results(vec![result_at("prog.py", Some(1))]),
    );

    linehash_cmd(&tree)
        .args(["annotate", "--sarif", "in.sarif", "--config", "ci/linehash.toml"])
        .assert()
        .success();

    let out = read_report(&tree, "in.sarif");
    assert_eq!(line_hash(&out, 0, 0), Some("e54938cc54b302f1:1"));
}

#[test]
fn conflicts_become_annotations_and_summary() {
    let tree = SourceTree::new();
    tree.write("prog.py", SOURCE);
    let mut result = result_at("prog.py", Some(1));
    result["partialFingerprints"] = json!({ "primaryLocationLineHash": "deadbeef:1" });
    write_report(&tree, "in.sarif", &sarif_with_results(vec![result]));

    linehash_cmd(&tree)
        .args([
            "annotate",
            "--sarif",
            "in.sarif",
            "--annotations",
            "--summary-md",
            "summary.md",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("::warning file=prog.py,line=1::"))
        .stdout(predicate::str::contains("e54938cc54b302f1:1"))
        .stdout(predicate::str::contains("deadbeef:1"));

    let out = read_report(&tree, "in.sarif");
    assert_eq!(line_hash(&out, 0, 0), Some("deadbeef:1"));

    let md = std::fs::read_to_string(tree.root().join("summary.md")).expect("read summary");
    assert!(md.contains("Inconsistent fingerprints"));
    assert!(md.contains("`prog.py`"));
}

#[test]
fn annotations_max_caps_output() {
    let tree = SourceTree::new();
    tree.write("prog.py", SOURCE);
    let results = (1..=3)
        .map(|line| {
            let mut r = result_at("prog.py", Some(line));
            r["partialFingerprints"] = json!({ "primaryLocationLineHash": "0:1" });
            r
        })
        .collect();
    write_report(&tree, "in.sarif", &sarif_with_results(results));

    linehash_cmd(&tree)
        .args([
            "annotate",
            "--sarif",
            "in.sarif",
            "--annotations",
            "--annotations-max",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("::warning").count(2));
}

#[test]
fn missing_source_root_exits_1() {
    let tree = SourceTree::new();
    write_report(&tree, "in.sarif", &sarif_with_results(vec![]));

    linehash_cmd(&tree)
        .args(["annotate", "--sarif", "in.sarif", "--source-root", "nowhere"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("source root"));
}

#[test]
fn unparseable_report_exits_1() {
    let tree = SourceTree::new();
    tree.write("in.sarif", "{ not json");

    linehash_cmd(&tree)
        .args(["annotate", "--sarif", "in.sarif"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("linehash error"));
}

#[test]
fn bad_config_exits_1() {
    let tree = SourceTree::new();
    tree.write("linehash.toml", "output = \"yaml\"\n");
    write_report(&tree, "in.sarif", &sarif_with_results(vec![]));

    linehash_cmd(&tree)
        .args(["annotate", "--sarif", "in.sarif"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown output"));
}

#[test]
fn hash_prints_every_line() {
    let tree = SourceTree::new();
    tree.write("prog.py", SOURCE);

    linehash_cmd(&tree)
        .args(["hash", "prog.py"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "1\te54938cc54b302f1:1\n2\tbb609acbe9138d60:1\n",
        ))
        .stdout(predicate::str::ends_with("8\tc129715d7a2bc9a3:1\n"));
}
