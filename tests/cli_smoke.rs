use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn symdex(args: &[&str], cwd: &Path) -> Output {
    // `cargo test` sets this for integration tests.
    let bin = env!("CARGO_BIN_EXE_symdex");
    Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .env_remove("SYMDEX_LOG")
        .output()
        .expect("run symdex")
}

fn write(root: &Path, rel: &str, body: &str) {
    let p = root.join(rel);
    std::fs::create_dir_all(p.parent().unwrap()).unwrap();
    std::fs::write(p, body).unwrap();
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "store/store.go",
        "package store\n\nimport \"sync\"\n\ntype Store struct {\n\tmu sync.Mutex\n}\n\nfunc (s *Store) Get(key string) string {\n\treturn key\n}\n",
    );
    write(tmp.path(), "main.go", "package main\n\nfunc main() {}\n");
    write(tmp.path(), "gen/gen.go", "package gen\n\nfunc Generated() {}\n");
    write(tmp.path(), ".symdexignore", "# generated\ngen/\n");
    tmp
}

#[test]
fn inspect_prints_file_summary_json() {
    let tmp = fixture();
    let out = symdex(&["inspect", "store/store.go"], tmp.path());
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["path"], "store/store.go");
    assert_eq!(v["imports"][0], "sync");
    assert_eq!(v["symbols"][0]["name"], "Store");
    assert_eq!(v["symbols"][1]["receiver"], "(s *Store)");
}

#[test]
fn index_respects_ignore_file() {
    let tmp = fixture();
    let out = symdex(&["index"], tmp.path());
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let paths: Vec<_> = v.as_array().unwrap().iter().map(|s| s["path"].as_str().unwrap()).collect();
    assert_eq!(paths, vec!["main.go", "store/store.go"]);
}

#[test]
fn query_prints_one_line_per_match() {
    let tmp = fixture();
    let out = symdex(&["query", r"method_definition[receiver=/\*Store/]", "."], tmp.path());
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        stdout.trim_end(),
        "store/store.go:9-11 method_definition Get func (s *Store) Get(key string) string"
    );
}

#[test]
fn query_json_output() {
    let tmp = fixture();
    let out = symdex(&["query", "function_definition", "--json"], tmp.path());
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let names: Vec<_> = v.as_array().unwrap().iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["main"]);
}

#[test]
fn bad_selector_exits_non_zero() {
    let tmp = fixture();
    let out = symdex(&["query", "function_definition[depth>=2]"], tmp.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unsupported filter clause"));
}
