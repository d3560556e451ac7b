#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use idmq_core::model::{Contract, Identity, TreeNode, TreeType};
use idmq_core::Dataset;
use tempfile::TempDir;

struct Fixture {
    db: PathBuf,
    manager: Identity,
    subordinate: Identity,
}

/// Migrated store with a manager at ORG-ROOT and a subordinate at ORG-CHILD
fn setup(dir: &TempDir) -> Fixture {
    let db = dir.path().join("store.db");
    let mut conn = idmq_store::db::open(&db).unwrap();
    idmq_store::migrations::apply_migrations(&mut conn).unwrap();

    let tree_type = TreeType::new("ORGANIZATION");
    let root = TreeNode::new("ORG-ROOT", tree_type.id);
    let child = TreeNode::new("ORG-CHILD", tree_type.id).with_parent(root.id);
    let manager = Identity::new("manager");
    let subordinate = Identity::new("subordinate");

    let mut data = Dataset::new();
    data.contracts.push(Contract::new(manager.id).at(root.id));
    data.contracts.push(Contract::new(subordinate.id).at(child.id));
    data.tree_types.push(tree_type);
    data.tree_nodes.extend([root, child]);
    data.identities.extend([manager.clone(), subordinate.clone()]);
    idmq_store::repo::insert_dataset(&mut conn, &data).unwrap();

    Fixture {
        db,
        manager,
        subordinate,
    }
}

fn idmq(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_idmq"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_cli_builders_marks_effective_implementation() {
    let dir = TempDir::new().unwrap();
    let output = idmq(dir.path(), &["builders"]);

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let lines = stdout_lines(&output);
    assert!(lines
        .iter()
        .any(|l| l.starts_with('*') && l.contains("identity.managersFor default-managers-filter")));
    assert!(lines
        .iter()
        .any(|l| l.starts_with(' ') && l.contains("identity.managersFor tree-managers-filter")));
}

#[test]
fn test_cli_builders_honours_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("idmq.toml");
    std::fs::write(
        &config,
        "[idm.sec.core.filter.identity.managersFor]\nimpl = \"tree-managers-filter\"\n",
    )
    .unwrap();

    let config = config.to_str().unwrap();
    let output = idmq(dir.path(), &["builders", "--config", config]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert!(lines
        .iter()
        .any(|l| l.starts_with('*') && l.contains("identity.managersFor tree-managers-filter")));
}

#[test]
fn test_cli_builders_json() {
    let dir = TempDir::new().unwrap();
    let output = idmq(dir.path(), &["builders", "--json"]);

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let builders = parsed.as_array().unwrap();
    assert!(builders
        .iter()
        .any(|b| b["implementation"] == "guarantee-managers-filter"));
}

#[test]
fn test_cli_migrate_creates_database() {
    let dir = TempDir::new().unwrap();
    let output = idmq(dir.path(), &["migrate", "--db", "nested/store.db"]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["001_identity_schema"]);
    assert!(dir.path().join("nested/store.db").exists());
}

#[test]
fn test_cli_search_subordinates() {
    let dir = TempDir::new().unwrap();
    let fixture = setup(&dir);
    let filter = format!("{{\"subordinatesFor\": \"{}\"}}", fixture.manager.id);

    let output = idmq(
        dir.path(),
        &[
            "search",
            "--db",
            fixture.db.to_str().unwrap(),
            "--entity",
            "identity",
            "--filter",
            &filter,
        ],
    );

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout_lines(&output),
        vec![fixture.subordinate.id.to_string()]
    );
}

#[test]
fn test_cli_search_pages_as_json() {
    let dir = TempDir::new().unwrap();
    let fixture = setup(&dir);

    let output = idmq(
        dir.path(),
        &[
            "search",
            "--db",
            fixture.db.to_str().unwrap(),
            "--entity",
            "identity",
            "--sort",
            "username:desc",
            "--size",
            "1",
            "--json",
        ],
    );

    assert!(output.status.success());
    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["total"], 2);
    assert_eq!(page["ids"][0], fixture.subordinate.id.to_string());
}

#[test]
fn test_cli_search_rejects_unknown_override() {
    let dir = TempDir::new().unwrap();
    let fixture = setup(&dir);
    let filter = format!("{{\"managersFor\": \"{}\"}}", fixture.subordinate.id);

    let output = Command::new(env!("CARGO_BIN_EXE_idmq"))
        .current_dir(dir.path())
        .env(
            "IDMQ_IDM__SEC__CORE__FILTER__IDENTITY__MANAGERSFOR__IMPL",
            "no-such-filter",
        )
        .args([
            "search",
            "--db",
            fixture.db.to_str().unwrap(),
            "--entity",
            "identity",
            "--filter",
            &filter,
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no-such-filter"), "Stderr: {}", stderr);
}

#[test]
fn test_cli_search_rejects_unknown_entity() {
    let dir = TempDir::new().unwrap();
    let output = idmq(dir.path(), &["search", "--entity", "spaceship"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("spaceship"));
}
