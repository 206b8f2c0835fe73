//! Integration tests for the `schema` and `resources` commands.

mod common;

use common::pve_cmd;
use predicates::prelude::*;

#[test]
fn test_schema_lists_keys_and_env_vars() {
    pve_cmd()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("pm_api_url"))
        .stdout(predicate::str::contains("PM_API_TOKEN_SECRET"))
        .stdout(predicate::str::contains("pm_log_levels"));
}

#[test]
fn test_schema_json() {
    let output = pve_cmd()
        .args(["schema", "--output", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output).unwrap();
    assert_eq!(rows.len(), 14);
    let tls = rows.iter().find(|r| r["key"] == "pm_tls_insecure").unwrap();
    assert_eq!(tls["type"], "bool");
    assert_eq!(tls["default"], false);
}

#[test]
fn test_resources_lists_qualified_names() {
    pve_cmd()
        .arg("resources")
        .assert()
        .success()
        .stdout(predicate::str::contains("proxmox_vm_qemu"))
        .stdout(predicate::str::contains("proxmox_lxc"))
        .stdout(predicate::str::contains("proxmox_pool"))
        .stdout(predicate::str::contains("proxmox_cloud_init_disk"))
        .stdout(predicate::str::contains("proxmox_storage_iso"))
        .stdout(predicate::str::contains("proxmox_ha_groups"));
}

#[test]
fn test_unknown_subcommand_fails() {
    pve_cmd().arg("deploy").assert().failure();
}
