use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sim", "--", "7"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert!(v["winner"].is_string());
    let statuses = [v["player1"]["status"].as_str(), v["player2"]["status"].as_str()];
    assert!(statuses.contains(&Some("Won")));
    assert!(statuses.contains(&Some("Lost")));
    assert!(v["player1"]["attacks"].as_u64().unwrap() > 0);
}

#[test]
fn sim_binary_rejects_missing_seed() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sim"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run sim binary");
    assert!(!output.status.success());
}
