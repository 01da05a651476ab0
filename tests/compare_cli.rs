mod common;

use common::{run_ecp, stderr, stdout, Workspace};
use serde_json::json;

#[test]
fn compares_well_known_d3_documents_by_default() {
    let ws = Workspace::new();
    ws.write_json(
        "evidence/gold/impact/D3_broker_cert_rotation_A.json",
        &json!({
            "refresh_paths": ["certs/broker.pem", "docs/rotation.md"],
            "retest_paths": ["tests/tls_handshake.json"]
        }),
    );
    ws.write_json(
        "evidence/gold/impact/D3_broker_cert_rotation_B.json",
        &json!({
            "refresh_paths": ["docs/rotation.md", "configs/broker.toml"],
            "retest_paths": ["tests/tls_handshake.json"]
        }),
    );

    let output = run_ecp(ws.root(), &["compare"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Jaccard(refresh_paths): 0.3333333333333333\nJaccard(retest_paths): 1.0\n"
    );
}

#[test]
fn explicit_paths_override_defaults() {
    let ws = Workspace::new();
    ws.write_json("left.json", &json!({ "refresh_paths": [], "retest_paths": ["t"] }));
    ws.write_json("right.json", &json!({ "refresh_paths": [], "retest_paths": [] }));

    let output = run_ecp(
        ws.root(),
        &["compare", "--left", "left.json", "--right", "right.json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Jaccard(refresh_paths): 1.0\nJaccard(retest_paths): 0.0\n"
    );
}

#[test]
fn missing_default_documents_fail() {
    let ws = Workspace::new();
    let output = run_ecp(ws.root(), &["compare"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("D3_broker_cert_rotation_A.json"));
}
