use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const MINIMAL_INVOICE: &str = r#"{
  "invoice_number": "INV0001",
  "issue_date": "2024-01-01",
  "due_date": "2024-01-15",
  "items": [
    {"description": "Design work", "quantity": 2, "unit_price": 100, "tax": 10, "amount": 220}
  ],
  "subtotal": 220,
  "total": 220,
  "bill_to": null
}"#;

fn invoice_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("invoice-pdf"))
}

fn write_input(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_help() {
    invoice_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Render invoice records"));
}

#[test]
fn test_version() {
    invoice_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("invoice-pdf"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invoice-config");

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized invoice-pdf config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("output").is_dir());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invoice-config");

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_render_writes_named_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("no-config");
    let out_dir = temp_dir.path().join("out");
    let input = write_input(temp_dir.path(), "invoice.json", MINIMAL_INVOICE);

    invoice_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "render",
            &input,
            "--out-dir",
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered Invoice-INV0001.pdf"))
        .stdout(predicate::str::contains("Total:  £220.00"));

    let bytes = fs::read(out_dir.join("Invoice-INV0001.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_render_uses_config_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invoice-config");
    let input = write_input(temp_dir.path(), "invoice.json", MINIMAL_INVOICE);

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "render", &input])
        .assert()
        .success();

    assert!(config_path.join("output").join("Invoice-INV0001.pdf").exists());
}

#[test]
fn test_render_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("no-config");
    let input = write_input(temp_dir.path(), "invoice.json", MINIMAL_INVOICE);
    let first = temp_dir.path().join("a.pdf");
    let second = temp_dir.path().join("b.pdf");

    for out in [&first, &second] {
        invoice_cmd()
            .args([
                "-C",
                config_path.to_str().unwrap(),
                "render",
                &input,
                "-o",
                out.to_str().unwrap(),
            ])
            .assert()
            .success();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_render_unnamed_invoice() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("no-config");
    let out_dir = temp_dir.path().join("out");
    let input = write_input(temp_dir.path(), "blank.json", r#"{"invoice_number": ""}"#);

    invoice_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "render",
            &input,
            "-d",
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice-unnamed.pdf"));

    assert!(out_dir.join("Invoice-unnamed.pdf").exists());
}

#[test]
fn test_render_malformed_bill_to_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("no-config");
    let out_dir = temp_dir.path().join("out");
    let input = write_input(
        temp_dir.path(),
        "invoice.json",
        r#"{"invoice_number": "INV-7", "bill_to": "{not valid json", "items": "[]"}"#,
    );

    invoice_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "render",
            &input,
            "-d",
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(out_dir.join("Invoice-INV-7.pdf").exists());
}

#[test]
fn test_render_invalid_json_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("no-config");
    let input = write_input(temp_dir.path(), "broken.json", "{\"invoice_number\": ");

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "render", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse invoice input"));
}

#[test]
fn test_render_output_requires_single_input() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("no-config");
    let a = write_input(temp_dir.path(), "a.json", MINIMAL_INVOICE);
    let b = write_input(temp_dir.path(), "b.json", MINIMAL_INVOICE);

    invoice_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "render",
            &a,
            &b,
            "-o",
            "out.pdf",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("single input"));
}

#[test]
fn test_render_from_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("no-config");
    let out = temp_dir.path().join("stdin.pdf");

    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("invoice-pdf"))
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "render",
            "-",
            "-o",
            out.to_str().unwrap(),
        ])
        .write_stdin(MINIMAL_INVOICE)
        .assert()
        .success();

    assert!(out.exists());
}

#[test]
fn test_inspect_shows_items_and_totals() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("no-config");
    let input = write_input(temp_dir.path(), "invoice.json", MINIMAL_INVOICE);

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "inspect", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice INV0001"))
        .stdout(predicate::str::contains("(no client information)"))
        .stdout(predicate::str::contains("Design work"))
        .stdout(predicate::str::contains("10%"))
        .stdout(predicate::str::contains("Total:       £220.00"));
}

#[test]
fn test_inspect_honours_style_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invoice-config");
    fs::create_dir_all(&config_path).unwrap();
    fs::write(
        config_path.join("config.toml"),
        "[style]\ncurrency_symbol = \"$\"\ndate_format = \"%Y-%m-%d\"\n",
    )
    .unwrap();
    let input = write_input(temp_dir.path(), "invoice.json", MINIMAL_INVOICE);

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "inspect", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("$220.00"))
        .stdout(predicate::str::contains("Issue date:  2024-01-01"));
}

#[test]
fn test_bad_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invoice-config");
    fs::create_dir_all(&config_path).unwrap();
    fs::write(config_path.join("config.toml"), "[style\n").unwrap();
    let input = write_input(temp_dir.path(), "invoice.json", MINIMAL_INVOICE);

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "inspect", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_layout_lists_commands() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("no-config");
    let input = write_input(temp_dir.path(), "empty.json", r#"{"invoice_number": "E-1"}"#);

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "layout", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("stroke_rect"))
        .stdout(predicate::str::contains("No items found"))
        .stdout(predicate::str::contains("1 table rows"));
}

#[test]
fn test_layout_json() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("no-config");
    let input = write_input(temp_dir.path(), "invoice.json", MINIMAL_INVOICE);

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "layout", &input, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"op\": \"text\""))
        .stdout(predicate::str::contains("\"text\": \"Design work\""))
        .stdout(predicate::str::contains("\"weight\": \"bold\""));
}

#[test]
fn test_config_without_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("no-config");

    invoice_cmd()
        .args(["-C", config_path.to_str().unwrap(), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"))
        .stdout(predicate::str::contains("currency_symbol"));
}
