//! CLI integration tests for content-pages
//!
//! These tests drive the binary against saved delivery responses, so no
//! network access is needed.

use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command instance for the content-pages binary
fn pages_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("content-pages"));
    cmd.current_dir(dir.path())
        .env_remove("CONTENTFUL_SPACE_ID")
        .env_remove("CONTENTFUL_DELIVERY_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn write_json(dir: &TempDir, name: &str, body: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(body).unwrap()).unwrap();
    path
}

fn link(id: &str) -> Value {
    json!({ "sys": { "type": "Link", "linkType": "Entry", "id": id } })
}

fn entry(id: &str, kind: &str, fields: Value) -> Value {
    json!({
        "sys": { "id": id, "type": "Entry", "contentType": { "sys": { "id": kind } } },
        "fields": fields
    })
}

fn doc(content: Value) -> Value {
    json!({ "nodeType": "document", "data": {}, "content": content })
}

fn para(text: &str) -> Value {
    json!({ "nodeType": "paragraph", "content": [{ "nodeType": "text", "value": text, "marks": [] }] })
}

/// A guides response: two guides, the first linking two sections
fn guides_response() -> Value {
    json!({
        "items": [
            entry("g1", "guide", json!({
                "title": "Getting started",
                "slug": "getting-started",
                "summary": "First steps",
                "lastUpdated": "2024-03-05",
                "guideSections": [link("s-late"), link("s-early"), link("s-missing")]
            })),
            entry("g2", "guide", json!({ "title": "Advanced", "slug": "advanced" }))
        ],
        "includes": {
            "Entry": [
                entry("s-late", "guideSection", json!({
                    "sectionTitle": "Finishing up", "order": 2, "content": doc(json!([para("late body")]))
                })),
                entry("s-early", "guideSection", json!({
                    "sectionTitle": "Before you begin", "order": 1, "content": doc(json!([para("early body")]))
                }))
            ]
        }
    })
}

// =============================================================================
// Guides
// =============================================================================

#[test]
fn test_guides_list_from_saved_response() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "guides.json", &guides_response());

    pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .arg("guides")
        .assert()
        .success()
        .stdout(predicate::str::contains("guides.html?slug=getting-started"))
        .stdout(predicate::str::contains("guides.html?slug=advanced"))
        .stdout(predicate::str::contains("First steps"));
}

#[test]
fn test_guide_sections_follow_order_field() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "guides.json", &guides_response());

    let output = pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .args(["guides", "--slug", "getting-started"])
        .assert()
        .success();

    let html = String::from_utf8_lossy(&output.get_output().stdout).to_string();

    let toc_early = html.find(">Before you begin</a>").unwrap();
    let toc_late = html.find(">Finishing up</a>").unwrap();
    assert!(toc_early < toc_late);

    let body_early = html.find("<p>early body</p>").unwrap();
    let body_late = html.find("<p>late body</p>").unwrap();
    assert!(body_early < body_late);

    assert!(html.contains("Last updated: 5 March 2024"));
    assert!(!html.contains("Advanced"));
}

#[test]
fn test_unknown_slug_shows_error_and_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "guides.json", &guides_response());

    pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .args(["guides", "--slug", "nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("bruv-error-box"))
        .stdout(predicate::str::contains("Guide not found with slug: nope"))
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_empty_guides_response() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "empty.json", &json!({ "items": [] }));

    pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .arg("guides")
        .assert()
        .failure()
        .stdout(predicate::str::contains("No guides found"));
}

// =============================================================================
// Landing and content pages
// =============================================================================

#[test]
fn test_landing_page() {
    let dir = TempDir::new().unwrap();
    let input = write_json(
        &dir,
        "landing.json",
        &json!({
            "items": [entry("lp", "landingPage", json!({
                "pageTitle": "Juggle",
                "heroDescription": "Plan shifts",
                "primaryCtaText": "Start",
                "features": [link("f1")],
                "featuredGuide": link("g1")
            }))],
            "includes": {
                "Entry": [
                    entry("f1", "feature", json!({
                        "title": "Rotas",
                        "description": "Build rotas",
                        "image": { "sys": { "type": "Link", "linkType": "Asset", "id": "a1" } }
                    })),
                    entry("g1", "guide", json!({ "title": "Getting started", "slug": "getting-started" }))
                ],
                "Asset": [
                    { "sys": { "id": "a1", "type": "Asset" }, "fields": { "title": "Rota screen", "file": { "url": "//images.example.net/rota.png" } } }
                ]
            }
        }),
    );

    pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .arg("landing")
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1 class=\"bruv-hero__heading\">Juggle</h1>"))
        .stdout(predicate::str::contains(
            "<img src=\"https://images.example.net/rota.png\" alt=\"Rota screen\">",
        ))
        .stdout(predicate::str::contains("Featured guide"));
}

#[test]
fn test_content_page_default_type_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("content-pages.toml"),
        "[pages]\ndefault_page_type = \"support\"\n",
    )
    .unwrap();
    let input = write_json(
        &dir,
        "pages.json",
        &json!({
            "items": [
                entry("p1", "contentPage", json!({ "pageType": "get-started", "pageTitle": "Get started" })),
                entry("p2", "contentPage", json!({
                    "pageType": "support",
                    "pageTitle": "Support",
                    "bodyContent": doc(json!([para(""), para("Email us")]))
                }))
            ]
        }),
    );

    pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .arg("page")
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1 class=\"bruv-heading-xl\">Support</h1>"))
        .stdout(predicate::str::contains("<p class=\"bruv-body\">Email us</p>"))
        .stdout(predicate::str::contains("<p class=\"bruv-body\"></p>").not());
}

#[test]
fn test_content_page_explicit_type() {
    let dir = TempDir::new().unwrap();
    let input = write_json(
        &dir,
        "pages.json",
        &json!({ "items": [entry("p1", "contentPage", json!({ "pageType": "get-started", "pageTitle": "Get started" }))] }),
    );

    pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .args(["page", "--type", "get-started"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Get started"));

    pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .args(["page", "--type", "support"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No content page found for \"support\""));
}

// =============================================================================
// Output options
// =============================================================================

#[test]
fn test_json_format() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "guides.json", &guides_response());

    let output = pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .args(["guides", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["page"], "guides");
    assert!(json["html"].as_str().unwrap().contains("Getting started"));
}

#[test]
fn test_json_format_reports_error() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "empty.json", &json!({ "items": [] }));

    let output = pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .args(["landing", "--format", "json"])
        .assert()
        .failure();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().starts_with("No landing page found"));
}

#[test]
fn test_out_writes_file() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "guides.json", &guides_response());
    let out = dir.path().join("guides.html");

    pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("guides")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote guides page"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Getting started"));
}

#[test]
fn test_missing_input_file_is_fetch_failure() {
    let dir = TempDir::new().unwrap();

    pages_cmd(&dir)
        .args(["--input", "does-not-exist.json", "guides"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unable to load guides"));
}

#[test]
fn test_deeply_nested_section_renders_to_depth_bound() {
    let dir = TempDir::new().unwrap();
    let quotes = (0..70).fold(para("deepest"), |inner, _| {
        json!({ "nodeType": "blockquote", "data": {}, "content": [inner] })
    });
    let response = json!({
        "items": [entry("g", "guide", json!({
            "title": "Deep",
            "slug": "deep",
            "guideSections": [link("s")]
        }))],
        "includes": { "Entry": [entry("s", "guideSection", json!({
            "sectionTitle": "Nested",
            "content": doc(json!([para("intro"), quotes]))
        }))] }
    });
    let input = write_json(&dir, "deep.json", &response);

    let output = pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .args(["guides", "--slug", "deep"])
        .assert()
        .success();

    let html = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    assert!(html.contains("<p>intro</p>"));
    assert!(!html.contains("deepest"));
    assert_eq!(html.matches("<div class=\"bruv-inset-text\">").count(), 64);
}

#[test]
fn test_undecodable_response_reports_cause_once() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ \"items\": [").unwrap();

    let output = pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .arg("guides")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Unable to load guides: Invalid response body: ",
        ));

    let stderr = String::from_utf8_lossy(&output.get_output().stderr);
    assert!(stderr.contains("Error: Unable to load guides: Invalid response body: "));
    assert_eq!(stderr.matches("Invalid response body").count(), 1);
}

#[test]
fn test_network_requires_credentials() {
    let dir = TempDir::new().unwrap();

    pages_cmd(&dir)
        .arg("landing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing space id"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let input = write_json(&dir, "guides.json", &guides_response());

    pages_cmd(&dir)
        .arg("--input")
        .arg(&input)
        .args(["--verbose", "guides"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:guides]"));
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_masks_token() {
    let dir = TempDir::new().unwrap();

    pages_cmd(&dir)
        .args(["--space-id", "space1", "--token", "super-secret", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("space1"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("super-secret").not());
}

#[test]
fn test_config_reads_environment() {
    let dir = TempDir::new().unwrap();

    pages_cmd(&dir)
        .env("CONTENTFUL_SPACE_ID", "from-env")
        .args(["--format", "json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from-env"));
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("content-pages.toml"), "[delivery]\ntimeout_secs = 0\n").unwrap();

    pages_cmd(&dir)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));
}
