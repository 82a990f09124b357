use dataenrich::resolve::ResolveOptions;
use dataenrich_testkit::{fixture_json, fixture_path};
use serde_json::json;

use super::resolve_document;
use crate::cmd::processors::builtin;

#[test]
fn document_without_processors_resolves_to_itself() {
	let resolved = resolve_document(&fixture_path("profile.json"), &[], &ResolveOptions::default()).expect("resolves");
	assert_eq!(resolved, fixture_json("profile.json"));
}

#[test]
fn builtin_processors_rewrite_matching_nodes() {
	let resolved = resolve_document(&fixture_path("profile.json"), &builtin(), &ResolveOptions::default()).expect("resolves");
	assert_eq!(
		resolved,
		json!({
			"name": "Acme",
			"tags": ["DRAFT", "static"],
			"address": { "<fetch>": "addr-1", "<stamp>": "v1" },
			"contact": "OPS",
		})
	);
}

#[test]
fn depth_limit_is_reported() {
	let options = ResolveOptions { max_depth: Some(1) };
	let err = resolve_document(&fixture_path("profile.json"), &[], &options).expect_err("too deep");
	assert_eq!(err.to_string(), "resolve depth exceeded (max=1)");
}

#[test]
fn missing_file_is_reported() {
	let err = resolve_document(&fixture_path("does-not-exist.json"), &builtin(), &ResolveOptions::default()).expect_err("missing");
	assert!(err.to_string().starts_with("read "));
}
