#![allow(missing_docs)]

mod support;

use std::rc::Rc;

use dataenrich::resolve::{Node, Processor, ResolveError, ResolveOptions, Value, node_tree_from_json, resolve_value};
use dataenrich_testkit::fixture_json;
use serde_json::json;

use support::{CopyFrom, Fetch, Stamp, Upper, run_pipeline};

fn processors() -> Vec<Rc<dyn Processor>> {
	vec![Rc::new(Fetch), Rc::new(Upper), Rc::new(Stamp)]
}

#[test]
fn profile_fixture_is_enriched() {
	let mut tree = node_tree_from_json(fixture_json("profile.json"));
	run_pipeline(&tree, &processors()).expect("pipeline runs");

	resolve_value(&mut tree, &ResolveOptions::default()).expect("tree resolves");
	assert_eq!(
		tree.to_json().expect("exports"),
		json!({
			"name": "Acme",
			"tags": ["DRAFT", "static"],
			"address": { "id": "addr-1", "city": "Utrecht", "stamp": "v1" },
			"contact": "OPS",
		})
	);
}

#[test]
fn fetched_node_defers_later_processors() {
	let tree = node_tree_from_json(json!({ "<fetch>": "addr-9", "<stamp>": "v2" }));
	let Value::Node(node) = &tree else {
		panic!("object wraps in a node");
	};

	node.apply(Rc::new(Fetch)).expect("fetch applies");
	assert!(node.is_pending());
	node.apply(Rc::new(Stamp)).expect("stamp deferred");
	assert!(node.is_pending());

	let result = node.get_result().expect("resolves");
	assert_eq!(result.get("stamp"), Some(&Value::from("v2")));
	assert_eq!(result.get("id"), Some(&Value::from("addr-9")));
	assert_eq!(node.get_result().expect("memoized"), result);
}

#[test]
fn instruction_referencing_processed_node_sees_its_result() {
	let source = Node::new([("<upper>".to_owned(), Value::from("shout"))].into_iter().collect());
	let alias = Node::new([("<copy>".to_owned(), Value::Node(source.clone()))].into_iter().collect());

	source.apply(Rc::new(Upper)).expect("upper applies");
	alias.apply(Rc::new(CopyFrom)).expect("copy applies");

	assert_eq!(alias.get_result().expect("resolves"), Value::from("SHOUT"));
}

#[test]
fn processor_failure_propagates_from_pipeline() {
	let tree = node_tree_from_json(json!([{ "<upper>": 3 }]));
	let err = run_pipeline(&tree, &processors()).expect_err("upper rejects numbers");
	assert!(matches!(err, ResolveError::Processor { ref property, .. } if property == "<upper>"));
}

#[test]
fn nodes_without_matching_instructions_pass_through() {
	let mut tree = node_tree_from_json(fixture_json("refs.json"));
	run_pipeline(&tree, &processors()).expect("nothing applies");

	resolve_value(&mut tree, &ResolveOptions::default()).expect("tree resolves");
	assert_eq!(tree.to_json().expect("exports"), fixture_json("refs.json"));
	assert!(matches!(tree, Value::Sequence(ref items) if items.len() == 3));
}
