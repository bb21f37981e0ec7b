use crate::codec::{CodecError, Output, PathStep, PropertyPath, Value};

#[test]
fn parse_dotted_keys_and_indices() {
	let path = PropertyPath::parse("spec.containers[2].ports[0]").expect("path parses");
	assert_eq!(
		path.steps,
		vec![
			PathStep::Key("spec".to_owned()),
			PathStep::Key("containers".to_owned()),
			PathStep::Index(2),
			PathStep::Key("ports".to_owned()),
			PathStep::Index(0),
		]
	);
}

#[test]
fn parse_quoted_keys_with_escapes() {
	let path = PropertyPath::parse(r#"tags["app.kubernetes.io/name"]["say \"hi\""]"#).expect("path parses");
	assert_eq!(
		path.steps,
		vec![
			PathStep::Key("tags".to_owned()),
			PathStep::Key("app.kubernetes.io/name".to_owned()),
			PathStep::Key("say \"hi\"".to_owned()),
		]
	);
}

#[test]
fn parse_allows_leading_selector() {
	let path = PropertyPath::parse("[3].name").expect("path parses");
	assert_eq!(path.steps, vec![PathStep::Index(3), PathStep::Key("name".to_owned())]);
}

#[test]
fn parse_rejects_malformed_input() {
	for text in ["", "a.", ".a", "a..b", "a[", "a[x]", "a[1", "a.[0]", "a b", r#"a["open"#, r#"a["\n"]"#] {
		let err = PropertyPath::parse(text).expect_err("path should be rejected");
		assert!(matches!(err, CodecError::InvalidPropertyPath { .. }), "unexpected error for {text:?}: {err}");
	}
}

#[test]
fn display_round_trips_through_parse() {
	for text in ["a", "a.b[0]", r#"labels["a.b"].c"#, "[1][2]", r#"m["q\"x"]"#] {
		let path = PropertyPath::parse(text).expect("path parses");
		assert_eq!(path.to_string(), text);
		assert_eq!(PropertyPath::parse(&path.to_string()).expect("display reparses"), path);
	}
}

#[test]
fn child_helpers_extend_without_mutating() {
	let base = PropertyPath::root().child_key("items");
	let child = base.child_index(4);
	assert_eq!(base.len(), 1);
	assert_eq!(child.to_string(), "items[4]");
	assert!(PropertyPath::root().is_root());
}

#[test]
fn get_looks_through_markers() {
	let tree = Value::object([(
		"outer",
		Value::secret(Value::Output(Output::known(Value::Array(vec![Value::Null, Value::computed(Value::from("x"))])))),
	)]);
	let path = PropertyPath::parse("outer[1]").expect("path parses");
	assert_eq!(path.get(&tree), Some(&Value::computed(Value::from("x"))));
	assert_eq!(PropertyPath::parse("outer[2]").expect("path parses").get(&tree), None);
	assert_eq!(PropertyPath::parse("outer.key").expect("path parses").get(&tree), None);
}

#[test]
fn set_inserts_missing_keys_but_not_indices() {
	let mut tree = Value::object([("list", Value::Array(vec![Value::from(1_i64)]))]);

	assert!(PropertyPath::parse("added").expect("path parses").set(&mut tree, Value::Bool(true)));
	assert!(PropertyPath::parse("list[0]").expect("path parses").set(&mut tree, Value::from("one")));
	assert!(!PropertyPath::parse("list[1]").expect("path parses").set(&mut tree, Value::Null));
	assert!(!PropertyPath::parse("missing.child").expect("path parses").set(&mut tree, Value::Null));

	assert_eq!(
		tree,
		Value::object([("added", Value::Bool(true)), ("list", Value::Array(vec![Value::from("one")]))])
	);
}

#[test]
fn set_at_root_replaces_tree() {
	let mut tree = Value::from("old");
	assert!(PropertyPath::root().set(&mut tree, Value::from("new")));
	assert_eq!(tree, Value::from("new"));
}

#[test]
fn parse_errors_carry_the_offending_text() {
	let err = PropertyPath::parse("a..b").expect_err("empty segment is rejected");
	assert_eq!(err, CodecError::InvalidPropertyPath { path: "a..b".to_owned() });
	assert_eq!(err.clone().to_string(), "invalid property path: a..b");
}
