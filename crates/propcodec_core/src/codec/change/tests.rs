use crate::codec::{Change, ChangeList, EmptyAction, Output, PropertyPath, Value};

fn path(text: &str) -> PropertyPath {
	PropertyPath::parse(text).expect("path parses")
}

#[test]
fn mark_merges_adjacent_changes_at_same_path() {
	let mut list = ChangeList::new();
	list.mark(Change::at(path("tags")).empty(EmptyAction::RestoreEmptyMap));
	list.mark(Change::at(path("tags")).secret());
	list.mark(Change::at(path("name")).computed());

	let changes: Vec<_> = list.iter().collect();
	assert_eq!(changes.len(), 2);
	assert!(changes[0].secret);
	assert_eq!(changes[0].empty_action, EmptyAction::RestoreEmptyMap);
	assert!(changes[1].computed);
}

#[test]
fn mark_does_not_merge_non_adjacent_duplicates() {
	let mut list = ChangeList::new();
	list.mark(Change::at(path("a")).secret());
	list.mark(Change::at(path("b")).secret());
	list.mark(Change::at(path("a")).computed());
	assert_eq!(list.len(), 3);
}

#[test]
fn merge_unions_dependencies() {
	let mut first = Change::at(path("out")).force_output();
	first.dependencies.insert("urn:a".into());
	let mut second = Change::at(path("out")).secret();
	second.dependencies.insert("urn:b".into());

	let mut list = ChangeList::new();
	list.mark(first);
	list.mark(second);

	let merged = list.iter().next().expect("one change");
	assert!(merged.force_output && merged.secret);
	assert_eq!(merged.dependencies.len(), 2);
}

#[test]
fn replay_order_of_secret_and_computed_does_not_matter() {
	let tree = Value::object([("x", Value::from("v"))]);
	let expected = Value::object([("x", Value::Output(Output::unknown(Value::from("v")).with_secret(true)))]);

	for (first, second) in [(Change::at(path("x")).secret(), Change::at(path("x")).computed()), (
		Change::at(path("x")).computed(),
		Change::at(path("x")).secret(),
	)] {
		let mut list = ChangeList::new();
		list.mark(Change::at(path("y")));
		list.mark(first);
		list.mark(Change::at(path("y")));
		list.mark(second);
		assert_eq!(list.replay(tree.clone()), expected);
	}
}

#[test]
fn replay_restores_empty_collections_for_null_or_missing() {
	let mut list = ChangeList::new();
	list.mark(Change::at(path("tags")).empty(EmptyAction::RestoreEmptyMap));
	list.mark(Change::at(path("ports")).empty(EmptyAction::RestoreEmptyArray));
	list.mark(Change::at(path("gone")).secret());

	let tree = Value::object([("tags", Value::Null)]);
	let replayed = list.replay(tree);
	assert_eq!(
		replayed,
		Value::object([("tags", Value::Object(Default::default())), ("ports", Value::Array(Vec::new()))])
	);
}

#[test]
fn replay_keeps_output_dependencies() {
	let mut change = Change::at(path("id")).force_output();
	change.dependencies.insert("urn:dep".into());
	let mut list = ChangeList::new();
	list.mark(change);

	let replayed = list.replay(Value::object([("id", Value::from("abc"))]));
	assert_eq!(
		replayed,
		Value::object([("id", Value::Output(Output::known(Value::from("abc")).with_dependencies(["urn:dep"])))])
	);
}

#[test]
fn allow_unknown_false_turns_computed_into_known_output() {
	let mut list = ChangeList::for_root("Args");
	list.mark(Change::at(path("n")).computed());
	list.mark(Change::at(path("s")).secret());

	let stripped = list.allow_unknown(false);
	assert_eq!(stripped.root_type(), Some("Args"));
	assert_eq!(stripped.allow_unknown(false), stripped, "clearing twice changes nothing");
	assert!(stripped.iter().all(|change| !change.computed));

	let replayed = stripped.replay(Value::object([("n", Value::from(5_i64)), ("s", Value::from("hi"))]));
	assert_eq!(
		replayed,
		Value::object([("n", Value::Output(Output::known(Value::from(5_i64)))), ("s", Value::secret(Value::from("hi")))])
	);
	assert_eq!(list.allow_unknown(true), list);
}

#[test]
fn replay_object_skips_root_changes() {
	let mut list = ChangeList::new();
	list.mark(Change::at(PropertyPath::root()).secret());
	let object = list.replay_object(Default::default());
	assert!(object.is_empty());
}

#[test]
fn merge_keeps_first_empty_action() {
	let mut list = ChangeList::new();
	list.mark(Change::at(path("x")).empty(EmptyAction::RestoreEmptyArray));
	list.mark(Change::at(path("x")).empty(EmptyAction::RestoreEmptyMap));
	list.mark(Change::at(path("x")).computed());

	let changes: Vec<_> = list.iter().collect();
	assert_eq!(changes.len(), 1);
	assert_eq!(changes[0].empty_action, EmptyAction::RestoreEmptyArray);
	assert!(changes[0].computed);
}
