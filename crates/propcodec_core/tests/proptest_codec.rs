//! Property-based tests for round trips and marker folding.

#![allow(missing_docs)]

use propcodec::codec::{Change, ChangeList, Object, Output, PropertyPath, Value, decode};
use propcodec_testkit::service_schema;
use proptest::prelude::*;

fn plain_leaf() -> impl Strategy<Value = Value> {
	prop_oneof![
		Just(Value::Null),
		any::<bool>().prop_map(Value::Bool),
		any::<i32>().prop_map(|number| Value::Number(f64::from(number))),
		"[a-z]{0,6}".prop_map(Value::String),
	]
}

fn with_marker(value: Value, kind: u8, flag: bool) -> Value {
	match kind % 7 {
		0..=2 => value,
		3 => Value::secret(value),
		4 => Value::computed(value),
		5 => Value::Output(Output::known(value).with_secret(flag)),
		_ => Value::Output(Output::unknown(value).with_secret(flag).with_dependencies(["urn:dep"])),
	}
}

fn marked_tree() -> impl Strategy<Value = Value> {
	let leaf = (plain_leaf(), any::<u8>(), any::<bool>()).prop_map(|(value, kind, flag)| with_marker(value, kind, flag));
	leaf.prop_recursive(3, 32, 4, |inner| {
		prop_oneof![
			(prop::collection::vec(inner.clone(), 0..4), any::<u8>(), any::<bool>())
				.prop_map(|(items, kind, flag)| with_marker(Value::Array(items), kind, flag)),
			(prop::collection::btree_map("[a-z]{1,4}", inner, 0..4), any::<u8>(), any::<bool>())
				.prop_map(|(entries, kind, flag)| with_marker(Value::Object(entries), kind, flag)),
		]
	})
}

fn config_tree() -> impl Strategy<Value = Value> {
	(prop::collection::btree_map("[a-z]{1,4}", marked_tree(), 0..4), any::<u8>(), any::<bool>())
		.prop_map(|(entries, kind, flag)| with_marker(Value::Object(entries), kind, flag))
}

proptest! {
	#[test]
	fn untyped_subtree_round_trips(config in config_tree(), name in "[a-z]{1,8}", replicas in 0_i32..100) {
		let (schema, service) = service_schema();
		let mut input = Object::new();
		input.insert("name".to_owned(), Value::from(name));
		input.insert("replicas".to_owned(), Value::Number(f64::from(replicas)));
		input.insert("config".to_owned(), config);

		let decoded = decode(&schema, service, input.clone());
		prop_assert!(decoded.errors.is_none());
		let encoded = decoded.encoder.encode(&decoded.value).expect("encodes");
		prop_assert_eq!(encoded, input);
	}

	#[test]
	fn secret_and_computed_commute(value in plain_leaf()) {
		let left = value.clone().make_secret().make_computed();
		let right = value.clone().make_computed().make_secret();
		prop_assert_eq!(&left, &right);
		prop_assert_eq!(left, Value::Output(Output::unknown(value).with_secret(true)));
	}

	#[test]
	fn replay_order_of_flags_does_not_matter(value in plain_leaf(), secret_first in any::<bool>()) {
		let path = PropertyPath::root().child_key("x");
		let secret = Change::at(path.clone()).secret();
		let computed = Change::at(path.clone()).computed();
		let (first, second) = if secret_first { (secret, computed) } else { (computed, secret) };

		let mut list = ChangeList::new();
		list.mark(first);
		list.mark(Change::at(PropertyPath::root().child_key("y")));
		list.mark(second);

		let replayed = list.replay(Value::object([("x", value.clone())]));
		prop_assert_eq!(replayed, Value::object([("x", Value::Output(Output::unknown(value).with_secret(true)))]));
	}

	#[test]
	fn fold_is_idempotent_and_preserves_deep_equality(tree in marked_tree()) {
		let folded = tree.clone().fold_all();
		prop_assert_eq!(folded.clone().fold_all(), folded.clone());
		prop_assert!(tree.deep_equals(&folded));
	}
}
