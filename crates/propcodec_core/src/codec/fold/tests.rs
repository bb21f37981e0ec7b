use crate::codec::{Output, Value};

fn hi() -> Value {
	Value::from("hi")
}

#[test]
fn secret_and_computed_commute() {
	let left = hi().make_secret().make_computed();
	let right = hi().make_computed().make_secret();
	let expected = Value::Output(Output::unknown(hi()).with_secret(true));
	assert_eq!(left, expected);
	assert_eq!(right, expected);
}

#[test]
fn make_helpers_are_idempotent() {
	assert_eq!(hi().make_secret().make_secret(), Value::secret(hi()));
	assert_eq!(hi().make_computed().make_computed(), Value::computed(hi()));

	let output = Value::Output(Output::known(hi()).with_secret(true));
	assert_eq!(output.clone().make_secret(), output);
}

#[test]
fn public_and_known_undo_markers() {
	let both = hi().make_secret().make_computed();
	assert_eq!(both.clone().make_public(), Value::Output(Output::unknown(hi())));
	assert_eq!(both.make_known(), Value::Output(Output::known(hi()).with_secret(true)));

	assert_eq!(Value::secret(hi()).make_public(), hi());
	assert_eq!(Value::computed(hi()).make_known(), hi());
	assert_eq!(hi().make_public().make_known(), hi());
}

#[test]
fn predicates_look_at_outputs() {
	assert!(Value::Output(Output::unknown(Value::Null)).is_computed());
	assert!(!Value::Output(Output::known(Value::Null)).is_computed());
	assert!(Value::Output(Output::known(Value::Null).with_secret(true)).is_secret());
	assert!(!Value::computed(Value::Null).is_secret());
}

#[test]
fn fold_collapses_nested_wrappers() {
	let nested = Value::secret(Value::computed(Value::Output(Output::known(hi()).with_dependencies(["urn:a"]))));
	let folded = nested.fold();
	let expected = Value::Output(Output::unknown(hi()).with_secret(true).with_dependencies(["urn:a"]));
	assert_eq!(folded, expected);

	assert_eq!(Value::Output(Output::known(hi())).fold(), hi());
	assert_eq!(
		Value::Output(Output::known(hi()).with_dependencies(["urn:b"])).fold(),
		Value::Output(Output::known(hi()).with_dependencies(["urn:b"])),
		"dependencies keep the output shell"
	);
}

#[test]
fn fold_all_normalizes_every_position() {
	let tree = Value::object([("list", Value::Array(vec![Value::secret(Value::secret(hi())), Value::from(1_i64)]))]);
	let expected = Value::object([(
		"list",
		Value::Array(vec![Value::Output(Output::known(hi()).with_secret(true)), Value::from(1_i64)]),
	)]);
	assert_eq!(tree.fold_all(), expected);
}

#[test]
fn deep_equals_ignores_wrapper_order_and_dependencies() {
	let a = Value::secret(Value::computed(hi()));
	let b = Value::computed(Value::secret(hi()));
	assert!(a.deep_equals(&b));

	let with_deps = Value::Output(Output::known(hi()).with_dependencies(["urn:c"]));
	assert!(with_deps.deep_equals(&hi()));
	assert!(hi().deep_equals(&with_deps));

	assert!(!Value::secret(hi()).deep_equals(&hi()));
	assert!(!Value::Array(vec![hi()]).deep_equals(&Value::Array(vec![hi(), hi()])));
	assert!(Value::object([("k", Value::secret(hi()))]).deep_equals(&Value::object([("k", Value::secret(hi()))])));
}
