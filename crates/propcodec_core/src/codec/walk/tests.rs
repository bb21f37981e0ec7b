use crate::codec::{
	ASSET_SIG, ASSET_SIGNATURE, EmptyAction, FieldShape, FieldTag, Object, Output, PropertyPath, RecordId, SIG_KEY, Schema, Shape, Value, simplify,
};

fn object(entries: Vec<(&str, Value)>) -> Object {
	entries.into_iter().map(|(key, value)| (key.to_owned(), value)).collect()
}

fn path(text: &str) -> PropertyPath {
	PropertyPath::parse(text).expect("path parses")
}

fn sample_schema() -> (Schema, RecordId) {
	let mut builder = Schema::builder();
	let inner = builder
		.record(
			"Inner",
			vec![
				FieldShape::new(FieldTag::required("name"), Shape::String),
				FieldShape::new(FieldTag::required("count"), Shape::Int),
				FieldShape::new(FieldTag::optional("note"), Shape::String),
			],
		)
		.expect("inner record");
	let root = builder
		.record(
			"Root",
			vec![
				FieldShape::new(FieldTag::required("list"), Shape::array(Shape::String)),
				FieldShape::new(FieldTag::optional("tags"), Shape::map(Shape::String)),
				FieldShape::new(FieldTag::optional("inner"), Shape::Record(inner)),
				FieldShape::new(FieldTag::optional("raw"), Shape::Any),
				FieldShape::new(FieldTag::optional("file"), Shape::AssetOrArchive),
				FieldShape::new(FieldTag::internal("cache"), Shape::Int),
			],
		)
		.expect("root record");
	(builder.build().expect("schema builds"), root)
}

#[test]
fn plain_input_has_no_changes() {
	let (schema, root) = sample_schema();
	let input = object(vec![("list", Value::Array(vec![Value::from("a")])), ("tags", Value::object([("k", Value::from("v"))]))]);
	let (stripped, changes) = simplify(&schema, root, input.clone());
	assert_eq!(stripped, input);
	assert!(changes.is_empty());
	assert_eq!(changes.root_type(), Some("Root"));
}

#[test]
fn nested_markers_are_recorded_deepest_first() {
	let (schema, root) = sample_schema();
	let input = object(vec![(
		"list",
		Value::secret(Value::Array(vec![Value::computed(Value::from("x")), Value::from("y")])),
	)]);
	let (stripped, changes) = simplify(&schema, root, input);

	assert_eq!(stripped, object(vec![("list", Value::Array(vec![Value::from("x"), Value::from("y")]))]));
	let recorded: Vec<_> = changes.iter().map(|change| (change.path.to_string(), change.secret, change.computed)).collect();
	assert_eq!(recorded, vec![("list[0]".to_owned(), false, true), ("list".to_owned(), true, false)]);
}

#[test]
fn empty_collections_record_restore_actions() {
	let (schema, root) = sample_schema();
	let input = object(vec![("list", Value::secret(Value::Array(Vec::new()))), ("tags", Value::Object(Object::new()))]);
	let (_, changes) = simplify(&schema, root, input);

	let recorded: Vec<_> = changes.iter().collect();
	assert_eq!(recorded.len(), 2, "empty list marker merges with its secret");
	assert_eq!(recorded[0].path, path("list"));
	assert_eq!(recorded[0].empty_action, EmptyAction::RestoreEmptyArray);
	assert!(recorded[0].secret);
	assert_eq!(recorded[1].path, path("tags"));
	assert_eq!(recorded[1].empty_action, EmptyAction::RestoreEmptyMap);
}

#[test]
fn computed_record_is_aligned_to_its_shape() {
	let (schema, root) = sample_schema();
	let input = object(vec![
		("list", Value::Array(Vec::new())),
		("inner", Value::computed(Value::object([("count", Value::from("not a number"))]))),
	]);
	let (stripped, changes) = simplify(&schema, root, input);

	let inner = stripped.get("inner").expect("inner kept");
	assert_eq!(inner, &Value::object([("name", Value::from("")), ("count", Value::Number(0.0))]), "optional note stays absent");
	assert!(changes.iter().any(|change| change.path == path("inner") && change.computed));
}

#[test]
fn output_marker_keeps_flags_and_dependencies() {
	let (schema, root) = sample_schema();
	let output = Output::unknown(Value::Null).with_secret(true).with_dependencies(["urn:a", "urn:b"]);
	let input = object(vec![("list", Value::Array(vec![Value::Output(output)]))]);
	let (stripped, changes) = simplify(&schema, root, input);

	assert_eq!(stripped, object(vec![("list", Value::Array(vec![Value::from("")]))]));
	let change = changes.iter().next().expect("one change");
	assert_eq!(change.path, path("list[0]"));
	assert!(change.force_output && change.computed && change.secret);
	assert_eq!(change.dependencies.len(), 2);
}

#[test]
fn known_output_is_not_aligned() {
	let (schema, root) = sample_schema();
	let input = object(vec![("inner", Value::Output(Output::known(Value::object([("count", Value::from(3_i64))]))))]);
	let (stripped, changes) = simplify(&schema, root, input);

	assert_eq!(stripped.get("inner"), Some(&Value::object([("count", Value::from(3_i64))])));
	let change = changes.iter().next().expect("one change");
	assert!(change.force_output && !change.computed && !change.secret);
}

#[test]
fn untyped_and_undeclared_values_are_not_coerced() {
	let (schema, root) = sample_schema();
	let raw = Value::object([("deep", Value::Array(vec![Value::secret(Value::Bool(true))]))]);
	let input = object(vec![("raw", Value::computed(raw)), ("extra", Value::from(1_i64)), ("cache", Value::from("x"))]);
	let (stripped, changes) = simplify(&schema, root, input);

	assert_eq!(stripped.get("raw"), Some(&Value::object([("deep", Value::Array(vec![Value::Bool(true)]))])));
	assert_eq!(stripped.get("extra"), Some(&Value::from(1_i64)));
	assert_eq!(stripped.get("cache"), Some(&Value::from("x")));
	let paths: Vec<_> = changes.iter().map(|change| change.path.to_string()).collect();
	assert_eq!(paths, vec!["raw.deep[0]".to_owned(), "raw".to_owned()]);
}

#[test]
fn asset_objects_are_wrapped_in_their_union() {
	let (schema, root) = sample_schema();
	let asset = Value::object([(SIG_KEY, Value::from(ASSET_SIG)), ("text", Value::from("hello"))]);
	let (stripped, _) = simplify(&schema, root, object(vec![("file", asset.clone())]));
	assert_eq!(stripped.get("file"), Some(&Value::object([(ASSET_SIGNATURE, asset)])));
}

#[test]
fn unknown_asset_aligns_to_an_empty_union() {
	let (schema, root) = sample_schema();
	let input = object(vec![("file", Value::computed(Value::from(""))), ("list", Value::Array(vec![Value::from("a")]))]);
	let (stripped, changes) = simplify(&schema, root, input);

	assert_eq!(stripped.get("file"), Some(&Value::Object(Object::new())));
	let paths: Vec<_> = changes.iter().map(|change| (change.path.to_string(), change.computed)).collect();
	assert_eq!(paths, vec![("file".to_owned(), true)]);
}
