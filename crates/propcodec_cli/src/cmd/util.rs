use propcodec::codec::{Change, ChangeList, EmptyAction, FieldError, Typed, Value};
use serde::Serialize;
use serde_json::Number;

/// Print `payload` as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json render failed: {err}"),
	}
}

/// Render a typed value as plain JSON. Untyped subtrees keep their marker encoding.
pub(crate) fn typed_to_json(value: &Typed) -> serde_json::Value {
	match value {
		Typed::Null => serde_json::Value::Null,
		Typed::Bool(flag) => serde_json::Value::Bool(*flag),
		Typed::Int(number) => serde_json::Value::from(*number),
		Typed::Float(number) => Number::from_f64(*number).map_or(serde_json::Value::Null, serde_json::Value::Number),
		Typed::String(text) => serde_json::Value::String(text.clone()),
		Typed::List(items) => serde_json::Value::Array(items.iter().map(typed_to_json).collect()),
		Typed::Map(entries) => serde_json::Value::Object(entries.iter().map(|(key, item)| (key.clone(), typed_to_json(item))).collect()),
		Typed::Record(record) => serde_json::Value::Object(
			record
				.fields
				.iter()
				.map(|field| (field.name.to_string(), typed_to_json(&field.value)))
				.collect(),
		),
		Typed::Asset(union) => match (&union.asset, &union.archive) {
			(Some(asset), None) => Value::Object(asset.clone()).to_json(),
			(None, Some(archive)) => Value::Object(archive.clone()).to_json(),
			(None, None) => serde_json::Value::Object(serde_json::Map::new()),
			(Some(asset), Some(archive)) => serde_json::json!({
				"asset": Value::Object(asset.clone()).to_json(),
				"archive": Value::Object(archive.clone()).to_json(),
			}),
		},
		Typed::Any(raw) => raw.to_json(),
	}
}

#[derive(Serialize)]
pub(crate) struct ChangeJson {
	path: String,
	secret: bool,
	computed: bool,
	output: bool,
	empty: Option<&'static str>,
	dependencies: Vec<String>,
}

#[derive(Serialize)]
pub(crate) struct FieldErrorJson {
	#[serde(rename = "type")]
	type_name: String,
	field: String,
	message: String,
}

pub(crate) fn changes_to_json(changes: &ChangeList) -> Vec<ChangeJson> {
	changes.iter().map(change_to_json).collect()
}

fn change_to_json(change: &Change) -> ChangeJson {
	ChangeJson {
		path: change.path.to_string(),
		secret: change.secret,
		computed: change.computed,
		output: change.force_output,
		empty: match change.empty_action {
			EmptyAction::None => None,
			EmptyAction::RestoreEmptyMap => Some("map"),
			EmptyAction::RestoreEmptyArray => Some("array"),
		},
		dependencies: change.dependencies.iter().map(|dep| dep.as_str().to_owned()).collect(),
	}
}

pub(crate) fn field_errors_to_json(errors: &[FieldError]) -> Vec<FieldErrorJson> {
	errors
		.iter()
		.map(|error| FieldErrorJson {
			type_name: error.type_name().to_owned(),
			field: error.field().to_owned(),
			message: error.to_string(),
		})
		.collect()
}

/// Render a change as one tab-separated line.
pub(crate) fn change_line(change: &Change) -> String {
	let mut flags = Vec::new();
	if change.secret {
		flags.push("secret");
	}
	if change.computed {
		flags.push("computed");
	}
	if change.force_output {
		flags.push("output");
	}
	match change.empty_action {
		EmptyAction::None => {}
		EmptyAction::RestoreEmptyMap => flags.push("empty_map"),
		EmptyAction::RestoreEmptyArray => flags.push("empty_array"),
	}
	let flags = if flags.is_empty() { "-".to_owned() } else { flags.join(",") };
	let dependencies = if change.dependencies.is_empty() {
		"-".to_owned()
	} else {
		change.dependencies.iter().map(|dep| dep.as_str()).collect::<Vec<_>>().join(",")
	};
	format!("{}\t{flags}\t{dependencies}", change.path)
}
