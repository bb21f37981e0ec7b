use serde_json::{Map, Number};

use crate::codec::{CodecError, Dependency, Output, Result, SIG_KEY, Value};

/// Signature value identifying a secret object in JSON.
pub const SECRET_SIG: &str = "1b47061264138c4ac30d75fd1eb44270";
/// Signature value identifying an output object in JSON.
pub const OUTPUT_SIG: &str = "d0e6a833031e9bbcd3f4e8bde6ca49a4";
/// Sentinel string standing for a computed value in JSON.
pub const UNKNOWN_VALUE: &str = "04da6b54-80e4-46f7-96ec-b56ff0331ba9";

impl Value {
	/// Read a JSON document using the reserved signature conventions.
	///
	/// Secrets and outputs are signature-tagged objects; the unknown sentinel string becomes
	/// a computed marker. Asset and archive objects stay plain objects.
	pub fn from_json(json: &serde_json::Value) -> Result<Value> {
		let value = match json {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(flag) => Value::Bool(*flag),
			serde_json::Value::Number(number) => Value::Number(number.as_f64().ok_or_else(|| invalid(format!("number {number} is out of range")))?),
			serde_json::Value::String(text) if text == UNKNOWN_VALUE => Value::computed(Value::String(String::new())),
			serde_json::Value::String(text) => Value::String(text.clone()),
			serde_json::Value::Array(items) => Value::Array(items.iter().map(Value::from_json).collect::<Result<_>>()?),
			serde_json::Value::Object(entries) => match entries.get(SIG_KEY).and_then(serde_json::Value::as_str) {
				Some(SECRET_SIG) => Value::secret(field_or_null(entries, "value")?),
				Some(OUTPUT_SIG) => Value::Output(output_from_json(entries)?),
				_ => Value::Object(
					entries
						.iter()
						.map(|(key, item)| Ok((key.clone(), Value::from_json(item)?)))
						.collect::<Result<_>>()?,
				),
			},
		};
		Ok(value)
	}

	/// Write this tree as JSON using the reserved signature conventions.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Value::Null => serde_json::Value::Null,
			Value::Bool(flag) => serde_json::Value::Bool(*flag),
			Value::Number(number) => number_to_json(*number),
			Value::String(text) => serde_json::Value::String(text.clone()),
			Value::Array(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
			Value::Object(entries) => serde_json::Value::Object(entries.iter().map(|(key, item)| (key.clone(), item.to_json())).collect()),
			Value::Secret(inner) => {
				let mut out = Map::new();
				out.insert(SIG_KEY.to_owned(), SECRET_SIG.into());
				out.insert("value".to_owned(), inner.to_json());
				serde_json::Value::Object(out)
			}
			Value::Computed(_) => UNKNOWN_VALUE.into(),
			Value::Output(output) => {
				let mut out = Map::new();
				out.insert(SIG_KEY.to_owned(), OUTPUT_SIG.into());
				if output.known {
					out.insert("value".to_owned(), output.element.to_json());
				}
				if output.secret {
					out.insert("secret".to_owned(), true.into());
				}
				if !output.dependencies.is_empty() {
					let dependencies: Vec<serde_json::Value> = output.dependencies.iter().map(|dep| dep.as_str().into()).collect();
					out.insert("dependencies".to_owned(), serde_json::Value::Array(dependencies));
				}
				serde_json::Value::Object(out)
			}
		}
	}
}

fn output_from_json(entries: &Map<String, serde_json::Value>) -> Result<Output> {
	let known = entries.contains_key("value");
	let element = field_or_null(entries, "value")?;
	let secret = match entries.get("secret") {
		None | Some(serde_json::Value::Null) => false,
		Some(serde_json::Value::Bool(flag)) => *flag,
		Some(_) => return Err(invalid("output secret flag must be a boolean".to_owned())),
	};

	let mut output = (if known { Output::known(element) } else { Output::unknown(element) }).with_secret(secret);
	match entries.get("dependencies") {
		None | Some(serde_json::Value::Null) => {}
		Some(serde_json::Value::Array(items)) => {
			for item in items {
				let token = item.as_str().ok_or_else(|| invalid("output dependencies must be strings".to_owned()))?;
				output.dependencies.insert(Dependency::from(token));
			}
		}
		Some(_) => return Err(invalid("output dependencies must be an array".to_owned())),
	}
	Ok(output)
}

fn field_or_null(entries: &Map<String, serde_json::Value>, key: &str) -> Result<Value> {
	entries.get(key).map_or(Ok(Value::Null), Value::from_json)
}

fn number_to_json(number: f64) -> serde_json::Value {
	if number.fract() == 0.0 && number.abs() < 9.0e15 {
		return serde_json::Value::Number(Number::from(number as i64));
	}
	Number::from_f64(number).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

fn invalid(reason: String) -> CodecError {
	CodecError::InvalidWireValue { reason }
}
