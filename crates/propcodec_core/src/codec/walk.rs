use tracing::debug;

use crate::codec::asset::wrap_asset_union;
use crate::codec::{Change, ChangeList, EmptyAction, Object, PropertyPath, RecordId, Schema, Shape, Value};

static ANY_SHAPE: Shape = Shape::Any;

/// Strip every marker from `object`, recording each one as a change.
///
/// The returned object only holds plain values. Where a marker wrapped a value that is
/// not known, the value is aligned to the declared shape: missing required fields are
/// synthesized and mismatching scalars are replaced by their zero value. Never fails.
///
/// # Panics
///
/// Panics when `root` was issued by another schema.
pub fn simplify(schema: &Schema, root: RecordId, object: Object) -> (Object, ChangeList) {
	let type_name = &schema.record(root).type_name;
	let mut walker = Walker {
		schema,
		changes: ChangeList::for_root(type_name),
	};
	let stripped = walker.walk_record(object, &PropertyPath::root(), root, false);
	debug!(record = %type_name, changes = walker.changes.len(), "simplified wire object");
	(stripped, walker.changes)
}

struct Walker<'s> {
	schema: &'s Schema,
	changes: ChangeList,
}

impl Walker<'_> {
	fn walk(&mut self, value: Value, path: &PropertyPath, shape: &Shape, align: bool) -> Value {
		let align = align && !shape.is_any();
		match value {
			Value::Secret(inner) => {
				// inner markers first so replay re-embeds them before the outer secret
				let element = self.walk(*inner, path, shape, align);
				self.changes.mark(Change::at(path.clone()).secret());
				element
			}
			Value::Computed(inner) => {
				let element = self.walk(*inner, path, shape, true);
				self.changes.mark(Change::at(path.clone()).computed());
				element
			}
			Value::Output(output) => {
				let element = self.walk(*output.element, path, shape, !output.known);
				let mut change = Change::at(path.clone()).force_output();
				change.computed = !output.known;
				change.secret = output.secret;
				change.dependencies = output.dependencies;
				self.changes.mark(change);
				element
			}
			plain if align => self.walk_aligned(plain, path, shape),
			plain => self.walk_plain(plain, path, shape),
		}
	}

	fn walk_plain(&mut self, value: Value, path: &PropertyPath, shape: &Shape) -> Value {
		let element = shape.element().unwrap_or(&ANY_SHAPE);
		match (value, shape) {
			(Value::Object(object), Shape::AssetOrArchive) => wrap_asset_union(Value::Object(object)),
			(Value::Object(object), Shape::Record(id)) => Value::Object(self.walk_record(object, path, *id, false)),
			(Value::Object(object), _) => self.walk_map(Value::Object(object), path, element, false),
			(Value::Array(items), _) => self.walk_array(Value::Array(items), path, element, false),
			(scalar, _) => scalar,
		}
	}

	fn walk_aligned(&mut self, value: Value, path: &PropertyPath, shape: &Shape) -> Value {
		match shape {
			Shape::Array(element) => self.walk_array(value, path, element, true),
			Shape::Map(element) => self.walk_map(value, path, element, true),
			Shape::Record(id) => {
				let object = match value {
					Value::Object(object) => object,
					_ => Object::new(),
				};
				Value::Object(self.walk_record(object, path, *id, true))
			}
			Shape::String => match value {
				Value::String(_) => value,
				_ => Value::String(String::new()),
			},
			Shape::Bool => match value {
				Value::Bool(_) => value,
				_ => Value::Bool(false),
			},
			Shape::Int | Shape::Float => match value {
				Value::Number(_) => value,
				_ => Value::Number(0.0),
			},
			Shape::AssetOrArchive => match value {
				Value::Object(object) => wrap_asset_union(Value::Object(object)),
				_ => Value::Object(Object::new()),
			},
			Shape::Any => value,
		}
	}

	fn walk_record(&mut self, object: Object, path: &PropertyPath, id: RecordId, align: bool) -> Object {
		let schema = self.schema;
		let mut object = object;
		for field in schema.record(id).wire_fields() {
			let field_path = path.child_key(field.name());
			let walked = match object.remove(field.name()) {
				Some(inner) => self.walk(inner, &field_path, &field.shape, align),
				None if field.tag.optional || !align => continue,
				None => self.walk(Value::Null, &field_path, &field.shape, true),
			};
			object.insert(field.name().to_owned(), walked);
		}
		object
	}

	fn walk_array(&mut self, value: Value, path: &PropertyPath, element: &Shape, align: bool) -> Value {
		let Value::Array(items) = value else {
			return Value::Array(Vec::new());
		};
		if items.is_empty() {
			self.changes.mark(Change::at(path.clone()).empty(EmptyAction::RestoreEmptyArray));
		}
		let items = items
			.into_iter()
			.enumerate()
			.map(|(index, item)| self.walk(item, &path.child_index(index), element, align))
			.collect();
		Value::Array(items)
	}

	fn walk_map(&mut self, value: Value, path: &PropertyPath, element: &Shape, align: bool) -> Value {
		let Value::Object(entries) = value else {
			return Value::Object(Object::new());
		};
		if entries.is_empty() {
			self.changes.mark(Change::at(path.clone()).empty(EmptyAction::RestoreEmptyMap));
		}
		let entries = entries
			.into_iter()
			.map(|(key, item)| {
				let walked = self.walk(item, &path.child_key(&key), element, align);
				(key, walked)
			})
			.collect();
		Value::Object(entries)
	}
}

#[cfg(test)]
mod tests;
