use std::collections::BTreeSet;

use tracing::trace;

use crate::codec::{Dependency, Object, Output, PropertyPath, Value};

/// Collection to restore when replay finds nothing at a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyAction {
	/// No restoration.
	#[default]
	None,
	/// Restore an empty object.
	RestoreEmptyMap,
	/// Restore an empty array.
	RestoreEmptyArray,
}

impl EmptyAction {
	fn empty_value(self) -> Option<Value> {
		match self {
			Self::None => None,
			Self::RestoreEmptyMap => Some(Value::Object(Object::new())),
			Self::RestoreEmptyArray => Some(Value::Array(Vec::new())),
		}
	}
}

/// Markers stripped at one path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Change {
	/// Where the markers were found.
	pub path: PropertyPath,
	/// Value was secret.
	pub secret: bool,
	/// Value was not known.
	pub computed: bool,
	/// Value was carried by an output and must be re-wrapped as one.
	pub force_output: bool,
	/// Empty collection to restore.
	pub empty_action: EmptyAction,
	/// Dependencies of the stripped output.
	pub dependencies: BTreeSet<Dependency>,
}

impl Change {
	/// Change at `path` with no flags set.
	pub fn at(path: PropertyPath) -> Self {
		Self { path, ..Self::default() }
	}

	/// Set the secret flag.
	pub fn secret(mut self) -> Self {
		self.secret = true;
		self
	}

	/// Set the computed flag.
	pub fn computed(mut self) -> Self {
		self.computed = true;
		self
	}

	/// Set the output flag.
	pub fn force_output(mut self) -> Self {
		self.force_output = true;
		self
	}

	/// Set the empty collection action.
	pub fn empty(mut self, action: EmptyAction) -> Self {
		self.empty_action = action;
		self
	}

	/// Re-apply this change's markers to `value`.
	///
	/// Order is output shell, then computed, then secret, so nested markers always fold
	/// into at most one output.
	pub fn apply(&self, value: Value) -> Value {
		let mut value = value;
		if self.force_output {
			value = Value::Output(Output::known(value).with_dependencies(self.dependencies.iter().cloned()));
		}
		if self.computed {
			value = value.make_computed();
		}
		if self.secret {
			value = value.make_secret();
		}
		value
	}

	fn absorb(&mut self, earlier: Change) {
		self.secret |= earlier.secret;
		self.computed |= earlier.computed;
		self.force_output |= earlier.force_output;
		if earlier.empty_action != EmptyAction::None {
			self.empty_action = earlier.empty_action;
		}
		self.dependencies.extend(earlier.dependencies);
	}
}

/// Ordered record of stripped markers, deepest paths first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeList {
	changes: Vec<Change>,
	root: Option<Box<str>>,
}

impl ChangeList {
	/// Empty list not bound to a root type.
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty list bound to the record type it will be replayed onto.
	pub fn for_root(type_name: &str) -> Self {
		Self {
			changes: Vec::new(),
			root: Some(type_name.into()),
		}
	}

	/// Record type this list was produced for.
	pub fn root_type(&self) -> Option<&str> {
		self.root.as_deref()
	}

	/// Append a change, merging it into the last one when both share a path.
	pub fn mark(&mut self, change: Change) {
		let mut change = change;
		if self.changes.last().is_some_and(|last| last.path == change.path)
			&& let Some(last) = self.changes.pop()
		{
			change.absorb(last);
		}
		trace!(
			path = %change.path,
			secret = change.secret,
			computed = change.computed,
			output = change.force_output,
			empty = ?change.empty_action,
			"mark change"
		);
		self.changes.push(change);
	}

	/// Number of changes.
	pub fn len(&self) -> usize {
		self.changes.len()
	}

	/// Whether no marker was stripped.
	pub fn is_empty(&self) -> bool {
		self.changes.is_empty()
	}

	/// Iterate changes in replay order.
	pub fn iter(&self) -> std::slice::Iter<'_, Change> {
		self.changes.iter()
	}

	/// Copy of this list for replay with or without unknown values.
	///
	/// With `allow == false` every computed flag is cleared; values that were computed are
	/// re-emitted as known outputs.
	pub fn allow_unknown(&self, allow: bool) -> ChangeList {
		if allow {
			return self.clone();
		}
		let changes = self
			.changes
			.iter()
			.cloned()
			.map(|mut change| {
				change.force_output |= change.computed;
				change.computed = false;
				change
			})
			.collect();
		Self {
			changes,
			root: self.root.clone(),
		}
	}

	/// Re-apply every change to `tree`.
	pub fn replay(&self, tree: Value) -> Value {
		replay_changes(self.changes.iter(), tree)
	}

	/// Replay onto a record object. Changes addressed to the root itself are skipped.
	pub fn replay_object(&self, object: Object) -> Object {
		let changes = self.changes.iter().filter(|change| !change.path.is_root());
		match replay_changes(changes, Value::Object(object)) {
			Value::Object(object) => object,
			_ => Object::new(),
		}
	}
}

fn replay_changes<'c>(changes: impl Iterator<Item = &'c Change>, tree: Value) -> Value {
	let mut tree = tree;
	for change in changes {
		let current = change.path.get_mut(&mut tree).map(std::mem::take);
		let value = match (current, change.empty_action.empty_value()) {
			(None, None) => {
				trace!(path = %change.path, "replay skip: path not present");
				continue;
			}
			(None | Some(Value::Null), Some(empty)) => empty,
			(Some(value), _) => value,
		};
		if !change.path.set(&mut tree, change.apply(value)) {
			trace!(path = %change.path, "replay skip: parent not present");
		}
	}
	tree
}

impl<'a> IntoIterator for &'a ChangeList {
	type Item = &'a Change;
	type IntoIter = std::slice::Iter<'a, Change>;

	fn into_iter(self) -> Self::IntoIter {
		self.changes.iter()
	}
}

#[cfg(test)]
mod tests;
