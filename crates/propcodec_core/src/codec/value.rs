use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// String-keyed object entries of a value tree.
pub type Object = BTreeMap<String, Value>;

/// Opaque reference to an upstream value an output depends on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dependency(Box<str>);

impl Dependency {
	/// Wrap a reference token.
	pub fn new(token: impl Into<Box<str>>) -> Self {
		Self(token.into())
	}

	/// Borrow the reference token.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Dependency {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl fmt::Display for Dependency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Wire value tree including secret, computed, and output markers.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// Absent or explicit null.
	#[default]
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Numeric scalar.
	Number(f64),
	/// String scalar.
	String(String),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// String-keyed mapping.
	Object(Object),
	/// Value that must not be shown in the clear.
	Secret(Box<Value>),
	/// Value not known yet; the wrapped placeholder carries no meaning.
	Computed(Box<Value>),
	/// Output carrying known/secret state and dependencies.
	Output(Output),
}

/// Output marker payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
	/// Wrapped value; a placeholder when `known` is false.
	pub element: Box<Value>,
	/// Whether `element` is meaningful.
	pub known: bool,
	/// Whether `element` is secret.
	pub secret: bool,
	/// Upstream references this output depends on.
	pub dependencies: BTreeSet<Dependency>,
}

impl Output {
	/// Known, non-secret output without dependencies.
	pub fn known(element: Value) -> Self {
		Self {
			element: Box::new(element),
			known: true,
			secret: false,
			dependencies: BTreeSet::new(),
		}
	}

	/// Unknown, non-secret output with a placeholder element.
	pub fn unknown(element: Value) -> Self {
		Self { known: false, ..Self::known(element) }
	}

	/// Set the secret flag.
	pub fn with_secret(mut self, secret: bool) -> Self {
		self.secret = secret;
		self
	}

	/// Add dependency references.
	pub fn with_dependencies<I, D>(mut self, dependencies: I) -> Self
	where
		I: IntoIterator<Item = D>,
		D: Into<Dependency>,
	{
		self.dependencies.extend(dependencies.into_iter().map(Into::into));
		self
	}
}

/// Discriminant of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	/// [`Value::Null`].
	Null,
	/// [`Value::Bool`].
	Bool,
	/// [`Value::Number`].
	Number,
	/// [`Value::String`].
	String,
	/// [`Value::Array`].
	Array,
	/// [`Value::Object`].
	Object,
	/// [`Value::Secret`].
	Secret,
	/// [`Value::Computed`].
	Computed,
	/// [`Value::Output`].
	Output,
}

impl ValueKind {
	/// Render the kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool => "bool",
			Self::Number => "number",
			Self::String => "string",
			Self::Array => "array",
			Self::Object => "object",
			Self::Secret => "secret",
			Self::Computed => "computed",
			Self::Output => "output",
		}
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Value {
	/// Wrap `inner` in a secret marker.
	pub fn secret(inner: Value) -> Self {
		Self::Secret(Box::new(inner))
	}

	/// Wrap `placeholder` in a computed marker.
	pub fn computed(placeholder: Value) -> Self {
		Self::Computed(Box::new(placeholder))
	}

	/// Build an object from key/value pairs.
	pub fn object<K, I>(entries: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, Value)>,
	{
		Self::Object(entries.into_iter().map(|(key, value)| (key.into(), value)).collect())
	}

	/// Discriminant of this value.
	pub fn kind(&self) -> ValueKind {
		match self {
			Self::Null => ValueKind::Null,
			Self::Bool(_) => ValueKind::Bool,
			Self::Number(_) => ValueKind::Number,
			Self::String(_) => ValueKind::String,
			Self::Array(_) => ValueKind::Array,
			Self::Object(_) => ValueKind::Object,
			Self::Secret(_) => ValueKind::Secret,
			Self::Computed(_) => ValueKind::Computed,
			Self::Output(_) => ValueKind::Output,
		}
	}

	/// Whether this is [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Whether this is one of the marker variants.
	pub fn is_marker(&self) -> bool {
		matches!(self, Self::Secret(_) | Self::Computed(_) | Self::Output(_))
	}

	/// Borrow a boolean scalar.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Borrow a numeric scalar.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(value) => Some(*value),
			_ => None,
		}
	}

	/// Borrow a string scalar.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Borrow array elements.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Borrow object entries.
	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Self::Object(entries) => Some(entries),
			_ => None,
		}
	}

	/// Mutably borrow object entries.
	pub fn as_object_mut(&mut self) -> Option<&mut Object> {
		match self {
			Self::Object(entries) => Some(entries),
			_ => None,
		}
	}

	/// Whether any marker occurs anywhere in this tree.
	pub fn contains_markers(&self) -> bool {
		match self {
			Self::Secret(_) | Self::Computed(_) | Self::Output(_) => true,
			Self::Array(items) => items.iter().any(Self::contains_markers),
			Self::Object(entries) => entries.values().any(Self::contains_markers),
			Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => false,
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Number(value as f64)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::Array(value)
	}
}

impl From<Object> for Value {
	fn from(value: Object) -> Self {
		Self::Object(value)
	}
}

impl From<Output> for Value {
	fn from(value: Output) -> Self {
		Self::Output(value)
	}
}
