use std::fmt;

use crate::codec::{CodecError, Result, Value};

/// One step of a property path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathStep {
	/// Select an object entry by key.
	Key(String),
	/// Select an array element by zero-based index.
	Index(usize),
}

/// Position inside a value tree.
///
/// Navigation looks through secret, computed, and output markers, so a path recorded
/// against a stripped tree still resolves after markers were re-applied above it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PropertyPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl PropertyPath {
	/// Path addressing the tree root.
	pub fn root() -> Self {
		Self::default()
	}

	/// Whether this path addresses the tree root.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}

	/// Number of steps.
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	/// Whether the path has no steps.
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	/// Copy of this path extended by an object key.
	pub fn child_key(&self, key: &str) -> Self {
		let mut steps = Vec::with_capacity(self.steps.len() + 1);
		steps.extend_from_slice(&self.steps);
		steps.push(PathStep::Key(key.to_owned()));
		Self { steps }
	}

	/// Copy of this path extended by an array index.
	pub fn child_index(&self, index: usize) -> Self {
		let mut steps = Vec::with_capacity(self.steps.len() + 1);
		steps.extend_from_slice(&self.steps);
		steps.push(PathStep::Index(index));
		Self { steps }
	}

	/// Parse dotted key syntax with `[index]` and `["quoted key"]` selectors.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || CodecError::InvalidPropertyPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() && is_key_byte(bytes[idx]) {
				idx += 1;
			}

			if idx > start {
				steps.push(PathStep::Key(input[start..idx].to_owned()));
			} else if !steps.is_empty() || bytes[idx] != b'[' {
				return Err(invalid());
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				if bytes.get(idx) == Some(&b'"') {
					idx += 1;
					let mut key = String::new();
					loop {
						match input[idx..].chars().next() {
							None => return Err(invalid()),
							Some('"') => {
								idx += 1;
								break;
							}
							Some('\\') => {
								idx += 1;
								match input[idx..].chars().next() {
									Some(ch @ ('"' | '\\')) => {
										key.push(ch);
										idx += 1;
									}
									_ => return Err(invalid()),
								}
							}
							Some(ch) => {
								key.push(ch);
								idx += ch.len_utf8();
							}
						}
					}
					steps.push(PathStep::Key(key));
				} else {
					let n_start = idx;
					while idx < bytes.len() && bytes[idx].is_ascii_digit() {
						idx += 1;
					}
					if idx == n_start {
						return Err(invalid());
					}
					let number = input[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
					steps.push(PathStep::Index(number));
				}

				if bytes.get(idx) != Some(&b']') {
					return Err(invalid());
				}
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(invalid());
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(invalid());
				}
			}
		}

		Ok(Self { steps })
	}

	/// Borrow the value this path addresses.
	pub fn get<'v>(&self, root: &'v Value) -> Option<&'v Value> {
		let mut current = root;
		for step in &self.steps {
			current = match (step, unwrap_markers(current)) {
				(PathStep::Key(key), Value::Object(entries)) => entries.get(key)?,
				(PathStep::Index(index), Value::Array(items)) => items.get(*index)?,
				_ => return None,
			};
		}
		Some(current)
	}

	/// Mutably borrow the value this path addresses.
	pub fn get_mut<'v>(&self, root: &'v mut Value) -> Option<&'v mut Value> {
		navigate_mut(&self.steps, root)
	}

	/// Store `value` at this path.
	///
	/// A missing final object key is inserted. Returns `false` when an intermediate step
	/// does not resolve or a final index is out of bounds.
	pub fn set(&self, root: &mut Value, value: Value) -> bool {
		let Some((last, parents)) = self.steps.split_last() else {
			*root = value;
			return true;
		};
		let Some(parent) = navigate_mut(parents, root) else {
			return false;
		};

		match (last, unwrap_markers_mut(parent)) {
			(PathStep::Key(key), Value::Object(entries)) => {
				entries.insert(key.clone(), value);
				true
			}
			(PathStep::Index(index), Value::Array(items)) => match items.get_mut(*index) {
				Some(slot) => {
					*slot = value;
					true
				}
				None => false,
			},
			_ => false,
		}
	}
}

impl From<Vec<PathStep>> for PropertyPath {
	fn from(steps: Vec<PathStep>) -> Self {
		Self { steps }
	}
}

impl fmt::Display for PropertyPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (pos, step) in self.steps.iter().enumerate() {
			match step {
				PathStep::Key(key) if is_plain_key(key) => {
					if pos > 0 {
						f.write_str(".")?;
					}
					f.write_str(key)?;
				}
				PathStep::Key(key) => {
					f.write_str("[\"")?;
					for ch in key.chars() {
						if matches!(ch, '"' | '\\') {
							f.write_str("\\")?;
						}
						write!(f, "{ch}")?;
					}
					f.write_str("\"]")?;
				}
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

fn navigate_mut<'v>(steps: &[PathStep], root: &'v mut Value) -> Option<&'v mut Value> {
	let mut current = root;
	for step in steps {
		current = match (step, unwrap_markers_mut(current)) {
			(PathStep::Key(key), Value::Object(entries)) => entries.get_mut(key)?,
			(PathStep::Index(index), Value::Array(items)) => items.get_mut(*index)?,
			_ => return None,
		};
	}
	Some(current)
}

fn unwrap_markers(value: &Value) -> &Value {
	match value {
		Value::Secret(inner) | Value::Computed(inner) => unwrap_markers(inner),
		Value::Output(output) => unwrap_markers(&output.element),
		other => other,
	}
}

fn unwrap_markers_mut(value: &mut Value) -> &mut Value {
	match value {
		Value::Secret(inner) | Value::Computed(inner) => unwrap_markers_mut(inner),
		Value::Output(output) => unwrap_markers_mut(&mut output.element),
		other => other,
	}
}

fn is_key_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'$')
}

fn is_plain_key(key: &str) -> bool {
	!key.is_empty() && key.bytes().all(is_key_byte)
}

#[cfg(test)]
mod tests;
