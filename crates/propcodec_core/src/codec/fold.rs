use std::collections::BTreeSet;

use crate::codec::{Dependency, Output, Value};

impl Value {
	/// Whether the value is not known yet: a computed marker or an unknown output.
	pub fn is_computed(&self) -> bool {
		match self {
			Self::Computed(_) => true,
			Self::Output(output) => !output.known,
			_ => false,
		}
	}

	/// Whether the value is secret: a secret marker or a secret output.
	pub fn is_secret(&self) -> bool {
		match self {
			Self::Secret(_) => true,
			Self::Output(output) => output.secret,
			_ => false,
		}
	}

	/// Mark the value as not known, merging into an existing wrapper.
	pub fn make_computed(self) -> Value {
		match self {
			Self::Output(mut output) => {
				output.known = false;
				Self::Output(output)
			}
			Self::Secret(inner) => Self::Output(Output::unknown(*inner).with_secret(true)),
			computed @ Self::Computed(_) => computed,
			other => Self::computed(other),
		}
	}

	/// Mark the value as secret, merging into an existing wrapper.
	pub fn make_secret(self) -> Value {
		match self {
			Self::Computed(inner) => Self::Output(Output::unknown(*inner).with_secret(true)),
			Self::Output(mut output) => {
				output.secret = true;
				Self::Output(output)
			}
			secret @ Self::Secret(_) => secret,
			other => Self::secret(other),
		}
	}

	/// Drop the secret flag. A known output collapses to its element.
	pub fn make_public(self) -> Value {
		match self {
			Self::Output(mut output) => {
				output.secret = false;
				if output.known { *output.element } else { Self::Output(output) }
			}
			Self::Secret(inner) => *inner,
			other => other,
		}
	}

	/// Drop the computed flag. A public output collapses to its element.
	pub fn make_known(self) -> Value {
		match self {
			Self::Output(mut output) => {
				output.known = true;
				if output.secret { Self::Output(output) } else { *output.element }
			}
			Self::Computed(inner) => *inner,
			other => other,
		}
	}

	/// Collapse the wrapper chain at this position into at most one output.
	///
	/// Dependencies are unioned along the chain. The result is a plain value only when it
	/// is known, public, and has no dependencies.
	pub fn fold(self) -> Value {
		let mut known = true;
		let mut secret = false;
		let mut dependencies = BTreeSet::new();
		let mut current = self;
		loop {
			current = match current {
				Self::Secret(inner) => {
					secret = true;
					*inner
				}
				Self::Computed(inner) => {
					known = false;
					*inner
				}
				Self::Output(output) => {
					known &= output.known;
					secret |= output.secret;
					dependencies.extend(output.dependencies);
					*output.element
				}
				plain => break Self::finish_fold(plain, known, secret, dependencies),
			};
		}
	}

	fn finish_fold(element: Value, known: bool, secret: bool, dependencies: BTreeSet<Dependency>) -> Value {
		if known && !secret && dependencies.is_empty() {
			return element;
		}
		Self::Output(Output {
			element: Box::new(element),
			known,
			secret,
			dependencies,
		})
	}

	/// Fold every position of the tree.
	pub fn fold_all(self) -> Value {
		match self.fold() {
			Self::Array(items) => Self::Array(items.into_iter().map(Self::fold_all).collect()),
			Self::Object(entries) => Self::Object(entries.into_iter().map(|(key, item)| (key, item.fold_all())).collect()),
			Self::Output(mut output) => {
				output.element = Box::new(output.element.fold_all());
				Self::Output(output)
			}
			plain => plain,
		}
	}

	/// Structural equality modulo marker folding. Dependencies are not compared.
	pub fn deep_equals(&self, other: &Value) -> bool {
		let (left, right) = (self.clone().fold(), other.clone().fold());
		match (&left, &right) {
			(Self::Output(a), Self::Output(b)) => a.known == b.known && a.secret == b.secret && a.element.deep_equals(&b.element),
			(Self::Output(a), plain) | (plain, Self::Output(a)) => a.known && !a.secret && a.element.deep_equals(plain),
			(Self::Array(a), Self::Array(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.deep_equals(y)),
			(Self::Object(a), Self::Object(b)) => {
				a.len() == b.len() && a.iter().all(|(key, x)| b.get(key).is_some_and(|y| x.deep_equals(y)))
			}
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Number(a), Self::Number(b)) => a == b,
			(Self::String(a), Self::String(b)) => a == b,
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests;
