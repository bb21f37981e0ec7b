use crate::codec::{CodecError, Result};

/// Parsed field annotation: wire key plus presence and provider hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTag {
	/// Wire key, or the host field name when the field is internal.
	pub name: Box<str>,
	/// Field may be absent.
	pub optional: bool,
	/// Field is never read from or written to the wire.
	pub internal: bool,
	/// Provider hint that the value is sensitive. Informational for the codec.
	pub secret: bool,
	/// Provider hint that changing this field forces replacement.
	pub replace_on_changes: bool,
}

impl FieldTag {
	/// Required wire field.
	pub fn required(name: &str) -> Self {
		Self {
			name: name.into(),
			optional: false,
			internal: false,
			secret: false,
			replace_on_changes: false,
		}
	}

	/// Optional wire field.
	pub fn optional(name: &str) -> Self {
		Self { optional: true, ..Self::required(name) }
	}

	/// Host-only field, skipped by decode and encode.
	pub fn internal(name: &str) -> Self {
		Self { internal: true, ..Self::required(name) }
	}

	/// Mark the provider secret hint.
	pub fn with_secret(mut self) -> Self {
		self.secret = true;
		self
	}

	/// Parse a `name[,flag...]` wire tag and a `flag[,flag...]` provider tag.
	///
	/// A missing or empty wire tag makes the field internal. Unknown flags are ignored.
	pub fn parse(host_name: &str, wire: Option<&str>, provider: Option<&str>) -> Result<Self> {
		let wire = match wire {
			Some(text) if !text.is_empty() => text,
			_ => {
				if provider.is_some() {
					return Err(CodecError::ProviderTagWithoutWireTag { field: host_name.to_owned() });
				}
				return Ok(Self::internal(host_name));
			}
		};

		let mut parts = wire.split(',');
		let name = parts.next().unwrap_or_default().trim();
		if name.is_empty() {
			return Err(CodecError::InvalidFieldTag {
				field: host_name.to_owned(),
				tag: wire.to_owned(),
				reason: "empty wire name",
			});
		}

		let mut tag = Self::required(name);
		for flag in parts {
			if flag.trim() == "optional" {
				tag.optional = true;
			}
		}

		for flag in provider.unwrap_or_default().split(',') {
			match flag.trim() {
				"secret" => tag.secret = true,
				"replaceOnChanges" => tag.replace_on_changes = true,
				_ => {}
			}
		}

		Ok(tag)
	}
}
