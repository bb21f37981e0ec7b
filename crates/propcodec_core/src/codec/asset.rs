use crate::codec::{Object, Value};

/// Object key whose string value names the special kind of an object.
pub const SIG_KEY: &str = "4dabf18193072939515e22adb298388d";
/// Signature value identifying an asset object.
pub const ASSET_SIG: &str = "c44067f5952c0a294b673a41bacd8c17";
/// Signature value identifying an archive object.
pub const ARCHIVE_SIG: &str = "0def7320c3a5731c473e5ecbe6d01bc7";
/// Reserved union key holding the asset arm of an asset-or-archive.
pub const ASSET_SIGNATURE: &str = "a9e28acb8ab501f883219e7c9f624fb6";
/// Reserved union key holding the archive arm of an asset-or-archive.
pub const ARCHIVE_SIGNATURE: &str = "195f3948f6769324d4661e1e245f3a4d";

/// Which arm of the union a signature-tagged object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
	/// Single file-like asset.
	Asset,
	/// Collection of assets.
	Archive,
}

impl AssetKind {
	/// Kind of a signature-tagged object, if it is an asset or archive.
	pub fn of(object: &Object) -> Option<Self> {
		match object.get(SIG_KEY).and_then(Value::as_str)? {
			ASSET_SIG => Some(Self::Asset),
			ARCHIVE_SIG => Some(Self::Archive),
			_ => None,
		}
	}

	/// Reserved union key for this arm.
	pub fn union_key(self) -> &'static str {
		match self {
			Self::Asset => ASSET_SIGNATURE,
			Self::Archive => ARCHIVE_SIGNATURE,
		}
	}

	/// Signature value carried under [`SIG_KEY`].
	pub fn signature(self) -> &'static str {
		match self {
			Self::Asset => ASSET_SIG,
			Self::Archive => ARCHIVE_SIG,
		}
	}
}

/// Typed asset-or-archive union. At most one arm is expected to be set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssetOrArchive {
	/// Asset object, including its signature entry.
	pub asset: Option<Object>,
	/// Archive object, including its signature entry.
	pub archive: Option<Object>,
}

impl AssetOrArchive {
	/// Union holding an asset.
	pub fn asset(object: Object) -> Self {
		Self { asset: Some(object), archive: None }
	}

	/// Union holding an archive.
	pub fn archive(object: Object) -> Self {
		Self { asset: None, archive: Some(object) }
	}

	/// Populated arm, or `None` when empty. Asset wins when both are set.
	pub fn kind(&self) -> Option<AssetKind> {
		match (&self.asset, &self.archive) {
			(Some(_), _) => Some(AssetKind::Asset),
			(None, Some(_)) => Some(AssetKind::Archive),
			(None, None) => None,
		}
	}

	/// Whether neither arm is set.
	pub fn is_empty(&self) -> bool {
		self.asset.is_none() && self.archive.is_none()
	}

	/// Whether both arms are set.
	pub fn is_dual(&self) -> bool {
		self.asset.is_some() && self.archive.is_some()
	}

	/// Union object keyed by the reserved arm keys.
	pub(crate) fn to_union_object(&self) -> Object {
		let mut out = Object::new();
		if let Some(asset) = &self.asset {
			out.insert(ASSET_SIGNATURE.to_owned(), Value::Object(asset.clone()));
		}
		if let Some(archive) = &self.archive {
			out.insert(ARCHIVE_SIGNATURE.to_owned(), Value::Object(archive.clone()));
		}
		out
	}
}

/// Wrap a bare signature-tagged object under its reserved union key.
pub(crate) fn wrap_asset_union(value: Value) -> Value {
	match value {
		Value::Object(object) => match AssetKind::of(&object) {
			Some(kind) => Value::object([(kind.union_key(), Value::Object(object))]),
			None => Value::Object(object),
		},
		other => other,
	}
}

/// Replace every union object with the asset or archive it holds.
///
/// # Panics
///
/// Panics when a union holds both arms or an arm carries an unknown signature.
pub(crate) fn flatten_assets(value: Value) -> Value {
	match value {
		Value::Object(object) => match unwrap_union(&object) {
			Some(inner) => Value::Object(inner),
			None => Value::Object(object.into_iter().map(|(key, item)| (key, flatten_assets(item))).collect()),
		},
		Value::Array(items) => Value::Array(items.into_iter().map(flatten_assets).collect()),
		Value::Secret(inner) => Value::Secret(Box::new(flatten_assets(*inner))),
		Value::Computed(inner) => Value::Computed(Box::new(flatten_assets(*inner))),
		Value::Output(mut output) => {
			output.element = Box::new(flatten_assets(*output.element));
			Value::Output(output)
		}
		scalar @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) => scalar,
	}
}

fn unwrap_union(object: &Object) -> Option<Object> {
	let asset = object.get(ASSET_SIGNATURE);
	let archive = object.get(ARCHIVE_SIGNATURE);
	if asset.is_some() && archive.is_some() {
		panic!("asset-or-archive holds both an asset and an archive");
	}

	let inner = asset.or(archive)?.as_object()?;
	let kind = inner.get(SIG_KEY)?.as_str()?;
	if kind != ASSET_SIG && kind != ARCHIVE_SIG {
		panic!("asset-or-archive holds an object of unknown kind {kind:?}");
	}
	Some(inner.clone())
}
