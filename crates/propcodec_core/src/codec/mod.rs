mod asset;
mod change;
mod convert;
mod decode;
mod encode;
mod error;
mod fold;
mod path;
mod roundtrip;
mod shape;
mod tag;
mod typed;
mod value;
mod walk;
mod wire;

/// Asset-or-archive union and its reserved signature keys.
pub use asset::{ARCHIVE_SIG, ARCHIVE_SIGNATURE, ASSET_SIG, ASSET_SIGNATURE, AssetKind, AssetOrArchive, SIG_KEY};
/// Change records and their replay.
pub use change::{Change, ChangeList, EmptyAction};
/// Conversions between host types and typed values.
pub use convert::{FromTyped, IntoTyped};
/// Structural decoding options.
pub use decode::DecodeOptions;
/// Error and result aliases.
pub use error::{CodecError, FieldError, MappingError, Result};
/// Property path parser and tree navigation.
pub use path::{PathStep, PropertyPath};
/// Decode entry points and the paired encoder.
pub use roundtrip::{Decoded, Encoder, decode, decode_config, decode_tolerate_missing, decode_with};
/// Shape descriptors and schema construction.
pub use shape::{FieldShape, RecordId, RecordShape, Schema, SchemaBuilder, Shape};
/// Field tag mini-language.
pub use tag::FieldTag;
/// Typed values produced by the structural decoder.
pub use typed::{FieldValue, Record, Typed};
/// Wire value tree.
pub use value::{Dependency, Object, Output, Value, ValueKind};
/// Marker-stripping walker.
pub use walk::simplify;
/// Reserved wire sentinels used by the JSON mapping.
pub use wire::{OUTPUT_SIG, SECRET_SIG, UNKNOWN_VALUE};
