use propcodec::codec::{CodecError, MappingError};
use thiserror::Error;

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Codec-level failure: schema, tag, path, or wire value problems.
	#[error(transparent)]
	Codec(#[from] CodecError),
	/// Field problems found while decoding or encoding.
	#[error("{0}")]
	Mapping(#[from] MappingError),
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON syntax failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Decompressed input exceeded the configured safety limit.
	#[error("decompressed input exceeds limit: {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed decompressed size.
		limit: usize,
	},
	/// Record input was not a JSON object.
	#[error("{path}: input is not an object")]
	NotAnObject {
		/// Input file path.
		path: String,
	},
	/// Neither `--root` nor the schema document named a root record.
	#[error("no root record: pass --root or set \"root\" in the schema document")]
	MissingRoot,
}
