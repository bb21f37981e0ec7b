use std::io::Read;
use std::path::Path;

use propcodec::codec::{Object, Value};

use crate::cmd::error::{CliError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 64 * 1024 * 1024;
/// zstd frame magic.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Read a JSON file, decompressing zstd frames first.
pub fn read_json(path: &Path) -> Result<serde_json::Value> {
	let raw = std::fs::read(path)?;
	let bytes = decode_bytes(raw)?;
	Ok(serde_json::from_slice(&bytes)?)
}

/// Read a wire value tree.
pub fn read_value(path: &Path) -> Result<Value> {
	let json = read_json(path)?;
	Ok(Value::from_json(&json)?)
}

/// Read a wire record object.
pub fn read_object(path: &Path) -> Result<Object> {
	match read_value(path)? {
		Value::Object(object) => Ok(object),
		_ => Err(CliError::NotAnObject {
			path: path.display().to_string(),
		}),
	}
}

/// Return raw bytes unchanged unless they start with a zstd frame.
pub fn decode_bytes(raw: Vec<u8>) -> Result<Vec<u8>> {
	if raw.starts_with(&ZSTD_MAGIC) {
		return decode_zstd(&raw);
	}
	Ok(raw)
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(CliError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
