/// Decode command: typed value and field errors.
pub mod decode;
/// CLI error type.
pub mod error;
/// Marker normal-form command.
pub mod fold;
/// Input file loading.
pub mod input;
/// Decode-then-encode command.
pub mod roundtrip;
/// JSON schema documents.
pub mod schema_doc;
/// Shared rendering helpers.
pub mod util;
/// Marker-stripping command: stripped tree and change list.
pub mod walk;
