//! Marker-preserving codec between wire property trees and typed records.
//!
//! A wire tree may carry secret, computed, and output markers at any depth. Decoding strips
//! those markers into a [`codec::ChangeList`], hands plain typed data to the caller, and the
//! paired [`codec::Encoder`] replays the markers onto the re-encoded tree.

/// Value trees, shape descriptors, the walker, and the decode/encode pipeline.
pub mod codec;
