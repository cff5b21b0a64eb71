//! # huffpack
//!
//! A lossless byte-stream compressor based on static Huffman coding. The
//! whole input is scanned once for byte frequencies, an optimal prefix-code
//! tree is built, and the input is re-emitted as a packed bitstream behind a
//! self-describing header. Decoding rebuilds the identical tree from the
//! header and walks it bit by bit, so artifacts round-trip exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! let data = b"the quick brown fox jumps over the lazy dog";
//!
//! let artifact = huffpack::encode(data)?;
//! let restored = huffpack::decode(&artifact)?;
//!
//! assert_eq!(restored, data.as_slice());
//! # Ok::<(), huffpack::CodecError>(())
//! ```

pub mod codec;
pub mod error;
pub mod freq;
pub mod tree;

// Internal plumbing - not part of the public API
mod bits;
mod code;
mod container;
mod heap;

// Re-export the two operations and the error type for convenience
pub use codec::{decode, encode};
pub use error::CodecError;
