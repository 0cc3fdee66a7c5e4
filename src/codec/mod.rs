pub mod engine;

pub use engine::{StreamCodec, MAX_ENCODED_BLOCK_SIZE};

use crate::error::Result;
use crate::types::{PaddingPolicy, Sink};

/// Block arithmetic for one specific alphabet: fixed block sizes and the
/// per-block encode/decode primitives. The engine drives these one block or
/// tail at a time; a codec never sees more than one block per call.
///
/// Both block sizes must be nonzero and `ENCODED_BLOCK_SIZE` must not exceed
/// [`MAX_ENCODED_BLOCK_SIZE`]; the engine treats a breach as a collaborator
/// bug and panics rather than returning an error.
pub trait Codec {
    /// Bytes in one full binary block (3 for base64, 5 for base32).
    const BINARY_BLOCK_SIZE: usize;
    /// Symbols in one full encoded block (4 for base64, 8 for base32).
    const ENCODED_BLOCK_SIZE: usize;

    /// Encode one full binary block of `BINARY_BLOCK_SIZE` bytes into
    /// `ENCODED_BLOCK_SIZE` symbols.
    fn encode_block<R: Sink<u8>, S>(encoded: &mut R, state: &mut S, block: &[u8]);

    /// Encode a strictly-partial trailing block
    /// (`1..BINARY_BLOCK_SIZE` bytes), without padding.
    fn encode_tail<R: Sink<u8>, S>(encoded: &mut R, state: &mut S, tail: &[u8]);

    /// Append filler symbols widening a tail of `tail_len` binary bytes to
    /// the full encoded block width. Only invoked when the variant
    /// generates padding.
    fn pad<R: Sink<u8>, S>(encoded: &mut R, state: &mut S, tail_len: usize);

    /// Decode one full block of `ENCODED_BLOCK_SIZE` symbol indexes into
    /// `BINARY_BLOCK_SIZE` bytes.
    fn decode_block<R: Sink<u8>, S>(binary: &mut R, state: &mut S, index_block: &[u8])
        -> Result<()>;

    /// Decode a strictly-partial trailing block of `1..ENCODED_BLOCK_SIZE`
    /// symbol indexes. May reject counts the alphabet cannot produce (a
    /// lone base64 symbol carries fewer bits than a byte).
    fn decode_tail<R: Sink<u8>, S>(binary: &mut R, state: &mut S, indexes: &[u8]) -> Result<()>;
}

/// One alphabet dialect's rules: padding policy, symbol classification,
/// ignorable characters and terminators. Independent of the block-size
/// arithmetic, so one [`Codec`] serves several dialects.
///
/// Classification works on symbol indexes: `index_of` maps a raw input byte
/// either to a data index (`0..alphabet size`) or to a dialect-chosen
/// sentinel that the predicates recognize. Index 0 must denote a data
/// symbol. Padding and end-of-input markers must also classify as special
/// characters so the main scan stops on them.
pub trait CodecVariant {
    /// Padding stance; `requires_padding`/`generates_padding` derive from it.
    const PADDING: PaddingPolicy;

    /// Classify one input byte. `None` rejects the byte outright and
    /// surfaces from decode as an invalid-symbol error.
    fn index_of(symbol: u8) -> Option<u8>;

    /// Skipped without consuming an index slot (e.g. embedded line breaks).
    fn should_ignore(index: u8) -> bool;

    /// Stops the main scan (padding or explicit terminator).
    fn is_special_character(index: u8) -> bool;

    /// Filler symbol closing a padded final block.
    fn is_padding_symbol(index: u8) -> bool;

    /// Explicit end-of-input marker, also honored inside the padding run.
    fn is_eof(index: u8) -> bool;
}
