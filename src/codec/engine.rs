use std::marker::PhantomData;

use super::{Codec, CodecVariant};
use crate::error::{DecodeError, Result};
use crate::types::Sink;

/// Widest encoded block the engine's scratch index buffer accommodates.
///
/// Covers the base16/32/64 family (base32 is the widest at 8 symbols). The
/// buffer is a fixed stack array because stable Rust cannot size a local
/// array from `C::ENCODED_BLOCK_SIZE`; a codec declaring a wider block
/// breaches the collaborator contract and panics.
pub const MAX_ENCODED_BLOCK_SIZE: usize = 8;

/// The stream codec engine: binds a [`Codec`]'s block arithmetic to a
/// [`CodecVariant`]'s dialect rules and owns everything in between — block
/// iteration, tail handling, padding validation and the closed-form size
/// calculations.
///
/// Zero-sized and never constructed; both collaborators dispatch statically.
pub struct StreamCodec<C, V> {
    _marker: PhantomData<(C, V)>,
}

impl<C: Codec, V: CodecVariant> StreamCodec<C, V> {
    /// Encode `binary` into `encoded`, padding the final partial block if
    /// the variant calls for it.
    ///
    /// Infallible toward the caller: every byte sequence of every length is
    /// valid input. `state` is threaded through to the codec unchanged.
    pub fn encode<R, S>(encoded: &mut R, state: &mut S, binary: &[u8])
    where
        R: Sink<u8>,
    {
        Self::check_block_constants();

        let mut blocks = binary.chunks_exact(C::BINARY_BLOCK_SIZE);
        for block in blocks.by_ref() {
            C::encode_block(encoded, state, block);
        }

        let tail = blocks.remainder();
        if !tail.is_empty() {
            // A remainder outside 1..BINARY_BLOCK_SIZE means the codec's
            // block arithmetic is broken, not that the input is bad.
            assert!(
                tail.len() < C::BINARY_BLOCK_SIZE,
                "impossible encode tail length {}",
                tail.len()
            );
            C::encode_tail(encoded, state, tail);
            if V::PADDING.generates_padding() {
                C::pad(encoded, state, tail.len());
            }
        }
    }

    /// Decode `encoded` into `binary`, rejecting malformed input.
    ///
    /// Scans symbol by symbol: ignorable characters are skipped, a special
    /// character (padding or terminator) stops the scan, and every full
    /// block is decoded as soon as its last symbol arrives. A padding run
    /// may only contain further padding symbols or an end-of-input marker,
    /// and may not extend past one block width; ignorable characters are
    /// not permitted inside it. With a padding-requiring variant the final
    /// block must come out block-aligned.
    ///
    /// On error the sink keeps whatever full blocks were already decoded;
    /// no rollback is performed.
    pub fn decode<R, S>(binary: &mut R, state: &mut S, encoded: &[u8]) -> Result<()>
    where
        R: Sink<u8>,
    {
        Self::check_block_constants();

        let block_width = C::ENCODED_BLOCK_SIZE;
        let mut index_block = [0u8; MAX_ENCODED_BLOCK_SIZE];
        // Symbols accumulated toward the current block.
        let mut pending = 0usize;

        let mut symbols = encoded.iter().copied().enumerate();
        for (position, symbol) in symbols.by_ref() {
            let index = match V::index_of(symbol) {
                Some(index) => index,
                None => return Err(DecodeError::invalid_symbol(symbol, position)),
            };
            index_block[pending] = index;
            if V::should_ignore(index) {
                continue;
            }
            if V::is_special_character(index) {
                break;
            }
            pending += 1;
            if pending == block_width {
                C::decode_block(binary, state, &index_block[..block_width])?;
                pending = 0;
            }
        }

        // The slot at the cursor holds whatever stopped the scan: a special
        // character, or the last classified symbol when input ran out.
        let mut filled = pending;
        if V::is_padding_symbol(index_block[pending]) {
            // Just read the first padding character; consume the rest of
            // the padding run.
            filled += 1;
            for (position, symbol) in symbols {
                let index = match V::index_of(symbol) {
                    Some(index) => index,
                    None => return Err(DecodeError::invalid_symbol(symbol, position)),
                };
                if V::is_eof(index) {
                    break;
                }
                if !V::is_padding_symbol(index) {
                    return Err(DecodeError::invalid_padding(
                        "unexpected symbol after the first padding character",
                    ));
                }
                filled += 1;
                if filled > block_width {
                    return Err(DecodeError::invalid_padding("too many padding characters"));
                }
            }
        }

        if pending > 0 {
            if V::PADDING.requires_padding() && filled != block_width {
                return Err(DecodeError::invalid_padding(
                    "encoded length is not a multiple of the block width",
                ));
            }
            assert!(
                pending < block_width,
                "impossible decode tail length {pending}"
            );
            C::decode_tail(binary, state, &index_block[..pending])?;
        }
        Ok(())
    }

    /// Exact encoded length for `binary_size` input bytes.
    ///
    /// With a padding-generating variant the result is always a whole
    /// number of encoded blocks; without one, a partial block still yields
    /// its trailing symbols.
    pub const fn encoded_size(binary_size: usize) -> usize {
        let b = C::BINARY_BLOCK_SIZE;
        let e = C::ENCODED_BLOCK_SIZE;
        if V::PADDING.generates_padding() {
            binary_size.div_ceil(b) * e
        } else {
            binary_size * e / b + if (binary_size * e) % b != 0 { 1 } else { 0 }
        }
    }

    /// Worst-case decoded length for `encoded_size` input symbols.
    ///
    /// Exact for padding-requiring variants (their input is always
    /// block-aligned). For unpadded variants this is a conservative upper
    /// bound that may overshoot by one byte, because an unpadded tail's
    /// exact decoded length cannot be known from the length alone; callers
    /// needing the exact size trim after decoding. This slack is part of
    /// the sizing contract, not a defect.
    pub const fn decoded_max_size(encoded_size: usize) -> usize {
        let b = C::BINARY_BLOCK_SIZE;
        let e = C::ENCODED_BLOCK_SIZE;
        if V::PADDING.requires_padding() {
            encoded_size * b / e
        } else {
            encoded_size * b / e + if (encoded_size * b) % e != 0 { 1 } else { 0 }
        }
    }

    /// Encode into a pre-sized `String`.
    pub fn encode_to_string(binary: &[u8]) -> String {
        let mut encoded = String::with_capacity(Self::encoded_size(binary.len()));
        Self::encode(&mut encoded, &mut (), binary);
        encoded
    }

    /// Decode into a pre-sized `Vec<u8>`.
    pub fn decode_to_vec(encoded: &[u8]) -> Result<Vec<u8>> {
        let mut binary = Vec::with_capacity(Self::decoded_max_size(encoded.len()));
        Self::decode(&mut binary, &mut (), encoded)?;
        Ok(binary)
    }

    fn check_block_constants() {
        assert!(
            C::BINARY_BLOCK_SIZE > 0 && C::ENCODED_BLOCK_SIZE > 0,
            "codec block sizes must be nonzero"
        );
        assert!(
            C::ENCODED_BLOCK_SIZE <= MAX_ENCODED_BLOCK_SIZE,
            "encoded block size {} exceeds the supported maximum {}",
            C::ENCODED_BLOCK_SIZE,
            MAX_ENCODED_BLOCK_SIZE
        );
    }
}
