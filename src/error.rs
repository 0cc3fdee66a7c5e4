use thiserror::Error;

/// Errors reported while decoding block-encoded text.
///
/// The engine itself only ever constructs [`DecodeError::InvalidPadding`];
/// the other variants originate from the codec collaborators (a variant
/// rejecting a symbol, a codec rejecting an impossible tail length) and are
/// passed through unchanged. Broken collaborator arithmetic is not an error
/// kind at all: it panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid padding: {message}")]
    InvalidPadding { message: &'static str },

    #[error("invalid symbol 0x{symbol:02x} at position {position}")]
    InvalidSymbol { symbol: u8, position: usize },

    #[error("invalid length: {message}")]
    InvalidLength { message: &'static str },
}

// Helper constructors for common error patterns
impl DecodeError {
    pub fn invalid_padding(message: &'static str) -> Self {
        Self::InvalidPadding { message }
    }

    pub fn invalid_symbol(symbol: u8, position: usize) -> Self {
        Self::InvalidSymbol { symbol, position }
    }

    pub fn invalid_length(message: &'static str) -> Self {
        Self::InvalidLength { message }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_error_display() {
        let err = DecodeError::invalid_padding("too many padding characters");
        assert_eq!(err.to_string(), "invalid padding: too many padding characters");
    }

    #[test]
    fn test_symbol_error_display() {
        let err = DecodeError::invalid_symbol(b'!', 4);
        assert_eq!(err.to_string(), "invalid symbol 0x21 at position 4");
    }

    #[test]
    fn test_length_error_display() {
        let err = DecodeError::invalid_length("tail of one symbol cannot hold a byte");
        assert_eq!(err.to_string(), "invalid length: tail of one symbol cannot hold a byte");
    }
}
