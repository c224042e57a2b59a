//! Decode configuration.

/// Options that tighten container decoding.
///
/// The defaults accept everything the encoder produces and nothing more
/// is checked than the wire framing requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Byte-compare the four trailing container bytes against the terminator.
    /// When false only their presence is checked.
    pub verify_terminator: bool,
    /// Reject containers declaring more elements than this.
    pub max_elements: Option<usize>,
}

impl DecodeOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables terminator content verification.
    pub fn verify_terminator(mut self, verify: bool) -> Self {
        self.verify_terminator = verify;
        self
    }

    /// Sets the maximum element count accepted for a single container.
    pub fn max_elements(mut self, max: usize) -> Self {
        self.max_elements = Some(max);
        self
    }

    /// Strict options: terminator verified, no element limit.
    pub fn strict() -> Self {
        Self::new().verify_terminator(true)
    }
}
