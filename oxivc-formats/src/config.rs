//! Decode configuration.

/// Limits and checks applied by [`decode_with_config`](crate::decode_with_config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Largest declared uncompressed length that will be allocated.
    pub max_output_len: usize,
    /// Reject nonzero padding bits at the end of Romchu sub-streams.
    pub verify_romchu_padding: bool,
}

impl DecodeConfig {
    /// Default output limit (256 MiB), well above any Virtual Console ROM.
    pub const DEFAULT_MAX_OUTPUT_LEN: usize = oxivc_core::window::DEFAULT_MAX_OUTPUT_LEN;

    /// Strict configuration.
    ///
    /// - 256 MiB output limit
    /// - Romchu padding verified
    pub const STRICT: Self = Self {
        max_output_len: Self::DEFAULT_MAX_OUTPUT_LEN,
        verify_romchu_padding: true,
    };

    /// Permissive configuration.
    ///
    /// - No output limit
    /// - Romchu padding ignored
    pub const PERMISSIVE: Self = Self {
        max_output_len: usize::MAX,
        verify_romchu_padding: false,
    };

    /// Create the default (strict) configuration.
    pub fn new() -> Self {
        Self::STRICT
    }

    /// Set the output limit.
    pub fn with_max_output_len(mut self, max_output_len: usize) -> Self {
        self.max_output_len = max_output_len;
        self
    }

    /// Enable or disable Romchu padding verification.
    pub fn with_romchu_padding_check(mut self, verify: bool) -> Self {
        self.verify_romchu_padding = verify;
        self
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_config() {
        let config = DecodeConfig::default();
        assert_eq!(config, DecodeConfig::STRICT);
        assert_eq!(config.max_output_len, 256 * 1024 * 1024);
        assert!(config.verify_romchu_padding);
    }

    #[test]
    fn test_builder() {
        let config = DecodeConfig::new()
            .with_max_output_len(1024)
            .with_romchu_padding_check(false);
        assert_eq!(config.max_output_len, 1024);
        assert!(!config.verify_romchu_padding);
        assert_ne!(config, DecodeConfig::PERMISSIVE);
    }
}
