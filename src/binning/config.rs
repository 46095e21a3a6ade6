//! Construction-time configuration of the binning engine.

/// How a lookup treats malformed input (an empty coordinate vector or an
/// abnormal value).
///
/// A value that is merely outside the binned range always yields "no bin",
/// whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputValidation {
    /// Malformed input is logged and yields "no bin".
    #[default]
    Permissive,
    /// Malformed input is returned as an error.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinningConfig {
    pub validation: InputValidation,
}

impl BinningConfig {
    pub fn strict() -> Self {
        Self {
            validation: InputValidation::Strict,
        }
    }

    pub fn permissive() -> Self {
        Self {
            validation: InputValidation::Permissive,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.validation == InputValidation::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_permissive() {
        let cfg = BinningConfig::default();
        assert_eq!(cfg, BinningConfig::permissive());
        assert!(!cfg.is_strict());
        assert!(BinningConfig::strict().is_strict());
    }
}
