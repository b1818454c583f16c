//! Error taxonomy for discovery and regeneration.
//!
//! Probe misses (a tool not found, a banner not recognized) are not
//! errors: they surface as empty iterators or `unknown` identities.
//! Only configuration problems the user must fix are raised.

use thiserror::Error;

/// A user-facing configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("{name} environment variable is not defined")]
    MissingEnvVar {
        /// Name of the missing variable
        name: &'static str,
    },

    /// An option cannot be regenerated from its current state.
    ///
    /// Boolean actions have no environment fallback; an option that would
    /// need one cannot round-trip and must be surfaced, not guessed.
    #[error(
        "cannot regenerate {action} flag `{flag}` from environment variable `{env_name}`; \
         environment fallback is not supported for boolean options"
    )]
    UnsupportedFallback {
        /// The flag as it appears on the command line
        flag: String,
        /// The registered action name (`store_true` / `store_false`)
        action: &'static str,
        /// The environment variable that would have supplied the value
        env_name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_var_message() {
        let err = ConfigError::MissingEnvVar {
            name: "ANDROID_NDK_ROOT",
        };
        assert_eq!(
            err.to_string(),
            "ANDROID_NDK_ROOT environment variable is not defined"
        );
    }

    #[test]
    fn test_unsupported_fallback_names_the_flag() {
        let err = ConfigError::UnsupportedFallback {
            flag: "--check".to_string(),
            action: "store_true",
            env_name: "SLIPWAY_CHECK".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("--check"));
        assert!(message.contains("SLIPWAY_CHECK"));
        assert!(message.contains("store_true"));
    }
}
