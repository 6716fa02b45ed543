//! Configuration types for model compilation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`CompileOptions`] - Controls which completion and identification
//!   passes run after parsing.
//!
//! # Example
//!
//! ```
//! # use semtab::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.compile().scale_loadings);
//! assert!(!config.compile().scale_latent_variances);
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Compilation section.
    #[serde(default)]
    compile: CompileOptions,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given compile options.
    pub fn new(compile: CompileOptions) -> Self {
        Self { compile }
    }

    /// Returns the compile options.
    pub fn compile(&self) -> &CompileOptions {
        &self.compile
    }
}

/// Toggles for the passes that complete and identify a parsed model.
///
/// Fields missing from a configuration file keep their default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    /// Add `x ~ 1` for every manifest variable without an intercept.
    pub add_intercepts: bool,
    /// Add `x ~~ x` for every variable without a variance.
    pub add_variances: bool,
    /// Covary every pair of exogenous latent variables.
    pub add_exogenous_latent_covariances: bool,
    /// Covary every pair of exogenous manifest variables.
    pub add_exogenous_manifest_covariances: bool,
    /// Identify latents by fixing their variance to `1.0`.
    pub scale_latent_variances: bool,
    /// Identify latents by fixing their first free loading to `1.0`.
    pub scale_loadings: bool,
}

impl CompileOptions {
    /// Options that run no pass after parsing.
    pub fn parse_only() -> Self {
        Self {
            add_intercepts: false,
            add_variances: false,
            add_exogenous_latent_covariances: false,
            add_exogenous_manifest_covariances: false,
            scale_latent_variances: false,
            scale_loadings: false,
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            add_intercepts: true,
            add_variances: true,
            add_exogenous_latent_covariances: true,
            add_exogenous_manifest_covariances: true,
            scale_latent_variances: false,
            scale_loadings: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [compile]
            scale_loadings = false
            scale_latent_variances = true
            "#,
        )
        .expect("valid config");

        let expected = CompileOptions {
            scale_loadings: false,
            scale_latent_variances: true,
            ..CompileOptions::default()
        };
        assert_eq!(*config.compile(), expected);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: AppConfig = toml::from_str("").expect("valid config");
        assert_eq!(*config.compile(), CompileOptions::default());
    }

    #[test]
    fn test_both_scaling_strategies_are_accepted() {
        let config: AppConfig = toml::from_str(
            r#"
            [compile]
            scale_latent_variances = true
            scale_loadings = true
            "#,
        )
        .expect("valid config");

        assert!(config.compile().scale_latent_variances);
        assert!(config.compile().scale_loadings);
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[compile]\nscale_everything = true");
        assert!(result.is_err());
    }
}
