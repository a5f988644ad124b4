use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, placeholder
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded = crate::env::expand_env(&raw)
            .map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if routing weights, ceilings, or the lookback
    /// window are out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        let routing = &self.routing;

        if routing.metrics_lookback.is_zero() {
            anyhow::bail!("routing.metrics_lookback must be greater than zero");
        }

        if routing.default_caller_id.trim().is_empty() {
            anyhow::bail!("routing.default_caller_id must not be blank");
        }

        let auto = &routing.auto;
        let weights = [
            ("price_weight", auto.price_weight),
            ("throughput_weight", auto.throughput_weight),
            ("latency_weight", auto.latency_weight),
            ("success_rate_weight", auto.success_rate_weight),
        ];
        for (name, value) in weights {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("routing.auto.{name} must be within [0, 1], got {value}");
            }
        }
        if (auto.weight_sum() - 1.0).abs() > 1e-6 {
            anyhow::bail!(
                "routing.auto weights must sum to 1.0, got {}",
                auto.weight_sum()
            );
        }

        let ceilings = [
            ("price_ceiling", auto.price_ceiling),
            ("throughput_ceiling", auto.throughput_ceiling),
            ("latency_ceiling_ms", auto.latency_ceiling_ms),
        ];
        for (name, value) in ceilings {
            if value <= 0.0 {
                anyhow::bail!("routing.auto.{name} must be positive, got {value}");
            }
        }

        Ok(())
    }
}
