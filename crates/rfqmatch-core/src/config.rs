use crate::error::{Error, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;

/// Per-call matching parameters. Validated once at construction; downstream
/// scoring trusts these values and never re-checks them per candidate.
///
/// Weights are independent multipliers and are deliberately not normalized:
/// `hybrid = vector_weight * vector_similarity + lexical_weight * lexical_similarity`,
/// so callers control the scale of the final score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Maximum number of ranked results returned.
    pub top_k: usize,
    pub vector_weight: f32,
    pub lexical_weight: f32,
    /// Candidates with a hybrid score strictly below this are dropped.
    pub similarity_threshold: f32,
    /// Flat bonus added to the lexical score when both identifiers are
    /// present and equal after case folding, clamped to 1.0. Zero disables.
    pub exact_match_bonus: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            vector_weight: 0.7,
            lexical_weight: 0.3,
            similarity_threshold: 0.6,
            exact_match_bonus: 0.1,
        }
    }
}

impl MatchConfig {
    pub fn new(
        top_k: usize,
        vector_weight: f32,
        lexical_weight: f32,
        similarity_threshold: f32,
    ) -> Result<Self> {
        let config = Self {
            top_k,
            vector_weight,
            lexical_weight,
            similarity_threshold,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be at least 1".into()));
        }
        for (label, weight) in [
            ("vector_weight", self.vector_weight),
            ("lexical_weight", self.lexical_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{label} must be finite and non-negative, got {weight}"
                )));
            }
        }
        if !self.similarity_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.similarity_threshold)
        {
            return Err(Error::InvalidConfig(format!(
                "similarity_threshold must be in [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if !self.exact_match_bonus.is_finite() || !(0.0..=1.0).contains(&self.exact_match_bonus) {
            return Err(Error::InvalidConfig(format!(
                "exact_match_bonus must be in [0, 1], got {}",
                self.exact_match_bonus
            )));
        }
        Ok(())
    }
}

/// Layered configuration: `config.toml` + `config.<env>.toml` selected by
/// `RUST_ENV` + `APP_*` environment variables, last writer wins.
pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }
}
