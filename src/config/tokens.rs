//! Credential token collection and normalization.

use crate::ConfigError;
use std::collections::HashSet;

/// Environment channels consulted for credential cookies, in order.
const TOKEN_CHANNELS: [&str; 4] = ["ms_token", "ms_tokens", "MS_TOKEN", "MS_TOKENS"];

/// Raw credential material gathered once at startup.
///
/// Collecting the channels into an explicit struct keeps the rest of the
/// pipeline free of ambient environment reads.
#[derive(Debug, Clone, Default)]
pub struct CredentialSources {
    values: Vec<String>,
}

impl CredentialSources {
    /// Reads every known token channel from the environment.
    pub fn from_env() -> Self {
        let values = TOKEN_CHANNELS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .filter(|value| !value.is_empty())
            .collect();
        Self { values }
    }

    /// Builds sources from in-memory values, mainly for tests.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// A deduplicated, order-preserving set of credential tokens.
///
/// Guaranteed non-empty: construction fails with
/// [`ConfigError::NoCredentials`] otherwise.
#[derive(Debug, Clone)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    /// Splits each source on whitespace, commas, and semicolons, trims the
    /// pieces, and drops empties and duplicates. First appearance wins the
    /// position of a duplicated token.
    pub fn from_sources(sources: &CredentialSources) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut tokens = Vec::new();

        for value in &sources.values {
            for piece in value.split(|c: char| c.is_whitespace() || c == ',' || c == ';') {
                let trimmed = piece.trim();
                if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
                    continue;
                }
                tokens.push(trimmed.to_string());
            }
        }

        if tokens.is_empty() {
            return Err(ConfigError::NoCredentials);
        }

        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_split_on_mixed_separators() {
        let sources = CredentialSources::from_values(["alpha, beta;gamma\ndelta"]);
        let tokens = TokenSet::from_sources(&sources).unwrap();
        assert_eq!(tokens.tokens(), &["alpha", "beta", "gamma", "delta"]);
    }

    #[test]
    fn test_duplicates_keep_first_appearance() {
        let sources = CredentialSources::from_values(["one,two", "two;three,one"]);
        let tokens = TokenSet::from_sources(&sources).unwrap();
        assert_eq!(tokens.tokens(), &["one", "two", "three"]);
    }

    #[test]
    fn test_whitespace_only_pieces_are_dropped() {
        let sources = CredentialSources::from_values(["  tok1  ,, ;\t", " tok2 "]);
        let tokens = TokenSet::from_sources(&sources).unwrap();
        assert_eq!(tokens.tokens(), &["tok1", "tok2"]);
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_empty_sources_fail() {
        let sources = CredentialSources::from_values(Vec::<String>::new());
        let result = TokenSet::from_sources(&sources);
        assert!(matches!(result, Err(ConfigError::NoCredentials)));
    }

    #[test]
    fn test_all_blank_sources_fail() {
        let sources = CredentialSources::from_values(["   ", ",;,", "\n\n"]);
        let result = TokenSet::from_sources(&sources);
        assert!(matches!(result, Err(ConfigError::NoCredentials)));
    }
}
