//! The set of nodes polled on every evaluation.

use thiserror::Error;
use url::Url;

use crate::config::EndpointConfig;

/// A named node to query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    pub url: Url,
    pub local: bool,
}

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("endpoint '{name}' has invalid url: {source}")]
    InvalidUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },

    #[error("expected exactly one local endpoint, found {0}")]
    LocalCount(usize),
}

/// Ordered endpoint set: the local endpoint first, then trusted endpoints in
/// configuration order. Immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct EndpointSet {
    endpoints: Vec<Endpoint>,
}

impl EndpointSet {
    pub fn from_config(configs: &[EndpointConfig]) -> Result<Self, EndpointError> {
        let locals = configs.iter().filter(|c| c.local).count();
        if locals != 1 {
            return Err(EndpointError::LocalCount(locals));
        }

        let mut endpoints = Vec::with_capacity(configs.len());
        for config in configs {
            let url = Url::parse(&config.url).map_err(|source| EndpointError::InvalidUrl {
                name: config.name.clone(),
                source,
            })?;
            endpoints.push(Endpoint {
                name: config.name.clone(),
                url,
                local: config.local,
            });
        }
        // Stable: trusted endpoints keep their relative order.
        endpoints.sort_by_key(|e| !e.local);

        Ok(Self { endpoints })
    }

    pub fn local(&self) -> &Endpoint {
        &self.endpoints[0]
    }

    pub fn trusted(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter().skip(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_is_first() {
        let set = EndpointSet::from_config(&[
            EndpointConfig::trusted("mainnet", "http://a.example"),
            EndpointConfig::local("me", "http://localhost:8899"),
            EndpointConfig::trusted("cluster", "http://b.example"),
        ])
        .unwrap();

        assert_eq!(set.local().name, "me");
        let trusted: Vec<_> = set.trusted().map(|e| e.name.as_str()).collect();
        assert_eq!(trusted, vec!["mainnet", "cluster"]);
        assert_eq!(set.iter().count(), 3);
    }

    #[test]
    fn test_requires_one_local() {
        let err = EndpointSet::from_config(&[EndpointConfig::trusted("a", "http://a.example")])
            .unwrap_err();
        assert!(matches!(err, EndpointError::LocalCount(0)));
    }

    #[test]
    fn test_invalid_url() {
        let err = EndpointSet::from_config(&[EndpointConfig::local("me", "not a url")]).unwrap_err();
        assert!(err.to_string().starts_with("endpoint 'me' has invalid url"));
    }
}
