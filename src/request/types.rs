//! Request description

use crate::types::{ApiKey, RequestIdentity};

/// One endpoint call: where it goes, who makes it and with which parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    base: String,
    path: String,
    credential: Option<ApiKey>,
    params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a request for `path` relative to `base`
    pub fn new(base: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            path: path.into(),
            credential: None,
            params: Vec::new(),
        }
    }

    /// Attach a credential
    #[must_use]
    pub fn credential(mut self, key: &ApiKey) -> Self {
        self.credential = Some(key.clone());
        self
    }

    /// Add one parameter; repeated keys are kept
    #[must_use]
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a parameter only when a value is present
    #[must_use]
    pub fn opt_param(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Add several parameters
    #[must_use]
    pub fn params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.params.extend(params);
        self
    }

    /// Relative path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Absolute endpoint URL without query
    pub fn url(&self) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), self.path)
    }

    /// Credential parameters followed by the call's own, in order
    pub fn all_params(&self) -> Vec<(String, String)> {
        self.credential
            .iter()
            .flat_map(ApiKey::params)
            .chain(self.params.iter().cloned())
            .collect()
    }

    /// Cache identity of this call
    pub fn identity(&self) -> RequestIdentity {
        RequestIdentity::new(self.base.as_str(), self.path.as_str(), self.all_params())
    }
}
