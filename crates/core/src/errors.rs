use thiserror::Error;

/// Failures reaching into the component/rule catalog. A missing entry is
/// not an error at this level; lookups return `Ok(None)` so callers can
/// decide whether the component was mandatory.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("catalog data could not be decoded: {0}")]
    Decode(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EstimationError {
    #[error("invalid panel configuration: {0}")]
    Validation(String),
    #[error("mandatory component `{code}` is missing from the catalog")]
    MandatoryComponentMissing { code: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl EstimationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogError, EstimationError};

    #[test]
    fn mandatory_lookup_failure_is_distinguishable_from_bad_config() {
        let missing = EstimationError::MandatoryComponentMissing { code: "ENC-800".to_string() };
        let invalid = EstimationError::validation("feeder count out of range");

        assert!(matches!(missing, EstimationError::MandatoryComponentMissing { .. }));
        assert!(matches!(invalid, EstimationError::Validation(_)));
        assert_ne!(missing, invalid);
    }

    #[test]
    fn catalog_transport_failure_propagates_transparently() {
        let error = EstimationError::from(CatalogError::Unavailable("pool closed".to_string()));
        assert_eq!(error.to_string(), "catalog unavailable: pool closed");
    }
}
