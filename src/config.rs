use crate::constants::catalog::DEFAULT_TOP_N;
use crate::constants::source::DEFAULT_PAGE_SIZE;
use crate::errors::CatalogError;

/// Runtime settings for catalog queries issued through `Catalog`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Row count for the most-viewed-videos ranking.
    pub top_n: usize,
    /// Records requested per source page while loading.
    pub page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogConfig {
    /// Override the most-viewed ranking size.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Override the source page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Reject settings that no query can honor.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.top_n == 0 {
            return Err(CatalogError::Configuration(
                "top_n must be a positive integer".into(),
            ));
        }
        if self.page_size == 0 {
            return Err(CatalogError::Configuration(
                "page_size must be a positive integer".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_five_rows() {
        let config = CatalogConfig::default();
        assert_eq!(config.top_n, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let err = CatalogConfig::default().with_top_n(0).validate();
        assert!(matches!(err, Err(CatalogError::Configuration(_))));
        let err = CatalogConfig::default().with_page_size(0).validate();
        assert!(matches!(err, Err(CatalogError::Configuration(_))));
    }
}
