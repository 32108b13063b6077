use super::service::AppConfig;
use crate::core::errors::ApiError;

/// Reject configurations the pipeline cannot run with.
pub fn validate_config(config: &AppConfig) -> Result<(), ApiError> {
    let threshold = config.faq.similarity_threshold;
    if !(0.0..=1.0).contains(&threshold) || threshold.is_nan() {
        return Err(ApiError::BadRequest(format!(
            "faq.similarity_threshold must be within [0.0, 1.0], got {}",
            threshold
        )));
    }

    if config.llm.model.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "llm.model must not be empty".to_string(),
        ));
    }

    let base_url = config.llm.base_url.trim();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ApiError::BadRequest(format!(
            "llm.base_url must be an http(s) URL, got {:?}",
            config.llm.base_url
        )));
    }

    if !(0.0..=2.0).contains(&config.llm.temperature) {
        return Err(ApiError::BadRequest(format!(
            "llm.temperature must be within [0.0, 2.0], got {}",
            config.llm.temperature
        )));
    }

    if config.llm.connect_timeout_secs == 0 || config.llm.request_timeout_secs == 0 {
        return Err(ApiError::BadRequest(
            "llm timeouts must be at least one second".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut config = AppConfig::default();
        config.faq.similarity_threshold = 1.5;
        assert!(validate_config(&config).is_err());

        config.faq.similarity_threshold = -0.1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_empty_model() {
        let mut config = AppConfig::default();
        config.llm.model = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = AppConfig::default();
        config.llm.base_url = "ftp://example.com".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_zero_timeouts() {
        let mut config = AppConfig::default();
        config.llm.connect_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }
}
