use crate::config::Config;
use crate::error::{HwProfileError, Result, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_normalizer(config, &mut errors);
        Self::validate_extractor(config, &mut errors);
        Self::validate_output(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(HwProfileError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_normalizer(config: &Config, errors: &mut Vec<ValidationError>) {
        let rules = &config.normalizer;
        Self::validate_table("normalizer.boolean_fields", &rules.boolean_fields, errors);
        Self::validate_table("normalizer.numeric_fields", &rules.numeric_fields, errors);
        Self::validate_table(
            "normalizer.capability_boolean_keys",
            &rules.capability_boolean_keys,
            errors,
        );

        // Markers are matched as substrings, so leading/trailing spaces are
        // significant and only fully blank entries are rejected
        if rules
            .negative_capability_markers
            .iter()
            .any(|m| m.trim().is_empty())
        {
            errors.push(ValidationError::new(
                "normalizer.negative_capability_markers",
                "Markers cannot be blank",
            ));
        }

        if let Some(field) = rules
            .boolean_fields
            .iter()
            .find(|f| rules.numeric_fields.contains(f))
        {
            errors.push(ValidationError::new(
                "normalizer.numeric_fields",
                format!("Field '{}' is listed as both boolean and numeric", field),
            ));
        }
    }

    fn validate_extractor(config: &Config, errors: &mut Vec<ValidationError>) {
        let rules = &config.extractor;
        if rules.accelerator_keywords.is_empty() {
            errors.push(ValidationError::new(
                "extractor.accelerator_keywords",
                "At least one accelerator keyword is required",
            ));
        }
        Self::validate_table(
            "extractor.accelerator_keywords",
            &rules.accelerator_keywords,
            errors,
        );
        Self::validate_table(
            "extractor.skipped_pci_classes",
            &rules.skipped_pci_classes,
            errors,
        );
    }

    fn validate_output(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.output.parallelism == 0 {
            errors.push(ValidationError::new(
                "output.parallelism",
                "Parallelism must be greater than 0",
            ));
        }
    }

    fn validate_table(path: &str, entries: &[String], errors: &mut Vec<ValidationError>) {
        if entries.iter().any(|e| e.trim().is_empty()) {
            errors.push(ValidationError::new(path, "Entries cannot be empty"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_schema_version() {
        let mut config = Config::default();
        config.meta.schema_version = "2.0.0".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_zero_parallelism() {
        let mut config = Config::default();
        config.output.parallelism = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = Config::default();
        config.output.parallelism = 0;
        config.extractor.accelerator_keywords.clear();
        config.normalizer.numeric_fields.push("claimed".to_string());

        match ConfigValidator::validate(&config) {
            Err(HwProfileError::ConfigValidation { errors }) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_blank_marker_rejected() {
        let mut config = Config::default();
        config
            .normalizer
            .negative_capability_markers
            .push("  ".to_string());
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
