//! Quote data validation.
//!
//! Validates provider quotes before they reach the board:
//! - Non-empty symbol, non-negative and sane price (hard)
//! - Zero price, sign disagreement between `change` and
//!   `changesPercentage`, missing market cap (soft)

use log::warn;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Validation severity levels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationSeverity {
    /// Hard failure - drop the quote.
    Hard,
    /// Soft warning - keep the quote but log warning.
    Soft,
}

/// Validation result details.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub message: String,
}

/// Quote validator configuration.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    /// Whether to reject quotes with negative prices.
    pub reject_negative_prices: bool,
    /// Maximum allowed price value (for sanity check).
    pub max_price: Option<f64>,
    /// Whether to warn when `change` and `changesPercentage` disagree in sign.
    pub warn_on_sign_mismatch: bool,
    /// Whether to warn on a zero market cap.
    pub warn_on_missing_market_cap: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            reject_negative_prices: true,
            max_price: Some(1_000_000_000.0),
            warn_on_sign_mismatch: true,
            // FMP omits it for many small caps
            warn_on_missing_market_cap: false,
        }
    }
}

/// Quote data validator.
#[derive(Clone, Debug, Default)]
pub struct QuoteValidator {
    config: ValidatorConfig,
}

impl QuoteValidator {
    /// Create a new validator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Every issue found on `quote`, hard and soft.
    pub fn issues(&self, quote: &Quote) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        self.validate_symbol(quote, &mut issues);
        self.validate_price(quote, &mut issues);
        self.validate_change(quote, &mut issues);
        self.validate_market_cap(quote, &mut issues);
        issues
    }

    /// Validate a quote.
    ///
    /// Returns Ok(()) if the quote is usable. Warnings are logged but do not
    /// cause rejection.
    pub fn validate(&self, quote: &Quote) -> Result<(), MarketDataError> {
        let issues = self.issues(quote);

        let errors: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Hard)
            .map(|i| i.message.as_str())
            .collect();

        if !errors.is_empty() {
            return Err(MarketDataError::ValidationFailed {
                message: format!("{}: {}", quote.symbol, errors.join("; ")),
            });
        }

        for issue in issues.iter().filter(|i| i.severity == ValidationSeverity::Soft) {
            warn!("Quote validation warning for {}: {}", quote.symbol, issue.message);
        }

        Ok(())
    }

    /// Validate all quotes in a batch.
    ///
    /// Returns a tuple of (valid_quotes, invalid_quotes_with_errors).
    pub fn validate_batch(&self, quotes: Vec<Quote>) -> (Vec<Quote>, Vec<(Quote, MarketDataError)>) {
        let mut valid = Vec::with_capacity(quotes.len());
        let mut invalid = Vec::new();

        for quote in quotes {
            match self.validate(&quote) {
                Ok(()) => valid.push(quote),
                Err(e) => invalid.push((quote, e)),
            }
        }

        (valid, invalid)
    }

    fn validate_symbol(&self, quote: &Quote, issues: &mut Vec<ValidationIssue>) {
        if quote.symbol.trim().is_empty() {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Hard,
                message: "Empty symbol".to_string(),
            });
        }
    }

    fn validate_price(&self, quote: &Quote, issues: &mut Vec<ValidationIssue>) {
        if self.config.reject_negative_prices && quote.price < 0.0 {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Hard,
                message: format!("Negative price: {}", quote.price),
            });
        }

        if let Some(max) = self.config.max_price {
            if quote.price > max {
                issues.push(ValidationIssue {
                    severity: ValidationSeverity::Hard,
                    message: format!("Price {} exceeds maximum {}", quote.price, max),
                });
            }
        }

        // Suspended shares report zero
        if quote.price == 0.0 {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Soft,
                message: "Zero price".to_string(),
            });
        }
    }

    fn validate_change(&self, quote: &Quote, issues: &mut Vec<ValidationIssue>) {
        if !self.config.warn_on_sign_mismatch {
            return;
        }
        if quote.change * quote.changes_percentage < 0.0 {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Soft,
                message: format!(
                    "Change ({}) and percentage ({}) disagree in sign",
                    quote.change, quote.changes_percentage
                ),
            });
        }
    }

    fn validate_market_cap(&self, quote: &Quote, issues: &mut Vec<ValidationIssue>) {
        if self.config.warn_on_missing_market_cap && !quote.has_market_cap() {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Soft,
                message: "Missing market cap".to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_quote(price: f64, change: f64, pct: f64) -> Quote {
        Quote {
            symbol: "600519".to_string(),
            name: "贵州茅台".to_string(),
            price,
            change,
            changes_percentage: pct,
            market_cap: 2.26e12,
        }
    }

    #[test]
    fn test_valid_quote() {
        let validator = QuoteValidator::new();
        assert!(validator.validate(&make_quote(1800.0, 10.0, 0.56)).is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let validator = QuoteValidator::new();
        let err = validator.validate(&make_quote(-1.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, MarketDataError::ValidationFailed { .. }));
    }

    #[test]
    fn test_max_price_rejected() {
        let validator = QuoteValidator::new();
        assert!(validator.validate(&make_quote(2e9, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_empty_symbol_rejected() {
        let validator = QuoteValidator::new();
        let mut quote = make_quote(10.0, 0.0, 0.0);
        quote.symbol = "  ".to_string();
        assert!(validator.validate(&quote).is_err());
    }

    #[test]
    fn test_negative_price_allowed_when_disabled() {
        let validator = QuoteValidator::with_config(ValidatorConfig {
            reject_negative_prices: false,
            ..Default::default()
        });
        assert!(validator.validate(&make_quote(-1.0, 0.0, 0.0)).is_ok());
    }

    #[test]
    fn test_sign_mismatch_is_soft() {
        let validator = QuoteValidator::new();
        let quote = make_quote(100.0, 1.0, -1.0);

        let issues = validator.issues(&quote);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, ValidationSeverity::Soft);
        assert!(validator.validate(&quote).is_ok());
    }

    #[test]
    fn test_zero_price_is_soft() {
        let validator = QuoteValidator::new();
        let quote = make_quote(0.0, 0.0, 0.0);
        assert!(validator.validate(&quote).is_ok());
        assert_eq!(validator.issues(&quote)[0].message, "Zero price");
    }

    #[test]
    fn test_missing_market_cap_warning_opt_in() {
        let mut quote = make_quote(10.0, 0.0, 0.0);
        quote.market_cap = 0.0;

        assert!(QuoteValidator::new().issues(&quote).is_empty());

        let strict = QuoteValidator::with_config(ValidatorConfig {
            warn_on_missing_market_cap: true,
            ..Default::default()
        });
        assert_eq!(strict.issues(&quote).len(), 1);
    }

    #[test]
    fn test_validate_batch() {
        let validator = QuoteValidator::new();
        let quotes = vec![
            make_quote(100.0, 1.0, 1.0),
            make_quote(-5.0, 0.0, 0.0),
            make_quote(50.0, -1.0, -2.0),
        ];

        let (valid, invalid) = validator.validate_batch(quotes);
        assert_eq!(valid.len(), 2);
        assert_eq!(invalid.len(), 1);
    }
}
