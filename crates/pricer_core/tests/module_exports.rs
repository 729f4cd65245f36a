//! Integration tests for module exports.
//!
//! Verify that all public types are correctly exported and accessible via
//! absolute paths.

/// Test that types are accessible via their module paths.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::PricingError;
    use pricer_core::types::estimate::PriceEstimate;
    use pricer_core::types::market::{Dividend, DividendSchedule, MarketParameters};
    use pricer_core::types::option::{ExerciseStyle, OptionType};

    let mut schedule = DividendSchedule::new();
    schedule.push(Dividend::new(0.5, 0.02));

    let params = MarketParameters::new(100.0, 95.0, 1.0, 0.03, 0.25).with_dividends(schedule);
    assert!(params.validate().is_ok());

    let est = PriceEstimate::exact(1.0);
    assert!(est.is_exact());

    let _ = ExerciseStyle::American;
    let _ = OptionType::Put;
    let err: PricingError = "digital".parse::<OptionType>().unwrap_err();
    assert!(err.to_string().contains("digital"));
}

/// Test that commonly used types are re-exported at the `types` level.
#[test]
fn test_types_reexports() {
    use pricer_core::types::{
        Dividend, DividendSchedule, ExerciseStyle, MarketParameters, OptionType, PriceEstimate,
        PricingError,
    };

    let params = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2).with_barrier(115.0);
    assert_eq!(params.validate_up_barrier(), Ok(115.0));

    let schedule = DividendSchedule::from_pairs(&[(0.5, 0.1)]);
    assert_eq!(schedule.entries(), &[Dividend::new(0.5, 0.1)]);

    assert_eq!(ExerciseStyle::default(), ExerciseStyle::European);
    assert_eq!(OptionType::Call.sign(), 1.0);
    assert_eq!(PriceEstimate::default().price, 0.0);

    let err = MarketParameters::new(-1.0, 100.0, 1.0, 0.04, 0.2)
        .validate()
        .unwrap_err();
    assert!(matches!(err, PricingError::InvalidParameter { name: "spot", .. }));
}

#[cfg(feature = "serde")]
#[test]
fn test_price_estimate_is_serialisable() {
    fn assert_serde<T: serde::Serialize + for<'de> serde::Deserialize<'de>>() {}
    assert_serde::<pricer_core::types::PriceEstimate>();
    assert_serde::<pricer_core::types::MarketParameters>();
    assert_serde::<pricer_core::types::OptionType>();
}
