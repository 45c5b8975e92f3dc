//! Property-based tests for comparator parameter validation.
//! Verifies invariants hold for ALL inputs, not just fixed examples.

use platform::comparator::{AttributeKind, ComparatorAttribute, ComparatorConfig, ComparatorInput};
use platform::newtypes::{FilterCount, HysteresisLevel, VddDivider};

proptest::proptest! {
    /// Clamping constructors never panic and never exceed MAX.
    #[test]
    fn newtype_new_never_exceeds_max(v in 0u8..=255u8) {
        assert!(FilterCount::new(v).get() <= FilterCount::MAX);
        assert!(HysteresisLevel::new(v).get() <= HysteresisLevel::MAX);
        assert!(VddDivider::new(v).get() <= VddDivider::MAX);
    }

    /// try_new accepts exactly 0..=MAX.
    #[test]
    fn filter_count_try_new_matches_range(v in 0u8..=255u8) {
        assert_eq!(FilterCount::try_new(v).is_ok(), v <= 7);
    }

    /// Every raw input value either decodes to itself or is rejected.
    #[test]
    fn input_raw_round_trips(v in 0u8..=255u8) {
        match ComparatorInput::from_raw(v) {
            Ok(input) => assert_eq!(input.raw(), v),
            Err(err) => assert!((0xA0..=0xFA).contains(&v), "rejected {} ({:?})", v, err),
        }
    }

    /// A raw attribute accepted by from_raw reads back unchanged from a config.
    #[test]
    fn raw_attribute_applies(raw in 0u32..=300u32) {
        let mut cfg = ComparatorConfig::default();
        if let Ok(attr) = ComparatorAttribute::from_raw(AttributeKind::HysteresisLow, raw) {
            cfg.apply(attr);
            assert_eq!(u32::from(cfg.hysteresis_low.get()), raw);
        } else {
            assert!(raw > 15);
        }
    }
}
