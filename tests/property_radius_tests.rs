use bubble_chart_rs::core::{SizeBy, SizeConfig, SizeValue, compute_radius};
use proptest::prelude::*;

fn arbitrary_config() -> impl Strategy<Value = SizeConfig> {
    (1.0f64..30.0, 30.0f64..120.0, any::<bool>()).prop_map(|(min_px, max_px, by_area)| SizeConfig {
        min_size: SizeValue::Pixels(min_px),
        max_size: SizeValue::Pixels(max_px),
        size_by: if by_area { SizeBy::Area } else { SizeBy::Width },
        ..SizeConfig::default()
    })
}

proptest! {
    #[test]
    fn radius_is_monotonic_for_in_range_pairs(
        config in arbitrary_config(),
        z_low in 0.0f64..500.0,
        z_delta in 0.0f64..500.0,
        z_max in 1_000.0f64..2_000.0
    ) {
        let z_high = z_low + z_delta;
        let (min_px, max_px) = match (config.min_size, config.max_size) {
            (SizeValue::Pixels(min_px), SizeValue::Pixels(max_px)) => (min_px, max_px),
            _ => unreachable!("strategy produces pixel bounds"),
        };

        let low = compute_radius(Some(z_low), 0.0, z_max, min_px, max_px, &config)
            .expect("in-range value is sized");
        let high = compute_radius(Some(z_high), 0.0, z_max, min_px, max_px, &config)
            .expect("in-range value is sized");

        prop_assert!(low <= high, "z {z_low} -> {low}, z {z_high} -> {high}");
    }

    #[test]
    fn radius_stays_within_resolved_pixel_bounds(
        config in arbitrary_config(),
        z in 0.0f64..1_000.0
    ) {
        let (min_px, max_px) = match (config.min_size, config.max_size) {
            (SizeValue::Pixels(min_px), SizeValue::Pixels(max_px)) => (min_px, max_px),
            _ => unreachable!("strategy produces pixel bounds"),
        };

        let radius = compute_radius(Some(z), 0.0, 1_000.0, min_px, max_px, &config)
            .expect("in-range value is sized");

        // Diameter rounds up to whole pixels, so allow half a pixel of slack.
        prop_assert!(radius * 2.0 >= min_px);
        prop_assert!(radius * 2.0 <= max_px + 1.0);
    }

    #[test]
    fn null_z_never_produces_a_radius(
        config in arbitrary_config(),
        z_max in 1.0f64..1_000.0
    ) {
        prop_assert_eq!(compute_radius(None, 0.0, z_max, 8.0, 60.0, &config), None);
    }
}
