// tests/value_tick_formatting_test.rs

use sensor_video_sync::plot_framework::format_value_tick;

#[test]
fn test_acceleration_ticks_keep_two_decimals() {
    // Accelerations in g sit well below 10 and would collapse to 0 or 1 with integer labels
    let test_values = [-0.75, -0.25, 0.25, 0.5, 0.98, 1.02];
    let expected_labels = ["-0.75", "-0.25", "0.25", "0.50", "0.98", "1.02"];

    for (value, expected) in test_values.iter().zip(expected_labels.iter()) {
        let formatted = format_value_tick(*value);
        assert_eq!(
            formatted, *expected,
            "Value {} should format as '{}' but got '{}'",
            value, expected, formatted
        );
    }
}

#[test]
fn test_whole_numbers_stay_integer() {
    assert_eq!(format_value_tick(0.0), "0");
    assert_eq!(format_value_tick(1.0), "1");
    assert_eq!(format_value_tick(-3.0), "-3");
    assert_eq!(format_value_tick(12.4), "12");
    assert_eq!(format_value_tick(179.0), "179");
}

#[test]
fn test_large_value_notation() {
    assert_eq!(format_value_tick(1000.0), "1k");
    assert_eq!(format_value_tick(-2000.0), "-2k");
    assert_eq!(format_value_tick(1_000_000.0), "1.0M");
    assert_eq!(format_value_tick(2_500_000.0), "2.5M");
}
