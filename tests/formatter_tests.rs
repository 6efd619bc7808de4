//! # Formatter Tests Module
//!
//! Round trips between clock strings and seconds, and display rendering of
//! resolved activities.

#[cfg(test)]
mod tests {
    use runlog::formatter::{format_duration, format_pace, parse_clock_to_seconds};
    use runlog::{extract, format_activity, FormattedActivity, RecognitionMode};

    /// Well-formed clocks survive parse then format unchanged
    #[test]
    fn test_clock_round_trip() {
        let clocks = [
            "1:00:00", "1:43:08", "9:59:59", "23:59:59", "00:01", "05:30", "25:30", "59:59",
        ];

        for clock in clocks {
            let secs = parse_clock_to_seconds(clock).unwrap();
            assert_eq!(format_duration(secs), clock, "round trip of '{clock}'");
        }
    }

    /// Non-canonical clocks parse fine but render in canonical form
    #[test]
    fn test_non_canonical_clocks() {
        let cases = [("0:05:30", "05:30"), ("90:00", "1:30:00"), ("0:59:59", "59:59")];

        for (clock, canonical) in cases {
            let secs = parse_clock_to_seconds(clock).unwrap();
            assert_eq!(format_duration(secs), canonical, "rendering of '{clock}'");
        }
    }

    #[test]
    fn test_pace_rendering() {
        assert_eq!(format_pace(60), "1:00");
        assert_eq!(format_pace(305), "5:05");
        assert_eq!(format_pace(1200), "20:00");
    }

    /// Estimated values carry the qualifier, extracted ones do not
    #[test]
    fn test_estimated_qualifier() {
        let estimated = format_activity(&extract("10 км", RecognitionMode::PlainText));
        assert!(estimated.estimated);
        assert!(estimated.to_string().ends_with("(estimated)"));

        let extracted = format_activity(&extract("10 км 1:00:00", RecognitionMode::PlainText));
        assert!(!extracted.estimated);
        assert_eq!(extracted.to_string(), "10 km, 1:00:00, 6:00/km");
    }

    #[test]
    fn test_absent_fields_render_as_none() {
        let formatted = format_activity(&extract("1:00:00", RecognitionMode::PlainText));

        assert_eq!(
            formatted,
            FormattedActivity {
                distance: None,
                duration: Some("1:00:00".to_string()),
                pace: None,
                estimated: false,
            }
        );
    }
}
