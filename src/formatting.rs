/// Display tone of a signed market value, mapped to the `pos`/`neg`
/// class tokens the style sheet defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
}

impl Tone {
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Positive => "pos",
            Self::Negative => "neg",
        }
    }
}

#[must_use]
pub fn format_money(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        // Non-numeric feed values pass through unchanged.
        value.to_string()
    }
}

#[must_use]
pub fn format_percent(value: f64) -> String {
    // Fold -0.0 into 0.0 so zero always reads as a gain.
    let normalized = if value == 0.0 { 0.0 } else { value };
    if normalized >= 0.0 {
        format!("+{normalized:.2}%")
    } else {
        format!("{normalized:.2}%")
    }
}

#[must_use]
pub fn tone_for(value: f64) -> Tone {
    if value >= 0.0 {
        Tone::Positive
    } else {
        Tone::Negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_positive_gets_plus_prefix() {
        assert_eq!(format_percent(1.236), "+1.24%");
        assert_eq!(format_percent(0.005), "+0.01%");
        assert_eq!(format_percent(12.0), "+12.00%");
    }

    #[test]
    fn percent_negative_keeps_own_sign() {
        assert_eq!(format_percent(-0.4), "-0.40%");
        assert_eq!(format_percent(-3.456), "-3.46%");
    }

    #[test]
    fn percent_zero_counts_as_positive() {
        assert_eq!(format_percent(0.0), "+0.00%");
    }

    #[test]
    fn percent_negative_zero_folds_to_positive() {
        // -0.0 >= 0.0 holds for f64, so the sign token and the rendered
        // prefix must agree; we display it as a flat gain.
        assert_eq!(format_percent(-0.0), "+0.00%");
        assert_eq!(tone_for(-0.0), Tone::Positive);
    }

    #[test]
    fn money_renders_two_decimals() {
        assert_eq!(format_money(31.5), "31.50");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(1234.567), "1234.57");
    }

    #[test]
    fn money_passes_non_finite_through() {
        assert_eq!(format_money(f64::NAN), "NaN");
        assert_eq!(format_money(f64::INFINITY), "inf");
    }

    #[test]
    fn tone_follows_sign() {
        assert_eq!(tone_for(1.2), Tone::Positive);
        assert_eq!(tone_for(0.0), Tone::Positive);
        assert_eq!(tone_for(-0.01), Tone::Negative);
        assert_eq!(Tone::Positive.class(), "pos");
        assert_eq!(Tone::Negative.class(), "neg");
    }
}
