// src/deviation.rs
use crate::types::is_usable_reference;

/// Signed percent difference of `price` from `reference`.
/// `None` when there is no usable reference this cycle.
pub fn deviation_pct(price: f64, reference: Option<f64>) -> Option<f64> {
    let base = reference.filter(|r| is_usable_reference(*r))?;
    Some((price - base) / base * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
}

impl Tone {
    /// Zero counts as good.
    pub fn classify(pct: f64) -> Self {
        if pct >= 0.0 { Tone::Good } else { Tone::Bad }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_percent_premium() {
        let d = deviation_pct(6_060_000.0, Some(6_000_000.0)).unwrap();
        assert!((d - 1.0).abs() < 1e-9);
        assert_eq!(Tone::classify(d), Tone::Good);
    }

    #[test]
    fn discount_is_bad() {
        let d = deviation_pct(5_940_000.0, Some(6_000_000.0)).unwrap();
        assert!((d + 1.0).abs() < 1e-9);
        assert_eq!(Tone::classify(d), Tone::Bad);
    }

    #[test]
    fn zero_boundary_is_good() {
        assert_eq!(deviation_pct(100.0, Some(100.0)), Some(0.0));
        assert_eq!(Tone::classify(0.0), Tone::Good);
        assert_eq!(Tone::classify(-0.0), Tone::Good);
    }

    #[test]
    fn no_reference_no_deviation() {
        assert_eq!(deviation_pct(100.0, None), None);
        assert_eq!(deviation_pct(100.0, Some(0.0)), None);
        assert_eq!(deviation_pct(100.0, Some(f64::NAN)), None);
    }
}
