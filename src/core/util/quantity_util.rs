/// Parses Kubernetes resource quantities ("100m", "1Gi", "1.5", "2e3") into
/// plain numbers so requests and limits can be compared.
pub struct QuantityUtil;

const BINARY_SUFFIXES: [(&str, f64); 6] = [
    ("Ki", 1024.0),
    ("Mi", 1024.0 * 1024.0),
    ("Gi", 1024.0 * 1024.0 * 1024.0),
    ("Ti", 1024.0 * 1024.0 * 1024.0 * 1024.0),
    ("Pi", 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0),
    ("Ei", 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0),
];

const DECIMAL_SUFFIXES: [(&str, f64); 10] = [
    ("n", 1e-9),
    ("u", 1e-6),
    ("m", 1e-3),
    ("", 1.0),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
    ("P", 1e15),
    ("E", 1e18),
];

impl QuantityUtil {
    /// Returns the quantity in base units (cores, bytes), or `None` when the
    /// string is not a valid quantity.
    pub fn parse(raw: &str) -> Option<f64> {
        let s = raw.trim();
        if s.is_empty() || s != raw {
            return None;
        }

        let split = s
            .char_indices()
            .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '+' || *c == '-'))))
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        let (number, suffix) = s.split_at(split);

        let digits = number.trim_start_matches(['+', '-']);
        if digits.is_empty() || digits == "." || digits.matches('.').count() > 1 {
            return None;
        }
        let value: f64 = number.parse().ok()?;

        let multiplier = Self::suffix_multiplier(suffix)?;
        Some(value * multiplier)
    }

    /// Parses a quantity that must not be negative (storage, cpu, memory).
    pub fn parse_non_negative(raw: &str) -> Option<f64> {
        Self::parse(raw).filter(|v| *v >= 0.0)
    }

    fn suffix_multiplier(suffix: &str) -> Option<f64> {
        if let Some((_, m)) = BINARY_SUFFIXES.iter().find(|(s, _)| *s == suffix) {
            return Some(*m);
        }
        if let Some((_, m)) = DECIMAL_SUFFIXES.iter().find(|(s, _)| *s == suffix) {
            return Some(*m);
        }

        // Decimal exponent form: 1e3, 5E-2
        let exponent = suffix
            .strip_prefix('e')
            .or_else(|| suffix.strip_prefix('E'))?;
        let unsigned = exponent.trim_start_matches(['+', '-']);
        if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let exp: i32 = exponent.parse().ok()?;
        Some(10f64.powi(exp))
    }
}
