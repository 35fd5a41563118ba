use serde_json::{Number, Value};

/// Decimal exponent at which number output switches to `e` notation.
const MAX_PLAIN_DIGITS: i32 = 21;

/// Smallest decimal exponent still written as a plain `0.000ddd` fraction.
const MIN_PLAIN_EXPONENT: i32 = -6;

/// Canonicalizer that emits deterministic bytes.
///
/// Object members are written in ascending byte-wise key order at every
/// level, arrays keep their order, and no whitespace is emitted. Strings use
/// standard JSON escaping with raw UTF-8. Numbers are written from their
/// `f64` value in the shortest round-trip notation, so `10` and `10.0`
/// encode identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Canonicalizer;

impl Canonicalizer {
    /// Creates a new canonicalizer.
    pub fn new() -> Self {
        Self
    }

    /// Produces the canonical bytes of `value`.
    pub fn canonicalize(&self, value: &Value) -> Vec<u8> {
        let mut out = String::new();
        self.write(value, &mut out);
        out.into_bytes()
    }

    #[allow(clippy::only_used_in_recursion)]
    fn write(&self, value: &Value, out: &mut String) {
        match value {
            Value::Object(map) => {
                let mut members: Vec<(&String, &Value)> = map.iter().collect();
                members.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
                out.push('{');
                for (idx, (key, member)) in members.into_iter().enumerate() {
                    if idx > 0 {
                        out.push(',');
                    }
                    out.push_str(&Value::from(key.as_str()).to_string());
                    out.push(':');
                    self.write(member, out);
                }
                out.push('}');
            }
            Value::Array(items) => {
                out.push('[');
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        out.push(',');
                    }
                    self.write(item, out);
                }
                out.push(']');
            }
            Value::Number(num) => out.push_str(&format_number(num)),
            Value::String(_) | Value::Bool(_) | Value::Null => out.push_str(&value.to_string()),
        }
    }
}

/// Canonical bytes of `value` using a default [`Canonicalizer`].
pub fn encode(value: &Value) -> Vec<u8> {
    Canonicalizer::new().canonicalize(value)
}

fn format_number(num: &Number) -> String {
    match num.as_f64() {
        Some(f) if f.is_finite() => format_f64(f),
        _ => num.to_string(),
    }
}

/// Writes `f` in ECMAScript `Number#toString` form: plain decimal for
/// magnitudes in `[1e-6, 1e21)`, otherwise `d.ddde±x`.
fn format_f64(f: f64) -> String {
    // Normalize -0 to 0
    if f == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `-1.2345e-7`.
    let sci = format!("{:e}", f.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= MAX_PLAIN_DIGITS {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= MAX_PLAIN_DIGITS {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if MIN_PLAIN_EXPONENT < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let (head, tail) = digits.split_at(1);
        if tail.is_empty() {
            format!("{}e{}{}", head, sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", head, tail, sign, (n - 1).abs())
        }
    };
    if f < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}
