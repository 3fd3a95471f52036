//! Rupee formatting for display.
//!
//! Output follows the `en-IN` currency convention: `₹` prefix, the last three
//! integer digits grouped together and the rest in pairs (`₹12,34,567`), at
//! most two fraction digits with trailing zeros dropped.

const RUPEE: char = '₹';

/// Render an amount as Indian Rupees, e.g. `₹1,200` or `₹12.5`.
///
/// Rounding is half away from zero on the shortest decimal form of the
/// value, so `1.005` renders as `₹1.01`. Negative amounts get a leading minus
/// unless they round to zero.
pub fn format_price(amount: f64) -> String {
    if amount.is_nan() {
        return format!("{RUPEE}NaN");
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}{RUPEE}∞");
    }

    let (int_digits, frac_digits) = round_to_cents(&amount.abs().to_string());
    let is_zero = int_digits.iter().all(|&d| d == 0) && frac_digits.is_empty();

    let mut out = String::new();
    if amount < 0.0 && !is_zero {
        out.push('-');
    }
    out.push(RUPEE);
    out.push_str(&group_indian(&int_digits));
    if !frac_digits.is_empty() {
        out.push('.');
        out.extend(frac_digits.iter().map(|&d| char::from(b'0' + d)));
    }
    out
}

/// Split a plain decimal string into integer digits and at most two fraction
/// digits, rounding half up and dropping trailing fraction zeros.
fn round_to_cents(plain: &str) -> (Vec<u8>, Vec<u8>) {
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain, ""));
    let mut int_digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    let mut frac_digits: Vec<u8> = frac_part.bytes().take(2).map(|b| b - b'0').collect();

    let round_up = frac_part.as_bytes().get(2).is_some_and(|&b| b >= b'5');
    if round_up {
        let mut carry = true;
        for d in frac_digits.iter_mut().rev().chain(int_digits.iter_mut().rev()) {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            int_digits.insert(0, 1);
        }
    }

    while frac_digits.last() == Some(&0) {
        frac_digits.pop();
    }
    (int_digits, frac_digits)
}

fn group_indian(digits: &[u8]) -> String {
    let text: String = digits.iter().map(|&d| char::from(b'0' + d)).collect();
    if text.len() <= 3 {
        return text;
    }

    let (head, last_three) = text.split_at(text.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}
