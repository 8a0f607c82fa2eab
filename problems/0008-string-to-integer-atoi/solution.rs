/// Parses a leading optionally signed integer after spaces, clamped to i32.
pub fn my_atoi(s: String) -> i32 {
    let mut chars = s.trim_start_matches(' ').chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        value = value * 10 + i64::from(d);
        if value > i64::from(i32::MAX) + 1 {
            break;
        }
    }
    let signed = if negative { -value } else { value };
    signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
