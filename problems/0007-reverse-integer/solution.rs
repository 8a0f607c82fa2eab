/// Reverses the decimal digits of `x`; 0 when the result overflows i32.
pub fn reverse(x: i32) -> i32 {
    let mut rest = x;
    let mut out: i32 = 0;
    while rest != 0 {
        out = match out.checked_mul(10).and_then(|v| v.checked_add(rest % 10)) {
            Some(v) => v,
            None => return 0,
        };
        rest /= 10;
    }
    out
}
