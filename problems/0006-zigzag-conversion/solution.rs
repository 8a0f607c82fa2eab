/// Writes `s` in a zigzag over `num_rows` rows and reads it back row by row.
pub fn convert(s: String, num_rows: i32) -> String {
    let rows = usize::try_from(num_rows).unwrap_or(1).max(1);
    if rows == 1 {
        return s;
    }
    let mut lines = vec![String::new(); rows];
    let mut row = 0usize;
    let mut down = true;
    for c in s.chars() {
        lines[row].push(c);
        if row == 0 {
            down = true;
        } else if row == rows - 1 {
            down = false;
        }
        row = if down { row + 1 } else { row - 1 };
    }
    lines.concat()
}
