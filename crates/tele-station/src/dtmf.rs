//! DTMF keypad frequencies

/// Low-group (row) frequencies in Hz
pub const ROW_FREQS: [f64; 4] = [697.0, 770.0, 852.0, 941.0];

/// High-group (column) frequencies in Hz
pub const COL_FREQS: [f64; 4] = [1209.0, 1336.0, 1477.0, 1633.0];

/// Row and column of a keypad character
fn position(c: char) -> Option<(usize, usize)> {
    let pos = match c.to_ascii_uppercase() {
        '1' => (0, 0),
        '2' => (0, 1),
        '3' => (0, 2),
        'A' => (0, 3),
        '4' => (1, 0),
        '5' => (1, 1),
        '6' => (1, 2),
        'B' => (1, 3),
        '7' => (2, 0),
        '8' => (2, 1),
        '9' => (2, 2),
        'C' => (2, 3),
        '*' => (3, 0),
        '0' => (3, 1),
        '#' => (3, 2),
        'D' => (3, 3),
        _ => return None,
    };
    Some(pos)
}

/// Row and column tones of a keypad character
///
/// Anything that is not on the 16-key pad yields `None` and is dialed as
/// silence.
pub fn dtmf_tones(c: char) -> Option<(f64, f64)> {
    position(c).map(|(row, col)| (ROW_FREQS[row], COL_FREQS[col]))
}
