/// Density glyphs, from empty to full.
pub const TICKS: [char; 9] = ['_', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Glyph used for a zero value.
pub const EMPTY_TICK: char = TICKS[0];

/// Render values as a sparkline.
///
/// Each value maps to one of [`TICKS`] by linear scaling against the largest value; when every
/// value is zero the chart is all [`EMPTY_TICK`]. With `group`, the glyphs are split into chunks
/// of that size (the last one padded with spaces), joined by single spaces, and trailing
/// whitespace is trimmed.
#[must_use]
pub fn make_chart(values: &[u64], group: Option<usize>) -> String {
    let peak = values.iter().copied().max().unwrap_or(0);
    let glyphs: Vec<char> = if peak == 0 {
        vec![EMPTY_TICK; values.len()]
    } else {
        values.iter().map(|&value| tick_for(value, peak)).collect()
    };

    match group {
        Some(size) if size > 0 => {
            let chunks: Vec<String> = glyphs
                .chunks(size)
                .map(|chunk| {
                    let mut s: String = chunk.iter().collect();
                    s.extend(core::iter::repeat_n(' ', size - chunk.len()));
                    s
                })
                .collect();
            chunks.join(" ").trim_end().to_string()
        }
        _ => glyphs.into_iter().collect(),
    }
}

#[expect(clippy::cast_precision_loss, reason = "download counts are far below f64 precision limits")]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "the index is rounded and within 0..=8")]
fn tick_for(value: u64, peak: u64) -> char {
    let top = (TICKS.len() - 1) as f64;
    let index = (top * value as f64 / peak as f64).round_ties_even() as usize;
    TICKS[index.min(TICKS.len() - 1)]
}
