//! ASCII chart primitives.

const BAR_FILLED: char = '█';
const BAR_EMPTY: char = '░';
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Intensity glyphs: none, low, medium, high.
pub const HEAT_GLYPHS: [char; 4] = ['·', '▫', '▪', '█'];
pub const HEAT_LEGEND: &str = "Legend: ·=none ▫=low ▪=med █=high";

/// Horizontal bar `width` cells wide, filled in proportion to `value / max_value`.
pub fn bar_chart(value: f64, max_value: f64, width: usize) -> String {
    let filled = if max_value > 0.0 {
        ((value / max_value) * width as f64).clamp(0.0, width as f64) as usize
    } else {
        0
    };

    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat_n(BAR_FILLED, filled));
    bar.extend(std::iter::repeat_n(BAR_EMPTY, width - filled));
    bar
}

/// One glyph per value (the last `width` values), scaled between the series
/// minimum and maximum. A flat series renders at the middle level.
pub fn sparkline(values: &[f64], width: usize) -> String {
    let recent = &values[values.len().saturating_sub(width)..];
    let Some(min) = recent.iter().copied().reduce(f64::min) else {
        return String::new();
    };
    let max = recent.iter().copied().fold(min, f64::max);

    if max == min {
        return std::iter::repeat_n(SPARK_LEVELS[4], recent.len()).collect();
    }

    recent
        .iter()
        .map(|v| {
            let normalized = (v - min) / (max - min);
            SPARK_LEVELS[((normalized * 7.0) as usize).min(7)]
        })
        .collect()
}

/// Heatmap glyph for a bucket average.
pub fn heat_glyph(avg: Option<f64>, count: usize) -> char {
    match avg {
        _ if count == 0 => HEAT_GLYPHS[0],
        None => HEAT_GLYPHS[0],
        Some(avg) if avg <= 3.0 => HEAT_GLYPHS[1],
        Some(avg) if avg <= 6.0 => HEAT_GLYPHS[2],
        Some(_) => HEAT_GLYPHS[3],
    }
}
