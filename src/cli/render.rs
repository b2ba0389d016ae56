//! Small terminal rendering helpers shared by the view commands.

/// Fixed-width progress bar filled proportionally to `ratio` in [0, 1].
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Bar proportional to `amount` against `scale`, used for the history chart.
pub fn amount_bar(amount: u64, scale: u64, width: usize) -> String {
    if scale == 0 {
        return String::new();
    }
    let filled = ((amount as f64 / scale as f64 * width as f64).round() as usize).min(width);
    "#".repeat(filled)
}

#[cfg(test)]
mod tests {
    use super::{amount_bar, progress_bar};

    #[test]
    fn test_progress_bar_fill() {
        assert_eq!(progress_bar(0.0, 10), "[----------]");
        assert_eq!(progress_bar(0.5, 10), "[#####-----]");
        assert_eq!(progress_bar(1.0, 10), "[##########]");
        // Out-of-range ratios clamp instead of overflowing the bar.
        assert_eq!(progress_bar(2.0, 10), "[##########]");
        assert_eq!(progress_bar(-1.0, 10), "[----------]");
    }

    #[test]
    fn test_amount_bar_scales() {
        assert_eq!(amount_bar(0, 100, 10), "");
        assert_eq!(amount_bar(50, 100, 10), "#####");
        assert_eq!(amount_bar(100, 100, 10), "##########");
        assert_eq!(amount_bar(0, 0, 10), "");
    }
}
