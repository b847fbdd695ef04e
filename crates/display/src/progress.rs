/// Text progress bar, e.g. ` |xxxx------| 40.0%  40/100 pages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBar {
    width: usize,
    fill: char,
}
impl ProgressBar {
    const EMPTY: char = '-';

    pub fn new(width: usize, fill: char) -> Self {
        Self { width, fill }
    }

    /// Percentage read. A book without pages counts as not started.
    pub fn percent(total: u32, current: u32) -> f64 {
        if total == 0 {
            return 0.0;
        }
        100.0 * f64::from(current.min(total)) / f64::from(total)
    }

    /// Number of filled cells, rounded down.
    pub fn filled(&self, total: u32, current: u32) -> usize {
        if total == 0 {
            return 0;
        }
        let filled = self.width as u64 * u64::from(current.min(total)) / u64::from(total);
        // Never more than `width`, which is a usize.
        filled as usize
    }

    /// The bar line, without surrounding blank lines.
    pub fn line(&self, total: u32, current: u32) -> String {
        let filled = self.filled(total, current);
        let mut bar = String::with_capacity(self.width + 32);
        bar.push_str(" |");
        bar.extend(std::iter::repeat_n(self.fill, filled));
        bar.extend(std::iter::repeat_n(Self::EMPTY, self.width - filled));
        bar.push_str(&format!("| {:.1}%  {current}/{total} pages", Self::percent(total, current)));
        bar
    }

    /// The bar as printed under a table row: surrounded by blank lines.
    pub fn render(&self, total: u32, current: u32) -> String {
        format!("\n{}\n\n", self.line(total, current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(412, 0, 0.0)]
    #[case(412, 412, 100.0)]
    #[case(400, 100, 25.0)]
    #[case(0, 0, 0.0)]
    #[case(10, 15, 100.0)]
    fn test_percent(#[case] total: u32, #[case] current: u32, #[case] expected: f64) {
        assert_eq!(ProgressBar::percent(total, current), expected);
    }

    #[rstest]
    #[case(100, 0, 0)]
    #[case(100, 50, 40)]
    #[case(3, 1, 26)]
    #[case(3, 2, 53)]
    #[case(412, 412, 80)]
    #[case(0, 0, 0)]
    fn test_filled_rounds_down(#[case] total: u32, #[case] current: u32, #[case] expected: usize) {
        assert_eq!(ProgressBar::new(80, 'x').filled(total, current), expected);
    }

    #[test]
    fn test_line() {
        let bar = ProgressBar::new(10, '#');
        assert_eq!(bar.line(3, 1), " |###-------| 33.3%  1/3 pages");
        assert_eq!(bar.line(0, 0), " |----------| 0.0%  0/0 pages");
    }

    #[test]
    fn test_wide_bar() {
        let line = ProgressBar::new(80, 'x').line(200, 50);
        assert_eq!(line.matches('x').count(), 20);
        assert_eq!(line.matches('-').count(), 60);
        assert!(line.ends_with("| 25.0%  50/200 pages"));
    }

    #[test]
    fn test_render_spacing() {
        let rendered = ProgressBar::new(4, 'x').render(4, 2);
        assert_eq!(rendered, "\n |xx--| 50.0%  2/4 pages\n\n");
    }
}
