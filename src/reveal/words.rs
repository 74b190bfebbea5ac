/// Vertical distance (px) a word rises while it fades in.
pub const WORD_RISE_PX: f64 = 14.0;

/// Slice of the progress scalar during which one word turns visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealRange {
    pub start: f64,
    pub end: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WordStyle {
    pub opacity: f64,
    pub offset_y: f64,
}

impl WordStyle {
    pub fn to_css(self) -> String {
        format!(
            "opacity: {:.3}; transform: translateY({:.2}px);",
            self.opacity, self.offset_y
        )
    }
}

/// Even split of `[0, 1]` across `count` words.
pub fn reveal_ranges(count: usize) -> Vec<RevealRange> {
    let n = count as f64;
    (0..count)
        .map(|i| RevealRange {
            start: i as f64 / n,
            end: (i + 1) as f64 / n,
        })
        .collect()
}

pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Clamped linear map of `progress` from `range` onto `from..=to`.
pub fn interpolate(progress: f64, range: RevealRange, from: f64, to: f64) -> f64 {
    let t = if range.end > range.start {
        ((progress - range.start) / (range.end - range.start)).clamp(0.0, 1.0)
    } else if progress >= range.end {
        1.0
    } else {
        0.0
    };
    from + (to - from) * t
}

impl RevealRange {
    pub fn style_at(self, progress: f64) -> WordStyle {
        WordStyle {
            opacity: interpolate(progress, self, 0.0, 1.0),
            offset_y: interpolate(progress, self, WORD_RISE_PX, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn four_words_split_into_quarters() {
        let ranges = reveal_ranges(4);
        let bounds: Vec<(f64, f64)> = ranges.iter().map(|r| (r.start, r.end)).collect();
        assert_eq!(bounds, vec![(0.0, 0.25), (0.25, 0.5), (0.5, 0.75), (0.75, 1.0)]);
    }

    #[test]
    fn endpoints_hide_and_show_everything() {
        for range in reveal_ranges(7) {
            assert_eq!(range.style_at(0.0).opacity, 0.0);
            assert_eq!(range.style_at(0.0).offset_y, WORD_RISE_PX);
            assert_eq!(range.style_at(1.0).opacity, 1.0);
            assert_eq!(range.style_at(1.0).offset_y, 0.0);
        }
    }

    #[test]
    fn words_reveal_left_to_right() {
        let ranges = reveal_ranges(3);
        let styles: Vec<f64> = ranges.iter().map(|r| r.style_at(0.5).opacity).collect();
        assert_eq!(styles[0], 1.0);
        assert!(styles[1] > 0.0 && styles[1] < 1.0);
        assert_eq!(styles[2], 0.0);
    }

    #[test]
    fn split_ignores_repeated_whitespace() {
        assert_eq!(split_words("  care  loop\tai\n"), vec!["care", "loop", "ai"]);
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn empty_range_behaves_as_a_step() {
        let range = RevealRange { start: 0.5, end: 0.5 };
        assert_eq!(interpolate(0.49, range, 0.0, 1.0), 0.0);
        assert_eq!(interpolate(0.5, range, 0.0, 1.0), 1.0);
    }

    #[test]
    fn css_has_opacity_and_offset() {
        let css = WordStyle { opacity: 0.5, offset_y: 7.0 }.to_css();
        assert_eq!(css, "opacity: 0.500; transform: translateY(7.00px);");
    }

    proptest! {
        #[test]
        fn ranges_partition_unit_interval(n in 1usize..500) {
            let ranges = reveal_ranges(n);
            prop_assert_eq!(ranges.len(), n);
            prop_assert_eq!(ranges[0].start, 0.0);
            prop_assert_eq!(ranges[n - 1].end, 1.0);
            for pair in ranges.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
                prop_assert!(pair[0].start < pair[0].end);
            }
        }

        #[test]
        fn opacity_never_decreases(n in 1usize..64, steps in prop::collection::vec(0.0f64..=1.0, 1..50)) {
            let mut steps = steps;
            steps.push(0.0);
            steps.push(1.0);
            steps.sort_by(|a, b| a.total_cmp(b));
            for range in reveal_ranges(n) {
                let mut last = 0.0;
                for &p in &steps {
                    let opacity = range.style_at(p).opacity;
                    prop_assert!(opacity >= last);
                    last = opacity;
                }
                prop_assert_eq!(last, 1.0);
            }
        }
    }
}
