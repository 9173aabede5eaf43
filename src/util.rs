/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.6;

/// How many characters of caption text fit in `width` at `font_size`.
pub fn caption_capacity(width: f32, font_size: f32) -> usize {
    if width <= 0.0 || font_size <= 0.0 {
        return 0;
    }
    (width / (font_size * GLYPH_ADVANCE)).floor() as usize
}

/// Cut `s` to at most `max_chars` characters, ending in "…" when shortened.
/// Counts characters, never splits a UTF-8 sequence.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let kept: String = s.chars().take(max_chars - 1).collect();
    format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_caption_unchanged() {
        assert_eq!(truncate_str("Atlas", 10), "Atlas");
        assert_eq!(truncate_str("Atlas", 5), "Atlas");
    }

    #[test]
    fn long_caption_gets_ellipsis() {
        let result = truncate_str("A very long project title", 10);
        assert_eq!(result, "A very lo…");
        assert_eq!(result.chars().count(), 10);
    }

    #[test]
    fn trailing_space_dropped_before_ellipsis() {
        assert_eq!(truncate_str("Night trains", 7), "Night…");
    }

    #[test]
    fn multibyte_titles_do_not_panic() {
        assert_eq!(truncate_str("こんにちは世界", 4), "こんに…");
        assert_eq!(truncate_str("🎮🗡🛡🏰", 2), "🎮…");
    }

    #[test]
    fn zero_capacity_is_empty() {
        assert_eq!(truncate_str("Atlas", 0), "");
        assert_eq!(truncate_str("Atlas", 1), "…");
    }

    #[test]
    fn capacity_scales_with_width() {
        // 13px text advances about 7.8px per glyph.
        assert_eq!(caption_capacity(80.0, 13.0), 10);
        assert_eq!(caption_capacity(0.0, 13.0), 0);
        assert!(caption_capacity(800.0, 13.0) > caption_capacity(400.0, 13.0));
    }
}
