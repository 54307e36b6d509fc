use super::*;

/// Latin glyphs 10px, CJK glyphs 20px, space 5px, lines 24px.
struct StubMetrics;

impl GlyphMetrics for StubMetrics {
    fn advance(&mut self, ch: char) -> f32 {
        match ch {
            ' ' => 5.0,
            c if (c as u32) >= 0x2E80 => 20.0,
            _ => 10.0,
        }
    }

    fn line_height(&mut self) -> f32 {
        24.0
    }
}

#[test]
fn blank_lines_are_preserved() {
    assert_eq!(wrap("A\n\nB", 100.0, &mut StubMetrics), vec!["A", "", "B"]);
}

#[test]
fn empty_text_is_one_empty_line() {
    assert_eq!(wrap("", 100.0, &mut StubMetrics), vec![""]);
}

#[test]
fn trailing_newline_adds_empty_line() {
    assert_eq!(wrap("A\n", 100.0, &mut StubMetrics), vec!["A", ""]);
}

#[test]
fn carriage_returns_before_newline_are_dropped() {
    assert_eq!(wrap("A\r\nB", 100.0, &mut StubMetrics), vec!["A", "B"]);
}

#[test]
fn non_positive_width_yields_nothing() {
    assert!(wrap("abc", 0.0, &mut StubMetrics).is_empty());
    assert!(wrap("abc", -5.0, &mut StubMetrics).is_empty());
    assert!(wrap("abc", f32::NAN, &mut StubMetrics).is_empty());
}

#[test]
fn overflow_breaks_before_the_offending_glyph() {
    let lines = wrap("abcdefg", 35.0, &mut StubMetrics);
    assert_eq!(lines, vec!["abc", "def", "g"]);
    assert_eq!(lines.concat(), "abcdefg");
}

#[test]
fn mixed_width_glyphs_fill_to_the_budget() {
    // 20 + 20 + 10 = 50 fits; the next CJK glyph would reach 70.
    let lines = wrap("塔罗a牌x", 50.0, &mut StubMetrics);
    assert_eq!(lines, vec!["塔罗a", "牌x"]);
}

#[test]
fn exact_fit_does_not_break() {
    assert_eq!(wrap("abcd", 40.0, &mut StubMetrics), vec!["abcd"]);
}

#[test]
fn oversized_glyph_stands_alone() {
    let lines = wrap("a中b", 15.0, &mut StubMetrics);
    assert_eq!(lines, vec!["a", "中", "b"]);
}

#[test]
fn long_text_wraps_without_losing_characters() {
    let text = "命运之轮正在转动Fortune favours the bold命运之轮".replace(' ', "");
    let lines = wrap(&text, 90.0, &mut StubMetrics);
    assert!(lines.len() > 1);
    assert_eq!(lines.concat(), text);
    for line in &lines {
        assert!(measure(line, &mut StubMetrics) <= 90.0);
    }
}

#[test]
fn whitespace_widens_to_full_width() {
    // One space becomes round(20 / 5) = 4 spaces; a tab becomes 8.
    assert_eq!(wrap("a b", 100.0, &mut StubMetrics), vec!["a    b"]);
    assert_eq!(wrap("a\tb", 100.0, &mut StubMetrics), vec!["a        b"]);
}

#[test]
fn whitespace_counts_toward_the_budget() {
    // "a" (10) + space (20) = 30; "b" would make 40 > 35.
    assert_eq!(wrap("a b", 35.0, &mut StubMetrics), vec!["a    ", "b"]);
}

#[test]
fn wrap_is_deterministic() {
    let text = "第一行\n\n第二行 has some latin\tand tabs";
    let a = wrap(text, 70.0, &mut StubMetrics);
    let b = wrap(text, 70.0, &mut StubMetrics);
    assert_eq!(a, b);
}

#[test]
fn block_height_omits_trailing_gap() {
    let block = WrappedBlock::layout("A\nB\nC", 0.0, 0.0, 0.0, 0.0, 100.0, 1.5, &mut StubMetrics);
    assert_eq!(block.lines.len(), 3);
    // 3 * 24 * 1.5 - 0.5 * 24
    assert_eq!(block.height, 96.0);
    assert_eq!(block.bottom(), 96.0);
}

#[test]
fn anchor_resolves_as_fraction_of_block() {
    let block = WrappedBlock::layout("A\nB", 500.0, 300.0, 1.0, 1.0, 100.0, 1.0, &mut StubMetrics);
    assert_eq!(block.height, 48.0);
    assert_eq!(block.left, 400.0);
    assert_eq!(block.top, 252.0);
    assert_eq!(block.bottom(), 300.0);

    let centered =
        WrappedBlock::layout("A", 500.0, 300.0, 0.5, 0.5, 100.0, 1.0, &mut StubMetrics);
    assert_eq!(centered.left, 450.0);
    assert_eq!(centered.top, 288.0);
}

#[test]
fn line_alignment_is_independent_of_anchor() {
    let block = WrappedBlock::layout("ab\nabcd", 0.0, 10.0, 0.0, 0.0, 100.0, 2.0, &mut StubMetrics);
    assert_eq!(block.line_origin(0, Align::Left), (0.0, 10.0));
    assert_eq!(block.line_origin(0, Align::Center), (40.0, 10.0));
    assert_eq!(block.line_origin(1, Align::Right), (60.0, 58.0));
}

#[test]
fn empty_block_has_no_height() {
    let block = WrappedBlock::layout("abc", 5.0, 7.0, 0.0, 0.0, 0.0, 1.2, &mut StubMetrics);
    assert!(block.lines.is_empty());
    assert_eq!(block.bottom(), 7.0);
}
