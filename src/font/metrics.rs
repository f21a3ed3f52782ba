//! Advance widths for the standard PDF fonts the report uses.
//!
//! Values are in 1/1000 em, taken from the Adobe Font Metrics files for
//! Helvetica and Helvetica-Bold. Courier is monospaced at 600 units for
//! every glyph. Text is painted in WinAnsiEncoding, and a character it
//! cannot encode is painted as `?`, so it is measured as `?` too.

/// Width table for one standard font.
#[derive(Debug, Clone, Copy)]
pub struct StandardFontMetrics {
    /// Widths for U+0020 ..= U+007E.
    ascii: Option<&'static [u16; 95]>,
    /// Widths for U+00A0 ..= U+00FF.
    latin1: Option<&'static [u16; 96]>,
    /// Width of every glyph of a monospaced font.
    default_width: u16,
    /// Widths for the characters WinAnsi places in 0x80 ..= 0x9F.
    extra: &'static [(char, u16)],
}

impl StandardFontMetrics {
    /// Advance width of `ch` in points at `font_size`.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.units(ch) as f64 / 1000.0 * font_size
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        let units: u32 = text.chars().map(|ch| self.units(ch) as u32).sum();
        units as f64 / 1000.0 * font_size
    }

    fn units(&self, ch: char) -> u16 {
        let (Some(ascii), Some(latin1)) = (self.ascii, self.latin1) else {
            return self.default_width;
        };
        let cp = ch as u32;
        match cp {
            0x20..=0x7E => ascii[(cp - 0x20) as usize],
            0xA0..=0xFF => latin1[(cp - 0xA0) as usize],
            _ => self
                .extra
                .iter()
                .find(|(c, _)| *c == ch)
                .map(|(_, w)| *w)
                .unwrap_or(ascii[(u32::from('?') - 0x20) as usize]),
        }
    }
}

pub(crate) const HELVETICA: StandardFontMetrics = StandardFontMetrics {
    ascii: Some(&HELVETICA_WIDTHS),
    latin1: Some(&HELVETICA_LATIN1_WIDTHS),
    default_width: 556,
    extra: &[
        ('\u{20AC}', 556),
        ('\u{2026}', 1000),
        ('\u{2018}', 222),
        ('\u{2019}', 222),
        ('\u{201C}', 333),
        ('\u{201D}', 333),
        ('\u{2022}', 350),
        ('\u{2013}', 556),
        ('\u{2014}', 1000),
        ('\u{2122}', 1000),
    ],
};

pub(crate) const HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
    ascii: Some(&HELVETICA_BOLD_WIDTHS),
    latin1: Some(&HELVETICA_BOLD_LATIN1_WIDTHS),
    default_width: 556,
    extra: &[
        ('\u{20AC}', 556),
        ('\u{2026}', 1000),
        ('\u{2018}', 278),
        ('\u{2019}', 278),
        ('\u{201C}', 500),
        ('\u{201D}', 500),
        ('\u{2022}', 350),
        ('\u{2013}', 556),
        ('\u{2014}', 1000),
        ('\u{2122}', 1000),
    ],
};

pub(crate) const COURIER: StandardFontMetrics = StandardFontMetrics {
    ascii: None,
    latin1: None,
    default_width: 600,
    extra: &[],
};

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    333, 333, 584, 584, 584, 611, 975,
    // A-Z
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    333, 278, 333, 584, 556, 333,
    // a-z
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // { | } ~
    389, 280, 389, 584,
];

#[rustfmt::skip]
const HELVETICA_LATIN1_WIDTHS: [u16; 96] = [
    // nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // À-Ï
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // Ð-ß
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // à-ï
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // ð-ÿ
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
const HELVETICA_BOLD_LATIN1_WIDTHS: [u16; 96] = [
    // nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // À-Ï
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // Ð-ß
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // à-ï
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    // ð-ÿ
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];
