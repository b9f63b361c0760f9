//! Glyph source for the rain.

use rand::Rng;

/// Characters a drop can show: half-width katakana, digits and punctuation.
pub const GLYPHS: &[char] = &[
    'ﾊ', 'ﾐ', 'ﾋ', 'ｰ', 'ｳ', 'ｼ', 'ﾅ', 'ﾓ', 'ﾆ', 'ｻ', 'ﾜ', 'ﾂ', 'ｵ', 'ﾘ', 'ｱ', 'ﾎ',
    'ﾃ', 'ﾏ', 'ｹ', 'ﾒ', 'ｴ', 'ｶ', 'ｷ', 'ﾑ', 'ﾕ', 'ﾗ', 'ｾ', 'ﾈ', 'ｽ', 'ﾀ', 'ﾇ', 'ﾍ',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'Y', 'Z',
    ':', '.', '=', '*', '+', '-', '<', '>', '¦', '|',
];

/// Pick a glyph uniformly at random.
pub fn random_glyph<R: Rng + ?Sized>(rng: &mut R) -> char {
    GLYPHS[rng.random_range(0..GLYPHS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_glyph_count() {
        assert_eq!(GLYPHS.len(), 54);
    }

    #[test]
    fn test_random_glyph_is_from_set() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(GLYPHS.contains(&random_glyph(&mut rng)));
        }
    }
}
