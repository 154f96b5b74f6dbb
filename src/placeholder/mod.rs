//! Placeholder tokens inserted while a title fetch is in flight.

use rand::Rng;

const BASE_LABEL: &str = "Fetching Title";
const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 4;

/// Zero-width characters used for stealth padding. Invisible when rendered,
/// but they make the literal text distinct from anything the user types.
const ZERO_WIDTH: &[char] = &['\u{200B}', '\u{200C}', '\u{200D}'];

/// A temporary in-document marker. `literal` is what actually gets written
/// into the buffer and later located by substring search; `visible` is what
/// the user sees rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderToken {
    pub visible: String,
    pub literal: String,
}

/// Generate a placeholder token. The random suffix keeps concurrent pastes
/// in one document from colliding; collision here costs a wrong replacement,
/// not a security breach, so any `Rng` will do.
///
/// With `stealth` enabled, 0-2 zero-width characters follow every base
/// character, so the literal text is almost surely unique per call while
/// rendering identically to the plain label.
pub fn generate<R: Rng>(rng: &mut R, stealth: bool) -> PlaceholderToken {
    let mut visible = String::from(BASE_LABEL);
    visible.push('#');
    for _ in 0..SUFFIX_LEN {
        let idx = rng.gen_range(0..SUFFIX_ALPHABET.len());
        visible.push(SUFFIX_ALPHABET[idx] as char);
    }

    let literal = if stealth {
        let mut padded = String::with_capacity(visible.len() * 2);
        for c in visible.chars() {
            padded.push(c);
            for _ in 0..rng.gen_range(0..=2) {
                padded.push(ZERO_WIDTH[rng.gen_range(0..ZERO_WIDTH.len())]);
            }
        }
        padded
    } else {
        visible.clone()
    };

    PlaceholderToken { visible, literal }
}

/// Strip stealth padding, recovering the rendered text.
pub fn strip_padding(literal: &str) -> String {
    literal.chars().filter(|c| !ZERO_WIDTH.contains(c)).collect()
}
