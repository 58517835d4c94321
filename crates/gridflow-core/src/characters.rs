//! Box-drawing glyph sets and the connectivity predicate.

use crate::geometry::{Direction, Orientation};

/// A complete set of box-drawing glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSet {
    pub corner_top_left: char,
    pub corner_top_right: char,
    pub corner_bottom_right: char,
    pub corner_bottom_left: char,
    pub arrow_left: char,
    pub arrow_right: char,
    pub arrow_up: char,
    pub arrow_down: char,
    pub line_vertical: char,
    pub line_horizontal: char,
    pub junction_down: char,
    pub junction_up: char,
    pub junction_left: char,
    pub junction_right: char,
    pub junction_all: char,
}

/// The canonical glyph set every drawing is stored in.
pub const UNICODE: CharacterSet = CharacterSet {
    corner_top_left: '┌',
    corner_top_right: '┐',
    corner_bottom_right: '┘',
    corner_bottom_left: '└',
    arrow_left: '◄',
    arrow_right: '►',
    arrow_up: '▲',
    arrow_down: '▼',
    line_vertical: '│',
    line_horizontal: '─',
    junction_down: '┬',
    junction_up: '┴',
    junction_left: '┤',
    junction_right: '├',
    junction_all: '┼',
};

/// Plain ASCII equivalents, used when a drawing is converted for basic terminals.
pub const ASCII: CharacterSet = CharacterSet {
    corner_top_left: '+',
    corner_top_right: '+',
    corner_bottom_right: '+',
    corner_bottom_left: '+',
    arrow_left: '<',
    arrow_right: '>',
    arrow_up: '^',
    arrow_down: 'v',
    line_vertical: '|',
    line_horizontal: '-',
    junction_down: '+',
    junction_up: '+',
    junction_left: '+',
    junction_right: '+',
    junction_all: '+',
};

/// Placeholder stored for every line cell in legacy documents.
pub const SPECIAL_VALUE: char = UNICODE.junction_all;
/// Placeholder stored for every arrow cell in legacy documents.
pub const ALT_SPECIAL_VALUE: char = UNICODE.arrow_right;

impl CharacterSet {
    fn pairs(&self) -> [(char, char); 15] {
        [
            (UNICODE.corner_top_left, self.corner_top_left),
            (UNICODE.corner_top_right, self.corner_top_right),
            (UNICODE.corner_bottom_right, self.corner_bottom_right),
            (UNICODE.corner_bottom_left, self.corner_bottom_left),
            (UNICODE.arrow_left, self.arrow_left),
            (UNICODE.arrow_right, self.arrow_right),
            (UNICODE.arrow_up, self.arrow_up),
            (UNICODE.arrow_down, self.arrow_down),
            (UNICODE.line_vertical, self.line_vertical),
            (UNICODE.line_horizontal, self.line_horizontal),
            (UNICODE.junction_down, self.junction_down),
            (UNICODE.junction_up, self.junction_up),
            (UNICODE.junction_left, self.junction_left),
            (UNICODE.junction_right, self.junction_right),
            (UNICODE.junction_all, self.junction_all),
        ]
    }

    /// Translate a canonical glyph into this set; other characters pass through.
    pub fn translate(&self, glyph: char) -> char {
        self.pairs()
            .iter()
            .find(|(canonical, _)| *canonical == glyph)
            .map_or(glyph, |(_, translated)| *translated)
    }
}

/// Directions a glyph has a connectable edge in.
fn edges(glyph: char) -> &'static [Direction] {
    use Direction::*;
    match glyph {
        '─' => &[Left, Right],
        '│' => &[Up, Down],
        '┌' => &[Right, Down],
        '┐' => &[Left, Down],
        '┘' => &[Left, Up],
        '└' => &[Right, Up],
        '┬' => &[Left, Right, Down],
        '┴' => &[Left, Right, Up],
        '┤' => &[Up, Down, Left],
        '├' => &[Up, Down, Right],
        '┼' => &[Up, Down, Left, Right],
        // Arrows connect on their tail side only.
        '▲' => &[Down],
        '▼' => &[Up],
        '◄' => &[Right],
        '►' => &[Left],
        _ => &[],
    }
}

/// Whether `glyph` has an edge exiting in `direction`.
pub fn connects(glyph: Option<char>, direction: Direction) -> bool {
    glyph.is_some_and(|g| edges(g).contains(&direction))
}

/// Corner, junction and straight-line glyphs.
pub fn is_line(glyph: char) -> bool {
    !is_arrow(glyph) && !edges(glyph).is_empty()
}

pub fn is_arrow(glyph: char) -> bool {
    matches!(glyph, '▲' | '▼' | '◄' | '►')
}

/// Any glyph that takes part in connectivity (lines, corners, junctions, arrows).
pub fn is_special(glyph: char) -> bool {
    !edges(glyph).is_empty()
}

/// The straight-line glyph for runs along `orientation`.
pub fn straight_line(orientation: Orientation) -> char {
    match orientation {
        Orientation::Horizontal => UNICODE.line_horizontal,
        Orientation::Vertical => UNICODE.line_vertical,
    }
}

/// Orientation of a canonical straight-line glyph.
pub fn line_orientation(glyph: char) -> Option<Orientation> {
    match glyph {
        '─' => Some(Orientation::Horizontal),
        '│' => Some(Orientation::Vertical),
        _ => None,
    }
}

/// The line-family glyph joining exactly the given directions.
///
/// Returns `None` for fewer than two directions, where no single glyph applies.
pub fn glyph_for_directions(up: bool, down: bool, left: bool, right: bool) -> Option<char> {
    let glyph = match (up, down, left, right) {
        (true, true, true, true) => UNICODE.junction_all,
        (false, true, true, true) => UNICODE.junction_down,
        (true, false, true, true) => UNICODE.junction_up,
        (true, true, true, false) => UNICODE.junction_left,
        (true, true, false, true) => UNICODE.junction_right,
        (false, false, true, true) => UNICODE.line_horizontal,
        (true, true, false, false) => UNICODE.line_vertical,
        (false, true, false, true) => UNICODE.corner_top_left,
        (false, true, true, false) => UNICODE.corner_top_right,
        (true, false, true, false) => UNICODE.corner_bottom_right,
        (true, false, false, true) => UNICODE.corner_bottom_left,
        _ => return None,
    };
    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connects_straight_lines() {
        assert!(connects(Some('─'), Direction::Left));
        assert!(connects(Some('─'), Direction::Right));
        assert!(!connects(Some('─'), Direction::Up));
        assert!(connects(Some('│'), Direction::Down));
        assert!(!connects(None, Direction::Down));
        assert!(!connects(Some('x'), Direction::Down));
    }

    #[test]
    fn test_arrows_connect_on_tail() {
        assert!(connects(Some('▲'), Direction::Down));
        assert!(!connects(Some('▲'), Direction::Up));
        assert!(is_arrow('►'));
        assert!(!is_line('►'));
        assert!(is_special('►'));
    }

    #[test]
    fn test_glyph_for_directions_matches_edges() {
        for glyph in ['─', '│', '┌', '┐', '┘', '└', '┬', '┴', '┤', '├', '┼'] {
            let has = |d| connects(Some(glyph), d);
            let rebuilt = glyph_for_directions(
                has(Direction::Up),
                has(Direction::Down),
                has(Direction::Left),
                has(Direction::Right),
            );
            assert_eq!(rebuilt, Some(glyph));
        }
        assert_eq!(glyph_for_directions(true, false, false, false), None);
    }

    #[test]
    fn test_ascii_translation() {
        assert_eq!(ASCII.translate('┼'), '+');
        assert_eq!(ASCII.translate('│'), '|');
        assert_eq!(ASCII.translate('a'), 'a');
    }
}
