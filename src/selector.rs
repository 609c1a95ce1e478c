//! Card selection
//!
//! Picks a card uniformly at random, never showing the same card twice in a
//! row when there is anything else to show.

use rand::Rng;

/// Pick a card from `cards`, avoiding `current` when possible.
///
/// - Empty list: `None`
/// - One card: that card, even if it is `current`
/// - Otherwise: uniform over every card except `current`
pub fn pick_card<'a, R: Rng + ?Sized>(
    cards: &'a [String],
    current: Option<&str>,
    rng: &mut R,
) -> Option<&'a str> {
    match cards.len() {
        0 => None,
        1 => Some(cards[0].as_str()),
        len => {
            // A list made entirely of the current card would never terminate
            if cards.iter().all(|c| Some(c.as_str()) == current) {
                return Some(cards[0].as_str());
            }
            loop {
                let card = cards[rng.random_range(0..len)].as_str();
                if Some(card) != current {
                    return Some(card);
                }
            }
        }
    }
}
