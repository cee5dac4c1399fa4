use crate::{GameConfig, GameError, RngState};

pub type Card = u32;

/// Shuffled run of `1..=deck_size`, split evenly into the two starting
/// hands. The two hands are disjoint and together cover the whole range.
pub fn deal_hands(
    config: &GameConfig,
    rng: &mut RngState,
) -> Result<(Vec<Card>, Vec<Card>), GameError> {
    config.validate()?;
    let mut deck: Vec<Card> = (1..=config.deck_size).collect();
    rng.shuffle(&mut deck);
    let second = deck.split_off(config.hand_size());
    Ok((deck, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hands_are_disjoint_and_cover_the_deck() {
        for size in [2u32, 4, 10, 32] {
            let config = GameConfig::with_deck_size(size);
            let mut rng = RngState::from_seed(7);
            let (first, second) = deal_hands(&config, &mut rng).expect("deal");
            assert_eq!(first.len(), (size / 2) as usize);
            assert_eq!(second.len(), (size / 2) as usize);
            let mut all: Vec<Card> = first.iter().chain(second.iter()).copied().collect();
            all.sort_unstable();
            let expected: Vec<Card> = (1..=size).collect();
            assert_eq!(all, expected);
        }
    }

    #[test]
    fn odd_deck_size_is_rejected() {
        let config = GameConfig::with_deck_size(5);
        let mut rng = RngState::from_seed(7);
        assert_eq!(
            deal_hands(&config, &mut rng).unwrap_err(),
            GameError::OddDeckSize(5)
        );
    }

    #[test]
    fn zero_deck_size_is_rejected() {
        let config = GameConfig::with_deck_size(0);
        let mut rng = RngState::from_seed(7);
        assert_eq!(
            deal_hands(&config, &mut rng).unwrap_err(),
            GameError::DeckTooSmall(0)
        );
    }
}
