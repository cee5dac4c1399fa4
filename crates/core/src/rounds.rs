use crate::{Card, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub player: PlayerId,
    pub card: Card,
}

/// One finished exchange. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedRound {
    pub plays: [PlayedCard; 2],
}

impl CompletedRound {
    pub fn card_of(&self, player: PlayerId) -> Option<Card> {
        self.plays
            .iter()
            .find(|play| play.player == player)
            .map(|play| play.card)
    }

    pub fn card_against(&self, player: PlayerId) -> Option<Card> {
        self.plays
            .iter()
            .find(|play| play.player != player)
            .map(|play| play.card)
    }

    /// Higher card takes the round; a tie takes nobody.
    pub fn winner(&self) -> Option<PlayerId> {
        let [first, second] = self.plays;
        if first.card > second.card {
            Some(first.player)
        } else if second.card > first.card {
            Some(second.player)
        } else {
            None
        }
    }
}

/// Append-only history of completed rounds, in play order. Scores are folds
/// over this history, never counters kept on the side.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RoundLedger {
    rounds: Vec<CompletedRound>,
}

impl RoundLedger {
    pub(crate) fn record(&mut self, round: CompletedRound) {
        self.rounds.push(round);
    }

    pub fn rounds(&self) -> &[CompletedRound] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn score_for(&self, player: PlayerId) -> u32 {
        self.rounds
            .iter()
            .filter(|round| {
                match (round.card_of(player), round.card_against(player)) {
                    (Some(mine), Some(theirs)) => mine > theirs,
                    _ => false,
                }
            })
            .count() as u32
    }
}
