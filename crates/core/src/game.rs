use crate::{
    deal_hands, Card, CompletedRound, Event, EventBus, GameConfig, GameError, GamePhase,
    PlayedCard, Player, PlayerId, RngState, RoundLedger, Seat,
};
use serde::{Deserialize, Serialize};

/// A single table: two seats, the round history, and the resolver memory.
///
/// There is no explicit turn flag. Turn order falls out of the revealed
/// cards alone: the resolver compares what is on the table now against what
/// it saw last time (`last_seen`) and derives eligibility, stale-reveal
/// clears and round completion from that pair of pairs. Every mutation runs
/// the resolver to a fixed point before returning, so callers always observe
/// settled state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    players: [Player; 2],
    ledger: RoundLedger,
    last_seen: [Option<Card>; 2],
    saved: bool,
}

impl Game {
    pub fn new(
        config: GameConfig,
        rng: &mut RngState,
        events: &mut EventBus,
    ) -> Result<Self, GameError> {
        let (first, second) = deal_hands(&config, rng)?;
        let mut players = [Player::new(), Player::new()];
        players[0].set_hand(first);
        players[1].set_hand(second);
        events.push(Event::HandsDealt {
            each: config.hand_size(),
        });
        Ok(Self {
            config,
            players,
            ledger: RoundLedger::default(),
            last_seen: [None, None],
            saved: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn ledger(&self) -> &RoundLedger {
        &self.ledger
    }

    /// Seats a roster player (or unseats with `None`). Identity has no say
    /// in turn order; it only gates whether completed rounds get recorded.
    pub fn assign_player(&mut self, seat: Seat, id: Option<PlayerId>, events: &mut EventBus) {
        self.players[seat.index()].assign_id(id);
        self.settle(events);
    }

    /// Replaces both hands wholesale. Used at deal time.
    pub fn set_hands(&mut self, first: Vec<Card>, second: Vec<Card>, events: &mut EventBus) {
        self.players[0].set_hand(first);
        self.players[1].set_hand(second);
        self.settle(events);
    }

    /// Flips the top card of the seat's hand onto the table and lets the
    /// resolver settle the consequences.
    pub fn reveal(&mut self, seat: Seat, events: &mut EventBus) {
        self.players[seat.index()].reveal();
        self.settle(events);
    }

    pub fn score(&self, seat: Seat) -> u32 {
        match self.player(seat).id() {
            Some(id) => self.ledger.score_for(id),
            None => 0,
        }
    }

    pub fn is_winning_round(&self, seat: Seat) -> bool {
        match (
            self.player(seat).revealed(),
            self.player(seat.other()).revealed(),
        ) {
            (Some(mine), Some(theirs)) => mine > theirs,
            _ => false,
        }
    }

    pub fn is_winning_game(&self, seat: Seat) -> bool {
        self.score(seat) > self.score(seat.other())
    }

    /// The seat ahead on score, or `None` for a draw.
    pub fn winner(&self) -> Option<Seat> {
        Seat::ALL.into_iter().find(|seat| self.is_winning_game(*seat))
    }

    pub fn phase(&self) -> GamePhase {
        if self.saved {
            GamePhase::Saved
        } else if !self.players[0].has_cards() && !self.players[1].has_cards() {
            GamePhase::Over
        } else if self.players[0].id().is_some() && self.players[1].id().is_some() {
            GamePhase::OnGoing
        } else {
            GamePhase::PlayerSelection
        }
    }

    pub fn saved(&self) -> bool {
        self.saved
    }

    /// Called after a successful persist. Never reverts.
    pub fn mark_saved(&mut self) {
        self.saved = true;
    }

    fn observed(&self) -> [Option<Card>; 2] {
        [self.players[0].revealed(), self.players[1].revealed()]
    }

    /// Re-evaluates until the revealed cards stop moving. A stale-reveal
    /// clear changes the resolver's own input, so a single evaluation is not
    /// enough; the follow-up pass records the cleared table in `last_seen`.
    fn settle(&mut self, events: &mut EventBus) {
        loop {
            let before = self.observed();
            self.evaluate(events);
            if self.observed() == before {
                break;
            }
        }
    }

    fn evaluate(&mut self, events: &mut EventBus) {
        let [new_first, new_second] = self.observed();
        let [seen_first, seen_second] = self.last_seen;
        let mut first_can_act = true;
        let mut second_can_act = true;

        match (new_first, new_second) {
            // Only one card on the table: that seat waits for the opponent.
            (Some(_), None) => first_can_act = false,
            (None, Some(_)) => second_can_act = false,
            (Some(first), Some(second)) => {
                if seen_first.is_some() && seen_second.is_some() {
                    // The table was already full last time, so somebody has
                    // advanced into the next round while the opponent still
                    // shows the previous card. Clear the stale side and hold
                    // the advancing side until the opponent plays again.
                    // Card values are unique across both hands, so a changed
                    // value always means a fresh reveal.
                    if seen_first != Some(first) {
                        self.players[Seat::Second.index()].clear_reveal();
                        events.push(Event::RevealCleared { seat: Seat::Second });
                        first_can_act = false;
                    }
                    if seen_second != Some(second) {
                        self.players[Seat::First.index()].clear_reveal();
                        events.push(Event::RevealCleared { seat: Seat::First });
                        second_can_act = false;
                    }
                } else if let (Some(first_id), Some(second_id)) =
                    (self.players[0].id(), self.players[1].id())
                {
                    // Round freshly completed. Both cards stay on the table
                    // until the next reveal replaces them. Without both
                    // identities the round is not recorded.
                    let round = CompletedRound {
                        plays: [
                            PlayedCard {
                                player: first_id,
                                card: first,
                            },
                            PlayedCard {
                                player: second_id,
                                card: second,
                            },
                        ],
                    };
                    self.ledger.record(round);
                    events.push(Event::RoundCompleted { plays: round.plays });
                }
            }
            (None, None) => {}
        }

        // An empty hand overrides everything above.
        first_can_act = first_can_act && self.players[0].has_cards();
        second_can_act = second_can_act && self.players[1].has_cards();
        self.players[0].set_can_act(first_can_act);
        self.players[1].set_can_act(second_can_act);
        self.last_seen = [new_first, new_second];
    }
}
