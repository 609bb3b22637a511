use std::collections::{BTreeMap, BTreeSet};

pub use errors::GameError;
pub use player::{Player, DEFAULT_COLORS};
pub use scoring::{score, Entry};
pub use stats::{Awards, GameStats, PlayerAnalysis};

mod errors;
mod player;
mod scoring;
mod stats;

/// Total cards in a Wizard deck; the round count is however many full
/// deals the deck allows.
pub const DECK_SIZE: u32 = 60;

/// Smallest roster the bidding rules make sense for.
pub const MIN_PLAYERS: usize = 3;

/// Entries for one round, keyed by player name.
pub type RoundEntries = BTreeMap<String, Entry>;

/// The score sheet for one game of Wizard: the roster, every round's bid
/// and trick entries, the dealer rotation and the lifecycle state.
///
/// All mutations report validation failures as [`GameError`] values and
/// leave the sheet unchanged on failure, so the caller can correct the
/// input and retry.
///
/// # Examples
/// ```
/// use wizard::Wizard;
///
/// let mut game = Wizard::new();
/// for name in ["Ana", "Bram", "Cleo"] {
///     game.add_player(name).unwrap();
/// }
/// game.start_game(0).unwrap();
/// assert_eq!(game.max_rounds(), 20);
/// assert_eq!(game.dealer(1), Some("Ana"));
/// ```
#[derive(Debug, Clone)]
pub struct Wizard {
    phase: Phase,
    players: Vec<Player>,
    rounds: BTreeMap<u32, RoundEntries>,
    starting_dealer: usize,
    current_round: u32,
    max_rounds: u32,
    stats: Option<GameStats>,
}

impl Wizard {
    /// Create an empty score sheet, ready for players to join.
    pub fn new() -> Self {
        Wizard {
            phase: Phase::Setup,
            players: Vec::new(),
            rounds: BTreeMap::new(),
            starting_dealer: 0,
            current_round: 1,
            max_rounds: 0,
            stats: None,
        }
    }

    /// Rebuild a session from persisted parts. Roster names must be
    /// unique and the counters coherent; bids and tricks inside
    /// historical entries are taken as recorded, out-of-range or not.
    pub fn restore(
        players: Vec<Player>,
        rounds: BTreeMap<u32, RoundEntries>,
        starting_dealer: usize,
        current_round: u32,
        max_rounds: u32,
        started: bool,
    ) -> Result<Self, GameError> {
        let mut seen = BTreeSet::new();
        for player in &players {
            if !seen.insert(player.name.as_str()) {
                return Err(GameError::DuplicatePlayer(player.name.clone()));
            }
        }
        if started {
            if players.len() < MIN_PLAYERS {
                return Err(GameError::NotEnoughPlayers);
            }
            if starting_dealer >= players.len() {
                return Err(GameError::InvalidDealer(starting_dealer));
            }
            if current_round == 0 || current_round > max_rounds {
                return Err(GameError::RoundOutOfRange(current_round));
            }
        }
        Ok(Wizard {
            phase: if started { Phase::InRound } else { Phase::Setup },
            players,
            rounds,
            starting_dealer,
            current_round: current_round.max(1),
            max_rounds: if started { max_rounds } else { 0 },
            stats: None,
        })
    }

    /// Add a player to the end of the roster with the next palette color.
    /// Only legal before the game starts.
    pub fn add_player(&mut self, name: &str) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::RosterLocked);
        }
        if self.player_index(name).is_some() {
            return Err(GameError::DuplicatePlayer(name.to_owned()));
        }
        let position = self.players.len();
        self.players.push(Player::at_position(name.to_owned(), position));
        Ok(())
    }

    /// Remove a player from the roster. Only legal before the game starts.
    pub fn remove_player(&mut self, name: &str) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::RosterLocked);
        }
        let index = self
            .player_index(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_owned()))?;
        self.players.remove(index);
        Ok(())
    }

    /// Swap the player at `index` with their neighbor. Out-of-range moves
    /// are a no-op. Only legal before the game starts.
    pub fn reorder_player(&mut self, index: usize, direction: Direction) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::RosterLocked);
        }
        let neighbor = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => index.checked_add(1),
        };
        if let Some(neighbor) = neighbor {
            if index < self.players.len() && neighbor < self.players.len() {
                self.players.swap(index, neighbor);
            }
        }
        Ok(())
    }

    /// Rename a player everywhere: the roster entry keeps its position and
    /// color, every round's entries move to the new key, and any cached
    /// statistics follow. The whole rename happens or none of it does.
    pub fn rename_player(&mut self, old: &str, new: &str) -> Result<(), GameError> {
        if new == old || self.player_index(new).is_some() {
            return Err(GameError::DuplicatePlayer(new.to_owned()));
        }
        let index = self
            .player_index(old)
            .ok_or_else(|| GameError::UnknownPlayer(old.to_owned()))?;
        self.players[index].name = new.to_owned();
        for entries in self.rounds.values_mut() {
            if let Some(entry) = entries.remove(old) {
                entries.insert(new.to_owned(), entry);
            }
        }
        if let Some(stats) = &mut self.stats {
            stats.rename_player(old, new);
        }
        Ok(())
    }

    /// Change a player's display color. Legal at any time.
    pub fn set_player_color(&mut self, name: &str, color: &str) -> Result<(), GameError> {
        let index = self
            .player_index(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_owned()))?;
        self.players[index].color = color.to_owned();
        Ok(())
    }

    /// Start the game with the given starting dealer. Requires at least
    /// [`MIN_PLAYERS`] players; clears any previous round data.
    pub fn start_game(&mut self, starting_dealer: usize) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::AlreadyStarted);
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }
        if starting_dealer >= self.players.len() {
            return Err(GameError::InvalidDealer(starting_dealer));
        }
        self.starting_dealer = starting_dealer;
        self.max_rounds = DECK_SIZE / self.players.len() as u32;
        self.current_round = 1;
        self.rounds.clear();
        self.stats = None;
        self.init_round(1);
        self.phase = Phase::InRound;
        Ok(())
    }

    /// Record a bid. Any round up to the current one may be edited while
    /// the game is in play; the value's upper bound is the caller's
    /// responsibility, since reloaded games may hold boundary values.
    pub fn record_bid(&mut self, round: u32, player: &str, bid: u8) -> Result<(), GameError> {
        self.entry_mut(round, player)?.bid = Some(bid);
        Ok(())
    }

    /// Record tricks won. Same editing rules as [`Wizard::record_bid`].
    pub fn record_tricks(&mut self, round: u32, player: &str, tricks: u8) -> Result<(), GameError> {
        self.entry_mut(round, player)?.tricks = Some(tricks);
        Ok(())
    }

    /// Close the current round and open the next one. Fails unless the
    /// recorded tricks sum to exactly the round number. Returns the closed
    /// round and the players who were off by two or more in it.
    pub fn advance_round(&mut self) -> Result<RoundOutcome, GameError> {
        self.in_round()?;
        if self.current_round >= self.max_rounds {
            return Err(GameError::FinalRound);
        }
        let round = self.current_round;
        let recorded = self.trick_total(round);
        if recorded != round {
            return Err(GameError::TrickCountMismatch {
                round,
                recorded,
                expected: round,
            });
        }
        let shot_players = self
            .shot_players(round)
            .into_iter()
            .map(str::to_owned)
            .collect();
        self.current_round += 1;
        self.init_round(self.current_round);
        Ok(RoundOutcome {
            round,
            shot_players,
        })
    }

    /// Finish the game. Requires the final round to be reached, fully
    /// entered and consistent. Computes the statistics once and caches
    /// them; calling again returns the cached statistics untouched.
    pub fn finish_game(&mut self) -> Result<&GameStats, GameError> {
        match self.phase {
            Phase::Setup => return Err(GameError::NotStarted),
            Phase::Finished => {}
            Phase::InRound => {
                if self.current_round != self.max_rounds {
                    return Err(GameError::NotFinalRound);
                }
                let round = self.current_round;
                if !self.all_complete(round) {
                    return Err(GameError::IncompleteRound(round));
                }
                let recorded = self.trick_total(round);
                if recorded != round {
                    return Err(GameError::TrickCountMismatch {
                        round,
                        recorded,
                        expected: round,
                    });
                }
                self.phase = Phase::Finished;
            }
        }
        if self.stats.is_none() {
            self.stats = Some(stats::analyze(self));
        }
        Ok(self.stats.as_ref().expect("stats cached above"))
    }

    /// Clear everything, roster included.
    pub fn reset(&mut self) {
        *self = Wizard::new();
    }

    /// Start a fresh game with the same roster, colors and starting
    /// dealer. Only legal once the previous game is finished.
    pub fn replay_with_same_roster(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Finished {
            return Err(GameError::NotFinished);
        }
        self.rounds.clear();
        self.stats = None;
        self.current_round = 1;
        self.init_round(1);
        self.phase = Phase::InRound;
        Ok(())
    }

    /// Analyze the game as it stands, finished or not. The cached result
    /// from [`Wizard::finish_game`] is preferred when present.
    pub fn analyze(&self) -> GameStats {
        match &self.stats {
            Some(stats) => stats.clone(),
            None => stats::analyze(self),
        }
    }

    /// The statistics cached by [`Wizard::finish_game`], if any.
    pub fn stats(&self) -> Option<&GameStats> {
        self.stats.as_ref()
    }

    /// The dealer for `round`, rotating through the roster from the
    /// starting dealer. `None` before the game starts.
    pub fn dealer(&self, round: u32) -> Option<&str> {
        if self.phase == Phase::Setup || round == 0 {
            return None;
        }
        let index = (self.starting_dealer + round as usize - 1) % self.players.len();
        Some(&self.players[index].name)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn rounds(&self) -> &BTreeMap<u32, RoundEntries> {
        &self.rounds
    }

    pub fn round_entries(&self, round: u32) -> Option<&RoundEntries> {
        self.rounds.get(&round)
    }

    /// The recorded entry for a player in a round, if the round exists.
    pub fn entry(&self, round: u32, player: &str) -> Option<Entry> {
        self.rounds.get(&round).and_then(|e| e.get(player)).copied()
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn starting_dealer(&self) -> usize {
        self.starting_dealer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_started(&self) -> bool {
        self.phase != Phase::Setup
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    fn player_index(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|player| player.name == name)
    }

    /// Make sure `round` has an entry for every player. Idempotent;
    /// existing entries are untouched.
    fn init_round(&mut self, round: u32) {
        let entries = self.rounds.entry(round).or_default();
        for player in &self.players {
            entries.entry(player.name.clone()).or_default();
        }
    }

    fn in_round(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Setup => Err(GameError::NotStarted),
            Phase::Finished => Err(GameError::GameOver),
            Phase::InRound => Ok(()),
        }
    }

    fn entry_mut(&mut self, round: u32, player: &str) -> Result<&mut Entry, GameError> {
        self.in_round()?;
        if round == 0 || round > self.current_round {
            return Err(GameError::RoundOutOfRange(round));
        }
        if self.player_index(player).is_none() {
            return Err(GameError::UnknownPlayer(player.to_owned()));
        }
        Ok(self
            .rounds
            .entry(round)
            .or_default()
            .entry(player.to_owned())
            .or_default())
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Wizard::new()
    }
}

/// Where the session is in its life: gathering players, playing rounds,
/// or done and analyzed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Setup,
    InRound,
    Finished,
}

/// Roster reorder direction for [`Wizard::reorder_player`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What [`Wizard::advance_round`] reports back: the round just closed and
/// who owes a shot for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub round: u32,
    pub shot_players: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(names: &[&str]) -> Wizard {
        let mut game = Wizard::new();
        for name in names {
            game.add_player(name).unwrap();
        }
        game
    }

    fn complete_round(game: &mut Wizard, taker: &str) {
        let round = game.current_round();
        let names: Vec<String> = game.player_names().into_iter().map(str::to_owned).collect();
        for name in names {
            let tricks = if name == taker { round as u8 } else { 0 };
            game.record_bid(round, &name, tricks).unwrap();
            game.record_tricks(round, &name, tricks).unwrap();
        }
    }

    #[test]
    fn test_roster_management() {
        let mut game = game_with(&["Ana", "Bram"]);
        assert_eq!(
            game.add_player("Ana"),
            Err(GameError::DuplicatePlayer("Ana".to_owned()))
        );
        game.add_player("Cleo").unwrap();
        assert_eq!(game.player_names(), vec!["Ana", "Bram", "Cleo"]);
        // palette cycles by position
        assert_eq!(game.players()[0].color, DEFAULT_COLORS[0]);
        assert_eq!(game.players()[2].color, DEFAULT_COLORS[2]);

        game.reorder_player(2, Direction::Up).unwrap();
        assert_eq!(game.player_names(), vec!["Ana", "Cleo", "Bram"]);
        // out of range moves are no-ops
        game.reorder_player(0, Direction::Up).unwrap();
        game.reorder_player(5, Direction::Down).unwrap();
        assert_eq!(game.player_names(), vec!["Ana", "Cleo", "Bram"]);

        game.remove_player("Cleo").unwrap();
        assert_eq!(
            game.remove_player("Cleo"),
            Err(GameError::UnknownPlayer("Cleo".to_owned()))
        );
        assert_eq!(game.player_names(), vec!["Ana", "Bram"]);
    }

    #[test]
    fn test_roster_locked_after_start() {
        let mut game = game_with(&["Ana", "Bram", "Cleo"]);
        game.start_game(0).unwrap();
        assert_eq!(game.add_player("Dana"), Err(GameError::RosterLocked));
        assert_eq!(game.remove_player("Ana"), Err(GameError::RosterLocked));
        assert_eq!(
            game.reorder_player(0, Direction::Down),
            Err(GameError::RosterLocked)
        );
    }

    #[test]
    fn test_start_requires_three_players() {
        let mut game = game_with(&["Ana", "Bram"]);
        assert_eq!(game.start_game(0), Err(GameError::NotEnoughPlayers));
        game.add_player("Cleo").unwrap();
        assert_eq!(game.start_game(7), Err(GameError::InvalidDealer(7)));
        game.start_game(1).unwrap();
        assert_eq!(game.start_game(1), Err(GameError::AlreadyStarted));
    }

    #[test]
    fn test_max_rounds_by_roster_size() {
        for (names, expected) in [
            (vec!["a", "b", "c"], 20),
            (vec!["a", "b", "c", "d"], 15),
            (vec!["a", "b", "c", "d", "e"], 12),
            (vec!["a", "b", "c", "d", "e", "f"], 10),
        ] {
            let mut game = game_with(&names);
            game.start_game(0).unwrap();
            assert_eq!(game.max_rounds(), expected, "for {} players", names.len());
        }
    }

    #[test]
    fn test_dealer_rotation() {
        let mut game = game_with(&["Ana", "Bram", "Cleo", "Dana"]);
        assert_eq!(game.dealer(1), None);
        game.start_game(2).unwrap();
        assert_eq!(game.dealer(1), Some("Cleo"));
        assert_eq!(game.dealer(2), Some("Dana"));
        assert_eq!(game.dealer(3), Some("Ana"));
        assert_eq!(game.dealer(5), Some("Cleo"));
    }

    #[test]
    fn test_rename_migrates_everything() {
        let mut game = game_with(&["Ana", "Bram", "Cleo"]);
        game.start_game(0).unwrap();
        game.record_bid(1, "Bram", 1).unwrap();
        game.record_tricks(1, "Bram", 1).unwrap();
        let color = game.players()[1].color.clone();

        game.rename_player("Bram", "Bert").unwrap();
        assert_eq!(game.player_names(), vec!["Ana", "Bert", "Cleo"]);
        assert_eq!(game.players()[1].color, color);
        assert_eq!(game.entry(1, "Bram"), None);
        assert_eq!(
            game.entry(1, "Bert"),
            Some(Entry {
                bid: Some(1),
                tricks: Some(1)
            })
        );
    }

    #[test]
    fn test_rename_collision_leaves_state_unchanged() {
        let mut game = game_with(&["Ana", "Bram", "Cleo"]);
        assert_eq!(
            game.rename_player("Ana", "Bram"),
            Err(GameError::DuplicatePlayer("Bram".to_owned()))
        );
        assert_eq!(
            game.rename_player("Ana", "Ana"),
            Err(GameError::DuplicatePlayer("Ana".to_owned()))
        );
        assert_eq!(
            game.rename_player("Dana", "Eve"),
            Err(GameError::UnknownPlayer("Dana".to_owned()))
        );
        assert_eq!(game.player_names(), vec!["Ana", "Bram", "Cleo"]);
    }

    #[test]
    fn test_advance_round_validates_trick_sum() {
        let mut game = game_with(&["Ana", "Bram", "Cleo"]);
        game.start_game(0).unwrap();
        assert_eq!(
            game.advance_round(),
            Err(GameError::TrickCountMismatch {
                round: 1,
                recorded: 0,
                expected: 1
            })
        );
        game.record_tricks(1, "Ana", 1).unwrap();
        game.record_tricks(1, "Bram", 1).unwrap();
        assert_eq!(
            game.advance_round(),
            Err(GameError::TrickCountMismatch {
                round: 1,
                recorded: 2,
                expected: 1
            })
        );
        game.record_tricks(1, "Bram", 0).unwrap();
        game.record_bid(1, "Ana", 3).unwrap();
        let outcome = game.advance_round().unwrap();
        assert_eq!(outcome.round, 1);
        // Ana bid 3 and took 1
        assert_eq!(outcome.shot_players, vec!["Ana".to_owned()]);
        assert_eq!(game.current_round(), 2);
        // the new round is initialized with empty entries for everyone
        assert_eq!(game.entry(2, "Cleo"), Some(Entry::default()));
    }

    #[test]
    fn test_two_round_totals_four_players() {
        let mut game = game_with(&["A", "B", "C", "D"]);
        game.start_game(0).unwrap();
        for (name, bid, tricks) in [("A", 0, 0), ("B", 0, 0), ("C", 0, 0), ("D", 1, 1)] {
            game.record_bid(1, name, bid).unwrap();
            game.record_tricks(1, name, tricks).unwrap();
        }
        game.advance_round().unwrap();
        for (name, bid, tricks) in [("A", 1, 0), ("B", 0, 1), ("C", 1, 1), ("D", 0, 0)] {
            game.record_bid(2, name, bid).unwrap();
            game.record_tricks(2, name, tricks).unwrap();
        }
        game.advance_round().unwrap();
        assert_eq!(
            game.total_scores(),
            vec![("A", 10), ("B", 10), ("C", 50), ("D", 50)]
        );
        assert_eq!(
            game.standings(),
            vec![("C", 50), ("D", 50), ("A", 10), ("B", 10)]
        );
    }

    #[test]
    fn test_full_game_and_idempotent_finish() {
        let mut game = game_with(&["Ana", "Bram", "Cleo"]);
        game.start_game(0).unwrap();
        assert_eq!(game.finish_game().err(), Some(GameError::NotFinalRound));
        while game.current_round() < game.max_rounds() {
            complete_round(&mut game, "Ana");
            game.advance_round().unwrap();
        }
        assert_eq!(game.advance_round().err(), Some(GameError::FinalRound));
        assert_eq!(
            game.finish_game().err(),
            Some(GameError::IncompleteRound(20))
        );
        complete_round(&mut game, "Bram");
        let first = game.finish_game().unwrap().clone();
        assert!(game.is_finished());
        // repeated calls return the cached statistics unchanged
        let second = game.finish_game().unwrap().clone();
        assert_eq!(first, second);
        // recording into a finished game is rejected
        assert_eq!(
            game.record_bid(1, "Ana", 0),
            Err(GameError::GameOver)
        );
        // once finished, the final round counts toward the totals
        let totals = game.total_scores();
        assert_eq!(totals.len(), 3);
        assert!(totals.iter().all(|&(_, total)| total != 0));
    }

    #[test]
    fn test_replay_keeps_roster_and_dealer() {
        let mut game = game_with(&["Ana", "Bram", "Cleo"]);
        game.start_game(1).unwrap();
        assert_eq!(game.replay_with_same_roster(), Err(GameError::NotFinished));
        while game.current_round() < game.max_rounds() {
            complete_round(&mut game, "Cleo");
            game.advance_round().unwrap();
        }
        complete_round(&mut game, "Cleo");
        game.finish_game().unwrap();

        game.replay_with_same_roster().unwrap();
        assert_eq!(game.phase(), Phase::InRound);
        assert_eq!(game.player_names(), vec!["Ana", "Bram", "Cleo"]);
        assert_eq!(game.starting_dealer(), 1);
        assert_eq!(game.current_round(), 1);
        assert_eq!(game.stats(), None);
        assert_eq!(game.rounds().len(), 1);
        assert_eq!(game.entry(1, "Ana"), Some(Entry::default()));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut game = game_with(&["Ana", "Bram", "Cleo"]);
        game.start_game(0).unwrap();
        game.record_bid(1, "Ana", 1).unwrap();
        game.reset();
        assert_eq!(game.phase(), Phase::Setup);
        assert!(game.players().is_empty());
        assert!(game.rounds().is_empty());
    }

    #[test]
    fn test_record_rejects_future_rounds_and_unknown_players() {
        let mut game = game_with(&["Ana", "Bram", "Cleo"]);
        assert_eq!(game.record_bid(1, "Ana", 0), Err(GameError::NotStarted));
        game.start_game(0).unwrap();
        assert_eq!(
            game.record_bid(2, "Ana", 0),
            Err(GameError::RoundOutOfRange(2))
        );
        assert_eq!(
            game.record_bid(0, "Ana", 0),
            Err(GameError::RoundOutOfRange(0))
        );
        assert_eq!(
            game.record_bid(1, "Dana", 0),
            Err(GameError::UnknownPlayer("Dana".to_owned()))
        );
    }

    #[test]
    fn test_closed_rounds_stay_editable_in_play() {
        let mut game = game_with(&["Ana", "Bram", "Cleo"]);
        game.start_game(0).unwrap();
        complete_round(&mut game, "Ana");
        game.advance_round().unwrap();
        // round 1 is closed but the game is in play; fixing a mistake is fine
        game.record_tricks(1, "Ana", 0).unwrap();
        game.record_tricks(1, "Bram", 1).unwrap();
        assert_eq!(game.entry(1, "Ana").unwrap().tricks, Some(0));
        // the corrected entries flow straight into the totals
        assert_eq!(game.total_scores()[0], ("Ana", -10));
        assert_eq!(game.total_scores()[1], ("Bram", -10));
    }

    #[test]
    fn test_rename_after_finish_migrates_cached_stats() {
        let mut game = game_with(&["Ana", "Bram", "Cleo"]);
        game.start_game(0).unwrap();
        while game.current_round() < game.max_rounds() {
            complete_round(&mut game, "Ana");
            game.advance_round().unwrap();
        }
        complete_round(&mut game, "Ana");
        game.finish_game().unwrap();

        game.rename_player("Ana", "Annika").unwrap();
        let stats = game.stats().unwrap();
        assert!(stats.players.contains(&"Annika".to_owned()));
        assert_eq!(stats.analysis_for("Ana"), None);
        let annika = stats.analysis_for("Annika").unwrap();
        assert_eq!(annika.end_rank, 1);
        assert_eq!(stats.awards.most_accurate, "Annika");
        assert!(stats
            .standings_by_round
            .iter()
            .all(|standing| standing.iter().any(|(name, _)| name.as_str() == "Annika")));
        assert!(stats.running_totals.contains_key("Annika"));
        assert!(!stats.running_totals.contains_key("Ana"));
    }

    #[test]
    fn test_restore_validation() {
        let players: Vec<Player> = ["Ana", "Bram", "Cleo"]
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(*name, DEFAULT_COLORS[i]))
            .collect();
        let mut duped = players.clone();
        duped.push(Player::new("Ana", "#000000"));
        assert!(matches!(
            Wizard::restore(duped, BTreeMap::new(), 0, 1, 20, true),
            Err(GameError::DuplicatePlayer(_))
        ));
        assert!(matches!(
            Wizard::restore(players.clone(), BTreeMap::new(), 9, 1, 20, true),
            Err(GameError::InvalidDealer(9))
        ));
        assert!(matches!(
            Wizard::restore(players.clone(), BTreeMap::new(), 0, 25, 20, true),
            Err(GameError::RoundOutOfRange(25))
        ));
        let game = Wizard::restore(players, BTreeMap::new(), 0, 5, 20, true).unwrap();
        assert_eq!(game.phase(), Phase::InRound);
        assert_eq!(game.current_round(), 5);
    }
}
