//! The serialized shape of a game, stable across versions of the save
//! format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use wizard::{Entry, Player, Wizard, DEFAULT_COLORS};

use crate::errors::SnapshotError;

/// One saved game. Field names and shapes are the on-disk contract, so
/// older saves keep loading: colors and the dealer index are optional,
/// and round keys live under their JSON string form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub title: String,
    pub players: Vec<String>,
    #[serde(default)]
    pub player_colors: BTreeMap<String, String>,
    #[serde(default)]
    pub starting_dealer_index: usize,
    pub current_round: u32,
    pub game_data: BTreeMap<u32, BTreeMap<String, Entry>>,
    pub max_rounds: u32,
    pub game_started: bool,
    #[serde(with = "time::serde::iso8601")]
    pub saved_at: OffsetDateTime,
    pub total_scores: BTreeMap<String, i64>,
}

impl Snapshot {
    /// Capture the current state of a game under a title.
    pub fn capture(game: &Wizard, title: impl Into<String>) -> Self {
        Snapshot {
            title: title.into(),
            players: game.player_names().into_iter().map(str::to_owned).collect(),
            player_colors: game
                .players()
                .iter()
                .map(|player| (player.name.clone(), player.color.clone()))
                .collect(),
            starting_dealer_index: game.starting_dealer(),
            current_round: game.current_round(),
            game_data: game.rounds().clone(),
            max_rounds: game.max_rounds(),
            game_started: game.has_started(),
            saved_at: OffsetDateTime::now_utc(),
            total_scores: game
                .total_scores()
                .into_iter()
                .map(|(name, total)| (name.to_owned(), total))
                .collect(),
        }
    }

    /// Rebuild a playable game. Players missing from the color map get a
    /// palette color by roster position. A game that had finished resumes
    /// on its final round; finishing it again recomputes the statistics.
    pub fn restore(&self) -> Result<Wizard, SnapshotError> {
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(position, name)| {
                let color = self
                    .player_colors
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_COLORS[position % DEFAULT_COLORS.len()].to_owned());
                Player::new(name.clone(), color)
            })
            .collect();
        let game = Wizard::restore(
            players,
            self.game_data.clone(),
            self.starting_dealer_index,
            self.current_round,
            self.max_rounds,
            self.game_started,
        )?;
        Ok(game)
    }

    /// A default title when the user did not pick one.
    pub fn default_title(game: &Wizard) -> String {
        format!("Game: {}", game.player_names().join(", "))
    }
}
