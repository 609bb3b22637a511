use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::scoring::Entry;
use crate::Wizard;

/// Post-hoc analysis of a game: per-round score sequences, round-by-round
/// standings, per-player analytics and the superlative awards.
///
/// Computed once when the game finishes and cached on the session; all
/// sequences cover the rounds present in the game data, in chronological
/// order, with incomplete entries scoring zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStats {
    /// Roster order at analysis time; the scan order for every award.
    pub players: Vec<String>,
    /// Cumulative totals per player, one checkpoint per analyzed round,
    /// starting at 0 before round 1.
    pub running_totals: BTreeMap<String, Vec<i64>>,
    /// Per-round scores per player; 0 for rounds the player had not
    /// completed.
    pub round_scores: BTreeMap<String, Vec<i64>>,
    /// Standings after each analyzed round, best first, ties in roster
    /// order.
    pub standings_by_round: Vec<Vec<(String, i64)>>,
    pub analysis: BTreeMap<String, PlayerAnalysis>,
    pub awards: Awards,
}

impl GameStats {
    pub fn analysis_for(&self, player: &str) -> Option<&PlayerAnalysis> {
        self.analysis.get(player)
    }

    /// Move every occurrence of a player name to a new one, keeping the
    /// cached analysis in step with a roster rename.
    pub(crate) fn rename_player(&mut self, old: &str, new: &str) {
        for name in &mut self.players {
            if *name == old {
                *name = new.to_owned();
            }
        }
        if let Some(totals) = self.running_totals.remove(old) {
            self.running_totals.insert(new.to_owned(), totals);
        }
        if let Some(scores) = self.round_scores.remove(old) {
            self.round_scores.insert(new.to_owned(), scores);
        }
        for standing in &mut self.standings_by_round {
            for (name, _) in standing.iter_mut() {
                if *name == old {
                    *name = new.to_owned();
                }
            }
        }
        if let Some(analysis) = self.analysis.remove(old) {
            self.analysis.insert(new.to_owned(), analysis);
        }
        let awards = &mut self.awards;
        for field in [
            &mut awards.most_accurate,
            &mut awards.least_accurate,
            &mut awards.best_jump,
            &mut awards.worst_drop,
            &mut awards.hottest_streak,
            &mut awards.coldest_streak,
        ] {
            if *field == old {
                *field = new.to_owned();
            }
        }
        for field in [&mut awards.comeback, &mut awards.choke] {
            if field.as_deref() == Some(old) {
                *field = Some(new.to_owned());
            }
        }
    }
}

/// Derived analytics for one player over the analyzed rounds.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerAnalysis {
    pub final_score: i64,
    /// Round of the highest per-round score, first occurrence on ties;
    /// 0 when no rounds were analyzed.
    pub best_round: u32,
    pub best_round_score: i64,
    pub worst_round: u32,
    pub worst_round_score: i64,
    pub correct_bids: u32,
    pub total_rounds: u32,
    /// Percentage of analyzed rounds with a correct bid, rounded to one
    /// decimal; 0 when no rounds were analyzed.
    pub accuracy: f64,
    /// Largest cumulative gain over exactly three consecutive rounds;
    /// clamped at 0, so a player who never gains reports 0.
    pub max_3round_jump: i64,
    /// First and last round of the jump window, `(0, 0)` when none.
    pub jump_rounds: (u32, u32),
    /// Largest cumulative loss over exactly three consecutive rounds,
    /// reported as a non-positive number and clamped at 0.
    pub max_3round_drop: i64,
    pub drop_rounds: (u32, u32),
    /// Rounds this player held the strict lead (ties go to the earlier
    /// roster position).
    pub times_in_lead: u32,
    /// Personal enter/exit-lead transitions, round 1 included.
    pub lead_changes: u32,
    /// Rank after the first analyzed round; 0 with fewer than two rounds.
    pub start_rank: u32,
    /// Rank after the last analyzed round; 0 with fewer than two rounds.
    pub end_rank: u32,
    /// `start_rank - end_rank`; positive means the player climbed.
    pub rank_change: i32,
    /// Longest run of consecutive correct bids.
    pub max_hot_streak: u32,
    /// Longest run of consecutive missed bids.
    pub max_cold_streak: u32,
}

/// Superlatives across all players. Each field names the winning player;
/// ties resolve to the first occurrence in roster order. The comeback and
/// choke awards are only given for a strictly positive (resp. strictly
/// negative) rank change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Awards {
    pub most_accurate: String,
    pub least_accurate: String,
    pub best_jump: String,
    pub worst_drop: String,
    pub hottest_streak: String,
    pub coldest_streak: String,
    pub comeback: Option<String>,
    pub choke: Option<String>,
}

pub(crate) fn analyze(game: &Wizard) -> GameStats {
    let players: Vec<String> = game
        .players()
        .iter()
        .map(|player| player.name.clone())
        .collect();

    let mut running_totals: BTreeMap<String, Vec<i64>> = players
        .iter()
        .map(|name| (name.clone(), vec![0]))
        .collect();
    let mut round_scores: BTreeMap<String, Vec<i64>> = players
        .iter()
        .map(|name| (name.clone(), Vec::new()))
        .collect();
    let mut standings_by_round = Vec::new();

    for round in 1..=game.max_rounds() {
        let Some(entries) = game.round_entries(round) else {
            continue;
        };
        let mut standing = Vec::with_capacity(players.len());
        for name in &players {
            let round_score = entries.get(name).and_then(Entry::score).unwrap_or(0);
            let totals = running_totals.get_mut(name).expect("player in totals map");
            let next = totals.last().copied().unwrap_or(0) + round_score;
            totals.push(next);
            round_scores
                .get_mut(name)
                .expect("player in scores map")
                .push(round_score);
            standing.push((name.clone(), next));
        }
        standing.sort_by_key(|&(_, total)| Reverse(total));
        standings_by_round.push(standing);
    }

    let analysis: BTreeMap<String, PlayerAnalysis> = players
        .iter()
        .map(|name| {
            (
                name.clone(),
                analyze_player(
                    name,
                    &round_scores[name],
                    &running_totals[name],
                    &standings_by_round,
                ),
            )
        })
        .collect();
    let awards = pick_awards(&players, &analysis);

    GameStats {
        players,
        running_totals,
        round_scores,
        standings_by_round,
        analysis,
        awards,
    }
}

fn analyze_player(
    name: &str,
    scores: &[i64],
    totals: &[i64],
    standings_by_round: &[Vec<(String, i64)>],
) -> PlayerAnalysis {
    let mut analysis = PlayerAnalysis {
        final_score: totals.last().copied().unwrap_or(0),
        total_rounds: scores.len() as u32,
        ..PlayerAnalysis::default()
    };

    if let Some(&best) = scores.iter().max() {
        let first = scores.iter().position(|&s| s == best).expect("max exists");
        analysis.best_round = first as u32 + 1;
        analysis.best_round_score = best;
    }
    if let Some(&worst) = scores.iter().min() {
        let first = scores.iter().position(|&s| s == worst).expect("min exists");
        analysis.worst_round = first as u32 + 1;
        analysis.worst_round_score = worst;
    }

    analysis.correct_bids = scores.iter().filter(|&&s| s > 0).count() as u32;
    if !scores.is_empty() {
        let percent = f64::from(analysis.correct_bids) / scores.len() as f64 * 100.0;
        analysis.accuracy = (percent * 10.0).round() / 10.0;
    }

    // sliding 3-round windows need four cumulative checkpoints
    if totals.len() >= 4 {
        for i in 0..totals.len() - 3 {
            let change = totals[i + 3] - totals[i];
            let window = (i as u32 + 1, i as u32 + 3);
            if change > analysis.max_3round_jump {
                analysis.max_3round_jump = change;
                analysis.jump_rounds = window;
            }
            if change < analysis.max_3round_drop {
                analysis.max_3round_drop = change;
                analysis.drop_rounds = window;
            }
        }
    }

    let mut was_leading = false;
    for standing in standings_by_round {
        let currently_leading = standing.first().is_some_and(|(leader, _)| leader == name);
        if currently_leading {
            analysis.times_in_lead += 1;
        }
        if currently_leading != was_leading {
            analysis.lead_changes += 1;
        }
        was_leading = currently_leading;
    }

    if standings_by_round.len() >= 2 {
        let rank_in = |standing: &[(String, i64)]| {
            standing
                .iter()
                .position(|(player, _)| player == name)
                .map(|position| position as u32 + 1)
                .unwrap_or(standing.len() as u32)
        };
        analysis.start_rank = rank_in(&standings_by_round[0]);
        analysis.end_rank = rank_in(standings_by_round.last().expect("at least two rounds"));
        analysis.rank_change = analysis.start_rank as i32 - analysis.end_rank as i32;
    }

    // signed counter: positive while hot, negative while cold
    let mut streak = 0i64;
    for &round_score in scores {
        if round_score > 0 {
            streak = if streak >= 0 { streak + 1 } else { 1 };
            analysis.max_hot_streak = analysis.max_hot_streak.max(streak as u32);
        } else {
            streak = if streak <= 0 { streak - 1 } else { -1 };
            analysis.max_cold_streak = analysis.max_cold_streak.max(streak.unsigned_abs() as u32);
        }
    }

    analysis
}

fn pick_awards(players: &[String], analysis: &BTreeMap<String, PlayerAnalysis>) -> Awards {
    if players.is_empty() {
        return Awards::default();
    }
    let comeback = best_by(players, analysis, |a| a.rank_change);
    let choke = worst_by(players, analysis, |a| a.rank_change);
    Awards {
        most_accurate: best_by(players, analysis, |a| a.accuracy).to_owned(),
        least_accurate: worst_by(players, analysis, |a| a.accuracy).to_owned(),
        best_jump: best_by(players, analysis, |a| a.max_3round_jump).to_owned(),
        worst_drop: worst_by(players, analysis, |a| a.max_3round_drop).to_owned(),
        hottest_streak: best_by(players, analysis, |a| a.max_hot_streak).to_owned(),
        coldest_streak: best_by(players, analysis, |a| a.max_cold_streak).to_owned(),
        comeback: (analysis[comeback].rank_change > 0).then(|| comeback.to_owned()),
        choke: (analysis[choke].rank_change < 0).then(|| choke.to_owned()),
    }
}

/// First player in roster order with the strictly highest key.
fn best_by<'a, K: PartialOrd>(
    players: &'a [String],
    analysis: &BTreeMap<String, PlayerAnalysis>,
    key: impl Fn(&PlayerAnalysis) -> K,
) -> &'a str {
    let mut best = &players[0];
    for player in &players[1..] {
        if key(&analysis[player]) > key(&analysis[best]) {
            best = player;
        }
    }
    best
}

/// First player in roster order with the strictly lowest key.
fn worst_by<'a, K: PartialOrd>(
    players: &'a [String],
    analysis: &BTreeMap<String, PlayerAnalysis>,
    key: impl Fn(&PlayerAnalysis) -> K,
) -> &'a str {
    let mut worst = &players[0];
    for player in &players[1..] {
        if key(&analysis[player]) < key(&analysis[worst]) {
            worst = player;
        }
    }
    worst
}
