//! Table-talk commentary: prompt building, the provider seam, and
//! response parsing.

use std::collections::BTreeMap;
use std::fmt::Write;

use regex::Regex;
use wizard::{GameStats, Wizard};

use crate::errors::NarratorError;

/// Substitute roast when the response has no line for a player.
pub const ROAST_FALLBACK: &str = "Even the AI couldn't find words for this performance...";

/// Generation knobs forwarded to the provider.
#[derive(Debug, Clone, Copy)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: f64,
}

/// A commentary backend. Implementations turn a prompt into prose;
/// everything else (prompt construction, parsing, fallbacks) lives here.
pub trait Narrator {
    fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String, NarratorError>;
}

/// Ask the narrator to roast every player over the round that just ended.
/// The returned map always has an entry per player; players the response
/// skipped get [`ROAST_FALLBACK`].
pub fn round_roasts(
    narrator: &dyn Narrator,
    game: &Wizard,
    round: u32,
) -> Result<BTreeMap<String, String>, NarratorError> {
    log::info!("requesting roasts for round {round}");
    let prompt = roast_prompt(game, round);
    let raw = narrator.generate(
        &prompt,
        GenerationOptions {
            max_tokens: 500,
            temperature: 0.9,
        },
    )?;
    Ok(split_roasts(&raw, &game.player_names()))
}

/// Ask the narrator for a broadcast-style recap of a finished game.
pub fn game_summary(narrator: &dyn Narrator, stats: &GameStats) -> Result<String, NarratorError> {
    log::info!("requesting game summary");
    let prompt = summary_prompt(stats);
    narrator.generate(
        &prompt,
        GenerationOptions {
            max_tokens: 800,
            temperature: 0.9,
        },
    )
}

/// Build the roast prompt: standings, each player's full history so far,
/// and how everyone did in the round that just ended.
pub fn roast_prompt(game: &Wizard, round: u32) -> String {
    let names = game.player_names();
    let totals = totals_through(game, round);
    let mut standings: Vec<(&str, i64)> = names.iter().map(|&n| (n, totals[n])).collect();
    standings.sort_by_key(|&(_, total)| std::cmp::Reverse(total));

    let mut histories = String::new();
    for &name in &names {
        let rank = standings.iter().position(|&(n, _)| n == name).map_or(0, |i| i + 1);
        let mut details = Vec::new();
        let mut correct = 0;
        let mut overbid = 0;
        let mut underbid = 0;
        let mut biggest_miss = 0i64;
        for r in 1..=round {
            let Some(entry) = game.entry(r, name) else { continue };
            let (Some(bid), Some(tricks)) = (entry.bid, entry.tricks) else { continue };
            let diff = i64::from(tricks) - i64::from(bid);
            let pts = wizard::score(bid, tricks);
            let verdict = if diff == 0 {
                "✓".to_owned()
            } else {
                format!("off by {}", diff.abs())
            };
            details.push(format!("R{r}: bid {bid}, got {tricks}, {verdict} ({pts:+} pts)"));
            match diff {
                0 => correct += 1,
                d if d > 0 => underbid += 1,
                _ => overbid += 1,
            }
            biggest_miss = biggest_miss.max(diff.abs());
        }
        let recent = details.iter().rev().take(5).rev().cloned().collect::<Vec<_>>();
        let _ = writeln!(
            histories,
            "{name} (Rank #{rank}, {} pts total):\n  \
             - Correct bids: {correct}/{round} rounds\n  \
             - Overbid: {overbid}x, Underbid: {underbid}x\n  \
             - Biggest miss: {biggest_miss} tricks off\n  \
             - Round history: {}",
            totals[name],
            recent.join("; ")
        );
    }

    let mut performances = String::new();
    for &name in &names {
        let entry = game.entry(round, name).unwrap_or_default();
        let bid = entry.bid.unwrap_or(0);
        let tricks = entry.tricks.unwrap_or(0);
        let diff = i64::from(tricks) - i64::from(bid);
        let status = if diff == 0 {
            format!("{name} nailed their bid of {bid} (smug success)")
        } else if diff > 0 {
            format!("{name} bid {bid} but got {tricks} (overachiever by {diff})")
        } else {
            format!("{name} bid {bid} but only got {tricks} (failed by {})", diff.abs())
        };
        let _ = writeln!(performances, "{status}");
    }

    let standings_line = standings
        .iter()
        .enumerate()
        .map(|(i, &(name, total))| format!("#{} {name} ({total} pts)", i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a witty, sarcastic commentator for a Wizard card game. \
         Round {round} of {} just ended.\n\n\
         CURRENT STANDINGS: {standings_line}\n\n\
         FULL PLAYER HISTORIES:\n{histories}\n\
         THIS ROUND'S PERFORMANCES:\n{performances}\n\
         Write a brief, savage roast for EACH player individually (1-2 sentences each). \
         Use their FULL GAME HISTORY to make it personal - reference their patterns, \
         streaks, choking moments, or consistent failures. Format as:\n\
         PLAYER_NAME: [roast]\n\n\
         Be savage but friendly. Reference specific stats, patterns, or memorable \
         moments from their history. Keep each roast short and punchy.",
        game.max_rounds()
    )
}

/// Build the end-game recap prompt from the computed statistics.
pub fn summary_prompt(stats: &GameStats) -> String {
    let mut summaries = String::new();
    for name in &stats.players {
        let Some(a) = stats.analysis_for(name) else { continue };
        let moved = if a.rank_change > 0 {
            format!("+{}", a.rank_change)
        } else {
            a.rank_change.to_string()
        };
        let _ = writeln!(
            summaries,
            "{name}:\n\
             - Final: #{} with {} pts\n\
             - Accuracy: {}/{} correct ({}%)\n\
             - Best round: R{} (+{} pts), Worst: R{} ({} pts)\n\
             - Biggest 3-round jump: +{} (R{}-R{})\n\
             - Biggest 3-round drop: {} (R{}-R{})\n\
             - Times leading: {} rounds, Lead changes: {}\n\
             - Started #{}, Finished #{} (moved {moved} spots)\n\
             - Hot streak: {} correct in a row, Cold streak: {} misses in a row",
            a.end_rank,
            a.final_score,
            a.correct_bids,
            a.total_rounds,
            a.accuracy,
            a.best_round,
            a.best_round_score,
            a.worst_round,
            a.worst_round_score,
            a.max_3round_jump,
            a.jump_rounds.0,
            a.jump_rounds.1,
            a.max_3round_drop,
            a.drop_rounds.0,
            a.drop_rounds.1,
            a.times_in_lead,
            a.lead_changes,
            a.start_rank,
            a.end_rank,
            a.max_hot_streak,
            a.max_cold_streak,
        );
    }

    let awards = &stats.awards;
    let mut superlatives = Vec::new();
    if let Some(a) = stats.analysis_for(&awards.most_accurate) {
        superlatives.push(format!("Most Accurate: {} ({}%)", awards.most_accurate, a.accuracy));
    }
    if let Some(a) = stats.analysis_for(&awards.least_accurate) {
        superlatives.push(format!("Least Accurate: {} ({}%)", awards.least_accurate, a.accuracy));
    }
    if let Some(name) = &awards.comeback {
        if let Some(a) = stats.analysis_for(name) {
            superlatives.push(format!("Biggest Comeback: {name} (climbed {} spots)", a.rank_change));
        }
    }
    if let Some(name) = &awards.choke {
        if let Some(a) = stats.analysis_for(name) {
            superlatives.push(format!(
                "Biggest Choke: {name} (dropped {} spots)",
                a.rank_change.abs()
            ));
        }
    }
    if let Some(a) = stats.analysis_for(&awards.hottest_streak) {
        superlatives.push(format!(
            "Hottest Streak: {} ({} correct in a row)",
            awards.hottest_streak, a.max_hot_streak
        ));
    }
    if let Some(a) = stats.analysis_for(&awards.coldest_streak) {
        superlatives.push(format!(
            "Coldest Streak: {} ({} misses in a row)",
            awards.coldest_streak, a.max_cold_streak
        ));
    }
    if let Some(a) = stats.analysis_for(&awards.best_jump) {
        superlatives.push(format!(
            "Best 3-Round Run: {} (+{} pts)",
            awards.best_jump, a.max_3round_jump
        ));
    }
    if let Some(a) = stats.analysis_for(&awards.worst_drop) {
        superlatives.push(format!(
            "Worst 3-Round Collapse: {} ({} pts)",
            awards.worst_drop, a.max_3round_drop
        ));
    }

    format!(
        "You are a sports commentator giving an exciting end-game summary for a \
         Wizard card game tournament.\n\n\
         FINAL STANDINGS AND PLAYER STATS:\n{summaries}\n\
         NOTABLE ACHIEVEMENTS:\n{}\n\n\
         Write an exciting, dramatic game summary (3-4 paragraphs) that:\n\
         1. Celebrates the winner and their journey to victory\n\
         2. Highlights the most dramatic moments (comebacks, chokes, close battles)\n\
         3. Gives funny \"awards\" to each player based on their unique stats\n\
         4. Ends with a memorable final statement\n\n\
         Be entertaining, use their names, reference specific stats. Make it feel \
         like a sports broadcast recap!",
        superlatives.join("\n")
    )
}

/// Split a raw response into one roast per player. Matching is by a
/// `Name:` label at the start of a line, case-insensitively; the roast is
/// everything after the label until the next labelled line. Players with
/// no matching line get [`ROAST_FALLBACK`].
pub fn split_roasts(raw: &str, players: &[&str]) -> BTreeMap<String, String> {
    let labels: Vec<(usize, Regex)> = players
        .iter()
        .enumerate()
        .filter_map(|(i, name)| {
            let pattern = format!(r"(?i)^\W{{0,3}}{}\*{{0,2}}\s*[:\-]\s*(.*)", regex::escape(name));
            Regex::new(&pattern).ok().map(|re| (i, re))
        })
        .collect();

    let mut sections: BTreeMap<usize, String> = BTreeMap::new();
    let mut current: Option<usize> = None;
    for line in raw.lines() {
        let labelled = labels.iter().find_map(|(i, re)| {
            re.captures(line)
                .map(|caps| (*i, caps.get(1).map_or("", |m| m.as_str()).to_owned()))
        });
        match labelled {
            Some((i, rest)) => {
                sections.insert(i, rest);
                current = Some(i);
            }
            None => {
                if let Some(i) = current {
                    let section = sections.entry(i).or_default();
                    section.push('\n');
                    section.push_str(line);
                }
            }
        }
    }

    players
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let roast = sections
                .get(&i)
                .map(|text| text.trim().trim_matches('"').trim().to_owned())
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| ROAST_FALLBACK.to_owned());
            (name.to_string(), roast)
        })
        .collect()
}

/// Scores summed over rounds 1 through `round`, missing values as zero.
fn totals_through(game: &Wizard, round: u32) -> BTreeMap<String, i64> {
    let mut totals: BTreeMap<String, i64> = game
        .player_names()
        .into_iter()
        .map(|name| (name.to_owned(), 0))
        .collect();
    for r in 1..=round {
        let Some(entries) = game.round_entries(r) else { continue };
        for (name, entry) in entries {
            if let (Some(total), Some(score)) = (totals.get_mut(name), entry.score()) {
                *total += score;
            }
        }
    }
    totals
}
