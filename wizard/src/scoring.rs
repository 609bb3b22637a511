use std::cmp::Reverse;

use crate::Wizard;

/// Score a single round for one player.
///
/// A correct bid earns 20 points plus 10 per trick won; a missed bid loses
/// 10 points per trick of difference.
///
/// # Examples
/// ```
/// use wizard::score;
///
/// assert_eq!(score(3, 3), 50);
/// assert_eq!(score(0, 0), 20);
/// assert_eq!(score(2, 4), -20);
/// assert_eq!(score(3, 1), -20);
/// ```
pub fn score(bid: u8, tricks: u8) -> i64 {
    if bid == tricks {
        20 + 10 * i64::from(tricks)
    } else {
        -10 * (i64::from(bid) - i64::from(tricks)).abs()
    }
}

/// The bid and tricks recorded for one player in one round. Both fields
/// start unset; the entry only contributes to totals once both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    pub bid: Option<u8>,
    pub tricks: Option<u8>,
}

impl Entry {
    /// The round score for this entry, or `None` while either field is
    /// still missing.
    pub fn score(&self) -> Option<i64> {
        match (self.bid, self.tricks) {
            (Some(bid), Some(tricks)) => Some(score(bid, tricks)),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.bid.is_some() && self.tricks.is_some()
    }
}

impl Wizard {
    /// Whether `round` contributes to the live totals. The round being
    /// played is excluded until the game finishes, so standings shown
    /// mid-round never leak one player's trick count before all have
    /// reported.
    fn round_counts(&self, round: u32) -> bool {
        self.is_finished() || round < self.current_round()
    }

    /// Total score per player over all counted rounds, in roster order.
    pub fn total_scores(&self) -> Vec<(&str, i64)> {
        let mut totals: Vec<(&str, i64)> = self
            .players()
            .iter()
            .map(|player| (player.name.as_str(), 0))
            .collect();
        for (&round, entries) in self.rounds() {
            if !self.round_counts(round) {
                continue;
            }
            for (name, total) in totals.iter_mut() {
                if let Some(points) = entries.get(*name).and_then(Entry::score) {
                    *total += points;
                }
            }
        }
        totals
    }

    /// Current standings, best first. Ties keep roster order.
    pub fn standings(&self) -> Vec<(&str, i64)> {
        let mut standings = self.total_scores();
        standings.sort_by_key(|&(_, total)| Reverse(total));
        standings
    }

    /// Players whose bid missed their tricks by two or more in `round`.
    /// Missing bids or tricks count as zero.
    pub fn shot_players(&self, round: u32) -> Vec<&str> {
        self.players()
            .iter()
            .filter(|player| {
                let entry = self.entry(round, &player.name).unwrap_or_default();
                let bid = i16::from(entry.bid.unwrap_or(0));
                let tricks = i16::from(entry.tricks.unwrap_or(0));
                (bid - tricks).abs() >= 2
            })
            .map(|player| player.name.as_str())
            .collect()
    }

    /// Sum of the bids recorded so far in `round`; missing bids count as
    /// zero.
    pub fn bid_total(&self, round: u32) -> u32 {
        self.round_entries(round)
            .map(|entries| {
                entries
                    .values()
                    .filter_map(|entry| entry.bid)
                    .map(u32::from)
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Sum of the tricks recorded so far in `round`; missing tricks count
    /// as zero.
    pub fn trick_total(&self, round: u32) -> u32 {
        self.round_entries(round)
            .map(|entries| {
                entries
                    .values()
                    .filter_map(|entry| entry.tricks)
                    .map(u32::from)
                    .sum()
            })
            .unwrap_or(0)
    }

    /// The bid the dealer may not make in `round`, given the other bids
    /// recorded so far. Bids may not sum to the number of tricks in play,
    /// and the dealer bids last. `None` when the restriction cannot apply,
    /// i.e. the remaining bids already over- or undershoot the range.
    pub fn forbidden_dealer_bid(&self, round: u32) -> Option<u8> {
        let cant_say = i64::from(round) - i64::from(self.bid_total(round));
        if (0..=i64::from(round)).contains(&cant_say) {
            // round numbers never exceed DECK_SIZE / 3, far below u8::MAX
            Some(cant_say as u8)
        } else {
            None
        }
    }

    pub(crate) fn all_complete(&self, round: u32) -> bool {
        match self.round_entries(round) {
            Some(entries) => {
                self.players().iter().all(|player| {
                    entries
                        .get(&player.name)
                        .is_some_and(|entry| entry.is_complete())
                })
            }
            None => false,
        }
    }
}
