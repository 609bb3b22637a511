//! Flat-file persistence: one human-skimmable text file per saved game,
//! with the JSON snapshot below a marker line.

use std::fs;
use std::path::{Path, PathBuf};

use time::format_description::FormatItem;
use time::macros::format_description;
use wizard::Wizard;

use crate::errors::SnapshotError;
use crate::snapshot::Snapshot;

const BANNER: &str = "=== WIZARD CARD GAME SAVE FILE ===";
const JSON_MARKER: &str = "--- JSON DATA (DO NOT EDIT BELOW) ---\n";
const FILE_PREFIX: &str = "wizard_game_";

const FILENAME_STAMP: &[FormatItem<'static>] =
    format_description!("[year][month][day]_[hour][minute][second]");
const HEADER_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A directory of save files.
#[derive(Debug, Clone)]
pub struct SaveDir {
    dir: PathBuf,
}

/// What [`SaveDir::list`] reports per file, parsed from the header lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub filename: String,
    pub title: String,
    pub saved_at: String,
    pub players: String,
    pub round: String,
}

impl SaveDir {
    /// Open a save directory, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(SaveDir { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Save a game. A missing title becomes "Game: <players>"; a missing
    /// filename becomes `wizard_game_<players>_<stamp>.txt` from the
    /// first three roster names. Returns the filename written.
    pub fn save(
        &self,
        game: &Wizard,
        title: Option<&str>,
        filename: Option<&str>,
    ) -> Result<String, SnapshotError> {
        let title = match title {
            Some(title) => title.to_owned(),
            None => Snapshot::default_title(game),
        };
        let snapshot = Snapshot::capture(game, title);
        let filename = match filename {
            Some(name) => name.to_owned(),
            None => {
                let players = game
                    .player_names()
                    .into_iter()
                    .take(3)
                    .collect::<Vec<_>>()
                    .join("_");
                let stamp = snapshot.saved_at.format(FILENAME_STAMP)?;
                format!("{FILE_PREFIX}{players}_{stamp}.txt")
            }
        };
        self.write_snapshot(&filename, &snapshot)?;
        log::info!("saved game to {filename}");
        Ok(filename)
    }

    /// Load a save file back into a snapshot.
    pub fn load(&self, filename: &str) -> Result<Snapshot, SnapshotError> {
        let content = fs::read_to_string(self.dir.join(filename))?;
        let json = content
            .split_once(JSON_MARKER)
            .ok_or(SnapshotError::MissingJsonSection)?
            .1;
        Ok(serde_json::from_str(json)?)
    }

    /// Summaries of every save file, newest first. Unreadable files are
    /// skipped with a warning.
    pub fn list(&self) -> Result<Vec<SaveSummary>, SnapshotError> {
        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !filename.starts_with(FILE_PREFIX) || !filename.ends_with(".txt") {
                continue;
            }
            match self.summarize(filename) {
                Ok(summary) => summaries.push(summary),
                Err(err) => log::warn!("skipping unreadable save {filename}: {err}"),
            }
        }
        summaries.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(summaries)
    }

    /// Change the title of an existing save in place, keeping its
    /// snapshot and original timestamp.
    pub fn retitle(&self, filename: &str, new_title: &str) -> Result<(), SnapshotError> {
        let mut snapshot = self.load(filename)?;
        snapshot.title = new_title.to_owned();
        self.write_snapshot(filename, &snapshot)
    }

    pub fn delete(&self, filename: &str) -> Result<(), SnapshotError> {
        let path = self.dir.join(filename);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Save without letting a persistence failure interrupt play.
    pub fn autosave(&self, game: &Wizard, filename: Option<&str>) -> Option<String> {
        match self.save(game, None, filename) {
            Ok(filename) => Some(filename),
            Err(err) => {
                log::warn!("autosave failed: {err}");
                None
            }
        }
    }

    fn summarize(&self, filename: &str) -> Result<SaveSummary, SnapshotError> {
        let content = fs::read_to_string(self.dir.join(filename))?;
        let json = content
            .split_once(JSON_MARKER)
            .ok_or(SnapshotError::MissingJsonSection)?
            .1;
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let header_line = |index: usize, prefix: &str| -> String {
            content
                .lines()
                .nth(index)
                .map(|line| line.trim_start_matches(prefix).trim().to_owned())
                .unwrap_or_else(|| "Unknown".to_owned())
        };
        Ok(SaveSummary {
            filename: filename.to_owned(),
            title: snapshot.title,
            saved_at: header_line(2, "Saved: "),
            players: header_line(3, "Players: "),
            round: header_line(4, "Round: "),
        })
    }

    fn write_snapshot(&self, filename: &str, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let scores = snapshot
            .total_scores
            .iter()
            .map(|(name, total)| format!("{name}: {total}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut content = String::new();
        content.push_str(BANNER);
        content.push('\n');
        content.push_str(&format!("Title: {}\n", snapshot.title));
        content.push_str(&format!(
            "Saved: {}\n",
            snapshot.saved_at.format(HEADER_STAMP)?
        ));
        content.push_str(&format!("Players: {}\n", snapshot.players.join(", ")));
        content.push_str(&format!(
            "Round: {} / {}\n",
            snapshot.current_round, snapshot.max_rounds
        ));
        content.push_str(&format!("Scores: {scores}\n"));
        content.push_str(&"=".repeat(35));
        content.push_str("\n\n");
        content.push_str(JSON_MARKER);
        content.push_str(&serde_json::to_string_pretty(snapshot)?);
        fs::write(self.dir.join(filename), content)?;
        Ok(())
    }
}
