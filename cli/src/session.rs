use std::io::Write;

use chrono::prelude::*;
use sweeper_core::{self as game, BoardEngine, Coord2, FlagReport, Phase, Preset, RevealReport};

use crate::render;

/// One game plus the clock the engine itself does not keep.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    engine: BoardEngine,
    preset: Preset,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    move_count: u32,
}

impl GameSession {
    pub fn new(preset: Preset, seed: u64) -> Self {
        log::info!("New {} game, seed {}", preset, seed);
        Self::from_engine(preset, BoardEngine::new(preset.difficulty(), seed))
    }

    fn from_engine(preset: Preset, engine: BoardEngine) -> Self {
        Self {
            engine,
            preset,
            started_at: None,
            ended_at: None,
            move_count: 0,
        }
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn reveal(&mut self, coords: Coord2) -> game::Result<RevealReport> {
        let report = self.engine.reveal(coords)?;
        if report.outcome.has_update() {
            self.move_count += 1;
        }
        self.track_clock(&report, Utc::now());
        Ok(report)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> game::Result<FlagReport> {
        let report = self.engine.toggle_flag(coords)?;
        if report.outcome.has_update() {
            self.move_count += 1;
        }
        Ok(report)
    }

    fn track_clock(&mut self, report: &RevealReport, now: DateTime<Utc>) {
        if report.started() {
            log::debug!("started at {}", now);
            self.started_at.replace(now);
        }
        if report.ended() {
            log::debug!("ended at {}", now);
            self.ended_at.replace(now);
        }
    }

    /// Whole seconds since the first reveal, frozen once the game ends.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    pub fn status_line(&self, now: DateTime<Utc>) -> String {
        format!(
            "{} | mines: {} | time: {}s | moves: {}",
            self.preset,
            self.engine.mines_remaining(),
            self.elapsed_secs(now),
            self.move_count
        )
    }

    pub fn result_message(&self) -> String {
        match self.engine.phase() {
            Phase::Won => format!(
                "Congratulations! You won in {} seconds!",
                self.elapsed_secs(Utc::now())
            ),
            Phase::Lost => "Game over! You hit a mine!".to_string(),
            Phase::AwaitingFirstMove | Phase::InProgress => String::new(),
        }
    }

    pub fn draw(&self, out: &mut impl Write) -> anyhow::Result<()> {
        writeln!(out, "{}", self.status_line(Utc::now()))?;
        write!(out, "{}", render::render_board(&self.engine)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use sweeper_core::MineLayout;

    fn session(mines: &[Coord2]) -> GameSession {
        let layout = MineLayout::from_mine_coords((3, 3), mines).unwrap();
        GameSession::from_engine(Preset::Beginner, BoardEngine::with_layout(layout))
    }

    #[test]
    fn clock_idle_before_first_reveal() {
        let session = GameSession::new(Preset::Expert, 3);
        assert_eq!(session.elapsed_secs(Utc::now()), 0);
        assert_eq!(session.preset(), Preset::Expert);
    }

    #[test]
    fn clock_freezes_when_game_ends() {
        let mut session = session(&[(0, 0), (2, 2)]);
        let t0 = Utc::now();

        let report = session.engine.reveal((1, 1)).unwrap();
        session.track_clock(&report, t0);
        assert_eq!(session.elapsed_secs(t0 + TimeDelta::seconds(5)), 5);

        let report = session.engine.reveal((0, 0)).unwrap();
        session.track_clock(&report, t0 + TimeDelta::seconds(7));
        assert_eq!(session.elapsed_secs(t0 + TimeDelta::seconds(60)), 7);
    }

    #[test]
    fn only_changes_count_as_moves() {
        let mut session = session(&[(0, 0)]);

        session.reveal((1, 1)).unwrap();
        session.reveal((1, 1)).unwrap();
        session.toggle_flag((1, 1)).unwrap();
        session.toggle_flag((0, 0)).unwrap();

        assert_eq!(session.move_count, 2);
        assert_eq!(session.engine.mines_remaining(), 0);
    }

    #[test]
    fn result_message_follows_phase() {
        let mut session = session(&[(0, 0)]);
        assert_eq!(session.result_message(), "");

        session.reveal((0, 0)).unwrap();
        assert_eq!(session.result_message(), "Game over! You hit a mine!");
    }

    #[test]
    fn status_line_shows_counter() {
        let mut session = session(&[(0, 0)]);
        session.toggle_flag((2, 2)).unwrap();
        session.toggle_flag((2, 1)).unwrap();

        let line = session.status_line(Utc::now());
        assert!(line.starts_with("beginner | mines: -1 | time: 0s"), "{line}");
    }
}
