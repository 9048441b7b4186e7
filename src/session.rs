//! Session state machine
//!
//! Wraps rounds of play: `Playing` until a loss, one `GameOver` frame that
//! shows the overlay, then `WaitingRestart` until the player confirms.

use rand::Rng;

use crate::round::{LossCause, Round, TickInput, TickReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
    WaitingRestart,
}

/// Sounds and music changes requested by a session tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Fire,
    Hit,
    GameOver,
    RoundStart,
}

#[derive(Debug)]
pub struct Session {
    pub phase: Phase,
    pub round: Round,
    /// Rounds started so far, including the current one
    pub rounds_played: u32,
    /// Highest kill count of any finished round this session
    pub best_kills: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Playing,
            round: Round::new(),
            rounds_played: 1,
            best_kills: 0,
        }
    }

    /// Advance the session by one frame and return the cues it produced
    pub fn tick<R: Rng + ?Sized>(&mut self, input: &TickInput, rng: &mut R) -> Vec<Cue> {
        let mut cues = Vec::new();

        match self.phase {
            Phase::Playing => {
                let report = self.round.tick(input, rng);
                push_round_cues(&report, &mut cues);

                if let Some(cause) = report.loss {
                    self.end_round(cause);
                    cues.push(Cue::GameOver);
                }
            }
            Phase::GameOver => {
                self.phase = Phase::WaitingRestart;
            }
            Phase::WaitingRestart => {
                if input.confirm {
                    self.restart();
                    cues.push(Cue::RoundStart);
                }
            }
        }

        cues
    }

    fn end_round(&mut self, cause: LossCause) {
        self.phase = Phase::GameOver;
        self.best_kills = self.best_kills.max(self.round.kills);
        log::info!(
            "Round {} over ({:?}) after {} frames with {} kills",
            self.rounds_played,
            cause,
            self.round.frame,
            self.round.kills
        );
    }

    fn restart(&mut self) {
        self.round = Round::new();
        self.rounds_played += 1;
        self.phase = Phase::Playing;
        log::info!("Round {} started", self.rounds_played);
    }
}

fn push_round_cues(report: &TickReport, cues: &mut Vec<Cue>) {
    if report.fired {
        cues.push(Cue::Fire);
    }
    if report.hits > 0 {
        cues.push(Cue::Hit);
    }
}
