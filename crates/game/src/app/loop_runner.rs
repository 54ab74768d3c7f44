use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use engine::{BoundsError, InputAction, InputTracker};
use thiserror::Error;
use tracing::{error, info};

use super::bootstrap::AppWiring;
use super::config::ConfigError;
use super::gameplay::{render_grid, HuntOutcome, HuntSession};

const WELCOME_TEXT: &str = "**Welcome to Actor Hunt**\n\n\
   Touch a 'D'angerous actor to get big points but watch out\n\
   Touch a 'H'ealing actor to get small points and a warm fuzzy feeling\n\n\
   Move yourself around with 'WASD', one step per key\n\
   Type keys and press Enter to play a frame, 'Q' to leave\n";
const CONTROLS_TEXT: &str = "Move: WASD  Self-damage: 1/2  Quit: Q";

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build world: {0}")]
    World(#[from] BoundsError),
    #[error("failed to read input: {0}")]
    ReadInput(#[source] io::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopExit {
    Quit,
    Finished(HuntOutcome),
    EndOfInput,
}

pub(crate) fn run(mut app: AppWiring) -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    match run_session(&mut app.session, stdin.lock(), stdout.lock()) {
        Ok(exit) => {
            info!(
                exit = ?exit,
                outcome = ?app.session.outcome(),
                seed = app.session.seed(),
                "shutdown"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "session_failed");
            ExitCode::FAILURE
        }
    }
}

/// Plays the session against a line-oriented input stream. Every line is one
/// frame of key taps, so the same key on consecutive lines presses twice.
pub(crate) fn run_session<R, W>(
    session: &mut HuntSession,
    input: R,
    mut out: W,
) -> Result<LoopExit, AppError>
where
    R: BufRead,
    W: Write,
{
    let mut tracker = InputTracker::new();
    writeln!(out, "{WELCOME_TEXT}").map_err(AppError::WriteOutput)?;
    out.flush().map_err(AppError::WriteOutput)?;

    for line in input.lines() {
        let line = line.map_err(AppError::ReadInput)?;
        let snapshot = tracker.capture(actions_for_line(&line));
        tracker.release_all();

        if snapshot.quit_requested() {
            writeln!(out, "Exiting simulation").map_err(AppError::WriteOutput)?;
            return Ok(LoopExit::Quit);
        }

        let report = session.step(&snapshot);
        if !report.ticked {
            continue;
        }

        let (width, height) = session.size();
        for row in render_grid(session.world(), width, height) {
            writeln!(out, "{row}").map_err(AppError::WriteOutput)?;
        }
        if report.damage_hits > 0 {
            writeln!(out, "Ouch! Hit by {} dangerous actor(s)", report.damage_hits)
                .map_err(AppError::WriteOutput)?;
        }
        if report.healing_hits > 0 {
            writeln!(out, "Healed by {} friendly actor(s)", report.healing_hits)
                .map_err(AppError::WriteOutput)?;
        }
        writeln!(
            out,
            "HP {}  Points {}  |  {CONTROLS_TEXT}",
            report.status.hp, report.status.points
        )
        .map_err(AppError::WriteOutput)?;

        match report.outcome {
            HuntOutcome::Running => {}
            HuntOutcome::Won => {
                writeln!(out, "GAME OVER! YOU WIN :)").map_err(AppError::WriteOutput)?;
                return Ok(LoopExit::Finished(HuntOutcome::Won));
            }
            HuntOutcome::Lost => {
                writeln!(out, "GAME OVER! YOU LOSE :(").map_err(AppError::WriteOutput)?;
                return Ok(LoopExit::Finished(HuntOutcome::Lost));
            }
        }
        out.flush().map_err(AppError::WriteOutput)?;
    }

    Ok(LoopExit::EndOfInput)
}

fn actions_for_line(line: &str) -> Vec<InputAction> {
    line.chars().filter_map(action_for_key).collect()
}

fn action_for_key(key: char) -> Option<InputAction> {
    match key.to_ascii_lowercase() {
        'w' => Some(InputAction::MoveUp),
        's' => Some(InputAction::MoveDown),
        'a' => Some(InputAction::MoveLeft),
        'd' => Some(InputAction::MoveRight),
        '1' => Some(InputAction::Slot1),
        '2' => Some(InputAction::Slot2),
        'q' => Some(InputAction::Quit),
        _ => None,
    }
}
