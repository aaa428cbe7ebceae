// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cycle runner: the state machine behind a single workout session.
//!
//! ```text
//! picking ──start──▶ equipment-check ──confirm──▶ running ──finish──▶ done
//!    │                                   ▲   (ready ⇄ paused)          │
//!    └──────────start (no equipment)─────┘◀──────────restart───────────┘
//! ```
//!
//! One periodic tick (1 s) drives both timers. The total timer advances on
//! every tick while running and not paused; the per-exercise timer only
//! once the user marked the exercise ready. The tick task is owned by the
//! runner through a [`TickHandle`] that aborts the task when dropped, so at
//! most one tick source exists per runner.

use crate::db::LocalDb;
use crate::models::{Cycle, Exercise, Session};
use crate::services::catalog::{unique_equipment, CatalogService};
use crate::time_utils::{format_timer, local_now};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Tick period of the session timers.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Placeholder shown for the exercise timer before the user is ready.
const NOT_STARTED_DISPLAY: &str = "--:--";

/// Top-level runner phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunPhase {
    Picking,
    EquipmentCheck,
    Running,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunPhase::Picking => "picking",
            RunPhase::EquipmentCheck => "equipment-check",
            RunPhase::Running => "running",
            RunPhase::Done => "done",
        })
    }
}

/// Illegal runner transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunnerError {
    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: RunPhase,
    },

    #[error("The current exercise has not been started")]
    NotReady,

    #[error("Session is already paused")]
    AlreadyPaused,

    #[error("Session is not paused")]
    NotPaused,

    #[error("The last exercise cannot be skipped")]
    SkipOnLastExercise,
}

/// How the runner produces ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMode {
    /// A tokio interval task with the given period.
    Interval(Duration),
    /// No background task; the owner calls [`CycleRunner::tick`].
    Manual,
}

/// Exclusive handle on the tick source. Dropping it stops the ticks.
#[derive(Debug)]
struct TickHandle {
    task: Option<JoinHandle<()>>,
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Ephemeral per-session state, shared with the tick task.
#[derive(Debug, Clone)]
struct RunState {
    phase: RunPhase,
    cycle: Option<Cycle>,
    exercises: Vec<Exercise>,
    equipment: Vec<String>,
    index: usize,
    total_secs: u32,
    exercise_secs: u32,
    paused: bool,
    ready: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            phase: RunPhase::Picking,
            cycle: None,
            exercises: Vec::new(),
            equipment: Vec::new(),
            index: 0,
            total_secs: 0,
            exercise_secs: 0,
            paused: false,
            ready: false,
        }
    }
}

impl RunState {
    fn tick(&mut self) {
        if self.phase != RunPhase::Running || self.paused {
            return;
        }
        self.total_secs += 1;
        if self.ready {
            self.exercise_secs += 1;
        }
    }

    fn is_last(&self) -> bool {
        self.index + 1 >= self.exercises.len()
    }

    fn expect_phase(&self, phase: RunPhase, action: &'static str) -> Result<(), RunnerError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(RunnerError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }
}

fn lock(state: &Mutex<RunState>) -> MutexGuard<'_, RunState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Summary of the active cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleSummary {
    pub id: String,
    pub kind: &'static str,
    pub label: String,
    pub emoji: String,
}

impl From<&Cycle> for CycleSummary {
    fn from(cycle: &Cycle) -> Self {
        Self {
            id: cycle.id(),
            kind: match cycle {
                Cycle::Preset(_) => "preset",
                Cycle::Custom(_) => "custom",
            },
            label: cycle.label().to_string(),
            emoji: cycle.emoji().to_string(),
        }
    }
}

/// Point-in-time view of the runner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSnapshot {
    pub phase: RunPhase,
    pub cycle: Option<CycleSummary>,
    /// Items to gather before starting (first-seen order)
    pub equipment: Vec<String>,
    pub exercise_index: usize,
    /// 1-based position for "Exercise N of M"; 0 before the run begins
    pub position: usize,
    pub exercise_count: usize,
    pub current_exercise: Option<Exercise>,
    pub total_secs: u32,
    /// `None` until the current exercise is marked ready
    pub exercise_secs: Option<u32>,
    pub total_display: String,
    pub exercise_display: String,
    pub paused: bool,
    pub ready: bool,
    pub is_last: bool,
    pub progress_percent: u32,
    /// Whether the tick source is armed
    pub ticking: bool,
    /// Session written when the last cycle finished
    pub last_session: Option<Session>,
}

/// Drives one cycle at a time.
pub struct CycleRunner {
    catalog: Arc<CatalogService>,
    db: LocalDb,
    state: Arc<Mutex<RunState>>,
    ticker: Option<TickHandle>,
    tick_mode: TickMode,
    clock: fn() -> NaiveDateTime,
    last_session: Option<Session>,
}

impl CycleRunner {
    pub fn new(catalog: Arc<CatalogService>, db: LocalDb) -> Self {
        Self {
            catalog,
            db,
            state: Arc::new(Mutex::new(RunState::default())),
            ticker: None,
            tick_mode: TickMode::Interval(TICK_PERIOD),
            clock: local_now,
            last_session: None,
        }
    }

    pub fn with_tick_mode(mut self, tick_mode: TickMode) -> Self {
        self.tick_mode = tick_mode;
        self
    }

    /// Override the wall clock used to stamp session records.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    // ─── Tick Source ─────────────────────────────────────────────

    /// Acquire the tick source, replacing any previous one.
    ///
    /// With [`TickMode::Interval`] this must run inside a tokio runtime.
    fn arm(&mut self) {
        self.disarm();
        let task = match self.tick_mode {
            TickMode::Manual => None,
            TickMode::Interval(period) => {
                let state = Arc::clone(&self.state);
                Some(tokio::spawn(async move {
                    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    loop {
                        interval.tick().await;
                        lock(&state).tick();
                    }
                }))
            }
        };
        self.ticker = Some(TickHandle { task });
    }

    fn disarm(&mut self) {
        self.ticker = None;
    }

    /// Advance the timers by one tick.
    pub fn tick(&self) {
        lock(&self.state).tick();
    }

    // ─── Transitions ─────────────────────────────────────────────

    /// Begin a cycle. Enters the equipment check when any exercise needs
    /// equipment, otherwise starts running right away.
    pub fn start(&mut self, cycle: Cycle) -> Result<RunSnapshot, RunnerError> {
        lock(&self.state).expect_phase(RunPhase::Picking, "start a cycle")?;
        self.begin(cycle);
        Ok(self.snapshot())
    }

    fn begin(&mut self, cycle: Cycle) {
        self.disarm();
        let exercises = self.catalog.resolve_exercise_list(&cycle);
        let equipment = unique_equipment(&exercises);

        if exercises.len() < cycle.exercise_ids().len() {
            tracing::warn!(
                cycle = %cycle.id(),
                declared = cycle.exercise_ids().len(),
                resolved = exercises.len(),
                "Dropped unknown exercise ids from cycle"
            );
        }

        let phase = if equipment.is_empty() {
            RunPhase::Running
        } else {
            RunPhase::EquipmentCheck
        };
        tracing::info!(
            cycle = %cycle.id(),
            exercises = exercises.len(),
            equipment = equipment.len(),
            %phase,
            "Cycle started"
        );

        *lock(&self.state) = RunState {
            phase,
            cycle: Some(cycle),
            exercises,
            equipment,
            ..RunState::default()
        };
        if phase == RunPhase::Running {
            self.arm();
        }
    }

    /// Confirm the equipment is at hand and start running.
    pub fn confirm_equipment(&mut self) -> Result<RunSnapshot, RunnerError> {
        {
            let mut state = lock(&self.state);
            state.expect_phase(RunPhase::EquipmentCheck, "confirm equipment")?;
            state.phase = RunPhase::Running;
        }
        self.arm();
        Ok(self.snapshot())
    }

    /// The user has begun the current exercise; its timer starts counting.
    pub fn mark_ready(&mut self) -> Result<RunSnapshot, RunnerError> {
        {
            let mut state = lock(&self.state);
            state.expect_phase(RunPhase::Running, "start the exercise")?;
            state.ready = true;
        }
        Ok(self.snapshot())
    }

    /// Stop both timers. Only available once the exercise is ready.
    pub fn pause(&mut self) -> Result<RunSnapshot, RunnerError> {
        {
            let mut state = lock(&self.state);
            state.expect_phase(RunPhase::Running, "pause")?;
            if !state.ready {
                return Err(RunnerError::NotReady);
            }
            if state.paused {
                return Err(RunnerError::AlreadyPaused);
            }
            state.paused = true;
        }
        self.disarm();
        Ok(self.snapshot())
    }

    pub fn resume(&mut self) -> Result<RunSnapshot, RunnerError> {
        {
            let mut state = lock(&self.state);
            state.expect_phase(RunPhase::Running, "resume")?;
            if !state.paused {
                return Err(RunnerError::NotPaused);
            }
            state.paused = false;
        }
        self.arm();
        Ok(self.snapshot())
    }

    /// Move to the next exercise, or finish on the last one.
    ///
    /// Finishing stops the ticks, appends one session record and waits for
    /// the write before entering `done`.
    pub async fn next(&mut self) -> Result<RunSnapshot, RunnerError> {
        let finished = {
            let mut state = lock(&self.state);
            state.expect_phase(RunPhase::Running, "advance")?;
            if !state.ready {
                return Err(RunnerError::NotReady);
            }
            if state.is_last() {
                state.phase = RunPhase::Done;
                Some(Session::completed_at(
                    (self.clock)(),
                    state.total_secs,
                    u32::try_from(state.exercises.len()).unwrap_or(u32::MAX),
                ))
            } else {
                advance(&mut state);
                None
            }
        };

        if let Some(session) = finished {
            self.finish(session).await;
        }
        Ok(self.snapshot())
    }

    /// Skip the current exercise. Not allowed on the last one.
    pub fn skip(&mut self) -> Result<RunSnapshot, RunnerError> {
        {
            let mut state = lock(&self.state);
            state.expect_phase(RunPhase::Running, "skip")?;
            if !state.ready {
                return Err(RunnerError::NotReady);
            }
            if state.is_last() {
                return Err(RunnerError::SkipOnLastExercise);
            }
            advance(&mut state);
        }
        Ok(self.snapshot())
    }

    /// Record a cycle that has already entered `done`.
    ///
    /// The write runs on its own task and completes even if the caller
    /// stops waiting for it.
    async fn finish(&mut self, session: Session) {
        self.disarm();
        if session.exercise_count == 0 {
            tracing::warn!("Finishing a cycle with no resolvable exercises");
        }
        tracing::info!(
            secs = session.secs,
            exercise_count = session.exercise_count,
            "Cycle finished"
        );
        self.last_session = Some(session.clone());

        let db = self.db.clone();
        let write = tokio::spawn(async move { db.append_session(&session).await });
        if let Err(e) = write.await {
            tracing::warn!(error = %e, "Session write task failed");
        }
    }

    /// Run the same cycle again from the start, equipment check included.
    pub fn restart(&mut self) -> Result<RunSnapshot, RunnerError> {
        let cycle = {
            let state = lock(&self.state);
            state.expect_phase(RunPhase::Done, "restart")?;
            state.cycle.clone()
        };
        match cycle {
            Some(cycle) => self.begin(cycle),
            None => self.reset(),
        }
        Ok(self.snapshot())
    }

    /// Abandon the current cycle and go back to picking.
    pub fn pick_different_cycle(&mut self) -> RunSnapshot {
        self.reset();
        self.snapshot()
    }

    fn reset(&mut self) {
        self.disarm();
        *lock(&self.state) = RunState::default();
    }

    // ─── Views ───────────────────────────────────────────────────

    pub fn snapshot(&self) -> RunSnapshot {
        let state = lock(&self.state).clone();
        let exercise_count = state.exercises.len();
        let progress_percent = if exercise_count == 0 {
            0
        } else {
            (((state.index + 1) * 100) / exercise_count) as u32
        };
        let exercise_secs = state.ready.then_some(state.exercise_secs);
        let on_exercise = matches!(state.phase, RunPhase::Running | RunPhase::Done);

        RunSnapshot {
            phase: state.phase,
            cycle: state.cycle.as_ref().map(CycleSummary::from),
            exercise_index: state.index,
            position: if on_exercise { state.index + 1 } else { 0 },
            exercise_count,
            current_exercise: on_exercise
                .then(|| state.exercises.get(state.index).cloned())
                .flatten(),
            total_secs: state.total_secs,
            exercise_secs,
            total_display: format_timer(state.total_secs),
            exercise_display: exercise_secs
                .map(format_timer)
                .unwrap_or_else(|| NOT_STARTED_DISPLAY.to_string()),
            paused: state.paused,
            ready: state.ready,
            is_last: state.is_last(),
            progress_percent,
            ticking: self.is_ticking(),
            last_session: self.last_session.clone(),
            equipment: state.equipment,
        }
    }
}

fn advance(state: &mut RunState) {
    state.index += 1;
    state.exercise_secs = 0;
    state.ready = false;
}
