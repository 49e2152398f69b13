//! Event dispatch between the presentation layer and the engine.
//!
//! [`App`] owns the single session in progress, the reason catalog and the
//! archive, and enforces the input protocol: stage a score, commit it,
//! settle its reason, repeat. While a reason is pending, score input and
//! session commands are refused until the picker is answered.

use crate::catalog::ReasonCatalog;
use crate::config::Config;
use crate::db::KeyValueStore;
use crate::detail;
use crate::error::{CaromError, Result};
use crate::history::HistoryStore;
use crate::models::{ArchivedSession, DetailProjection, ReasonChoice, SessionStats, Turn};
use crate::session::SessionEngine;
use crate::stager::InputStager;
use crate::stats::{projection_table, OverallStats, ProjectionRow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Digit(char),
    Backspace,
    Clear,
    Commit,
    SelectReason(ReasonChoice),
    EndSession,
    Reset,
    AddReason(String),
    DeleteReason(usize),
    RequestDetail(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The staged value after a keypad edit.
    Staged(u64),
    /// A turn was recorded; the caller must now present these choices plus
    /// a skip option.
    ChooseReason { turn: Turn, choices: Vec<String> },
    /// The pending reason was settled.
    TurnSettled(Turn),
    Archived(ArchivedSession),
    Reset,
    /// The catalog after an add or delete.
    Reasons(Vec<String>),
    Detail(DetailProjection),
    /// Refused: a reason must be chosen first.
    AwaitingReason,
    /// Nothing to do; nothing changed and nothing should be reported.
    Ignored,
}

pub struct App<S> {
    config: Config,
    stager: InputStager,
    engine: SessionEngine,
    catalog: ReasonCatalog<S>,
    history: HistoryStore<S>,
}

impl<S: KeyValueStore + Clone> App<S> {
    pub fn open(store: S, config: Config) -> Result<Self> {
        let catalog = ReasonCatalog::open(store.clone())?;
        let history = HistoryStore::open(store)?;
        Ok(Self {
            config,
            stager: InputStager::new(),
            engine: SessionEngine::new(),
            catalog,
            history,
        })
    }
}

impl<S: KeyValueStore> App<S> {
    pub fn dispatch(&mut self, event: Event) -> Result<Outcome> {
        let gated = matches!(
            event,
            Event::Digit(_)
                | Event::Backspace
                | Event::Clear
                | Event::Commit
                | Event::EndSession
                | Event::Reset
        );
        if gated && self.engine.reason_pending() {
            return Ok(Outcome::AwaitingReason);
        }

        match event {
            Event::Digit(d) => {
                if !self.stager.press_digit(d) {
                    return Ok(Outcome::Ignored);
                }
                Ok(Outcome::Staged(self.stager.value()))
            }
            Event::Backspace => {
                self.stager.backspace();
                Ok(Outcome::Staged(self.stager.value()))
            }
            Event::Clear => {
                self.stager.clear();
                Ok(Outcome::Staged(self.stager.value()))
            }
            Event::Commit => {
                let turn = self.engine.add_turn(self.stager.value(), None);
                self.stager.clear();
                Ok(Outcome::ChooseReason {
                    turn,
                    choices: self.catalog.list().to_vec(),
                })
            }
            Event::SelectReason(choice) => {
                if !self.engine.reason_pending() {
                    return Ok(Outcome::Ignored);
                }
                let reason = self.catalog.resolve(choice);
                let turn = self.engine.attach_reason(reason)?;
                Ok(Outcome::TurnSettled(turn.clone()))
            }
            Event::EndSession => match self.engine.end_session(&mut self.history) {
                Ok(archived) => {
                    self.stager.clear();
                    Ok(Outcome::Archived(archived))
                }
                Err(CaromError::NoOp) => Ok(Outcome::Ignored),
                Err(e) => Err(e),
            },
            Event::Reset => {
                self.engine.reset();
                self.stager.clear();
                tracing::info!("Session reset");
                Ok(Outcome::Reset)
            }
            Event::AddReason(label) => {
                if !self.catalog.add(&label)? {
                    return Ok(Outcome::Ignored);
                }
                Ok(Outcome::Reasons(self.catalog.list().to_vec()))
            }
            Event::DeleteReason(position) => {
                if !self.catalog.delete_at(position)? {
                    return Ok(Outcome::Ignored);
                }
                Ok(Outcome::Reasons(self.catalog.list().to_vec()))
            }
            Event::RequestDetail(index) => {
                let detail = self.history.detail_at(index)?;
                Ok(Outcome::Detail(detail::project(detail)))
            }
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.engine.stats()
    }

    pub fn staged(&self) -> &str {
        self.stager.display()
    }

    pub fn reason_pending(&self) -> bool {
        self.engine.reason_pending()
    }

    pub fn reasons(&self) -> &[String] {
        self.catalog.list()
    }

    pub fn turns(&self) -> &[Turn] {
        self.engine.turns()
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Points needed to reach each stepped target within the next turns.
    pub fn projections(&self) -> Vec<ProjectionRow> {
        projection_table(
            &self.engine.stats(),
            self.config.target,
            self.config.target_step,
            self.config.projection_turns,
        )
    }

    pub fn overall(&self) -> OverallStats {
        let window = self.config.history_window;
        OverallStats::compute(
            self.history.recent(window),
            self.history.len(),
            window,
            self.config.match_turns,
            self.config.target,
            self.config.target_step,
        )
    }
}
