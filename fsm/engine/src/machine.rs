//! Machine instances

use core::fmt;
use core::marker::PhantomData;

use fsm_core::Event;

use crate::table::{MachineDef, StateDef, StateId};

/// Longest run of eventless transitions taken after a single entry
pub const MAX_EVENTLESS_CHAIN: usize = 16;

/// Result of reacting to one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<S> {
    /// The event matched; `to` is the state the machine settled in
    Transition { from: S, to: S },
    /// No reaction for the event in the current state
    Ignored,
}

impl<S> Outcome<S> {
    pub fn is_transition(&self) -> bool {
        matches!(self, Outcome::Transition { .. })
    }
}

#[cfg(feature = "defmt")]
impl<S: StateId> defmt::Format for Outcome<S> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Outcome::Transition { from, to } => {
                defmt::write!(fmt, "Transition({=str} -> {=str})", from.name(), to.name())
            }
            Outcome::Ignored => defmt::write!(fmt, "Ignored"),
        }
    }
}

/// A running instance of machine `D`
///
/// Holds nothing but the current state; behaviour lives in `D::STATES`.
pub struct Machine<D: MachineDef> {
    state: D::State,
    _def: PhantomData<D>,
}

impl<D: MachineDef> Machine<D> {
    /// Construct the machine and run the initial state's entry action
    pub fn start(ctx: &mut D::Context) -> Self {
        let mut machine = Self {
            state: D::INITIAL,
            _def: PhantomData,
        };
        log::trace!("{}: start in {}", D::NAME, D::INITIAL.name());
        machine.enter(D::INITIAL, ctx);
        machine
    }

    /// Get the active state
    pub fn current_state(&self) -> D::State {
        self.state
    }

    /// React to one event
    ///
    /// On a match: transition action, exit of the current state, switch to
    /// the target, target entry. Otherwise nothing runs at all.
    pub fn react(&mut self, event: D::Event, ctx: &mut D::Context) -> Outcome<D::State> {
        let from = self.state;
        let Some(def) = Self::row(from) else {
            return Outcome::Ignored;
        };
        let Some(reaction) = def.reaction(event) else {
            log::trace!("{}: {} ignored in {}", D::NAME, event.name(), from.name());
            return Outcome::Ignored;
        };

        if let Some(action) = reaction.action {
            action(ctx);
        }
        if let Some(exit) = def.exit {
            exit(ctx);
        }
        log::trace!(
            "{}: {} --{}--> {}",
            D::NAME,
            from.name(),
            event.name(),
            reaction.target.name()
        );
        self.enter(reaction.target, ctx);

        Outcome::Transition {
            from,
            to: self.state,
        }
    }

    /// Make `target` current, run its entry, then follow eventless successors
    fn enter(&mut self, target: D::State, ctx: &mut D::Context) {
        let mut state = target;
        let mut hops = 0;
        loop {
            self.state = state;
            let Some(def) = Self::row(state) else {
                return;
            };
            (def.entry)(ctx);

            let Some(next) = def.eventless else {
                return;
            };
            if hops == MAX_EVENTLESS_CHAIN {
                log::warn!(
                    "{}: eventless chain longer than {}, stopping in {}",
                    D::NAME,
                    MAX_EVENTLESS_CHAIN,
                    state.name()
                );
                return;
            }
            hops += 1;
            if let Some(exit) = def.exit {
                exit(ctx);
            }
            log::trace!("{}: {} --> {}", D::NAME, state.name(), next.name());
            state = next;
        }
    }

    fn row(state: D::State) -> Option<&'static StateDef<D::State, D::Event, D::Context>> {
        let row = D::STATES
            .get(state.index())
            .filter(|def| def.id == state)
            .or_else(|| D::STATES.iter().find(|def| def.id == state));
        if row.is_none() {
            log::warn!("{}: no table row for {}", D::NAME, state.name());
        }
        row
    }
}

impl<D: MachineDef> fmt::Debug for Machine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &D::NAME)
            .field("state", &self.state)
            .finish()
    }
}
