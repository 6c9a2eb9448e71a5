//! Static state tables

use core::fmt;

use fsm_core::Event;

/// Tagged identity of a state within one machine
pub trait StateId: Copy + Eq + fmt::Debug + 'static {
    /// Position of the state's row in [`MachineDef::STATES`]
    fn index(self) -> usize;

    /// Human-readable state name, used in log records
    fn name(self) -> &'static str;
}

/// One row of a reaction table: event → (target, transition action)
pub struct Reaction<S: 'static, E: 'static, C: ?Sized + 'static> {
    pub event: E,
    pub target: S,
    pub action: Option<fn(&mut C)>,
}

/// One state of a machine
pub struct StateDef<S: 'static, E: 'static, C: ?Sized + 'static> {
    pub id: S,
    /// Runs exactly once per transition into the state
    pub entry: fn(&mut C),
    pub exit: Option<fn(&mut C)>,
    /// Partial map from event to transition; absent events are ignored
    pub reactions: &'static [Reaction<S, E, C>],
    /// Unconditional successor taken right after `entry`
    pub eventless: Option<S>,
}

impl<S: StateId, E: Event, C: ?Sized + 'static> StateDef<S, E, C> {
    /// Find the reaction for `event`
    pub fn reaction(&self, event: E) -> Option<&'static Reaction<S, E, C>> {
        self.reactions.iter().find(|r| r.event == event)
    }
}

/// Definition of a machine type: its state set, event set, context and table
///
/// Normally generated by [`define_machine!`](crate::define_machine). The row
/// for state `s` is expected at `STATES[s.index()]`.
pub trait MachineDef: 'static {
    type State: StateId;
    type Event: Event;
    /// What entry, exit and transition actions operate on
    type Context: ?Sized + 'static;

    const NAME: &'static str;
    const INITIAL: Self::State;
    const STATES: &'static [StateDef<Self::State, Self::Event, Self::Context>];
}

/// Entry action of a state that declares none
pub fn noop<C: ?Sized>(_ctx: &mut C) {}
