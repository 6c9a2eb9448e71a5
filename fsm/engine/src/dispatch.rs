//! Fan-out of one event stream to a list of machines

use fsm_core::Event;

use crate::machine::Machine;
use crate::table::MachineDef;

/// Something that consumes every dequeued event: a machine or a machine list
///
/// Tuples dispatch to their members in declaration order. All members share
/// the event set `E` and the context `C`.
pub trait Dispatch<E: Event, C: ?Sized> {
    /// Construct every machine, running initial entries in order
    fn start_all(ctx: &mut C) -> Self
    where
        Self: Sized;

    /// Hand `event` to every machine
    fn dispatch(&mut self, event: E, ctx: &mut C);
}

impl<D: MachineDef> Dispatch<D::Event, D::Context> for Machine<D> {
    fn start_all(ctx: &mut D::Context) -> Self {
        Machine::start(ctx)
    }

    fn dispatch(&mut self, event: D::Event, ctx: &mut D::Context) {
        let _ = self.react(event, ctx);
    }
}

macro_rules! impl_dispatch_for_tuple {
    ($($member:ident $idx:tt),+) => {
        impl<E: Event, C: ?Sized, $($member: Dispatch<E, C>),+> Dispatch<E, C> for ($($member,)+) {
            fn start_all(ctx: &mut C) -> Self {
                ($($member::start_all(ctx),)+)
            }

            fn dispatch(&mut self, event: E, ctx: &mut C) {
                $(self.$idx.dispatch(event, ctx);)+
            }
        }
    };
}

impl_dispatch_for_tuple!(M0 0);
impl_dispatch_for_tuple!(M0 0, M1 1);
impl_dispatch_for_tuple!(M0 0, M1 1, M2 2);
impl_dispatch_for_tuple!(M0 0, M1 1, M2 2, M3 3);
impl_dispatch_for_tuple!(M0 0, M1 1, M2 2, M3 3, M4 4);
impl_dispatch_for_tuple!(M0 0, M1 1, M2 2, M3 3, M4 4, M5 5);
