//! Logical timer identities and the control seam used by state actions

use core::fmt;

use crate::Period;

/// A member of a closed set of logical timers
///
/// Each logical timer is bound 1:1 to a hardware channel for the lifetime of
/// the program. Implementations are normally produced by [`define_timers!`].
pub trait TimerId: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Number of logical timers in the set
    const COUNT: usize;

    /// Dense index in `0..COUNT`
    fn index(self) -> usize;

    /// Human-readable timer name, used in log records
    fn name(self) -> &'static str;
}

/// Start/stop operations that entry and transition actions issue
///
/// Both operations are infallible from the caller's point of view: starting
/// or stopping an unbound timer does nothing. Starting a running timer
/// replaces its period, stopping a stopped timer is harmless.
pub trait TimerControl<T: TimerId> {
    /// Arm `timer` for a periodic expiry every `period`
    fn start(&mut self, timer: T, period: Period);

    /// Disarm `timer` and reset its counter
    fn stop(&mut self, timer: T);
}

/// Declare a closed set of logical timers
///
/// ```
/// fsm_core::define_timers! {
///     pub enum AppTimer {
///         Timer1,
///         Timer2,
///     }
/// }
///
/// use fsm_core::TimerId;
/// assert_eq!(AppTimer::Timer2.index(), 1);
/// assert_eq!(AppTimer::Timer1.name(), "Timer1");
/// ```
#[macro_export]
macro_rules! define_timers {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every timer of the set, in index order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::TimerId for $name {
            const COUNT: usize = $name::ALL.len();

            fn index(self) -> usize {
                self as usize
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }
        }
    };
}
