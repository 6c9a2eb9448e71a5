//! Event tags and the macro that declares them

use core::fmt;

/// Raw wire value of an event tag
///
/// This is what the event FIFO actually stores in its slots. A closed event
/// set has at most 256 members, one signal per member, numbered from zero in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signal(pub u8);

impl Signal {
    /// Create a signal from its raw value
    pub const fn new(raw: u8) -> Self {
        Signal(raw)
    }

    /// Get the raw signal value
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIG({})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Signal {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "SIG({})", self.0);
    }
}

/// A member of a closed, payload-free event set
///
/// Implementations are normally produced by [`define_events!`]. The
/// signal/tag mapping must be a bijection over `0..COUNT`.
pub trait Event: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Number of distinct tags in the set
    const COUNT: usize;

    /// Signal carried through the event FIFO for this tag
    fn signal(self) -> Signal;

    /// Recover the tag from its signal, `None` for values outside the set
    fn from_signal(signal: Signal) -> Option<Self>;

    /// Human-readable tag name, used in log records
    fn name(self) -> &'static str;
}

/// Declare a closed event set
///
/// Generates a `#[repr(u8)]` enum, an `ALL` constant listing every tag in
/// signal order, and the [`Event`] implementation.
///
/// ```
/// fsm_core::define_events! {
///     pub enum AppEvent {
///         Timer1Expired,
///         Timer2Expired,
///     }
/// }
///
/// use fsm_core::Event;
/// assert_eq!(AppEvent::COUNT, 2);
/// assert_eq!(AppEvent::Timer2Expired.signal().raw(), 1);
/// ```
#[macro_export]
macro_rules! define_events {
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
            /// Every tag of the set, in signal order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::Event for $name {
            const COUNT: usize = $name::ALL.len();

            fn signal(self) -> $crate::Signal {
                $crate::Signal::new(self as u8)
            }

            fn from_signal(signal: $crate::Signal) -> ::core::option::Option<Self> {
                $name::ALL.get(signal.raw() as usize).copied()
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }
        }
    };
}
