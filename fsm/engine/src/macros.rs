//! Declarative machine definitions

/// Declare a machine: its state enum, a marker type and the static table
///
/// Each state lists, in this order, an optional entry action, an optional
/// exit action, its reactions and an optional eventless successor. Actions
/// are written as `|ctx| { .. }` and receive `&mut` the declared context.
///
/// ```
/// use fsm_engine::{define_machine, Machine, Outcome};
///
/// fsm_core::define_events! {
///     pub enum Button {
///         Press,
///     }
/// }
///
/// define_machine! {
///     pub machine Toggle {
///         states: ToggleState,
///         event: Button,
///         context: u32,
///         initial: Off,
///
///         Off {
///             on Press => On |presses| { *presses += 1; };
///         }
///         On {
///             entry |_presses| {}
///             on Press => Off;
///         }
///     }
/// }
///
/// let mut presses = 0;
/// let mut toggle = Machine::<Toggle>::start(&mut presses);
/// assert_eq!(
///     toggle.react(Button::Press, &mut presses),
///     Outcome::Transition { from: ToggleState::Off, to: ToggleState::On }
/// );
/// assert_eq!(presses, 1);
/// ```
#[macro_export]
macro_rules! define_machine {
    (
        $(#[$meta:meta])*
        $vis:vis machine $name:ident {
            states: $states:ident,
            event: $event:ident,
            context: $ctx:ty,
            initial: $initial:ident,

            $(
                $state:ident {
                    $(entry |$en:ident| $entry:block)?
                    $(exit |$ex:ident| $exit:block)?
                    $(on $ev:ident => $target:ident $(|$an:ident| $action:block)? ;)*
                    $(goto $next:ident ;)?
                }
            )+
        }
    ) => {
        /// States of the machine, in table order
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $states {
            $($state,)+
        }

        impl $states {
            /// Every state, in table order
            pub const ALL: &'static [$states] = &[$($states::$state),+];
        }

        impl $crate::StateId for $states {
            fn index(self) -> usize {
                self as usize
            }

            fn name(self) -> &'static str {
                match self {
                    $($states::$state => stringify!($state),)+
                }
            }
        }

        $(#[$meta])*
        $vis struct $name;

        impl $crate::MachineDef for $name {
            type State = $states;
            type Event = $event;
            type Context = $ctx;

            const NAME: &'static str = stringify!($name);
            const INITIAL: $states = $states::$initial;
            const STATES: &'static [$crate::StateDef<$states, $event, $ctx>] = &[
                $(
                    $crate::StateDef {
                        id: $states::$state,
                        entry: $crate::__fsm_entry!($ctx; $($en $entry)?),
                        exit: $crate::__fsm_optional_action!($ctx; $($ex $exit)?),
                        reactions: &[
                            $(
                                $crate::Reaction {
                                    event: $event::$ev,
                                    target: $states::$target,
                                    action: $crate::__fsm_optional_action!($ctx; $($an $action)?),
                                },
                            )*
                        ],
                        eventless: $crate::__fsm_successor!($states; $($next)?),
                    },
                )+
            ];
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __fsm_action {
    ($ctx:ty; $arg:ident $body:block) => {{
        fn action($arg: &mut $ctx) $body
        action as fn(&mut $ctx)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __fsm_entry {
    ($ctx:ty;) => {
        $crate::noop::<$ctx> as fn(&mut $ctx)
    };
    ($ctx:ty; $arg:ident $body:block) => {
        $crate::__fsm_action!($ctx; $arg $body)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __fsm_optional_action {
    ($ctx:ty;) => {
        ::core::option::Option::None
    };
    ($ctx:ty; $arg:ident $body:block) => {
        ::core::option::Option::Some($crate::__fsm_action!($ctx; $arg $body))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __fsm_successor {
    ($states:ident;) => {
        ::core::option::Option::None
    };
    ($states:ident; $next:ident) => {
        ::core::option::Option::Some($states::$next)
    };
}
