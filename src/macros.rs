/// Generate accessor functions for the global reactive signals.
///
/// `global_signals! { pub name => field: Type, ... }` expands to one
/// `fn name() -> RwSignal<Type>` per entry, reading from
/// [`crate::global_state::globals`].
#[macro_export]
macro_rules! global_signals {
    ( $( $vis:vis $name:ident => $field:ident : $ty:ty ),+ $(,)? ) => {
        $(
            $vis fn $name() -> ::leptos::RwSignal<$ty> {
                $crate::global_state::globals().$field
            }
        )+
    };
}
