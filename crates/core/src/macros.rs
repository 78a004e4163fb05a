// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros for config builders.

/// Generate chained builder setters inside an existing `impl` block.
///
/// - `set { field: Type }` assigns the value as given
/// - `option { field: Type }` fills an `Option<Type>` field with `Some(v.into())`
///
/// ```ignore
/// impl MockConfig {
///     vtime::setters! {
///         set { warn_on_backward: bool }
///         option { start: Instant }
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    (
        $(set { $( $set_field:ident : $set_ty:ty ),* $(,)? })?
        $(option { $( $opt_field:ident : $opt_ty:ty ),* $(,)? })?
    ) => {
        $($(
            pub fn $set_field(mut self, $set_field: $set_ty) -> Self {
                self.$set_field = $set_field;
                self
            }
        )*)?

        $($(
            pub fn $opt_field(mut self, $opt_field: impl Into<$opt_ty>) -> Self {
                self.$opt_field = Some($opt_field.into());
                self
            }
        )*)?
    };
}

#[cfg(test)]
#[path = "macros_tests.rs"]
mod tests;
