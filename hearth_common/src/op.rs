//! Helper macro for deriving arithmetic operators on integer newtypes.

/// Implements a [`std::ops`] trait for a tuple newtype by delegating to the inner value.
///
/// * `binary` — `impl Trait for T` with `fn f(self, rhs: Self) -> Self`
/// * `inplace` — `impl Trait for T` with `fn f(&mut self, rhs: Self)`
/// * `unary` — `impl Trait for T` with `fn f(self) -> Self`
#[macro_export]
macro_rules! op {
    (binary $t:ident, $trait:ident, $method:ident) => {
        impl std::ops::$trait for $t {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                Self(std::ops::$trait::$method(self.0, rhs.0))
            }
        }
    };
    (inplace $t:ident, $trait:ident, $method:ident) => {
        impl std::ops::$trait for $t {
            fn $method(&mut self, rhs: Self) {
                std::ops::$trait::$method(&mut self.0, rhs.0)
            }
        }
    };
    (unary $t:ident, $trait:ident, $method:ident) => {
        impl std::ops::$trait for $t {
            type Output = Self;

            fn $method(self) -> Self::Output {
                Self(std::ops::$trait::$method(self.0))
            }
        }
    };
}
