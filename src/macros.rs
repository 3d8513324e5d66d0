/// Newtype plumbing for response wrappers: `Deref` to the wrapped value, `From` it, and
/// `into_inner` back out.
macro_rules! impl_wrapper {
    ($($ty:ident => $target:ty),* $(,)?) => {
        $(
            impl core::ops::Deref for $ty {
                type Target = $target;

                fn deref(&self) -> &Self::Target {
                    &self.0
                }
            }

            impl From<$target> for $ty {
                fn from(inner: $target) -> Self {
                    Self(inner)
                }
            }

            impl $ty {
                #[doc = concat!("Unwrap the `", stringify!($target), "`.")]
                #[must_use]
                pub fn into_inner(self) -> $target {
                    self.0
                }
            }
        )*
    };
}
