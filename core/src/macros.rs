macro_rules! meta_kinds {
    ($($(#[$doc:meta])* $fn_name:ident => ($number:expr, $code:literal, $message:literal, $status:expr);)*) => {
        impl MetaError {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $fn_name() -> Self {
                    Self::new($code, $number, $message, $status)
                }
            )*
        }

        #[cfg(test)]
        const ALL_KINDS: &[fn() -> MetaError] = &[$(MetaError::$fn_name),*];
    };
}
