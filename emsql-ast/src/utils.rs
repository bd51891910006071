use core::fmt;

/// Displays a slice separated by the given separator.
pub(crate) fn display_separated<'a, T: fmt::Display>(
    slice: &'a [T],
    sep: &'static str,
) -> impl fmt::Display + 'a {
    struct Separated<'a, T> {
        slice: &'a [T],
        sep: &'static str,
    }
    impl<T: fmt::Display> fmt::Display for Separated<'_, T> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut first = true;
            for item in self.slice {
                if !first {
                    f.write_str(self.sep)?;
                }
                first = false;
                write!(f, "{}", item)?;
            }
            Ok(())
        }
    }
    Separated { slice, sep }
}

/// Displays a slice separated by `, `.
pub(crate) fn display_comma_separated<T: fmt::Display>(slice: &[T]) -> impl fmt::Display + '_ {
    display_separated(slice, ", ")
}

/// Escapes single quotes by doubling them.
pub(crate) fn escape_single_quote_string(s: &str) -> String {
    s.replace('\'', "''")
}
