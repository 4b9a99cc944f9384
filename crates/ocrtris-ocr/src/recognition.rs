/// Outcome of a classification that may fail to reach confidence.
///
/// `Unrecognized` is an ordinary value: it flows through the tracker like any
/// other reading and is never replaced with a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Recognition<T> {
    Recognized(T),
    Unrecognized,
}

impl<T> Recognition<T> {
    #[must_use]
    pub fn recognized(self) -> Option<T> {
        match self {
            Recognition::Recognized(value) => Some(value),
            Recognition::Unrecognized => None,
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Recognition<U> {
        match self {
            Recognition::Recognized(value) => Recognition::Recognized(f(value)),
            Recognition::Unrecognized => Recognition::Unrecognized,
        }
    }
}

impl<T> From<Option<T>> for Recognition<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Recognition::Unrecognized, Recognition::Recognized)
    }
}
