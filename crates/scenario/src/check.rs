/// Expected value in an assertion: either a wildcard or an exact value.
///
/// Written as `"*"` in documents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CheckValue<T> {
    /// Not checked.
    #[default]
    Star,
    /// Must equal the given value.
    Equal(T),
}

impl<T> CheckValue<T> {
    /// Wildcard text.
    pub const STAR: &'static str = "*";

    /// Returns `true` if the value is not checked.
    pub fn is_star(&self) -> bool {
        matches!(self, Self::Star)
    }

    /// Returns the expected value, if any.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Star => None,
            Self::Equal(value) => Some(value),
        }
    }

    /// Returns `true` if `actual` satisfies this check.
    pub fn check<U>(&self, actual: &U) -> bool
    where
        T: PartialEq<U>,
    {
        match self {
            Self::Star => true,
            Self::Equal(expected) => expected == actual,
        }
    }
}

impl<T> From<T> for CheckValue<T> {
    fn from(value: T) -> Self {
        Self::Equal(value)
    }
}
