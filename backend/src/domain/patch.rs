//! Tri-state field used by partial updates.
//!
//! An update request distinguishes a field that was never sent from one that
//! carries a value. JSON `null` is treated the same as an omitted field so the
//! stored value is left untouched.

use serde::{Deserialize, Deserializer};

/// Field that may be absent from a partial update.
///
/// # Examples
/// ```
/// use todo_backend::domain::Patch;
///
/// let mut title = String::from("old");
/// Patch::Present(String::from("new")).apply_to(&mut title);
/// assert_eq!(title, "new");
///
/// Patch::<String>::Absent.apply_to(&mut title);
/// assert_eq!(title, "new");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was omitted or sent as `null`.
    #[default]
    Absent,
    /// The field carried a value.
    Present(T),
}

impl<T> Patch<T> {
    /// Whether the field carried a value.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Keep the carried value only when `keep` accepts it.
    #[must_use]
    pub fn filter(self, keep: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Self::Present(value) if keep(&value) => Self::Present(value),
            _ => Self::Absent,
        }
    }

    /// Overwrite `target` when the field carried a value.
    pub fn apply_to(self, target: &mut T) {
        if let Self::Present(value) = self {
            *target = value;
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
