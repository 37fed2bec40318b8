pub mod auth;
pub mod comment;
pub mod post;

use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, marker::PhantomData};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    Id(#[from] InvalidIdError),
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Ids must not be negative: {0}")]
pub struct InvalidIdError(i64);

/// Database identifier of a record, tagged with the kind of record it refers to.
///
/// Serializes as the bare integer, so `Id<PostMarker>` round-trips through path
/// segments like `/posts/1`.
#[derive_where(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<Marker>(u64, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> From<u64> for Id<Marker> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<Id<Marker>> for u64 {
    fn from(value: Id<Marker>) -> Self {
        value.get()
    }
}

impl<Marker> TryFrom<i64> for Id<Marker> {
    type Error = InvalidIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self::new)
            .map_err(|_| InvalidIdError(value))
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Id, InvalidIdError, post::PostMarker};

    #[test]
    fn id_from_database_integer() {
        assert_eq!(Id::<PostMarker>::try_from(0_i64), Ok(Id::new(0)));
        assert_eq!(Id::<PostMarker>::try_from(i64::MAX), Ok(Id::new(0x7FFF_FFFF_FFFF_FFFF)));
        assert_eq!(Id::<PostMarker>::try_from(-1_i64), Err(InvalidIdError(-1)));
    }

    #[test]
    fn id_serializes_transparently() {
        let id = Id::<PostMarker>::new(42);

        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(serde_json::from_str::<Id<PostMarker>>("42").unwrap(), id);
        assert_eq!(id.to_string(), "42");
    }
}
