//! Torrent identifiers.
//!
//! The daemon accepts either numeric ids or info-hash strings, and every operation that takes
//! ids accepts one of them or a list of them. [`TorrentIds`] is the normalized, always-a-list
//! form that goes on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single torrent, by numeric id or by hash string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TorrentRef {
    /// Daemon-assigned numeric id. Only stable for the lifetime of the daemon process.
    Id(i64),
    /// Info-hash string.
    Hash(String),
}

impl fmt::Display for TorrentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TorrentRef::Id(id) => write!(f, "{id}"),
            TorrentRef::Hash(hash) => f.write_str(hash),
        }
    }
}

impl TorrentRef {
    /// Whether a torrent snapshot refers to this torrent.
    pub fn matches(&self, id: Option<i64>, hash_string: Option<&str>) -> bool {
        match self {
            TorrentRef::Id(wanted) => id == Some(*wanted),
            TorrentRef::Hash(wanted) => {
                hash_string.is_some_and(|hash| hash.eq_ignore_ascii_case(wanted))
            }
        }
    }
}

impl From<i64> for TorrentRef {
    fn from(id: i64) -> Self {
        TorrentRef::Id(id)
    }
}

impl From<i32> for TorrentRef {
    fn from(id: i32) -> Self {
        TorrentRef::Id(id.into())
    }
}

impl From<u32> for TorrentRef {
    fn from(id: u32) -> Self {
        TorrentRef::Id(id.into())
    }
}

impl From<String> for TorrentRef {
    fn from(hash: String) -> Self {
        TorrentRef::Hash(hash)
    }
}

impl From<&str> for TorrentRef {
    fn from(hash: &str) -> Self {
        TorrentRef::Hash(hash.to_owned())
    }
}

impl From<&String> for TorrentRef {
    fn from(hash: &String) -> Self {
        TorrentRef::Hash(hash.clone())
    }
}

/// One or more torrents. A scalar id and a single-element list produce the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TorrentIds(Vec<TorrentRef>);

impl TorrentIds {
    /// Number of ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no ids are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TorrentRef> for TorrentIds {
    fn from_iter<I: IntoIterator<Item = TorrentRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<TorrentRef> for TorrentIds {
    fn from(id: TorrentRef) -> Self {
        Self(vec![id])
    }
}

impl From<&TorrentRef> for TorrentIds {
    fn from(id: &TorrentRef) -> Self {
        Self(vec![id.clone()])
    }
}

impl From<Vec<TorrentRef>> for TorrentIds {
    fn from(ids: Vec<TorrentRef>) -> Self {
        Self(ids)
    }
}

macro_rules! torrent_ids_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TorrentIds {
                fn from(id: $ty) -> Self {
                    Self(vec![id.into()])
                }
            }

            impl From<Vec<$ty>> for TorrentIds {
                fn from(ids: Vec<$ty>) -> Self {
                    ids.into_iter().map(TorrentRef::from).collect()
                }
            }

            impl From<&[$ty]> for TorrentIds {
                fn from(ids: &[$ty]) -> Self {
                    ids.iter().cloned().map(TorrentRef::from).collect()
                }
            }

            impl<const N: usize> From<[$ty; N]> for TorrentIds {
                fn from(ids: [$ty; N]) -> Self {
                    ids.into_iter().map(TorrentRef::from).collect()
                }
            }
        )*
    };
}

torrent_ids_from!(i64, i32, u32, String, &str);
