#[cfg(unix)]
pub(crate) mod classify;
mod discovery;
#[cfg(unix)]
mod disk_space;
pub(crate) mod error;
mod host;
mod inspect;
#[cfg(unix)]
pub(crate) mod mounts;
pub(crate) mod types;
#[cfg(windows)]
mod windows;

pub(crate) use discovery::list_volumes;
pub(crate) use host::{SystemHost, VolumeHost};
pub(crate) use inspect::Inspector;
pub(crate) use types::{VolumeRecord, VolumeReport};
