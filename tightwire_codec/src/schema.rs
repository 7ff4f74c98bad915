use crate::{Result, WireError};
use derive_more::{Display, From, Into};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};


/// A compact stand-in for a [`TypeName`], meaningful only within the [`TypeSchema`] that assigned it.
#[derive(From, Into, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct TypeHandle(u32);

impl TypeHandle {
    /// Marks the absence of a type. Never assigned.
    pub const NULL: TypeHandle = TypeHandle(0);
    pub const FIRST: TypeHandle = TypeHandle(1);

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

/// A full type identifier, e.g. `geom.Point2`.
#[derive(Display, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub struct TypeName(Arc<str>);

impl TypeName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}
impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}
impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Default)]
struct SchemaTable {
    handles: HashMap<TypeName, TypeHandle>,
    /// `names[i]` is the name of handle `i + 1`.
    names: Vec<TypeName>,
}

/// An append-only bijection between [`TypeName`]s and [`TypeHandle`]s.
///
/// Handles are assigned in first-seen order starting at [`TypeHandle::FIRST`],
/// and are never removed or renumbered.
/// Lookups share a read lock; assignments serialize on the write lock,
/// so concurrent first sightings of one name all observe the same handle.
#[derive(Default)]
pub struct TypeSchema {
    table: RwLock<SchemaTable>,
}

impl TypeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /* Every mutation leaves the table consistent, so a poisoned lock is still usable. */
    fn read_table(&self) -> RwLockReadGuard<'_, SchemaTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }
    fn write_table(&self) -> RwLockWriteGuard<'_, SchemaTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_or_assign(&self, name: &TypeName) -> Result<TypeHandle> {
        if let Some(handle) = self.read_table().handles.get(name) {
            return Ok(*handle);
        }

        let mut table = self.write_table();

        /* Another registration may have won between the two locks. */
        if let Some(handle) = table.handles.get(name) {
            return Ok(*handle);
        }

        let next = table.names.len() as u64 + 1;
        let handle = u32::try_from(next)
            .map(TypeHandle)
            .map_err(|_| WireError::limit("type handles", next, u32::MAX))?;
        table.names.push(name.clone());
        table.handles.insert(name.clone(), handle);

        log::debug!("Assigned type handle {handle} to {name}.");

        Ok(handle)
    }

    pub fn resolve(&self, handle: TypeHandle) -> Result<TypeName> {
        let idx = (handle.0 as usize).checked_sub(1);
        idx.and_then(|idx| self.read_table().names.get(idx).cloned())
            .ok_or(WireError::UnknownHandle { handle })
    }

    pub fn handle_of(&self, name: &str) -> Option<TypeHandle> {
        self.read_table().handles.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.read_table().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
