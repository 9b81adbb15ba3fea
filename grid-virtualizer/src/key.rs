#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::CellKey;

#[cfg(feature = "std")]
pub(crate) type CellMap<V> = HashMap<CellKey, V>;
#[cfg(not(feature = "std"))]
pub(crate) type CellMap<V> = BTreeMap<CellKey, V>;
