mod entries;

pub(crate) use entries::{use_entry_cache, CacheState, EntryCache};
