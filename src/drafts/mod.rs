mod entry;

pub(crate) use entry::{EntryForm, Mutation};
