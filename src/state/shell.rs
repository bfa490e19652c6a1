use crate::models::EntryId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub(crate) enum Section {
    #[default]
    Home,
    Card,
    Table,
}

/// Dashboard shell: the active section plus the cross-view deletion signal.
///
/// Owned by the dashboard page and handed down; a remount starts over.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Shell {
    pub section: Section,
    /// Last id deleted from the card view. Only ever overwritten.
    pub deleted_id: Option<EntryId>,
}

impl Shell {
    pub fn select(&mut self, section: Section) {
        self.section = section;
    }

    pub fn publish_deleted(&mut self, id: EntryId) {
        self.deleted_id = Some(id);
    }
}
