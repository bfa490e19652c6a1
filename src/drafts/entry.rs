use crate::models::{Entry, EntryField, EntryFields, EntryId};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum FormMode {
    #[default]
    Create,
    /// Target captured when editing began; not re-checked against the cache.
    Edit(EntryId),
}

/// The request a submit turns into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mutation {
    Create(EntryFields),
    Update { id: EntryId, fields: EntryFields },
}

/// Modal form state for one view: open flag, mode and the draft values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EntryForm {
    pub open: bool,
    pub mode: FormMode,
    pub draft: EntryFields,
}

impl EntryForm {
    pub fn open_create(&mut self) {
        self.open = true;
        self.mode = FormMode::Create;
        self.draft = EntryFields::default();
    }

    pub fn open_edit(&mut self, entry: &Entry) {
        self.open = true;
        self.mode = FormMode::Edit(entry.id.clone());
        self.draft = entry.fields.clone();
    }

    pub fn set_field(&mut self, field: EntryField, value: String) {
        self.draft.set(field, value);
    }

    /// Cancel: hide the form and drop the draft.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// What a submit of the current draft sends. `None` while closed.
    pub fn mutation(&self) -> Option<Mutation> {
        if !self.open {
            return None;
        }
        Some(match &self.mode {
            FormMode::Edit(id) => Mutation::Update {
                id: id.clone(),
                fields: self.draft.clone(),
            },
            FormMode::Create => Mutation::Create(self.draft.clone()),
        })
    }

    /// A successful submit closes the form and clears the draft. Failures
    /// leave everything in place so the user can retry.
    pub fn finish_submit(&mut self, ok: bool) {
        if ok {
            self.close();
        }
    }
}
