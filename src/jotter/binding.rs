//! # Input Binding
//!
//! Translates user gestures into Mutation API calls and keeps the small amount
//! of state a UI needs between gestures.
//!
//! ## Edit State Machine
//!
//! Each note's title and content are edited independently:
//!
//! ```text
//!            double-click                 blur / Enter
//! Display ───────────────▶ Editing ─────────────────────▶ Display
//!                          (buffer)      commit: trim + edit_note_field
//! ```
//!
//! Enter never inserts a line break while editing; it forces the blur, and
//! leaving `Editing` always commits.
//!
//! ## Drafts
//!
//! Text typed into the create form and into each note's to-do input is held
//! in [`UiState`] until it is submitted. A blank submission is a no-op and the
//! draft stays as it was; a successful one clears it.
//!
//! ## Confirmation
//!
//! Deleting a note first asks a [`Confirm`] implementation, a synchronous step
//! with exactly two outcomes. [`Decision::Abort`] leaves the store untouched.

use crate::api::JotterApi;
use crate::commands::{CmdMessage, CmdResult, Refresh};
use crate::error::Result;
use crate::model::{Note, NoteField, NoteId, TodoId};
use crate::store::SlotStorage;
use crate::view::{self, NoteListView};
use log::debug;
use std::collections::HashMap;

pub const DELETE_NOTE_PROMPT: &str = "Are you sure you want to delete this note?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Abort,
}

/// A blocking yes/no question put to the user.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Decision;
}

impl<C: Confirm + ?Sized> Confirm for Box<C> {
    fn confirm(&mut self, prompt: &str) -> Decision {
        (**self).confirm(prompt)
    }
}

/// Answers every question with the same decision. Used for `--yes`, for
/// `confirm_delete = false`, and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub Decision);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, _prompt: &str) -> Decision {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Display,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Typing into the create form.
    FormInput { field: FormField, text: String },
    /// Submitting the create form.
    Submit,
    DoubleClick { note: NoteId, field: NoteField },
    /// Typing into a field that is being edited.
    EditInput {
        note: NoteId,
        field: NoteField,
        text: String,
    },
    EditKey {
        note: NoteId,
        field: NoteField,
        key: Key,
    },
    Blur { note: NoteId, field: NoteField },
    /// Typing into a note's to-do input.
    TodoInput { note: NoteId, text: String },
    TodoKey { note: NoteId, key: Key },
    AddTodoClick { note: NoteId },
    CheckboxChange {
        note: NoteId,
        todo: TodoId,
        checked: bool,
    },
    DeleteTodoClick { note: NoteId, todo: TodoId },
    DeleteNoteClick { note: NoteId },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub title: String,
    pub content: String,
}

/// UI-only state: the create form, edit buffers and to-do drafts.
///
/// Nothing here is persisted.
#[derive(Debug, Default)]
pub struct UiState {
    form: FormDraft,
    editing: HashMap<(NoteId, NoteField), String>,
    todo_drafts: HashMap<NoteId, String>,
}

impl UiState {
    pub fn form(&self) -> &FormDraft {
        &self.form
    }

    pub fn edit_state(&self, note: NoteId, field: NoteField) -> EditState {
        if self.editing.contains_key(&(note, field)) {
            EditState::Editing
        } else {
            EditState::Display
        }
    }

    pub fn edit_buffer(&self, note: NoteId, field: NoteField) -> Option<&str> {
        self.editing.get(&(note, field)).map(String::as_str)
    }

    pub fn todo_draft(&self, note: NoteId) -> &str {
        self.todo_drafts.get(&note).map_or("", String::as_str)
    }

    /// Drop state that belongs to notes which no longer exist.
    fn prune(&mut self, notes: &[Note]) {
        let alive = |id: &NoteId| notes.iter().any(|n| n.id == *id);
        self.editing.retain(|(note, _), _| alive(note));
        self.todo_drafts.retain(|note, _| alive(note));
    }
}

pub struct Binding<B: SlotStorage, C: Confirm> {
    api: JotterApi<B>,
    ui: UiState,
    confirm: C,
}

impl<B: SlotStorage, C: Confirm> Binding<B, C> {
    pub fn new(api: JotterApi<B>, confirm: C) -> Self {
        Self {
            api,
            ui: UiState::default(),
            confirm,
        }
    }

    pub fn api(&self) -> &JotterApi<B> {
        &self.api
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Full projection of the current state.
    pub fn view(&self) -> NoteListView {
        view::render(self.api.notes(), &self.ui)
    }

    pub fn handle(&mut self, gesture: Gesture) -> Result<CmdResult> {
        debug!("event=gesture gesture={:?}", gesture);
        let result = self.dispatch(gesture)?;
        self.ui.prune(self.api.notes());
        Ok(result)
    }

    /// Handle gestures in order, merging their results.
    pub fn handle_all<I>(&mut self, gestures: I) -> Result<CmdResult>
    where
        I: IntoIterator<Item = Gesture>,
    {
        let mut merged = CmdResult::default();
        for gesture in gestures {
            let result = self.handle(gesture)?;
            merged.refresh = merged.refresh.merge(result.refresh);
            merged.messages.extend(result.messages);
            merged.affected_notes.extend(result.affected_notes);
        }
        Ok(merged)
    }

    fn dispatch(&mut self, gesture: Gesture) -> Result<CmdResult> {
        match gesture {
            Gesture::FormInput { field, text } => {
                match field {
                    FormField::Title => self.ui.form.title = text,
                    FormField::Content => self.ui.form.content = text,
                }
                Ok(CmdResult::unchanged())
            }
            Gesture::Submit => {
                let FormDraft { title, content } = self.ui.form.clone();
                let result = self.api.create_note(&title, &content)?;
                if !result.is_noop() {
                    self.ui.form = FormDraft::default();
                }
                Ok(result)
            }
            Gesture::DoubleClick { note, field } => self.begin_edit(note, field),
            Gesture::EditInput { note, field, text } => {
                if let Some(buffer) = self.ui.editing.get_mut(&(note, field)) {
                    *buffer = text;
                }
                Ok(CmdResult::unchanged())
            }
            Gesture::EditKey { note, field, key } => match key {
                Key::Enter => self.commit_edit(note, field),
                Key::Other => Ok(CmdResult::unchanged()),
            },
            Gesture::Blur { note, field } => self.commit_edit(note, field),
            Gesture::TodoInput { note, text } => {
                self.ui.todo_drafts.insert(note, text);
                Ok(CmdResult::unchanged())
            }
            Gesture::TodoKey { note, key } => match key {
                Key::Enter => self.submit_todo(note),
                Key::Other => Ok(CmdResult::unchanged()),
            },
            Gesture::AddTodoClick { note } => self.submit_todo(note),
            Gesture::CheckboxChange {
                note,
                todo,
                checked,
            } => self.api.toggle_todo(note, todo, checked),
            Gesture::DeleteTodoClick { note, todo } => self.api.delete_todo(note, todo),
            Gesture::DeleteNoteClick { note } => match self.confirm.confirm(DELETE_NOTE_PROMPT) {
                Decision::Proceed => self.api.delete_note(note),
                Decision::Abort => {
                    debug!("event=note_delete note={} status=aborted", note);
                    let mut result = CmdResult::unchanged();
                    result.add_message(CmdMessage::info("Delete cancelled"));
                    Ok(result)
                }
            },
        }
    }

    fn begin_edit(&mut self, note: NoteId, field: NoteField) -> Result<CmdResult> {
        if self.ui.editing.contains_key(&(note, field)) {
            return Ok(CmdResult::unchanged());
        }
        let Some(current) = self.api.store().note(note).map(|n| n.field(field).to_string())
        else {
            return Ok(CmdResult::unchanged());
        };
        self.ui.editing.insert((note, field), current);
        let refresh = Refresh::Field { note, field };
        Ok(CmdResult::unchanged().with_refresh(refresh))
    }

    fn commit_edit(&mut self, note: NoteId, field: NoteField) -> Result<CmdResult> {
        match self.ui.editing.remove(&(note, field)) {
            Some(buffer) => self.api.edit_note_field(note, field, &buffer),
            None => Ok(CmdResult::unchanged()),
        }
    }

    fn submit_todo(&mut self, note: NoteId) -> Result<CmdResult> {
        let draft = self.ui.todo_draft(note).to_string();
        let result = self.api.add_todo(note, &draft)?;
        if !result.is_noop() {
            self.ui.todo_drafts.remove(&note);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::note_store::DEFAULT_SLOT_KEY;

    /// Records every prompt and answers with a scripted decision.
    struct Scripted {
        answer: Decision,
        prompts: Vec<String>,
    }

    impl Confirm for Scripted {
        fn confirm(&mut self, prompt: &str) -> Decision {
            self.prompts.push(prompt.to_string());
            self.answer
        }
    }

    fn binding(answer: Decision) -> Binding<MemBackend, Scripted> {
        let api = JotterApi::open(MemBackend::new(), DEFAULT_SLOT_KEY).unwrap();
        Binding::new(
            api,
            Scripted {
                answer,
                prompts: Vec::new(),
            },
        )
    }

    fn create(b: &mut Binding<MemBackend, Scripted>, title: &str, content: &str) -> NoteId {
        b.handle_all([
            Gesture::FormInput {
                field: FormField::Title,
                text: title.into(),
            },
            Gesture::FormInput {
                field: FormField::Content,
                text: content.into(),
            },
            Gesture::Submit,
        ])
        .unwrap();
        b.api().notes().last().unwrap().id
    }

    #[test]
    fn submit_creates_and_resets_form() {
        let mut b = binding(Decision::Proceed);
        create(&mut b, "Trip", "Pack bags");
        assert_eq!(b.api().notes().len(), 1);
        assert_eq!(b.ui().form(), &FormDraft::default());
    }

    #[test]
    fn blank_submit_keeps_form() {
        let mut b = binding(Decision::Proceed);
        b.handle(Gesture::FormInput {
            field: FormField::Title,
            text: "   ".into(),
        })
        .unwrap();
        let result = b.handle(Gesture::Submit).unwrap();
        assert!(result.is_noop());
        assert!(b.api().notes().is_empty());
        assert_eq!(b.ui().form().title, "   ");
    }

    #[test]
    fn double_click_then_blur_commits_trimmed() {
        let mut b = binding(Decision::Proceed);
        let id = create(&mut b, "Shopping", "");

        let started = b
            .handle(Gesture::DoubleClick {
                note: id,
                field: NoteField::Title,
            })
            .unwrap();
        assert_eq!(b.ui().edit_state(id, NoteField::Title), EditState::Editing);
        assert_eq!(b.ui().edit_buffer(id, NoteField::Title), Some("Shopping"));
        assert!(b.view().card(id).unwrap().title.editable);
        assert!(matches!(started.refresh, Refresh::Field { .. }));

        b.handle(Gesture::EditInput {
            note: id,
            field: NoteField::Title,
            text: "  Groceries  ".into(),
        })
        .unwrap();
        let result = b
            .handle(Gesture::Blur {
                note: id,
                field: NoteField::Title,
            })
            .unwrap();

        assert_eq!(b.ui().edit_state(id, NoteField::Title), EditState::Display);
        assert_eq!(b.api().store().note(id).unwrap().title, "Groceries");
        assert_eq!(
            result.refresh,
            Refresh::Field {
                note: id,
                field: NoteField::Title
            }
        );
    }

    #[test]
    fn enter_forces_commit() {
        let mut b = binding(Decision::Proceed);
        let id = create(&mut b, "t", "old");
        b.handle_all([
            Gesture::DoubleClick {
                note: id,
                field: NoteField::Content,
            },
            Gesture::EditInput {
                note: id,
                field: NoteField::Content,
                text: "new".into(),
            },
            Gesture::EditKey {
                note: id,
                field: NoteField::Content,
                key: Key::Enter,
            },
        ])
        .unwrap();
        assert_eq!(b.api().store().note(id).unwrap().content, "new");
        assert_eq!(
            b.ui().edit_state(id, NoteField::Content),
            EditState::Display
        );

        // A later blur has nothing left to commit.
        let result = b
            .handle(Gesture::Blur {
                note: id,
                field: NoteField::Content,
            })
            .unwrap();
        assert!(result.is_noop());
    }

    #[test]
    fn typing_in_display_state_is_ignored() {
        let mut b = binding(Decision::Proceed);
        let id = create(&mut b, "keep", "");
        b.handle(Gesture::EditInput {
            note: id,
            field: NoteField::Title,
            text: "changed".into(),
        })
        .unwrap();
        b.handle(Gesture::Blur {
            note: id,
            field: NoteField::Title,
        })
        .unwrap();
        assert_eq!(b.api().store().note(id).unwrap().title, "keep");
    }

    #[test]
    fn fields_edit_independently_and_survive_full_refresh() {
        let mut b = binding(Decision::Proceed);
        let a = create(&mut b, "a", "");
        let other = create(&mut b, "b", "");
        b.handle_all([
            Gesture::DoubleClick {
                note: a,
                field: NoteField::Content,
            },
            Gesture::EditInput {
                note: a,
                field: NoteField::Content,
                text: "half typed".into(),
            },
            Gesture::TodoInput {
                note: other,
                text: "milk".into(),
            },
            Gesture::AddTodoClick { note: other },
        ])
        .unwrap();

        let view = b.view();
        let card = view.card(a).unwrap();
        assert!(card.content.editable);
        assert_eq!(card.content.text, "half typed");
        assert!(!card.title.editable);
        assert_eq!(b.api().store().note(a).unwrap().content, "");
    }

    #[test]
    fn todo_draft_cleared_only_on_success() {
        let mut b = binding(Decision::Proceed);
        let id = create(&mut b, "n", "");

        b.handle(Gesture::TodoInput {
            note: id,
            text: "  ".into(),
        })
        .unwrap();
        let result = b.handle(Gesture::AddTodoClick { note: id }).unwrap();
        assert!(result.is_noop());
        assert_eq!(b.ui().todo_draft(id), "  ");

        b.handle_all([
            Gesture::TodoInput {
                note: id,
                text: "buy milk".into(),
            },
            Gesture::TodoKey {
                note: id,
                key: Key::Enter,
            },
        ])
        .unwrap();
        assert_eq!(b.ui().todo_draft(id), "");
        let todos = &b.api().store().note(id).unwrap().todos;
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "buy milk");
        assert!(!todos[0].done);
    }

    #[test]
    fn checkbox_toggles_and_restores_view() {
        let mut b = binding(Decision::Proceed);
        let id = create(&mut b, "n", "");
        b.handle_all([
            Gesture::TodoInput {
                note: id,
                text: "x".into(),
            },
            Gesture::AddTodoClick { note: id },
        ])
        .unwrap();
        let todo = b.api().store().note(id).unwrap().todos[0].id;
        let before = b.view();

        let on = b
            .handle(Gesture::CheckboxChange {
                note: id,
                todo,
                checked: true,
            })
            .unwrap();
        assert_eq!(on.refresh, Refresh::Full);
        assert!(b.view().card(id).unwrap().todos[0].done);

        b.handle(Gesture::CheckboxChange {
            note: id,
            todo,
            checked: false,
        })
        .unwrap();
        assert_eq!(b.view(), before);
    }

    #[test]
    fn delete_todo_click_removes_row() {
        let mut b = binding(Decision::Proceed);
        let id = create(&mut b, "n", "");
        b.handle_all([
            Gesture::TodoInput {
                note: id,
                text: "x".into(),
            },
            Gesture::AddTodoClick { note: id },
        ])
        .unwrap();
        let todo = b.api().store().note(id).unwrap().todos[0].id;
        b.handle(Gesture::DeleteTodoClick { note: id, todo }).unwrap();
        assert!(b.view().card(id).unwrap().todos.is_empty());
    }

    #[test]
    fn delete_asks_and_proceeds() {
        let mut b = binding(Decision::Proceed);
        let id = create(&mut b, "gone", "");
        b.handle(Gesture::DoubleClick {
            note: id,
            field: NoteField::Title,
        })
        .unwrap();

        let result = b.handle(Gesture::DeleteNoteClick { note: id }).unwrap();
        assert_eq!(result.refresh, Refresh::Full);
        assert!(b.api().notes().is_empty());
        assert_eq!(b.confirm.prompts, vec![DELETE_NOTE_PROMPT.to_string()]);
        // Edit state for the deleted note is gone.
        assert_eq!(b.ui().edit_state(id, NoteField::Title), EditState::Display);
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let mut b = binding(Decision::Abort);
        let id = create(&mut b, "stay", "");
        let writes = b.api().store().backend().write_count();

        let result = b.handle(Gesture::DeleteNoteClick { note: id }).unwrap();
        assert!(result.is_noop());
        assert_eq!(b.api().notes().len(), 1);
        assert_eq!(b.api().store().backend().write_count(), writes);
    }

    #[test]
    fn fixed_answer_skips_prompting() {
        let api = JotterApi::open(MemBackend::new(), DEFAULT_SLOT_KEY).unwrap();
        let mut b = Binding::new(api, FixedAnswer(Decision::Proceed));
        b.handle_all([
            Gesture::FormInput {
                field: FormField::Title,
                text: "x".into(),
            },
            Gesture::Submit,
        ])
        .unwrap();
        let id = b.api().notes()[0].id;
        b.handle(Gesture::DeleteNoteClick { note: id }).unwrap();
        assert!(b.api().notes().is_empty());
    }

    #[test]
    fn kept_tree_tracks_rebuild_through_refresh_hints() {
        let mut b = binding(Decision::Proceed);
        let mut tree = b.view();
        let (title, content) = (NoteField::Title, NoteField::Content);
        let steps = vec![
            vec![
                Gesture::FormInput {
                    field: FormField::Title,
                    text: "Trip".into(),
                },
                Gesture::Submit,
            ],
            vec![
                Gesture::DoubleClick {
                    note: 1,
                    field: title,
                },
                Gesture::EditInput {
                    note: 1,
                    field: title,
                    text: "Holiday".into(),
                },
                Gesture::EditKey {
                    note: 1,
                    field: title,
                    key: Key::Enter,
                },
            ],
            vec![
                Gesture::TodoInput {
                    note: 1,
                    text: "Passport".into(),
                },
                Gesture::AddTodoClick { note: 1 },
            ],
            vec![Gesture::CheckboxChange {
                note: 1,
                todo: 2,
                checked: true,
            }],
            vec![Gesture::DoubleClick {
                note: 1,
                field: content,
            }],
            vec![Gesture::Blur {
                note: 1,
                field: content,
            }],
            vec![Gesture::DeleteNoteClick { note: 1 }],
        ];

        let mut hints = Vec::new();
        for gestures in steps {
            let result = b.handle_all(gestures).unwrap();
            tree.apply(result.refresh, b.api().notes(), b.ui());
            assert_eq!(tree, b.view());
            hints.push(result.refresh);
        }
        assert!(matches!(hints[1], Refresh::Field { note: 1, .. }));
        assert!(tree.is_empty());
    }
}
