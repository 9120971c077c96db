//! core/edit.rs
//!
//! The tag-edit menu as a small state machine.
//!
//! ```text
//!            a/b/t                 any line
//! Viewing ----------> Editing(f) ----------> Viewing
//!    |  \__ anything else __/
//!    | q
//!    v
//!  Saved   (terminal)
//! ```
//!
//! The machine only collects a [`TagEdit`]. Printing menus and writing the
//! file are the console's job.

use super::types::{TagEdit, TagField, TagSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Viewing,
    EditingArtist,
    EditingAlbum,
    EditingTitle,
    Saved,
}

impl EditState {
    /// The field being typed in, if any.
    pub fn editing(self) -> Option<TagField> {
        match self {
            EditState::EditingArtist => Some(TagField::Artist),
            EditState::EditingAlbum => Some(TagField::Album),
            EditState::EditingTitle => Some(TagField::Title),
            EditState::Viewing | EditState::Saved => None,
        }
    }
}

/// A single menu selection made while viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Edit(TagField),
    Quit,
    Unknown,
}

impl MenuChoice {
    /// `A`, `B`, `T`, `Q`, any case, surrounding space ignored.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "a" => MenuChoice::Edit(TagField::Artist),
            "b" => MenuChoice::Edit(TagField::Album),
            "t" => MenuChoice::Edit(TagField::Title),
            "q" => MenuChoice::Quit,
            _ => MenuChoice::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagEditor {
    state: EditState,
    edit: TagEdit,
}

impl Default for TagEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TagEditor {
    pub fn new() -> Self {
        Self {
            state: EditState::Viewing,
            edit: TagEdit::new(),
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn edit(&self) -> &TagEdit {
        &self.edit
    }

    /// Feed one line of input and return the new state.
    ///
    /// - Viewing: the line is a menu choice
    /// - Editing: the line is the new value (trailing newline already gone)
    /// - Saved: input is ignored
    pub fn handle(&mut self, line: &str) -> EditState {
        if let Some(field) = self.state.editing() {
            self.edit.set(field, line);
            self.state = EditState::Viewing;
        } else if self.state == EditState::Viewing {
            self.state = match MenuChoice::parse(line) {
                MenuChoice::Edit(TagField::Artist) => EditState::EditingArtist,
                MenuChoice::Edit(TagField::Album) => EditState::EditingAlbum,
                MenuChoice::Edit(TagField::Title) => EditState::EditingTitle,
                MenuChoice::Quit => EditState::Saved,
                MenuChoice::Unknown => EditState::Viewing,
            };
        }
        self.state
    }

    /// What the tags will look like once the pending edit is saved.
    /// Blank values show as missing, matching what the writer does.
    pub fn preview(&self, current: &TagSnapshot) -> TagSnapshot {
        let pick = |field: TagField| -> Option<String> {
            match self.edit.get(field) {
                Some(v) if v.trim().is_empty() => None,
                Some(v) => Some(v.trim().to_string()),
                None => current.get(field).map(str::to_owned),
            }
        };

        TagSnapshot {
            artist: pick(TagField::Artist),
            album: pick(TagField::Album),
            title: pick(TagField::Title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> TagEditor {
        let mut editor = TagEditor::new();
        for line in lines {
            editor.handle(line);
        }
        editor
    }

    #[test]
    fn starts_viewing_with_empty_edit() {
        let editor = TagEditor::new();
        assert_eq!(editor.state(), EditState::Viewing);
        assert!(editor.edit().is_empty());
    }

    #[test]
    fn menu_choices_enter_editing_states() {
        for (input, expected) in [
            ("a", EditState::EditingArtist),
            ("B", EditState::EditingAlbum),
            (" t ", EditState::EditingTitle),
            ("Q", EditState::Saved),
            ("x", EditState::Viewing),
            ("", EditState::Viewing),
        ] {
            let mut editor = TagEditor::new();
            assert_eq!(editor.handle(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn value_is_recorded_then_back_to_viewing() {
        let mut editor = TagEditor::new();
        editor.handle("a");
        assert_eq!(editor.state().editing(), Some(TagField::Artist));
        assert_eq!(editor.handle("Someone"), EditState::Viewing);
        assert_eq!(editor.edit().get(TagField::Artist), Some("Someone"));
    }

    #[test]
    fn menu_letters_are_values_while_editing() {
        let editor = run(&["t", "q"]);
        assert_eq!(editor.state(), EditState::Viewing);
        assert_eq!(editor.edit().get(TagField::Title), Some("q"));
    }

    #[test]
    fn saved_only_through_quit_and_is_terminal() {
        let mut editor = run(&["a", "X", "b", "Y", "zzz", "q"]);
        assert_eq!(editor.state(), EditState::Saved);
        assert_eq!(editor.handle("a"), EditState::Saved);
        assert_eq!(editor.edit().get(TagField::Album), Some("Y"));
        assert_eq!(editor.edit().get(TagField::Title), None);
    }

    #[test]
    fn last_value_per_field_wins() {
        let editor = run(&["a", "one", "a", "two", "q"]);
        assert_eq!(editor.edit().get(TagField::Artist), Some("two"));
    }

    #[test]
    fn quitting_immediately_yields_empty_edit() {
        let editor = run(&["q"]);
        assert_eq!(editor.state(), EditState::Saved);
        assert!(editor.edit().is_empty());
    }

    #[test]
    fn preview_overlays_pending_values() {
        let current = TagSnapshot {
            artist: Some("Old".to_string()),
            album: Some("Album".to_string()),
            title: Some("Title".to_string()),
        };
        let editor = run(&["a", "New", "t", "  "]);
        assert_eq!(
            editor.preview(&current),
            TagSnapshot {
                artist: Some("New".to_string()),
                album: Some("Album".to_string()),
                title: None,
            }
        );
    }

    #[test]
    fn menu_choice_parse() {
        assert_eq!(MenuChoice::parse("A"), MenuChoice::Edit(TagField::Artist));
        assert_eq!(MenuChoice::parse("q\n"), MenuChoice::Quit);
        assert_eq!(MenuChoice::parse("artist"), MenuChoice::Unknown);
    }
}
