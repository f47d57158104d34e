// Trip journal: notes and uploaded photos kept as immutable values
// Every change returns a new Journal; nothing is shared or mutated in place

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JournalError {
    #[error("Note is empty")]
    EmptyNote,

    #[error("Not an image: {0}")]
    NotAnImage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub id: Uuid,
    pub name: String,
    // data: URL or remote location of the uploaded image
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Journal {
    notes: Vec<Note>,
    photos: Vec<Photo>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest note first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Upload order.
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn add_note(&self, content: &str, at: DateTime<Utc>) -> Result<Self, JournalError> {
        if content.trim().is_empty() {
            return Err(JournalError::EmptyNote);
        }
        let note = Note {
            id: Uuid::new_v4(),
            content: content.to_string(),
            created_at: at,
        };
        let notes = std::iter::once(note)
            .chain(self.notes.iter().cloned())
            .collect();
        Ok(Self {
            notes,
            photos: self.photos.clone(),
        })
    }

    pub fn remove_note(&self, id: Uuid) -> Self {
        Self {
            notes: self.notes.iter().filter(|n| n.id != id).cloned().collect(),
            photos: self.photos.clone(),
        }
    }

    pub fn add_photo(&self, name: &str, mime_type: &str, url: &str) -> Result<Self, JournalError> {
        if !mime_type.starts_with("image/") {
            return Err(JournalError::NotAnImage(name.to_string()));
        }
        let photo = Photo {
            id: Uuid::new_v4(),
            name: name.to_string(),
            url: url.to_string(),
        };
        let photos = self
            .photos
            .iter()
            .cloned()
            .chain(std::iter::once(photo))
            .collect();
        Ok(Self {
            notes: self.notes.clone(),
            photos,
        })
    }

    pub fn remove_photo(&self, id: Uuid) -> Self {
        Self {
            notes: self.notes.clone(),
            photos: self.photos.iter().filter(|p| p.id != id).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 2, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_notes_newest_first_and_original_untouched() {
        let empty = Journal::new();
        let one = empty.add_note("Saw a bison", at(9)).unwrap();
        let two = one.add_note("Old Faithful at noon", at(12)).unwrap();

        assert!(empty.notes().is_empty());
        assert_eq!(one.notes().len(), 1);
        assert_eq!(two.notes()[0].content, "Old Faithful at noon");
        assert_eq!(two.notes()[1].content, "Saw a bison");
    }

    #[test]
    fn test_blank_note_rejected() {
        assert_eq!(Journal::new().add_note("   ", at(1)), Err(JournalError::EmptyNote));
    }

    #[test]
    fn test_remove_note() {
        let journal = Journal::new()
            .add_note("a", at(1))
            .and_then(|j| j.add_note("b", at(2)))
            .unwrap();
        let id = journal.notes()[1].id;
        let trimmed = journal.remove_note(id);
        assert_eq!(trimmed.notes().len(), 1);
        assert_eq!(trimmed.notes()[0].content, "b");
        assert_eq!(journal.notes().len(), 2);
    }

    #[test]
    fn test_photos() {
        let journal = Journal::new()
            .add_photo("lake.jpg", "image/jpeg", "data:image/jpeg;base64,AAAA")
            .unwrap();
        assert!(matches!(
            journal.add_photo("notes.txt", "text/plain", "data:text/plain,hi"),
            Err(JournalError::NotAnImage(_))
        ));
        let journal = journal
            .add_photo("falls.png", "image/png", "data:image/png;base64,BBBB")
            .unwrap();
        assert_eq!(journal.photos()[1].name, "falls.png");

        let id = journal.photos()[0].id;
        let journal = journal.remove_photo(id);
        assert_eq!(journal.photos().len(), 1);
        assert_eq!(journal.photos()[0].name, "falls.png");
    }
}
