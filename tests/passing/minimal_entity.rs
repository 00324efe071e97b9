use sqlbit::*;

#[entity(table = "notes")]
pub struct Note {
    #[column(name = "_ID")]
    #[primary_key]
    pub id: i64,
    #[column]
    pub text: String,
}

database!(NotesDatabase { Note });

fn main() {
    let provider = SqliteProvider::open_in_memory(1, &NotesDatabase, TypeAdapterRegistry::new()).unwrap();
    let mut note = Note { text: "first".to_string(), ..Default::default() };
    note.save(&provider).unwrap();
    assert_eq!(Note::query_all(&provider).unwrap(), vec![note]);
}
