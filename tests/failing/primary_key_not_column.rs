use sqlbit::*;

#[entity(table = "notes")]
pub struct Note {
    #[primary_key]
    pub id: i64,
    #[column]
    pub text: String,
}

fn main() {}
