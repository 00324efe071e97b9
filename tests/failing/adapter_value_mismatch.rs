use sqlbit::*;

#[entity(table = "people")]
pub struct Person {
    #[column]
    #[primary_key]
    pub id: i64,
    #[column(adapter = IntAdapter)]
    pub name: String,
}

fn main() {}
