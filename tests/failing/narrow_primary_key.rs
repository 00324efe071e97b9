use sqlbit::*;

#[entity(table = "counters")]
pub struct Counter {
    #[column]
    #[primary_key]
    pub id: i32,
    #[column]
    pub hits: i64,
}

fn main() {}
