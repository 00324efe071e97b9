use sqlbit::*;

#[entity(table = "pairs")]
pub struct Pair {
    #[column]
    #[primary_key]
    pub left: i64,
    #[column]
    #[primary_key]
    pub right: i64,
}

fn main() {}
