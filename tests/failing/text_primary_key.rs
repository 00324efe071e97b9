use sqlbit::*;

#[entity(table = "slugs")]
pub struct Slug {
    #[column(db_type = TEXT)]
    #[primary_key]
    pub id: i64,
    #[column]
    pub target: String,
}

fn main() {}
