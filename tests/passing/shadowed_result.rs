use sqlbit::*;

type Result<T> = std::result::Result<T, String>;

#[entity(table = "tags")]
pub struct Tag {
    #[column]
    #[primary_key]
    pub id: i64,
    #[column]
    pub label: String,
}

database!(TagDatabase { Tag });

fn count_tags(provider: &SqliteProvider) -> Result<usize> {
    Tag::query_all(provider).map(|tags| tags.len()).map_err(|e| e.to_string())
}

fn main() {
    let provider = SqliteProvider::open_in_memory(1, &TagDatabase, TypeAdapterRegistry::new()).unwrap();
    let mut tag = Tag { label: "rust".to_string(), ..Default::default() };
    tag.save(&provider).unwrap();
    assert_eq!(count_tags(&provider), Ok(1));
}
