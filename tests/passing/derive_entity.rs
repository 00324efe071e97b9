use sqlbit::*;

#[derive(Clone, Debug, Default, PartialEq, Entity)]
#[table(name = "tags")]
pub struct Tag {
    #[column]
    #[primary_key]
    pub id: i64,
    #[column(db_type = TEXT, default = "untitled")]
    pub label: Option<String>,
    pub selected: bool,
}

fn main() {
    assert_eq!(
        Tag::CREATE_STATEMENT,
        "CREATE TABLE IF NOT EXISTS `tags` (`ID` INTEGER PRIMARY KEY AUTOINCREMENT, `LABEL` TEXT DEFAULT 'untitled')"
    );
    assert_eq!(<Tag as EntityHelper>::PROJECTION, ["ID", "LABEL"]);
}
