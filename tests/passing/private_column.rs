use sqlbit::*;

#[entity(table = "accounts")]
pub struct Account {
    #[column]
    #[primary_key]
    pub id: i64,
    #[column]
    pub r#type: String,
    #[column]
    password: String,
}

fn main() {
    assert_eq!(Account::PROJECTION, ["ID", "TYPE"]);
    let account = Account { id: 2, r#type: "admin".to_string(), password: "secret".to_string() };
    assert_eq!(account.to_string(), "Account{id=2, type=admin}");
}
