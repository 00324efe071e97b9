use contacts::*;

fn main() -> Result<(), AppError> {
    let path = std::env::temp_dir().join("sqlbit_contacts.db");
    let provider = contacts::open(&path)?;
    demo::run(&provider)
}
