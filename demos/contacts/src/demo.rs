use crate::*;
use chrono::Utc;

pub fn run<P: DatabaseProvider>(provider: &P) -> Result<(), AppError> {
    println!("Persisting contacts:");
    let mut contacts = vec![
        ContactEntity {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            phone_number: Some("+44 20 7946 0000".to_string()),
            photo_uri: Some(Uri::parse("content://media/photos/1")),
            ..Default::default()
        },
        ContactEntity { first_name: Some("Alan".to_string()), ..Default::default() },
    ];
    for contact in contacts.iter_mut() {
        contact.save(provider)?;
        println!("{contact}");
    }

    println!("Persisting messages:");
    let mut message = MessageEntity {
        body: Some("hello".to_string()),
        message_date: Some(Utc::now()),
        read_counter: 1,
        image: contacts[0].photo_uri.clone(),
        message_kind: MessageKind::Outgoing,
        ..Default::default()
    };
    message.save(provider)?;
    println!("{message}");

    println!("Querying contacts:");
    for contact in ContactEntity::query_all(provider)? {
        println!("{} -> {}", contact.id, contact.full_name().unwrap_or_default());
    }

    println!("Deleting contacts:");
    let mut removed = contacts.remove(1);
    let deleted = removed.delete(provider)?;
    println!("deleted {deleted} row(s), {} contacts left", ContactEntity::query_all(provider)?.len());
    Ok(())
}
