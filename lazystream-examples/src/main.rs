use lazystream_api::{Stream, field_refs};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct User {
    name: String,
    age: u32,
}

field_refs!(struct UserFields for User { name: String, age: u32 });

fn main() -> anyhow::Result<()> {
    let users: Vec<User> = serde_json::from_str(
        r#"[
            {"name": "foo", "age": 25},
            {"name": "bar", "age": 22},
            {"name": "baz", "age": 30}
        ]"#,
    )?;

    let age = UserFields::age();
    let by_decade = Stream::of(users.clone())
        .key_by(move |user: &User| age.get_cloned(user) / 10)
        .group_by_key(UserFields::name().projection())
        .to_dict();
    println!("{}", serde_json::to_string(&by_decade)?);

    // Same grouping, whole records, oldest first.
    let oldest_first = Stream::of(users)
        .sorted_by_key_desc(UserFields::age().selector())
        .group_by(|user| user.age / 10, |user| format!("{} ({})", user.name, user.age))
        .to_dict();
    for (decade, names) in oldest_first {
        println!("{}0s: {}", decade, names.join(", "));
    }

    Ok(())
}
