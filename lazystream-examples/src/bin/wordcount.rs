use lazystream_api::Stream;

fn main() -> anyhow::Result<()> {
    let lines = vec![
        "hello world".to_string(),
        "hello lazystream".to_string(),
        "world of streams".to_string(),
    ];

    let counts = Stream::of(lines)
        .flat_map(|line| {
            line.split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .key_by(|word| word.clone())
        .map_values(|_| 1u32)
        .reduce_by_key(|a, b| a + b)
        .sorted_by_key(|(word, _)| word.clone())
        .to_list();

    for (word, count) in counts {
        println!("{word}: {count}");
    }

    Ok(())
}
