use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wiki2text::config::Config;
use wiki2text::transformers::{Normalizer, SentenceSplitter};

pub fn normalize_benchmark(c: &mut Criterion) {
    let line = "'''Paris''' is the [[capital]] and most populous city of [[France]], with an estimated population of 2,165,423 residents in January 2019<ref>{{cite web|url=https://www.insee.fr|title=Populations légales}}</ref> in an area of more than 105&nbsp;km². Since the 17th century, Paris has been one of the world's major centres of [[finance]], [[diplomacy]], [[commerce]], [[fashion]], [[gastronomy]] and [[science]].";

    let normalizer = Normalizer::new(&Config::default()).unwrap();
    c.bench_function("normalize", |b| {
        b.iter(|| normalizer.normalize(black_box(line).to_string()))
    });

    let keep_digits = Normalizer::new(&Config::default().with_strip_digits(false)).unwrap();
    c.bench_function("normalize keep digits", |b| {
        b.iter(|| keep_digits.normalize(black_box(line).to_string()))
    });

    let splitter = SentenceSplitter::new(true);
    let normalized = normalizer.normalize(line.to_string());
    c.bench_function("split sentences", |b| {
        b.iter(|| splitter.candidates(black_box(&normalized)).count())
    });
}

criterion_group!(benches, normalize_benchmark);
criterion_main!(benches);
