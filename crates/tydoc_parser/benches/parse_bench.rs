use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tydoc_parser::{parse_import_tag, parse_type_expression};
use tydoc_scanner::TextLines;

// Representative annotations scraped from real-world doc comments
const TYPE_SOURCES: &[&str] = &[
    "string | number | null",
    "Map<string, Array<{ id: number; name: string }>>",
    "(event: MouseEvent, options?: ListenerOptions) => boolean",
    "abstract new <T extends object>(init: T) => Readonly<T>",
    "[name: string, age?: number, ...rest: boolean[]]",
    "{ [K in keyof T as `get${K}`]-?: () => T[K] }",
    "T extends infer U extends string ? U : never",
    "...Array<string>",
    "typeof globalThis.console",
    "import('node:fs').Stats",
];

const IMPORT_SOURCES: &[&str] = &[
    "Foo from 'mod'",
    "* as ns from 'mod'",
    "Foo, { Bar, type Baz as Qux } from './relative'",
    "{ type as as as } from 'mod'",
    "X from 'mod' with { type: \"json\" };",
];

fn bench_parse_type_expression(c: &mut Criterion) {
    c.bench_function("parse_type_expression", |b| {
        b.iter(|| {
            for source in TYPE_SOURCES {
                let lines = TextLines::new(black_box(source));
                black_box(parse_type_expression(&lines));
            }
        })
    });
}

fn bench_parse_import_tag(c: &mut Criterion) {
    c.bench_function("parse_import_tag", |b| {
        b.iter(|| {
            for source in IMPORT_SOURCES {
                let lines = TextLines::new(black_box(source));
                black_box(parse_import_tag(&lines));
            }
        })
    });
}

criterion_group!(benches, bench_parse_type_expression, bench_parse_import_tag);
criterion_main!(benches);
