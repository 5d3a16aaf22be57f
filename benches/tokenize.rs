//! Throughput benchmark for the tokenizer engine.

use std::hint::black_box;

use blitzlight::languages;
use criterion::{criterion_group, criterion_main, Criterion};

const BLITZMAX_SNIPPET: &str = r#"SuperStrict

Type TEntity
	Field x:Float, y:Float
	Field name$

	Method Move(dx:Float, dy:Float)
		x = x + dx
		y = y + dy
	End Method
End Type

Function Main:Int()
	Local e:TEntity = New TEntity
	Local mask = %1010 | $ff
	Print "moving"
	Return 0
End Function
"#;

const MONKEY_SNIPPET: &str = r#"Strict

Class Actor Extends Node
	Field links:List<Actor>

	Method Step:Void()
		For Local other:Actor = EachIn links
			other.Poke()
		Next
	End
End
"#;

fn bench_tokenize(c: &mut Criterion) {
    let blitzmax = BLITZMAX_SNIPPET.repeat(64);
    let monkey = MONKEY_SNIPPET.repeat(64);

    c.bench_function("tokenize_blitzmax", |b| {
        b.iter(|| languages::BLITZMAX.tokenize(black_box(&blitzmax)).count())
    });
    c.bench_function("tokenize_monkey", |b| {
        b.iter(|| languages::MONKEY.tokenize(black_box(&monkey)).count())
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
