use criterion::{Criterion, black_box, criterion_group, criterion_main};
use seqexpr::{expression_parser, interp, parse_expression, tokenize, EvalContext};

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let expressions = vec![
        "42",
        "2+3*4",
        "(2+3)*(4+5)",
        "2x+3y-4z",
        "sin(pi/2)+cos(0)*sqrt(2)",
        "((((1+2)*3-4)/5)^6)+7*8-9",
        "a*sin(b*pi/180) + c*cos(d*pi/180) + sqrt(e1*e1 + f*f)",
    ];

    for expr in expressions {
        group.bench_function(format!("parse/{expr}"), |b| {
            b.iter(|| parse_expression(black_box(expr)).unwrap());
        });
    }

    group.finish();
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize/mixed", |b| {
        b.iter(|| tokenize(black_box("sin(pi/2) + 3.25e2*alpha - (beta/2)^3")).unwrap());
    });
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    let mut ctx = EvalContext::new();
    ctx.set_variable("x", 3.0).set_variable("y", 4.0);

    // Parse once, evaluate repeatedly.
    let expr = parse_expression("sqrt(x*x+y*y)+sin(x)*cos(y)").unwrap();
    group.bench_function("eval/hypot_trig", |b| {
        b.iter(|| expr.evaluate(black_box(&ctx)).unwrap());
    });

    // Full pipeline from source text.
    group.bench_function("interp/hypot_trig", |b| {
        b.iter(|| interp(black_box("sqrt(x*x+y*y)+sin(x)*cos(y)"), Some(&ctx)).unwrap());
    });

    group.finish();
}

fn bench_parser_reuse(c: &mut Criterion) {
    // A reused parser keeps its memoization caches warm across inputs.
    c.bench_function("parse/reused_parser", |b| {
        let parser = expression_parser();
        let tokens = tokenize("2x+3y-4z+sin(pi/2)").unwrap();
        b.iter(|| parser.parse(black_box(tokens.clone())).unwrap());
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_tokenize,
    bench_eval,
    bench_parser_reuse
);
criterion_main!(benches);
