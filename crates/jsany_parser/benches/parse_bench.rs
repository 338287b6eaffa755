use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsany_core::CompilerArena;
use jsany_parser::parse;
use jsany_scanner::tokenize;

// A medium-size script with every statement form the parser accepts
const JAVASCRIPT_SOURCE: &str = r#"
var counter = 0, limit = 100;

function Point(x, y) {
    this.x = x;
    this.y = y;
}

function distance(a, b) {
    var dx = a.x - b.x;
    var dy = a.y - b.y;
    return dx * dx + dy * dy;
}

var origin = new Point(0, 0);
var points = [new Point(1, 2), new Point(3, 4), new Point(-1, 7)];
var config = { name: 'demo', verbose: false, depth: 3, tags: ['a', 'b'] };

for (var i = 0; i < points.length; i++) {
    if (distance(origin, points[i]) > limit) {
        counter += 1;
    } else if (points[i].x < 0) {
        counter -= 1;
    } else {
        continue;
    }
}

for (var key in config) {
    if (typeof config[key] === 'string') {
        log(key + ': ' + config[key]);
    }
}

outer: while (counter < limit) {
    do {
        counter++;
        if (counter % 7 === 0) break outer;
    } while (counter % 3 !== 0);
}

try {
    var pattern = /[a-z]+\d*/gi;
    var handler = function (event) {
        return event && event.target ? event.target.value : null;
    };
    handler({ target: { value: pattern } });
} catch (err) {
    log('failed: ' + err);
} finally {
    counter = counter << 1 >>> 0;
}
"#;

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_script", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(JAVASCRIPT_SOURCE));
            black_box(tokens.len());
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    let tokens = tokenize(JAVASCRIPT_SOURCE);
    c.bench_function("parse_script", |b| {
        b.iter(|| {
            let arena = CompilerArena::new();
            let program = parse(&arena, black_box(&tokens));
            black_box(program.map(|p| p.statements.len()).ok());
        })
    });
}

criterion_group!(benches, bench_tokenize, bench_parse);
criterion_main!(benches);
