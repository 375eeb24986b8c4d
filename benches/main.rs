use bencher::{benchmark_group, benchmark_main, black_box, Bencher};

use ojson::{OrderedObject, OrderedValue};

const MEDIUM: &[u8] = br#"{"name":"request","headers":{"accept":"application/json","host":"example.org","x-trace":"abc123"},"body":[1,2.5,"three",null,true,{"nested":{"deep":[0.1,0.2,0.3]}}],"tags":["a","b","c","a"]}"#;

fn parse_medium(bench: &mut Bencher) {
    bench.iter(|| {
        let v = OrderedValue::parse(black_box(MEDIUM)).unwrap();
        black_box(v);
    });
}

fn round_trip_medium(bench: &mut Bencher) {
    bench.iter(|| {
        let v = OrderedValue::parse(black_box(MEDIUM)).unwrap();
        black_box(v.to_json().unwrap());
    });
}

fn get_keyed_large(bench: &mut Bencher) {
    let mut object = OrderedObject::new();
    for i in 0..100_i64 {
        object.append(format!("key{i}"), i);
    }
    bench.iter(|| {
        black_box(object.get(black_box("key73")));
    });
}

benchmark_group!(benches, parse_medium, round_trip_medium, get_keyed_large);
benchmark_main!(benches);
