use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lexdfa::{compile, Machine, Pattern};
use proptest::prelude::*;
use proptest::strategy::ValueTree;
use proptest::test_runner::TestRunner;
use regex::Regex as LibRegex;

const SAMPLE: &str = "(a|b)*abb";

fn bench_machine(pattern: &str) -> Machine {
    compile(&[Pattern::from_ascii(pattern, 1)]).unwrap()
}

pub fn compile_pattern(c: &mut Criterion) {
    c.bench_function("lexdfa compile", |b| {
        b.iter(|| bench_machine(black_box(SAMPLE)))
    });

    c.bench_function("library regex compile", |b| {
        b.iter(|| LibRegex::new(black_box(SAMPLE)).unwrap())
    });
}

fn run(machine: &Machine, input: &str) -> bool {
    let mut state = 0usize;
    for unit in input.bytes().map(u16::from) {
        let transitions = &machine.states[state].transitions;
        match transitions.binary_search_by_key(&unit, |&(on, _)| on) {
            Ok(idx) => state = transitions[idx].1,
            Err(_) => return false,
        }
    }
    machine.states[state].accepts != 0
}

pub fn check_input(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let string_gen = "[ab]{0,32}".new_tree(&mut runner).unwrap();
    let machine = compile(&[Pattern::from_ascii(SAMPLE, 1)]).unwrap();

    c.bench_function("lexdfa check", |b| {
        b.iter(|| run(&machine, black_box(&string_gen.current())))
    });

    let mut runner = TestRunner::default();
    let string_gen = "[ab]{0,32}".new_tree(&mut runner).unwrap();
    let anchored = format!("^(?:{SAMPLE})$");
    let regex = LibRegex::new(&anchored).unwrap();
    c.bench_function("library regex check", |b| {
        b.iter(|| regex.is_match(black_box(&string_gen.current())))
    });
}

criterion_group!(benches, compile_pattern, check_input);
criterion_main!(benches);
