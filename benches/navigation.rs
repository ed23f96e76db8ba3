//! Benchmarks for the navigation coordinator.
//!
//! These benchmarks measure transition cost with and without subscribers.

use booking_desk::feedback::KnownFailure;
use booking_desk::navigation::{Command, Navigator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SEQUENCE: [Command; 8] = [
    Command::OpenAppContacts,
    Command::CloseContacts,
    Command::OpenAppSupport,
    Command::HideTitle,
    Command::OpenRecordsBlockWithData,
    Command::OpenModalRenameUser,
    Command::Close,
    Command::ShowTitle,
];

fn bench_transitions(c: &mut Criterion) {
    let navigator = Navigator::new();
    c.bench_function("navigator_transition_sequence", |b| {
        b.iter(|| {
            for command in SEQUENCE {
                navigator.apply(black_box(command));
            }
        })
    });
}

fn bench_transitions_with_subscribers(c: &mut Criterion) {
    let navigator = Navigator::new();
    let _receivers: Vec<_> = (0..16).map(|_| navigator.subscribe()).collect();
    c.bench_function("navigator_transition_sequence_16_subscribers", |b| {
        b.iter(|| {
            for command in SEQUENCE {
                navigator.apply(black_box(command));
            }
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let navigator = Navigator::new();
    navigator.open_app_description();
    c.bench_function("navigator_snapshot", |b| b.iter(|| black_box(navigator.snapshot())));
}

fn bench_known_failure(c: &mut Criterion) {
    c.bench_function("known_failure_from_message", |b| {
        b.iter(|| KnownFailure::from_message(black_box("Wrong password for this account")))
    });
}

criterion_group!(
    benches,
    bench_transitions,
    bench_transitions_with_subscribers,
    bench_snapshot,
    bench_known_failure
);
criterion_main!(benches);
