//! Basic usage of `lap_time`: start a timer, lap it from several threads,
//! report the total.
//!
//! Run with: `cargo run --example lap_time_readme`.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lap_time::{DurationFormat, Timer};
use tinted_print::Tint;

fn main() {
    let timer = Arc::new(Timer::new(DurationFormat::MILLIS_NANOS, Tint::Green));
    timer.start();

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let timer = Arc::clone(&timer);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(10 * (i + 1)));
                // Contended laps print only for the winning caller.
                timer.lap();
            })
        })
        .collect();

    for worker in workers {
        worker.join().expect("worker threads do not panic");
    }

    timer.elapsed();
}
