use logicstep::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn main() {
    let g = &mut GateNetwork::new();

    let length = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3);
    let tap = ring_oscillator(g, length, "ring");
    let led = g.led1(tap, "led");

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))
        .expect("Error setting Ctrl-C handler");

    let mut ticks = 0u64;
    while running.load(Ordering::SeqCst) {
        g.tick();
        ticks += 1;
        if g.is_on(led) {
            colour::yellow_ln!("{:>6} *", ticks);
        } else {
            colour::dark_grey_ln!("{:>6} .", ticks);
        }
        std::thread::sleep(Duration::from_millis(250));
    }
    println!("\nStopped after {} ticks", ticks);
}
