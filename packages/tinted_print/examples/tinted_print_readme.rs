//! Basic usage of `tinted_print`: colored lines and stack-annotated output.
//!
//! Run with: `cargo run --example tinted_print_readme`.

use tinted_print::{DIVISOR, StackCapture, Tint};

fn main() {
    Tint::Green.ln("plain colored line");
    Tint::Yellow.tag_ln("worker-3", "tagged line");

    println!("{DIVISOR}");

    // Show two frames of the caller's stack under every subsequent print.
    StackCapture::shared()
        .set_depth(2)
        .expect("first configuration of the end index always succeeds");

    deep_inside_some_library();

    StackCapture::shared().set_enabled(false);
    Tint::Cyan.ln("and back to plain lines");
}

fn deep_inside_some_library() {
    Tint::Red.ln("something odd happened here");
}
