//! rStaffer main entrypoint.

use rstaffer::run;
use rstaffer::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
