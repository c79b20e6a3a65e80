// Thin CLI over the library: load both files normalized to [0, 1], compare,
// print one line. Every failure surfaces as a single "Error: ..." line and a
// non-zero exit status.
use std::env;
use std::process;

use ppm_mse::{mse, read_ppm};

fn run(file1: &str, file2: &str) -> Result<f64, String> {
    let img1 = read_ppm(file1, true)?;
    let img2 = read_ppm(file2, true)?;
    mse(&img1, &img2)
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("ppm-mse");

    if args.len() != 3 {
        println!("Usage: {} <file1.ppm> <file2.ppm>", program);
        process::exit(1);
    }

    match run(&args[1], &args[2]) {
        Ok(value) => println!("MSE (0-1 range): {:.6}", value),
        Err(message) => {
            println!("Error: {}", message);
            process::exit(1);
        }
    }
}
