//! Command-line entry point for the dispersion engine library

fn main() {
    println!("Dispersion Engine v0.1.0");
    println!();
    println!("Geodesic dispersion and safety-radius geometry for ballistic firing overlays.");
    println!("The engine is designed to be used as a Rust library or from the browser via WebAssembly.");
    println!();
    println!("To compute an overlay from the command line:");
    println!("  dispersion-cli compute --output json");
    println!();
    println!("To build the WebAssembly bindings:");
    println!("  wasm-pack build --features wasm");
}
