/// Expose the compilation target triple to the crate at build time.
///
/// `genpass version` prints it via `constants::TARGET`.
fn main() {
    println!(
        "cargo:rustc-env=TARGET={}",
        std::env::var("TARGET").unwrap()
    );
}
