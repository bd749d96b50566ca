//! This build script simply generates C FFI bindings for the freestanding
//! functions in this crate and dumps them into a header that the plugin
//! build is pre-configured to find.

use std::env;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();

    cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_language(cbindgen::Language::C)
        .with_parse_deps(true)
        .with_parse_include(&["alrdp-plugin"])
        .generate()
        .expect("Unable to generate bindings")
        .write_to_file("includes/AngrylionM64p.h");
}
