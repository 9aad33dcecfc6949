use std::env;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-env-changed=SWISSEPH_LIB_DIR");
    println!("cargo:rerun-if-changed=build/build.rs");

    // Only the FFI binding needs libswe; the core and the HTTP layer build without it.
    if env::var_os("CARGO_FEATURE_SWISSEPH").is_none() {
        return;
    }

    if let Some(lib_dir) = env::var_os("SWISSEPH_LIB_DIR") {
        let lib_path = Path::new(&lib_dir);
        if !lib_path.is_dir() {
            println!(
                "cargo:warning=SWISSEPH_LIB_DIR={} is not a directory",
                lib_path.to_string_lossy()
            );
        }
        println!("cargo:rustc-link-search={}", lib_path.to_string_lossy());
    }

    println!("cargo:rustc-link-lib=swe");

    if env::var("CARGO_CFG_TARGET_OS").map(|os| os != "windows").unwrap_or(true) {
        println!("cargo:rustc-link-lib=m");
    }
}
