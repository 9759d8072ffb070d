use std::path::PathBuf;
use std::{env, fs};

fn main() {
    let target = env::var("TARGET").unwrap();

    println!("cargo::rustc-check-cfg=cfg(cortex_m)");
    println!("cargo::rustc-check-cfg=cfg(armv7em)");
    println!("cargo::rustc-check-cfg=cfg(has_fpu)");

    // The CM4 of the PSoC 6 is an armv7em core with a single-precision FPU.
    if target.starts_with("thumbv7em-") {
        println!("cargo:rustc-cfg=cortex_m");
        println!("cargo:rustc-cfg=armv7em");
    }

    if target.ends_with("-eabihf") {
        println!("cargo:rustc-cfg=has_fpu");
    }

    let out = PathBuf::from(env::var("OUT_DIR").unwrap());

    if env::var_os("CARGO_FEATURE_MEMORY_X").is_some() {
        fs::write(out.join("memory.x"), include_bytes!("memory.x")).unwrap();
        println!("cargo:rerun-if-changed=memory.x");
    }

    if env::var_os("CARGO_FEATURE_RT").is_some() {
        fs::write(out.join("device.x"), include_bytes!("device.x")).unwrap();
        println!("cargo:rerun-if-changed=device.x");
    }

    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=build.rs");
}
