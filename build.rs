//! This build script copies the `memory.x` file from the crate root into a directory where
//! the linker can always find it at build time, and bakes the build time into the firmware
//! so the clock starts close to the real time after flashing.

use std::{env, fs::File, io::Write, path::PathBuf};

fn main() {
    // Put memory layout in the output directory and ensure it's on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    File::create(out.join("memory.x"))
        .expect("create memory.x")
        .write_all(include_bytes!("memory.x"))
        .expect("write memory.x");
    println!("cargo:rustc-link-search={}", out.display());

    // Create rs file with current UTC epoch
    File::create(out.join("utc.rs"))
        .expect("create utc.rs")
        .write_fmt(format_args!(
            "const UTC_EPOCH: i64 = {:?};",
            chrono::Utc::now().timestamp()
        ))
        .expect("write utc.rs");

    // No `rerun-if-changed` here: Cargo then re-runs the script whenever any file in the
    // package changes, which keeps the baked-in epoch close to the flashing time.
}
