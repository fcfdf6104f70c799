use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=cbindgen.toml");
    println!("cargo:rerun-if-changed=src");

    if env::var("CARGO_FEATURE_CFFI").is_err() {
        return;
    }

    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let out_dir: PathBuf = ["include", "datrie.h"].iter().collect();

    let config = cbindgen::Config::from_root_or_default(&crate_dir);
    match cbindgen::Builder::new().with_crate(crate_dir).with_config(config).generate() {
        Ok(bindings) => {
            bindings.write_to_file(&out_dir);
        }
        Err(err) => {
            println!("cargo:warning=cbindgen failed to generate datrie.h: {err}");
        }
    }
}
