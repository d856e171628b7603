use std::fs;

fn main() {
    // 版本号统一维护在 VERSION 文件里
    let version = fs::read_to_string("VERSION")
        .expect("Failed to read VERSION file")
        .trim()
        .to_string();

    println!("cargo:rustc-env=APP_VERSION={}", version);
    println!("cargo:rerun-if-changed=VERSION");
}
