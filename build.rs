fn main() {
    // Embedded sqlx migrations are only re-read when the build script reruns
    println!("cargo:rerun-if-changed=migrations");
}
