use vergen::EmitBuilder;

fn main() {
    if let Err(error) = EmitBuilder::builder()
        .git_describe(true, true, None)
        .emit()
    {
        // Source tarball builds have no git metadata; FULL_VERSION falls
        // back to the plain crate version when the describe string is empty.
        println!("cargo:warning=failed to extract git metadata: {error}");
        println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE=");
    }
}
