fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/identity.proto");
    println!("cargo:rerun-if-changed=proto/profile.proto");

    // Compile identity service proto
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/identity.proto"], &["proto/"])?;

    // Compile profile service proto
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/profile.proto"], &["proto/"])?;

    Ok(())
}
