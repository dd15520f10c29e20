#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    let mut res = WindowsResource::new();
    if std::path::Path::new("res/rstaffer.ico").exists() {
        res.set_icon("res/rstaffer.ico");
    }
    res.set("FileDescription", "rStaffer CLI")
        .set("ProductName", "rStaffer")
        .set("OriginalFilename", "rstaffer.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed version resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
