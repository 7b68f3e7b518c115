fn main() {
    // Embed Windows resources (version info)
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "Desktop Curator");
        res.set("FileDescription", "Random wallpaper rotation for Windows");
        res.set("CompanyName", "Desktop Curator Contributors");
        res.set("OriginalFilename", "desktop-curator.exe");
        res.set("FileVersion", env!("CARGO_PKG_VERSION"));
        res.set("ProductVersion", env!("CARGO_PKG_VERSION"));
        res.compile().unwrap();
    }
}
