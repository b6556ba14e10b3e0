use std::fs;
use std::path::Path;

// Embeds the trunk build of the frontend when it exists; otherwise the
// committed fallback page in static/dist is served.
fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir.join("dist"));
        fs::create_dir_all(out_dir).unwrap();
        fs_extra::dir::copy(dist_dir, out_dir, &fs_extra::dir::CopyOptions::new().overwrite(true))
            .unwrap();
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
