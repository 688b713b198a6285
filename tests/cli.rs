use image::Rgba;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs the binary with no arguments and asserts that it writes the
/// default `assets/app_icon.png` at 1024×1024 with the expected pixels.
#[test]
fn default_run_writes_the_master_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = run_citycare_icon(&[], &temp_dir);
    assert_success(&output);

    let icon_path = temp_dir.path().join("assets").join("app_icon.png");
    assert!(
        icon_path.exists(),
        "master icon should exist at: {}",
        icon_path.display()
    );

    let icon = image::open(&icon_path).expect("Failed to decode generated icon");
    assert_eq!(icon.width(), 1024);
    assert_eq!(icon.height(), 1024);

    let rgba = icon.to_rgba8();

    // The rounded-rectangle mask clips the corners.
    assert_eq!(rgba.get_pixel(0, 0)[3], 0, "corner should be transparent");

    // The canvas center falls on the central building: white between
    // windows, dark blue on a window.
    let center = rgba.get_pixel(512, 512);
    assert!(
        *center == Rgba([255, 255, 255, 255]) || *center == Rgba([30, 58, 138, 255]),
        "center pixel should be building or window, got {center:?}"
    );
}

#[test]
fn size_flag_controls_the_master_dimensions() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = run_citycare_icon(&["-o", "icon.png", "--size", "100"], &temp_dir);
    assert_success(&output);

    let icon = image::open(temp_dir.path().join("icon.png")).expect("Failed to decode icon");
    assert_eq!(icon.width(), 100);
    assert_eq!(icon.height(), 100);
}

#[test]
fn extra_sizes_and_android_densities_are_generated() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = run_citycare_icon(
        &["-o", "out/app_icon.png", "--png", "64,128", "--android"],
        &temp_dir,
    );
    assert_success(&output);

    let out_dir = temp_dir.path().join("out");

    for size in [64u32, 128] {
        let path = out_dir.join(format!("{size}x{size}.png"));
        assert!(path.exists(), "{} should exist", path.display());

        let icon = image::open(&path).expect("Failed to decode extra size");
        assert_eq!(icon.width(), size);
        assert_eq!(icon.height(), size);
    }

    for (density, size) in [
        ("mdpi", 48u32),
        ("hdpi", 72),
        ("xhdpi", 96),
        ("xxhdpi", 144),
        ("xxxhdpi", 192),
    ] {
        let path = out_dir
            .join("android")
            .join(format!("mipmap-{density}"))
            .join("ic_launcher.png");
        assert!(path.exists(), "{} should exist", path.display());

        let icon = image::open(&path).expect("Failed to decode launcher icon");
        assert_eq!(icon.width(), size);
        assert_eq!(icon.height(), size);
    }
}

/// Runs the citycare-icon binary inside `temp_dir` so relative output
/// paths land in the sandbox.
fn run_citycare_icon(args: &[&str], temp_dir: &TempDir) -> Output {
    let binary_path = get_binary_path();

    Command::new(&binary_path)
        .args(args)
        .current_dir(temp_dir.path())
        .output()
        .expect("Failed to run citycare-icon command")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("citycare-icon command failed");
    }
}

/// Gets the absolute path to the citycare-icon binary, building it first
/// if needed.
fn get_binary_path() -> PathBuf {
    let debug_path = std::path::Path::new("target/debug/citycare-icon");

    if !debug_path.exists() {
        let build_output = Command::new("cargo")
            .args(["build", "--bin", "citycare-icon"])
            .output()
            .expect("Failed to run cargo build");

        if !build_output.status.success() {
            panic!(
                "Failed to build citycare-icon binary: {}",
                String::from_utf8_lossy(&build_output.stderr)
            );
        }
    }

    // The tests change the child's working directory, so the path must be
    // absolute.
    std::fs::canonicalize(debug_path).expect("Failed to resolve binary path")
}
